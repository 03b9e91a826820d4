use crate::calendar::OwnerId;
use crate::storage::config::UserConfig;

/// Supplies the owner that scopes every task query.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    /// `None` when nobody is signed in.
    fn current_owner_id(&self) -> Option<OwnerId>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfiguredIdentity {
    owner_id: Option<OwnerId>,
}

impl ConfiguredIdentity {
    pub fn new(owner_id: Option<OwnerId>) -> Self {
        Self { owner_id }
    }

    pub fn from_config(user: &UserConfig) -> Self {
        Self::new(user.owner_id.filter(|id| *id > 0))
    }
}

impl IdentityProvider for ConfiguredIdentity {
    fn current_owner_id(&self) -> Option<OwnerId> {
        self.owner_id
    }
}
