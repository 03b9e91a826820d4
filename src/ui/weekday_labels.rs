use chrono::{Days, Locale, NaiveDate, NaiveTime, TimeZone, Utc};

pub const DEFAULT_LOCALE: Locale = Locale::en_US;

/// Parses `en_US` or `en-US` style identifiers.
pub fn parse_locale(name: &str) -> Option<Locale> {
    let normalized = name.trim().replace('-', "_");
    Locale::try_from(normalized.as_str()).ok()
}

pub fn resolve_locale(name: &str) -> Locale {
    parse_locale(name).unwrap_or_else(|| {
        tracing::warn!("Unknown locale '{}', falling back to en_US", name);
        DEFAULT_LOCALE
    })
}

// 2021-06-06 was a Sunday.
fn reference_sunday() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2021, 6, 6)
}

/// Short weekday names, Sunday first, as `locale` spells them.
pub fn labels_for(locale: Locale) -> Vec<String> {
    let Some(sunday) = reference_sunday() else {
        return Vec::new();
    };

    (0..7u64)
        .filter_map(|offset| sunday.checked_add_days(Days::new(offset)))
        .map(|day| {
            Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
                .format_localized("%a", locale)
                .to_string()
        })
        .collect()
}

/// Labels computed once per locale.
#[derive(Debug, Clone)]
pub struct WeekdayLabels {
    locale: Locale,
    labels: Vec<String>,
}

impl WeekdayLabels {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            labels: labels_for(locale),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Default for WeekdayLabels {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}
