use ratatui::style::Color;

use crate::calendar::Priority;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub inactive_day: Color,
    pub success: Color,
    pub error: Color,
    pub high_priority: Color,
    pub medium_priority: Color,
    pub low_priority: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            primary: Color::Rgb(255, 171, 83),
            secondary: Color::Rgb(69, 181, 129),
            background: Color::Rgb(251, 248, 255),
            foreground: Color::Rgb(36, 33, 44),
            border: Color::Rgb(229, 223, 238),
            inactive_day: Color::Rgb(160, 156, 170),
            success: Color::Rgb(76, 175, 80),
            error: Color::Rgb(244, 67, 54),
            high_priority: Color::Rgb(229, 57, 53),
            medium_priority: Color::Rgb(251, 140, 0),
            low_priority: Color::Rgb(67, 160, 71),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color::Rgb(34, 34, 42),
            foreground: Color::Rgb(190, 190, 219),
            inactive_day: Color::Rgb(98, 96, 120),
            ..Self::light()
        }
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.high_priority,
            Priority::Medium => self.medium_priority,
            Priority::Low => self.low_priority,
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["light", "dark"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
