use chrono::{Local, NaiveDate};

pub const DAY_KEY_FORMAT: &str = "%a %b %d %Y";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn fixed(day: NaiveDate) -> Self {
        Self::Fixed(day)
    }

    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(day) => *day,
        }
    }
}

pub fn day_key(day: NaiveDate) -> String {
    day.format(DAY_KEY_FORMAT).to_string()
}

pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DAY_KEY_FORMAT).ok()
}

pub fn is_same_day(stored: &str, day: NaiveDate) -> bool {
    parse_day_key(stored) == Some(day)
}
