use crate::shared::error::PropertyError;
use crate::shared::Result;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

/// strftime equivalent of `yyyy-MM-dd'T'HH:mm:ss.SSS`
pub const DEFAULT_DATE_TIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Zone used for the localized `.converted` companion values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeZoneSetting {
    Fixed(FixedOffset),
    /// IANA zone such as `Europe/Paris`, daylight saving aware
    Named(Tz),
}

impl TimeZoneSetting {
    /// Offset from UTC in effect at `date`
    pub fn offset_at(&self, date: DateTime<Utc>) -> FixedOffset {
        match self {
            Self::Fixed(offset) => *offset,
            Self::Named(zone) => zone.offset_from_utc_datetime(&date.naive_utc()).fix(),
        }
    }

    fn format(&self, date: DateTime<Utc>, pattern: &str) -> String {
        match self {
            Self::Fixed(offset) => date.with_timezone(offset).format(pattern).to_string(),
            Self::Named(zone) => date.with_timezone(zone).format(pattern).to_string(),
        }
    }
}

impl fmt::Display for TimeZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(offset) => write!(f, "{}", offset),
            Self::Named(zone) => write!(f, "{}", zone.name()),
        }
    }
}

impl From<FixedOffset> for TimeZoneSetting {
    fn from(offset: FixedOffset) -> Self {
        Self::Fixed(offset)
    }
}

impl From<Tz> for TimeZoneSetting {
    fn from(zone: Tz) -> Self {
        Self::Named(zone)
    }
}

/// Formats and parses the timestamps stored in item properties
///
/// Primary values are always written in UTC. When a time zone is configured,
/// a localized copy can be produced for the companion `.converted` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeManager {
    pattern: String,
    time_zone: Option<TimeZoneSetting>,
}

impl DateTimeManager {
    /// Creates a manager after checking that the pattern is a valid strftime format
    pub fn new(pattern: impl Into<String>, time_zone: Option<TimeZoneSetting>) -> Result<Self> {
        let pattern = pattern.into();
        validate_pattern(&pattern)?;
        Ok(Self { pattern, time_zone })
    }

    /// Creates a manager with a time zone given as `UTC`, `+HH:MM` or an IANA name
    ///
    /// A blank name means no time zone.
    pub fn with_time_zone_name(pattern: impl Into<String>, time_zone: Option<&str>) -> Result<Self> {
        let time_zone = time_zone
            .filter(|zone| !zone.trim().is_empty())
            .map(parse_time_zone)
            .transpose()?;
        Self::new(pattern, time_zone)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn time_zone(&self) -> Option<TimeZoneSetting> {
        self.time_zone
    }

    pub fn string_from_date(&self, date: DateTime<Utc>) -> String {
        date.format(&self.pattern).to_string()
    }

    /// Localized representation, or `None` when no time zone is configured
    pub fn string_from_date_with_time_zone(&self, date: DateTime<Utc>) -> Option<String> {
        self.time_zone
            .map(|zone| zone.format(date, &self.pattern))
    }

    /// Parses a value written by [`DateTimeManager::string_from_date`]
    ///
    /// Patterns without a time component yield midnight UTC.
    pub fn date_from_string(&self, value: &str) -> Result<DateTime<Utc>> {
        let value = value.trim();
        let parsed = NaiveDateTime::parse_from_str(value, &self.pattern).or_else(|err| {
            NaiveDate::parse_from_str(value, &self.pattern)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .ok_or(err)
        })?;

        Ok(parsed.and_utc())
    }
}

impl Default for DateTimeManager {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_TIME_PATTERN.to_string(),
            time_zone: None,
        }
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.trim().is_empty() {
        return Err(PropertyError::Validation {
            message: "Date time pattern cannot be empty".to_string(),
        }
        .into());
    }

    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(PropertyError::Validation {
            message: format!("Invalid date time pattern: {}", pattern),
        }
        .into());
    }

    Ok(())
}

/// Parses `UTC`, `Z`, `+HH:MM`, `-HH:MM`, `+HHMM` or an IANA name such as `Europe/Paris`
pub fn parse_time_zone(value: &str) -> Result<TimeZoneSetting> {
    let invalid = || PropertyError::Validation {
        message: format!(
            "Invalid time zone: '{}'. Expected UTC, an offset such as +02:00 or a zone name such as Europe/Paris",
            value
        ),
    };

    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0)
            .map(TimeZoneSetting::Fixed)
            .ok_or_else(|| invalid().into());
    }

    let (sign, rest) = match trimmed.chars().next() {
        Some('+') => (1, &trimmed[1..]),
        Some('-') => (-1, &trimmed[1..]),
        _ => {
            return trimmed
                .parse::<Tz>()
                .map(TimeZoneSetting::Named)
                .map_err(|_| invalid().into())
        }
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid().into());
    }

    let hours: i32 = digits[..2].parse()?;
    let minutes: i32 = digits[2..].parse()?;
    if hours > 23 || minutes > 59 {
        return Err(invalid().into());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .map(TimeZoneSetting::Fixed)
        .ok_or_else(|| invalid().into())
}
