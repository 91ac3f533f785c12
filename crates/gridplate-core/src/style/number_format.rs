//! Number format types

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Number format for cell display
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Built-in format by ID
    BuiltIn(u32),

    /// Custom format string
    Custom(String),
}

/// Which parts of a date serial a format shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    /// Calendar date only
    Date,
    /// Time of day only
    Time,
    /// Date and time
    DateTime,
}

impl NumberFormat {
    /// 0 - General
    pub const ID_GENERAL: u32 = 0;
    /// 1 - 0
    pub const ID_NUMBER_INT: u32 = 1;
    /// 2 - 0.00
    pub const ID_NUMBER_DEC2: u32 = 2;
    /// 14 - mm-dd-yy
    pub const ID_DATE_SHORT: u32 = 14;
    /// 21 - h:mm:ss
    pub const ID_TIME_24H_SEC: u32 = 21;
    /// 22 - m/d/yy h:mm
    pub const ID_DATETIME: u32 = 22;
    /// 49 - @
    pub const ID_TEXT: u32 = 49;

    /// Create a number format from a format string
    pub fn from_string<S: Into<String>>(format: S) -> Self {
        NumberFormat::Custom(format.into())
    }

    /// Short date (mm-dd-yy)
    pub fn date_short() -> Self {
        NumberFormat::BuiltIn(Self::ID_DATE_SHORT)
    }

    /// Date and time (m/d/yy h:mm)
    pub fn datetime() -> Self {
        NumberFormat::BuiltIn(Self::ID_DATETIME)
    }

    /// Text format (@)
    pub fn text() -> Self {
        NumberFormat::BuiltIn(Self::ID_TEXT)
    }

    /// Classify a date/time format, `None` for everything else
    pub fn date_kind(&self) -> Option<DateKind> {
        match self {
            NumberFormat::General => None,
            NumberFormat::BuiltIn(id) => match id {
                14..=17 => Some(DateKind::Date),
                18..=21 => Some(DateKind::Time),
                22 => Some(DateKind::DateTime),
                _ => None,
            },
            NumberFormat::Custom(s) => {
                // Quoted literals and [color]/[h] sections don't count
                let mut plain = String::with_capacity(s.len());
                let mut quoted = false;
                let mut bracketed = false;
                for c in s.chars() {
                    match c {
                        '"' => quoted = !quoted,
                        '[' if !quoted => bracketed = true,
                        ']' if !quoted => bracketed = false,
                        _ if !quoted && !bracketed => plain.push(c.to_ascii_lowercase()),
                        _ => {}
                    }
                }

                let has_time = plain.contains('h') || plain.contains('s');
                let has_date = plain.contains('y')
                    || plain.contains('d')
                    || (plain.contains('m') && !has_time);
                match (has_date, has_time) {
                    (true, true) => Some(DateKind::DateTime),
                    (true, false) => Some(DateKind::Date),
                    (false, true) => Some(DateKind::Time),
                    (false, false) => None,
                }
            }
        }
    }

    /// Render a 1900-system date serial under this format.
    ///
    /// Returns `None` when the format is not a date/time format or the serial
    /// is not a representable date.
    pub fn format_date_serial(&self, serial: f64) -> Option<String> {
        let kind = self.date_kind()?;
        let datetime = serial_to_datetime(serial)?;

        Some(match kind {
            DateKind::Date => datetime.format("%Y-%m-%d").to_string(),
            DateKind::Time => datetime.format("%H:%M:%S").to_string(),
            DateKind::DateTime => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }
}

/// Convert a 1900-system serial to a timestamp.
///
/// Serial 60 is the nonexistent 1900-02-29 and renders as 1900-02-28; serials
/// below it are offset by one day relative to the ones after.
fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let mut days = serial.trunc() as u64;
    let mut seconds = ((serial - serial.trunc()) * 86_400.0).round() as u32;
    if seconds >= 86_400 {
        days += 1;
        seconds -= 86_400;
    }

    let epoch = if days < 60 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let date = epoch.checked_add_days(Days::new(days))?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)?;

    Some(date.and_time(time))
}
