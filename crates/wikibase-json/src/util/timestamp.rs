//! Wikibase timestamp parsing and formatting.
//!
//! Time values travel as a single string `+YYYY-MM-DDTHH:MM:SSZ` (year with a
//! mandatory sign and at least four digits; month and day may be `00` for
//! coarse precisions), while the model keeps the components separately.

/// Error type for timestamp parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampParseError {
    pub message: String,
}

impl std::fmt::Display for TimestampParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TimestampParseError {}

/// The calendar components carried by a timestamp string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampParts {
    pub year: i64,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

fn error(message: impl Into<String>) -> TimestampParseError {
    TimestampParseError { message: message.into() }
}

/// Parses a two-digit component.
fn parse_component(s: &str, name: &str) -> Result<u8, TimestampParseError> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(error(format!("{} must be two digits, got {:?}", name, s)));
    }
    s.parse().map_err(|_| error(format!("invalid {}: {:?}", name, s)))
}

/// Parses `+YYYY-MM-DDTHH:MM:SSZ` into its components.
///
/// Only the syntax is checked here; component ranges are validated when the
/// time value is constructed.
pub fn parse_timestamp(s: &str) -> Result<TimestampParts, TimestampParseError> {
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => return Err(error("timestamp must start with '+' or '-'")),
    };

    let (date, time) = rest
        .split_once('T')
        .ok_or_else(|| error("missing 'T' separator"))?;

    let mut date_fields = date.rsplitn(3, '-');
    let day = date_fields.next().ok_or_else(|| error("missing day"))?;
    let month = date_fields.next().ok_or_else(|| error("missing month"))?;
    let year = date_fields.next().ok_or_else(|| error("missing year"))?;

    if year.len() < 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(error(format!("year must have at least four digits, got {:?}", year)));
    }
    let out_of_range = || error(format!("year out of range: {:?}", year));
    let magnitude: u64 = year.parse().map_err(|_| out_of_range())?;
    let year = if negative {
        0i64.checked_sub_unsigned(magnitude).ok_or_else(out_of_range)?
    } else {
        i64::try_from(magnitude).map_err(|_| out_of_range())?
    };

    let time = time
        .strip_suffix('Z')
        .ok_or_else(|| error("timestamp must end with 'Z'"))?;
    let mut time_fields = time.split(':');
    let hour = time_fields.next().ok_or_else(|| error("missing hour"))?;
    let minute = time_fields.next().ok_or_else(|| error("missing minute"))?;
    let second = time_fields.next().ok_or_else(|| error("missing second"))?;
    if time_fields.next().is_some() {
        return Err(error("too many time fields"));
    }

    Ok(TimestampParts {
        year,
        month: parse_component(month, "month")?,
        day: parse_component(day, "day")?,
        hour: parse_component(hour, "hour")?,
        minute: parse_component(minute, "minute")?,
        second: parse_component(second, "second")?,
    })
}

/// Formats components as `+YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_timestamp(parts: &TimestampParts) -> String {
    let sign = if parts.year < 0 { '-' } else { '+' };
    format!(
        "{}{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        sign,
        parts.year.unsigned_abs(),
        parts.month,
        parts.day,
        parts.hour,
        parts.minute,
        parts.second
    )
}

/// Formats an offset in minutes as a UTC offset string (Z, +HH:MM, -HH:MM).
pub fn format_timezone_offset(offset_min: i32) -> String {
    if offset_min == 0 {
        return "Z".to_string();
    }

    let sign = if offset_min >= 0 { '+' } else { '-' };
    let abs_offset = offset_min.unsigned_abs();
    let hours = abs_offset / 60;
    let minutes = abs_offset % 60;

    format!("{}{:02}:{:02}", sign, hours, minutes)
}
