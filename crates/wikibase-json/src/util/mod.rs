//! Utility modules: decimal numbers and timestamp strings.

pub mod decimal;
pub mod timestamp;

pub use decimal::Decimal;
pub use timestamp::{
    TimestampParseError, TimestampParts, format_timestamp, format_timezone_offset, parse_timestamp,
};
