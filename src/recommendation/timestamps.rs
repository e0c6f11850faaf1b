use chrono::NaiveDateTime;

use crate::errors::TimestampParseError;

/// Layouts tried in order when reading a stored receipt date.
pub const ACCEPTED_LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.6f"];

pub fn parse_receipt_timestamp(value: &str) -> Result<NaiveDateTime, TimestampParseError> {
    ACCEPTED_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .ok_or_else(|| TimestampParseError {
            value: value.to_string(),
            layouts: ACCEPTED_LAYOUTS.join(", "),
        })
}
