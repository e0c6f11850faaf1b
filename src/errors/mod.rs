use thiserror::Error;

/// A stored receipt date that matches none of the accepted layouts.
#[derive(Debug, Error, PartialEq)]
#[error("timestamp '{value}' matches none of the accepted layouts ({layouts})")]
pub struct TimestampParseError {
    pub value: String,
    pub layouts: String,
}

/// No usable category id could be pulled out of a model reply.
#[derive(Debug, Error, PartialEq)]
#[error("could not extract a valid category ID from response: {response}")]
pub struct CategoryExtractionError {
    pub response: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("no input received")]
    NoInput,
    #[error("input cannot be empty")]
    Empty,
    #[error("'{0}' is not a valid number")]
    NotANumber(String),
    #[error("category ID {id} is below minimum allowed value {min}")]
    BelowMinimum { id: i64, min: i64 },
    #[error("category ID {id} exceeds maximum allowed value {max}")]
    AboveMaximum { id: i64, max: i64 },
    #[error("maximum number of attempts ({0}) exceeded")]
    AttemptsExceeded(usize),
}

/// Add context to query errors
pub fn query_context(what: &str) -> String {
    format!("Failed to load {}", what)
}

/// Add context to file read errors
pub fn file_context(path: &str) -> String {
    format!("Failed to read file: {}", path)
}
