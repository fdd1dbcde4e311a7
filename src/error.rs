//! Typed errors for user-supplied selection input.
//!
//! Loading, exporting and rendering report `anyhow::Error`; these variants cover the
//! cases a shell wants to show back to the user (bad query string, bad CLI flag).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown unit '{0}' (expected cars, euro or units)")]
    UnknownUnit(String),

    #[error("unknown region '{0}'")]
    UnknownRegion(String),

    #[error("country '{country}' is not part of region '{region}'")]
    CountryNotInRegion { country: String, region: String },

    #[error("invalid year range '{0}', expected YYYY or YYYY:YYYY")]
    MalformedYearRange(String),

    #[error("year range {start}:{end} is reversed")]
    ReversedYearRange { start: i32, end: i32 },

    #[error("invalid sort key '{0}', expected column[:asc|:desc] with column one of year, unit, value")]
    InvalidSortKey(String),
}
