// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by the label codecs, conversions and the leap-second table.

use thiserror::Error;

/// Errors returned by taistamp operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Text representation did not start with `'@'`.
    #[error("TAI64 text representation must begin with '@'")]
    MissingPrefix,

    /// Text representation contained characters that are not hex digits.
    #[error("invalid hex in TAI64 text representation: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Packed buffer (or decoded text) has the wrong number of bytes.
    #[error("invalid label length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// TAI64N nanosecond field is not below one second.
    #[error("nanosecond field out of range: {0}")]
    InvalidNanoseconds(u32),

    /// A label difference does not fit in a `chrono::TimeDelta`.
    #[error("label difference cannot be represented as a duration")]
    DurationOutOfRange,

    /// The label maps outside the range of `chrono::DateTime<Utc>`.
    #[error("label is outside the representable UTC range")]
    CivilOutOfRange,

    /// Leap-second entries are not strictly increasing by date.
    #[error("leap-second entry {index} is not later than its predecessor")]
    UnorderedLeapTable { index: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
