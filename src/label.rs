// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Behaviour shared by the TAI64 and TAI64N labels.
//!
//! [`TaiLabel`] is the seam for code that wants to be generic over the label
//! width. The text form (`'@'` followed by the upper-case hex of the packed
//! bytes) is identical for both widths, so its `Display`, `FromStr` and
//! optional serde implementations are generated by [`impl_label_text!`].

use crate::error::{Error, Result};
use crate::leap_seconds::LeapSecondTable;
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// Trait for TAI64-family external time labels.
///
/// Implementors are immutable values: every operation returns a new label.
pub trait TaiLabel:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + FromStr<Err = Error>
{
    /// Packed length in bytes.
    const LENGTH: usize;

    /// Label for a UTC instant, using an explicit leap-second table.
    fn from_utc_with(datetime: DateTime<Utc>, table: &LeapSecondTable) -> Self;

    /// UTC instant for this label, using an explicit leap-second table.
    fn to_utc_with(&self, table: &LeapSecondTable) -> Result<DateTime<Utc>>;

    /// Add a signed duration, wrapping modulo 2^64 seconds.
    fn wrapping_add(&self, duration: TimeDelta) -> Self;

    /// Difference `self − other`, wrapping modulo 2^64 seconds.
    fn wrapping_sub(&self, other: &Self) -> Result<TimeDelta>;

    /// Packed big-endian bytes.
    fn to_vec(&self) -> Vec<u8>;

    /// Unpack from exactly [`LENGTH`](Self::LENGTH) bytes.
    fn from_slice(bytes: &[u8]) -> Result<Self>;

    /// Label for a UTC instant, using the built-in leap-second table.
    #[inline]
    fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self::from_utc_with(datetime, LeapSecondTable::builtin())
    }

    /// UTC instant for this label, using the built-in leap-second table.
    #[inline]
    fn to_utc(&self) -> Result<DateTime<Utc>> {
        self.to_utc_with(LeapSecondTable::builtin())
    }

    /// Label for the current system time.
    #[inline]
    fn now() -> Self {
        Self::from_utc(Utc::now())
    }
}

/// `'@'` followed by the upper-case hex digits of `bytes`.
pub(crate) fn encode_text(bytes: &[u8]) -> String {
    format!("@{}", hex::encode_upper(bytes))
}

/// Strip the `'@'` prefix and hex-decode the rest (case-insensitive).
///
/// Length is checked by the caller's `from_slice`.
pub(crate) fn decode_text(text: &str) -> Result<Vec<u8>> {
    let Some(digits) = text.strip_prefix('@') else {
        tracing::debug!(text, "TAI64 text is missing its '@' prefix");
        return Err(Error::MissingPrefix);
    };
    hex::decode(digits).map_err(|err| {
        tracing::debug!(text, %err, "TAI64 text is not valid hex");
        Error::InvalidHex(err)
    })
}

/// Generate `Display`, `FromStr` and (with the `serde` feature)
/// `Serialize`/`Deserialize` for a label type from its `to_bytes` /
/// `from_slice` pair.
macro_rules! impl_label_text {
    ($label:ty) => {
        impl ::std::fmt::Display for $label {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&$crate::label::encode_text(&self.to_bytes()))
            }
        }

        impl ::std::str::FromStr for $label {
            type Err = $crate::Error;

            fn from_str(s: &str) -> $crate::Result<Self> {
                <$label>::from_slice(&$crate::label::decode_text(s)?)
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $label {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $label {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct LabelVisitor;

                impl serde::de::Visitor<'_> for LabelVisitor {
                    type Value = $label;

                    fn expecting(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                        f.write_str("an '@'-prefixed hexadecimal TAI64 label")
                    }

                    fn visit_str<E>(self, v: &str) -> ::std::result::Result<Self::Value, E>
                    where
                        E: serde::de::Error,
                    {
                        v.parse().map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(LabelVisitor)
            }
        }
    };
}

pub(crate) use impl_label_text;
