// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! TAI64N labels: a [`Tai64`] second plus a nanosecond field.
//!
//! The nanosecond field is always normalised into `[0, 10^9)`. Constructors
//! carry any excess into the seconds, [`Tai64N::wrapping_add`] applies a
//! single carry or borrow, and unpacking rejects out-of-range input.
//!
//! Packed form (12 bytes, big-endian):
//!
//! ```text
//! +----------------+--------+
//! |  sec (u64)     | nano   |
//! |  8 bytes       | 4 bytes|
//! +----------------+--------+
//! ```

use crate::error::{Error, Result};
use crate::label::{impl_label_text, TaiLabel};
use crate::leap_seconds::LeapSecondTable;
use crate::tai64::{label_seconds, utc_from_label, Tai64};
use chrono::{DateTime, TimeDelta, Utc};

/// Nanoseconds in one second.
pub const NANOS_PER_SEC: u32 = 1_000_000_000;

/// A TAI64N label.
///
/// Ordered by seconds, then nanoseconds.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tai64N {
    secs: Tai64,
    nanos: u32,
}

impl Tai64N {
    /// Packed length in bytes.
    pub const LENGTH: usize = 12;

    /// Label of 1970-01-01T00:00:00.000000000Z.
    pub const UNIX_EPOCH: Self = Self {
        secs: Tai64::UNIX_EPOCH,
        nanos: 0,
    };

    /// Build a label from its parts; whole seconds in `nanos` are carried
    /// into `secs` (wrapping).
    #[inline]
    pub const fn new(secs: Tai64, nanos: u32) -> Self {
        Self {
            secs: Tai64::new(secs.value().wrapping_add((nanos / NANOS_PER_SEC) as u64)),
            nanos: nanos % NANOS_PER_SEC,
        }
    }

    /// The seconds part.
    #[inline]
    pub const fn seconds(&self) -> Tai64 {
        self.secs
    }

    /// The nanosecond part, always below [`NANOS_PER_SEC`].
    #[inline]
    pub const fn nanoseconds(&self) -> u32 {
        self.nanos
    }

    // ── civil time ────────────────────────────────────────────────────

    /// Label for the current system time, from a single clock sample.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Label for a UTC instant.
    #[inline]
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self::from_utc_with(datetime, LeapSecondTable::builtin())
    }

    /// Like [`from_utc`](Self::from_utc), resolving offsets against `table`.
    ///
    /// A chrono leap-second representation (nanoseconds ≥ 10^9) is carried
    /// into the next second.
    pub fn from_utc_with(datetime: DateTime<Utc>, table: &LeapSecondTable) -> Self {
        let secs = Tai64::new(label_seconds(datetime.timestamp(), table));
        Self::new(secs, datetime.timestamp_subsec_nanos())
    }

    /// Convert back to UTC, keeping the nanoseconds.
    ///
    /// Uses the same provisional-instant offset lookup as [`Tai64::to_utc`].
    #[inline]
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        self.to_utc_with(LeapSecondTable::builtin())
    }

    /// Like [`to_utc`](Self::to_utc), resolving offsets against `table`.
    #[inline]
    pub fn to_utc_with(&self, table: &LeapSecondTable) -> Result<DateTime<Utc>> {
        utc_from_label(self.secs.value(), self.nanos, table)
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Add a signed duration, wrapping the seconds modulo 2^64.
    ///
    /// The sub-second remainder of `duration` carries or borrows at most one
    /// second, so the result stays normalised.
    pub fn wrapping_add(self, duration: TimeDelta) -> Self {
        const NANOS: i64 = NANOS_PER_SEC as i64;
        let secs = self.secs.value().wrapping_add(duration.num_seconds() as u64);
        let nanos = i64::from(self.nanos) + i64::from(duration.subsec_nanos());
        let (secs, nanos) = if nanos >= NANOS {
            (secs.wrapping_add(1), nanos - NANOS)
        } else if nanos < 0 {
            (secs.wrapping_sub(1), nanos + NANOS)
        } else {
            (secs, nanos)
        };
        Self {
            secs: Tai64::new(secs),
            nanos: nanos as u32,
        }
    }

    /// Time from `other` to `self`, with the seconds computed modulo 2^64.
    ///
    /// Fails with [`Error::DurationOutOfRange`] when the (possibly wrapped)
    /// difference does not fit a `TimeDelta`, e.g. whenever `other > self`.
    pub fn wrapping_sub(self, other: Self) -> Result<TimeDelta> {
        let mut secs = self.secs.value().wrapping_sub(other.secs.value());
        let nanos = if other.nanos > self.nanos {
            secs = secs.wrapping_sub(1);
            self.nanos + NANOS_PER_SEC - other.nanos
        } else {
            self.nanos - other.nanos
        };
        i64::try_from(secs)
            .ok()
            .and_then(|secs| TimeDelta::new(secs, nanos))
            .ok_or(Error::DurationOutOfRange)
    }

    // ── binary codec ──────────────────────────────────────────────────

    /// Packed big-endian form: seconds then nanoseconds.
    pub fn to_bytes(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        out[..Tai64::LENGTH].copy_from_slice(&self.secs.to_bytes());
        out[Tai64::LENGTH..].copy_from_slice(&self.nanos.to_be_bytes());
        out
    }

    /// Unpack from the big-endian form.
    ///
    /// Fails with [`Error::InvalidNanoseconds`] if the nanosecond field is
    /// not below one second.
    pub fn from_bytes(bytes: [u8; 12]) -> Result<Self> {
        let (secs, nanos) = bytes.split_at(Tai64::LENGTH);
        let secs = Tai64::from_slice(secs)?;
        let nanos = u32::from_be_bytes([nanos[0], nanos[1], nanos[2], nanos[3]]);
        if nanos >= NANOS_PER_SEC {
            tracing::debug!(nanos, "rejecting TAI64N label with unnormalised nanoseconds");
            return Err(Error::InvalidNanoseconds(nanos));
        }
        Ok(Self { secs, nanos })
    }

    /// Unpack from a slice of exactly [`LENGTH`](Self::LENGTH) bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let packed: [u8; 12] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: Self::LENGTH,
            actual: bytes.len(),
        })?;
        Self::from_bytes(packed)
    }
}

impl_label_text!(Tai64N);

impl TaiLabel for Tai64N {
    const LENGTH: usize = Tai64N::LENGTH;

    #[inline]
    fn from_utc_with(datetime: DateTime<Utc>, table: &LeapSecondTable) -> Self {
        Tai64N::from_utc_with(datetime, table)
    }

    #[inline]
    fn to_utc_with(&self, table: &LeapSecondTable) -> Result<DateTime<Utc>> {
        Tai64N::to_utc_with(self, table)
    }

    #[inline]
    fn wrapping_add(&self, duration: TimeDelta) -> Self {
        Tai64N::wrapping_add(*self, duration)
    }

    #[inline]
    fn wrapping_sub(&self, other: &Self) -> Result<TimeDelta> {
        Tai64N::wrapping_sub(*self, *other)
    }

    #[inline]
    fn to_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    #[inline]
    fn from_slice(bytes: &[u8]) -> Result<Self> {
        Tai64N::from_slice(bytes)
    }
}

// ── conversions ───────────────────────────────────────────────────────────

impl From<Tai64> for Tai64N {
    #[inline]
    fn from(secs: Tai64) -> Self {
        Self { secs, nanos: 0 }
    }
}

/// Drops the nanoseconds.
impl From<Tai64N> for Tai64 {
    #[inline]
    fn from(label: Tai64N) -> Self {
        label.secs
    }
}

impl From<Tai64N> for [u8; 12] {
    #[inline]
    fn from(label: Tai64N) -> Self {
        label.to_bytes()
    }
}

impl TryFrom<[u8; 12]> for Tai64N {
    type Error = Error;

    #[inline]
    fn try_from(bytes: [u8; 12]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for Tai64N {
    type Error = Error;

    #[inline]
    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tai64::BIAS;
    use chrono::TimeZone;

    fn label(secs: u64, nanos: u32) -> Tai64N {
        Tai64N::new(Tai64::new(secs), nanos)
    }

    #[test]
    fn from_utc_roundtrip_2018() {
        let t = Utc.with_ymd_and_hms(2018, 2, 14, 19, 31, 10).unwrap();
        let l = Tai64N::from_utc(t);
        assert_eq!(l.seconds(), Tai64::from_utc(t));
        assert_eq!(l.nanoseconds(), 0);
        assert_eq!(l.to_utc().unwrap(), t);
    }

    #[test]
    fn from_utc_keeps_nanoseconds() {
        let t = Utc.with_ymd_and_hms(2020, 3, 1, 12, 0, 0).unwrap() + TimeDelta::nanoseconds(123_456_789);
        let l = Tai64N::from_utc(t);
        assert_eq!(l.nanoseconds(), 123_456_789);
        assert_eq!(l.to_utc().unwrap(), t);
    }

    #[test]
    fn new_carries_excess_nanoseconds() {
        let l = label(10, 2_500_000_000);
        assert_eq!(l.seconds().value(), 12);
        assert_eq!(l.nanoseconds(), 500_000_000);
        assert_eq!(label(u64::MAX, NANOS_PER_SEC), label(0, 0));
    }

    #[test]
    fn now_is_normalised() {
        let l = Tai64N::now();
        assert!(l.nanoseconds() < NANOS_PER_SEC);
        assert!(l.seconds() > Tai64::UNIX_EPOCH);
    }

    #[test]
    fn add_wraps_on_overflow() {
        let cases = [
            (label(u64::MAX - 2, 500_000_000), TimeDelta::seconds(5), label(2, 500_000_000)),
            (label(u64::MAX, 500_000_000), TimeDelta::milliseconds(600), label(0, 100_000_000)),
            (label(2, 500_000_000), TimeDelta::seconds(-5), label(u64::MAX - 2, 500_000_000)),
            (label(0, 300_000_000), TimeDelta::milliseconds(-500), label(u64::MAX, 800_000_000)),
            (label(0, 0), TimeDelta::seconds(-1), label(u64::MAX, 0)),
        ];
        for (start, duration, expected) in cases {
            assert_eq!(start.wrapping_add(duration), expected, "{start} + {duration}");
        }
    }

    #[test]
    fn add_carry_and_borrow_at_boundaries() {
        assert_eq!(label(1000, 999_999_999).wrapping_add(TimeDelta::nanoseconds(1)), label(1001, 0));
        assert_eq!(label(1000, 0).wrapping_add(TimeDelta::nanoseconds(-1)), label(999, 999_999_999));
        assert_eq!(
            label(1000, 500_000_000).wrapping_add(TimeDelta::nanoseconds(123_456_789)),
            label(1000, 623_456_789)
        );
        assert_eq!(
            label(1000, 900_000_000).wrapping_add(TimeDelta::nanoseconds(1_123_456_789)),
            label(1002, 23_456_789)
        );
        assert_eq!(label(12345, 678_900_000).wrapping_add(TimeDelta::zero()), label(12345, 678_900_000));
    }

    #[test]
    fn add_extreme_durations_stay_normalised() {
        let start = label(u64::MAX / 2, 999_999_999);
        for duration in [TimeDelta::MAX, TimeDelta::MIN, -TimeDelta::MAX] {
            let result = start.wrapping_add(duration);
            assert!(result.nanoseconds() < NANOS_PER_SEC, "{duration}");
        }
        let result = label(u64::MAX / 2, 0).wrapping_add(TimeDelta::MAX);
        assert_eq!(result.seconds().value(), u64::MAX / 2 + (i64::MAX / 1000) as u64);
        assert_eq!(result.nanoseconds(), 807_000_000);
    }

    #[test]
    fn sub_borrows_nanoseconds() {
        let a = label(BIAS + 10, 100);
        let b = label(BIAS + 5, 200);
        assert_eq!(a.wrapping_sub(b), Ok(TimeDelta::seconds(5) - TimeDelta::nanoseconds(100)));
        assert_eq!(b.wrapping_sub(b), Ok(TimeDelta::zero()));
    }

    #[test]
    fn sub_with_later_rhs_wraps_out_of_range() {
        let a = label(BIAS, 100);
        assert_eq!(a.wrapping_sub(label(BIAS, 200)), Err(Error::DurationOutOfRange));
        assert_eq!(a.wrapping_sub(label(BIAS + 1, 0)), Err(Error::DurationOutOfRange));
    }

    #[test]
    fn sub_inverts_add() {
        let start = Tai64N::from_utc(Utc.with_ymd_and_hms(2001, 9, 9, 1, 46, 40).unwrap());
        for d in [
            TimeDelta::nanoseconds(1),
            TimeDelta::milliseconds(1_500),
            TimeDelta::days(400) + TimeDelta::nanoseconds(999_999_999),
        ] {
            assert_eq!(start.wrapping_add(d).wrapping_sub(start), Ok(d));
        }
    }

    #[test]
    fn pack_layout() {
        let l = label(0x4000_0000_0000_000a, 0x3b9a_c9ff);
        assert_eq!(
            l.to_bytes(),
            [0x40, 0, 0, 0, 0, 0, 0, 0x0a, 0x3b, 0x9a, 0xc9, 0xff]
        );
        assert_eq!(Tai64N::from_bytes(l.to_bytes()), Ok(l));
        assert_eq!(l.to_string(), "@400000000000000A3B9AC9FF");
    }

    #[test]
    fn unpack_rejects_wrong_length_and_nanos() {
        assert_eq!(
            Tai64N::from_slice(&[0u8; 8]),
            Err(Error::InvalidLength { expected: 12, actual: 8 })
        );
        let mut bytes = Tai64N::UNIX_EPOCH.to_bytes();
        bytes[8..].copy_from_slice(&NANOS_PER_SEC.to_be_bytes());
        assert_eq!(Tai64N::from_bytes(bytes), Err(Error::InvalidNanoseconds(NANOS_PER_SEC)));
    }

    #[test]
    fn text_parsing() {
        let l: Tai64N = "@400000000000000a3b9ac9ff".parse().unwrap();
        assert_eq!(l, label(BIAS, 999_999_999));
        assert_eq!("400000000000000A3B9AC9FF".parse::<Tai64N>(), Err(Error::MissingPrefix));
        assert_eq!(
            "@40000000036db755".parse::<Tai64N>(),
            Err(Error::InvalidLength { expected: 12, actual: 8 })
        );
        assert!(matches!("@xyz".parse::<Tai64N>(), Err(Error::InvalidHex(_))));
    }

    #[test]
    fn ordering_uses_seconds_then_nanos() {
        assert!(label(5, 999_999_999) < label(6, 0));
        assert!(label(5, 1) > label(5, 0));
    }

    #[test]
    fn conversions_to_and_from_tai64() {
        let l = label(BIAS + 42, 7);
        assert_eq!(Tai64::from(l), Tai64::new(BIAS + 42));
        assert_eq!(Tai64N::from(Tai64::new(BIAS + 42)), label(BIAS + 42, 0));
    }
}
