// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! TAI64 labels: whole seconds on the TAI axis.
//!
//! A [`Tai64`] stores a single `u64`
//!
//! ```text
//! x = BIAS + offset_at(t) + unix_seconds(t)
//! ```
//!
//! where [`BIAS`] is `2^62 + 10`. Labels order as unsigned integers and all
//! arithmetic on `x` wraps modulo 2^64; the wrapping is spelled out in the
//! method names ([`Tai64::wrapping_add`], [`Tai64::wrapping_sub`]).
//!
//! ## Boundary approximation
//!
//! [`Tai64::to_utc`] resolves the leap-second offset at the *provisional*
//! instant `x − BIAS` (before leap correction), not at the corrected one.
//! The provisional instant runs `offset` seconds ahead, so for instants in
//! the `offset` seconds preceding each transition it resolves the new offset
//! and the result comes back one second early. Outside that window
//! conversions round-trip exactly.

use crate::error::{Error, Result};
use crate::label::{impl_label_text, TaiLabel};
use crate::leap_seconds::LeapSecondTable;
use chrono::{DateTime, TimeDelta, Utc};

/// TAI64 label of Unix second 0 before leap correction: `2^62 + 10`.
pub const BIAS: u64 = (1 << 62) + 10;

/// A TAI64 label.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tai64(u64);

impl Tai64 {
    /// Packed length in bytes.
    pub const LENGTH: usize = 8;

    /// Label of 1970-01-01T00:00:00Z.
    pub const UNIX_EPOCH: Self = Self(BIAS);

    /// Wrap a raw label value.
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw label value.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    // ── civil time ────────────────────────────────────────────────────

    /// Label for the current system time.
    ///
    /// The clock is read once; offset and seconds come from that sample.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Label for a UTC instant. Sub-second precision is discarded.
    #[inline]
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self::from_utc_with(datetime, LeapSecondTable::builtin())
    }

    /// Like [`from_utc`](Self::from_utc), resolving offsets against `table`.
    #[inline]
    pub fn from_utc_with(datetime: DateTime<Utc>, table: &LeapSecondTable) -> Self {
        Self(label_seconds(datetime.timestamp(), table))
    }

    /// Convert back to UTC.
    ///
    /// Fails with [`Error::CivilOutOfRange`] if the label lies outside the
    /// range of `DateTime<Utc>`.
    #[inline]
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        self.to_utc_with(LeapSecondTable::builtin())
    }

    /// Like [`to_utc`](Self::to_utc), resolving offsets against `table`.
    #[inline]
    pub fn to_utc_with(&self, table: &LeapSecondTable) -> Result<DateTime<Utc>> {
        utc_from_label(self.0, 0, table)
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Add the whole seconds of `duration`, wrapping modulo 2^64.
    ///
    /// The sub-second part is truncated toward zero; negative durations move
    /// the label backwards.
    #[inline]
    pub fn wrapping_add(self, duration: TimeDelta) -> Self {
        Self(self.0.wrapping_add(duration.num_seconds() as u64))
    }

    /// Seconds from `other` to `self`, computed modulo 2^64.
    ///
    /// If `other > self` the difference wraps to a very large value, which
    /// fails with [`Error::DurationOutOfRange`] because it does not fit a
    /// `TimeDelta`.
    #[inline]
    pub fn wrapping_sub(self, other: Self) -> Result<TimeDelta> {
        let delta = self.0.wrapping_sub(other.0);
        i64::try_from(delta)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or(Error::DurationOutOfRange)
    }

    // ── binary codec ──────────────────────────────────────────────────

    /// Packed big-endian form.
    #[inline]
    pub const fn to_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Unpack from the big-endian form.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }

    /// Unpack from a slice of exactly [`LENGTH`](Self::LENGTH) bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let packed: [u8; 8] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: Self::LENGTH,
            actual: bytes.len(),
        })?;
        Ok(Self::from_bytes(packed))
    }
}

/// `BIAS + offset + unix`, all modulo 2^64.
pub(crate) fn label_seconds(unix: i64, table: &LeapSecondTable) -> u64 {
    BIAS.wrapping_add(table.offset_at_timestamp(unix) as u64)
        .wrapping_add(unix as u64)
}

/// Provisional UTC instant `secs − BIAS`, corrected by the offset resolved
/// at that provisional instant.
pub(crate) fn utc_from_label(
    secs: u64,
    nanos: u32,
    table: &LeapSecondTable,
) -> Result<DateTime<Utc>> {
    let unix = secs.wrapping_sub(BIAS) as i64;
    let provisional = DateTime::<Utc>::from_timestamp(unix, nanos).ok_or(Error::CivilOutOfRange)?;
    if table.straddles_transition(unix) {
        tracing::trace!(unix, "provisional instant resolves the offset after a transition");
    }
    TimeDelta::try_seconds(table.offset_at_timestamp(unix))
        .and_then(|offset| provisional.checked_sub_signed(offset))
        .ok_or(Error::CivilOutOfRange)
}

impl_label_text!(Tai64);

impl TaiLabel for Tai64 {
    const LENGTH: usize = Tai64::LENGTH;

    #[inline]
    fn from_utc_with(datetime: DateTime<Utc>, table: &LeapSecondTable) -> Self {
        Tai64::from_utc_with(datetime, table)
    }

    #[inline]
    fn to_utc_with(&self, table: &LeapSecondTable) -> Result<DateTime<Utc>> {
        Tai64::to_utc_with(self, table)
    }

    #[inline]
    fn wrapping_add(&self, duration: TimeDelta) -> Self {
        Tai64::wrapping_add(*self, duration)
    }

    #[inline]
    fn wrapping_sub(&self, other: &Self) -> Result<TimeDelta> {
        Tai64::wrapping_sub(*self, *other)
    }

    #[inline]
    fn to_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    #[inline]
    fn from_slice(bytes: &[u8]) -> Result<Self> {
        Tai64::from_slice(bytes)
    }
}

// ── conversions ───────────────────────────────────────────────────────────

impl From<[u8; 8]> for Tai64 {
    #[inline]
    fn from(bytes: [u8; 8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Tai64> for [u8; 8] {
    #[inline]
    fn from(label: Tai64) -> Self {
        label.to_bytes()
    }
}

impl TryFrom<&[u8]> for Tai64 {
    type Error = Error;

    #[inline]
    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}
