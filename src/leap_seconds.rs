// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Leap-second table and offset resolver
//!
//! A [`LeapSecondTable`] is an ordered list of [`LeapSecond`] entries, each
//! pairing the UTC instant at which an offset takes effect with the
//! cumulative offset (in whole seconds) in force from that instant on.
//!
//! The built-in table ([`LeapSecondTable::builtin`]) is a `static` and never
//! changes at runtime. It is not updated automatically: when a new leap
//! second is announced, either append it to [`LEAP_SECONDS`] or build an
//! extended table with [`LeapSecondTable::with_entry`] and pass it to the
//! `*_with` conversions on [`Tai64`](crate::Tai64) / [`Tai64N`](crate::Tai64N).
//!
//! ## Quick Example
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use taistamp::offset_at;
//!
//! let t = Utc.with_ymd_and_hms(1982, 8, 1, 0, 0, 0).unwrap();
//! assert_eq!(offset_at(t), 21);
//! ```

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::borrow::Cow;

/// A single entry of the leap-second table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeapSecond {
    effective: i64,
    offset: i64,
}

impl LeapSecond {
    /// Create an entry effective at `effective` (Unix seconds, UTC).
    #[inline]
    pub const fn new(effective: i64, offset: i64) -> Self {
        Self { effective, offset }
    }

    /// Create an entry from the UTC instant at which it takes effect.
    ///
    /// Sub-second precision is discarded.
    #[inline]
    pub fn from_date(effective: DateTime<Utc>, offset: i64) -> Self {
        Self::new(effective.timestamp(), offset)
    }

    /// Unix timestamp at which this entry takes effect.
    #[inline]
    pub const fn effective_timestamp(&self) -> i64 {
        self.effective
    }

    /// UTC instant at which this entry takes effect.
    ///
    /// Returns `None` if the timestamp falls outside chrono's representable range.
    #[inline]
    pub fn effective_date(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.effective, 0)
    }

    /// Cumulative offset, in seconds, in force from the effective date on.
    #[inline]
    pub const fn offset(&self) -> i64 {
        self.offset
    }
}

/// Built-in leap-second entries: (UTC start of the day the offset applies, offset).
///
/// The second is inserted at the end of the previous day. Instants before
/// 1972-07-01 resolve to an offset of 0.
#[rustfmt::skip]
pub const LEAP_SECONDS: [LeapSecond; 27] = [
    LeapSecond::new(78_796_800, 11),    // 1972-07-01
    LeapSecond::new(94_694_400, 12),    // 1973-01-01
    LeapSecond::new(126_230_400, 13),   // 1974-01-01
    LeapSecond::new(157_766_400, 14),   // 1975-01-01
    LeapSecond::new(189_302_400, 15),   // 1976-01-01
    LeapSecond::new(220_924_800, 16),   // 1977-01-01
    LeapSecond::new(252_460_800, 17),   // 1978-01-01
    LeapSecond::new(283_996_800, 18),   // 1979-01-01
    LeapSecond::new(315_532_800, 19),   // 1980-01-01
    LeapSecond::new(362_793_600, 20),   // 1981-07-01
    LeapSecond::new(394_329_600, 21),   // 1982-07-01
    LeapSecond::new(425_865_600, 22),   // 1983-07-01
    LeapSecond::new(489_024_000, 23),   // 1985-07-01
    LeapSecond::new(567_993_600, 24),   // 1988-01-01
    LeapSecond::new(631_152_000, 25),   // 1990-01-01
    LeapSecond::new(662_688_000, 26),   // 1991-01-01
    LeapSecond::new(709_948_800, 27),   // 1992-07-01
    LeapSecond::new(741_484_800, 28),   // 1993-07-01
    LeapSecond::new(773_020_800, 29),   // 1994-07-01
    LeapSecond::new(820_454_400, 30),   // 1996-01-01
    LeapSecond::new(867_715_200, 31),   // 1997-07-01
    LeapSecond::new(915_148_800, 32),   // 1999-01-01
    LeapSecond::new(1_136_073_600, 33), // 2006-01-01
    LeapSecond::new(1_230_768_000, 34), // 2009-01-01
    LeapSecond::new(1_341_100_800, 35), // 2012-07-01
    LeapSecond::new(1_435_708_800, 36), // 2015-07-01
    LeapSecond::new(1_483_228_800, 37), // 2017-01-01
];

static BUILTIN: LeapSecondTable = LeapSecondTable {
    entries: Cow::Borrowed(&LEAP_SECONDS),
};

/// Ordered, immutable set of leap-second entries.
///
/// Entries are strictly increasing by effective date; every constructor
/// enforces this, so lookups can binary-search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeapSecondTable {
    entries: Cow<'static, [LeapSecond]>,
}

impl LeapSecondTable {
    /// The compiled-in table ([`LEAP_SECONDS`]).
    #[inline]
    pub fn builtin() -> &'static LeapSecondTable {
        &BUILTIN
    }

    /// Build a table from caller-supplied entries.
    ///
    /// Fails with [`Error::UnorderedLeapTable`] unless the entries are
    /// strictly increasing by effective date. An empty table is valid and
    /// resolves every instant to 0.
    pub fn new(entries: Vec<LeapSecond>) -> Result<Self> {
        if let Some(index) = entries
            .windows(2)
            .position(|w| w[1].effective <= w[0].effective)
        {
            tracing::debug!(index = index + 1, "rejecting unordered leap-second table");
            return Err(Error::UnorderedLeapTable { index: index + 1 });
        }
        Ok(Self {
            entries: Cow::Owned(entries),
        })
    }

    /// Return a copy of this table with `entry` appended.
    ///
    /// The new entry must take effect strictly after the current latest one.
    pub fn with_entry(&self, entry: LeapSecond) -> Result<Self> {
        if let Some(last) = self.latest() {
            if entry.effective <= last.effective {
                tracing::debug!(
                    effective = entry.effective,
                    latest = last.effective,
                    "rejecting out-of-order leap-second entry"
                );
                return Err(Error::UnorderedLeapTable {
                    index: self.entries.len(),
                });
            }
        }
        let mut entries = self.entries.to_vec();
        entries.push(entry);
        Ok(Self {
            entries: Cow::Owned(entries),
        })
    }

    /// All entries, oldest first.
    #[inline]
    pub fn entries(&self) -> &[LeapSecond] {
        &self.entries
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry, if any.
    #[inline]
    pub fn latest(&self) -> Option<&LeapSecond> {
        self.entries.last()
    }

    /// Cumulative offset (seconds) in effect at the given UTC instant.
    #[inline]
    pub fn offset_at(&self, instant: DateTime<Utc>) -> i64 {
        self.offset_at_timestamp(instant.timestamp())
    }

    /// Cumulative offset (seconds) in effect at a Unix timestamp.
    ///
    /// Returns the offset of the last entry whose effective timestamp is
    /// `<= unix`, or 0 if `unix` predates every entry.
    pub fn offset_at_timestamp(&self, unix: i64) -> i64 {
        match self.entries_until(unix) {
            0 => 0,
            n => self.entries[n - 1].offset,
        }
    }

    /// `true` if a transition lies in `(unix - offset, unix]`, where `offset`
    /// is the offset in effect at `unix`.
    ///
    /// For a provisional instant this means the offset resolved there differs
    /// from the one in effect at the corrected instant.
    pub(crate) fn straddles_transition(&self, unix: i64) -> bool {
        let offset = self.offset_at_timestamp(unix);
        offset != self.offset_at_timestamp(unix.saturating_sub(offset))
    }

    /// Number of entries with an effective timestamp `<= unix`.
    fn entries_until(&self, unix: i64) -> usize {
        // Binary search for the last entry <= unix
        let mut lo = 0usize;
        let mut hi = self.entries.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.entries[mid].effective <= unix {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

impl Default for LeapSecondTable {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

/// Cumulative leap-second offset at `instant` according to the built-in table.
#[inline]
pub fn offset_at(instant: DateTime<Utc>) -> i64 {
    LeapSecondTable::builtin().offset_at(instant)
}
