// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! TAI64 / TAI64N external time labels
//!
//! This crate converts between UTC instants and the fixed-width, monotonic
//! TAI64 and TAI64N labels, and serialises those labels to their packed
//! big-endian form and to the `'@'`-prefixed hexadecimal text form.
//!
//! # Core types
//!
//! - [`Tai64`] — 64-bit label of whole seconds, biased by [`BIAS`] = `2^62 + 10`.
//! - [`Tai64N`] — [`Tai64`] plus a normalised 32-bit nanosecond field.
//! - [`TaiLabel`] — trait implemented by both label widths.
//! - [`LeapSecondTable`] — ordered leap-second offsets, with the built-in
//!   table available through [`LeapSecondTable::builtin`] and [`offset_at`].
//! - [`Error`] — every failure mode (parse, length, range).
//!
//! # Formats
//!
//! | Type | Packed | Text |
//! |------|--------|------|
//! | [`Tai64`] | 8 bytes: `sec` (u64 BE) | `@` + 16 hex digits |
//! | [`Tai64N`] | 12 bytes: `sec` (u64 BE) ‖ `nano` (u32 BE) | `@` + 24 hex digits |
//!
//! Text is produced in upper case and parsed case-insensitively.
//!
//! # Arithmetic
//!
//! Label arithmetic wraps modulo 2^64 and is only available through the
//! explicitly named [`Tai64::wrapping_add`] / [`Tai64::wrapping_sub`] (and
//! their [`Tai64N`] counterparts); there are no `+`/`-` operators.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use taistamp::{Tai64, Tai64N};
//!
//! let label: Tai64 = "@40000000036db755".parse().unwrap();
//! let utc = label.to_utc().unwrap();
//! assert_eq!(utc, Utc.with_ymd_and_hms(1971, 10, 28, 18, 19, 55).unwrap());
//!
//! let start = Tai64N::now();
//! let later = start.wrapping_add(TimeDelta::milliseconds(1_500));
//! assert_eq!(later.wrapping_sub(start).unwrap(), TimeDelta::milliseconds(1_500));
//! ```
//!
//! # Features
//!
//! - `serde` — `Serialize`/`Deserialize` for both labels using their text form.

mod error;
pub(crate) mod label;
pub mod leap_seconds;
mod tai64;
mod tai64n;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use error::{Error, Result};
pub use label::TaiLabel;
pub use leap_seconds::{offset_at, LeapSecond, LeapSecondTable, LEAP_SECONDS};
pub use tai64::{Tai64, BIAS};
pub use tai64n::{Tai64N, NANOS_PER_SEC};
