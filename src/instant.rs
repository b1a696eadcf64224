// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Precision-truncated instants.
//!
//! [`PreciseDate`] is the only date type stored by the navigation state.
//! It wraps a `chrono::NaiveDateTime` whose fields finer than some
//! [`Precision`] have been reset to their canonical zero points, and can only
//! be built through truncation, so holding one is proof the invariant holds.
//!
//! Dates are naive: no time zone is attached and the proleptic Gregorian
//! calendar with astronomical year numbering is used throughout (year 0
//! exists, `-0050` is fifty years before it).

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

use crate::precision::{DateField, Precision};

const NANOS_PER_MILLI: u32 = 1_000_000;

// ═══════════════════════════════════════════════════════════════════════════
// TimeInstant trait
// ═══════════════════════════════════════════════════════════════════════════

/// Trait for types that represent a point in time.
///
/// Everything the engine accepts as input (raw `chrono` values or already
/// truncated [`PreciseDate`]s) goes through this trait, and it is the bound
/// on [`Interval`](crate::Interval) endpoints.
pub trait TimeInstant: Copy + Ord + Sized {
    /// The instant as a naive calendar date-time.
    fn to_naive(&self) -> NaiveDateTime;
}

impl TimeInstant for NaiveDateTime {
    #[inline]
    fn to_naive(&self) -> NaiveDateTime {
        *self
    }
}

impl TimeInstant for NaiveDate {
    #[inline]
    fn to_naive(&self) -> NaiveDateTime {
        self.and_time(chrono::NaiveTime::MIN)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PreciseDate
// ═══════════════════════════════════════════════════════════════════════════

/// A date truncated at a [`Precision`].
///
/// Ordering and equality are those of the underlying date-time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreciseDate(NaiveDateTime);

impl PreciseDate {
    /// Truncates `date` at `precision`.
    ///
    /// Every field strictly finer than `precision` is reset to its zero
    /// point; coarser fields are left untouched. At
    /// [`Precision::MILLISECOND`] only sub-millisecond nanoseconds are
    /// dropped.
    pub fn truncate<T: TimeInstant>(date: T, precision: Precision) -> Self {
        let date = date.to_naive();
        let keep = |field: DateField, value: u32| {
            if precision.keeps(field) {
                value
            } else {
                Precision::zero_point_of(field).unwrap_or(value)
            }
        };

        let month = keep(DateField::Month, date.month());
        let day = keep(DateField::Day, date.day());
        let hour = keep(DateField::Hour, date.hour());
        let minute = keep(DateField::Minute, date.minute());
        let second = keep(DateField::Second, date.second());
        let nanos = if precision.keeps(DateField::Millisecond) {
            date.nanosecond() - date.nanosecond() % NANOS_PER_MILLI
        } else {
            0
        };

        // Coarser fields come from a valid date and finer ones are zero
        // points, so the rebuilt value always exists.
        let truncated = NaiveDate::from_ymd_opt(date.year(), month, day)
            .and_then(|d| d.and_hms_nano_opt(hour, minute, second, nanos))
            .unwrap_or(date);
        Self(truncated)
    }

    /// The underlying naive date-time.
    #[inline]
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    #[inline]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    #[inline]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Renders this date with the display format of `precision`.
    pub fn format(&self, precision: Precision) -> String {
        crate::precise::format_at_precision(Some(*self), precision)
    }

    /// Whether truncating at `precision` leaves this date unchanged.
    pub fn is_precise_at(&self, precision: Precision) -> bool {
        Self::truncate(*self, precision) == *self
    }
}

impl TimeInstant for PreciseDate {
    #[inline]
    fn to_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<PreciseDate> for NaiveDateTime {
    #[inline]
    fn from(date: PreciseDate) -> Self {
        date.0
    }
}

impl fmt::Display for PreciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────
//
// Serialise-only: a bare date-time carries no precision, so deserialising
// straight into a PreciseDate could not re-establish the invariant.

#[cfg(feature = "serde")]
impl Serialize for PreciseDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}
