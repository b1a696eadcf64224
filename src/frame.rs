// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Frame-index mapping.
//!
//! A frame index is the signed number of whole resolution units between a
//! [`Timespan`]'s start and a date, rounded to the nearest integer with ties
//! going away from zero (`2.5 → 3`, `-2.5 → -3`).
//!
//! Fixed-length units (day and finer) are counted with exact integer
//! arithmetic on the nanosecond difference. Calendar units (year, month)
//! are counted by subtracting calendar fields; only the leftover part of a
//! unit is measured as a fraction of that unit's actual length. Neither path
//! divides a long elapsed time by an average unit length, so the mapping
//! does not drift over multi-century spans.

use chrono::{Datelike, NaiveDateTime, TimeDelta};

use crate::instant::{PreciseDate, TimeInstant};
use crate::period::Timespan;
use crate::precise::shift;
use crate::precision::Step;

const NANOS_PER_MILLI: i128 = 1_000_000;
const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Signed number of resolution units from `timespan`'s start to `date`.
///
/// ```
/// use chrono::NaiveDate;
/// use chronoframe::{frame_index_of, Resolution, Timespan};
///
/// let start = NaiveDate::from_ymd_opt(1000, 1, 1).unwrap();
/// let timespan = Timespan::new(Resolution::Year, start, start).unwrap();
/// let date = NaiveDate::from_ymd_opt(1042, 1, 1).unwrap();
/// assert_eq!(frame_index_of(date, &timespan), 42);
/// ```
pub fn frame_index_of<T: TimeInstant>(date: T, timespan: &Timespan) -> i64 {
    let origin = timespan.start().as_naive();
    let date = date.to_naive();
    match timespan.resolution().step() {
        Step::Millis(per_unit) => {
            round_half_away(total_nanos(date - origin), i128::from(per_unit) * NANOS_PER_MILLI)
        }
        Step::Months(per_unit) => calendar_index(origin, date, per_unit),
    }
}

/// Date `index` resolution units after `timespan`'s start.
///
/// The result is truncated at the timespan's precision, so unit arithmetic
/// that lands off the canonical grid is brought back onto it.
pub fn date_from_frame_index(index: i64, timespan: &Timespan) -> PreciseDate {
    let shifted = shift(
        timespan.start().as_naive(),
        timespan.resolution().step(),
        index,
    );
    timespan.truncate(shifted)
}

impl Timespan {
    /// Frame index of the period's end, which is also the highest slider
    /// position.
    pub fn last_frame_index(&self) -> i64 {
        frame_index_of(self.end(), self)
    }

    /// Number of frames in the period, both bounds included.
    pub fn frame_count(&self) -> u64 {
        self.last_frame_index().unsigned_abs().saturating_add(1)
    }
}

fn total_nanos(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * NANOS_PER_SECOND + i128::from(delta.subsec_nanos())
}

/// `numerator / denominator` rounded half away from zero; `denominator > 0`.
fn round_half_away(numerator: i128, denominator: i128) -> i64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    let rounded = if 2 * remainder.abs() >= denominator {
        quotient + numerator.signum()
    } else {
        quotient
    };
    saturate(rounded)
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

fn calendar_index(origin: NaiveDateTime, date: NaiveDateTime, months_per_unit: u32) -> i64 {
    let per_unit = i64::from(months_per_unit);
    let months = (i64::from(date.year()) - i64::from(origin.year())) * 12
        + i64::from(date.month())
        - i64::from(origin.month());
    let whole = months.div_euclid(per_unit);

    let step = Step::Months(months_per_unit);
    let anchor = shift(origin, step, whole);
    let remainder = total_nanos(date - anchor);
    // Measure the leftover against the unit it falls into.
    let unit = if remainder >= 0 {
        total_nanos(shift(anchor, step, 1) - anchor)
    } else {
        total_nanos(anchor - shift(anchor, step, -1))
    };
    let fraction = if unit > 0 {
        remainder as f64 / unit as f64
    } else {
        0.0
    };

    (whole as f64 + fraction).round() as i64
}
