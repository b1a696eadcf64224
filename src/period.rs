// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Intervals and dataset timespans.
//!
//! This module provides:
//! - [`Interval<T>`]: closed interval over any [`TimeInstant`]
//! - [`Timespan`]: a dataset's resolution plus its bounding period

use std::fmt;

#[cfg(feature = "serde")]
use chrono::NaiveDateTime;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ChronoframeResult, ConfigurationError};
use crate::instant::{PreciseDate, TimeInstant};
use crate::precise::{clamp_within_range, parse_at_precision};
use crate::precision::{Precision, Resolution};

/// Represents the closed interval `[start, end]` between two instants.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use chronoframe::Interval;
///
/// let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2005, 1, 1).unwrap();
/// let range = Interval::new(start, end);
///
/// let probe = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
/// assert_eq!(range.clamp(probe), end);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval<T: TimeInstant> {
    pub start: T,
    pub end: T,
}

impl<T: TimeInstant> Interval<T> {
    /// Creates a new interval between two instants.
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// Creates an interval from two instants given in either order.
    pub fn ordered(a: T, b: T) -> Self {
        if a <= b {
            Interval::new(a, b)
        } else {
            Interval::new(b, a)
        }
    }

    /// Whether `instant` lies inside the interval, bounds included.
    pub fn contains(&self, instant: T) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Brings `instant` inside the interval.
    pub fn clamp(&self, instant: T) -> T {
        clamp_within_range(instant, self.start, self.end)
    }

    /// Truncates both ends at `precision`.
    pub fn truncate(&self, precision: Precision) -> Interval<PreciseDate> {
        Interval::new(
            PreciseDate::truncate(self.start, precision),
            PreciseDate::truncate(self.end, precision),
        )
    }
}

impl<T: TimeInstant + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Timespan
// ═══════════════════════════════════════════════════════════════════════════

/// A dataset's valid date range plus its [`Resolution`].
///
/// Both bounds are stored truncated at the resolution's precision, so frame
/// indices are counted from a canonical origin. A `Timespan` is immutable;
/// selecting another dataset builds a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TimespanConfig"))]
pub struct Timespan {
    resolution: Resolution,
    period: Interval<PreciseDate>,
}

impl Timespan {
    /// Builds a timespan, rejecting a period that ends before it starts.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use chronoframe::{Resolution, Timespan};
    ///
    /// let start = NaiveDate::from_ymd_opt(1000, 1, 1).unwrap();
    /// let end = NaiveDate::from_ymd_opt(1100, 1, 1).unwrap();
    /// let timespan = Timespan::new(Resolution::Year, start, end).unwrap();
    /// assert_eq!(timespan.frame_count(), 101);
    ///
    /// assert!(Timespan::new(Resolution::Year, end, start).is_err());
    /// ```
    pub fn new<T: TimeInstant>(
        resolution: Resolution,
        start: T,
        end: T,
    ) -> Result<Self, ConfigurationError> {
        if start > end {
            return Err(ConfigurationError::InvertedPeriod {
                start: start.to_naive(),
                end: end.to_naive(),
            });
        }
        let period = Interval::new(start, end).truncate(resolution.precision());
        Ok(Self { resolution, period })
    }

    /// Builds a timespan from dataset configuration strings.
    ///
    /// Bounds are read in the display layout of the resolution's precision.
    pub fn parse(resolution: &str, start: &str, end: &str) -> ChronoframeResult<Self> {
        let resolution: Resolution = resolution.parse()?;
        let precision = resolution.precision();
        let start = parse_at_precision(start, precision)?;
        let end = parse_at_precision(end, precision)?;
        Ok(Self::new(resolution, start, end)?)
    }

    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[inline]
    pub fn precision(&self) -> Precision {
        self.resolution.precision()
    }

    #[inline]
    pub fn period(&self) -> Interval<PreciseDate> {
        self.period
    }

    #[inline]
    pub fn start(&self) -> PreciseDate {
        self.period.start
    }

    #[inline]
    pub fn end(&self) -> PreciseDate {
        self.period.end
    }

    /// Truncates `date` at this timespan's precision.
    #[inline]
    pub fn truncate<T: TimeInstant>(&self, date: T) -> PreciseDate {
        PreciseDate::truncate(date, self.precision())
    }
}

/// Raw dataset configuration, validated into a [`Timespan`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct TimespanConfig {
    resolution: Resolution,
    period: Interval<NaiveDateTime>,
}

#[cfg(feature = "serde")]
impl TryFrom<TimespanConfig> for Timespan {
    type Error = ConfigurationError;

    fn try_from(config: TimespanConfig) -> Result<Self, Self::Error> {
        Timespan::new(config.resolution, config.period.start, config.period.end)
    }
}
