// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Precision table.
//!
//! Static mapping between dataset [`Resolution`]s and integer [`Precision`]
//! levels, plus the per-level zero points and display formats.
//!
//! | Resolution | Precision | Zeroed field | Display format |
//! |------------|-----------|--------------|----------------|
//! | `year` | 0 | — | `%Y` |
//! | `month` | 1 | month → 1 | `%Y-%m` |
//! | `day` | 2 | day → 1 | `%Y-%m-%d` |
//! | `hour` | 3 | hour → 0 | `%Y-%m-%dT%H` |
//! | `minute` | 4 | minute → 0 | `%Y-%m-%dT%H:%M` |
//! | `second` | 5 | second → 0 | `%Y-%m-%dT%H:%M:%S` |
//! | `millisecond` | 5 | millisecond → 0 | `%Y-%m-%dT%H:%M:%S%.3f` (level 6) |
//!
//! `second` and `millisecond` share precision 5. Level 6 stays in the table
//! and is reachable through [`Precision::new`], but no resolution maps to
//! it, so millisecond datasets display and truncate at whole seconds.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Named time granularity attached to a dataset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Resolution {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

/// Length of one resolution unit.
///
/// Calendar units have no fixed length and are applied with month
/// arithmetic; every other unit is an exact number of milliseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    Months(u32),
    Millis(i64),
}

impl Resolution {
    pub const ALL: [Resolution; 7] = [
        Resolution::Year,
        Resolution::Month,
        Resolution::Day,
        Resolution::Hour,
        Resolution::Minute,
        Resolution::Second,
        Resolution::Millisecond,
    ];

    /// Precision level used to truncate and format dates of this resolution.
    #[inline]
    pub const fn precision(self) -> Precision {
        match self {
            Resolution::Year => Precision::YEAR,
            Resolution::Month => Precision::MONTH,
            Resolution::Day => Precision::DAY,
            Resolution::Hour => Precision::HOUR,
            Resolution::Minute => Precision::MINUTE,
            // Both collapse onto whole seconds.
            Resolution::Second | Resolution::Millisecond => Precision::SECOND,
        }
    }

    #[inline]
    pub const fn step(self) -> Step {
        match self {
            Resolution::Year => Step::Months(12),
            Resolution::Month => Step::Months(1),
            Resolution::Day => Step::Millis(MILLIS_PER_DAY),
            Resolution::Hour => Step::Millis(MILLIS_PER_HOUR),
            Resolution::Minute => Step::Millis(MILLIS_PER_MINUTE),
            Resolution::Second => Step::Millis(MILLIS_PER_SECOND),
            Resolution::Millisecond => Step::Millis(1),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Resolution::Year => "year",
            Resolution::Month => "month",
            Resolution::Day => "day",
            Resolution::Hour => "hour",
            Resolution::Minute => "minute",
            Resolution::Second => "second",
            Resolution::Millisecond => "millisecond",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resolution::ALL
            .into_iter()
            .find(|resolution| resolution.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownResolution(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Date fields
// ---------------------------------------------------------------------------

/// Calendar fields of a date, coarsest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl DateField {
    pub const ALL: [DateField; 7] = [
        DateField::Year,
        DateField::Month,
        DateField::Day,
        DateField::Hour,
        DateField::Minute,
        DateField::Second,
        DateField::Millisecond,
    ];

    /// Precision level at which this field is the finest one kept.
    #[inline]
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Canonical value the field is reset to when truncated away.
    ///
    /// The year is never truncated and has no zero point.
    #[inline]
    pub const fn zero_point(self) -> Option<u32> {
        match self {
            DateField::Year => None,
            DateField::Month | DateField::Day => Some(1),
            DateField::Hour | DateField::Minute | DateField::Second | DateField::Millisecond => {
                Some(0)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Precision
// ---------------------------------------------------------------------------

/// Integer precision level, 0 (year) through 6 (millisecond).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Precision(u8);

impl Precision {
    pub const YEAR: Self = Self(0);
    pub const MONTH: Self = Self(1);
    pub const DAY: Self = Self(2);
    pub const HOUR: Self = Self(3);
    pub const MINUTE: Self = Self(4);
    pub const SECOND: Self = Self(5);
    pub const MILLISECOND: Self = Self(6);

    pub const MIN: Self = Self::YEAR;
    pub const MAX: Self = Self::MILLISECOND;

    pub const fn new(level: u8) -> Result<Self, ConfigurationError> {
        if level <= Self::MAX.0 {
            Ok(Self(level))
        } else {
            Err(ConfigurationError::PrecisionOutOfRange(level))
        }
    }

    #[inline]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Iterates every level from coarsest to finest.
    pub fn all() -> impl Iterator<Item = Precision> {
        (Self::MIN.0..=Self::MAX.0).map(Precision)
    }

    /// The finest field this precision keeps.
    #[inline]
    pub const fn field(self) -> DateField {
        DateField::ALL[self.0 as usize]
    }

    /// Whether `field` survives truncation at this precision.
    #[inline]
    pub const fn keeps(self, field: DateField) -> bool {
        field.level() <= self.0
    }

    /// Canonical value `field` is reset to when a precision truncates it
    /// away; `None` for the year, which is never reset.
    #[inline]
    pub const fn zero_point_of(field: DateField) -> Option<u32> {
        field.zero_point()
    }

    /// strftime template used to render a date at this precision.
    pub const fn display_format(self) -> &'static str {
        match self.0 {
            0 => "%Y",
            1 => "%Y-%m",
            2 => "%Y-%m-%d",
            3 => "%Y-%m-%dT%H",
            4 => "%Y-%m-%dT%H:%M",
            5 => "%Y-%m-%dT%H:%M:%S",
            _ => "%Y-%m-%dT%H:%M:%S%.3f",
        }
    }

    /// Text appended to a parsed string to fill in the fields this
    /// precision discards, in the layout of [`Precision::MAX`]'s format.
    pub(crate) const fn parse_suffix(self) -> &'static str {
        match self.0 {
            0 => "-01-01T00:00:00.000",
            1 => "-01T00:00:00.000",
            2 => "T00:00:00.000",
            3 => ":00:00.000",
            4 => ":00.000",
            5 => ".000",
            _ => "",
        }
    }

    /// Unit a date moves by when offset at this precision.
    pub const fn unit(self) -> Resolution {
        match self.0 {
            0 => Resolution::Year,
            1 => Resolution::Month,
            2 => Resolution::Day,
            3 => Resolution::Hour,
            4 => Resolution::Minute,
            5 => Resolution::Second,
            _ => Resolution::Millisecond,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Precision {
    type Error = ConfigurationError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Precision::new(level)
    }
}

impl From<Precision> for u8 {
    fn from(precision: Precision) -> Self {
        precision.0
    }
}

impl From<Resolution> for Precision {
    fn from(resolution: Resolution) -> Self {
        resolution.precision()
    }
}
