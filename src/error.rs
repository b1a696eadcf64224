// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error taxonomy.
//!
//! Only two things in this crate can fail: turning user text into a date
//! ([`ParseError`]) and accepting dataset configuration
//! ([`ConfigurationError`]). Truncation, offsetting, clamping and frame
//! mapping are total and normalise out-of-range input instead.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::precision::Precision;

pub type ChronoframeResult<T> = Result<T, ChronoframeError>;

/// A typed date string could not be read at the requested precision.
///
/// Recovered locally by the text-input collaborator, which reverts to the
/// last valid display value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty date string")]
    Empty,

    #[error("no year found in {input:?}")]
    MissingYear { input: String },

    #[error("{input:?} is not a valid date at precision {precision}")]
    Pattern {
        input: String,
        precision: Precision,
        #[source]
        source: chrono::format::ParseError,
    },
}

/// Dataset configuration handed to the engine is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unknown resolution {0:?}")]
    UnknownResolution(String),

    #[error("precision level {0} is out of range (0..=6)")]
    PrecisionOutOfRange(u8),

    #[error("timespan starts at {start} after it ends at {end}")]
    InvertedPeriod {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChronoframeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
