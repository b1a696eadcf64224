// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Temporal precision, frame indexing and playback control.
//!
//! This crate lets a UI scrub, step or auto-play through a dataset's discrete
//! time series while a displayed date, a range slider and a text field stay
//! consistent. It reconciles three views of time: a calendar date, an integer
//! frame index counted in dataset units, and text at the dataset's precision.
//!
//! # Core types
//!
//! - [`Resolution`]: named dataset granularity (`year` ... `millisecond`).
//! - [`Precision`]: integer level 0–6 selecting truncation and format rules.
//! - [`PreciseDate`]: a date truncated at a precision.
//! - [`Interval<T>`]: a closed interval over any [`TimeInstant`].
//! - [`Timespan`]: a dataset's resolution plus its bounding period.
//! - [`NavigationState`]: the displayed date, committed range and live
//!   (in-drag) range, kept legal by its setters.
//! - [`PlaybackController`]: Idle/Playing state machine advancing the
//!   navigation state on each tick of a [`Scheduler`] timer.
//!
//! # Free functions
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`truncate_at_precision`] | reset fields finer than a precision |
//! | [`format_at_precision`] | render at a precision's display format |
//! | [`parse_at_precision`] | inverse of formatting, signed years allowed |
//! | [`offset_at_precision`] | move by whole units |
//! | [`clamp_within_range`] | bring a date inside `[min, max]` |
//! | [`frame_index_of`] | date → frame index |
//! | [`date_from_frame_index`] | frame index → date |
//!
//! # Example
//!
//! ```
//! use chronoframe::{ManualScheduler, NavigationState, PlaybackController, Timespan};
//! use qtty::Seconds;
//!
//! let timespan = Timespan::parse("year", "2000", "2005").unwrap();
//! let mut playback = PlaybackController::new(NavigationState::new(timespan), ManualScheduler::new());
//!
//! playback.play();
//! playback.advance(Seconds::new(3.0));
//! assert_eq!(playback.navigation().formatted_date(), "2003");
//! assert_eq!(playback.navigation().frame_index(), 3);
//! ```

mod error;
mod frame;
pub(crate) mod instant;
mod navigation;
mod period;
mod playback;
mod precise;
pub(crate) mod precision;
pub mod telemetry;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use error::{ChronoframeError, ChronoframeResult, ConfigurationError, ParseError};
pub use frame::{date_from_frame_index, frame_index_of};
pub use instant::{PreciseDate, TimeInstant};
pub use navigation::{NavigationChange, NavigationObserver, NavigationState};
pub use period::{Interval, Timespan};
pub use playback::{
    ManualScheduler, PlaybackConfig, PlaybackController, PlaybackState, Scheduler, TickOutcome,
    TimerHandle,
};
pub use precise::{
    clamp_within_range, format_at_precision, offset_at_precision, parse_at_precision,
    truncate_at_precision,
};
pub use precision::{DateField, Precision, Resolution, Step};
