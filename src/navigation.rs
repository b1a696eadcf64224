// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Temporal navigation state.
//!
//! [`NavigationState`] is the single source of truth for which date and
//! which range are currently shown. Every write goes through a setter that
//! truncates and clamps, so the state is always legal:
//!
//! - the displayed date lies inside the committed range,
//! - the committed range lies inside the timespan's period,
//! - every stored date is a [`PreciseDate`] at the timespan's precision.
//!
//! Out-of-range input is normalised rather than rejected. The one fallible
//! entry point is [`NavigationState::commit_text`], because text typed into
//! a field can be malformed and the widget has to revert it.

use std::fmt;

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::frame::{date_from_frame_index, frame_index_of};
use crate::instant::{PreciseDate, TimeInstant};
use crate::period::{Interval, Timespan};
use crate::precise::{format_at_precision, offset_at_precision, parse_at_precision};
use crate::precision::Precision;

/// Change notification delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationChange {
    DisplayedDate(PreciseDate),
    CommittedRange(Interval<PreciseDate>),
    LiveRange(Interval<PreciseDate>),
}

/// Receives [`NavigationChange`]s, e.g. to refresh a map layer or a slider.
///
/// Closures taking a `NavigationChange` implement this trait.
pub trait NavigationObserver {
    fn on_change(&mut self, change: NavigationChange);
}

impl<F: FnMut(NavigationChange)> NavigationObserver for F {
    fn on_change(&mut self, change: NavigationChange) {
        self(change)
    }
}

pub struct NavigationState {
    timespan: Timespan,
    displayed: PreciseDate,
    committed: Interval<PreciseDate>,
    live: Interval<PreciseDate>,
    observers: Vec<Box<dyn NavigationObserver>>,
}

impl NavigationState {
    /// Shows the whole timespan with the displayed date at its start.
    pub fn new(timespan: Timespan) -> Self {
        let period = timespan.period();
        Self {
            timespan,
            displayed: period.start,
            committed: period,
            live: period,
            observers: Vec::new(),
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub fn timespan(&self) -> &Timespan {
        &self.timespan
    }

    #[inline]
    pub fn precision(&self) -> Precision {
        self.timespan.precision()
    }

    #[inline]
    pub fn displayed_date(&self) -> PreciseDate {
        self.displayed
    }

    #[inline]
    pub fn committed_range(&self) -> Interval<PreciseDate> {
        self.committed
    }

    #[inline]
    pub fn live_range(&self) -> Interval<PreciseDate> {
        self.live
    }

    /// Slider position of the displayed date.
    pub fn frame_index(&self) -> i64 {
        frame_index_of(self.displayed, &self.timespan)
    }

    /// Text-field rendering of the displayed date.
    pub fn formatted_date(&self) -> String {
        format_at_precision(Some(self.displayed), self.precision())
    }

    /// Whether the displayed date sits on the committed range's upper bound.
    pub fn at_end(&self) -> bool {
        self.displayed == self.committed.end
    }

    // ── observers ─────────────────────────────────────────────────────

    pub fn subscribe(&mut self, observer: Box<dyn NavigationObserver>) {
        self.observers.push(observer);
    }

    fn notify(&mut self, change: NavigationChange) {
        for observer in &mut self.observers {
            observer.on_change(change);
        }
    }

    // ── setters ───────────────────────────────────────────────────────

    /// Truncates `date`, clamps it into the committed range and stores it.
    ///
    /// Returns whether the displayed date changed; observers are only
    /// notified when it did.
    pub fn set_displayed_date<T: TimeInstant>(&mut self, date: T) -> bool {
        let date = self.committed.clamp(self.timespan.truncate(date));
        if date == self.displayed {
            return false;
        }
        debug!(displayed = %date, "displayed date changed");
        self.displayed = date;
        self.notify(NavigationChange::DisplayedDate(date));
        true
    }

    /// Truncates both ends, clamps them into the timespan's period and stores
    /// the result, re-clamping the displayed date in the same update.
    ///
    /// Ends given in the wrong order are swapped. The live range is reset to
    /// mirror the committed one.
    pub fn set_committed_range<T: TimeInstant>(&mut self, a: T, b: T) -> bool {
        let period = self.timespan.period();
        let range = Interval::ordered(
            period.clamp(self.timespan.truncate(a)),
            period.clamp(self.timespan.truncate(b)),
        );
        let displayed = range.clamp(self.displayed);

        let range_changed = range != self.committed;
        let displayed_changed = displayed != self.displayed;
        self.committed = range;
        self.live = range;
        self.displayed = displayed;

        if range_changed {
            debug!(start = %range.start, end = %range.end, "committed range changed");
            self.notify(NavigationChange::CommittedRange(range));
        }
        if displayed_changed {
            debug!(displayed = %displayed, "displayed date re-clamped into range");
            self.notify(NavigationChange::DisplayedDate(displayed));
        }
        range_changed || displayed_changed
    }

    /// Stores an in-progress drag value without validation.
    ///
    /// Neither the committed range nor the displayed date is touched until
    /// [`commit_live_range`](Self::commit_live_range).
    pub fn set_live_range(&mut self, a: PreciseDate, b: PreciseDate) {
        let range = Interval::new(a, b);
        if range == self.live {
            return;
        }
        trace!(start = %a, end = %b, "live range moved");
        self.live = range;
        self.notify(NavigationChange::LiveRange(range));
    }

    /// Ends a drag by committing the live range.
    pub fn commit_live_range(&mut self) -> bool {
        let Interval { start, end } = self.live;
        self.set_committed_range(start, end)
    }

    /// Parses text typed into the date field and displays it.
    ///
    /// On error nothing changes and the caller should restore
    /// [`formatted_date`](Self::formatted_date).
    pub fn commit_text(&mut self, text: &str) -> Result<bool, ParseError> {
        let date = parse_at_precision(text, self.precision())?;
        Ok(self.set_displayed_date(date))
    }

    /// Displays the date at slider position `index`.
    pub fn set_frame_index(&mut self, index: i64) -> bool {
        let date = date_from_frame_index(index, &self.timespan);
        self.set_displayed_date(date)
    }

    /// Moves the displayed date by `amount` units, clamped to the committed
    /// range.
    pub fn step(&mut self, amount: i64) -> bool {
        let date = offset_at_precision(self.displayed, self.precision(), amount);
        self.set_displayed_date(date)
    }

    /// Switches to another dataset's timespan, showing all of it.
    ///
    /// The displayed date is kept when the new period contains it. Observers
    /// only hear about the range or date if it actually changed.
    pub fn replace_timespan(&mut self, timespan: Timespan) -> bool {
        let committed = timespan.period();
        let displayed = committed.clamp(timespan.truncate(self.displayed));
        debug!(
            resolution = %timespan.resolution(),
            start = %timespan.start(),
            end = %timespan.end(),
            "timespan replaced"
        );

        let range_changed = committed != self.committed;
        let displayed_changed = displayed != self.displayed;
        self.timespan = timespan;
        self.committed = committed;
        self.live = committed;
        self.displayed = displayed;

        if range_changed {
            self.notify(NavigationChange::CommittedRange(committed));
        }
        if displayed_changed {
            self.notify(NavigationChange::DisplayedDate(displayed));
        }
        range_changed || displayed_changed
    }
}

impl fmt::Debug for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationState")
            .field("timespan", &self.timespan)
            .field("displayed", &self.displayed)
            .field("committed", &self.committed)
            .field("live", &self.live)
            .field("observers", &self.observers.len())
            .finish()
    }
}
