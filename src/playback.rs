// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Animation playback.
//!
//! [`PlaybackController`] is a two-state machine (Idle / Playing) that
//! advances a [`NavigationState`] one unit per timer tick. The timer itself
//! belongs to the host event loop and is reached through the [`Scheduler`]
//! trait, which hands out explicit [`TimerHandle`]s:
//!
//! ```text
//!            start() / play()
//!   Idle ───────────────────────▶ Playing ──┐ on_tick(): advance one unit
//!    ▲                              │  ▲    │
//!    │  pause() / upper bound / drop│  └────┘
//!    └──────────────────────────────┘
//! ```
//!
//! The timer is acquired only in `start` and is released on every exit
//! path: `pause`, the automatic stop at the committed range's upper bound,
//! and dropping the controller.

use qtty::Seconds;
use tracing::debug;

use crate::navigation::NavigationState;
use crate::precise::offset_at_precision;

// ═══════════════════════════════════════════════════════════════════════════
// Scheduling
// ═══════════════════════════════════════════════════════════════════════════

/// Opaque identifier of a repeating timer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Repeating-timer primitive of the host event loop.
///
/// Implementations call back into [`PlaybackController::on_tick`] each time a
/// timer fires, never re-entrantly: a tick is fully handled before the next
/// one is delivered.
pub trait Scheduler {
    /// Arms a timer firing every `interval`.
    fn schedule_repeating(&mut self, interval: Seconds) -> TimerHandle;

    /// Disarms `handle`. Unknown or already cancelled handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone)]
struct ManualTimer {
    handle: TimerHandle,
    interval: Seconds,
    pending: Seconds,
}

/// Deterministic [`Scheduler`] driven by explicit [`advance`](Self::advance)
/// calls, for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next_id: u64,
    timers: Vec<ManualTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of armed timers.
    pub fn active(&self) -> usize {
        self.timers.len()
    }

    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|timer| timer.handle == handle)
    }

    /// Lets `elapsed` pass and returns the handles of the timers that fired,
    /// once per firing, in firing order.
    ///
    /// A timer with a non-positive interval fires once per call.
    pub fn advance(&mut self, elapsed: Seconds) -> Vec<TimerHandle> {
        let mut fired: Vec<(Seconds, TimerHandle)> = Vec::new();
        for timer in &mut self.timers {
            if timer.interval <= Seconds::new(0.0) {
                fired.push((Seconds::new(0.0), timer.handle));
                continue;
            }
            timer.pending += elapsed;
            let mut at = timer.interval - (timer.pending - elapsed);
            while timer.pending >= timer.interval {
                timer.pending -= timer.interval;
                fired.push((at, timer.handle));
                at += timer.interval;
            }
        }
        fired.sort_by(|a, b| a.0.value().total_cmp(&b.0.value()));
        fired.into_iter().map(|(_, handle)| handle).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, interval: Seconds) -> TimerHandle {
        let handle = TimerHandle::new(self.next_id);
        self.next_id += 1;
        self.timers.push(ManualTimer {
            handle,
            interval,
            pending: Seconds::new(0.0),
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|timer| timer.handle != handle);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Controller
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Delay between two frames.
    pub interval: Seconds,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            interval: Seconds::new(1.0),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing(TimerHandle),
}

/// What a timer tick did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The displayed date moved one unit forward.
    Advanced,
    /// The upper bound was reached and playback stopped.
    Stopped,
    /// The controller was idle.
    Ignored,
}

pub struct PlaybackController<S: Scheduler> {
    navigation: NavigationState,
    scheduler: S,
    config: PlaybackConfig,
    state: PlaybackState,
}

impl<S: Scheduler> PlaybackController<S> {
    pub fn new(navigation: NavigationState, scheduler: S) -> Self {
        Self::with_config(navigation, scheduler, PlaybackConfig::default())
    }

    pub fn with_config(navigation: NavigationState, scheduler: S, config: PlaybackConfig) -> Self {
        Self {
            navigation,
            scheduler,
            config,
            state: PlaybackState::Idle,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing(_))
    }

    #[inline]
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    #[inline]
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Mutable access for UI setters (slider drags, text commits).
    #[inline]
    pub fn navigation_mut(&mut self) -> &mut NavigationState {
        &mut self.navigation
    }

    #[inline]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // ── transitions ───────────────────────────────────────────────────

    /// Arms the frame timer. Does nothing while already playing.
    pub fn start(&mut self) {
        if self.is_playing() {
            return;
        }
        let handle = self.scheduler.schedule_repeating(self.config.interval);
        debug!(
            timer = handle.id(),
            displayed = %self.navigation.displayed_date(),
            "playback started"
        );
        self.state = PlaybackState::Playing(handle);
    }

    /// Play-button behaviour: rewinds first when already at the upper bound
    /// so that pressing play at the end is not a no-op.
    pub fn play(&mut self) {
        if !self.is_playing() && self.navigation.at_end() {
            self.skip_to_start();
        }
        self.start();
    }

    /// Cancels the frame timer. Idempotent.
    pub fn pause(&mut self) {
        if let PlaybackState::Playing(handle) = self.state {
            self.scheduler.cancel(handle);
            self.state = PlaybackState::Idle;
            debug!(
                timer = handle.id(),
                displayed = %self.navigation.displayed_date(),
                "playback paused"
            );
        }
    }

    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Handles one timer firing.
    ///
    /// Advances one unit when that stays within the committed range,
    /// otherwise stops playback; never wraps and never overshoots.
    pub fn on_tick(&mut self) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome::Ignored;
        }
        let current = self.navigation.displayed_date();
        let next = offset_at_precision(current, self.navigation.precision(), 1);
        if next > current && next <= self.navigation.committed_range().end {
            self.navigation.set_displayed_date(next);
            TickOutcome::Advanced
        } else {
            debug!(displayed = %current, "playback reached upper bound");
            self.pause();
            TickOutcome::Stopped
        }
    }

    pub fn skip_to_start(&mut self) -> bool {
        let start = self.navigation.committed_range().start;
        self.navigation.set_displayed_date(start)
    }

    pub fn skip_to_end(&mut self) -> bool {
        let end = self.navigation.committed_range().end;
        self.navigation.set_displayed_date(end)
    }

    /// Moves `frames` units forward, clamped to the committed range.
    pub fn step_forward(&mut self, frames: u32) -> bool {
        self.navigation.step(i64::from(frames))
    }

    /// Moves `frames` units backward, clamped to the committed range.
    pub fn step_backward(&mut self, frames: u32) -> bool {
        self.navigation.step(-i64::from(frames))
    }
}

impl PlaybackController<ManualScheduler> {
    /// Lets `elapsed` pass on the manual clock and delivers every tick that
    /// fell due for this controller's timer.
    pub fn advance(&mut self, elapsed: Seconds) -> Vec<TickOutcome> {
        let fired = self.scheduler.advance(elapsed);
        let mut outcomes = Vec::with_capacity(fired.len());
        for handle in fired {
            // Ticks queued behind an automatic stop belong to a cancelled
            // timer.
            if self.state == PlaybackState::Playing(handle) {
                outcomes.push(self.on_tick());
            }
        }
        outcomes
    }
}

impl<S: Scheduler> Drop for PlaybackController<S> {
    fn drop(&mut self) {
        self.pause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::Timespan;
    use crate::precision::Resolution;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn year(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    /// Controller over 1990..=2010 with the committed range set to
    /// `[2000, 2005]` and the displayed date at `displayed`.
    fn controller(displayed: i32) -> PlaybackController<ManualScheduler> {
        let timespan = Timespan::new(Resolution::Year, year(1990), year(2010)).unwrap();
        let mut navigation = NavigationState::new(timespan);
        navigation.set_committed_range(year(2000), year(2005));
        navigation.set_displayed_date(year(displayed));
        PlaybackController::new(navigation, ManualScheduler::new())
    }

    fn displayed_year<S: Scheduler>(controller: &PlaybackController<S>) -> i32 {
        controller.navigation().displayed_date().year()
    }

    #[test]
    fn tick_advances_one_unit() {
        let mut playback = controller(2000);
        playback.start();
        assert!(playback.is_playing());

        assert_eq!(playback.on_tick(), TickOutcome::Advanced);
        assert_eq!(displayed_year(&playback), 2001);
        assert!(playback.is_playing());
    }

    #[test]
    fn tick_at_upper_bound_stops_without_overshoot() {
        let mut playback = controller(2005);
        playback.start();
        let PlaybackState::Playing(handle) = playback.state() else {
            panic!("expected playing");
        };

        assert_eq!(playback.on_tick(), TickOutcome::Stopped);
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert_eq!(displayed_year(&playback), 2005);
        assert!(!playback.scheduler().is_armed(handle));
    }

    #[test]
    fn play_at_end_rewinds_first() {
        let mut playback = controller(2005);
        playback.play();
        assert!(playback.is_playing());
        assert_eq!(displayed_year(&playback), 2000);
        assert_eq!(playback.on_tick(), TickOutcome::Advanced);
        assert_eq!(displayed_year(&playback), 2001);
    }

    #[test]
    fn start_twice_arms_one_timer() {
        let mut playback = controller(2000);
        playback.start();
        playback.start();
        assert_eq!(playback.scheduler().active(), 1);
    }

    #[test]
    fn pause_is_idempotent() {
        let mut playback = controller(2000);
        playback.pause();
        assert_eq!(playback.state(), PlaybackState::Idle);

        playback.start();
        playback.pause();
        playback.pause();
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert_eq!(playback.scheduler().active(), 0);
        assert_eq!(playback.on_tick(), TickOutcome::Ignored);
    }

    #[test]
    fn toggle_switches_state() {
        let mut playback = controller(2002);
        playback.toggle();
        assert!(playback.is_playing());
        playback.toggle();
        assert!(!playback.is_playing());
    }

    #[test]
    fn advance_plays_through_and_stops() {
        let mut playback = controller(2000);
        playback.start();

        let outcomes = playback.advance(Seconds::new(2.5));
        assert_eq!(outcomes, vec![TickOutcome::Advanced, TickOutcome::Advanced]);
        assert_eq!(displayed_year(&playback), 2002);

        let outcomes = playback.advance(Seconds::new(10.0));
        assert_eq!(
            outcomes,
            vec![
                TickOutcome::Advanced,
                TickOutcome::Advanced,
                TickOutcome::Advanced,
                TickOutcome::Stopped,
            ]
        );
        assert_eq!(displayed_year(&playback), 2005);
        assert!(!playback.is_playing());
        assert_eq!(playback.scheduler().active(), 0);
    }

    #[test]
    fn custom_interval() {
        let timespan = Timespan::new(Resolution::Year, year(2000), year(2010)).unwrap();
        let config = PlaybackConfig {
            interval: Seconds::new(0.25),
        };
        let mut playback =
            PlaybackController::with_config(NavigationState::new(timespan), ManualScheduler::new(), config);
        playback.start();
        assert_eq!(playback.advance(Seconds::new(1.0)).len(), 4);
        assert_eq!(displayed_year(&playback), 2004);
    }

    #[test]
    fn skips_and_steps_work_in_either_state() {
        let mut playback = controller(2002);
        assert!(playback.skip_to_end());
        assert_eq!(displayed_year(&playback), 2005);
        assert!(!playback.is_playing());

        playback.start();
        assert!(playback.skip_to_start());
        assert_eq!(displayed_year(&playback), 2000);
        assert!(playback.is_playing());

        assert!(playback.step_forward(2));
        assert_eq!(displayed_year(&playback), 2002);
        assert!(playback.step_backward(10));
        assert_eq!(displayed_year(&playback), 2000);
        assert!(!playback.step_backward(1));
    }

    #[derive(Default)]
    struct Recording {
        armed: Vec<TimerHandle>,
        cancelled: Vec<TimerHandle>,
    }

    #[derive(Clone, Default)]
    struct SharedScheduler(Rc<RefCell<Recording>>);

    impl Scheduler for SharedScheduler {
        fn schedule_repeating(&mut self, _interval: Seconds) -> TimerHandle {
            let mut log = self.0.borrow_mut();
            let handle = TimerHandle::new(log.armed.len() as u64);
            log.armed.push(handle);
            handle
        }

        fn cancel(&mut self, handle: TimerHandle) {
            self.0.borrow_mut().cancelled.push(handle);
        }
    }

    #[test]
    fn drop_cancels_the_timer() {
        let scheduler = SharedScheduler::default();
        let log = Rc::clone(&scheduler.0);
        {
            let timespan = Timespan::new(Resolution::Year, year(2000), year(2010)).unwrap();
            let mut playback = PlaybackController::new(NavigationState::new(timespan), scheduler);
            playback.start();
        }
        let log = log.borrow();
        assert_eq!(log.armed, vec![TimerHandle::new(0)]);
        assert_eq!(log.cancelled, vec![TimerHandle::new(0)]);
    }

    #[test]
    fn drop_while_idle_cancels_nothing() {
        let scheduler = SharedScheduler::default();
        let log = Rc::clone(&scheduler.0);
        drop(PlaybackController::new(
            NavigationState::new(Timespan::new(Resolution::Day, year(2000), year(2001)).unwrap()),
            scheduler,
        ));
        assert!(log.borrow().cancelled.is_empty());
    }

    #[test]
    fn manual_scheduler_orders_firings() {
        let mut scheduler = ManualScheduler::new();
        let fast = scheduler.schedule_repeating(Seconds::new(1.0));
        let slow = scheduler.schedule_repeating(Seconds::new(1.5));
        let fired = scheduler.advance(Seconds::new(3.0));
        assert_eq!(fired, vec![fast, slow, fast, fast, slow]);

        scheduler.cancel(fast);
        scheduler.cancel(fast);
        assert_eq!(scheduler.active(), 1);
        assert!(scheduler.is_armed(slow));
    }
}
