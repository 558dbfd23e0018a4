//! Timer engine implementation.
//!
//! The timer engine is a monotonic-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! periodically (every [`TICK_INTERVAL`]) while the timer runs.
//!
//! ## State Transitions
//!
//! ```text
//! Paused -> (start) -> Running -> (pause | completion) -> Paused
//! ```
//!
//! `seek` is a self-loop that preserves the running flag; `reset` lands in
//! Paused with zero elapsed. There is no terminal state - the engine is
//! reusable indefinitely via `reset()`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.set_total_seconds(sequence.total_seconds());
//! engine.start();
//! loop {
//!     std::thread::sleep(TICK_INTERVAL);
//!     if let Some(event) = engine.tick() {
//!         if event.is_finished() { break; }
//!     }
//! }
//! ```

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, MonotonicClock};
use crate::events::Event;

/// Cadence at which drivers should call [`TimerEngine::tick`] while running.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Immutable snapshot of the engine, carried by every [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub running: bool,
    pub elapsed_s: f64,
    pub total_s: f64,
}

/// Core timer engine.
///
/// Counts elapsed seconds against a configurable total. All numeric inputs
/// are clamped, never rejected - every operation is total over its domain.
/// Not safe for concurrent mutation; drive it from one controlling thread.
#[derive(Debug)]
pub struct TimerEngine {
    clock: Arc<dyn Clock>,
    running: bool,
    /// Accumulated elapsed seconds while not running, or the value frozen at
    /// the last pause.
    elapsed_before: f64,
    /// Clock reading at the last start or seek-while-running.
    t0: Duration,
    total_s: f64,
    subscribers: Vec<Sender<Event>>,
}

impl TimerEngine {
    /// Create an engine on the system monotonic clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(MonotonicClock::new()))
    }

    /// Create an engine on an injected clock (deterministic tests).
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            running: false,
            elapsed_before: 0.0,
            t0: Duration::ZERO,
            total_s: 0.0,
            subscribers: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_s
    }

    /// Seconds of timer progress since the last reset.
    pub fn elapsed_seconds(&self) -> f64 {
        if self.running {
            self.elapsed_before + (self.clock.now().saturating_sub(self.t0)).as_secs_f64()
        } else {
            self.elapsed_before
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> TimerState {
        TimerState {
            running: self.running,
            elapsed_s: self.elapsed_seconds(),
            total_s: self.total_s,
        }
    }

    // ── Subscription ─────────────────────────────────────────────────

    /// Register an observer. Every emitted event is cloned into each live
    /// receiver; disconnected receivers are pruned on the next emission.
    pub fn subscribe(&mut self) -> Receiver<Event> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set the total duration, clamped to `>= 0`. Elapsed time is untouched.
    pub fn set_total_seconds(&mut self, total: f64) -> Event {
        self.total_s = if total.is_finite() { total.max(0.0) } else { 0.0 };
        self.emit(|state, at| Event::TotalChanged { state, at })
    }

    /// Begin (or resume) running. No-op if already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        Some(self.do_start())
    }

    /// Freeze elapsed time and stop. No-op if not running.
    ///
    /// This is the only point where the live elapsed value is folded into
    /// `elapsed_before`; pausing twice must not re-add `now() - t0`.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        Some(self.do_pause())
    }

    /// Pause if running, start otherwise.
    pub fn toggle(&mut self) -> Event {
        if self.running {
            self.do_pause()
        } else {
            self.do_start()
        }
    }

    /// Stop and return elapsed time to zero. The total is untouched.
    pub fn reset(&mut self) -> Event {
        self.running = false;
        self.elapsed_before = 0.0;
        self.emit(|state, at| Event::Reset { state, at })
    }

    /// Jump to `target` seconds, clamped into `[0, total]`.
    ///
    /// While running this rebases the live computation, so `elapsed_seconds`
    /// immediately reflects the target and keeps advancing from it.
    pub fn seek(&mut self, target: f64) -> Event {
        let target = if target.is_finite() { target } else { 0.0 };
        self.elapsed_before = target.clamp(0.0, self.total_s);
        if self.running {
            self.t0 = self.clock.now();
        }
        self.emit(|state, at| Event::Sought { state, at })
    }

    /// Call at [`TICK_INTERVAL`] while running. Emits a `Tick` snapshot, or
    /// on completion a final `Tick` followed by a one-shot `Finished` (which
    /// is also returned). No-op when not running.
    ///
    /// The observed elapsed at the completion tick can overshoot the total
    /// by up to one tick interval; the value is clamped before anything is
    /// emitted and the post-clamp value is authoritative.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        if self.total_s > 0.0 && self.elapsed_seconds() >= self.total_s {
            self.elapsed_before = self.total_s;
            self.running = false;
            self.emit(|state, at| Event::Tick { state, at });
            return Some(self.emit(|state, at| Event::Finished { state, at }));
        }
        Some(self.emit(|state, at| Event::Tick { state, at }))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn do_start(&mut self) -> Event {
        self.running = true;
        self.t0 = self.clock.now();
        self.emit(|state, at| Event::Started { state, at })
    }

    fn do_pause(&mut self) -> Event {
        self.elapsed_before = self.elapsed_seconds();
        self.running = false;
        self.emit(|state, at| Event::Paused { state, at })
    }

    /// Build an event from the current snapshot, fan it out to subscribers
    /// and return it. Exactly one emission per mutating operation.
    fn emit(&mut self, make: impl FnOnce(TimerState, DateTime<Utc>) -> Event) -> Event {
        let event = make(self.state(), Utc::now());
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        event
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::timer::{navigator, Segment, SegmentSequence};

    fn manual_engine() -> (Arc<ManualClock>, TimerEngine) {
        let clock = Arc::new(ManualClock::new());
        let engine = TimerEngine::with_clock(clock.clone());
        (clock, engine)
    }

    /// Drive ticks until the engine stops or `limit` seconds have passed.
    fn run_to_completion(clock: &ManualClock, engine: &mut TimerEngine, limit: f64) -> Vec<Event> {
        let mut events = Vec::new();
        let mut spent = 0.0;
        while engine.is_running() && spent < limit {
            clock.advance(TICK_INTERVAL);
            spent += TICK_INTERVAL.as_secs_f64();
            if let Some(event) = engine.tick() {
                events.push(event);
            }
        }
        events
    }

    #[test]
    fn negative_total_clamps_to_zero() {
        let (_, mut engine) = manual_engine();
        engine.set_total_seconds(-50.0);
        assert_eq!(engine.total_seconds(), 0.0);
    }

    #[test]
    fn seek_clamps_into_range() {
        let (_, mut engine) = manual_engine();
        engine.set_total_seconds(100.0);

        engine.seek(150.0);
        assert_eq!(engine.elapsed_seconds(), 100.0);

        engine.seek(-10.0);
        assert_eq!(engine.elapsed_seconds(), 0.0);
    }

    #[test]
    fn seek_while_running_rebases_and_keeps_running() {
        let (clock, mut engine) = manual_engine();
        engine.set_total_seconds(100.0);
        engine.start();
        clock.advance_secs(5.0);

        engine.seek(50.0);
        assert!(engine.is_running());
        assert_eq!(engine.elapsed_seconds(), 50.0);

        clock.advance_secs(2.0);
        assert_eq!(engine.elapsed_seconds(), 52.0);
    }

    #[test]
    fn pause_freezes_elapsed_and_resume_continues() {
        let (clock, mut engine) = manual_engine();
        engine.set_total_seconds(100.0);
        engine.start();
        clock.advance_secs(3.0);

        engine.pause();
        let frozen = engine.elapsed_seconds();
        assert_eq!(frozen, 3.0);

        // Waiting while paused changes nothing.
        clock.advance_secs(10.0);
        assert_eq!(engine.elapsed_seconds(), frozen);

        // Pausing again must not re-add now() - t0.
        assert!(engine.pause().is_none());
        assert_eq!(engine.elapsed_seconds(), frozen);

        engine.start();
        clock.advance_secs(4.0);
        assert_eq!(engine.elapsed_seconds(), 7.0);
    }

    #[test]
    fn toggle_flips_running() {
        let (_, mut engine) = manual_engine();
        engine.set_total_seconds(60.0);
        engine.toggle();
        assert!(engine.is_running());
        engine.toggle();
        assert!(!engine.is_running());
    }

    #[test]
    fn set_total_does_not_alter_elapsed() {
        let (_, mut engine) = manual_engine();
        engine.set_total_seconds(100.0);
        engine.seek(40.0);
        engine.set_total_seconds(200.0);
        assert_eq!(engine.elapsed_seconds(), 40.0);
    }

    #[test]
    fn completion_clamps_stops_and_fires_finished_once() {
        let (clock, mut engine) = manual_engine();
        engine.set_total_seconds(10.0);
        engine.start();

        let events = run_to_completion(&clock, &mut engine, 60.0);
        let finished: Vec<_> = events.iter().filter(|e| e.is_finished()).collect();
        assert_eq!(finished.len(), 1);
        assert!(!engine.is_running());
        assert_eq!(engine.elapsed_seconds(), 10.0);

        // The tick overshoots the total by a sub-tick amount, but the
        // emitted snapshots are post-clamp.
        assert_eq!(finished[0].state().elapsed_s, 10.0);
        assert!(!finished[0].state().running);

        // Once stopped, further ticks are no-ops.
        clock.advance_secs(5.0);
        assert!(engine.tick().is_none());
    }

    #[test]
    fn finished_fires_again_after_reset_and_rerun() {
        let (clock, mut engine) = manual_engine();
        engine.set_total_seconds(1.0);
        engine.start();
        let first = run_to_completion(&clock, &mut engine, 10.0);
        assert_eq!(first.iter().filter(|e| e.is_finished()).count(), 1);

        engine.reset();
        assert_eq!(engine.elapsed_seconds(), 0.0);
        assert_eq!(engine.total_seconds(), 1.0);

        engine.start();
        let second = run_to_completion(&clock, &mut engine, 10.0);
        assert_eq!(second.iter().filter(|e| e.is_finished()).count(), 1);
    }

    #[test]
    fn zero_total_runs_without_finishing() {
        let (clock, mut engine) = manual_engine();
        engine.start();
        clock.advance_secs(100.0);
        let event = engine.tick().unwrap();
        assert!(!event.is_finished());
        assert!(engine.is_running());
        assert_eq!(engine.elapsed_seconds(), 100.0);
    }

    #[test]
    fn reset_emits_exactly_one_snapshot() {
        let (clock, mut engine) = manual_engine();
        engine.set_total_seconds(100.0);
        let rx = engine.subscribe();
        // TotalChanged fired before subscription; the receiver starts empty.
        assert!(rx.try_recv().is_err());

        engine.start();
        clock.advance_secs(5.0);
        engine.reset();

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received.len(), 2);
        assert!(matches!(received[0], Event::Started { .. }));
        match &received[1] {
            Event::Reset { state, .. } => {
                assert!(!state.running);
                assert_eq!(state.elapsed_s, 0.0);
                assert_eq!(state.total_s, 100.0);
            }
            other => panic!("expected Reset, got {other:?}"),
        }
        assert!(!engine.is_running());
    }

    #[test]
    fn every_mutating_call_returns_a_fresh_snapshot() {
        let (clock, mut engine) = manual_engine();
        let total_changed = engine.set_total_seconds(30.0);
        assert_eq!(total_changed.state().total_s, 30.0);

        let started = engine.start().unwrap();
        assert!(started.state().running);

        clock.advance_secs(2.0);
        let sought = engine.seek(10.0);
        assert_eq!(sought.state().elapsed_s, 10.0);

        let paused = engine.pause().unwrap();
        assert!(!paused.state().running);
        assert_eq!(paused.state().elapsed_s, 10.0);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let (_, mut engine) = manual_engine();
        let rx = engine.subscribe();
        drop(rx);
        // Emitting after the receiver is gone must not fail or leak.
        engine.set_total_seconds(10.0);
        assert!(engine.subscribers.is_empty());
    }

    #[test]
    fn segment_walkthrough_with_skip_navigation() {
        // End-to-end: sequence -> engine total, navigator targets -> seek.
        let (clock, mut engine) = manual_engine();
        let sequence = SegmentSequence::from_segments(vec![
            Segment::new("Warm Up", 1.0),
            Segment::new("Work", 1.0),
        ]);
        let durations = sequence.durations_secs();
        engine.set_total_seconds(sequence.total_seconds());
        assert_eq!(engine.total_seconds(), 120.0);
        assert_eq!(engine.elapsed_seconds(), 0.0);

        engine.start();
        clock.advance_secs(10.0);
        assert_eq!(navigator::current_index(engine.elapsed_seconds(), &durations), Some(0));

        // Skip forward into "Work".
        engine.seek(navigator::skip_next(engine.elapsed_seconds(), &durations));
        assert_eq!(engine.elapsed_seconds(), 60.0);
        assert_eq!(navigator::current_index(engine.elapsed_seconds(), &durations), Some(1));

        // 1s in: skip back crosses into the previous segment.
        clock.advance_secs(1.0);
        engine.seek(navigator::skip_prev(engine.elapsed_seconds(), &durations));
        assert_eq!(engine.elapsed_seconds(), 0.0);
        assert!(engine.is_running());

        // Run the rest of the way out.
        let events = run_to_completion(&clock, &mut engine, 200.0);
        assert_eq!(events.iter().filter(|e| e.is_finished()).count(), 1);
        assert_eq!(engine.elapsed_seconds(), 120.0);
    }
}
