use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every state change in the engine produces an Event.
///
/// Each variant carries the full [`TimerState`] snapshot taken at the moment
/// the event was emitted, so observers never have to query the engine back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The timer began (or resumed) running.
    Started {
        state: TimerState,
        at: DateTime<Utc>,
    },
    /// The timer stopped; elapsed time is frozen.
    Paused {
        state: TimerState,
        at: DateTime<Utc>,
    },
    /// Elapsed time was repositioned via `seek`.
    Sought {
        state: TimerState,
        at: DateTime<Utc>,
    },
    /// The timer returned to zero elapsed, not running.
    Reset {
        state: TimerState,
        at: DateTime<Utc>,
    },
    /// The total duration changed.
    TotalChanged {
        state: TimerState,
        at: DateTime<Utc>,
    },
    /// Periodic snapshot while running.
    Tick {
        state: TimerState,
        at: DateTime<Utc>,
    },
    /// One-shot completion: elapsed reached total during a run.
    Finished {
        state: TimerState,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// The snapshot carried by this event.
    pub fn state(&self) -> &TimerState {
        match self {
            Event::Started { state, .. }
            | Event::Paused { state, .. }
            | Event::Sought { state, .. }
            | Event::Reset { state, .. }
            | Event::TotalChanged { state, .. }
            | Event::Tick { state, .. }
            | Event::Finished { state, .. } => state,
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::Started { at, .. }
            | Event::Paused { at, .. }
            | Event::Sought { at, .. }
            | Event::Reset { at, .. }
            | Event::TotalChanged { at, .. }
            | Event::Tick { at, .. }
            | Event::Finished { at, .. } => *at,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Event::Finished { .. })
    }
}
