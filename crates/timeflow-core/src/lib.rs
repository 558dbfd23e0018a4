//! # TimeFlow Core Library
//!
//! This library provides the core logic for the TimeFlow segmented interval
//! timer. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any richer front end being a
//! thin presentation layer over the same core library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A monotonic-clock-based state machine that requires
//!   the caller to periodically invoke `tick()` for progress updates
//! - **Segment Sequence**: The ordered, editable list of named sub-intervals
//!   that defines the timer's total duration
//! - **Segment Navigator**: Pure functions resolving the current segment and
//!   threshold-based skip targets from an elapsed position
//! - **Storage**: JSON-based preset storage and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`SegmentSequence`]: Segment list and total-duration computation
//! - [`timer::navigator`]: Skip-forward/skip-backward target resolution
//! - [`Clock`]: Injectable monotonic time source
//! - [`PresetStore`] / [`Config`]: Persistence for presets and preferences

pub mod clock;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::{ConfigError, CoreError, PresetError};
pub use events::Event;
pub use storage::{Config, DisplayMode, Preset, PresetStore};
pub use timer::{Segment, SegmentSequence, TimerEngine, TimerState, TICK_INTERVAL};
