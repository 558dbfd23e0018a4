mod engine;
pub mod navigator;
mod segments;

pub use engine::{TimerEngine, TimerState, TICK_INTERVAL};
pub use segments::{
    Segment, SegmentSequence, DEFAULT_SEGMENT_MINUTES, DEFAULT_SEGMENT_NAME,
};
