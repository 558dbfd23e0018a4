//! Segment navigation.
//!
//! Pure, stateless resolution of "where are we on the segment timeline" and
//! "where should skip commands land", given an elapsed position and the
//! ordered per-segment durations in seconds. The controller feeds the
//! results straight into [`TimerEngine::seek`](crate::TimerEngine::seek).

/// Skip-back cutoff: more than this far into a segment, "previous" restarts
/// the current segment instead of jumping to the one before it.
pub const BACK_THRESHOLD_S: f64 = 2.0;

/// Guard against floating-point rounding at exact segment boundaries when
/// scanning forward.
pub const BOUNDARY_EPSILON_S: f64 = 0.1;

/// Index of the segment containing `elapsed_s`.
///
/// The last segment also claims everything at or past its end, so an elapsed
/// value exactly equal to the total still resolves to a valid index. An
/// empty sequence has no current segment.
pub fn current_index(elapsed_s: f64, durations: &[f64]) -> Option<usize> {
    if durations.is_empty() {
        return None;
    }
    let mut t = 0.0;
    for (i, &d) in durations.iter().enumerate() {
        let d = d.max(0.0);
        if elapsed_s < t + d {
            return Some(i);
        }
        t += d;
    }
    Some(durations.len() - 1)
}

/// Cumulative start offset of segment `index`.
fn segment_start(index: usize, durations: &[f64]) -> f64 {
    durations[..index].iter().map(|d| d.max(0.0)).sum()
}

/// Target for a skip-forward: the start of the segment after the one
/// containing `elapsed_s`, or the end of the timeline when already in (or
/// past) the last segment.
pub fn skip_next(elapsed_s: f64, durations: &[f64]) -> f64 {
    let mut t = 0.0;
    for &d in durations {
        let d = d.max(0.0);
        if elapsed_s < t + d - BOUNDARY_EPSILON_S {
            return t + d;
        }
        t += d;
    }
    t
}

/// Target for a skip-back, with restart semantics.
///
/// More than [`BACK_THRESHOLD_S`] into the current segment: restart it.
/// Within the threshold: jump to the start of the previous segment (or 0
/// from the first segment).
pub fn skip_prev(elapsed_s: f64, durations: &[f64]) -> f64 {
    let Some(i) = current_index(elapsed_s, durations) else {
        return 0.0;
    };
    let start = segment_start(i, durations);
    if elapsed_s - start > BACK_THRESHOLD_S {
        start
    } else if i == 0 {
        0.0
    } else {
        start - durations[i - 1].max(0.0)
    }
}
