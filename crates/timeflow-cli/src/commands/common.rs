use timeflow_core::Segment;

/// Parse an inline segment spec: comma-separated `Name:minutes` pairs,
/// e.g. `"Warm Up:5,Deep Work:25,Break:5"`.
///
/// Minutes must parse as a finite, non-negative number; anything else is
/// rejected with a message rather than clamped, mirroring the segment
/// sequence's edit boundary for malformed text.
pub fn parse_segments(spec: &str) -> Result<Vec<Segment>, String> {
    let mut segments = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            return Err(format!("empty segment entry in '{spec}'"));
        }
        let Some((name, minutes)) = part.rsplit_once(':') else {
            return Err(format!("segment entry '{part}' is missing ':minutes'"));
        };
        let minutes: f64 = minutes
            .trim()
            .parse()
            .map_err(|_| format!("invalid minutes in segment entry '{part}'"))?;
        if !minutes.is_finite() || minutes < 0.0 {
            return Err(format!(
                "minutes must be a finite non-negative number in '{part}'"
            ));
        }
        segments.push(Segment::new(name, minutes));
    }
    Ok(segments)
}

/// `MM:SS` rendering of a second count, rounded, floored at zero.
pub fn format_mmss(seconds: f64) -> String {
    let s = seconds.max(0.0).round() as u64;
    format!("{:02}:{:02}", s / 60, s % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_fractional_minutes() {
        let segments = parse_segments("Warm Up:5, Deep Work:25.5 ,Break:0").unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].name, "Warm Up");
        assert_eq!(segments[1].minutes, 25.5);
        assert_eq!(segments[2].minutes, 0.0);
    }

    #[test]
    fn name_may_contain_colons() {
        let segments = parse_segments("Round 1: sprints:2").unwrap();
        assert_eq!(segments[0].name, "Round 1: sprints");
        assert_eq!(segments[0].minutes, 2.0);
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(parse_segments("NoMinutes").is_err());
        assert!(parse_segments("A:abc").is_err());
        assert!(parse_segments("A:-1").is_err());
        assert!(parse_segments("A:inf").is_err());
        assert!(parse_segments("A:1,,B:2").is_err());
    }

    #[test]
    fn formats_mmss() {
        assert_eq!(format_mmss(0.0), "00:00");
        assert_eq!(format_mmss(61.4), "01:01");
        assert_eq!(format_mmss(-5.0), "00:00");
        assert_eq!(format_mmss(3600.0), "60:00");
    }
}
