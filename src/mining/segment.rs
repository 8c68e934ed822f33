// src/mining/segment.rs
// ============================================================================
// Module: Robometrics Threshold Segments
// Description: True-run extraction and the min-duration/min-gap/cooldown passes.
// Purpose: Factor the threshold-rule debounce pipeline out for unit testing.
// Dependencies: none
// ============================================================================

/// A closed time interval `[start, end]` where a threshold condition held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Segment start time.
    pub start: f64,
    /// Segment end time.
    pub end: f64,
}

/// Walks `times`/`mask` in lockstep and extracts maximal "true" runs.
///
/// A segment starts at the first sample where `mask` is true and ends at the
/// last-seen sample time before `mask` becomes false. If `mask` is still
/// true at the last sample, the segment closes there.
///
/// # Panics
/// Panics if `times` and `mask` have different lengths; callers always
/// derive both from the same stream, so this is a programmer error rather
/// than a runtime condition.
#[must_use]
pub fn segments_from_condition(times: &[f64], mask: &[bool]) -> Vec<Segment> {
    assert_eq!(times.len(), mask.len(), "times and mask must be the same length");

    let mut segments = Vec::new();
    let mut start: Option<f64> = None;
    let mut last_time: Option<f64> = None;

    for (&t, &flag) in times.iter().zip(mask) {
        if flag && start.is_none() {
            start = Some(t);
        }
        if !flag {
            if let Some(segment_start) = start {
                let end = last_time.unwrap_or(t);
                segments.push(Segment { start: segment_start, end });
                start = None;
            }
        }
        last_time = Some(t);
    }
    if let (Some(segment_start), Some(end)) = (start, last_time) {
        segments.push(Segment { start: segment_start, end });
    }
    segments
}

/// Drops segments shorter than `for_s`. No-op when `for_s <= 0`.
#[must_use]
pub fn apply_min_duration(segments: Vec<Segment>, for_s: f64) -> Vec<Segment> {
    if for_s <= 0.0 {
        return segments;
    }
    segments.into_iter().filter(|segment| segment.end - segment.start >= for_s).collect()
}

/// Merges adjacent segments separated by a gap no larger than `min_gap_s`.
/// No-op when `min_gap_s` is absent or non-positive.
#[must_use]
pub fn apply_min_gap(segments: Vec<Segment>, min_gap_s: Option<f64>) -> Vec<Segment> {
    let Some(min_gap_s) = min_gap_s.filter(|&v| v > 0.0) else {
        return segments;
    };
    if segments.is_empty() {
        return segments;
    }

    let mut merged = Vec::new();
    let mut current = segments[0];
    for &segment in &segments[1..] {
        if segment.start - current.end <= min_gap_s {
            current = Segment { start: current.start, end: current.end.max(segment.end) };
        } else {
            merged.push(current);
            current = segment;
        }
    }
    merged.push(current);
    merged
}

/// Greedily emits segments separated by at least `cooldown_s`. No-op when
/// `cooldown_s` is absent or non-positive.
#[must_use]
pub fn apply_cooldown(segments: Vec<Segment>, cooldown_s: Option<f64>) -> Vec<Segment> {
    let Some(cooldown_s) = cooldown_s.filter(|&v| v > 0.0) else {
        return segments;
    };

    let mut filtered = Vec::new();
    let mut last_end: Option<f64> = None;
    for segment in segments {
        if last_end.is_none_or(|end| segment.start - end >= cooldown_s) {
            last_end = Some(segment.end);
            filtered.push(segment);
        }
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_single_closed_segment() {
        let times = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let mask = vec![false, true, true, true, false];
        let segments = segments_from_condition(&times, &mask);
        assert_eq!(segments, vec![Segment { start: 1.0, end: 3.0 }]);
    }

    #[test]
    fn extracts_segment_still_open_at_end() {
        let times = vec![0.0, 1.0, 2.0];
        let mask = vec![false, true, true];
        let segments = segments_from_condition(&times, &mask);
        assert_eq!(segments, vec![Segment { start: 1.0, end: 2.0 }]);
    }

    #[test]
    fn min_duration_drops_short_segments() {
        let segments = vec![Segment { start: 0.0, end: 0.5 }, Segment { start: 1.0, end: 3.0 }];
        let kept = apply_min_duration(segments, 1.0);
        assert_eq!(kept, vec![Segment { start: 1.0, end: 3.0 }]);
    }

    #[test]
    fn min_gap_merges_close_segments() {
        let segments = vec![Segment { start: 0.0, end: 1.0 }, Segment { start: 1.4, end: 2.0 }];
        let merged = apply_min_gap(segments, Some(0.5));
        assert_eq!(merged, vec![Segment { start: 0.0, end: 2.0 }]);
    }

    #[test]
    fn cooldown_drops_segments_too_close_to_the_last_emitted() {
        let segments = vec![
            Segment { start: 0.0, end: 1.0 },
            Segment { start: 1.2, end: 2.0 },
            Segment { start: 5.0, end: 6.0 },
        ];
        let kept = apply_cooldown(segments, Some(2.0));
        assert_eq!(kept, vec![Segment { start: 0.0, end: 1.0 }, Segment { start: 5.0, end: 6.0 }]);
    }

    proptest::proptest! {
        #[test]
        fn segments_are_ordered_and_non_overlapping(flags in proptest::collection::vec(proptest::bool::ANY, 1..40)) {
            let times: Vec<f64> = (0..flags.len()).map(|i| i as f64).collect();
            let segments = segments_from_condition(&times, &flags);
            for window in segments.windows(2) {
                proptest::prop_assert!(window[0].end < window[1].start);
            }
            for segment in &segments {
                proptest::prop_assert!(segment.start <= segment.end);
            }
        }
    }
}
