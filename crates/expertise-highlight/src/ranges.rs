//! Range utilities for merging highlight spans.

/// An inclusive byte range `start..=end` into a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchRange {
    /// First byte covered by the match.
    pub start: usize,
    /// Last byte covered by the match (inclusive).
    pub end: usize,
}

impl MatchRange {
    /// Creates a range covering `start..=end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start {start} is past end {end}");
        Self { start, end }
    }
}

/// Merges overlapping ranges.
///
/// Ranges that only touch, such as `0..=4` and `5..=9`, stay separate.
///
/// The result is sorted by start position and for any two consecutive ranges
/// `a.end < b.start`. Passing no ranges is a caller bug; it trips a debug
/// assertion and yields an empty result in release builds.
pub fn merge_ranges(mut ranges: Vec<MatchRange>) -> Vec<MatchRange> {
    debug_assert!(!ranges.is_empty(), "merge_ranges called without ranges");
    if ranges.is_empty() {
        return ranges;
    }

    ranges.sort_by_key(|r| r.start);

    let mut merged = Vec::with_capacity(ranges.len());
    let mut current = ranges[0];

    for range in ranges.into_iter().skip(1) {
        if range.start <= current.end {
            current.end = current.end.max(range.end);
        } else {
            merged.push(current);
            current = range;
        }
    }
    merged.push(current);

    merged
}
