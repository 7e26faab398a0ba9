//! Case-insensitive search phrase highlighting.
//!
//! Every occurrence of every phrase is located in a lower-cased copy of the text, mapped back
//! to byte offsets in the original, merged, and used to split the original text into
//! alternating plain and highlighted segments. Matches that touch end to end share one
//! highlighted segment.

use std::iter;

use crate::ranges::{MatchRange, merge_ranges};

/// A slice of the highlighted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The text of this segment, borrowed from the original input.
    pub text: &'a str,
    /// Whether the segment is covered by a phrase match.
    pub highlighted: bool,
}

impl<'a> Segment<'a> {
    /// Creates an unhighlighted segment.
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            highlighted: false,
        }
    }

    /// Creates a highlighted segment.
    pub fn marked(text: &'a str) -> Self {
        Self {
            text,
            highlighted: true,
        }
    }
}

/// Lower-cased copy of a text that remembers where each byte came from.
struct LoweredText {
    /// The lower-cased text.
    text: String,
    /// For each byte of `text`, the byte offset of the originating char in the original.
    origin: Vec<usize>,
}

impl LoweredText {
    /// Lower-cases `original` char by char, recording byte provenance.
    fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut origin = Vec::with_capacity(original.len());
        for (idx, ch) in original.char_indices() {
            let before = text.len();
            text.extend(ch.to_lowercase());
            origin.extend(iter::repeat_n(idx, text.len() - before));
        }
        Self { text, origin }
    }
}

/// Length in bytes of the char starting at `idx`.
fn char_len_at(text: &str, idx: usize) -> usize {
    text[idx..].chars().next().map_or(1, char::len_utf8)
}

/// Finds every occurrence of `phrase`, including overlapping ones.
///
/// After a match at position `p` the scan resumes one character after `p`, so the phrase
/// "aa" is reported twice in "aaa".
fn phrase_ranges(original: &str, lowered: &LoweredText, phrase: &str, out: &mut Vec<MatchRange>) {
    let mut from = 0;
    while let Some(pos) = lowered.text[from..].find(phrase) {
        let start = from + pos;
        let last = start + phrase.len() - 1;

        let orig_start = lowered.origin[start];
        let orig_last = lowered.origin[last];
        let orig_end = orig_last + char_len_at(original, orig_last) - 1;
        out.push(MatchRange::new(orig_start, orig_end));

        from = start + char_len_at(&lowered.text, start);
    }
}

/// Collects the unmerged match ranges of all phrases within `text`.
///
/// Empty phrases are skipped.
pub fn find_phrase_ranges<S: AsRef<str>>(text: &str, phrases: &[S]) -> Vec<MatchRange> {
    let mut ranges = Vec::new();
    if text.is_empty() {
        return ranges;
    }

    let lowered = LoweredText::new(text);
    for phrase in phrases {
        let phrase: String = phrase.as_ref().chars().flat_map(char::to_lowercase).collect();
        if phrase.is_empty() {
            continue;
        }
        phrase_ranges(text, &lowered, &phrase, &mut ranges);
    }
    ranges
}

/// Splits `text` into plain and highlighted segments for the given phrases.
///
/// Matching is case-insensitive, segment text keeps the original casing, and the segments
/// concatenate back to exactly `text`. Without any match the whole text comes back as one
/// plain segment.
pub fn highlight<'a, S: AsRef<str>>(text: &'a str, phrases: &[S]) -> Vec<Segment<'a>> {
    let ranges = find_phrase_ranges(text, phrases);
    if ranges.is_empty() {
        return vec![Segment::plain(text)];
    }

    let merged = merge_ranges(ranges);
    let mut segments: Vec<Segment<'a>> = Vec::with_capacity(merged.len() * 2 + 1);
    let mut cursor = 0;

    for range in merged {
        if range.start > cursor {
            segments.push(Segment::plain(&text[cursor..range.start]));
        } else if let Some(last) = segments.last_mut().filter(|s| s.highlighted) {
            let start = cursor - last.text.len();
            *last = Segment::marked(&text[start..=range.end]);
            cursor = range.end + 1;
            continue;
        }
        segments.push(Segment::marked(&text[range.start..=range.end]));
        cursor = range.end + 1;
    }
    if cursor < text.len() {
        segments.push(Segment::plain(&text[cursor..]));
    }

    segments
}
