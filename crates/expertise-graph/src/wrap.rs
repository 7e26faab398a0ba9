//! Word wrapping for node labels.

use std::mem;

/// Column budget used for node labels unless configured otherwise.
pub const DEFAULT_WRAP_WIDTH: usize = 22;

/// Splits `label` into words, each paired with the whitespace run that precedes it.
fn words(label: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    let mut rest = label;
    while !rest.is_empty() {
        let word_start = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
        let (sep, tail) = rest.split_at(word_start);
        let word_end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let (word, next) = tail.split_at(word_end);
        out.push((sep, word));
        rest = next;
    }
    out
}

/// Wraps `label` into lines of at most `width` characters, breaking only at whitespace.
///
/// Words longer than `width` are kept whole on their own line. The whitespace run at a break
/// is replaced by the line break; every other run is kept as written. Labels that already
/// contain a line break, or that fit within `width`, are returned unchanged.
pub fn wrap_label(label: &str, width: usize) -> String {
    if label.contains('\n') || label.chars().count() <= width {
        return label.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for (sep, word) in words(label) {
        let sep_len = sep.chars().count();
        let word_len = word.chars().count();
        if line_len > 0 && !word.is_empty() && line_len + sep_len + word_len > width {
            lines.push(mem::take(&mut line));
            line.push_str(word);
            line_len = word_len;
            continue;
        }
        line.push_str(sep);
        line.push_str(word);
        line_len += sep_len + word_len;
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines.join("\n")
}
