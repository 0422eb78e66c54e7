//! Inline span extraction.
//!
//! Code spans are raw zones: they are cut out first and never rescanned, so
//! `**` inside backticks stays literal. Bold is only looked for in the text
//! between code spans. Unmatched delimiters are left in place as plain text.

use crate::block::Span;

const TICK: char = '`';
const STAR: char = '*';
const BOLD: &str = "**";

/// Split one run of text into plain, code and bold spans.
///
/// An empty run yields no spans. Empty interiors (``` `` ``` and `****`)
/// yield zero-length `Code` and `Bold` spans.
pub fn extract_spans(run: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = run;

    while let Some((before, code, after)) = split_code(rest) {
        push_bold_pass(before, &mut spans);
        spans.push(Span::Code(code.to_string()));
        rest = after;
    }
    push_bold_pass(rest, &mut spans);

    spans
}

/// Find the first closed code span in `s`.
///
/// Returns `(before, interior, after)`. If the first backtick has no partner
/// there is no later backtick either, so the remainder is left alone.
fn split_code(s: &str) -> Option<(&str, &str, &str)> {
    let open = s.find(TICK)?;
    let inner_start = open + TICK.len_utf8();
    let close = inner_start + s[inner_start..].find(TICK)?;
    Some((&s[..open], &s[inner_start..close], &s[close + TICK.len_utf8()..]))
}

/// Find the leftmost `**<no stars>**` in `s`.
fn split_bold(s: &str) -> Option<(&str, &str, &str)> {
    let mut from = 0;
    while let Some(found) = s[from..].find(BOLD) {
        let open = from + found;
        let inner_start = open + BOLD.len();
        let close = s[inner_start..]
            .find(STAR)
            .map_or(s.len(), |n| inner_start + n);
        if s[close..].starts_with(BOLD) {
            return Some((&s[..open], &s[inner_start..close], &s[close + BOLD.len()..]));
        }
        // `open` is an ASCII star, so the next byte is a char boundary
        from = open + 1;
    }
    None
}

fn push_bold_pass(segment: &str, spans: &mut Vec<Span>) {
    let mut rest = segment;
    while let Some((before, bold, after)) = split_bold(rest) {
        push_text(before, spans);
        spans.push(Span::Bold(bold.to_string()));
        rest = after;
    }
    push_text(rest, spans);
}

fn push_text(text: &str, spans: &mut Vec<Span>) {
    if !text.is_empty() {
        spans.push(Span::Text(text.to_string()));
    }
}
