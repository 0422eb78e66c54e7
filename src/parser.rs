use crate::block::{Block, Document, ListItem};
use crate::inline::extract_spans;

/// Top-level blocks are separated by exactly one empty line.
const BLOCK_BOUNDARY: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Numbered,
}

impl ListKind {
    /// Decide the list kind from a chunk's first line.
    fn detect(line: &str) -> Option<Self> {
        if bullet_marker_len(line).is_some_and(|len| followed_by_space(line, len)) {
            Some(ListKind::Bullet)
        } else if number_marker_len(line).is_some_and(|len| followed_by_space(line, len)) {
            Some(ListKind::Numbered)
        } else {
            None
        }
    }

    /// Strip this kind's marker and the whitespace after it. Lines without
    /// a marker are returned as they are.
    fn strip<'a>(&self, line: &'a str) -> &'a str {
        let marker = match self {
            ListKind::Bullet => bullet_marker_len(line),
            ListKind::Numbered => number_marker_len(line),
        };
        match marker {
            Some(len) => line[len..].trim_start(),
            None => line,
        }
    }
}

/// Length of a leading `-` or `*`.
fn bullet_marker_len(line: &str) -> Option<usize> {
    line.starts_with(['-', '*']).then_some(1)
}

/// Length of a leading `<digits>.`.
fn number_marker_len(line: &str) -> Option<usize> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    (digits > 0 && line[digits..].starts_with('.')).then_some(digits + 1)
}

fn followed_by_space(line: &str, marker_len: usize) -> bool {
    line[marker_len..].chars().next().is_some_and(char::is_whitespace)
}

/// Classify one blank-line delimited chunk.
///
/// The first line alone decides the kind, which then applies to every line:
/// a paragraph never turns into a list halfway, and every non-blank line of a
/// list chunk becomes an item.
pub fn classify_block(chunk: &str) -> Block {
    let first_line = chunk.split('\n').next().unwrap_or_default();

    match ListKind::detect(first_line) {
        Some(kind) => {
            let items = list_items(chunk, kind);
            match kind {
                ListKind::Bullet => Block::BulletList { items },
                ListKind::Numbered => Block::NumberedList { items },
            }
        }
        None => Block::Paragraph {
            content: extract_spans(chunk),
        },
    }
}

fn list_items(chunk: &str, kind: ListKind) -> Vec<ListItem> {
    chunk
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| ListItem::new(extract_spans(kind.strip(line))))
        .collect()
}

/// Parse a full text payload into a document
pub fn parse_document(text: &str) -> Document {
    let blocks: Vec<Block> = text
        .split(BLOCK_BOUNDARY)
        .filter(|chunk| !chunk.trim().is_empty())
        .map(classify_block)
        .collect();

    log::trace!("parsed {} blocks from {} bytes", blocks.len(), text.len());
    Document { blocks }
}
