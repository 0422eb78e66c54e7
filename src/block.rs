use serde::Serialize;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Code(String),
    Bold(String),
}

impl Span {
    /// The stored text, without delimiters.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(text) | Span::Code(text) | Span::Bold(text) => text,
        }
    }

    /// Append the span as it appeared in the source, delimiters included.
    pub fn write_source(&self, out: &mut String) {
        match self {
            Span::Text(text) => out.push_str(text),
            Span::Code(text) => {
                out.push('`');
                out.push_str(text);
                out.push('`');
            }
            Span::Bold(text) => {
                out.push_str("**");
                out.push_str(text);
                out.push_str("**");
            }
        }
    }

    pub fn to_source(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out);
        out
    }
}

/// A single list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub content: Vec<Span>,
}

impl ListItem {
    pub fn new(content: Vec<Span>) -> Self {
        Self { content }
    }
}

/// Block-level elements, one per blank-line separated chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Paragraph { content: Vec<Span> },
    BulletList { items: Vec<ListItem> },
    NumberedList { items: Vec<ListItem> },
}

/// Blocks in reading order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_reinserts_delimiters() {
        assert_eq!(Span::Text("a".into()).to_source(), "a");
        assert_eq!(Span::Code("x=5".into()).to_source(), "`x=5`");
        assert_eq!(Span::Bold("hi".into()).to_source(), "**hi**");
    }

    #[test]
    fn text_strips_delimiters() {
        assert_eq!(Span::Code("x=5".into()).text(), "x=5");
        assert_eq!(Span::Bold("".into()).text(), "");
    }

    #[test]
    fn serializes_with_kind_tags() {
        let doc = Document {
            blocks: vec![Block::BulletList {
                items: vec![ListItem::new(vec![Span::Code("x".into())])],
            }],
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "blocks": [{
                    "kind": "bullet_list",
                    "items": [{ "content": [{ "kind": "code", "text": "x" }] }]
                }]
            })
        );
    }
}
