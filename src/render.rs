use crate::block::{Block, Document, ListItem, Span};

/// Maps a parsed [`Document`] onto some presentation node type.
///
/// Implementors provide one constructor per span and block variant; the
/// provided `render*` methods do the walk. A renderer only ever sees text
/// that the parser has already classified, so it has nothing to re-parse.
pub trait Renderer {
    type Node;

    fn text(&self, text: &str) -> Self::Node;
    fn code(&self, text: &str) -> Self::Node;
    fn bold(&self, text: &str) -> Self::Node;

    fn paragraph(&self, content: Vec<Self::Node>) -> Self::Node;
    fn bullet_list(&self, items: Vec<Vec<Self::Node>>) -> Self::Node;
    fn numbered_list(&self, items: Vec<Vec<Self::Node>>) -> Self::Node;

    /// Combine rendered blocks, in reading order, into the final node.
    fn document(&self, blocks: Vec<Self::Node>) -> Self::Node;

    fn render_span(&self, span: &Span) -> Self::Node {
        match span {
            Span::Text(text) => self.text(text),
            Span::Code(text) => self.code(text),
            Span::Bold(text) => self.bold(text),
        }
    }

    fn render_spans(&self, spans: &[Span]) -> Vec<Self::Node> {
        spans.iter().map(|span| self.render_span(span)).collect()
    }

    fn render_block(&self, block: &Block) -> Self::Node {
        match block {
            Block::Paragraph { content } => self.paragraph(self.render_spans(content)),
            Block::BulletList { items } => self.bullet_list(self.render_items(items)),
            Block::NumberedList { items } => self.numbered_list(self.render_items(items)),
        }
    }

    fn render_items(&self, items: &[ListItem]) -> Vec<Vec<Self::Node>> {
        items
            .iter()
            .map(|item| self.render_spans(&item.content))
            .collect()
    }

    fn render(&self, doc: &Document) -> Self::Node {
        let blocks = doc.iter().map(|block| self.render_block(block)).collect();
        self.document(blocks)
    }
}
