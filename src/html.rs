use pulldown_cmark::{CowStr, Event, HeadingLevel, Tag, TagEnd, html};

use crate::block::Document;
use crate::config::Config;
use crate::lesson::{LessonMeta, Page};
use crate::render::Renderer;

/// Renders a document as a `pulldown-cmark` event stream, which its HTML
/// writer then serialises.
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    type Node = Vec<Event<'static>>;

    fn text(&self, text: &str) -> Self::Node {
        vec![Event::Text(owned(text))]
    }

    fn code(&self, text: &str) -> Self::Node {
        vec![Event::Code(owned(text))]
    }

    fn bold(&self, text: &str) -> Self::Node {
        wrap(Tag::Strong, TagEnd::Strong, self.text(text))
    }

    fn paragraph(&self, content: Vec<Self::Node>) -> Self::Node {
        wrap(Tag::Paragraph, TagEnd::Paragraph, flatten(content))
    }

    fn bullet_list(&self, items: Vec<Vec<Self::Node>>) -> Self::Node {
        list(None, items)
    }

    fn numbered_list(&self, items: Vec<Vec<Self::Node>>) -> Self::Node {
        list(Some(1), items)
    }

    fn document(&self, blocks: Vec<Self::Node>) -> Self::Node {
        flatten(blocks)
    }
}

fn owned(text: &str) -> CowStr<'static> {
    CowStr::from(text.to_owned())
}

fn flatten(nodes: Vec<Vec<Event<'static>>>) -> Vec<Event<'static>> {
    nodes.into_iter().flatten().collect()
}

fn wrap(
    start: Tag<'static>,
    end: TagEnd,
    inner: Vec<Event<'static>>,
) -> Vec<Event<'static>> {
    let mut events = Vec::with_capacity(inner.len() + 2);
    events.push(Event::Start(start));
    events.extend(inner);
    events.push(Event::End(end));
    events
}

fn list(start: Option<u64>, items: Vec<Vec<Vec<Event<'static>>>>) -> Vec<Event<'static>> {
    let items = items
        .into_iter()
        .flat_map(|item| wrap(Tag::Item, TagEnd::Item, flatten(item)))
        .collect();
    wrap(Tag::List(start), TagEnd::List(start.is_some()), items)
}

fn header(meta: &LessonMeta, config: &Config) -> Vec<Event<'static>> {
    let mut events = Vec::new();
    if config.meta.show_title
        && let Some(title) = &meta.title
    {
        let heading = Tag::Heading {
            level: HeadingLevel::H1,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
        };
        events.extend(wrap(
            heading,
            TagEnd::Heading(HeadingLevel::H1),
            vec![Event::Text(owned(title))],
        ));
    }
    if config.meta.show_category
        && let Some(byline) = meta.byline()
    {
        let emphasis = wrap(
            Tag::Emphasis,
            TagEnd::Emphasis,
            vec![Event::Text(byline.into())],
        );
        events.extend(wrap(Tag::Paragraph, TagEnd::Paragraph, emphasis));
    }
    events
}

/// Convert a document to an HTML fragment
pub fn document_to_html(doc: &Document) -> String {
    let mut out = String::new();
    html::push_html(&mut out, HtmlRenderer.render(doc).into_iter());
    out
}

/// Convert a page, with its metadata header, to an HTML fragment
pub fn page_to_html(page: &Page, config: &Config) -> String {
    let mut events = header(&page.meta, config);
    events.extend(HtmlRenderer.render(&page.document));

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    log::debug!(
        "rendered {} blocks to {} bytes of HTML",
        page.document.len(),
        out.len()
    );
    out
}
