use crate::block::Document;
use crate::config::Config;
use crate::lesson::{LessonMeta, Page};
use crate::render::Renderer;

/// Characters Typst would read as markup anywhere in a line.
const SPECIAL: &[char] = &[
    '#', '*', '_', '@', '$', '\\', '`', '<', '>', '[', ']', '~', '/',
];

/// Characters Typst reads as list, enum or heading markers at the start of a
/// line.
const LINE_MARKERS: &[char] = &['-', '+', '='];

/// Renders a document as Typst markup
pub struct TypstRenderer<'a> {
    config: &'a Config,
}

impl<'a> TypstRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    fn list(&self, prefix: &str, items: Vec<Vec<String>>) -> String {
        let keep_together = items.len() <= self.config.lists.keep_together;

        let mut out = String::new();
        if keep_together {
            out.push_str("#block(breakable: false)[\n");
        }
        for item in items {
            out.push_str(prefix);
            out.push(' ');
            out.extend(item);
            out.push('\n');
        }
        if keep_together {
            out.push_str("]\n\n");
        } else {
            out.push('\n');
        }
        out
    }
}

impl Renderer for TypstRenderer<'_> {
    type Node = String;

    fn text(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        escape_text(text, &mut out);
        out
    }

    fn code(&self, text: &str) -> String {
        // A bare "``" would merge with a neighbouring tick into a raw block
        // fence; `;` ends the call so following text is not read as arguments
        if text.is_empty() {
            return "#raw(\"\");".to_string();
        }
        // Code spans cannot contain a backtick, so no escaping is needed
        format!("`{text}`")
    }

    fn bold(&self, text: &str) -> String {
        let mut out = String::from("*");
        escape_text(text, &mut out);
        out.push('*');
        out
    }

    fn paragraph(&self, content: Vec<String>) -> String {
        let mut out: String = content.concat();
        out.push_str("\n\n");
        out
    }

    fn bullet_list(&self, items: Vec<Vec<String>>) -> String {
        self.list("-", items)
    }

    fn numbered_list(&self, items: Vec<Vec<String>>) -> String {
        self.list("+", items)
    }

    fn document(&self, blocks: Vec<String>) -> String {
        blocks.concat()
    }
}

/// Convert a document to a standalone Typst file
pub fn document_to_typst(doc: &Document, config: &Config) -> String {
    let mut out = String::new();
    emit_preamble(config, &mut out);
    out.push_str(&TypstRenderer::new(config).render(doc));
    out
}

/// Convert a page, with its metadata header, to a standalone Typst file
pub fn page_to_typst(page: &Page, config: &Config) -> String {
    let mut out = String::new();
    emit_preamble(config, &mut out);
    emit_header(&page.meta, config, &mut out);
    out.push_str(&TypstRenderer::new(config).render(&page.document));
    log::debug!(
        "rendered {} blocks to {} bytes of Typst",
        page.document.len(),
        out.len()
    );
    out
}

fn emit_preamble(config: &Config, out: &mut String) {
    let mut page_args = Vec::new();
    if let Some(paper) = &config.page.paper {
        page_args.push(format!("paper: \"{paper}\""));
    }
    if config.page.numbers {
        page_args.push("numbering: \"1\"".to_string());
    }
    if !page_args.is_empty() {
        out.push_str(&format!("#set page({})\n", page_args.join(", ")));
    }

    let mut text_args = Vec::new();
    if let Some(family) = &config.font.family {
        text_args.push(format!("font: \"{family}\""));
    }
    if let Some(size) = &config.font.size {
        text_args.push(format!("size: {size}"));
    }
    if !text_args.is_empty() {
        out.push_str(&format!("#set text({})\n", text_args.join(", ")));
    }

    out.push_str("#set par(linebreaks: \"optimized\")\n\n");
}

fn emit_header(meta: &LessonMeta, config: &Config, out: &mut String) {
    if config.meta.show_title
        && let Some(title) = &meta.title
    {
        out.push_str("= ");
        escape_text(title, out);
        out.push_str("\n\n");
    }
    if config.meta.show_category
        && let Some(byline) = meta.byline()
    {
        out.push('_');
        escape_text(&byline, out);
        out.push_str("_\n\n");
    }
}

/// Escape plain text so Typst shows it literally.
///
/// The start of `text` counts as the start of a line, since a span may open
/// a paragraph. Escaping a marker mid-line does not change the output.
fn escape_text(text: &str, out: &mut String) {
    let mut line_start = true;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\n' => {
                out.push('\n');
                line_start = true;
                continue;
            }
            c if line_start && c.is_whitespace() => {
                out.push(c);
                continue;
            }
            c if line_start && c.is_ascii_digit() => {
                // `12.` opens a numbered item
                out.push(c);
                while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    out.push(d);
                    chars.next();
                }
                if chars.next_if_eq(&'.').is_some() {
                    out.push_str("\\.");
                }
            }
            c if SPECIAL.contains(&c) || (line_start && LINE_MARKERS.contains(&c)) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
        line_start = false;
    }
}
