mod block;
mod config;
mod error;
mod html;
mod inline;
mod lesson;
mod parser;
mod render;
mod typst;

pub use block::{Block, Document, ListItem, Span};
pub use config::{Config, FontConfig, ListsConfig, MetaConfig, PageConfig};
pub use error::{Error, Result};
pub use html::{HtmlRenderer, document_to_html, page_to_html};
pub use inline::extract_spans;
pub use lesson::{Lesson, LessonMeta, Page};
pub use parser::{classify_block, parse_document};
pub use render::Renderer;
pub use typst::{TypstRenderer, document_to_typst, page_to_typst};

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_library::layout::PagedDocument;
use typst_pdf::PdfOptions;

/// Convert lesson markup to Typst markup using the compiled default config.
pub fn text_to_typst(text: &str) -> String {
    text_to_typst_with_config(text, &Config::compiled_default())
}

/// Convert lesson markup to Typst markup with custom config.
pub fn text_to_typst_with_config(text: &str, config: &Config) -> String {
    document_to_typst(&parse_document(text), config)
}

/// Convert lesson markup to an HTML fragment.
pub fn text_to_html(text: &str) -> String {
    document_to_html(&parse_document(text))
}

/// Dump a parsed page as pretty-printed JSON.
pub fn page_to_json(page: &Page) -> Result<String> {
    Ok(serde_json::to_string_pretty(page)?)
}

/// Convert lesson markup to PDF bytes using the compiled default config.
pub fn text_to_pdf(text: &str) -> Result<Vec<u8>> {
    page_to_pdf(&Page::from_text(text), &Config::compiled_default())
}

/// Compile a page to a Typst document.
fn compile_document(page: &Page, config: &Config) -> Result<PagedDocument> {
    let typst_content = page_to_typst(page, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Typst(format!("{:?}", e)))?;
    Ok(doc)
}

/// Convert a page to PDF bytes with custom config.
pub fn page_to_pdf(page: &Page, config: &Config) -> Result<Vec<u8>> {
    let doc = compile_document(page, config)?;
    log::debug!("compiled {} pages", doc.pages.len());

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Pdf(format!("{:?}", e)))
}
