use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::block::Document;
use crate::error::{Error, Result};
use crate::parser::parse_document;

/// Display metadata that travels alongside a lesson's text.
///
/// The parser never looks at it; renderers may show it as a header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leetcode_id: Option<u32>,
}

impl LessonMeta {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.category.is_none() && self.leetcode_id.is_none()
    }

    /// Fill in every field `other` sets, keeping ours where it has none.
    pub fn overlay(self, other: LessonMeta) -> Self {
        Self {
            title: other.title.or(self.title),
            category: other.category.or(self.category),
            leetcode_id: other.leetcode_id.or(self.leetcode_id),
        }
    }

    /// One-line summary under the title, e.g. `Arrays · LeetCode #1`.
    pub fn byline(&self) -> Option<String> {
        let parts: Vec<String> = self
            .category
            .iter()
            .cloned()
            .chain(self.leetcode_id.map(|id| format!("LeetCode #{id}")))
            .collect();
        (!parts.is_empty()).then(|| parts.join(" · "))
    }
}

/// A lesson file: metadata keys at the top level and the markup in `body`.
///
/// ```toml
/// title = "Two Sum"
/// category = "Arrays"
/// leetcode_id = 1
/// body = """
/// Use a `HashMap` to remember **seen** values.
/// """
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Lesson {
    #[serde(flatten)]
    pub meta: LessonMeta,
    pub body: String,
}

impl Lesson {
    pub fn new(meta: LessonMeta, body: impl Into<String>) -> Self {
        Self {
            meta,
            body: body.into(),
        }
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| Error::Lesson {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse the body. The metadata is carried over untouched.
    pub fn into_page(self) -> Page {
        let document = parse_document(&self.body);
        Page {
            meta: self.meta,
            document,
        }
    }
}

/// A parsed lesson ready for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    pub meta: LessonMeta,
    pub document: Document,
}

impl Page {
    pub fn new(meta: LessonMeta, document: Document) -> Self {
        Self { meta, document }
    }

    /// A page with no metadata.
    pub fn from_text(text: &str) -> Self {
        Self::new(LessonMeta::default(), parse_document(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, Span};
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_lesson_file() {
        let lesson = Lesson::from_toml(
            r#"
title = "Two Sum"
category = "Arrays"
leetcode_id = 1
body = """
- one
- two"""
"#,
        )
        .unwrap();

        assert_eq!(lesson.meta.title.as_deref(), Some("Two Sum"));
        assert_eq!(lesson.meta.leetcode_id, Some(1));
        assert_eq!(lesson.body, "- one\n- two");
    }

    #[test]
    fn metadata_is_optional() {
        let lesson = Lesson::from_toml("body = \"hi\"").unwrap();
        assert!(lesson.meta.is_empty());
    }

    #[test]
    fn body_is_required() {
        assert!(Lesson::from_toml("title = \"x\"").is_err());
    }

    #[test]
    fn into_page_passes_metadata_through() {
        let meta = LessonMeta {
            title: Some("**not bold**".into()),
            category: Some("`raw`".into()),
            leetcode_id: Some(42),
        };
        let page = Lesson::new(meta.clone(), "Hello **there**").into_page();

        assert_eq!(page.meta, meta);
        assert_eq!(
            page.document.blocks,
            vec![Block::Paragraph {
                content: vec![Span::Text("Hello ".into()), Span::Bold("there".into())]
            }]
        );
    }

    #[test]
    fn overlay_prefers_the_other_side() {
        let file = LessonMeta {
            title: Some("File".into()),
            category: Some("Graphs".into()),
            leetcode_id: None,
        };
        let flags = LessonMeta {
            title: Some("Flag".into()),
            category: None,
            leetcode_id: Some(7),
        };
        assert_eq!(
            file.overlay(flags),
            LessonMeta {
                title: Some("Flag".into()),
                category: Some("Graphs".into()),
                leetcode_id: Some(7),
            }
        );
    }

    #[test]
    fn byline() {
        let mut meta = LessonMeta::default();
        assert_eq!(meta.byline(), None);

        meta.leetcode_id = Some(1);
        assert_eq!(meta.byline().as_deref(), Some("LeetCode #1"));

        meta.category = Some("Arrays".into());
        assert_eq!(meta.byline().as_deref(), Some("Arrays · LeetCode #1"));
    }
}
