use serde::{Deserialize, Serialize};
use url::Url;

/// Markup of a [`Description`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionKind {
    Html,
    Markdown,
    PlainText,
}

/// Long-form text with its markup kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Description {
    pub content: String,
    pub kind: DescriptionKind,
}

impl Description {
    pub const EMPTY: Self = Self {
        content: String::new(),
        kind: DescriptionKind::PlainText,
    };

    pub fn new(content: impl Into<String>, kind: DescriptionKind) -> Self {
        Self {
            content: content.into(),
            kind,
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(content, DescriptionKind::PlainText)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl Default for Description {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Informational box a service shows next to results (fact checks, notices).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaInfo {
    pub title: String,
    pub content: Option<Description>,
    pub urls: Vec<Url>,
    pub url_texts: Vec<String>,
}

impl MetaInfo {
    pub fn new(title: impl Into<String>, content: Option<Description>) -> Self {
        Self {
            title: title.into(),
            content,
            ..Self::default()
        }
    }

    /// Add a link together with its display text.
    pub fn add_link(&mut self, url: Url, text: impl Into<String>) {
        self.urls.push(url);
        self.url_texts.push(text.into());
    }
}
