//! Aggregate base types
//!
//! An info is built in two phases: identity first (any failure aborts), then
//! every optional field on its own, with failures collected in
//! [`Info::errors`].

use std::ops::{Deref, DerefMut};

use crate::error::ExtractionError;
use crate::link_handler::{LinkHandler, ListLinkHandler};
use crate::page::Page;
use crate::service::ServiceId;

#[derive(Debug, Clone)]
pub struct Info {
    service_id: ServiceId,
    id: String,
    url: String,
    original_url: String,
    name: String,
    errors: Vec<ExtractionError>,
}

impl Info {
    pub fn new(
        service_id: ServiceId,
        id: impl Into<String>,
        url: impl Into<String>,
        original_url: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            service_id,
            id: id.into(),
            url: url.into(),
            original_url: original_url.into(),
            name: name.into(),
            errors: Vec::new(),
        }
    }

    pub fn from_link_handler(
        service_id: ServiceId,
        handler: &LinkHandler,
        name: impl Into<String>,
    ) -> Self {
        Self::new(
            service_id,
            handler.id(),
            handler.url(),
            handler.original_url(),
            name,
        )
    }

    #[must_use]
    pub const fn service_id(&self) -> ServiceId {
        self.service_id
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    pub fn set_original_url(&mut self, original_url: impl Into<String>) {
        self.original_url = original_url.into();
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn errors(&self) -> &[ExtractionError] {
        &self.errors
    }

    /// Mutable error list, for [`crate::collector::ErrorSink`].
    pub fn errors_mut(&mut self) -> &mut Vec<ExtractionError> {
        &mut self.errors
    }

    pub fn add_error(&mut self, err: ExtractionError) {
        self.errors.push(err);
    }

    pub fn add_all_errors(&mut self, errors: impl IntoIterator<Item = ExtractionError>) {
        self.errors.extend(errors);
    }
}

impl std::fmt::Display for Info {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[url=\"{}\"", self.url)?;
        if self.url != self.original_url {
            write!(f, " (original_url=\"{}\")", self.original_url)?;
        }
        write!(f, ", name=\"{}\"]", self.name)
    }
}

/// An info whose content is a paginated list.
#[derive(Debug, Clone)]
pub struct ListInfo<T> {
    info: Info,
    related_items: Vec<T>,
    next_page: Option<Page>,
    content_filters: Vec<String>,
    sort_filter: String,
}

impl<T> ListInfo<T> {
    pub fn new(service_id: ServiceId, handler: &ListLinkHandler, name: impl Into<String>) -> Self {
        Self::from_info(
            Info::from_link_handler(service_id, handler.link_handler(), name),
            handler.content_filters().to_vec(),
            handler.sort_filter(),
        )
    }

    pub fn from_info(info: Info, content_filters: Vec<String>, sort_filter: impl Into<String>) -> Self {
        Self {
            info,
            related_items: Vec::new(),
            next_page: None,
            content_filters,
            sort_filter: sort_filter.into(),
        }
    }

    #[must_use]
    pub fn related_items(&self) -> &[T] {
        &self.related_items
    }

    pub fn set_related_items(&mut self, items: Vec<T>) {
        self.related_items = items;
    }

    #[must_use]
    pub const fn next_page(&self) -> Option<&Page> {
        self.next_page.as_ref()
    }

    pub fn set_next_page(&mut self, page: Option<Page>) {
        self.next_page = page;
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        Page::is_valid(self.next_page.as_ref())
    }

    #[must_use]
    pub fn content_filters(&self) -> &[String] {
        &self.content_filters
    }

    #[must_use]
    pub fn sort_filter(&self) -> &str {
        &self.sort_filter
    }

    pub fn into_related_items(self) -> Vec<T> {
        self.related_items
    }
}

impl<T> Deref for ListInfo<T> {
    type Target = Info;

    fn deref(&self) -> &Info {
        &self.info
    }
}

impl<T> DerefMut for ListInfo<T> {
    fn deref_mut(&mut self) -> &mut Info {
        &mut self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_display() {
        let info = Info::new(0, "x", "https://a.org/x", "https://a.org/x", "X");
        assert_eq!(info.to_string(), "[url=\"https://a.org/x\", name=\"X\"]");

        let info = Info::new(0, "x", "https://a.org/x", "https://m.a.org/x", "X");
        assert!(info.to_string().contains("original_url=\"https://m.a.org/x\""));
    }

    #[test]
    fn test_list_info_from_handler() {
        let handler = ListLinkHandler::new(
            "https://a.org/c/x/videos",
            "https://a.org/c/x/videos",
            "x",
            vec!["videos".to_string()],
            "new",
        );
        let mut info: ListInfo<u8> = ListInfo::new(4, &handler, "X");

        assert_eq!(info.id(), "x");
        assert_eq!(info.service_id(), 4);
        assert_eq!(info.content_filters(), ["videos".to_string()]);
        assert_eq!(info.sort_filter(), "new");
        assert!(!info.has_next_page());

        info.set_next_page(Some(Page::with_url("https://a.org/c/x/videos?p=2")));
        info.add_error(ExtractionError::parsing("bad"));
        assert!(info.has_next_page());
        assert_eq!(info.errors().len(), 1);
    }
}
