//! Pagination tokens
//!
//! A [`Page`] is an opaque continuation descriptor. Only the extractor that
//! produced it interprets its fields; the framework merely hands it back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::collector::Collector;
use crate::error::ExtractionError;

/// Item count is not known
pub const ITEM_COUNT_UNKNOWN: i64 = -1;
/// List never ends (mixes and the like)
pub const ITEM_COUNT_INFINITE: i64 = -2;
/// More than 100 items, exact count not known
pub const ITEM_COUNT_MORE_THAN_100: i64 = -3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub url: Option<String>,
    pub id: Option<String>,
    pub ids: Option<Vec<String>>,
    pub cookies: Option<HashMap<String, String>>,
    pub body: Option<Vec<u8>>,
}

impl Page {
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ids(ids: Vec<String>) -> Self {
        Self {
            ids: Some(ids),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn cookies(mut self, cookies: HashMap<String, String>) -> Self {
        self.cookies = Some(cookies);
        self
    }

    #[must_use]
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// A page is valid iff it has a non-empty url or a non-empty id list.
    #[must_use]
    pub fn is_valid(page: Option<&Self>) -> bool {
        page.is_some_and(|page| {
            page.url.as_deref().is_some_and(|url| !url.is_empty())
                || page.ids.as_deref().is_some_and(|ids| !ids.is_empty())
        })
    }
}

/// One batch of a list: items that extracted cleanly, the errors of those
/// that did not, and where to continue.
#[derive(Debug, Clone)]
pub struct InfoItemsPage<T> {
    items: Vec<T>,
    next_page: Option<Page>,
    errors: Vec<ExtractionError>,
}

impl<T> InfoItemsPage<T> {
    pub const fn new(items: Vec<T>, next_page: Option<Page>, errors: Vec<ExtractionError>) -> Self {
        Self {
            items,
            next_page,
            errors,
        }
    }

    /// No items, no errors, no continuation.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new(), None, Vec::new())
    }

    /// Snapshot a collector's items and errors.
    pub fn from_collector<C>(collector: &C, next_page: Option<Page>) -> Self
    where
        C: Collector<Item = T> + ?Sized,
        T: Clone,
    {
        Self::new(collector.items(), next_page, collector.errors().to_vec())
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        Page::is_valid(self.next_page.as_ref())
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub const fn next_page(&self) -> Option<&Page> {
        self.next_page.as_ref()
    }

    #[must_use]
    pub fn errors(&self) -> &[ExtractionError] {
        &self.errors
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<Page>, Vec<ExtractionError>) {
        (self.items, self.next_page, self.errors)
    }
}

impl<T> Default for InfoItemsPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_validity() {
        assert!(!Page::is_valid(None));
        assert!(!Page::is_valid(Some(&Page::default())));
        assert!(!Page::is_valid(Some(&Page::with_url(""))));
        assert!(!Page::is_valid(Some(&Page::with_ids(vec![]))));
        assert!(Page::is_valid(Some(&Page::with_url("https://x/page2"))));
        assert!(Page::is_valid(Some(&Page::with_ids(vec!["a".to_string()]))));
    }

    #[test]
    fn test_id_and_body_alone_are_not_valid() {
        let page = Page::default().id("cursor").body(b"{}".to_vec());
        assert!(!Page::is_valid(Some(&page)));
    }

    #[test]
    fn test_fields_combine() {
        let mut cookies = HashMap::new();
        cookies.insert("session".to_string(), "1".to_string());
        let page = Page::with_ids(vec!["1".to_string(), "2".to_string()]).cookies(cookies);

        assert!(Page::is_valid(Some(&page)));
        assert_eq!(page.cookies.as_ref().map(HashMap::len), Some(1));
    }

    #[test]
    fn test_items_page_has_next_page() {
        let page: InfoItemsPage<u8> = InfoItemsPage::new(vec![1], Some(Page::with_url("")), vec![]);
        assert!(!page.has_next_page());

        let page: InfoItemsPage<u8> =
            InfoItemsPage::new(vec![1], Some(Page::with_url("https://x/page2")), vec![]);
        assert!(page.has_next_page());
        assert_eq!(page.next_page().and_then(|p| p.url.as_deref()), Some("https://x/page2"));
    }

    #[test]
    fn test_empty() {
        let page: InfoItemsPage<String> = InfoItemsPage::empty();
        assert!(page.items().is_empty());
        assert!(page.errors().is_empty());
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_serde_round_trip_keeps_opaque_fields() {
        let page = Page::with_url("https://x/api?page=2").id("tok").body(vec![1, 2, 3]);
        let json = serde_json::to_string(&page).unwrap();
        let back: Page = serde_json::from_str(&json).unwrap();
        assert_eq!(back, page);
    }
}
