//! Canonical identity of a resource on a service
//!
//! A [`LinkHandler`] pairs the URL a caller supplied with the canonical URL and
//! id a service derived from it. List handlers add content and sort filters;
//! search handlers use the query string as their id.

mod factory;

pub use factory::{LinkHandlerFactory, ListLinkHandlerFactory, SearchQueryHandlerFactory};

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkHandler {
    original_url: String,
    url: String,
    id: String,
}

impl LinkHandler {
    pub fn new(
        original_url: impl Into<String>,
        url: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            original_url: original_url.into(),
            url: url.into(),
            id: id.into(),
        }
    }

    /// URL as supplied by the caller (after redirect unwrapping).
    #[must_use]
    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    /// Canonical URL, derived from the id.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn base_url(&self) -> Result<String> {
        utils::base_url(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListLinkHandler {
    #[serde(flatten)]
    handler: LinkHandler,
    content_filters: Vec<String>,
    sort_filter: String,
}

impl ListLinkHandler {
    pub fn new(
        original_url: impl Into<String>,
        url: impl Into<String>,
        id: impl Into<String>,
        content_filters: Vec<String>,
        sort_filter: impl Into<String>,
    ) -> Self {
        Self {
            handler: LinkHandler::new(original_url, url, id),
            content_filters,
            sort_filter: sort_filter.into(),
        }
    }

    #[must_use]
    pub fn original_url(&self) -> &str {
        self.handler.original_url()
    }

    #[must_use]
    pub fn url(&self) -> &str {
        self.handler.url()
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.handler.id()
    }

    pub fn base_url(&self) -> Result<String> {
        self.handler.base_url()
    }

    #[must_use]
    pub fn content_filters(&self) -> &[String] {
        &self.content_filters
    }

    #[must_use]
    pub fn sort_filter(&self) -> &str {
        &self.sort_filter
    }

    #[must_use]
    pub const fn link_handler(&self) -> &LinkHandler {
        &self.handler
    }
}

impl From<LinkHandler> for ListLinkHandler {
    fn from(handler: LinkHandler) -> Self {
        Self {
            handler,
            content_filters: Vec::new(),
            sort_filter: String::new(),
        }
    }
}

/// List handler whose id is the search string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQueryHandler(ListLinkHandler);

impl SearchQueryHandler {
    #[must_use]
    pub fn search_string(&self) -> &str {
        self.0.id()
    }

    #[must_use]
    pub fn into_list_handler(self) -> ListLinkHandler {
        self.0
    }
}

impl From<ListLinkHandler> for SearchQueryHandler {
    fn from(handler: ListLinkHandler) -> Self {
        Self(handler)
    }
}

impl Deref for SearchQueryHandler {
    type Target = ListLinkHandler;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
