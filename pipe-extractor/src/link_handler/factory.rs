use super::{LinkHandler, ListLinkHandler, SearchQueryHandler};
use crate::error::{ExtractionError, Result};
use crate::utils;

/// Recognizes a service's URLs and converts between URL and id.
///
/// Implementors provide `id`, `url` and `on_accept_url`; everything else is
/// derived. `url`/`url_with_base` must depend on the id (and base URL) only,
/// so that `id(url(id)) == id` holds.
pub trait LinkHandlerFactory: Send + Sync {
    /// Extract the canonical id from an accepted URL.
    fn id(&self, url: &str) -> Result<String>;

    /// Canonical URL for `id` on the service's default host.
    fn url(&self, id: &str) -> Result<String>;

    /// Canonical URL for `id` on `base_url`. Single-host services ignore the base.
    fn url_with_base(&self, id: &str, _base_url: &str) -> Result<String> {
        self.url(id)
    }

    /// Whether the URL belongs to this factory.
    fn on_accept_url(&self, url: &str) -> Result<bool>;

    fn accept_url(&self, url: &str) -> Result<bool> {
        self.on_accept_url(url)
    }

    /// Resolve a raw URL, unwrapping search-engine redirects first.
    fn from_url(&self, url: &str) -> Result<LinkHandler> {
        if url.is_empty() {
            return Err(ExtractionError::InvalidArgument(
                "url may not be empty".to_string(),
            ));
        }
        let polished = utils::follow_google_redirect_if_needed(url);
        let base_url = utils::base_url(&polished)?;
        self.from_url_with_base(&polished, &base_url)
    }

    fn from_url_with_base(&self, url: &str, base_url: &str) -> Result<LinkHandler> {
        if !self.accept_url(url)? {
            return Err(ExtractionError::UrlNotAccepted(url.to_string()));
        }
        let id = self.id(url)?;
        let canonical = self.url_with_base(&id, base_url)?;
        Ok(LinkHandler::new(url, canonical, id))
    }

    fn from_id(&self, id: &str) -> Result<LinkHandler> {
        let url = self.url(id)?;
        Ok(LinkHandler::new(url.clone(), url, id))
    }

    fn from_id_with_base(&self, id: &str, base_url: &str) -> Result<LinkHandler> {
        let url = self.url_with_base(id, base_url)?;
        Ok(LinkHandler::new(url.clone(), url, id))
    }
}

/// Link handler factory for list-like resources (channels, playlists, tabs, kiosks).
///
/// `url`/`url_with_base` of a list factory should equal `list_url` with no
/// filters.
pub trait ListLinkHandlerFactory: LinkHandlerFactory {
    fn list_url(&self, id: &str, content_filters: &[String], sort_filter: &str) -> Result<String>;

    fn list_url_with_base(
        &self,
        id: &str,
        content_filters: &[String],
        sort_filter: &str,
        _base_url: &str,
    ) -> Result<String> {
        self.list_url(id, content_filters, sort_filter)
    }

    fn from_list_url(&self, url: &str) -> Result<ListLinkHandler> {
        self.from_url(url).map(ListLinkHandler::from)
    }

    fn from_list_url_with_base(&self, url: &str, base_url: &str) -> Result<ListLinkHandler> {
        self.from_url_with_base(url, base_url).map(ListLinkHandler::from)
    }

    fn from_list_id(&self, id: &str) -> Result<ListLinkHandler> {
        self.from_query(id, &[], "")
    }

    /// Entry point for search and tabbed views.
    fn from_query(
        &self,
        id: &str,
        content_filters: &[String],
        sort_filter: &str,
    ) -> Result<ListLinkHandler> {
        let url = self.list_url(id, content_filters, sort_filter)?;
        Ok(ListLinkHandler::new(
            url.clone(),
            url,
            id,
            content_filters.to_vec(),
            sort_filter,
        ))
    }

    fn from_query_with_base(
        &self,
        id: &str,
        content_filters: &[String],
        sort_filter: &str,
        base_url: &str,
    ) -> Result<ListLinkHandler> {
        let url = self.list_url_with_base(id, content_filters, sort_filter, base_url)?;
        Ok(ListLinkHandler::new(
            url.clone(),
            url,
            id,
            content_filters.to_vec(),
            sort_filter,
        ))
    }

    fn available_content_filters(&self) -> Vec<String> {
        Vec::new()
    }

    fn available_sort_filters(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Builds search handlers; `list_url` produces the search URL for a query.
pub trait SearchQueryHandlerFactory: ListLinkHandlerFactory {
    fn from_search_query(
        &self,
        query: &str,
        content_filters: &[String],
        sort_filter: &str,
    ) -> Result<SearchQueryHandler> {
        self.from_query(query, content_filters, sort_filter)
            .map(SearchQueryHandler::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::FakeLinkHandlerFactory;

    #[test]
    fn test_from_url_canonicalizes() {
        let factory = FakeLinkHandlerFactory::stream();
        let a = factory.from_url("https://m.fake.tv/watch/abc?t=10").unwrap();
        let b = factory.from_url("https://fake.tv/watch/abc/").unwrap();

        assert_eq!(a.url(), "https://fake.tv/watch/abc");
        assert_eq!(a.url(), b.url());
        assert_eq!(a.id(), "abc");
        assert_eq!(a.original_url(), "https://m.fake.tv/watch/abc?t=10");
    }

    #[test]
    fn test_round_trip() {
        let factory = FakeLinkHandlerFactory::stream();
        for id in ["abc", "A1_b-2", "x"] {
            let url = factory.url_with_base(id, "https://fake.tv").unwrap();
            assert_eq!(factory.id(&url).unwrap(), id);
        }
    }

    #[test]
    fn test_canonical_url_is_fixed_point() {
        let factory = FakeLinkHandlerFactory::stream();
        for url in [
            "https://fake.tv/watch/abc",
            "https://m.fake.tv/watch/abc?list=1",
            "https://www.google.com/url?q=x&url=https%3A%2F%2Ffake.tv%2Fwatch%2Fzz",
        ] {
            let canonical = factory.from_url(url).unwrap();
            assert!(factory.accept_url(canonical.url()).unwrap());
        }
    }

    #[test]
    fn test_google_redirect_unwrapped() {
        let handler = FakeLinkHandlerFactory::stream()
            .from_url("https://www.google.com/url?sa=t&url=https%3A%2F%2Ffake.tv%2Fwatch%2Fzz&usg=1")
            .unwrap();

        assert_eq!(handler.id(), "zz");
        assert_eq!(handler.original_url(), "https://fake.tv/watch/zz");
    }

    #[test]
    fn test_rejected_url() {
        let err = FakeLinkHandlerFactory::stream()
            .from_url("https://fake.tv/channel/abc")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UrlNotAccepted(_)));
        assert!(err.is_identity());

        assert!(FakeLinkHandlerFactory::stream().from_url("").is_err());
        assert!(FakeLinkHandlerFactory::stream().from_url("watch/abc").is_err());
    }

    #[test]
    fn test_from_id() {
        let handler = FakeLinkHandlerFactory::stream().from_id("abc").unwrap();
        assert_eq!(handler.url(), "https://fake.tv/watch/abc");
        assert_eq!(handler.original_url(), handler.url());
    }

    #[test]
    fn test_list_from_query_keeps_filters() {
        let factory = FakeLinkHandlerFactory::channel();
        let handler = factory
            .from_query("chan", &["videos".to_string()], "newest")
            .unwrap();

        assert_eq!(handler.url(), "https://fake.tv/channel/chan/videos?sort=newest");
        assert_eq!(handler.content_filters(), ["videos".to_string()]);
        assert_eq!(handler.sort_filter(), "newest");
        assert_eq!(factory.id(handler.url()).unwrap(), "chan");
    }

    #[test]
    fn test_list_from_url_has_no_filters() {
        let handler = FakeLinkHandlerFactory::channel()
            .from_list_url("https://fake.tv/channel/chan/videos?sort=newest")
            .unwrap();

        assert_eq!(handler.url(), "https://fake.tv/channel/chan");
        assert!(handler.content_filters().is_empty());
    }
}
