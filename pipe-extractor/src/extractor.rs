//! Extractor base contract
//!
//! An extractor is created unfetched, downloads its page exactly once in
//! [`Extractor::fetch_page`], and then answers field accessors from what it
//! fetched. Identity accessors work in either state.

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::ExtractorContext;
use crate::downloader::Downloader;
use crate::error::Result;
use crate::link_handler::ListLinkHandler;
use crate::localization::{time_ago_parser_for, ContentCountry, Localization, TimeAgoParser};
use crate::page::{InfoItemsPage, Page};
use crate::service::{ServiceId, StreamingService};

/// State every extractor carries.
pub struct ExtractorBase {
    service_id: ServiceId,
    link_handler: ListLinkHandler,
    downloader: Arc<dyn Downloader>,
    localization: Localization,
    content_country: ContentCountry,
    forced_localization: Option<Localization>,
    forced_content_country: Option<ContentCountry>,
    page_fetched: bool,
}

impl ExtractorBase {
    /// Negotiates the context's preferred localization and country with `service`.
    pub fn new(
        service: &dyn StreamingService,
        ctx: &ExtractorContext,
        link_handler: impl Into<ListLinkHandler>,
    ) -> Self {
        Self {
            service_id: service.service_id(),
            link_handler: link_handler.into(),
            downloader: Arc::clone(ctx.downloader()),
            localization: service.localization(ctx.localization()),
            content_country: service.content_country(ctx.content_country()),
            forced_localization: None,
            forced_content_country: None,
            page_fetched: false,
        }
    }

    #[must_use]
    pub const fn link_handler(&self) -> &ListLinkHandler {
        &self.link_handler
    }
}

impl std::fmt::Debug for ExtractorBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorBase")
            .field("service_id", &self.service_id)
            .field("url", &self.link_handler.url())
            .field("page_fetched", &self.page_fetched)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait Extractor: Send + Sync {
    fn base(&self) -> &ExtractorBase;

    fn base_mut(&mut self) -> &mut ExtractorBase;

    /// Download and parse the page. Transport errors are returned as they are;
    /// malformed responses become parsing errors.
    async fn on_fetch_page(&mut self, downloader: &dyn Downloader) -> Result<()>;

    fn name(&self) -> Result<String>;

    /// Fetch the page once; later calls do nothing.
    async fn fetch_page(&mut self) -> Result<()> {
        if self.base().page_fetched {
            return Ok(());
        }
        let downloader = Arc::clone(&self.base().downloader);
        tracing::debug!(url = self.url(), "fetching page");
        self.on_fetch_page(downloader.as_ref()).await?;
        self.base_mut().page_fetched = true;
        Ok(())
    }

    fn is_page_fetched(&self) -> bool {
        self.base().page_fetched
    }

    /// # Panics
    ///
    /// Panics if the page has not been fetched yet.
    fn assert_page_fetched(&self) {
        assert!(self.base().page_fetched, "page is not fetched, call fetch_page() first");
    }

    fn link_handler(&self) -> &ListLinkHandler {
        &self.base().link_handler
    }

    fn id(&self) -> &str {
        self.base().link_handler.id()
    }

    fn url(&self) -> &str {
        self.base().link_handler.url()
    }

    fn original_url(&self) -> &str {
        self.base().link_handler.original_url()
    }

    fn base_url(&self) -> Result<String> {
        self.base().link_handler.base_url()
    }

    fn service_id(&self) -> ServiceId {
        self.base().service_id
    }

    fn downloader(&self) -> &dyn Downloader {
        self.base().downloader.as_ref()
    }

    fn force_localization(&mut self, localization: Localization) {
        self.base_mut().forced_localization = Some(localization);
    }

    fn force_content_country(&mut self, content_country: ContentCountry) {
        self.base_mut().forced_content_country = Some(content_country);
    }

    /// Forced localization if any, otherwise the negotiated one.
    fn extractor_localization(&self) -> &Localization {
        let base = self.base();
        base.forced_localization.as_ref().unwrap_or(&base.localization)
    }

    fn extractor_content_country(&self) -> &ContentCountry {
        let base = self.base();
        base.forced_content_country
            .as_ref()
            .unwrap_or(&base.content_country)
    }

    fn time_ago_parser(&self) -> Result<TimeAgoParser> {
        time_ago_parser_for(self.extractor_localization())
    }
}

/// An extractor whose content is a paginated list.
#[async_trait]
pub trait ListExtractor: Extractor {
    type Item: Send;

    /// First batch; requires a fetched page.
    async fn initial_page(&self) -> Result<InfoItemsPage<Self::Item>>;

    /// Batch for a continuation previously returned by this extractor.
    async fn page(&self, page: &Page) -> Result<InfoItemsPage<Self::Item>>;
}
