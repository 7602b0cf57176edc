//! Search and query suggestions

use std::ops::{Deref, DerefMut};

use async_trait::async_trait;

use crate::collector::ErrorSink;
use crate::context::ExtractorContext;
use crate::description::MetaInfo;
use crate::error::Result;
use crate::extractor::ListExtractor;
use crate::helper;
use crate::info::ListInfo;
use crate::items::MultiInfoItem;
use crate::link_handler::SearchQueryHandler;
use crate::page::{InfoItemsPage, Page};
use crate::service::{ServiceId, StreamingService};

/// Lists search results. The extractor's handler id is the search string.
pub trait SearchExtractor: ListExtractor<Item = MultiInfoItem> {
    fn search_string(&self) -> &str {
        self.id()
    }

    /// "Did you mean" text, empty when the service offers none.
    fn search_suggestion(&self) -> Result<String>;

    /// Whether the service searched for the suggestion instead of the query.
    fn is_corrected_search(&self) -> Result<bool>;

    fn meta_info(&self) -> Result<Vec<MetaInfo>>;
}

/// Completes partial queries.
#[async_trait]
pub trait SuggestionExtractor: Send + Sync {
    fn service_id(&self) -> ServiceId;

    async fn suggestion_list(&self, query: &str) -> Result<Vec<String>>;
}

#[derive(Debug, Clone)]
pub struct SearchInfo {
    list: ListInfo<MultiInfoItem>,
    search_string: String,
    pub search_suggestion: Option<String>,
    pub corrected_search: bool,
    pub meta_info: Vec<MetaInfo>,
}

impl SearchInfo {
    pub async fn get_info(
        ctx: &ExtractorContext,
        service: &dyn StreamingService,
        query: SearchQueryHandler,
    ) -> Result<Self> {
        let mut extractor = service.search_extractor(ctx, query)?;
        extractor.fetch_page().await?;
        Ok(Self::from_extractor(extractor.as_ref()).await)
    }

    pub async fn from_extractor(extractor: &dyn SearchExtractor) -> Self {
        let mut list = ListInfo::new(extractor.service_id(), extractor.link_handler(), "Search");
        list.set_original_url(extractor.original_url());

        let mut sink = ErrorSink::new(list.errors_mut());
        let search_suggestion = sink.try_get("search_suggestion", || extractor.search_suggestion());
        let corrected_search = sink
            .try_get("corrected_search", || extractor.is_corrected_search())
            .unwrap_or(false);
        let meta_info = sink
            .try_get("meta_info", || extractor.meta_info())
            .unwrap_or_default();

        let page = helper::items_page_or_log_error(&mut list, extractor).await;
        let (items, next_page, _) = page.into_parts();
        list.set_related_items(items);
        list.set_next_page(next_page);

        Self {
            list,
            search_string: extractor.search_string().to_string(),
            search_suggestion,
            corrected_search,
            meta_info,
        }
    }

    pub async fn get_more_items(
        ctx: &ExtractorContext,
        service: &dyn StreamingService,
        query: SearchQueryHandler,
        page: &Page,
    ) -> Result<InfoItemsPage<MultiInfoItem>> {
        service.search_extractor(ctx, query)?.page(page).await
    }

    #[must_use]
    pub fn search_string(&self) -> &str {
        &self.search_string
    }
}

impl Deref for SearchInfo {
    type Target = ListInfo<MultiInfoItem>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl DerefMut for SearchInfo {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.list
    }
}

/// Suggestions for `query` from `service`.
pub async fn suggestions(
    ctx: &ExtractorContext,
    service: &dyn StreamingService,
    query: &str,
) -> Result<Vec<String>> {
    service.suggestion_extractor(ctx)?.suggestion_list(query).await
}
