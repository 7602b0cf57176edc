//! Lightweight channel feeds

use std::ops::{Deref, DerefMut};

use crate::context::ExtractorContext;
use crate::error::{ExtractionError, Result};
use crate::extractor::ListExtractor;
use crate::helper;
use crate::info::ListInfo;
use crate::items::StreamInfoItem;
use crate::page::{InfoItemsPage, Page};
use crate::service::StreamingService;

/// Recent uploads of a channel, usually from an RSS/Atom endpoint.
pub trait FeedExtractor: ListExtractor<Item = StreamInfoItem> {}

#[derive(Debug, Clone)]
pub struct FeedInfo {
    list: ListInfo<StreamInfoItem>,
}

impl FeedInfo {
    pub async fn get_info(ctx: &ExtractorContext, url: &str) -> Result<Self> {
        let service = ctx.services().service_by_url(url)?;
        Self::get_info_with_service(ctx, service.as_ref(), url).await
    }

    /// Fails with [`ExtractionError::Unsupported`] when the service has no
    /// dedicated feed; callers fall back to the channel itself.
    pub async fn get_info_with_service(
        ctx: &ExtractorContext,
        service: &dyn StreamingService,
        url: &str,
    ) -> Result<Self> {
        let mut extractor = feed_extractor(ctx, service, url)?;
        extractor.fetch_page().await?;
        Self::from_extractor(extractor.as_ref()).await
    }

    pub async fn from_extractor(extractor: &dyn FeedExtractor) -> Result<Self> {
        let mut list = ListInfo::new(
            extractor.service_id(),
            extractor.link_handler(),
            extractor.name()?,
        );
        list.set_original_url(extractor.original_url());

        let page = helper::items_page_or_log_error(&mut list, extractor).await;
        let (items, next_page, _) = page.into_parts();
        list.set_related_items(items);
        list.set_next_page(next_page);

        Ok(Self { list })
    }

    pub async fn get_more_items(
        ctx: &ExtractorContext,
        service: &dyn StreamingService,
        url: &str,
        page: &Page,
    ) -> Result<InfoItemsPage<StreamInfoItem>> {
        feed_extractor(ctx, service, url)?.page(page).await
    }
}

fn feed_extractor(
    ctx: &ExtractorContext,
    service: &dyn StreamingService,
    url: &str,
) -> Result<Box<dyn FeedExtractor>> {
    service.feed_extractor(ctx, url)?.ok_or_else(|| {
        ExtractionError::unsupported(format!(
            "{} has no feed for {url}",
            service.service_info().name()
        ))
    })
}

impl Deref for FeedInfo {
    type Target = ListInfo<StreamInfoItem>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl DerefMut for FeedInfo {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.list
    }
}
