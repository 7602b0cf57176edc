//! Comment sections

use std::ops::{Deref, DerefMut};

use crate::context::ExtractorContext;
use crate::error::{ExtractionError, Result};
use crate::extractor::ListExtractor;
use crate::helper;
use crate::info::ListInfo;
use crate::items::CommentsInfoItem;
use crate::page::{InfoItemsPage, Page, ITEM_COUNT_UNKNOWN};
use crate::service::StreamingService;

pub trait CommentsExtractor: ListExtractor<Item = CommentsInfoItem> {
    fn is_comments_disabled(&self) -> Result<bool> {
        Ok(false)
    }

    fn comments_count(&self) -> Result<i64> {
        Ok(ITEM_COUNT_UNKNOWN)
    }
}

#[derive(Debug, Clone)]
pub struct CommentsInfo {
    list: ListInfo<CommentsInfoItem>,
    pub comments_disabled: bool,
    pub comments_count: i64,
}

impl CommentsInfo {
    /// `Ok(None)` when the owning service has no comments.
    pub async fn get_info(ctx: &ExtractorContext, url: &str) -> Result<Option<Self>> {
        let service = ctx.services().service_by_url(url)?;
        Self::get_info_with_service(ctx, service.as_ref(), url).await
    }

    pub async fn get_info_with_service(
        ctx: &ExtractorContext,
        service: &dyn StreamingService,
        url: &str,
    ) -> Result<Option<Self>> {
        let Some(mut extractor) = service.comments_extractor_from_url(ctx, url)? else {
            tracing::debug!(service = service.service_info().name(), "service has no comments");
            return Ok(None);
        };
        extractor.fetch_page().await?;
        Self::from_extractor(extractor.as_ref()).await.map(Some)
    }

    pub async fn from_extractor(extractor: &dyn CommentsExtractor) -> Result<Self> {
        let mut list = ListInfo::new(
            extractor.service_id(),
            extractor.link_handler(),
            extractor.name()?,
        );

        let page = helper::items_page_or_log_error(&mut list, extractor).await;
        let comments_disabled = extractor.is_comments_disabled()?;
        let (items, next_page, _) = page.into_parts();
        list.set_related_items(items);
        list.set_next_page(next_page);

        let comments_count = match extractor.comments_count() {
            Ok(count) => count,
            Err(err) => {
                list.add_error(err);
                ITEM_COUNT_UNKNOWN
            }
        };

        Ok(Self {
            list,
            comments_disabled,
            comments_count,
        })
    }

    pub async fn get_more_items(
        ctx: &ExtractorContext,
        service: &dyn StreamingService,
        url: &str,
        page: &Page,
    ) -> Result<InfoItemsPage<CommentsInfoItem>> {
        let extractor = service
            .comments_extractor_from_url(ctx, url)?
            .ok_or_else(|| ExtractionError::unsupported(format!("no comments extractor for {url}")))?;
        extractor.page(page).await
    }

    /// Next batch for an existing info, resolving its service from the context.
    pub async fn get_more_items_for(
        ctx: &ExtractorContext,
        info: &Self,
        page: &Page,
    ) -> Result<InfoItemsPage<CommentsInfoItem>> {
        let service = ctx.services().service(info.service_id())?;
        Self::get_more_items(ctx, service.as_ref(), info.url(), page).await
    }
}

impl Deref for CommentsInfo {
    type Target = ListInfo<CommentsInfoItem>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl DerefMut for CommentsInfo {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.list
    }
}
