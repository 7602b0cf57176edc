//! Playlists

use std::ops::{Deref, DerefMut};

use crate::collector::ErrorSink;
use crate::context::ExtractorContext;
use crate::description::Description;
use crate::error::{ExtractionError, Result};
use crate::extractor::{Extractor, ListExtractor};
use crate::helper;
use crate::image::Image;
use crate::info::ListInfo;
use crate::items::{PlaylistType, StreamInfoItem};
use crate::page::{InfoItemsPage, Page, ITEM_COUNT_UNKNOWN};
use crate::service::StreamingService;

/// Number of failed uploader fields from which the failures count as errors.
/// Fewer failures are taken to mean the playlist simply has no uploader.
pub const UPLOADER_ERROR_THRESHOLD: usize = 3;

pub trait PlaylistExtractor: ListExtractor<Item = StreamInfoItem> {
    fn thumbnails(&self) -> Result<Vec<Image>>;

    fn banners(&self) -> Result<Vec<Image>> {
        Ok(Vec::new())
    }

    fn uploader_url(&self) -> Result<String>;

    fn uploader_name(&self) -> Result<String>;

    fn uploader_avatars(&self) -> Result<Vec<Image>>;

    fn stream_count(&self) -> Result<i64>;

    fn description(&self) -> Result<Description>;

    fn sub_channel_url(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn sub_channel_name(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn sub_channel_avatars(&self) -> Result<Vec<Image>> {
        Ok(Vec::new())
    }

    fn playlist_type(&self) -> Result<PlaylistType> {
        Ok(PlaylistType::Normal)
    }
}

#[derive(Debug, Clone)]
pub struct PlaylistInfo {
    list: ListInfo<StreamInfoItem>,
    pub thumbnails: Vec<Image>,
    pub banners: Vec<Image>,
    pub uploader_url: Option<String>,
    pub uploader_name: Option<String>,
    pub uploader_avatars: Vec<Image>,
    pub sub_channel_url: Option<String>,
    pub sub_channel_name: Option<String>,
    pub sub_channel_avatars: Vec<Image>,
    pub stream_count: i64,
    pub description: Description,
    pub playlist_type: PlaylistType,
}

impl PlaylistInfo {
    fn new(list: ListInfo<StreamInfoItem>) -> Self {
        Self {
            list,
            thumbnails: Vec::new(),
            banners: Vec::new(),
            uploader_url: None,
            uploader_name: None,
            uploader_avatars: Vec::new(),
            sub_channel_url: None,
            sub_channel_name: None,
            sub_channel_avatars: Vec::new(),
            stream_count: ITEM_COUNT_UNKNOWN,
            description: Description::EMPTY,
            playlist_type: PlaylistType::Normal,
        }
    }

    pub async fn get_info(ctx: &ExtractorContext, url: &str) -> Result<Self> {
        let service = ctx.services().service_by_url(url)?;
        Self::get_info_with_service(ctx, service.as_ref(), url).await
    }

    pub async fn get_info_with_service(
        ctx: &ExtractorContext,
        service: &dyn StreamingService,
        url: &str,
    ) -> Result<Self> {
        let mut extractor = service.playlist_extractor_from_url(ctx, url)?;
        extractor.fetch_page().await?;
        Self::from_extractor(extractor.as_ref()).await
    }

    pub async fn from_extractor(extractor: &dyn PlaylistExtractor) -> Result<Self> {
        let mut info = Self::new(ListInfo::new(
            extractor.service_id(),
            extractor.link_handler(),
            extractor.name()?,
        ));
        info.list.set_original_url(extractor.original_url());

        let mut sink = ErrorSink::new(info.list.errors_mut());
        sink.try_set(&mut info.stream_count, "stream_count", || extractor.stream_count());
        sink.try_set(&mut info.description, "description", || extractor.description());
        sink.try_set(&mut info.thumbnails, "thumbnails", || extractor.thumbnails());
        sink.try_set(&mut info.banners, "banners", || extractor.banners());
        sink.try_set(&mut info.playlist_type, "playlist_type", || extractor.playlist_type());

        // Uploader fields are held back until we know whether the playlist
        // has an uploader at all.
        let mut uploader_errors = Vec::new();
        let mut uploader = ErrorSink::new(&mut uploader_errors);
        info.uploader_url = uploader.try_get("uploader_url", || extractor.uploader_url());
        info.uploader_name = uploader.try_get("uploader_name", || extractor.uploader_name());
        uploader.try_set(&mut info.uploader_avatars, "uploader_avatars", || {
            extractor.uploader_avatars()
        });
        info.sub_channel_url = uploader
            .try_get("sub_channel_url", || extractor.sub_channel_url())
            .flatten();
        info.sub_channel_name = uploader
            .try_get("sub_channel_name", || extractor.sub_channel_name())
            .flatten();
        uploader.try_set(&mut info.sub_channel_avatars, "sub_channel_avatars", || {
            extractor.sub_channel_avatars()
        });
        record_uploader_errors(info.list.errors_mut(), uploader_errors);

        let page = helper::items_page_or_log_error(&mut info.list, extractor).await;
        let (items, next_page, _) = page.into_parts();
        info.list.set_related_items(items);
        info.list.set_next_page(next_page);

        Ok(info)
    }

    pub async fn get_more_items(
        ctx: &ExtractorContext,
        service: &dyn StreamingService,
        url: &str,
        page: &Page,
    ) -> Result<InfoItemsPage<StreamInfoItem>> {
        service
            .playlist_extractor_from_url(ctx, url)?
            .page(page)
            .await
    }
}

/// Uploader failures count once the playlist is already broken elsewhere, or
/// when enough of them failed together.
fn record_uploader_errors(errors: &mut Vec<ExtractionError>, uploader_errors: Vec<ExtractionError>) {
    if uploader_errors.is_empty() {
        return;
    }
    if !errors.is_empty() || uploader_errors.len() >= UPLOADER_ERROR_THRESHOLD {
        errors.extend(uploader_errors);
    } else {
        tracing::debug!(
            count = uploader_errors.len(),
            "treating playlist as having no uploader"
        );
    }
}

impl Deref for PlaylistInfo {
    type Target = ListInfo<StreamInfoItem>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl DerefMut for PlaylistInfo {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.list
    }
}
