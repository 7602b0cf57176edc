//! Channels and their tabs

mod tab;

pub use tab::{
    ChannelTab, ChannelTabExtractor, ChannelTabExtractorBuilder, ChannelTabInfo, ChannelTabs,
    ReadyChannelTabListLinkHandler,
};

use std::ops::{Deref, DerefMut};

use crate::collector::ErrorSink;
use crate::context::ExtractorContext;
use crate::error::Result;
use crate::extractor::Extractor;
use crate::image::Image;
use crate::info::Info;
use crate::service::StreamingService;

pub const UNKNOWN_SUBSCRIBER_COUNT: i64 = -1;

pub trait ChannelExtractor: Extractor {
    fn avatars(&self) -> Result<Vec<Image>>;

    fn banners(&self) -> Result<Vec<Image>>;

    fn feed_url(&self) -> Result<Option<String>>;

    fn subscriber_count(&self) -> Result<i64>;

    fn description(&self) -> Result<Option<String>>;

    fn parent_channel_name(&self) -> Result<Option<String>>;

    fn parent_channel_url(&self) -> Result<Option<String>>;

    fn parent_channel_avatars(&self) -> Result<Vec<Image>>;

    fn is_verified(&self) -> Result<bool>;

    fn tabs(&self) -> Result<Vec<ChannelTab>>;

    fn tags(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Clone)]
pub struct ChannelInfo {
    info: Info,
    pub avatars: Vec<Image>,
    pub banners: Vec<Image>,
    pub feed_url: Option<String>,
    pub subscriber_count: i64,
    pub description: Option<String>,
    pub parent_channel_name: Option<String>,
    pub parent_channel_url: Option<String>,
    pub parent_channel_avatars: Vec<Image>,
    pub verified: bool,
    pub tabs: Vec<ChannelTab>,
    pub tags: Vec<String>,
}

impl ChannelInfo {
    fn new(info: Info) -> Self {
        Self {
            info,
            avatars: Vec::new(),
            banners: Vec::new(),
            feed_url: None,
            subscriber_count: UNKNOWN_SUBSCRIBER_COUNT,
            description: None,
            parent_channel_name: None,
            parent_channel_url: None,
            parent_channel_avatars: Vec::new(),
            verified: false,
            tabs: Vec::new(),
            tags: Vec::new(),
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
        let mut extractor = service.channel_extractor_from_url(ctx, url)?;
        extractor.fetch_page().await?;
        Self::from_extractor(extractor.as_ref())
    }

    /// Assemble from a fetched extractor. Only the name is required.
    pub fn from_extractor(extractor: &dyn ChannelExtractor) -> Result<Self> {
        let mut info = Self::new(Info::new(
            extractor.service_id(),
            extractor.id(),
            extractor.url(),
            extractor.original_url(),
            extractor.name()?,
        ));

        let mut sink = ErrorSink::new(info.info.errors_mut());
        let mut avatars = Vec::new();
        sink.try_set(&mut avatars, "avatars", || extractor.avatars());
        let mut banners = Vec::new();
        sink.try_set(&mut banners, "banners", || extractor.banners());
        let feed_url = sink.try_get("feed_url", || extractor.feed_url()).flatten();
        let mut subscriber_count = UNKNOWN_SUBSCRIBER_COUNT;
        sink.try_set(&mut subscriber_count, "subscriber_count", || {
            extractor.subscriber_count()
        });
        let description = sink
            .try_get("description", || extractor.description())
            .flatten();
        let parent_channel_name = sink
            .try_get("parent_channel_name", || extractor.parent_channel_name())
            .flatten();
        let parent_channel_url = sink
            .try_get("parent_channel_url", || extractor.parent_channel_url())
            .flatten();
        let mut parent_channel_avatars = Vec::new();
        sink.try_set(&mut parent_channel_avatars, "parent_channel_avatars", || {
            extractor.parent_channel_avatars()
        });
        let mut verified = false;
        sink.try_set(&mut verified, "verified", || extractor.is_verified());
        let mut tabs = Vec::new();
        sink.try_set(&mut tabs, "tabs", || extractor.tabs());
        let mut tags = Vec::new();
        sink.try_set(&mut tags, "tags", || extractor.tags());

        info.avatars = avatars;
        info.banners = banners;
        info.feed_url = feed_url;
        info.subscriber_count = subscriber_count;
        info.description = description;
        info.parent_channel_name = parent_channel_name;
        info.parent_channel_url = parent_channel_url;
        info.parent_channel_avatars = parent_channel_avatars;
        info.verified = verified;
        info.tabs = tabs;
        info.tags = tags;
        Ok(info)
    }
}

impl Deref for ChannelInfo {
    type Target = Info;

    fn deref(&self) -> &Info {
        &self.info
    }
}

impl DerefMut for ChannelInfo {
    fn deref_mut(&mut self) -> &mut Info {
        &mut self.info
    }
}
