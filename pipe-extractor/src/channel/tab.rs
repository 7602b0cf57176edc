use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::context::ExtractorContext;
use crate::error::Result;
use crate::extractor::ListExtractor;
use crate::helper;
use crate::info::ListInfo;
use crate::items::MultiInfoItem;
use crate::link_handler::ListLinkHandler;
use crate::page::{InfoItemsPage, Page};
use crate::service::StreamingService;

/// Content filter names of the common channel tabs.
pub struct ChannelTabs;

impl ChannelTabs {
    pub const VIDEOS: &'static str = "videos";
    pub const TRACKS: &'static str = "tracks";
    pub const SHORTS: &'static str = "shorts";
    pub const LIVESTREAMS: &'static str = "livestreams";
    pub const CHANNELS: &'static str = "channels";
    pub const PLAYLISTS: &'static str = "playlists";
    pub const ALBUMS: &'static str = "albums";
    pub const LIKES: &'static str = "likes";
}

/// Lists one tab of a channel. The tab name is the handler's first content filter.
pub trait ChannelTabExtractor: ListExtractor<Item = MultiInfoItem> {
    fn tab(&self) -> &str {
        self.link_handler()
            .content_filters()
            .first()
            .map_or("", String::as_str)
    }
}

pub type ChannelTabExtractorBuilder = dyn Fn(&dyn StreamingService, &ExtractorContext, ListLinkHandler) -> Result<Box<dyn ChannelTabExtractor>>
    + Send
    + Sync;

/// A tab whose content the channel page already delivered, so it carries
/// its own extractor constructor instead of going through the service.
#[derive(Clone)]
pub struct ReadyChannelTabListLinkHandler {
    handler: ListLinkHandler,
    builder: Arc<ChannelTabExtractorBuilder>,
}

impl ReadyChannelTabListLinkHandler {
    pub fn new<F>(url: &str, channel_id: &str, tab: &str, builder: F) -> Self
    where
        F: Fn(&dyn StreamingService, &ExtractorContext, ListLinkHandler) -> Result<Box<dyn ChannelTabExtractor>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            handler: ListLinkHandler::new(url, url, channel_id, vec![tab.to_string()], ""),
            builder: Arc::new(builder),
        }
    }

    #[must_use]
    pub const fn handler(&self) -> &ListLinkHandler {
        &self.handler
    }

    pub fn channel_tab_extractor(
        &self,
        service: &dyn StreamingService,
        ctx: &ExtractorContext,
    ) -> Result<Box<dyn ChannelTabExtractor>> {
        (self.builder)(service, ctx, self.handler.clone())
    }
}

impl std::fmt::Debug for ReadyChannelTabListLinkHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadyChannelTabListLinkHandler")
            .field("handler", &self.handler)
            .finish_non_exhaustive()
    }
}

/// A channel tab as returned by [`super::ChannelExtractor::tabs`].
#[derive(Debug, Clone)]
pub enum ChannelTab {
    /// Resolved through the service's channel tab extractor
    Link(ListLinkHandler),
    Ready(ReadyChannelTabListLinkHandler),
}

impl ChannelTab {
    #[must_use]
    pub const fn link_handler(&self) -> &ListLinkHandler {
        match self {
            Self::Link(handler) => handler,
            Self::Ready(ready) => &ready.handler,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.link_handler()
            .content_filters()
            .first()
            .map_or("", String::as_str)
    }

    pub fn extractor(
        &self,
        service: &dyn StreamingService,
        ctx: &ExtractorContext,
    ) -> Result<Box<dyn ChannelTabExtractor>> {
        match self {
            Self::Link(handler) => service.channel_tab_extractor(ctx, handler.clone()),
            Self::Ready(ready) => ready.channel_tab_extractor(service, ctx),
        }
    }
}

impl From<ListLinkHandler> for ChannelTab {
    fn from(handler: ListLinkHandler) -> Self {
        Self::Link(handler)
    }
}

impl From<ReadyChannelTabListLinkHandler> for ChannelTab {
    fn from(ready: ReadyChannelTabListLinkHandler) -> Self {
        Self::Ready(ready)
    }
}

#[derive(Debug, Clone)]
pub struct ChannelTabInfo {
    list: ListInfo<MultiInfoItem>,
}

impl ChannelTabInfo {
    pub async fn get_info(
        ctx: &ExtractorContext,
        service: &dyn StreamingService,
        tab: &ChannelTab,
    ) -> Result<Self> {
        let mut extractor = tab.extractor(service, ctx)?;
        extractor.fetch_page().await?;
        Ok(Self::from_extractor(extractor.as_ref()).await)
    }

    /// Assemble from a fetched extractor. Never fails: a broken initial page
    /// leaves the item list empty and is recorded as an error.
    pub async fn from_extractor(extractor: &dyn ChannelTabExtractor) -> Self {
        let handler = extractor.link_handler();
        let mut list = ListInfo::new(extractor.service_id(), handler, extractor.tab());
        list.set_original_url(extractor.original_url());

        let page = helper::items_page_or_log_error(&mut list, extractor).await;
        let (items, next_page, _) = page.into_parts();
        list.set_related_items(items);
        list.set_next_page(next_page);

        Self { list }
    }

    pub async fn get_more_items(
        ctx: &ExtractorContext,
        service: &dyn StreamingService,
        tab: &ChannelTab,
        page: &Page,
    ) -> Result<InfoItemsPage<MultiInfoItem>> {
        tab.extractor(service, ctx)?.page(page).await
    }
}

impl Deref for ChannelTabInfo {
    type Target = ListInfo<MultiInfoItem>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl DerefMut for ChannelTabInfo {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.list
    }
}
