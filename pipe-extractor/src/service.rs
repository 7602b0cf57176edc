//! Streaming service capability trait
//!
//! A service bundles the link handler factories that recognize its URLs and
//! the extractor factories that know how to read its pages. Everything a
//! service does not support answers with [`ExtractionError::Unsupported`].

use serde::{Deserialize, Serialize};

use crate::channel::{ChannelExtractor, ChannelTabExtractor};
use crate::comments::CommentsExtractor;
use crate::context::ExtractorContext;
use crate::error::{ExtractionError, Result};
use crate::feed::FeedExtractor;
use crate::kiosk::KioskList;
use crate::link_handler::{
    LinkHandlerFactory, ListLinkHandler, ListLinkHandlerFactory, SearchQueryHandler,
    SearchQueryHandlerFactory,
};
use crate::localization::{time_ago_parser_for, ContentCountry, Localization, TimeAgoParser};
use crate::playlist::PlaylistExtractor;
use crate::search::{SearchExtractor, SuggestionExtractor};
use crate::utils;

/// Numeric id a service is registered under.
pub type ServiceId = u32;

/// Which part of a service a URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    None,
    Stream,
    Channel,
    Playlist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCapability {
    Audio,
    Video,
    Live,
    Comments,
}

/// Static description of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    name: String,
    media_capabilities: Vec<MediaCapability>,
}

impl ServiceInfo {
    pub fn new(name: impl Into<String>, media_capabilities: Vec<MediaCapability>) -> Self {
        Self {
            name: name.into(),
            media_capabilities,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn media_capabilities(&self) -> &[MediaCapability] {
        &self.media_capabilities
    }

    #[must_use]
    pub fn has_capability(&self, capability: MediaCapability) -> bool {
        self.media_capabilities.contains(&capability)
    }
}

/// A backend the framework can dispatch to.
///
/// Implementors supply identity, the link handler factories they have and the
/// extractor factories they support. Resolution, localization negotiation and
/// the URL convenience constructors are provided.
pub trait StreamingService: Send + Sync {
    fn service_id(&self) -> ServiceId;

    fn service_info(&self) -> &ServiceInfo;

    fn base_url(&self) -> String;

    // Link handler factories

    fn stream_lh_factory(&self) -> Option<&dyn LinkHandlerFactory> {
        None
    }

    fn channel_lh_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        None
    }

    fn channel_tab_lh_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        None
    }

    fn playlist_lh_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        None
    }

    fn search_qh_factory(&self) -> Option<&dyn SearchQueryHandlerFactory> {
        None
    }

    fn comments_lh_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        None
    }

    // Extractor factories

    fn channel_extractor(
        &self,
        _ctx: &ExtractorContext,
        _handler: ListLinkHandler,
    ) -> Result<Box<dyn ChannelExtractor>> {
        Err(ExtractionError::unsupported(format!(
            "{} has no channel extractor",
            self.service_info().name()
        )))
    }

    fn channel_tab_extractor(
        &self,
        _ctx: &ExtractorContext,
        _handler: ListLinkHandler,
    ) -> Result<Box<dyn ChannelTabExtractor>> {
        Err(ExtractionError::unsupported(format!(
            "{} has no channel tab extractor",
            self.service_info().name()
        )))
    }

    fn playlist_extractor(
        &self,
        _ctx: &ExtractorContext,
        _handler: ListLinkHandler,
    ) -> Result<Box<dyn PlaylistExtractor>> {
        Err(ExtractionError::unsupported(format!(
            "{} has no playlist extractor",
            self.service_info().name()
        )))
    }

    fn comments_extractor(
        &self,
        _ctx: &ExtractorContext,
        _handler: ListLinkHandler,
    ) -> Result<Box<dyn CommentsExtractor>> {
        Err(ExtractionError::unsupported(format!(
            "{} has no comments extractor",
            self.service_info().name()
        )))
    }

    fn search_extractor(
        &self,
        _ctx: &ExtractorContext,
        _handler: SearchQueryHandler,
    ) -> Result<Box<dyn SearchExtractor>> {
        Err(ExtractionError::unsupported(format!(
            "{} has no search extractor",
            self.service_info().name()
        )))
    }

    fn suggestion_extractor(&self, _ctx: &ExtractorContext) -> Result<Box<dyn SuggestionExtractor>> {
        Err(ExtractionError::unsupported(format!(
            "{} has no suggestion extractor",
            self.service_info().name()
        )))
    }

    /// Lightweight feed of a channel; `None` when the service has no
    /// dedicated feed and the channel itself must be used.
    fn feed_extractor(
        &self,
        _ctx: &ExtractorContext,
        _url: &str,
    ) -> Result<Option<Box<dyn FeedExtractor>>> {
        Ok(None)
    }

    fn kiosk_list(&self, _ctx: &ExtractorContext) -> Result<KioskList> {
        Err(ExtractionError::unsupported(format!(
            "{} has no kiosks",
            self.service_info().name()
        )))
    }

    // Localization

    fn supported_localizations(&self) -> Vec<Localization> {
        vec![Localization::default()]
    }

    fn supported_countries(&self) -> Vec<ContentCountry> {
        vec![ContentCountry::default()]
    }

    /// Negotiate `preferred` against the supported list: exact match, then
    /// the first entry with the same language, then the default.
    fn localization(&self, preferred: &Localization) -> Localization {
        let supported = self.supported_localizations();
        if supported.contains(preferred) {
            return preferred.clone();
        }
        supported
            .into_iter()
            .find(|loc| loc.language_code() == preferred.language_code())
            .unwrap_or_default()
    }

    fn content_country(&self, preferred: &ContentCountry) -> ContentCountry {
        if self.supported_countries().contains(preferred) {
            preferred.clone()
        } else {
            ContentCountry::default()
        }
    }

    fn time_ago_parser(&self, localization: &Localization) -> Result<TimeAgoParser> {
        time_ago_parser_for(localization)
    }

    // Resolution

    /// Figure out what a URL points at. Stream factories are asked first,
    /// then channel, then playlist.
    fn link_type_by_url(&self, url: &str) -> Result<LinkType> {
        let polished = utils::follow_google_redirect_if_needed(url);

        if let Some(factory) = self.stream_lh_factory() {
            if factory.accept_url(&polished)? {
                return Ok(LinkType::Stream);
            }
        }
        if let Some(factory) = self.channel_lh_factory() {
            if factory.accept_url(&polished)? {
                return Ok(LinkType::Channel);
            }
        }
        if let Some(factory) = self.playlist_lh_factory() {
            if factory.accept_url(&polished)? {
                return Ok(LinkType::Playlist);
            }
        }
        Ok(LinkType::None)
    }

    // Convenience constructors

    fn channel_extractor_from_url(
        &self,
        ctx: &ExtractorContext,
        url: &str,
    ) -> Result<Box<dyn ChannelExtractor>> {
        let factory = self
            .channel_lh_factory()
            .ok_or_else(|| ExtractionError::unsupported("no channel link handler"))?;
        self.channel_extractor(ctx, factory.from_list_url(url)?)
    }

    fn channel_tab_extractor_from_id(
        &self,
        ctx: &ExtractorContext,
        id: &str,
        tab: &str,
    ) -> Result<Box<dyn ChannelTabExtractor>> {
        let factory = self
            .channel_tab_lh_factory()
            .ok_or_else(|| ExtractionError::unsupported("no channel tab link handler"))?;
        self.channel_tab_extractor(ctx, factory.from_query(id, &[tab.to_string()], "")?)
    }

    fn playlist_extractor_from_url(
        &self,
        ctx: &ExtractorContext,
        url: &str,
    ) -> Result<Box<dyn PlaylistExtractor>> {
        let factory = self
            .playlist_lh_factory()
            .ok_or_else(|| ExtractionError::unsupported("no playlist link handler"))?;
        self.playlist_extractor(ctx, factory.from_list_url(url)?)
    }

    /// `Ok(None)` when the service has no comments at all.
    fn comments_extractor_from_url(
        &self,
        ctx: &ExtractorContext,
        url: &str,
    ) -> Result<Option<Box<dyn CommentsExtractor>>> {
        let Some(factory) = self.comments_lh_factory() else {
            return Ok(None);
        };
        match self.comments_extractor(ctx, factory.from_list_url(url)?) {
            Ok(extractor) => Ok(Some(extractor)),
            Err(ExtractionError::Unsupported(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn search_extractor_for_query(
        &self,
        ctx: &ExtractorContext,
        query: &str,
        content_filters: &[String],
        sort_filter: &str,
    ) -> Result<Box<dyn SearchExtractor>> {
        let factory = self
            .search_qh_factory()
            .ok_or_else(|| ExtractionError::unsupported("no search query handler"))?;
        let handler = factory.from_search_query(query, content_filters, sort_filter)?;
        self.search_extractor(ctx, handler)
    }
}
