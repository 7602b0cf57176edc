use serde::{Deserialize, Serialize};

use super::{InfoItem, InfoItemExtractor, InfoType};
use crate::collector::{Collector, CollectorState, ErrorSink};
use crate::description::Description;
use crate::error::Result;
use crate::image::Image;
use crate::service::ServiceId;

/// Whether a playlist is curated or generated on the fly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistType {
    #[default]
    Normal,
    MixStream,
    MixMusic,
    MixChannel,
    MixGenre,
}

impl PlaylistType {
    #[must_use]
    pub const fn is_mix(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistInfoItem {
    pub service_id: ServiceId,
    pub url: String,
    pub name: String,
    pub thumbnails: Vec<Image>,
    pub uploader_name: Option<String>,
    pub uploader_url: Option<String>,
    pub uploader_verified: bool,
    /// See [`crate::page::ITEM_COUNT_UNKNOWN`] and friends
    pub stream_count: i64,
    pub description: Description,
    pub playlist_type: PlaylistType,
}

impl PlaylistInfoItem {
    pub fn new(service_id: ServiceId, url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            service_id,
            url: url.into(),
            name: name.into(),
            thumbnails: Vec::new(),
            uploader_name: None,
            uploader_url: None,
            uploader_verified: false,
            stream_count: -1,
            description: Description::EMPTY,
            playlist_type: PlaylistType::Normal,
        }
    }
}

impl InfoItem for PlaylistInfoItem {
    fn info_type(&self) -> InfoType {
        InfoType::Playlist
    }

    fn service_id(&self) -> ServiceId {
        self.service_id
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn thumbnails(&self) -> &[Image] {
        &self.thumbnails
    }
}

pub trait PlaylistInfoItemExtractor: InfoItemExtractor {
    fn uploader_name(&self) -> Result<String>;

    fn uploader_url(&self) -> Result<String>;

    fn is_uploader_verified(&self) -> Result<bool>;

    fn stream_count(&self) -> Result<i64>;

    fn description(&self) -> Result<Description> {
        Ok(Description::EMPTY)
    }

    fn playlist_type(&self) -> Result<PlaylistType> {
        Ok(PlaylistType::Normal)
    }
}

pub(super) fn extract_item(
    service_id: ServiceId,
    extractor: &dyn PlaylistInfoItemExtractor,
    sink: &mut ErrorSink<'_>,
) -> Result<PlaylistInfoItem> {
    let mut item = PlaylistInfoItem::new(service_id, extractor.url()?, extractor.name()?);

    item.uploader_name = sink.try_get("uploader_name", || extractor.uploader_name());
    item.uploader_url = sink.try_get("uploader_url", || extractor.uploader_url());
    sink.try_set(&mut item.uploader_verified, "uploader_verified", || {
        extractor.is_uploader_verified()
    });
    sink.try_set(&mut item.thumbnails, "thumbnails", || extractor.thumbnails());
    sink.try_set(&mut item.stream_count, "stream_count", || extractor.stream_count());
    sink.try_set(&mut item.description, "description", || extractor.description());
    sink.try_set(&mut item.playlist_type, "playlist_type", || extractor.playlist_type());

    Ok(item)
}

#[derive(Debug)]
pub struct PlaylistInfoItemsCollector {
    state: CollectorState<PlaylistInfoItem>,
}

impl PlaylistInfoItemsCollector {
    #[must_use]
    pub const fn new(service_id: ServiceId) -> Self {
        Self {
            state: CollectorState::new(service_id),
        }
    }
}

impl Collector for PlaylistInfoItemsCollector {
    type Item = PlaylistInfoItem;
    type Extractor = dyn PlaylistInfoItemExtractor;

    fn state(&self) -> &CollectorState<PlaylistInfoItem> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CollectorState<PlaylistInfoItem> {
        &mut self.state
    }

    fn extract(&mut self, extractor: &dyn PlaylistInfoItemExtractor) -> Result<PlaylistInfoItem> {
        let service_id = self.state.service_id();
        extract_item(service_id, extractor, &mut self.state.sink())
    }
}
