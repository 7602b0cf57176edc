//! List-entry summaries and the extractors/collectors that produce them

mod channel;
mod comment;
mod playlist;
mod stream;

pub use channel::{ChannelInfoItem, ChannelInfoItemExtractor, ChannelInfoItemsCollector};
pub use comment::{
    CommentsInfoItem, CommentsInfoItemExtractor, CommentsInfoItemsCollector, NO_LIKE_COUNT,
    NO_STREAM_POSITION, UNKNOWN_REPLY_COUNT,
};
pub use playlist::{PlaylistInfoItem, PlaylistInfoItemExtractor, PlaylistInfoItemsCollector, PlaylistType};
pub use stream::{StreamInfoItem, StreamInfoItemExtractor, StreamInfoItemsCollector, StreamType};

use serde::{Deserialize, Serialize};

use crate::collector::{Collector, CollectorState};
use crate::error::{ExtractionError, Result};
use crate::image::Image;
use crate::service::ServiceId;

/// Discriminator of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoType {
    Stream,
    Playlist,
    Channel,
    Comment,
}

/// Fields every list entry carries.
pub trait InfoItem {
    fn info_type(&self) -> InfoType;
    fn service_id(&self) -> ServiceId;
    fn url(&self) -> &str;
    fn name(&self) -> &str;
    fn thumbnails(&self) -> &[Image];
}

/// Fields every item extractor can answer, plus probes for its concrete kind.
///
/// A mixed collector asks the probes in order (stream, channel, playlist,
/// comment) and uses the first that answers.
pub trait InfoItemExtractor {
    fn name(&self) -> Result<String>;
    fn url(&self) -> Result<String>;
    fn thumbnails(&self) -> Result<Vec<Image>>;

    fn as_stream(&self) -> Option<&dyn StreamInfoItemExtractor> {
        None
    }

    fn as_channel(&self) -> Option<&dyn ChannelInfoItemExtractor> {
        None
    }

    fn as_playlist(&self) -> Option<&dyn PlaylistInfoItemExtractor> {
        None
    }

    fn as_comment(&self) -> Option<&dyn CommentsInfoItemExtractor> {
        None
    }
}

/// An entry of a list that mixes item kinds (search results, channel tabs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "info_type", rename_all = "lowercase")]
pub enum MultiInfoItem {
    Stream(StreamInfoItem),
    Channel(ChannelInfoItem),
    Playlist(PlaylistInfoItem),
    Comment(CommentsInfoItem),
}

impl MultiInfoItem {
    fn inner(&self) -> &dyn InfoItem {
        match self {
            Self::Stream(item) => item,
            Self::Channel(item) => item,
            Self::Playlist(item) => item,
            Self::Comment(item) => item,
        }
    }
}

impl InfoItem for MultiInfoItem {
    fn info_type(&self) -> InfoType {
        self.inner().info_type()
    }

    fn service_id(&self) -> ServiceId {
        self.inner().service_id()
    }

    fn url(&self) -> &str {
        self.inner().url()
    }

    fn name(&self) -> &str {
        self.inner().name()
    }

    fn thumbnails(&self) -> &[Image] {
        self.inner().thumbnails()
    }
}

impl From<StreamInfoItem> for MultiInfoItem {
    fn from(item: StreamInfoItem) -> Self {
        Self::Stream(item)
    }
}

impl From<ChannelInfoItem> for MultiInfoItem {
    fn from(item: ChannelInfoItem) -> Self {
        Self::Channel(item)
    }
}

impl From<PlaylistInfoItem> for MultiInfoItem {
    fn from(item: PlaylistInfoItem) -> Self {
        Self::Playlist(item)
    }
}

impl From<CommentsInfoItem> for MultiInfoItem {
    fn from(item: CommentsInfoItem) -> Self {
        Self::Comment(item)
    }
}

/// Collector for lists that mix item kinds.
#[derive(Debug)]
pub struct MultiInfoItemsCollector {
    state: CollectorState<MultiInfoItem>,
}

impl MultiInfoItemsCollector {
    #[must_use]
    pub const fn new(service_id: ServiceId) -> Self {
        Self {
            state: CollectorState::new(service_id),
        }
    }
}

impl Collector for MultiInfoItemsCollector {
    type Item = MultiInfoItem;
    type Extractor = dyn InfoItemExtractor;

    fn state(&self) -> &CollectorState<MultiInfoItem> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CollectorState<MultiInfoItem> {
        &mut self.state
    }

    fn extract(&mut self, extractor: &dyn InfoItemExtractor) -> Result<MultiInfoItem> {
        let service_id = self.state.service_id();
        let mut sink = self.state.sink();

        if let Some(stream) = extractor.as_stream() {
            stream::extract_item(service_id, stream, &mut sink).map(Into::into)
        } else if let Some(channel) = extractor.as_channel() {
            channel::extract_item(service_id, channel, &mut sink).map(Into::into)
        } else if let Some(playlist) = extractor.as_playlist() {
            playlist::extract_item(service_id, playlist, &mut sink).map(Into::into)
        } else if let Some(comment) = extractor.as_comment() {
            comment::extract_item(service_id, comment, &mut sink).map(Into::into)
        } else {
            Err(ExtractionError::InvalidArgument(
                "unsupported extractor type".to_string(),
            ))
        }
    }
}
