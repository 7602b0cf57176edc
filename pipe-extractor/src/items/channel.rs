use serde::{Deserialize, Serialize};

use super::{InfoItem, InfoItemExtractor, InfoType};
use crate::collector::{Collector, CollectorState, ErrorSink};
use crate::error::Result;
use crate::image::Image;
use crate::service::ServiceId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelInfoItem {
    pub service_id: ServiceId,
    pub url: String,
    pub name: String,
    pub thumbnails: Vec<Image>,
    pub description: Option<String>,
    pub subscriber_count: i64,
    pub stream_count: i64,
    pub verified: bool,
}

impl ChannelInfoItem {
    pub fn new(service_id: ServiceId, url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            service_id,
            url: url.into(),
            name: name.into(),
            thumbnails: Vec::new(),
            description: None,
            subscriber_count: -1,
            stream_count: -1,
            verified: false,
        }
    }
}

impl InfoItem for ChannelInfoItem {
    fn info_type(&self) -> InfoType {
        InfoType::Channel
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

pub trait ChannelInfoItemExtractor: InfoItemExtractor {
    fn description(&self) -> Result<Option<String>>;

    fn subscriber_count(&self) -> Result<i64>;

    fn stream_count(&self) -> Result<i64>;

    fn is_verified(&self) -> Result<bool>;
}

pub(super) fn extract_item(
    service_id: ServiceId,
    extractor: &dyn ChannelInfoItemExtractor,
    sink: &mut ErrorSink<'_>,
) -> Result<ChannelInfoItem> {
    let mut item = ChannelInfoItem::new(service_id, extractor.url()?, extractor.name()?);

    sink.try_set(&mut item.subscriber_count, "subscriber_count", || {
        extractor.subscriber_count()
    });
    sink.try_set(&mut item.stream_count, "stream_count", || extractor.stream_count());
    sink.try_set(&mut item.thumbnails, "thumbnails", || extractor.thumbnails());
    item.description = sink
        .try_get("description", || extractor.description())
        .flatten();
    sink.try_set(&mut item.verified, "verified", || extractor.is_verified());

    Ok(item)
}

#[derive(Debug)]
pub struct ChannelInfoItemsCollector {
    state: CollectorState<ChannelInfoItem>,
}

impl ChannelInfoItemsCollector {
    #[must_use]
    pub const fn new(service_id: ServiceId) -> Self {
        Self {
            state: CollectorState::new(service_id),
        }
    }
}

impl Collector for ChannelInfoItemsCollector {
    type Item = ChannelInfoItem;
    type Extractor = dyn ChannelInfoItemExtractor;

    fn state(&self) -> &CollectorState<ChannelInfoItem> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CollectorState<ChannelInfoItem> {
        &mut self.state
    }

    fn extract(&mut self, extractor: &dyn ChannelInfoItemExtractor) -> Result<ChannelInfoItem> {
        let service_id = self.state.service_id();
        extract_item(service_id, extractor, &mut self.state.sink())
    }
}
