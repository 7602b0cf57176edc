use serde::{Deserialize, Serialize};

use super::{InfoItem, InfoItemExtractor, InfoType};
use crate::collector::{Collector, CollectorState, ErrorSink};
use crate::error::{ExtractionError, Result};
use crate::image::Image;
use crate::localization::DateWrapper;
use crate::service::ServiceId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamType {
    #[default]
    None,
    VideoStream,
    AudioStream,
    LiveStream,
    AudioLiveStream,
    PostLiveStream,
    PostLiveAudioStream,
}

impl StreamType {
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::LiveStream | Self::AudioLiveStream)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfoItem {
    pub service_id: ServiceId,
    pub url: String,
    pub name: String,
    pub thumbnails: Vec<Image>,
    pub stream_type: StreamType,
    pub uploader_name: Option<String>,
    pub uploader_url: Option<String>,
    pub uploader_avatars: Vec<Image>,
    pub uploader_verified: bool,
    pub short_description: Option<String>,
    pub textual_upload_date: Option<String>,
    pub upload_date: Option<DateWrapper>,
    /// -1 when unknown
    pub view_count: i64,
    /// Seconds, -1 when unknown
    pub duration: i64,
    pub short_form_content: bool,
}

impl StreamInfoItem {
    pub fn new(
        service_id: ServiceId,
        url: impl Into<String>,
        name: impl Into<String>,
        stream_type: StreamType,
    ) -> Self {
        Self {
            service_id,
            url: url.into(),
            name: name.into(),
            thumbnails: Vec::new(),
            stream_type,
            uploader_name: None,
            uploader_url: None,
            uploader_avatars: Vec::new(),
            uploader_verified: false,
            short_description: None,
            textual_upload_date: None,
            upload_date: None,
            view_count: -1,
            duration: -1,
            short_form_content: false,
        }
    }
}

impl InfoItem for StreamInfoItem {
    fn info_type(&self) -> InfoType {
        InfoType::Stream
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

pub trait StreamInfoItemExtractor: InfoItemExtractor {
    /// Returning `true` drops the entry silently.
    fn is_ad(&self) -> Result<bool> {
        Ok(false)
    }

    fn stream_type(&self) -> Result<StreamType>;

    /// Seconds, -1 when unknown.
    fn duration(&self) -> Result<i64>;

    fn view_count(&self) -> Result<i64>;

    fn uploader_name(&self) -> Result<String>;

    fn uploader_url(&self) -> Result<String>;

    fn uploader_avatars(&self) -> Result<Vec<Image>> {
        Ok(Vec::new())
    }

    fn is_uploader_verified(&self) -> Result<bool>;

    fn textual_upload_date(&self) -> Result<Option<String>>;

    fn upload_date(&self) -> Result<Option<DateWrapper>>;

    fn short_description(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn is_short_form_content(&self) -> Result<bool> {
        Ok(false)
    }
}

pub(super) fn extract_item(
    service_id: ServiceId,
    extractor: &dyn StreamInfoItemExtractor,
    sink: &mut ErrorSink<'_>,
) -> Result<StreamInfoItem> {
    if extractor.is_ad()? {
        return Err(ExtractionError::FoundAd);
    }

    let mut item = StreamInfoItem::new(
        service_id,
        extractor.url()?,
        extractor.name()?,
        extractor.stream_type()?,
    );

    sink.try_set(&mut item.duration, "duration", || extractor.duration());
    item.uploader_name = sink.try_get("uploader_name", || extractor.uploader_name());
    item.textual_upload_date = sink
        .try_get("textual_upload_date", || extractor.textual_upload_date())
        .flatten();
    item.upload_date = sink
        .try_get("upload_date", || extractor.upload_date())
        .flatten();
    sink.try_set(&mut item.view_count, "view_count", || extractor.view_count());
    sink.try_set(&mut item.thumbnails, "thumbnails", || extractor.thumbnails());
    item.uploader_url = sink.try_get("uploader_url", || extractor.uploader_url());
    sink.try_set(&mut item.uploader_avatars, "uploader_avatars", || {
        extractor.uploader_avatars()
    });
    sink.try_set(&mut item.uploader_verified, "uploader_verified", || {
        extractor.is_uploader_verified()
    });
    item.short_description = sink
        .try_get("short_description", || extractor.short_description())
        .flatten();
    sink.try_set(&mut item.short_form_content, "short_form_content", || {
        extractor.is_short_form_content()
    });

    Ok(item)
}

#[derive(Debug)]
pub struct StreamInfoItemsCollector {
    state: CollectorState<StreamInfoItem>,
}

impl StreamInfoItemsCollector {
    #[must_use]
    pub const fn new(service_id: ServiceId) -> Self {
        Self {
            state: CollectorState::new(service_id),
        }
    }
}

impl Collector for StreamInfoItemsCollector {
    type Item = StreamInfoItem;
    type Extractor = dyn StreamInfoItemExtractor;

    fn state(&self) -> &CollectorState<StreamInfoItem> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CollectorState<StreamInfoItem> {
        &mut self.state
    }

    fn extract(&mut self, extractor: &dyn StreamInfoItemExtractor) -> Result<StreamInfoItem> {
        let service_id = self.state.service_id();
        extract_item(service_id, extractor, &mut self.state.sink())
    }
}
