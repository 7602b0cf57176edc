use serde::{Deserialize, Serialize};

use super::{InfoItem, InfoItemExtractor, InfoType};
use crate::collector::{Collector, CollectorState, ErrorSink};
use crate::description::Description;
use crate::error::Result;
use crate::image::Image;
use crate::localization::DateWrapper;
use crate::page::Page;
use crate::service::ServiceId;

pub const NO_LIKE_COUNT: i32 = -1;
pub const NO_STREAM_POSITION: i32 = -1;
pub const UNKNOWN_REPLY_COUNT: i32 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentsInfoItem {
    pub service_id: ServiceId,
    pub url: String,
    pub name: String,
    pub thumbnails: Vec<Image>,
    pub comment_id: Option<String>,
    pub comment_text: Description,
    pub uploader_name: Option<String>,
    pub uploader_url: Option<String>,
    pub uploader_avatars: Vec<Image>,
    pub uploader_verified: bool,
    pub textual_upload_date: Option<String>,
    pub upload_date: Option<DateWrapper>,
    pub like_count: i32,
    pub textual_like_count: Option<String>,
    pub hearted_by_uploader: bool,
    pub pinned: bool,
    /// Seconds into the stream the comment refers to
    pub stream_position: i32,
    pub reply_count: i32,
    pub replies: Option<Page>,
    pub channel_owner: bool,
    pub creator_reply: bool,
}

impl CommentsInfoItem {
    pub fn new(service_id: ServiceId, url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            service_id,
            url: url.into(),
            name: name.into(),
            thumbnails: Vec::new(),
            comment_id: None,
            comment_text: Description::EMPTY,
            uploader_name: None,
            uploader_url: None,
            uploader_avatars: Vec::new(),
            uploader_verified: false,
            textual_upload_date: None,
            upload_date: None,
            like_count: NO_LIKE_COUNT,
            textual_like_count: None,
            hearted_by_uploader: false,
            pinned: false,
            stream_position: NO_STREAM_POSITION,
            reply_count: UNKNOWN_REPLY_COUNT,
            replies: None,
            channel_owner: false,
            creator_reply: false,
        }
    }

    #[must_use]
    pub fn has_replies(&self) -> bool {
        Page::is_valid(self.replies.as_ref())
    }
}

impl InfoItem for CommentsInfoItem {
    fn info_type(&self) -> InfoType {
        InfoType::Comment
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

/// Every accessor is optional; services answer what their comment model has.
pub trait CommentsInfoItemExtractor: InfoItemExtractor {
    fn comment_id(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn comment_text(&self) -> Result<Description> {
        Ok(Description::EMPTY)
    }

    fn uploader_name(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn uploader_url(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn uploader_avatars(&self) -> Result<Vec<Image>> {
        Ok(Vec::new())
    }

    fn is_uploader_verified(&self) -> Result<bool> {
        Ok(false)
    }

    fn textual_upload_date(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn upload_date(&self) -> Result<Option<DateWrapper>> {
        Ok(None)
    }

    fn like_count(&self) -> Result<i32> {
        Ok(NO_LIKE_COUNT)
    }

    fn textual_like_count(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn is_hearted_by_uploader(&self) -> Result<bool> {
        Ok(false)
    }

    fn is_pinned(&self) -> Result<bool> {
        Ok(false)
    }

    fn stream_position(&self) -> Result<i32> {
        Ok(NO_STREAM_POSITION)
    }

    fn reply_count(&self) -> Result<i32> {
        Ok(UNKNOWN_REPLY_COUNT)
    }

    fn replies(&self) -> Result<Option<Page>> {
        Ok(None)
    }

    fn is_channel_owner(&self) -> Result<bool> {
        Ok(false)
    }

    fn has_creator_reply(&self) -> Result<bool> {
        Ok(false)
    }
}

pub(super) fn extract_item(
    service_id: ServiceId,
    extractor: &dyn CommentsInfoItemExtractor,
    sink: &mut ErrorSink<'_>,
) -> Result<CommentsInfoItem> {
    let mut item = CommentsInfoItem::new(service_id, extractor.url()?, extractor.name()?);

    item.comment_id = sink.try_get("comment_id", || extractor.comment_id()).flatten();
    sink.try_set(&mut item.comment_text, "comment_text", || extractor.comment_text());
    sink.try_set(&mut item.thumbnails, "thumbnails", || extractor.thumbnails());
    item.uploader_name = sink
        .try_get("uploader_name", || extractor.uploader_name())
        .flatten();
    item.uploader_url = sink
        .try_get("uploader_url", || extractor.uploader_url())
        .flatten();
    sink.try_set(&mut item.uploader_avatars, "uploader_avatars", || {
        extractor.uploader_avatars()
    });
    sink.try_set(&mut item.uploader_verified, "uploader_verified", || {
        extractor.is_uploader_verified()
    });
    item.textual_upload_date = sink
        .try_get("textual_upload_date", || extractor.textual_upload_date())
        .flatten();
    item.upload_date = sink
        .try_get("upload_date", || extractor.upload_date())
        .flatten();
    sink.try_set(&mut item.like_count, "like_count", || extractor.like_count());
    item.textual_like_count = sink
        .try_get("textual_like_count", || extractor.textual_like_count())
        .flatten();
    sink.try_set(&mut item.hearted_by_uploader, "hearted_by_uploader", || {
        extractor.is_hearted_by_uploader()
    });
    sink.try_set(&mut item.pinned, "pinned", || extractor.is_pinned());
    sink.try_set(&mut item.stream_position, "stream_position", || {
        extractor.stream_position()
    });
    sink.try_set(&mut item.reply_count, "reply_count", || extractor.reply_count());
    item.replies = sink.try_get("replies", || extractor.replies()).flatten();
    sink.try_set(&mut item.channel_owner, "channel_owner", || {
        extractor.is_channel_owner()
    });
    sink.try_set(&mut item.creator_reply, "creator_reply", || {
        extractor.has_creator_reply()
    });

    Ok(item)
}

#[derive(Debug)]
pub struct CommentsInfoItemsCollector {
    state: CollectorState<CommentsInfoItem>,
}

impl CommentsInfoItemsCollector {
    #[must_use]
    pub const fn new(service_id: ServiceId) -> Self {
        Self {
            state: CollectorState::new(service_id),
        }
    }
}

impl Collector for CommentsInfoItemsCollector {
    type Item = CommentsInfoItem;
    type Extractor = dyn CommentsInfoItemExtractor;

    fn state(&self) -> &CollectorState<CommentsInfoItem> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CollectorState<CommentsInfoItem> {
        &mut self.state
    }

    fn extract(&mut self, extractor: &dyn CommentsInfoItemExtractor) -> Result<CommentsInfoItem> {
        let service_id = self.state.service_id();
        extract_item(service_id, extractor, &mut self.state.sink())
    }
}
