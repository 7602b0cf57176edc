//! PeerTube URL recognition
//!
//! Every factory is bound to an instance URL, used when an id has to be turned
//! into a URL without a base of its own.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{ExtractionError, Result};
use crate::link_handler::{LinkHandlerFactory, ListLinkHandlerFactory, SearchQueryHandlerFactory};
use crate::utils;

static STREAM_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(/w/|(/videos/(watch/|embed/)?))([^/?&#]*)").expect("valid stream id pattern")
});

static CHANNEL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((accounts|a)|(video-channels|c))/([^/?&#]*)").expect("valid channel id pattern")
});

static CHANNEL_URL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/((accounts|a)|(video-channels|c))/([^/?&#]*)")
        .expect("valid channel url pattern")
});

static PLAYLIST_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(/videos/watch/playlist/|/w/p/)([^/?&#]+)").expect("valid playlist id pattern")
});

static PLAYLIST_API_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/video-playlists/([^/?&#]+)").expect("valid playlist api pattern")
});

// /videos/watch/ is understood by every PeerTube version, /w/ only from 3.3
const VIDEO_PATH: &str = "/videos/watch/";

const PLAYLIST_API_ENDPOINT: &str = "/api/v1/video-playlists/";

fn parses(url: &str) -> bool {
    Url::parse(url).is_ok()
}

#[derive(Debug, Clone)]
pub struct PeertubeStreamLinkHandlerFactory {
    base_url: String,
}

impl PeertubeStreamLinkHandlerFactory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl LinkHandlerFactory for PeertubeStreamLinkHandlerFactory {
    fn id(&self, url: &str) -> Result<String> {
        // `/w/p/<id>` is a playlist, so a match directly followed by `p/` is skipped
        STREAM_ID
            .captures_iter(url)
            .filter_map(|caps| caps.get(4))
            .find(|id| !id.as_str().is_empty() && !url[id.start()..].starts_with("p/"))
            .map(|id| id.as_str().to_string())
            .ok_or_else(|| ExtractionError::parsing(format!("no video id in \"{url}\"")))
    }

    fn url(&self, id: &str) -> Result<String> {
        self.url_with_base(id, &self.base_url)
    }

    fn url_with_base(&self, id: &str, base_url: &str) -> Result<String> {
        Ok(format!("{base_url}{VIDEO_PATH}{id}"))
    }

    fn on_accept_url(&self, url: &str) -> Result<bool> {
        if url.contains("/playlist/") || !parses(url) {
            return Ok(false);
        }
        Ok(self.id(url).is_ok())
    }
}

#[derive(Debug, Clone)]
pub struct PeertubeChannelLinkHandlerFactory {
    base_url: String,
}

impl PeertubeChannelLinkHandlerFactory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// `a/<name>` and `c/<name>` are web client shorthands the API does not know.
    fn fix_id(id: &str) -> String {
        let id = id.strip_prefix('/').unwrap_or(id);
        if let Some(name) = id.strip_prefix("a/") {
            format!("accounts/{name}")
        } else if let Some(name) = id.strip_prefix("c/") {
            format!("video-channels/{name}")
        } else {
            id.to_string()
        }
    }
}

impl LinkHandlerFactory for PeertubeChannelLinkHandlerFactory {
    fn id(&self, url: &str) -> Result<String> {
        utils::match_group(&CHANNEL_URL_ID, url, 0).map(|id| Self::fix_id(&id))
    }

    fn url(&self, id: &str) -> Result<String> {
        self.list_url(id, &[], "")
    }

    fn url_with_base(&self, id: &str, base_url: &str) -> Result<String> {
        self.list_url_with_base(id, &[], "", base_url)
    }

    fn on_accept_url(&self, url: &str) -> Result<bool> {
        Ok(parses(url)
            && ["/accounts/", "/a/", "/video-channels/", "/c/"]
                .iter()
                .any(|segment| url.contains(segment)))
    }
}

impl ListLinkHandlerFactory for PeertubeChannelLinkHandlerFactory {
    fn list_url(&self, id: &str, content_filters: &[String], sort_filter: &str) -> Result<String> {
        self.list_url_with_base(id, content_filters, sort_filter, &self.base_url)
    }

    fn list_url_with_base(
        &self,
        id: &str,
        _content_filters: &[String],
        _sort_filter: &str,
        base_url: &str,
    ) -> Result<String> {
        if CHANNEL_ID.is_match(id) {
            Ok(format!("{base_url}/{}", Self::fix_id(id)))
        } else {
            // bare names predate video channel support and are accounts
            Ok(format!("{base_url}/accounts/{id}"))
        }
    }
}

#[derive(Debug, Clone)]
pub struct PeertubePlaylistLinkHandlerFactory {
    base_url: String,
}

impl PeertubePlaylistLinkHandlerFactory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl LinkHandlerFactory for PeertubePlaylistLinkHandlerFactory {
    fn id(&self, url: &str) -> Result<String> {
        utils::match_group(&PLAYLIST_ID, url, 2)
            .or_else(|_| utils::match_group1(&PLAYLIST_API_ID, url))
    }

    fn url(&self, id: &str) -> Result<String> {
        self.list_url(id, &[], "")
    }

    fn url_with_base(&self, id: &str, base_url: &str) -> Result<String> {
        self.list_url_with_base(id, &[], "", base_url)
    }

    fn on_accept_url(&self, url: &str) -> Result<bool> {
        Ok(parses(url) && self.id(url).is_ok())
    }
}

impl ListLinkHandlerFactory for PeertubePlaylistLinkHandlerFactory {
    fn list_url(&self, id: &str, content_filters: &[String], sort_filter: &str) -> Result<String> {
        self.list_url_with_base(id, content_filters, sort_filter, &self.base_url)
    }

    fn list_url_with_base(
        &self,
        id: &str,
        _content_filters: &[String],
        _sort_filter: &str,
        base_url: &str,
    ) -> Result<String> {
        Ok(format!("{base_url}{PLAYLIST_API_ENDPOINT}{id}"))
    }
}

/// Search filters understood by [`PeertubeSearchQueryHandlerFactory`].
pub struct PeertubeSearchFilters;

impl PeertubeSearchFilters {
    pub const VIDEOS: &'static str = "videos";
    /// Videos from the Sepia federated index instead of the instance
    pub const SEPIA_VIDEOS: &'static str = "sepia_videos";
    pub const PLAYLISTS: &'static str = "playlists";
    pub const CHANNELS: &'static str = "channels";
}

pub const SEPIA_BASE_URL: &str = "https://sepiasearch.org";

const SEARCH_ENDPOINT_VIDEOS: &str = "/api/v1/search/videos";
const SEARCH_ENDPOINT_PLAYLISTS: &str = "/api/v1/search/video-playlists";
const SEARCH_ENDPOINT_CHANNELS: &str = "/api/v1/search/video-channels";

#[derive(Debug, Clone)]
pub struct PeertubeSearchQueryHandlerFactory {
    base_url: String,
}

impl PeertubeSearchQueryHandlerFactory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl LinkHandlerFactory for PeertubeSearchQueryHandlerFactory {
    fn id(&self, url: &str) -> Result<String> {
        Url::parse(url)?
            .query_pairs()
            .find(|(key, _)| key == "search")
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| ExtractionError::parsing(format!("no search string in \"{url}\"")))
    }

    fn url(&self, id: &str) -> Result<String> {
        self.list_url(id, &[], "")
    }

    fn on_accept_url(&self, url: &str) -> Result<bool> {
        Ok(Url::parse(url).is_ok_and(|parsed| parsed.path().starts_with("/api/v1/search/")))
    }
}

impl ListLinkHandlerFactory for PeertubeSearchQueryHandlerFactory {
    fn list_url(&self, id: &str, content_filters: &[String], sort_filter: &str) -> Result<String> {
        self.list_url_with_base(id, content_filters, sort_filter, &self.base_url)
    }

    fn list_url_with_base(
        &self,
        id: &str,
        content_filters: &[String],
        _sort_filter: &str,
        base_url: &str,
    ) -> Result<String> {
        let filter = content_filters.first().map_or("", String::as_str);
        let endpoint = match filter {
            PeertubeSearchFilters::PLAYLISTS => SEARCH_ENDPOINT_PLAYLISTS,
            PeertubeSearchFilters::CHANNELS => SEARCH_ENDPOINT_CHANNELS,
            _ => SEARCH_ENDPOINT_VIDEOS,
        };
        let base_url = if filter.starts_with("sepia_") {
            SEPIA_BASE_URL
        } else {
            base_url
        };
        Ok(format!(
            "{base_url}{endpoint}?search={}",
            utils::encode_url_utf8(id)
        ))
    }

    fn available_content_filters(&self) -> Vec<String> {
        [
            PeertubeSearchFilters::VIDEOS,
            PeertubeSearchFilters::PLAYLISTS,
            PeertubeSearchFilters::CHANNELS,
            PeertubeSearchFilters::SEPIA_VIDEOS,
        ]
        .map(String::from)
        .to_vec()
    }
}

impl SearchQueryHandlerFactory for PeertubeSearchQueryHandlerFactory {}
