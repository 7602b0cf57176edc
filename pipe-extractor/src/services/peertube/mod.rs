//! PeerTube
//!
//! Federated video platform. Each instance hosts its own videos under the same
//! URL layout, so the factories accept any host and keep it in the canonical
//! URL.

mod link_handler;

pub use link_handler::{
    PeertubeChannelLinkHandlerFactory, PeertubePlaylistLinkHandlerFactory,
    PeertubeSearchFilters, PeertubeSearchQueryHandlerFactory, PeertubeStreamLinkHandlerFactory,
    SEPIA_BASE_URL,
};

use serde::Deserialize;

use crate::downloader::Downloader;
use crate::error::{ExtractionError, Result};
use crate::link_handler::{LinkHandlerFactory, ListLinkHandlerFactory, SearchQueryHandlerFactory};
use crate::service::{MediaCapability, ServiceId, ServiceInfo, StreamingService};

const DEFAULT_INSTANCE_URL: &str = "https://framatube.org";
const DEFAULT_INSTANCE_NAME: &str = "FramaTube";

/// A PeerTube server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeertubeInstance {
    url: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct InstanceConfig {
    instance: InstanceMeta,
}

#[derive(Debug, Deserialize)]
struct InstanceMeta {
    name: String,
}

impl PeertubeInstance {
    /// Instance at `url`, named "PeerTube" until its metadata is fetched.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_name(url, "PeerTube")
    }

    pub fn with_name(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the instance name from `/api/v1/config`.
    pub async fn fetch_instance_metadata(&mut self, downloader: &dyn Downloader) -> Result<()> {
        let url = format!("{}/api/v1/config", self.url);
        let response = downloader.get(&url, None).await?;
        if response.body().trim().is_empty() {
            return Err(ExtractionError::Extraction(format!(
                "unable to configure instance {}",
                self.url
            )));
        }

        let config: InstanceConfig = serde_json::from_str(response.body()).map_err(|err| {
            ExtractionError::parsing(format!("unable to parse instance config: {err}"))
        })?;
        tracing::debug!(url = %self.url, name = %config.instance.name, "fetched instance metadata");
        self.name = config.instance.name;
        Ok(())
    }
}

impl Default for PeertubeInstance {
    fn default() -> Self {
        Self::with_name(DEFAULT_INSTANCE_URL, DEFAULT_INSTANCE_NAME)
    }
}

pub struct PeertubeService {
    service_id: ServiceId,
    info: ServiceInfo,
    instance: PeertubeInstance,
    stream_lh: PeertubeStreamLinkHandlerFactory,
    channel_lh: PeertubeChannelLinkHandlerFactory,
    playlist_lh: PeertubePlaylistLinkHandlerFactory,
    search_qh: PeertubeSearchQueryHandlerFactory,
}

impl PeertubeService {
    pub const SERVICE_ID: ServiceId = 3;

    #[must_use]
    pub fn new(service_id: ServiceId, instance: PeertubeInstance) -> Self {
        let url = instance.url().to_string();
        Self {
            service_id,
            info: ServiceInfo::new(
                "PeerTube",
                vec![MediaCapability::Video, MediaCapability::Comments],
            ),
            stream_lh: PeertubeStreamLinkHandlerFactory::new(url.clone()),
            channel_lh: PeertubeChannelLinkHandlerFactory::new(url.clone()),
            playlist_lh: PeertubePlaylistLinkHandlerFactory::new(url.clone()),
            search_qh: PeertubeSearchQueryHandlerFactory::new(url),
            instance,
        }
    }

    #[must_use]
    pub const fn instance(&self) -> &PeertubeInstance {
        &self.instance
    }
}

impl Default for PeertubeService {
    fn default() -> Self {
        Self::new(Self::SERVICE_ID, PeertubeInstance::default())
    }
}

impl std::fmt::Debug for PeertubeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeertubeService")
            .field("service_id", &self.service_id)
            .field("instance", &self.instance)
            .finish_non_exhaustive()
    }
}

impl StreamingService for PeertubeService {
    fn service_id(&self) -> ServiceId {
        self.service_id
    }

    fn service_info(&self) -> &ServiceInfo {
        &self.info
    }

    fn base_url(&self) -> String {
        self.instance.url().to_string()
    }

    fn stream_lh_factory(&self) -> Option<&dyn LinkHandlerFactory> {
        Some(&self.stream_lh)
    }

    fn channel_lh_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        Some(&self.channel_lh)
    }

    fn playlist_lh_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        Some(&self.playlist_lh)
    }

    fn search_qh_factory(&self) -> Option<&dyn SearchQueryHandlerFactory> {
        Some(&self.search_qh)
    }
}
