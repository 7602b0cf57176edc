//! Extraction context and the process-wide default
//!
//! Every `get_info` and extractor factory takes an [`ExtractorContext`]. Hosts
//! that prefer a global can call [`initialize`] once at startup and fetch the
//! shared context with [`context`].

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::Config;
use crate::downloader::{Downloader, HttpDownloader};
use crate::error::Result;
use crate::localization::{ContentCountry, Localization};
use crate::registry::ServiceRegistry;

/// Downloader, preferred localization and the services to dispatch to.
#[derive(Clone)]
pub struct ExtractorContext {
    downloader: Arc<dyn Downloader>,
    localization: Localization,
    content_country: ContentCountry,
    services: Arc<ServiceRegistry>,
}

impl ExtractorContext {
    /// Context with default localization and the built-in services.
    pub fn new(downloader: Arc<dyn Downloader>) -> Self {
        Self {
            downloader,
            localization: Localization::default(),
            content_country: ContentCountry::default(),
            services: Arc::new(ServiceRegistry::with_builtin_services()),
        }
    }

    /// Context backed by an [`HttpDownloader`] built from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let downloader = HttpDownloader::new(&config.downloader)?;
        Ok(Self::new(Arc::new(downloader))
            .with_localization(config.localization()?)
            .with_content_country(config.content_country()))
    }

    #[must_use]
    pub fn with_localization(mut self, localization: Localization) -> Self {
        self.localization = localization;
        self
    }

    #[must_use]
    pub fn with_content_country(mut self, content_country: ContentCountry) -> Self {
        self.content_country = content_country;
        self
    }

    #[must_use]
    pub fn with_services(mut self, services: Arc<ServiceRegistry>) -> Self {
        self.services = services;
        self
    }

    #[must_use]
    pub fn downloader(&self) -> &Arc<dyn Downloader> {
        &self.downloader
    }

    #[must_use]
    pub const fn localization(&self) -> &Localization {
        &self.localization
    }

    #[must_use]
    pub const fn content_country(&self) -> &ContentCountry {
        &self.content_country
    }

    #[must_use]
    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }
}

impl std::fmt::Debug for ExtractorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorContext")
            .field("localization", &self.localization)
            .field("content_country", &self.content_country)
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}

static DEFAULT_CONTEXT: RwLock<Option<ExtractorContext>> = parking_lot::const_rwlock(None);

/// Install the default context with default localization.
pub fn init(downloader: Arc<dyn Downloader>) {
    initialize(downloader, None, None);
}

/// Install the default context.
///
/// Without an explicit content country the localization's country is used,
/// falling back to the default country.
pub fn initialize(
    downloader: Arc<dyn Downloader>,
    localization: Option<Localization>,
    content_country: Option<ContentCountry>,
) {
    let localization = localization.unwrap_or_default();
    let content_country = content_country.unwrap_or_else(|| {
        localization
            .country_code()
            .map(ContentCountry::new)
            .unwrap_or_default()
    });
    tracing::info!(%localization, %content_country, "initializing default extractor context");

    *DEFAULT_CONTEXT.write() = Some(
        ExtractorContext::new(downloader)
            .with_localization(localization)
            .with_content_country(content_country),
    );
}

/// Replace the default context wholesale.
pub fn set_context(ctx: ExtractorContext) {
    *DEFAULT_CONTEXT.write() = Some(ctx);
}

#[must_use]
pub fn is_initialized() -> bool {
    DEFAULT_CONTEXT.read().is_some()
}

/// The default context.
///
/// # Panics
///
/// Panics if neither [`init`] nor [`initialize`] has been called.
#[must_use]
pub fn context() -> ExtractorContext {
    match DEFAULT_CONTEXT.read().as_ref() {
        Some(ctx) => ctx.clone(),
        None => panic!("extractor context used before initialize()"),
    }
}

#[must_use]
pub fn preferred_localization() -> Localization {
    context().localization
}

/// Returns `false`, leaving nothing changed, before the default context exists.
pub fn set_preferred_localization(localization: Localization) -> bool {
    let mut guard = DEFAULT_CONTEXT.write();
    let Some(ctx) = guard.as_mut() else {
        tracing::warn!(%localization, "preferred localization set before initialize(), ignored");
        return false;
    };
    ctx.localization = localization;
    true
}

#[must_use]
pub fn preferred_content_country() -> ContentCountry {
    context().content_country
}

/// Returns `false`, leaving nothing changed, before the default context exists.
pub fn set_preferred_content_country(content_country: ContentCountry) -> bool {
    let mut guard = DEFAULT_CONTEXT.write();
    let Some(ctx) = guard.as_mut() else {
        tracing::warn!(%content_country, "preferred content country set before initialize(), ignored");
        return false;
    };
    ctx.content_country = content_country;
    true
}
