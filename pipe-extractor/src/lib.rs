pub mod channel;
pub mod collector;
pub mod comments;
pub mod config;
pub mod context;
pub mod description;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod feed;
pub mod helper;
pub mod image;
pub mod info;
pub mod items;
pub mod kiosk;
pub mod link_handler;
pub mod localization;
pub mod logging;
pub mod media_format;
pub mod page;
pub mod playlist;
pub mod registry;
pub mod search;
pub mod service;
pub mod services;
pub mod utils;

#[cfg(test)]
pub mod test_helpers;

pub use config::Config;
pub use context::{
    context, init, initialize, is_initialized, preferred_content_country, preferred_localization,
    set_context, set_preferred_content_country, set_preferred_localization, ExtractorContext,
};
pub use error::{ExtractionError, Result};
pub use extractor::{Extractor, ExtractorBase, ListExtractor};
pub use page::{InfoItemsPage, Page};
pub use registry::ServiceRegistry;
pub use service::{LinkType, MediaCapability, ServiceId, ServiceInfo, StreamingService};
