// Kiosk List
//
// Factory-based table of a service's curated feeds (trending, featured and
// the like), keyed by kiosk id

use std::ops::{Deref, DerefMut};

use indexmap::IndexMap;

use crate::context::ExtractorContext;
use crate::error::{ExtractionError, Result};
use crate::extractor::ListExtractor;
use crate::helper;
use crate::info::ListInfo;
use crate::items::StreamInfoItem;
use crate::link_handler::ListLinkHandlerFactory;
use crate::localization::{ContentCountry, Localization};
use crate::page::{InfoItemsPage, Page};
use crate::service::StreamingService;

pub trait KioskExtractor: ListExtractor<Item = StreamInfoItem> {
    /// Id the kiosk is registered under. Usually the handler id.
    fn kiosk_id(&self) -> &str {
        self.id()
    }
}

/// Kiosk extractor factory function type
///
/// Called with the owning service, the context, the kiosk's canonical URL and
/// its id.
pub type KioskExtractorFactory = Box<
    dyn Fn(&dyn StreamingService, &ExtractorContext, &str, &str) -> Result<Box<dyn KioskExtractor>>
        + Send
        + Sync,
>;

struct KioskEntry {
    extractor_factory: KioskExtractorFactory,
    handler_factory: Box<dyn ListLinkHandlerFactory>,
}

/// Kiosks offered by one service
pub struct KioskList {
    ctx: ExtractorContext,
    entries: IndexMap<String, KioskEntry>,
    default_kiosk: Option<String>,
    forced_localization: Option<Localization>,
    forced_content_country: Option<ContentCountry>,
}

impl KioskList {
    /// Create new empty list; extractors are built with `ctx`
    pub fn new(ctx: &ExtractorContext) -> Self {
        Self {
            ctx: ctx.clone(),
            entries: IndexMap::new(),
            default_kiosk: None,
            forced_localization: None,
            forced_content_country: None,
        }
    }

    /// Register a kiosk. Ids must be unique within the list.
    pub fn add_kiosk_entry(
        &mut self,
        extractor_factory: KioskExtractorFactory,
        handler_factory: Box<dyn ListLinkHandlerFactory>,
        id: &str,
    ) -> Result<()> {
        if self.entries.contains_key(id) {
            return Err(ExtractionError::InvalidArgument(format!(
                "kiosk with id \"{id}\" already exists"
            )));
        }
        self.entries.insert(
            id.to_string(),
            KioskEntry {
                extractor_factory,
                handler_factory,
            },
        );
        Ok(())
    }

    pub fn set_default_kiosk(&mut self, id: &str) {
        self.default_kiosk = Some(id.to_string());
    }

    #[must_use]
    pub fn default_kiosk_id(&self) -> Option<&str> {
        self.default_kiosk
            .as_deref()
            .or_else(|| self.entries.keys().next().map(String::as_str))
    }

    /// Extractor for the default kiosk, or the first registered one.
    pub fn default_kiosk_extractor(
        &self,
        service: &dyn StreamingService,
    ) -> Result<Box<dyn KioskExtractor>> {
        let id = self.default_kiosk_id().ok_or_else(|| {
            ExtractionError::NothingFound(format!(
                "{} has no kiosks",
                service.service_info().name()
            ))
        })?;
        self.extractor_by_id(service, id)
    }

    pub fn extractor_by_id(
        &self,
        service: &dyn StreamingService,
        id: &str,
    ) -> Result<Box<dyn KioskExtractor>> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| ExtractionError::NothingFound(format!("no kiosk with id \"{id}\"")))?;

        let url = entry.handler_factory.from_id(id)?.url().to_string();
        let mut extractor = (entry.extractor_factory)(service, &self.ctx, &url, id)?;
        if let Some(localization) = &self.forced_localization {
            extractor.force_localization(localization.clone());
        }
        if let Some(content_country) = &self.forced_content_country {
            extractor.force_content_country(content_country.clone());
        }
        Ok(extractor)
    }

    /// Extractor for the first kiosk whose link handler accepts `url`.
    pub fn extractor_by_url(
        &self,
        service: &dyn StreamingService,
        url: &str,
    ) -> Result<Box<dyn KioskExtractor>> {
        for entry in self.entries.values() {
            if entry.handler_factory.accept_url(url)? {
                let id = entry.handler_factory.id(url)?;
                return self.extractor_by_id(service, &id);
            }
        }
        Err(ExtractionError::NothingFound(format!(
            "no kiosk fits the url \"{url}\""
        )))
    }

    /// Registered kiosk ids in registration order
    #[must_use]
    pub fn available_kiosks(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    #[must_use]
    pub fn link_handler_factory(&self, id: &str) -> Option<&dyn ListLinkHandlerFactory> {
        self.entries.get(id).map(|entry| entry.handler_factory.as_ref())
    }

    /// Localization every extractor built from now on is forced to.
    pub fn force_localization(&mut self, localization: Localization) {
        self.forced_localization = Some(localization);
    }

    pub fn force_content_country(&mut self, content_country: ContentCountry) {
        self.forced_content_country = Some(content_country);
    }
}

impl std::fmt::Debug for KioskList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KioskList")
            .field("kiosks", &self.entries.keys().collect::<Vec<_>>())
            .field("default_kiosk", &self.default_kiosk)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct KioskInfo {
    list: ListInfo<StreamInfoItem>,
}

impl KioskInfo {
    pub async fn get_info(ctx: &ExtractorContext, url: &str) -> Result<Self> {
        let service = ctx.services().service_by_url(url)?;
        Self::get_info_with_service(ctx, service.as_ref(), url).await
    }

    pub async fn get_info_with_service(
        ctx: &ExtractorContext,
        service: &dyn StreamingService,
        url: &str,
    ) -> Result<Self> {
        let mut extractor = service.kiosk_list(ctx)?.extractor_by_url(service, url)?;
        extractor.fetch_page().await?;
        Self::from_extractor(extractor.as_ref()).await
    }

    pub async fn from_extractor(extractor: &dyn KioskExtractor) -> Result<Self> {
        let mut list = ListInfo::new(
            extractor.service_id(),
            extractor.link_handler(),
            extractor.name()?,
        );
        list.set_original_url(extractor.original_url());

        let page = helper::items_page_or_log_error(&mut list, extractor).await;
        let (items, next_page, _) = page.into_parts();
        list.set_related_items(items);
        list.set_next_page(next_page);

        Ok(Self { list })
    }

    pub async fn get_more_items(
        ctx: &ExtractorContext,
        service: &dyn StreamingService,
        url: &str,
        page: &Page,
    ) -> Result<InfoItemsPage<StreamInfoItem>> {
        service
            .kiosk_list(ctx)?
            .extractor_by_url(service, url)?
            .page(page)
            .await
    }
}

impl Deref for KioskInfo {
    type Target = ListInfo<StreamInfoItem>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl DerefMut for KioskInfo {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{
        fake_context, fake_kiosk_factory as kiosk_factory, FakeLinkHandlerFactory, FakeService,
    };

    #[test]
    fn test_duplicate_kiosk_rejected() {
        let ctx = fake_context();
        let mut kiosks = KioskList::new(&ctx);
        kiosks
            .add_kiosk_entry(kiosk_factory(), Box::new(FakeLinkHandlerFactory::kiosk()), "Trending")
            .unwrap();

        let err = kiosks
            .add_kiosk_entry(kiosk_factory(), Box::new(FakeLinkHandlerFactory::kiosk()), "Trending")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidArgument(_)));
        assert_eq!(kiosks.available_kiosks(), ["Trending"]);
    }

    #[test]
    fn test_default_falls_back_to_first() {
        let ctx = fake_context();
        let service = FakeService::new(1);
        let mut kiosks = KioskList::new(&ctx);
        assert!(kiosks.default_kiosk_extractor(&service).is_err());

        for id in ["Trending", "Live"] {
            kiosks
                .add_kiosk_entry(kiosk_factory(), Box::new(FakeLinkHandlerFactory::kiosk()), id)
                .unwrap();
        }
        assert_eq!(kiosks.default_kiosk_extractor(&service).unwrap().kiosk_id(), "Trending");

        kiosks.set_default_kiosk("Live");
        assert_eq!(kiosks.default_kiosk_extractor(&service).unwrap().kiosk_id(), "Live");
    }

    #[test]
    fn test_forced_localization_applies_to_new_extractors() {
        let ctx = fake_context();
        let service = FakeService::new(1);
        let mut kiosks = service.kiosk_list(&ctx).unwrap();
        kiosks.force_localization(Localization::new("de", Some("DE")));
        kiosks.force_content_country(ContentCountry::new("DE"));

        let extractor = kiosks.extractor_by_id(&service, "Trending").unwrap();
        assert_eq!(extractor.extractor_localization().localization_code(), "de-DE");
        assert_eq!(extractor.extractor_content_country().country_code(), "DE");
    }

    #[test]
    fn test_extractor_by_url() {
        let ctx = fake_context();
        let service = FakeService::new(1);
        let kiosks = service.kiosk_list(&ctx).unwrap();

        let extractor = kiosks
            .extractor_by_url(&service, "https://fake.tv/kiosk/Popular")
            .unwrap();
        assert_eq!(extractor.kiosk_id(), "Popular");
        assert_eq!(extractor.url(), "https://fake.tv/kiosk/Popular");

        assert!(kiosks.extractor_by_url(&service, "https://fake.tv/channel/c1").is_err());
        assert!(kiosks.link_handler_factory("Popular").is_some());
        assert!(kiosks.link_handler_factory("Nope").is_none());
    }

    #[tokio::test]
    async fn test_kiosk_info() {
        let ctx = fake_context();
        let service = FakeService::new(1);

        let info = KioskInfo::get_info_with_service(&ctx, &service, "https://fake.tv/kiosk/Trending")
            .await
            .unwrap();
        assert_eq!(info.id(), "Trending");
        assert_eq!(info.name(), "Kiosk Trending");
        assert_eq!(info.related_items().len(), 2);
        assert!(info.has_next_page());

        let page = info.next_page().cloned().unwrap();
        let more = KioskInfo::get_more_items(&ctx, &service, info.url(), &page).await.unwrap();
        assert_eq!(more.items().len(), 1);
    }
}
