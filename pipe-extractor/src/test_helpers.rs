//! Test helpers and fixtures for pipe-extractor tests
//!
//! A fake service on `fake.tv` with one fake extractor per kind, fake item
//! extractors whose fields can be broken one by one, and a downloader that
//! records what it was asked for.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use regex::Regex;
use url::Url;

use crate::channel::{ChannelExtractor, ChannelTab, ChannelTabExtractor};
use crate::collector::Collector;
use crate::comments::CommentsExtractor;
use crate::context::ExtractorContext;
use crate::description::{Description, MetaInfo};
use crate::downloader::{Downloader, Headers, Request, Response};
use crate::error::{ExtractionError, Result};
use crate::extractor::{Extractor, ExtractorBase, ListExtractor};
use crate::feed::FeedExtractor;
use crate::image::Image;
use crate::items::{
    ChannelInfoItemExtractor, CommentsInfoItem, CommentsInfoItemExtractor,
    CommentsInfoItemsCollector, InfoItemExtractor, MultiInfoItem, MultiInfoItemsCollector,
    PlaylistInfoItemExtractor, StreamInfoItem, StreamInfoItemExtractor, StreamInfoItemsCollector,
    StreamType,
};
use crate::kiosk::{KioskExtractor, KioskExtractorFactory, KioskList};
use crate::link_handler::{
    LinkHandlerFactory, ListLinkHandler, ListLinkHandlerFactory, SearchQueryHandler,
    SearchQueryHandlerFactory,
};
use crate::localization::{ContentCountry, DateWrapper, Localization};
use crate::page::{InfoItemsPage, Page};
use crate::playlist::PlaylistExtractor;
use crate::registry::ServiceRegistry;
use crate::search::{SearchExtractor, SuggestionExtractor};
use crate::service::{MediaCapability, ServiceId, ServiceInfo, StreamingService};
use crate::utils;

/// Context with a [`RecordingDownloader`] and only `FakeService::new(1)` registered.
pub fn fake_context() -> ExtractorContext {
    let mut registry = ServiceRegistry::new();
    registry.register(Arc::new(FakeService::new(1)));
    ExtractorContext::new(Arc::new(RecordingDownloader::new())).with_services(Arc::new(registry))
}

/// Field names a fake should fail on.
#[derive(Debug, Clone, Default)]
struct Failures(HashSet<&'static str>);

impl Failures {
    fn add(&mut self, field: &'static str) {
        self.0.insert(field);
    }

    fn check(&self, field: &str) -> Result<()> {
        if self.0.contains(field) {
            Err(ExtractionError::parsing(format!("could not get {field}")))
        } else {
            Ok(())
        }
    }

    fn get<T>(&self, field: &str, value: T) -> Result<T> {
        self.check(field).map(|()| value)
    }
}

// ========== Downloader ==========

/// Answers every request with `200 OK` and a fixed body.
pub struct RecordingDownloader {
    body: String,
    requests: Mutex<Vec<Request>>,
}

impl RecordingDownloader {
    pub fn new() -> Self {
        Self::with_body("{}")
    }

    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }
}

impl Default for RecordingDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Downloader for RecordingDownloader {
    async fn execute(&self, request: Request) -> Result<Response> {
        let url = request.url().to_string();
        self.requests.lock().push(request);
        Ok(Response::new(200, "OK", Headers::new(), self.body.clone(), url))
    }
}

// ========== Link handlers ==========

/// Accepts `https://<any subdomain of host>/<segment>/<id>`.
#[derive(Debug, Clone)]
pub struct FakeLinkHandlerFactory {
    host: String,
    segment: &'static str,
    id_pattern: Regex,
}

impl FakeLinkHandlerFactory {
    pub fn new(host: &str, segment: &'static str) -> Self {
        Self {
            host: host.to_string(),
            segment,
            id_pattern: Regex::new(&format!("^/{segment}/([^/?&#]+)")).unwrap(),
        }
    }

    pub fn stream() -> Self {
        Self::new("fake.tv", "watch")
    }

    pub fn channel() -> Self {
        Self::new("fake.tv", "channel")
    }

    pub fn playlist() -> Self {
        Self::new("fake.tv", "playlist")
    }

    pub fn kiosk() -> Self {
        Self::new("fake.tv", "kiosk")
    }
}

impl LinkHandlerFactory for FakeLinkHandlerFactory {
    fn id(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url)?;
        utils::match_group1(&self.id_pattern, parsed.path())
    }

    fn url(&self, id: &str) -> Result<String> {
        self.list_url(id, &[], "")
    }

    fn on_accept_url(&self, url: &str) -> Result<bool> {
        let Ok(parsed) = Url::parse(url) else {
            return Ok(false);
        };
        let host_matches = parsed.host_str().is_some_and(|host| host.ends_with(&self.host));
        Ok(host_matches && self.id_pattern.is_match(parsed.path()))
    }
}

impl ListLinkHandlerFactory for FakeLinkHandlerFactory {
    fn list_url(&self, id: &str, content_filters: &[String], sort_filter: &str) -> Result<String> {
        let mut url = format!("https://{}/{}/{id}", self.host, self.segment);
        if let Some(filter) = content_filters.first() {
            url.push('/');
            url.push_str(filter);
        }
        if !sort_filter.is_empty() {
            url.push_str("?sort=");
            url.push_str(sort_filter);
        }
        Ok(url)
    }
}

/// Search URLs look like `https://<host>/search?q=<query>`.
#[derive(Debug, Clone)]
pub struct FakeSearchQueryHandlerFactory {
    host: String,
}

impl FakeSearchQueryHandlerFactory {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
        }
    }
}

impl LinkHandlerFactory for FakeSearchQueryHandlerFactory {
    fn id(&self, url: &str) -> Result<String> {
        Url::parse(url)?
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| ExtractionError::parsing("no query"))
    }

    fn url(&self, id: &str) -> Result<String> {
        self.list_url(id, &[], "")
    }

    fn on_accept_url(&self, url: &str) -> Result<bool> {
        Ok(Url::parse(url).is_ok_and(|parsed| {
            parsed.host_str().is_some_and(|host| host.ends_with(&self.host))
                && parsed.path() == "/search"
        }))
    }
}

impl ListLinkHandlerFactory for FakeSearchQueryHandlerFactory {
    fn list_url(&self, id: &str, content_filters: &[String], sort_filter: &str) -> Result<String> {
        let mut url = format!("https://{}/search?q={}", self.host, utils::encode_url_utf8(id));
        for filter in content_filters {
            url.push_str("&type=");
            url.push_str(filter);
        }
        if !sort_filter.is_empty() {
            url.push_str("&sort=");
            url.push_str(sort_filter);
        }
        Ok(url)
    }
}

impl SearchQueryHandlerFactory for FakeSearchQueryHandlerFactory {}

// ========== Service ==========

pub struct FakeService {
    id: ServiceId,
    info: ServiceInfo,
    host: String,
    stream_lh: FakeLinkHandlerFactory,
    channel_lh: FakeLinkHandlerFactory,
    playlist_lh: FakeLinkHandlerFactory,
    comments_lh: Option<FakeLinkHandlerFactory>,
    search_qh: FakeSearchQueryHandlerFactory,
    localizations: Vec<Localization>,
    countries: Vec<ContentCountry>,
    suggestions: bool,
    feed: bool,
}

impl FakeService {
    pub fn new(id: ServiceId) -> Self {
        Self::named(id, "Fake", "fake.tv")
    }

    pub fn named(id: ServiceId, name: &str, host: &str) -> Self {
        Self {
            id,
            info: ServiceInfo::new(name, vec![MediaCapability::Video, MediaCapability::Comments]),
            host: host.to_string(),
            stream_lh: FakeLinkHandlerFactory::new(host, "watch"),
            channel_lh: FakeLinkHandlerFactory::new(host, "channel"),
            playlist_lh: FakeLinkHandlerFactory::new(host, "playlist"),
            comments_lh: Some(FakeLinkHandlerFactory::new(host, "watch")),
            search_qh: FakeSearchQueryHandlerFactory::new(host),
            localizations: Vec::new(),
            countries: Vec::new(),
            suggestions: true,
            feed: true,
        }
    }

    pub fn with_localizations(mut self, codes: &[&str]) -> Self {
        self.localizations = Localization::list_from(codes).unwrap();
        self
    }

    pub fn with_countries(mut self, codes: &[&str]) -> Self {
        self.countries = ContentCountry::list_from(codes);
        self
    }

    pub fn without_comments(mut self) -> Self {
        self.comments_lh = None;
        self
    }

    pub fn without_suggestions(mut self) -> Self {
        self.suggestions = false;
        self
    }

    pub fn without_feed(mut self) -> Self {
        self.feed = false;
        self
    }
}

pub fn fake_kiosk_factory() -> KioskExtractorFactory {
    Box::new(
        |service: &dyn StreamingService, ctx: &ExtractorContext, url: &str, _id: &str| {
            let extractor: Box<dyn KioskExtractor> =
                Box::new(FakeKioskExtractor::new(service, ctx, url));
            Ok(extractor)
        },
    )
}

impl StreamingService for FakeService {
    fn service_id(&self) -> ServiceId {
        self.id
    }

    fn service_info(&self) -> &ServiceInfo {
        &self.info
    }

    fn base_url(&self) -> String {
        format!("https://{}", self.host)
    }

    fn stream_lh_factory(&self) -> Option<&dyn LinkHandlerFactory> {
        Some(&self.stream_lh)
    }

    fn channel_lh_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        Some(&self.channel_lh)
    }

    fn channel_tab_lh_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        Some(&self.channel_lh)
    }

    fn playlist_lh_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        Some(&self.playlist_lh)
    }

    fn search_qh_factory(&self) -> Option<&dyn SearchQueryHandlerFactory> {
        Some(&self.search_qh)
    }

    fn comments_lh_factory(&self) -> Option<&dyn ListLinkHandlerFactory> {
        self.comments_lh
            .as_ref()
            .map(|factory| factory as &dyn ListLinkHandlerFactory)
    }

    fn channel_extractor(
        &self,
        ctx: &ExtractorContext,
        handler: ListLinkHandler,
    ) -> Result<Box<dyn ChannelExtractor>> {
        Ok(Box::new(FakeChannelExtractor::from_handler(self, ctx, handler)))
    }

    fn channel_tab_extractor(
        &self,
        ctx: &ExtractorContext,
        handler: ListLinkHandler,
    ) -> Result<Box<dyn ChannelTabExtractor>> {
        Ok(Box::new(FakeTabExtractor::new(self, ctx, handler)))
    }

    fn playlist_extractor(
        &self,
        ctx: &ExtractorContext,
        handler: ListLinkHandler,
    ) -> Result<Box<dyn PlaylistExtractor>> {
        Ok(Box::new(FakePlaylistExtractor::from_handler(self, ctx, handler)))
    }

    fn comments_extractor(
        &self,
        ctx: &ExtractorContext,
        handler: ListLinkHandler,
    ) -> Result<Box<dyn CommentsExtractor>> {
        Ok(Box::new(FakeCommentsExtractor {
            base: ExtractorBase::new(self, ctx, handler),
        }))
    }

    fn search_extractor(
        &self,
        ctx: &ExtractorContext,
        handler: SearchQueryHandler,
    ) -> Result<Box<dyn SearchExtractor>> {
        Ok(Box::new(FakeSearchExtractor {
            base: ExtractorBase::new(self, ctx, handler.into_list_handler()),
        }))
    }

    fn suggestion_extractor(&self, _ctx: &ExtractorContext) -> Result<Box<dyn SuggestionExtractor>> {
        if self.suggestions {
            Ok(Box::new(FakeSuggestionExtractor { service_id: self.id }))
        } else {
            Err(ExtractionError::unsupported("no suggestions"))
        }
    }

    fn feed_extractor(
        &self,
        ctx: &ExtractorContext,
        url: &str,
    ) -> Result<Option<Box<dyn FeedExtractor>>> {
        if !self.feed {
            return Ok(None);
        }
        let handler = self.channel_lh.from_list_url(url)?;
        Ok(Some(Box::new(FakeFeedExtractor {
            base: ExtractorBase::new(self, ctx, handler),
        })))
    }

    fn kiosk_list(&self, ctx: &ExtractorContext) -> Result<KioskList> {
        let mut kiosks = KioskList::new(ctx);
        for id in ["Trending", "Popular"] {
            kiosks.add_kiosk_entry(fake_kiosk_factory(), Box::new(FakeLinkHandlerFactory::kiosk()), id)?;
        }
        kiosks.set_default_kiosk("Trending");
        Ok(kiosks)
    }

    fn supported_localizations(&self) -> Vec<Localization> {
        if self.localizations.is_empty() {
            vec![Localization::default()]
        } else {
            self.localizations.clone()
        }
    }

    fn supported_countries(&self) -> Vec<ContentCountry> {
        if self.countries.is_empty() {
            vec![ContentCountry::default()]
        } else {
            self.countries.clone()
        }
    }
}

fn stream_items(service_id: ServiceId, prefix: &str, count: usize) -> StreamInfoItemsCollector {
    let mut collector = StreamInfoItemsCollector::new(service_id);
    for i in 0..count {
        collector.commit(&FakeStreamItem::new(format!("{prefix}-{i}")));
    }
    collector
}

fn next_page_of(url: &str) -> Option<Page> {
    Some(Page::with_url(format!("{url}?page=2")))
}

// ========== Extractors ==========

pub struct FakeChannelExtractor {
    base: ExtractorBase,
    failures: Failures,
    fail_fetch: bool,
    fetch_count: usize,
}

impl FakeChannelExtractor {
    pub const SUBSCRIBERS: i64 = 1234;

    pub fn new(service: &dyn StreamingService, ctx: &ExtractorContext, url: &str) -> Self {
        let handler = service
            .channel_lh_factory()
            .unwrap()
            .from_list_url(url)
            .unwrap();
        Self::from_handler(service, ctx, handler)
    }

    pub fn from_handler(
        service: &dyn StreamingService,
        ctx: &ExtractorContext,
        handler: ListLinkHandler,
    ) -> Self {
        Self {
            base: ExtractorBase::new(service, ctx, handler),
            failures: Failures::default(),
            fail_fetch: false,
            fetch_count: 0,
        }
    }

    pub fn failing(mut self, field: &'static str) -> Self {
        self.failures.add(field);
        self
    }

    pub fn fail_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count
    }

    fn tab(&self, tab: &str) -> ChannelTab {
        let url = format!("{}/{tab}", self.url());
        ChannelTab::Link(ListLinkHandler::new(
            url.clone(),
            url,
            self.id(),
            vec![tab.to_string()],
            "",
        ))
    }
}

#[async_trait]
impl Extractor for FakeChannelExtractor {
    fn base(&self) -> &ExtractorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ExtractorBase {
        &mut self.base
    }

    async fn on_fetch_page(&mut self, downloader: &dyn Downloader) -> Result<()> {
        if self.fail_fetch {
            return Err(ExtractionError::Network("connection reset".to_string()));
        }
        let url = self.url().to_string();
        downloader.get(&url, Some(self.extractor_localization())).await?;
        self.fetch_count += 1;
        Ok(())
    }

    fn name(&self) -> Result<String> {
        self.assert_page_fetched();
        self.failures.get("name", format!("Channel {}", self.id()))
    }
}

impl ChannelExtractor for FakeChannelExtractor {
    fn avatars(&self) -> Result<Vec<Image>> {
        self.failures.check("avatars")?;
        Ok(vec![Image::with_size("https://fake.tv/img/avatar.jpg", 88, 88)?])
    }

    fn banners(&self) -> Result<Vec<Image>> {
        self.failures.get("banners", Vec::new())
    }

    fn feed_url(&self) -> Result<Option<String>> {
        self.failures
            .get("feed_url", Some(format!("https://fake.tv/feeds/{}", self.id())))
    }

    fn subscriber_count(&self) -> Result<i64> {
        self.failures.get("subscriber_count", Self::SUBSCRIBERS)
    }

    fn description(&self) -> Result<Option<String>> {
        self.failures
            .get("description", Some(format!("About {}", self.id())))
    }

    fn parent_channel_name(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn parent_channel_url(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn parent_channel_avatars(&self) -> Result<Vec<Image>> {
        Ok(Vec::new())
    }

    fn is_verified(&self) -> Result<bool> {
        self.failures.get("verified", true)
    }

    fn tabs(&self) -> Result<Vec<ChannelTab>> {
        self.failures.check("tabs")?;
        Ok(vec![self.tab("videos"), self.tab("playlists")])
    }
}

/// Channel tab listing `count` streams.
pub struct FakeTabExtractor {
    base: ExtractorBase,
    count: usize,
    next_page: Option<Page>,
    fail_initial_page: bool,
}

impl FakeTabExtractor {
    pub fn new(service: &dyn StreamingService, ctx: &ExtractorContext, handler: ListLinkHandler) -> Self {
        let next_page = next_page_of(handler.url());
        Self {
            base: ExtractorBase::new(service, ctx, handler),
            count: 2,
            next_page,
            fail_initial_page: false,
        }
    }

    pub fn with_items(mut self, count: usize, next_page: Option<Page>) -> Self {
        self.count = count;
        self.next_page = next_page;
        self
    }

    pub fn failing_initial_page(mut self) -> Self {
        self.fail_initial_page = true;
        self
    }

    fn items(&self, count: usize, next_page: Option<Page>) -> InfoItemsPage<MultiInfoItem> {
        let mut collector = MultiInfoItemsCollector::new(self.service_id());
        for i in 0..count {
            collector.commit(&FakeStreamItem::new(format!("{}-{i}", self.id())));
        }
        InfoItemsPage::from_collector(&collector, next_page)
    }
}

#[async_trait]
impl Extractor for FakeTabExtractor {
    fn base(&self) -> &ExtractorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ExtractorBase {
        &mut self.base
    }

    async fn on_fetch_page(&mut self, _downloader: &dyn Downloader) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> Result<String> {
        Ok(self.tab().to_string())
    }
}

#[async_trait]
impl ListExtractor for FakeTabExtractor {
    type Item = MultiInfoItem;

    async fn initial_page(&self) -> Result<InfoItemsPage<MultiInfoItem>> {
        if self.fail_initial_page {
            return Err(ExtractionError::parsing("could not get tab content"));
        }
        Ok(self.items(self.count, self.next_page.clone()))
    }

    async fn page(&self, page: &Page) -> Result<InfoItemsPage<MultiInfoItem>> {
        if page.url.as_deref() == Some("broken") {
            return Err(ExtractionError::Network("connection reset".to_string()));
        }
        Ok(self.items(2, None))
    }
}

impl ChannelTabExtractor for FakeTabExtractor {}

/// Three streams on the first page, one on the second.
pub struct FakePlaylistExtractor {
    base: ExtractorBase,
    failures: Failures,
}

impl FakePlaylistExtractor {
    pub fn new(service: &dyn StreamingService, ctx: &ExtractorContext, url: &str) -> Self {
        let handler = service
            .playlist_lh_factory()
            .unwrap()
            .from_list_url(url)
            .unwrap();
        Self::from_handler(service, ctx, handler)
    }

    pub fn from_handler(
        service: &dyn StreamingService,
        ctx: &ExtractorContext,
        handler: ListLinkHandler,
    ) -> Self {
        Self {
            base: ExtractorBase::new(service, ctx, handler),
            failures: Failures::default(),
        }
    }

    pub fn failing(mut self, field: &'static str) -> Self {
        self.failures.add(field);
        self
    }
}

#[async_trait]
impl Extractor for FakePlaylistExtractor {
    fn base(&self) -> &ExtractorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ExtractorBase {
        &mut self.base
    }

    async fn on_fetch_page(&mut self, _downloader: &dyn Downloader) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> Result<String> {
        self.failures.get("name", format!("Playlist {}", self.id()))
    }
}

#[async_trait]
impl ListExtractor for FakePlaylistExtractor {
    type Item = StreamInfoItem;

    async fn initial_page(&self) -> Result<InfoItemsPage<StreamInfoItem>> {
        let collector = stream_items(self.service_id(), self.id(), 3);
        Ok(InfoItemsPage::from_collector(&collector, next_page_of(self.url())))
    }

    async fn page(&self, _page: &Page) -> Result<InfoItemsPage<StreamInfoItem>> {
        let collector = stream_items(self.service_id(), self.id(), 1);
        Ok(InfoItemsPage::from_collector(&collector, None))
    }
}

impl PlaylistExtractor for FakePlaylistExtractor {
    fn thumbnails(&self) -> Result<Vec<Image>> {
        self.failures.get("thumbnails", Vec::new())
    }

    fn uploader_url(&self) -> Result<String> {
        self.failures
            .get("uploader_url", "https://fake.tv/channel/owner".to_string())
    }

    fn uploader_name(&self) -> Result<String> {
        self.failures.get("uploader_name", "Owner".to_string())
    }

    fn uploader_avatars(&self) -> Result<Vec<Image>> {
        self.failures.get("uploader_avatars", Vec::new())
    }

    fn stream_count(&self) -> Result<i64> {
        self.failures.get("stream_count", 3)
    }

    fn description(&self) -> Result<Description> {
        self.failures
            .get("description", Description::plain("A fake playlist"))
    }
}

/// Two comments, then one more on the next page.
pub struct FakeCommentsExtractor {
    base: ExtractorBase,
}

impl FakeCommentsExtractor {
    fn comments(&self, count: usize, next_page: Option<Page>) -> InfoItemsPage<CommentsInfoItem> {
        let mut collector = CommentsInfoItemsCollector::new(self.service_id());
        for i in 0..count {
            collector.commit(&FakeCommentItem(format!("{}-{i}", self.id())));
        }
        InfoItemsPage::from_collector(&collector, next_page)
    }
}

#[async_trait]
impl Extractor for FakeCommentsExtractor {
    fn base(&self) -> &ExtractorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ExtractorBase {
        &mut self.base
    }

    async fn on_fetch_page(&mut self, _downloader: &dyn Downloader) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> Result<String> {
        Ok("Comments".to_string())
    }
}

#[async_trait]
impl ListExtractor for FakeCommentsExtractor {
    type Item = CommentsInfoItem;

    async fn initial_page(&self) -> Result<InfoItemsPage<CommentsInfoItem>> {
        Ok(self.comments(2, next_page_of(self.url())))
    }

    async fn page(&self, _page: &Page) -> Result<InfoItemsPage<CommentsInfoItem>> {
        Ok(self.comments(1, None))
    }
}

impl CommentsExtractor for FakeCommentsExtractor {
    fn comments_count(&self) -> Result<i64> {
        Ok(2)
    }
}

/// One stream, one channel with a broken subscriber count, one playlist.
pub struct FakeSearchExtractor {
    base: ExtractorBase,
}

#[async_trait]
impl Extractor for FakeSearchExtractor {
    fn base(&self) -> &ExtractorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ExtractorBase {
        &mut self.base
    }

    async fn on_fetch_page(&mut self, _downloader: &dyn Downloader) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> Result<String> {
        Ok(self.search_string().to_string())
    }
}

#[async_trait]
impl ListExtractor for FakeSearchExtractor {
    type Item = MultiInfoItem;

    async fn initial_page(&self) -> Result<InfoItemsPage<MultiInfoItem>> {
        let mut collector = MultiInfoItemsCollector::new(self.service_id());
        collector.commit(&FakeStreamItem::new("s"));
        collector.commit(&FakeChannelItem::new("c").failing("subscriber_count"));
        collector.commit(&FakePlaylistItem::new("p"));
        Ok(InfoItemsPage::from_collector(&collector, None))
    }

    async fn page(&self, _page: &Page) -> Result<InfoItemsPage<MultiInfoItem>> {
        Ok(InfoItemsPage::empty())
    }
}

impl SearchExtractor for FakeSearchExtractor {
    fn search_suggestion(&self) -> Result<String> {
        Ok("rust language".to_string())
    }

    fn is_corrected_search(&self) -> Result<bool> {
        Ok(true)
    }

    fn meta_info(&self) -> Result<Vec<MetaInfo>> {
        Ok(Vec::new())
    }
}

pub struct FakeSuggestionExtractor {
    service_id: ServiceId,
}

#[async_trait]
impl SuggestionExtractor for FakeSuggestionExtractor {
    fn service_id(&self) -> ServiceId {
        self.service_id
    }

    async fn suggestion_list(&self, query: &str) -> Result<Vec<String>> {
        Ok(vec![query.to_string(), format!("{query} music")])
    }
}

pub struct FakeFeedExtractor {
    base: ExtractorBase,
}

#[async_trait]
impl Extractor for FakeFeedExtractor {
    fn base(&self) -> &ExtractorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ExtractorBase {
        &mut self.base
    }

    async fn on_fetch_page(&mut self, _downloader: &dyn Downloader) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> Result<String> {
        Ok(format!("Feed {}", self.id()))
    }
}

#[async_trait]
impl ListExtractor for FakeFeedExtractor {
    type Item = StreamInfoItem;

    async fn initial_page(&self) -> Result<InfoItemsPage<StreamInfoItem>> {
        let collector = stream_items(self.service_id(), self.id(), 2);
        Ok(InfoItemsPage::from_collector(&collector, None))
    }

    async fn page(&self, _page: &Page) -> Result<InfoItemsPage<StreamInfoItem>> {
        Ok(InfoItemsPage::empty())
    }
}

impl FeedExtractor for FakeFeedExtractor {}

/// Two streams, then one more on the next page.
pub struct FakeKioskExtractor {
    base: ExtractorBase,
}

impl FakeKioskExtractor {
    pub fn new(service: &dyn StreamingService, ctx: &ExtractorContext, url: &str) -> Self {
        let handler = FakeLinkHandlerFactory::kiosk().from_list_url(url).unwrap();
        Self {
            base: ExtractorBase::new(service, ctx, handler),
        }
    }
}

#[async_trait]
impl Extractor for FakeKioskExtractor {
    fn base(&self) -> &ExtractorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ExtractorBase {
        &mut self.base
    }

    async fn on_fetch_page(&mut self, _downloader: &dyn Downloader) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> Result<String> {
        Ok(format!("Kiosk {}", self.id()))
    }
}

#[async_trait]
impl ListExtractor for FakeKioskExtractor {
    type Item = StreamInfoItem;

    async fn initial_page(&self) -> Result<InfoItemsPage<StreamInfoItem>> {
        let collector = stream_items(self.service_id(), self.id(), 2);
        Ok(InfoItemsPage::from_collector(&collector, next_page_of(self.url())))
    }

    async fn page(&self, _page: &Page) -> Result<InfoItemsPage<StreamInfoItem>> {
        let collector = stream_items(self.service_id(), self.id(), 1);
        Ok(InfoItemsPage::from_collector(&collector, None))
    }
}

impl KioskExtractor for FakeKioskExtractor {}

// ========== Item extractors ==========

pub struct FakeStreamItem {
    name: String,
    failures: Failures,
    ad: bool,
}

impl FakeStreamItem {
    pub const VIEW_COUNT: i64 = 1000;
    pub const DURATION: i64 = 300;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failures: Failures::default(),
            ad: false,
        }
    }

    pub fn failing(mut self, field: &'static str) -> Self {
        self.failures.add(field);
        self
    }

    pub fn ad(mut self) -> Self {
        self.ad = true;
        self
    }
}

impl InfoItemExtractor for FakeStreamItem {
    fn name(&self) -> Result<String> {
        self.failures.get("name", self.name.clone())
    }

    fn url(&self) -> Result<String> {
        self.failures
            .get("url", format!("https://fake.tv/watch/{}", self.name))
    }

    fn thumbnails(&self) -> Result<Vec<Image>> {
        self.failures.get("thumbnails", Vec::new())
    }

    fn as_stream(&self) -> Option<&dyn StreamInfoItemExtractor> {
        Some(self)
    }
}

impl StreamInfoItemExtractor for FakeStreamItem {
    fn is_ad(&self) -> Result<bool> {
        Ok(self.ad)
    }

    fn stream_type(&self) -> Result<StreamType> {
        self.failures.get("stream_type", StreamType::VideoStream)
    }

    fn duration(&self) -> Result<i64> {
        self.failures.get("duration", Self::DURATION)
    }

    fn view_count(&self) -> Result<i64> {
        self.failures.get("view_count", Self::VIEW_COUNT)
    }

    fn uploader_name(&self) -> Result<String> {
        self.failures.get("uploader_name", "Uploader".to_string())
    }

    fn uploader_url(&self) -> Result<String> {
        self.failures
            .get("uploader_url", "https://fake.tv/channel/uploader".to_string())
    }

    fn is_uploader_verified(&self) -> Result<bool> {
        self.failures.get("uploader_verified", false)
    }

    fn textual_upload_date(&self) -> Result<Option<String>> {
        self.failures
            .get("textual_upload_date", Some("2 days ago".to_string()))
    }

    fn upload_date(&self) -> Result<Option<DateWrapper>> {
        self.failures.get("upload_date", None)
    }
}

pub struct FakeChannelItem {
    name: String,
    failures: Failures,
    subscribers: i64,
}

impl FakeChannelItem {
    pub const STREAM_COUNT: i64 = 42;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failures: Failures::default(),
            subscribers: 100,
        }
    }

    pub fn failing(mut self, field: &'static str) -> Self {
        self.failures.add(field);
        self
    }

    pub fn subscribers(mut self, subscribers: i64) -> Self {
        self.subscribers = subscribers;
        self
    }
}

impl InfoItemExtractor for FakeChannelItem {
    fn name(&self) -> Result<String> {
        self.failures.get("name", self.name.clone())
    }

    fn url(&self) -> Result<String> {
        self.failures
            .get("url", format!("https://fake.tv/channel/{}", self.name))
    }

    fn thumbnails(&self) -> Result<Vec<Image>> {
        self.failures.get("thumbnails", Vec::new())
    }

    fn as_channel(&self) -> Option<&dyn ChannelInfoItemExtractor> {
        Some(self)
    }
}

impl ChannelInfoItemExtractor for FakeChannelItem {
    fn description(&self) -> Result<Option<String>> {
        self.failures.get("description", None)
    }

    fn subscriber_count(&self) -> Result<i64> {
        self.failures.get("subscriber_count", self.subscribers)
    }

    fn stream_count(&self) -> Result<i64> {
        self.failures.get("stream_count", Self::STREAM_COUNT)
    }

    fn is_verified(&self) -> Result<bool> {
        self.failures.get("verified", false)
    }
}

pub struct FakePlaylistItem {
    name: String,
    failures: Failures,
}

impl FakePlaylistItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failures: Failures::default(),
        }
    }

    pub fn failing(mut self, field: &'static str) -> Self {
        self.failures.add(field);
        self
    }
}

impl InfoItemExtractor for FakePlaylistItem {
    fn name(&self) -> Result<String> {
        self.failures.get("name", self.name.clone())
    }

    fn url(&self) -> Result<String> {
        self.failures
            .get("url", format!("https://fake.tv/playlist/{}", self.name))
    }

    fn thumbnails(&self) -> Result<Vec<Image>> {
        self.failures.get("thumbnails", Vec::new())
    }

    fn as_playlist(&self) -> Option<&dyn PlaylistInfoItemExtractor> {
        Some(self)
    }
}

impl PlaylistInfoItemExtractor for FakePlaylistItem {
    fn uploader_name(&self) -> Result<String> {
        self.failures.get("uploader_name", "Owner".to_string())
    }

    fn uploader_url(&self) -> Result<String> {
        self.failures
            .get("uploader_url", "https://fake.tv/channel/owner".to_string())
    }

    fn is_uploader_verified(&self) -> Result<bool> {
        self.failures.get("uploader_verified", false)
    }

    fn stream_count(&self) -> Result<i64> {
        self.failures.get("stream_count", 5)
    }
}

struct FakeCommentItem(String);

impl InfoItemExtractor for FakeCommentItem {
    fn name(&self) -> Result<String> {
        Ok(self.0.clone())
    }

    fn url(&self) -> Result<String> {
        Ok(format!("https://fake.tv/comment/{}", self.0))
    }

    fn thumbnails(&self) -> Result<Vec<Image>> {
        Ok(Vec::new())
    }

    fn as_comment(&self) -> Option<&dyn CommentsInfoItemExtractor> {
        Some(self)
    }
}

impl CommentsInfoItemExtractor for FakeCommentItem {
    fn comment_text(&self) -> Result<Description> {
        Ok(Description::plain(format!("comment {}", self.0)))
    }
}
