use crate::extractor::ListExtractor;
use crate::info::Info;
use crate::page::InfoItemsPage;

/// Initial page of `extractor`, degrading to an empty page on failure.
///
/// Errors of the page itself and the failure, if any, are added to `info`.
/// Subsequent pages are not routed through here: their failures belong to
/// the caller.
pub async fn items_page_or_log_error<E>(info: &mut Info, extractor: &E) -> InfoItemsPage<E::Item>
where
    E: ListExtractor + ?Sized,
{
    match extractor.initial_page().await {
        Ok(page) => {
            info.add_all_errors(page.errors().iter().cloned());
            page
        }
        Err(err) => {
            tracing::warn!(url = info.url(), error = %err, "failed to fetch initial page");
            info.add_error(err);
            InfoItemsPage::empty()
        }
    }
}
