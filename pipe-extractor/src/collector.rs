//! Collectors turn item extractors into validated item lists
//!
//! A failing required field drops only that entry; a failing optional field
//! is recorded and the entry is kept. Advertisements are skipped silently.

use std::cmp::Ordering;

use crate::error::{ExtractionError, Result};
use crate::service::ServiceId;

/// Ordering applied by [`Collector::items`].
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Accumulates the failures of one assembly operation.
///
/// Every optional field goes through [`ErrorSink::try_get`] or
/// [`ErrorSink::try_set`] so one broken field never aborts its siblings.
pub struct ErrorSink<'a> {
    errors: &'a mut Vec<ExtractionError>,
}

impl<'a> ErrorSink<'a> {
    pub fn new(errors: &'a mut Vec<ExtractionError>) -> Self {
        Self { errors }
    }

    /// Run `f`; on failure record the error and return `None`.
    pub fn try_get<T>(&mut self, field: &str, f: impl FnOnce() -> Result<T>) -> Option<T> {
        match f() {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(field, error = %err, "optional field extraction failed");
                self.errors.push(err);
                None
            }
        }
    }

    /// Run `f` and store its value in `target`; on failure `target` keeps its default.
    pub fn try_set<T>(&mut self, target: &mut T, field: &str, f: impl FnOnce() -> Result<T>) {
        if let Some(value) = self.try_get(field, f) {
            *target = value;
        }
    }

    pub fn record(&mut self, err: ExtractionError) {
        self.errors.push(err);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Items, errors and ordering shared by every collector.
pub struct CollectorState<T> {
    service_id: ServiceId,
    items: Vec<T>,
    errors: Vec<ExtractionError>,
    comparator: Option<Comparator<T>>,
}

impl<T> CollectorState<T> {
    #[must_use]
    pub const fn new(service_id: ServiceId) -> Self {
        Self {
            service_id,
            items: Vec::new(),
            errors: Vec::new(),
            comparator: None,
        }
    }

    #[must_use]
    pub const fn service_id(&self) -> ServiceId {
        self.service_id
    }

    pub fn push_item(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn push_error(&mut self, err: ExtractionError) {
        self.errors.push(err);
    }

    /// Sink over this collector's error list.
    pub fn sink(&mut self) -> ErrorSink<'_> {
        ErrorSink::new(&mut self.errors)
    }
}

impl<T> std::fmt::Debug for CollectorState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectorState")
            .field("service_id", &self.service_id)
            .field("items", &self.items.len())
            .field("errors", &self.errors.len())
            .field("sorted", &self.comparator.is_some())
            .finish()
    }
}

/// Converts item extractors of one kind into items.
pub trait Collector {
    type Item: Clone;
    type Extractor: ?Sized;

    fn state(&self) -> &CollectorState<Self::Item>;

    fn state_mut(&mut self) -> &mut CollectorState<Self::Item>;

    /// Build an item. Required fields propagate their error; optional fields
    /// record theirs in the collector and leave the default in place.
    fn extract(&mut self, extractor: &Self::Extractor) -> Result<Self::Item>;

    /// Extract and keep the item; never fails.
    fn commit(&mut self, extractor: &Self::Extractor) {
        match self.extract(extractor) {
            Ok(item) => self.state_mut().push_item(item),
            Err(err) if err.is_ad() => tracing::trace!("skipping advertisement"),
            Err(err) => {
                tracing::debug!(error = %err, "dropping item that failed a required field");
                self.state_mut().push_error(err);
            }
        }
    }

    /// Collected items, stably sorted when a comparator is set.
    fn items(&self) -> Vec<Self::Item> {
        let state = self.state();
        let mut items = state.items.clone();
        if let Some(comparator) = &state.comparator {
            items.sort_by(|a, b| comparator(a, b));
        }
        items
    }

    fn errors(&self) -> &[ExtractionError] {
        &self.state().errors
    }

    fn service_id(&self) -> ServiceId {
        self.state().service_id
    }

    fn set_comparator(&mut self, comparator: Comparator<Self::Item>) {
        self.state_mut().comparator = Some(comparator);
    }

    /// Forget collected items and errors; the comparator is kept.
    fn reset(&mut self) {
        let state = self.state_mut();
        state.items.clear();
        state.errors.clear();
    }
}
