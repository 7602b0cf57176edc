// Service Registry
//
// Ordered table of services; URL resolution walks it in registration order

use std::sync::Arc;

use crate::error::{ExtractionError, Result};
use crate::service::{LinkType, ServiceId, StreamingService};

pub struct ServiceRegistry {
    services: Vec<Arc<dyn StreamingService>>,
}

impl ServiceRegistry {
    /// Create new empty registry
    #[must_use]
    pub const fn new() -> Self {
        Self {
            services: Vec::new(),
        }
    }

    /// Registry holding every built-in service
    #[must_use]
    pub fn with_builtin_services() -> Self {
        let mut registry = Self::new();
        crate::services::register_builtin(&mut registry);
        registry
    }

    /// Register a service; an existing service with the same id is replaced
    /// in place so resolution order is kept.
    pub fn register(&mut self, service: Arc<dyn StreamingService>) {
        let id = service.service_id();
        if let Some(slot) = self.services.iter_mut().find(|s| s.service_id() == id) {
            tracing::debug!(service_id = id, "replacing registered service");
            *slot = service;
        } else {
            self.services.push(service);
        }
    }

    #[must_use]
    pub fn services(&self) -> &[Arc<dyn StreamingService>] {
        &self.services
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ServiceId> {
        self.services.iter().map(|s| s.service_id()).collect()
    }

    pub fn service(&self, id: ServiceId) -> Result<Arc<dyn StreamingService>> {
        self.services
            .iter()
            .find(|s| s.service_id() == id)
            .cloned()
            .ok_or_else(|| ExtractionError::ServiceNotFound(format!("no service with id {id}")))
    }

    pub fn service_by_name(&self, name: &str) -> Result<Arc<dyn StreamingService>> {
        self.services
            .iter()
            .find(|s| s.service_info().name().eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| ExtractionError::ServiceNotFound(format!("no service named \"{name}\"")))
    }

    /// First service whose stream, channel or playlist factory accepts `url`.
    pub fn service_by_url(&self, url: &str) -> Result<Arc<dyn StreamingService>> {
        for service in &self.services {
            if service.link_type_by_url(url)? != LinkType::None {
                tracing::debug!(
                    service_id = service.service_id(),
                    service = service.service_info().name(),
                    url,
                    "resolved service for url"
                );
                return Ok(Arc::clone(service));
            }
        }
        Err(ExtractionError::NoService(url.to_string()))
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(
                self.services
                    .iter()
                    .map(|s| format!("{}:{}", s.service_id(), s.service_info().name())),
            )
            .finish()
    }
}
