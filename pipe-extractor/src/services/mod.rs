// Built-in services
//
// Services shipped with the crate; hosts register their own on top

pub mod peertube;

pub use peertube::{PeertubeInstance, PeertubeService};

use std::sync::Arc;

use crate::registry::ServiceRegistry;

/// Add every built-in service to `registry`.
pub fn register_builtin(registry: &mut ServiceRegistry) {
    registry.register(Arc::new(PeertubeService::new(
        PeertubeService::SERVICE_ID,
        PeertubeInstance::default(),
    )));
}
