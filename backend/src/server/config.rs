//! HTTP server configuration object.

use std::net::SocketAddr;

use paintapp::startup::StorageBackend;

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: StorageBackend,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, storage: StorageBackend) -> Self {
        Self { bind_addr, storage }
    }
}
