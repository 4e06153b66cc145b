//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use robots_backend::domain::UniquenessScope;
use robots_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) uniqueness: UniquenessScope,
}

impl ServerConfig {
    /// Construct a server configuration listening on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            uniqueness: UniquenessScope::default(),
        }
    }

    /// Attach a database connection pool for the robot repository.
    ///
    /// Without one the server keeps robots in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Choose how updates are checked for name collisions.
    #[must_use]
    pub fn with_uniqueness_scope(mut self, uniqueness: UniquenessScope) -> Self {
        self.uniqueness = uniqueness;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by server tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
