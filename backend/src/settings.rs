//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ROBOTS_*` environment variables, or a
//! configuration file, in OrthoConfig's usual precedence.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::UniquenessScope;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Settings for the robots service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROBOTS")]
pub struct RobotsSettings {
    /// Interface to listen on.
    pub host: Option<String>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// PostgreSQL connection URL. Without one, robots are kept in memory.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections the pool keeps open.
    pub pool_min_idle: Option<u32>,
    /// Whether an update may keep the robot's current name. On when unset.
    pub unique_name_excludes_self: Option<bool>,
}

impl RobotsSettings {
    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve the listening address.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the host does not resolve.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no address found for {}", self.host()),
                )
            })
    }

    /// Pool configuration when a database URL is present.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_deref().map(|url| {
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(PoolConfig::DEFAULT_MAX_SIZE))
                .with_min_idle(Some(self.pool_min_idle.unwrap_or(PoolConfig::DEFAULT_MIN_IDLE)))
        })
    }

    /// Return whether the uniqueness rule skips the row being updated.
    pub fn unique_name_excludes_self(&self) -> bool {
        self.unique_name_excludes_self.unwrap_or(true)
    }

    /// How updates are checked for name collisions.
    pub fn uniqueness_scope(&self) -> UniquenessScope {
        UniquenessScope::from_excludes_self(self.unique_name_excludes_self())
    }
}
