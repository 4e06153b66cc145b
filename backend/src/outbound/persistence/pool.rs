//! bb8 pool of `diesel-async` PostgreSQL connections.

use std::fmt;
use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Which pool operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolStage {
    /// Creating the pool and its initial idle connections.
    Build,
    /// Waiting for a connection.
    Checkout,
}

impl fmt::Display for PoolStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Build => "build",
            Self::Checkout => "checkout",
        })
    }
}

/// A pool failure, tagged with the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("database pool {stage} failed: {message}")]
pub struct PoolError {
    stage: PoolStage,
    message: String,
}

impl PoolError {
    /// A failure while building the pool.
    pub fn build(message: impl Into<String>) -> Self {
        Self {
            stage: PoolStage::Build,
            message: message.into(),
        }
    }

    /// A failure while checking out a connection.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self {
            stage: PoolStage::Checkout,
            message: message.into(),
        }
    }

    /// Stage that failed.
    pub fn stage(&self) -> PoolStage {
        self.stage
    }

    /// The driver's failure text.
    pub fn into_message(self) -> String {
        self.message
    }
}

/// Pool sizing and timeouts.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use robots_backend::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://robots@localhost/robots")
///     .with_max_size(4)
///     .with_min_idle(None)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Default upper bound on open connections.
    pub const DEFAULT_MAX_SIZE: u32 = 10;
    /// Default number of idle connections kept open.
    pub const DEFAULT_MIN_IDLE: u32 = 2;
    /// Default checkout timeout.
    pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

    /// Defaults for `database_url`.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: Self::DEFAULT_MAX_SIZE,
            min_idle: Some(Self::DEFAULT_MIN_IDLE),
            connection_timeout: Self::DEFAULT_CONNECTION_TIMEOUT,
        }
    }

    /// Cap the number of open connections.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// `None` lets the pool drain to zero idle connections.
    #[must_use]
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Bound how long a checkout waits for a free connection.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Database URL the pool connects to.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Maximum number of open connections.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Cloneable handle to the shared pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool, opening `min_idle` connections up front.
    ///
    /// # Errors
    ///
    /// [`PoolStage::Build`] when the URL is malformed or the initial
    /// connections cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Wait for a connection.
    ///
    /// # Errors
    ///
    /// [`PoolStage::Checkout`] when none frees up within the timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_applies_defaults() {
        let config = PoolConfig::new("postgres://localhost/robots");

        assert_eq!(config.database_url(), "postgres://localhost/robots");
        assert_eq!(config.max_size(), PoolConfig::DEFAULT_MAX_SIZE);
        assert_eq!(config.min_idle, Some(PoolConfig::DEFAULT_MIN_IDLE));
        assert_eq!(config.connection_timeout, PoolConfig::DEFAULT_CONNECTION_TIMEOUT);
    }

    #[rstest]
    fn builders_override_each_setting() {
        let config = PoolConfig::new("postgres://localhost/robots")
            .with_max_size(3)
            .with_min_idle(None)
            .with_connection_timeout(Duration::from_millis(250));

        assert_eq!(
            (config.max_size, config.min_idle, config.connection_timeout),
            (3, None, Duration::from_millis(250))
        );
    }

    #[rstest]
    #[case(PoolError::build("invalid URL"), PoolStage::Build, "database pool build failed: invalid URL")]
    #[case(PoolError::checkout("timed out"), PoolStage::Checkout, "database pool checkout failed: timed out")]
    fn errors_name_their_stage(
        #[case] error: PoolError,
        #[case] stage: PoolStage,
        #[case] rendered: &str,
    ) {
        assert_eq!(error.stage(), stage);
        assert_eq!(error.to_string(), rendered);
    }
}
