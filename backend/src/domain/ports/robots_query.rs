//! Driving port for reading robots.

use async_trait::async_trait;

use crate::domain::{Error, Robot, RobotId};

/// Read-side use-cases exposed to inbound adapters.
#[async_trait]
pub trait RobotsQuery: Send + Sync {
    /// All robots ordered by name.
    async fn list_robots(&self) -> Result<Vec<Robot>, Error>;

    /// Robots whose name contains `fragment`, ignoring case, ordered by name.
    async fn search_robots(&self, fragment: &str) -> Result<Vec<Robot>, Error>;

    /// Point lookup; `Ok(None)` when no robot has `id`.
    async fn find_robot(&self, id: RobotId) -> Result<Option<Robot>, Error>;
}
