//! Driving port for writing robots.
//!
//! Writes either succeed, are rejected with the full list of failed rules, or
//! fail because the store could not be reached. Inbound adapters render the
//! first two as envelopes and the last as an error response.

use async_trait::async_trait;

use crate::domain::{Error, Robot, RobotDraft, RobotId, ValidationErrors};

/// Outcome of a write that did not succeed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RobotWriteError {
    /// One or more validation rules failed; nothing was written.
    #[error(transparent)]
    Rejected(#[from] ValidationErrors),
    /// The store failed; the write may not have been attempted.
    #[error(transparent)]
    Failed(#[from] Error),
}

/// Write-side use-cases exposed to inbound adapters.
#[async_trait]
pub trait RobotsCommand: Send + Sync {
    /// Validate and insert a new robot, returning it with its id.
    async fn create_robot(&self, draft: RobotDraft) -> Result<Robot, RobotWriteError>;

    /// Validate and overwrite every field of `id`.
    ///
    /// Updating an id that does not exist is not an error.
    async fn update_robot(&self, id: RobotId, draft: RobotDraft) -> Result<(), RobotWriteError>;

    /// Delete `id`. Deleting an id that does not exist is not an error.
    async fn delete_robot(&self, id: RobotId) -> Result<(), RobotWriteError>;
}
