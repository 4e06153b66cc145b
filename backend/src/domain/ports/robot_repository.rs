//! Port for robot persistence.
//!
//! The [`RobotRepository`] trait is the storage half of the entity store: it
//! runs single parameterised statements and knows nothing about validation.
//! [`crate::domain::RobotCatalogueService`] puts the validator in front of it.

use async_trait::async_trait;

use crate::domain::{Robot, RobotFields, RobotId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by robot repository adapters.
    pub enum RobotRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "robot repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "robot repository query failed: {message}",
        /// The store's own uniqueness constraint rejected the name.
        DuplicateName { name: String } =>
            "robot name `{name}` already exists",
    }
}

/// Storage operations over the `robots` table.
///
/// Every mutation is a single auto-committing statement. Listing and search
/// results are ordered by name ascending, then by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RobotRepository: Send + Sync {
    /// Every row.
    async fn list_all(&self) -> Result<Vec<Robot>, RobotRepositoryError>;

    /// Rows whose name contains `fragment`, ignoring case.
    ///
    /// The fragment is matched literally; an empty fragment matches every
    /// row.
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Robot>, RobotRepositoryError>;

    /// Point lookup. Absence is `Ok(None)`.
    async fn find_by_id(&self, id: RobotId) -> Result<Option<Robot>, RobotRepositoryError>;

    /// Whether a row other than `exclude` already uses `name`.
    async fn name_taken(
        &self,
        name: &str,
        exclude: Option<RobotId>,
    ) -> Result<bool, RobotRepositoryError>;

    /// Insert a new row and return it with its generated id.
    async fn insert(&self, fields: &RobotFields) -> Result<Robot, RobotRepositoryError>;

    /// Overwrite every mutable column of `id`; returns the rows affected.
    async fn update(&self, id: RobotId, fields: &RobotFields)
    -> Result<usize, RobotRepositoryError>;

    /// Remove `id`; returns the rows affected.
    async fn delete(&self, id: RobotId) -> Result<usize, RobotRepositoryError>;
}
