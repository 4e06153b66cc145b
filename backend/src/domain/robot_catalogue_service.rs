//! Robot catalogue domain service.
//!
//! Implements the driving ports by putting the validator in front of the
//! [`RobotRepository`]. The uniqueness pre-check here is advisory: two
//! concurrent writers can both pass it, in which case the store's own
//! constraint rejects the loser and the rejection is reported with the same
//! uniqueness message.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    RobotRepository, RobotRepositoryError, RobotWriteError, RobotsCommand, RobotsQuery,
};
use crate::domain::{
    Error, Robot, RobotDraft, RobotFields, RobotId, ValidationContext, ValidationErrors,
    ValidationRule, check_draft,
};

/// Which rows the name uniqueness rule compares an update against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UniquenessScope {
    /// Every row except the one being updated.
    #[default]
    OtherRows,
    /// Every row, including the one being updated, so an update that keeps
    /// its current name is rejected.
    AllRows,
}

impl UniquenessScope {
    /// Map the `unique_name_excludes_self` setting onto a scope.
    #[must_use]
    pub const fn from_excludes_self(excludes_self: bool) -> Self {
        if excludes_self {
            Self::OtherRows
        } else {
            Self::AllRows
        }
    }

    const fn exclusion_for(self, id: RobotId) -> Option<RobotId> {
        match self {
            Self::OtherRows => Some(id),
            Self::AllRows => None,
        }
    }
}

/// Robot service implementing [`RobotsQuery`] and [`RobotsCommand`].
pub struct RobotCatalogueService<R: ?Sized> {
    repository: Arc<R>,
    uniqueness: UniquenessScope,
}

impl<R: ?Sized> Clone for RobotCatalogueService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            uniqueness: self.uniqueness,
        }
    }
}

impl<R: ?Sized> RobotCatalogueService<R> {
    /// Create a service over `repository` using [`UniquenessScope::OtherRows`].
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            uniqueness: UniquenessScope::default(),
        }
    }

    /// Override how updates are checked for name collisions.
    #[must_use]
    pub fn with_uniqueness_scope(mut self, uniqueness: UniquenessScope) -> Self {
        self.uniqueness = uniqueness;
        self
    }
}

impl<R> RobotCatalogueService<R>
where
    R: RobotRepository + ?Sized,
{
    fn map_repository_error(error: RobotRepositoryError) -> Error {
        match error {
            RobotRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("robot repository unavailable: {message}"))
            }
            RobotRepositoryError::Query { message } => {
                Error::internal(format!("robot repository error: {message}"))
            }
            RobotRepositoryError::DuplicateName { name } => Error::internal(format!(
                "unexpected duplicate-name error outside a write: {name}"
            )),
        }
    }

    /// Map a failed write, turning a store-level name clash into the same
    /// rejection the validator would have produced.
    fn map_write_error(error: RobotRepositoryError) -> RobotWriteError {
        match error {
            RobotRepositoryError::DuplicateName { .. } => {
                ValidationErrors::single(ValidationRule::Uniqueness).into()
            }
            other => Self::map_repository_error(other).into(),
        }
    }

    async fn validated(
        &self,
        draft: RobotDraft,
        exclude: Option<RobotId>,
    ) -> Result<RobotFields, RobotWriteError> {
        let name_taken = self
            .repository
            .name_taken(&draft.name, exclude)
            .await
            .map_err(Self::map_repository_error)?;

        check_draft(draft, &ValidationContext { name_taken }).map_err(|errors| {
            info!(
                failures = errors.messages().len(),
                "robot write rejected by validation"
            );
            RobotWriteError::Rejected(errors)
        })
    }
}

#[async_trait]
impl<R> RobotsQuery for RobotCatalogueService<R>
where
    R: RobotRepository + ?Sized,
{
    async fn list_robots(&self) -> Result<Vec<Robot>, Error> {
        self.repository
            .list_all()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn search_robots(&self, fragment: &str) -> Result<Vec<Robot>, Error> {
        self.repository
            .search_by_name(fragment)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn find_robot(&self, id: RobotId) -> Result<Option<Robot>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R> RobotsCommand for RobotCatalogueService<R>
where
    R: RobotRepository + ?Sized,
{
    async fn create_robot(&self, draft: RobotDraft) -> Result<Robot, RobotWriteError> {
        let fields = self.validated(draft, None).await?;
        let robot = self
            .repository
            .insert(&fields)
            .await
            .map_err(Self::map_write_error)?;
        debug!(robot_id = %robot.id, "robot created");
        Ok(robot)
    }

    async fn update_robot(&self, id: RobotId, draft: RobotDraft) -> Result<(), RobotWriteError> {
        let exclude = self.uniqueness.exclusion_for(id);
        let fields = self.validated(draft, exclude).await?;
        let affected = self
            .repository
            .update(id, &fields)
            .await
            .map_err(Self::map_write_error)?;
        debug!(robot_id = %id, affected, "robot update applied");
        Ok(())
    }

    async fn delete_robot(&self, id: RobotId) -> Result<(), RobotWriteError> {
        let affected = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_write_error)?;
        debug!(robot_id = %id, affected, "robot delete applied");
        Ok(())
    }
}

#[cfg(test)]
#[path = "robot_catalogue_service_tests.rs"]
mod tests;
