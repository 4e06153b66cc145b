//! PostgreSQL-backed `RobotRepository` implementation using Diesel ORM.
//!
//! Every method checks out one pooled connection and runs one statement.
//! Name search uses `ILIKE` with the fragment's wildcard characters escaped,
//! so it behaves as a case-insensitive substring match.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{RobotRepository, RobotRepositoryError};
use crate::domain::{Robot, RobotFields, RobotId, RobotType};

use super::models::{RobotRow, RobotValues};
use super::pool::{DbPool, PoolError};
use super::schema::robots;

/// Diesel-backed implementation of the `RobotRepository` port.
#[derive(Clone)]
pub struct DieselRobotRepository {
    pool: DbPool,
}

impl DieselRobotRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RobotRepositoryError {
    RobotRepositoryError::connection(error.into_message())
}

/// Map Diesel errors to domain robot repository errors.
fn map_diesel_error(error: diesel::result::Error) -> RobotRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RobotRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RobotRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RobotRepositoryError::connection("database connection error")
        }
        _ => RobotRepositoryError::query("database error"),
    }
}

/// Map errors from statements that write `name`, where a unique violation
/// means another row claimed the name first.
fn map_write_error(error: diesel::result::Error, name: &str) -> RobotRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            debug!(name, "robots.name unique constraint rejected write");
            RobotRepositoryError::duplicate_name(name)
        }
        other => map_diesel_error(other),
    }
}

/// Build an `ILIKE` pattern matching `fragment` anywhere in the value.
///
/// `\` is PostgreSQL's default `LIKE` escape character.
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Convert a database row into a domain robot.
fn row_to_robot(row: RobotRow) -> Result<Robot, RobotRepositoryError> {
    let robot_type = row.robot_type.parse::<RobotType>().map_err(|err| {
        warn!(robot_id = row.id, value = %err.value, "unrecognised robot type in database");
        RobotRepositoryError::query(format!("invalid robot type in database: {err}"))
    })?;
    Ok(Robot {
        id: RobotId::new(row.id),
        name: row.name,
        robot_type,
        year: row.year,
    })
}

fn rows_to_robots(rows: Vec<RobotRow>) -> Result<Vec<Robot>, RobotRepositoryError> {
    rows.into_iter().map(row_to_robot).collect()
}

fn values_of(fields: &RobotFields) -> RobotValues<'_> {
    RobotValues {
        name: &fields.name,
        robot_type: fields.robot_type.as_str(),
        year: fields.year,
    }
}

#[async_trait]
impl RobotRepository for DieselRobotRepository {
    async fn list_all(&self) -> Result<Vec<Robot>, RobotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RobotRow> = robots::table
            .order((robots::name.asc(), robots::id.asc()))
            .select(RobotRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_robots(rows)
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Robot>, RobotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RobotRow> = robots::table
            .filter(robots::name.ilike(contains_pattern(fragment)))
            .order((robots::name.asc(), robots::id.asc()))
            .select(RobotRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_robots(rows)
    }

    async fn find_by_id(&self, id: RobotId) -> Result<Option<Robot>, RobotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RobotRow> = robots::table
            .find(id.get())
            .select(RobotRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_robot).transpose()
    }

    async fn name_taken(
        &self,
        name: &str,
        exclude: Option<RobotId>,
    ) -> Result<bool, RobotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let matches: i64 = match exclude {
            Some(id) => {
                robots::table
                    .filter(robots::name.eq(name))
                    .filter(robots::id.ne(id.get()))
                    .count()
                    .get_result(&mut conn)
                    .await
            }
            None => {
                robots::table
                    .filter(robots::name.eq(name))
                    .count()
                    .get_result(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        Ok(matches > 0)
    }

    async fn insert(&self, fields: &RobotFields) -> Result<Robot, RobotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: RobotRow = diesel::insert_into(robots::table)
            .values(&values_of(fields))
            .returning(RobotRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &fields.name))?;

        row_to_robot(row)
    }

    async fn update(
        &self,
        id: RobotId,
        fields: &RobotFields,
    ) -> Result<usize, RobotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(robots::table.find(id.get()))
            .set(&values_of(fields))
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &fields.name))
    }

    async fn delete(&self, id: RobotId) -> Result<usize, RobotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(robots::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
