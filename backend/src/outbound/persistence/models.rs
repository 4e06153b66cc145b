//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use diesel::prelude::*;

use super::schema::robots;

/// Row struct for reading from the robots table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = robots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RobotRow {
    pub id: i64,
    pub name: String,
    pub robot_type: String,
    pub year: i32,
}

/// Column values written by both inserts and full updates.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = robots)]
pub(crate) struct RobotValues<'a> {
    pub name: &'a str,
    pub robot_type: &'a str,
    pub year: i32,
}
