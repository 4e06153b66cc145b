//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match the DDL in [`super::bootstrap`]. The `type` column is exposed
//! as `robot_type` because `type` is a Rust keyword.

diesel::table! {
    /// Robots table: one row per robot.
    robots (id) {
        /// Sequence-backed surrogate key; values are never reused.
        id -> Int8,
        /// Unique display name.
        name -> Text,
        /// One of `droid`, `mechanical`, `virtual`.
        #[sql_name = "type"]
        robot_type -> Text,
        /// Year of manufacture, never negative.
        year -> Int4,
    }
}
