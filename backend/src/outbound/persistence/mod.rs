//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides the concrete [`RobotRepository`] backed by PostgreSQL
//! via the Diesel ORM with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: the repository only translates between Diesel rows
//!   and domain types. Validation lives in the domain service.
//! - **Internal models**: Diesel row structs (`models.rs`) and the table
//!   definition (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures are mapped onto
//!   [`RobotRepositoryError`](crate::domain::ports::RobotRepositoryError).
//!
//! # Example
//!
//! ```ignore
//! use robots_backend::outbound::persistence::{
//!     DbPool, DieselRobotRepository, PoolConfig, ensure_schema,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/robots")).await?;
//! ensure_schema(&pool).await?;
//! let repo = DieselRobotRepository::new(pool);
//! ```
//!
//! [`RobotRepository`]: crate::domain::ports::RobotRepository

mod bootstrap;
mod diesel_robot_repository;
mod models;
mod pool;
mod schema;

pub use bootstrap::{ROBOTS_DDL, SchemaBootstrapError, ensure_schema};
pub use diesel_robot_repository::DieselRobotRepository;
pub use pool::{DbPool, PoolConfig, PoolError, PoolStage};
