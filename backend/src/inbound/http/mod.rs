//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod not_found;
pub mod robots;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
