//! Domain primitives, rules, and services.
//!
//! Purpose: define the robot entity, the rules a write must satisfy, and the
//! service orchestrating them, without any transport or storage details.
//!
//! Public surface:
//! - Robot, RobotDraft, RobotFields, RobotId, RobotType: the entity.
//! - validate, check_draft, ValidationErrors: the write rules.
//! - RobotCatalogueService: implements the driving ports.
//! - Error, ErrorCode: transport-agnostic failures.
//! - TraceId: request correlation identifier.

pub mod error;
pub mod ports;
pub mod robot;
pub mod robot_catalogue_service;
pub mod robot_validation;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::robot::{Robot, RobotDraft, RobotFields, RobotId, RobotType, UnknownRobotType};
pub use self::robot_catalogue_service::{RobotCatalogueService, UniquenessScope};
pub use self::robot_validation::{
    ValidationContext, ValidationErrors, ValidationMessage, ValidationRule, check_draft, validate,
};
pub use self::trace_id::TraceId;

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
