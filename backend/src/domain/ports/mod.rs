//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports ([`RobotsQuery`], [`RobotsCommand`]) are what inbound
//! adapters call; the driven port ([`RobotRepository`]) is what persistence
//! adapters implement. Port errors are strongly typed so adapters map their
//! failures into predictable variants.

mod macros;
mod robot_repository;
mod robots_command;
mod robots_query;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use robot_repository::MockRobotRepository;
pub use robot_repository::{RobotRepository, RobotRepositoryError};
pub use robots_command::{RobotWriteError, RobotsCommand};
pub use robots_query::RobotsQuery;
