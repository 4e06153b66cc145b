//! Robot entity and its building blocks.
//!
//! A [`Robot`] is a plain value: persistence lives behind
//! [`crate::domain::ports::RobotRepository`]. Writes start from a
//! [`RobotDraft`], which keeps the raw `type` string so the validator can
//! report an unknown value instead of failing to decode it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Store-assigned surrogate key.
///
/// Assigned once on insert and never reused, so it is only ever built from
/// values the store handed out or the caller supplied in a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RobotId(i64);

impl RobotId {
    /// Wrap a raw key.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw key as stored.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RobotId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// The closed set of robot kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RobotType {
    /// Humanoid or semi-autonomous droid.
    Droid,
    /// Purely mechanical automaton.
    Mechanical,
    /// Software-only robot.
    Virtual,
}

impl RobotType {
    /// Every accepted kind, in the order they are listed to clients.
    pub const ALL: [Self; 3] = [Self::Droid, Self::Mechanical, Self::Virtual];

    /// Stored and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Droid => "droid",
            Self::Mechanical => "mechanical",
            Self::Virtual => "virtual",
        }
    }
}

impl fmt::Display for RobotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of [`RobotType::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown robot type `{value}`")]
pub struct UnknownRobotType {
    /// The rejected input.
    pub value: String,
}

impl FromStr for RobotType {
    type Err = UnknownRobotType;

    /// Matching is exact: `"Droid"` is not a droid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownRobotType {
                value: s.to_owned(),
            })
    }
}

/// A persisted robot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robot {
    /// Store-assigned key.
    pub id: RobotId,
    /// Unique display name.
    pub name: String,
    /// Kind of robot; `type` on the wire.
    pub robot_type: RobotType,
    /// Year of manufacture, never negative.
    pub year: i32,
}

/// Unvalidated field values for a create or full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotDraft {
    /// Requested name; uniqueness is checked by validation.
    pub name: String,
    /// Raw type string; may name an unknown type.
    pub robot_type: String,
    /// Requested year; may be negative.
    pub year: i32,
}

impl RobotDraft {
    /// Build a draft from raw field values.
    pub fn new(name: impl Into<String>, robot_type: impl Into<String>, year: i32) -> Self {
        Self {
            name: name.into(),
            robot_type: robot_type.into(),
            year,
        }
    }
}

/// Field values that passed validation and may be written as-is.
///
/// Only [`crate::domain::robot_validation::check_draft`] constructs these
/// outside of tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotFields {
    /// Name that passed the uniqueness check.
    pub name: String,
    /// Parsed robot type.
    pub robot_type: RobotType,
    /// Year, zero or later.
    pub year: i32,
}

impl RobotFields {
    /// Attach the store-assigned key.
    #[must_use]
    pub fn into_robot(self, id: RobotId) -> Robot {
        Robot {
            id,
            name: self.name,
            robot_type: self.robot_type,
            year: self.year,
        }
    }
}
