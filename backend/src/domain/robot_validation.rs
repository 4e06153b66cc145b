//! Field rules applied to a [`RobotDraft`] before any write.
//!
//! Validation never short-circuits: every rule runs and every failure is
//! reported. The only rule that needs the store (name uniqueness) receives
//! the lookup result through [`ValidationContext`], which keeps [`validate`]
//! pure.

use std::fmt;

use super::{RobotDraft, RobotFields, RobotType};

/// Rules a candidate robot must satisfy, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationRule {
    /// `type` must be one of [`RobotType::ALL`].
    TypeDomain,
    /// No other row may already use `name`.
    Uniqueness,
    /// `year` must not be negative.
    YearNonNegative,
}

impl ValidationRule {
    /// Evaluation order.
    pub const ALL: [Self; 3] = [Self::TypeDomain, Self::Uniqueness, Self::YearNonNegative];

    /// Field the rule guards.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::TypeDomain => "type",
            Self::Uniqueness => "name",
            Self::YearNonNegative => "year",
        }
    }

    /// The failure this rule reports.
    #[must_use]
    pub fn failure(self) -> ValidationMessage {
        let message = match self {
            Self::TypeDomain => {
                let domain: Vec<&str> = RobotType::ALL.iter().map(|kind| kind.as_str()).collect();
                format!("Field type must be a part of list: {}", domain.join(", "))
            }
            Self::Uniqueness => "The robot name must be unique".to_owned(),
            Self::YearNonNegative => "The year cannot be less than zero".to_owned(),
        };
        ValidationMessage {
            rule: self,
            message,
        }
    }

    fn check(self, draft: &RobotDraft, context: &ValidationContext) -> Option<ValidationMessage> {
        let failed = match self {
            Self::TypeDomain => draft.robot_type.parse::<RobotType>().is_err(),
            Self::Uniqueness => context.name_taken,
            Self::YearNonNegative => draft.year < 0,
        };
        failed.then(|| self.failure())
    }
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationMessage {
    rule: ValidationRule,
    message: String,
}

impl ValidationMessage {
    /// Rule that failed.
    #[must_use]
    pub fn rule(&self) -> ValidationRule {
        self.rule
    }

    /// Field the failure refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.rule.field()
    }

    /// Human-readable description returned to clients.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Store facts the rules depend on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationContext {
    /// Whether another row already uses the candidate's name.
    pub name_taken: bool,
}

/// A rejected write: one or more failed rules, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("robot rejected by {} validation rule(s)", .0.len())]
pub struct ValidationErrors(Vec<ValidationMessage>);

impl ValidationErrors {
    /// Wrap collected failures; `None` when there are none.
    #[must_use]
    pub fn from_messages(messages: Vec<ValidationMessage>) -> Option<Self> {
        if messages.is_empty() {
            None
        } else {
            Some(Self(messages))
        }
    }

    /// A rejection caused by a single rule.
    #[must_use]
    pub fn single(rule: ValidationRule) -> Self {
        Self(vec![rule.failure()])
    }

    /// Failed rules in evaluation order.
    #[must_use]
    pub fn messages(&self) -> &[ValidationMessage] {
        &self.0
    }

    /// Whether `rule` is among the failures.
    #[must_use]
    pub fn contains(&self, rule: ValidationRule) -> bool {
        self.0.iter().any(|message| message.rule == rule)
    }

    /// Client-facing message texts.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.0.iter().map(|m| m.message.clone()).collect()
    }
}

/// Run every rule against `draft` and collect the failures.
///
/// An empty result means the draft may be written.
///
/// # Examples
/// ```
/// use robots_backend::domain::{RobotDraft, ValidationContext, ValidationRule, validate};
///
/// let draft = RobotDraft::new("Marta", "cyborg", -3);
/// let failures = validate(&draft, &ValidationContext { name_taken: true });
/// let rules: Vec<_> = failures.iter().map(|m| m.rule()).collect();
/// assert_eq!(rules, ValidationRule::ALL);
/// ```
#[must_use]
pub fn validate(draft: &RobotDraft, context: &ValidationContext) -> Vec<ValidationMessage> {
    ValidationRule::ALL
        .into_iter()
        .filter_map(|rule| rule.check(draft, context))
        .collect()
}

/// Validate `draft` and, when it passes, turn it into writable fields.
pub fn check_draft(
    draft: RobotDraft,
    context: &ValidationContext,
) -> Result<RobotFields, ValidationErrors> {
    if let Some(errors) = ValidationErrors::from_messages(validate(&draft, context)) {
        return Err(errors);
    }
    let RobotDraft {
        name,
        robot_type,
        year,
    } = draft;
    let robot_type = robot_type
        .parse::<RobotType>()
        .map_err(|_| ValidationErrors::single(ValidationRule::TypeDomain))?;
    Ok(RobotFields {
        name,
        robot_type,
        year,
    })
}
