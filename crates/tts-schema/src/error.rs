use std::fmt;

/// A single problem found by a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Where in the document the problem is, e.g. a rendered node key.
    pub location: String,
    pub message: String,
}

impl Violation {
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// A document failed structural validation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("schema rule '{rule}' rejected the document: {}", summarize(.violations))]
pub struct SchemaViolation {
    /// Name of the rule that failed.
    pub rule: String,
    /// Every violation that rule reported, in document order.
    pub violations: Vec<Violation>,
}

impl SchemaViolation {
    pub fn new(rule: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            rule: rule.into(),
            violations,
        }
    }
}

fn summarize(violations: &[Violation]) -> String {
    match violations {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}
