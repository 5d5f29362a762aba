use std::fmt;

use rusqlite::ErrorCode;
use serde::Serialize;

/// Which declared constraint a failed write broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationKind {
    ForeignKey,
    Unique,
    NotNull,
    Check,
    UnknownIntegrity,
}

// Matched against the lowercased store message, first hit wins.
const PHRASES: [(&str, ViolationKind); 4] = [
    ("foreign key constraint failed", ViolationKind::ForeignKey),
    ("unique constraint failed", ViolationKind::Unique),
    ("not null constraint failed", ViolationKind::NotNull),
    ("check constraint failed", ViolationKind::Check),
];

impl ViolationKind {
    pub fn remediation_hint(self) -> &'static str {
        match self {
            ViolationKind::ForeignKey => {
                "A referenced value does not exist. Create the referenced entry first or choose an existing value."
            }
            ViolationKind::Unique => {
                "The value entered already exists in the database. Please try a new value."
            }
            ViolationKind::NotNull => "A required value was left empty. Please enter a value.",
            ViolationKind::Check => {
                "A value is outside what the table allows. Check the value and try again."
            }
            ViolationKind::UnknownIntegrity => {
                "The entry breaks a table constraint. See the error log for details."
            }
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViolationKind::ForeignKey => "Foreign key violation",
            ViolationKind::Unique => "Unique violation",
            ViolationKind::NotNull => "Not null violation",
            ViolationKind::Check => "Check violation",
            ViolationKind::UnknownIntegrity => "Integrity violation",
        };
        f.write_str(label)
    }
}

/// A classified constraint failure with an operator-facing hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub raw_message: String,
    pub remediation_hint: &'static str,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}\n{}", self.kind, self.raw_message, self.remediation_hint)
    }
}

/// Why a staged insert did not apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Integrity(Violation),
    /// Anything that is not a constraint failure, with the store's description.
    Store(String),
}

impl Failure {
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Failure::Integrity(v) => Some(v),
            Failure::Store(_) => None,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Integrity(v) => write!(f, "{v}"),
            Failure::Store(message) => write!(f, "Store error: {message}"),
        }
    }
}

/// Classifies an integrity failure by its message text.
pub fn classify_message(message: &str) -> Violation {
    let lowered = message.to_lowercase();
    let kind = PHRASES
        .iter()
        .find(|(phrase, _)| lowered.contains(phrase))
        .map(|(_, kind)| *kind)
        .unwrap_or(ViolationKind::UnknownIntegrity);
    Violation {
        kind,
        raw_message: message.to_string(),
        remediation_hint: kind.remediation_hint(),
    }
}

/// Splits store errors into classified violations and pass-through failures.
pub fn classify(err: &rusqlite::Error) -> Failure {
    match err {
        rusqlite::Error::SqliteFailure(code, message)
            if code.code == ErrorCode::ConstraintViolation =>
        {
            let message = message.clone().unwrap_or_else(|| err.to_string());
            Failure::Integrity(classify_message(&message))
        }
        other => Failure::Store(other.to_string()),
    }
}
