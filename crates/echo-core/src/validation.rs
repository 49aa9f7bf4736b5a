//! Draft validation rules for composing a note.
//!
//! Rules are evaluated on the trimmed text and lengths are counted in
//! characters. All fields are checked, so a single call reports every
//! violation at once.

use serde::Serialize;
use std::fmt;

use crate::types::{MAX_AUTHOR_LENGTH, MAX_MESSAGE_LENGTH};

/// A draft field that can carry a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Message,
    Author,
}

impl Field {
    /// Key used when reporting violations by field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Author => "author",
        }
    }
}

/// What went wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Empty or whitespace-only.
    Required,
    /// Longer than the field's limit.
    TooLong,
}

/// A single rule violation on a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: Field,
    pub kind: ViolationKind,
}

impl Violation {
    /// Inline message shown next to the offending field.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match (self.field, self.kind) {
            (Field::Message, ViolationKind::Required) => "Share something",
            (Field::Message, ViolationKind::TooLong) => "Too long",
            (Field::Author, ViolationKind::TooLong) => "Name too long",
            (Field::Author, ViolationKind::Required) => "Name required",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.key(), self.message())
    }
}

/// The non-empty set of violations found in a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    /// All violations, message field first.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// The violation recorded for `field`, if any.
    #[must_use]
    pub fn for_field(&self, field: Field) -> Option<&Violation> {
        self.0.iter().find(|v| v.field == field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Number of characters in the trimmed text.
#[must_use]
pub fn trimmed_len(text: &str) -> usize {
    text.trim().chars().count()
}

/// Validate a draft message and author.
///
/// The message gets at most one violation: `Required` wins over `TooLong`.
pub fn validate_draft(message: &str, author: &str) -> Result<(), ValidationErrors> {
    let mut violations = Vec::new();

    let message_len = trimmed_len(message);
    if message_len == 0 {
        violations.push(Violation {
            field: Field::Message,
            kind: ViolationKind::Required,
        });
    } else if message_len > MAX_MESSAGE_LENGTH {
        violations.push(Violation {
            field: Field::Message,
            kind: ViolationKind::TooLong,
        });
    }

    if trimmed_len(author) > MAX_AUTHOR_LENGTH {
        violations.push(Violation {
            field: Field::Author,
            kind: ViolationKind::TooLong,
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(violations))
    }
}
