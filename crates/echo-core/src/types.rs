//! Core data types for the Echo board.
//!
//! These are the wire contracts shared with the remote notes service:
//!
//! - A note (an "echo"): message, optional author, server-assigned id and timestamp
//! - A page of notes as returned by the list endpoint
//! - The body of a create request
//! - The error body the service returns on any non-2xx response
//!
//! Notes are owned by the server; the client only ever holds read-only copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Maximum message length, in characters, after trimming.
pub const MAX_MESSAGE_LENGTH: usize = 1000;

/// Maximum author length, in characters, after trimming.
pub const MAX_AUTHOR_LENGTH: usize = 100;

/// Page size requested when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size the notes service honours.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Name shown for notes posted without an author.
pub const ANONYMOUS: &str = "Anonymous";

/// Clamp a requested page size into the range the service accepts.
#[must_use]
pub fn clamp_page_size(size: u32) -> u32 {
    size.clamp(1, MAX_PAGE_SIZE)
}

/// Whether a page after zero-based `page` exists out of `total_pages`.
#[must_use]
pub fn has_next_page(page: u32, total_pages: u32) -> bool {
    page + 1 < total_pages
}

// ============================================================================
// ID Types
// ============================================================================

/// Server-assigned identifier of a note.
///
/// Opaque to the client: it is never parsed, only compared and echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Wraps a raw identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

// ============================================================================
// Note
// ============================================================================

/// A single posted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Server-assigned identifier.
    pub id: NoteId,
    /// Message body, already trimmed and sanitized by the server.
    pub message: String,
    /// Optional signature. `None` renders as "Anonymous".
    #[serde(default)]
    pub author: Option<String>,
    /// Server-assigned creation time.
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Author name to display, falling back to [`ANONYMOUS`].
    #[must_use]
    pub fn display_author(&self) -> &str {
        match self.author.as_deref().map(str::trim) {
            Some(author) if !author.is_empty() => author,
            _ => ANONYMOUS,
        }
    }

    /// Uppercased first character of the display author, used as an avatar.
    #[must_use]
    pub fn initial(&self) -> String {
        self.display_author()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// One page of a paginated listing.
///
/// `items.len() <= size`, and `page < total_pages` unless the collection is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// 0-based page index.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
    /// Total number of pages at the time of the request.
    pub total_pages: u32,
    /// Total number of items at the time of the request.
    pub total_items: u64,
    /// Items on this page, in server order.
    pub items: Vec<T>,
}

// ============================================================================
// Requests and errors
// ============================================================================

/// Body of `POST /api/v1/notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl CreateNoteRequest {
    /// Build a request from raw draft text.
    ///
    /// Both fields are trimmed; a blank author becomes `None`.
    #[must_use]
    pub fn from_draft(message: &str, author: &str) -> Self {
        let author = author.trim();
        Self {
            message: message.trim().to_string(),
            author: (!author.is_empty()).then(|| author.to_string()),
        }
    }
}

/// Error body returned by the notes service on non-2xx responses.
///
/// Every field is optional on decode so a partial body still yields its message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl ApiErrorBody {
    /// The human-readable message, if the server sent a non-blank one.
    #[must_use]
    pub fn human_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

// ============================================================================
// Tests
// ============================================================================
