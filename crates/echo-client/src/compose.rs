//! Compose form: draft text, validation and submission.

use std::sync::Arc;

use echo_core::{
    CreateNoteRequest, MAX_MESSAGE_LENGTH, Note, ValidationErrors, trimmed_len, validate_draft,
};
use serde::Serialize;
use tokio::sync::watch;

use crate::api::NotesApi;
use crate::error::{ClientError, GENERIC_FAILURE};
use crate::feed::FeedController;
use crate::toast::{NOTE_CREATED, Toasts};

/// Draft being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposeState {
    /// Raw message text as typed.
    pub message: String,
    /// Raw author text as typed; blank means anonymous.
    pub author: String,
    /// A create request is in flight.
    pub submitting: bool,
    /// Violations from the last submit attempt, rendered inline.
    pub errors: ValidationErrors,
}

impl ComposeState {
    /// Live character count of the trimmed message.
    pub fn char_count(&self) -> usize {
        trimmed_len(&self.message)
    }

    pub fn is_over_limit(&self) -> bool {
        self.char_count() > MAX_MESSAGE_LENGTH
    }

    pub fn has_content(&self) -> bool {
        self.char_count() > 0
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.has_content() && !self.is_over_limit()
    }
}

/// Result of [`ComposeController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server stored the note; the draft was cleared.
    Created(Note),
    /// Local rules failed; nothing was sent.
    Invalid(ValidationErrors),
    /// The server or transport failed; the draft was kept.
    Failed(ClientError),
    /// A submission is already in flight.
    Busy,
}

/// Owns [`ComposeState`] and submits drafts through a [`NotesApi`].
pub struct ComposeController<A> {
    api: Arc<A>,
    toasts: Toasts,
    state: watch::Sender<ComposeState>,
}

impl<A: NotesApi> ComposeController<A> {
    pub fn new(api: Arc<A>, toasts: Toasts) -> Self {
        let (state, _) = watch::channel(ComposeState::default());
        Self { api, toasts, state }
    }

    /// Watch the draft.
    pub fn subscribe(&self) -> watch::Receiver<ComposeState> {
        self.state.subscribe()
    }

    /// Copy of the current draft.
    pub fn snapshot(&self) -> ComposeState {
        self.state.borrow().clone()
    }

    pub fn set_message(&self, message: impl Into<String>) {
        let message = message.into();
        self.state.send_modify(|s| s.message = message);
    }

    pub fn set_author(&self, author: impl Into<String>) {
        let author = author.into();
        self.state.send_modify(|s| s.author = author);
    }

    /// Check the draft and record the violations for inline display.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut result = Ok(());
        self.state.send_modify(|s| {
            result = validate_draft(&s.message, &s.author);
            s.errors = result.clone().err().unwrap_or_default();
        });
        result
    }

    /// Validate and, if clean, publish the draft.
    ///
    /// On success the draft is cleared, the note is prepended to `feed` and a
    /// success toast is shown. On failure an error toast carries the server's
    /// message and the draft is left for a retry.
    pub async fn submit<B: NotesApi>(&self, feed: &FeedController<B>) -> SubmitOutcome {
        let mut begun = Begin::Busy;
        self.state.send_if_modified(|s| {
            if s.submitting {
                return false;
            }
            match validate_draft(&s.message, &s.author) {
                Ok(()) => {
                    s.submitting = true;
                    s.errors = ValidationErrors::default();
                    begun = Begin::Request(CreateNoteRequest::from_draft(&s.message, &s.author));
                }
                Err(errors) => {
                    s.errors = errors.clone();
                    begun = Begin::Invalid(errors);
                }
            }
            true
        });

        let request = match begun {
            Begin::Request(request) => request,
            Begin::Invalid(errors) => {
                tracing::debug!(violations = %errors, "draft rejected locally");
                return SubmitOutcome::Invalid(errors);
            }
            Begin::Busy => {
                tracing::debug!("submit skipped: already submitting");
                return SubmitOutcome::Busy;
            }
        };
        let _submitting = SubmittingGuard(&self.state);

        match self.api.create_note(&request).await {
            Ok(note) => {
                self.state.send_modify(|s| {
                    s.message.clear();
                    s.author.clear();
                    s.errors = ValidationErrors::default();
                });
                feed.note_created(note.clone());
                self.toasts.success(NOTE_CREATED);
                SubmitOutcome::Created(note)
            }
            Err(err) => {
                tracing::warn!(error = %err, "note submission failed");
                self.toasts.request_failed(&err, GENERIC_FAILURE);
                SubmitOutcome::Failed(err)
            }
        }
    }
}

enum Begin {
    Request(CreateNoteRequest),
    Invalid(ValidationErrors),
    Busy,
}

/// Clears the submitting flag however the submission ends.
struct SubmittingGuard<'a>(&'a watch::Sender<ComposeState>);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|s| s.submitting = false);
    }
}
