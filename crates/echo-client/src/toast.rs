//! Transient notifications ("toasts").
//!
//! Only one toast is visible at a time. Showing a new toast replaces the
//! current one, and each toast dismisses itself after [`TOAST_DURATION`]
//! unless it was replaced or dismissed first. Observers watch the current
//! toast through a `tokio::sync::watch` receiver.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use crate::error::ClientError;

/// How long a toast stays up before dismissing itself.
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Shown after a note is published.
pub const NOTE_CREATED: &str = "Your echo drifts into the void";

/// Fallback when a feed load fails without a server message.
pub const LOAD_FAILED: &str = "Could not load notes";

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

/// A notification to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    toast: Option<Toast>,
    generation: u64,
}

/// The single notification slot shared by the feed and compose controllers.
///
/// Cheap to clone; clones share the same slot.
#[derive(Debug, Clone)]
pub struct Toasts {
    slot: Arc<watch::Sender<Slot>>,
    duration: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Toasts {
    /// Create an empty slot with the standard auto-dismiss delay.
    pub fn new() -> Self {
        Self::with_duration(TOAST_DURATION)
    }

    /// Create an empty slot with a custom auto-dismiss delay.
    pub fn with_duration(duration: Duration) -> Self {
        let (slot, _) = watch::channel(Slot::default());
        Self {
            slot: Arc::new(slot),
            duration,
        }
    }

    /// The toast currently shown, if any.
    pub fn current(&self) -> Option<Toast> {
        self.slot.borrow().toast.clone()
    }

    /// Watch the current toast.
    pub fn subscribe(&self) -> ToastReceiver {
        ToastReceiver {
            inner: self.slot.subscribe(),
        }
    }

    /// Show `toast`, replacing whatever is up, and arm its dismiss timer.
    ///
    /// Without a Tokio runtime the toast stays until dismissed.
    pub fn show(&self, toast: Toast) {
        tracing::debug!(kind = ?toast.kind, message = %toast.message, "showing toast");

        let mut generation = 0;
        self.slot.send_modify(|slot| {
            slot.generation += 1;
            slot.toast = Some(toast);
            generation = slot.generation;
        });

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let slot = Arc::downgrade(&self.slot);
        let duration = self.duration;
        handle.spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(slot) = slot.upgrade() {
                expire(&slot, generation);
            }
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(Toast::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(Toast::error(message));
    }

    /// Report a failed request: the server's message, else `fallback`.
    pub fn request_failed(&self, err: &ClientError, fallback: &str) {
        self.error(err.message_or(fallback));
    }

    /// Clear the current toast immediately.
    pub fn dismiss(&self) {
        self.slot.send_if_modified(|slot| slot.toast.take().is_some());
    }
}

/// Clears the slot only if it still holds the toast from `generation`.
fn expire(slot: &watch::Sender<Slot>, generation: u64) {
    slot.send_if_modified(|slot| {
        if slot.generation == generation && slot.toast.is_some() {
            slot.toast = None;
            true
        } else {
            false
        }
    });
}

/// Receiving end of [`Toasts::subscribe`].
#[derive(Debug)]
pub struct ToastReceiver {
    inner: watch::Receiver<Slot>,
}

impl ToastReceiver {
    /// Wait for the slot to change, then return what it holds.
    ///
    /// Returns `None` once every [`Toasts`] handle is gone.
    pub async fn changed(&mut self) -> Option<Option<Toast>> {
        self.inner.changed().await.ok()?;
        Some(self.inner.borrow_and_update().toast.clone())
    }

    /// The toast currently shown, if any.
    pub fn current(&self) -> Option<Toast> {
        self.inner.borrow().toast.clone()
    }
}
