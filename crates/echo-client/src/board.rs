//! One board session: the feed, the compose form and the toast slot they share.

use std::sync::Arc;

use crate::api::{HttpNotesApi, NotesApi};
use crate::compose::{ComposeController, SubmitOutcome};
use crate::config::ClientConfig;
use crate::feed::FeedController;
use crate::toast::Toasts;

/// Everything a view needs, wired to a single [`NotesApi`].
///
/// Dropping the board drops its state; results of requests still in flight
/// go nowhere.
pub struct Board<A> {
    pub feed: FeedController<A>,
    pub compose: ComposeController<A>,
    pub toasts: Toasts,
}

impl<A: NotesApi> Board<A> {
    pub fn new(api: A, page_size: u32) -> Self {
        let api = Arc::new(api);
        let toasts = Toasts::new();
        Self {
            feed: FeedController::new(Arc::clone(&api), toasts.clone()).with_page_size(page_size),
            compose: ComposeController::new(api, toasts.clone()),
            toasts,
        }
    }

    /// Publish the current draft into this board's feed.
    pub async fn submit(&self) -> SubmitOutcome {
        self.compose.submit(&self.feed).await
    }
}

impl Board<HttpNotesApi> {
    /// A board talking HTTP to the configured service.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(HttpNotesApi::from_config(config), config.page_size)
    }
}
