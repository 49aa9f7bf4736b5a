//! Paginated note feed.
//!
//! [`FeedController`] owns the accumulated notes and the paging bookkeeping.
//! State lives in a `watch` channel: every transition goes through
//! `send_modify`/`send_if_modified`, and views observe it with
//! [`FeedController::subscribe`].
//!
//! The accumulated list is always `prepended notes ++ page 0 ++ ... ++ page N`,
//! each page in the order the server returned it. The controller never
//! re-sorts; newest-first ordering is whatever the list endpoint provides.

use std::sync::Arc;

use echo_core::{DEFAULT_PAGE_SIZE, Note, Page, clamp_page_size, has_next_page};
use serde::Serialize;
use tokio::sync::watch;

use crate::api::NotesApi;
use crate::error::ClientError;
use crate::toast::{LOAD_FAILED, Toasts};

/// Client-side view of the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedState {
    /// Notes loaded so far, most recent first.
    pub notes: Vec<Note>,
    /// Highest page index loaded.
    pub page: u32,
    /// Page count as last reported by the server.
    pub total_pages: u32,
    /// Item count as last reported by the server, plus local creations.
    pub total_items: u64,
    /// A page request is in flight.
    pub loading: bool,
}

impl FeedState {
    /// Whether pages beyond the loaded ones exist.
    pub fn has_more(&self) -> bool {
        has_next_page(self.page, self.total_pages)
    }

    /// Whether "load more" may run right now.
    pub fn can_load_more(&self) -> bool {
        !self.loading && self.has_more()
    }
}

/// Result of a page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page arrived and was applied.
    Loaded { page: u32, count: usize },
    /// The guard rejected the call; nothing was requested.
    Skipped,
    /// The request failed; an error toast was shown and state kept.
    Failed(ClientError),
}

/// Owns [`FeedState`] and drives page loads against a [`NotesApi`].
pub struct FeedController<A> {
    api: Arc<A>,
    toasts: Toasts,
    page_size: u32,
    state: watch::Sender<FeedState>,
}

impl<A: NotesApi> FeedController<A> {
    /// Create an empty feed.
    pub fn new(api: Arc<A>, toasts: Toasts) -> Self {
        let (state, _) = watch::channel(FeedState::default());
        Self {
            api,
            toasts,
            page_size: DEFAULT_PAGE_SIZE,
            state,
        }
    }

    /// Use a different page size (clamped to what the service accepts).
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = clamp_page_size(size);
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Watch the feed state.
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> FeedState {
        self.state.borrow().clone()
    }

    /// Load page `page` and replace the accumulated notes with it.
    ///
    /// Skipped while another load is in flight.
    pub async fn load_page(&self, page: u32) -> LoadOutcome {
        let acquired = self.state.send_if_modified(|s| {
            if s.loading {
                false
            } else {
                s.loading = true;
                true
            }
        });
        if !acquired {
            tracing::debug!(page, "feed load skipped: already loading");
            return LoadOutcome::Skipped;
        }
        let _loading = LoadingGuard(&self.state);

        match self.api.list_notes(page, self.page_size).await {
            Ok(result) => {
                let count = result.items.len();
                self.state.send_modify(|s| {
                    apply_totals(s, page, &result);
                    s.notes = result.items;
                });
                tracing::info!(page, count, "feed page loaded");
                LoadOutcome::Loaded { page, count }
            }
            Err(err) => self.fail(page, err),
        }
    }

    /// Initial load at startup.
    pub async fn load_initial(&self) -> LoadOutcome {
        self.load_page(0).await
    }

    /// Reload from page 0, dropping everything accumulated so far.
    pub async fn refresh(&self) -> LoadOutcome {
        self.load_page(0).await
    }

    /// Fetch the next page and append it.
    ///
    /// Skipped unless more pages exist and no load is in flight.
    pub async fn load_more(&self) -> LoadOutcome {
        let mut next = None;
        self.state.send_if_modified(|s| {
            if s.can_load_more() {
                s.loading = true;
                next = Some(s.page + 1);
                true
            } else {
                false
            }
        });
        let Some(page) = next else {
            tracing::debug!("load more skipped");
            return LoadOutcome::Skipped;
        };
        let _loading = LoadingGuard(&self.state);

        match self.api.list_notes(page, self.page_size).await {
            Ok(result) => {
                let count = result.items.len();
                self.state.send_modify(|s| {
                    apply_totals(s, page, &result);
                    s.notes.extend(result.items);
                });
                tracing::info!(page, count, "feed page appended");
                LoadOutcome::Loaded { page, count }
            }
            Err(err) => self.fail(page, err),
        }
    }

    /// Put a freshly created note at the head of the feed.
    ///
    /// Page bookkeeping is untouched; only the item count grows.
    pub fn note_created(&self, note: Note) {
        tracing::debug!(note_id = %note.id, "prepending created note");
        self.state.send_modify(|s| {
            s.notes.insert(0, note);
            s.total_items += 1;
        });
    }

    fn fail(&self, page: u32, err: ClientError) -> LoadOutcome {
        tracing::warn!(page, error = %err, "feed load failed");
        self.toasts.request_failed(&err, LOAD_FAILED);
        LoadOutcome::Failed(err)
    }
}

fn apply_totals(state: &mut FeedState, page: u32, result: &Page<Note>) {
    state.page = page;
    state.total_pages = result.total_pages;
    state.total_items = result.total_items;
}

/// Clears the loading flag on completion, including when the load future is dropped.
struct LoadingGuard<'a>(&'a watch::Sender<FeedState>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|s| s.loading = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubApi, note};
    use crate::toast::{Toast, ToastKind};

    fn feed(api: &Arc<StubApi>) -> (FeedController<StubApi>, Toasts) {
        let toasts = Toasts::new();
        (FeedController::new(Arc::clone(api), toasts.clone()), toasts)
    }

    #[tokio::test]
    async fn paging_through_three_pages() {
        let api = Arc::new(StubApi::with_notes(45));
        let (feed, _) = feed(&api);

        assert_eq!(feed.load_initial().await, LoadOutcome::Loaded { page: 0, count: 20 });
        let state = feed.snapshot();
        assert_eq!(state.notes.len(), 20);
        assert_eq!(state.total_pages, 3);
        assert_eq!(state.total_items, 45);
        assert!(state.has_more());

        assert_eq!(feed.load_more().await, LoadOutcome::Loaded { page: 1, count: 20 });
        let state = feed.snapshot();
        assert_eq!(state.notes.len(), 40);
        assert!(state.has_more());

        assert_eq!(feed.load_more().await, LoadOutcome::Loaded { page: 2, count: 5 });
        let state = feed.snapshot();
        assert_eq!(state.notes.len(), 45);
        assert!(!state.has_more());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn load_more_on_last_page_makes_no_request() {
        let api = Arc::new(StubApi::with_notes(45));
        let (feed, _) = feed(&api);
        feed.load_initial().await;
        feed.load_more().await;
        feed.load_more().await;
        let before = feed.snapshot();
        let calls = api.list_calls();

        assert_eq!(feed.load_more().await, LoadOutcome::Skipped);
        assert_eq!(api.list_calls(), calls);
        assert_eq!(feed.snapshot(), before);
    }

    #[tokio::test]
    async fn load_more_before_initial_load_is_skipped() {
        let api = Arc::new(StubApi::with_notes(45));
        let (feed, _) = feed(&api);

        assert_eq!(feed.load_more().await, LoadOutcome::Skipped);
        assert_eq!(api.list_calls(), 0);
    }

    #[tokio::test]
    async fn accumulated_length_tracks_fetched_items() {
        let api = Arc::new(StubApi::with_notes(95));
        let (feed, _) = feed(&api);
        feed.load_initial().await;
        feed.note_created(note("local", "fresh"));

        let mut fetched = 20;
        let mut last_len = feed.snapshot().notes.len();
        while feed.snapshot().can_load_more() {
            if let LoadOutcome::Loaded { count, .. } = feed.load_more().await {
                fetched += count;
            }
            let len = feed.snapshot().notes.len();
            assert_eq!(len, fetched + 1);
            assert!(len >= last_len);
            last_len = len;
        }
        assert_eq!(last_len, 96);
    }

    #[tokio::test]
    async fn server_order_is_kept_across_pages() {
        let api = Arc::new(StubApi::with_notes(45));
        let (feed, _) = feed(&api);
        feed.load_initial().await;
        feed.load_more().await;
        feed.load_more().await;

        let notes = feed.snapshot().notes;
        assert!(notes.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(notes, api.all_notes());
    }

    #[tokio::test]
    async fn failed_initial_load_keeps_state_and_toasts() {
        let api = Arc::new(StubApi::with_notes(45));
        let (feed, toasts) = feed(&api);
        api.fail_next_list(None);

        let outcome = feed.load_initial().await;
        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert_eq!(feed.snapshot(), FeedState::default());
        assert_eq!(toasts.current(), Some(Toast::error(LOAD_FAILED)));
    }

    #[tokio::test]
    async fn failed_load_more_keeps_loaded_pages() {
        let api = Arc::new(StubApi::with_notes(45));
        let (feed, toasts) = feed(&api);
        feed.load_initial().await;
        let before = feed.snapshot();

        api.fail_next_list(Some("Service unavailable"));
        assert!(matches!(feed.load_more().await, LoadOutcome::Failed(_)));
        assert_eq!(feed.snapshot(), before);
        let toast = toasts.current().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Service unavailable");

        // Same action can be retried.
        assert_eq!(feed.load_more().await, LoadOutcome::Loaded { page: 1, count: 20 });
    }

    #[tokio::test]
    async fn page_zero_replaces_rather_than_appends() {
        let api = Arc::new(StubApi::with_notes(45));
        let (feed, _) = feed(&api);
        feed.load_initial().await;
        feed.load_more().await;
        assert_eq!(feed.snapshot().notes.len(), 40);

        feed.refresh().await;
        let state = feed.snapshot();
        assert_eq!(state.notes.len(), 20);
        assert_eq!(state.page, 0);
    }

    #[tokio::test]
    async fn note_created_prepends_and_counts() {
        let api = Arc::new(StubApi::with_notes(45));
        let (feed, _) = feed(&api);
        feed.load_initial().await;

        let created = note("new", "hello");
        feed.note_created(created.clone());
        let state = feed.snapshot();
        assert_eq!(state.notes.len(), 21);
        assert_eq!(state.notes[0], created);
        assert_eq!(state.total_items, 46);
        assert_eq!(state.page, 0);
        assert_eq!(state.total_pages, 3);
    }

    #[tokio::test]
    async fn concurrent_load_is_rejected_not_queued() {
        let api = Arc::new(StubApi::with_notes(45));
        let (feed, _) = feed(&api);

        let (first, second) = tokio::join!(feed.load_initial(), feed.load_initial());
        assert_eq!(first, LoadOutcome::Loaded { page: 0, count: 20 });
        assert_eq!(second, LoadOutcome::Skipped);
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn dropped_load_clears_loading_flag() {
        let api = Arc::new(StubApi::with_notes(45));
        let (feed, _) = feed(&api);

        {
            let load = feed.load_initial();
            tokio::pin!(load);
            // Poll once so the flag is taken, then drop the future mid-flight.
            let _ = poll_once(load.as_mut()).await;
        }
        assert!(!feed.snapshot().loading);
        assert_eq!(feed.load_initial().await, LoadOutcome::Loaded { page: 0, count: 20 });
    }

    async fn poll_once<F: std::future::Future + Unpin>(fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            out = fut => Some(out),
            () = std::future::ready(()) => None,
        }
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let api = Arc::new(StubApi::with_notes(3));
        let (feed, _) = feed(&api);
        let mut receiver = feed.subscribe();

        feed.load_initial().await;
        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().notes.len(), 3);
    }
}
