//! In-memory [`NotesApi`] used by the controller tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Duration, TimeZone, Utc};
use echo_core::{CreateNoteRequest, Note, NoteId, Page};

use crate::api::NotesApi;
use crate::error::{ClientError, ClientResult};

/// Build a note with a fixed timestamp.
pub fn note(id: &str, message: &str) -> Note {
    Note {
        id: NoteId::new(id),
        message: message.to_string(),
        author: None,
        created_at: Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap(),
    }
}

/// Serves a fixed collection newest-first and records calls.
///
/// Created notes are echoed back but not added to the collection, so page
/// boundaries stay put while a test mixes creates and loads.
///
/// Every call yields to the scheduler once before answering, so two
/// operations joined in one task genuinely overlap.
#[derive(Debug, Default)]
pub struct StubApi {
    notes: Mutex<Vec<Note>>,
    list_failure: Mutex<Option<ClientError>>,
    create_failure: Mutex<Option<ClientError>>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl StubApi {
    /// A collection of `count` notes, one minute apart, newest first.
    pub fn with_notes(count: usize) -> Self {
        let newest = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let notes = (0..count)
            .map(|i| Note {
                id: NoteId::new(format!("n{i:03}")),
                message: format!("echo number {i}"),
                author: (i % 3 == 0).then(|| format!("author {i}")),
                created_at: newest - Duration::minutes(i as i64),
            })
            .collect();
        Self {
            notes: Mutex::new(notes),
            ..Self::default()
        }
    }

    pub fn all_notes(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Make the next list call fail with `message` (or none).
    pub fn fail_next_list(&self, message: Option<&str>) {
        *self.list_failure.lock().unwrap() =
            Some(ClientError::from_status(503, message.map(String::from)));
    }

    /// Make the next create call fail with a 400 and `message`.
    pub fn fail_next_create(&self, message: &str) {
        *self.create_failure.lock().unwrap() =
            Some(ClientError::from_status(400, Some(message.to_string())));
    }
}

impl NotesApi for StubApi {
    async fn list_notes(&self, page: u32, size: u32) -> ClientResult<Page<Note>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if let Some(err) = self.list_failure.lock().unwrap().take() {
            return Err(err);
        }

        let notes = self.notes.lock().unwrap();
        let size_usize = size as usize;
        let total_items = notes.len();
        let total_pages = total_items.div_ceil(size_usize) as u32;
        let items = notes
            .iter()
            .skip(page as usize * size_usize)
            .take(size_usize)
            .cloned()
            .collect();

        Ok(Page {
            page,
            size,
            total_pages,
            total_items: total_items as u64,
            items,
        })
    }

    async fn create_note(&self, request: &CreateNoteRequest) -> ClientResult<Note> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if let Some(err) = self.create_failure.lock().unwrap().take() {
            return Err(err);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let note = Note {
            id: NoteId::new(format!("created{id}")),
            message: request.message.clone(),
            author: request.author.clone(),
            created_at: Utc::now(),
        };
        Ok(note)
    }

    async fn get_note(&self, id: &NoteId) -> ClientResult<Note> {
        tokio::task::yield_now().await;
        self.notes
            .lock()
            .unwrap()
            .iter()
            .find(|n| &n.id == id)
            .cloned()
            .ok_or_else(|| ClientError::from_status(404, Some("Note not found".to_string())))
    }
}
