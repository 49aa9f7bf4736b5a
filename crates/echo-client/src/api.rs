//! HTTP client for the remote notes service.
//!
//! Endpoints consumed:
//! - GET  /api/v1/notes?page={n}&size={s}&sort=createdAt,desc
//! - POST /api/v1/notes
//! - GET  /api/v1/notes/{id}
//!
//! Every call is a single attempt. Non-2xx responses, undecodable bodies and
//! transport failures all surface as [`ClientError::RequestFailed`].

use std::future::Future;

use echo_core::{ApiErrorBody, CreateNoteRequest, Note, NoteId, Page, clamp_page_size};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Sort order requested from the list endpoint. The feed relies on it.
pub const NEWEST_FIRST: &str = "createdAt,desc";

/// Operations the controllers need from the notes service.
pub trait NotesApi: Send + Sync {
    /// Fetch one page of notes, newest first.
    fn list_notes(
        &self,
        page: u32,
        size: u32,
    ) -> impl Future<Output = ClientResult<Page<Note>>> + Send;

    /// Persist a new note and return it as stored by the server.
    fn create_note(
        &self,
        request: &CreateNoteRequest,
    ) -> impl Future<Output = ClientResult<Note>> + Send;

    /// Fetch a single note by id.
    fn get_note(&self, id: &NoteId) -> impl Future<Output = ClientResult<Note>> + Send;
}

/// [`NotesApi`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotesApi {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn notes_url(&self) -> String {
        format!("{}/api/v1/notes", self.base_url)
    }

    /// URL of one note, with the id escaped as a single path segment.
    fn note_url(&self, id: &NoteId) -> ClientResult<Url> {
        let mut url = Url::parse(&self.notes_url()).map_err(|e| {
            tracing::warn!(base_url = %self.base_url, error = %e, "invalid notes service URL");
            ClientError::RequestFailed {
                status: None,
                message: None,
            }
        })?;
        url.path_segments_mut()
            .map_err(|()| ClientError::RequestFailed {
                status: None,
                message: None,
            })?
            .push(id.as_str());
        Ok(url)
    }
}

impl NotesApi for HttpNotesApi {
    async fn list_notes(&self, page: u32, size: u32) -> ClientResult<Page<Note>> {
        let size = clamp_page_size(size);
        tracing::debug!(page, size, "listing notes");

        let response = self
            .client
            .get(self.notes_url())
            .query(&[
                ("page", page.to_string()),
                ("size", size.to_string()),
                ("sort", NEWEST_FIRST.to_string()),
            ])
            .send()
            .await
            .map_err(|e| ClientError::transport(&e))?;

        decode(response).await
    }

    async fn create_note(&self, request: &CreateNoteRequest) -> ClientResult<Note> {
        tracing::debug!(
            message_len = request.message.chars().count(),
            signed = request.author.is_some(),
            "creating note"
        );

        let response = self
            .client
            .post(self.notes_url())
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::transport(&e))?;

        let note: Note = decode(response).await?;
        tracing::info!(note_id = %note.id, "note created");
        Ok(note)
    }

    async fn get_note(&self, id: &NoteId) -> ClientResult<Note> {
        tracing::debug!(note_id = %id, "fetching note");

        let response = self
            .client
            .get(self.note_url(id)?)
            .send()
            .await
            .map_err(|e| ClientError::transport(&e))?;

        decode(response).await
    }
}

/// Decode a 2xx body as `T`, or turn anything else into `RequestFailed`.
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();

    if status.is_success() {
        return response.json::<T>().await.map_err(|e| {
            tracing::warn!(status = status.as_u16(), error = %e, "malformed response body");
            ClientError::from_status(status.as_u16(), None)
        });
    }

    let message = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|body| body.human_message().map(String::from));

    tracing::warn!(
        status = status.as_u16(),
        message = message.as_deref().unwrap_or(""),
        "notes service rejected request"
    );

    Err(ClientError::from_status(status.as_u16(), message))
}
