//! HTTP client for the notes service.
//!
//! Bridges the board's working model (`UiNote`) and the wire format: colors
//! are re-cased in both directions and outgoing numbers are rounded to
//! integers, with non-finite values left out of the payload.

mod error;
mod types;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::entity::Note;

pub use error::{ApiError, ApiResult};
pub use types::{
    from_api_color, round_finite, to_api_color, ApiNoteCreate, ApiNotePatch, UiColor, UiNote,
    UiNoteCreate, UiNotePatch,
};

/// Remote operations the board needs.
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn get_notes(&self) -> ApiResult<Vec<UiNote>>;

    async fn get_note(&self, id: &str) -> ApiResult<UiNote>;

    async fn create_note(&self, note: &UiNoteCreate) -> ApiResult<UiNote>;

    /// Send `patch`. `Ok(None)` means the server confirmed without a body.
    async fn update_note(&self, id: &str, patch: &UiNotePatch) -> ApiResult<Option<UiNote>>;

    async fn delete_note(&self, id: &str) -> ApiResult<()>;
}

/// `NotesApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    http: Client,
    notes_url: String,
}

impl HttpNotesApi {
    /// Create a client for the server rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        if base_url.is_empty() {
            return Err(ApiError::Config("base_url cannot be empty".to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            http,
            notes_url: format!("{}/notes", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn notes_url(&self) -> &str {
        &self.notes_url
    }

    fn note_url(&self, id: &str) -> String {
        format!("{}/{}", self.notes_url, id)
    }

    /// Send a request and decode its body.
    ///
    /// Non-success statuses become `ApiError::Status`. A 204 or an empty body
    /// yields `Ok(None)` instead of a decode error.
    async fn request<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<Option<T>> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&text)?))
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn get_notes(&self) -> ApiResult<Vec<UiNote>> {
        let notes: Option<Vec<Note>> = self.request(self.http.get(&self.notes_url)).await?;
        Ok(notes
            .unwrap_or_default()
            .into_iter()
            .map(UiNote::from)
            .collect())
    }

    async fn get_note(&self, id: &str) -> ApiResult<UiNote> {
        let note: Option<Note> = self.request(self.http.get(self.note_url(id))).await?;
        note.map(UiNote::from).ok_or(ApiError::EmptyBody)
    }

    async fn create_note(&self, note: &UiNoteCreate) -> ApiResult<UiNote> {
        let payload = ApiNoteCreate::from(note);
        let created: Option<Note> = self
            .request(self.http.post(&self.notes_url).json(&payload))
            .await?;
        created.map(UiNote::from).ok_or(ApiError::EmptyBody)
    }

    async fn update_note(&self, id: &str, patch: &UiNotePatch) -> ApiResult<Option<UiNote>> {
        let payload = ApiNotePatch::from(patch);
        debug!(id, ?payload, "sending note patch");
        let updated: Option<Note> = self
            .request(self.http.patch(self.note_url(id)).json(&payload))
            .await?;
        Ok(updated.map(UiNote::from))
    }

    async fn delete_note(&self, id: &str) -> ApiResult<()> {
        let _: Option<serde_json::Value> =
            self.request(self.http.delete(self.note_url(id))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_built_from_base() {
        let api = HttpNotesApi::new("http://localhost:5001/", Duration::from_secs(5)).unwrap();
        assert_eq!(api.notes_url(), "http://localhost:5001/notes");
        assert_eq!(api.note_url("abc"), "http://localhost:5001/notes/abc");
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        let err = HttpNotesApi::new("", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_not_found_detection() {
        let err = ApiError::Status {
            status: 404,
            body: String::new(),
        };
        assert!(err.is_not_found());
        let err = ApiError::Status {
            status: 500,
            body: String::new(),
        };
        assert!(!err.is_not_found());
    }
}
