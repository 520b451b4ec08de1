//! HTTP adapter for the events REST API.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use crate::backend::protocol::{
    DeleteEvent, Endpoint, ErrorResponse, ListSavedEvents, SaveEvent, Search,
};
use crate::backend::{EventSource, SavedEventStore};
use crate::config::EventMapConfig;
use crate::error::{EventMapError, EventMapResult};
use crate::event::{Event, SavedEvent};
use crate::query::SearchQuery;

/// Client for the events backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> EventMapResult<Self> {
        // A trailing slash keeps `join` from dropping the last path segment
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| EventMapError::Config(format!("Invalid server URL '{base_url}': {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EventMapError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(HttpBackend { http, base_url })
    }

    pub fn from_config(config: &EventMapConfig) -> EventMapResult<Self> {
        Self::new(&config.server_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send a typed request and decode its typed answer.
    pub async fn call<E: Endpoint>(&self, endpoint: E) -> EventMapResult<E::Response> {
        let url = self
            .base_url
            .join(&endpoint.path())
            .map_err(|e| EventMapError::Transport(format!("Invalid request path: {e}")))?;

        let mut request = self.http.request(E::method(), url.clone());
        let query = endpoint.query();
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = endpoint.body() {
            request = request.json(body);
        }

        debug!(method = %E::method(), %url, "calling events backend");
        let resp = request.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            let message = error_message(status, &bytes);
            warn!(%status, %url, %message, "events backend returned an error");
            return Err(match status {
                StatusCode::CONFLICT => EventMapError::Conflict(message),
                StatusCode::NOT_FOUND => EventMapError::NotFound(message),
                _ => EventMapError::Transport(message),
            });
        }

        // Bare acknowledgements may come back with no body at all
        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };

        serde_json::from_slice(body)
            .map_err(|e| EventMapError::MalformedResponse(format!("{}: {}", url.path(), e)))
    }
}

fn error_message(status: StatusCode, body: &[u8]) -> String {
    let detail = match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            detail: serde_json::Value::String(s),
        }) => s,
        Ok(ErrorResponse { detail }) => detail.to_string(),
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    };

    if detail.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {detail}")
    }
}

impl EventSource for HttpBackend {
    async fn search(&self, query: &SearchQuery) -> EventMapResult<Vec<Event>> {
        Ok(self.call(Search::from(query)).await?.events)
    }
}

impl SavedEventStore for HttpBackend {
    async fn fetch_all(&self) -> EventMapResult<Vec<SavedEvent>> {
        Ok(self.call(ListSavedEvents).await?.events)
    }

    async fn save(&self, event: &Event) -> EventMapResult<Option<SavedEvent>> {
        let ack = self
            .call(SaveEvent {
                event: event.clone(),
            })
            .await?;
        Ok(ack.into_saved())
    }

    async fn delete(&self, id: i64) -> EventMapResult<()> {
        self.call(DeleteEvent { id }).await?;
        Ok(())
    }
}
