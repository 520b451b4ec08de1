//! The events backend, as seen by the core.
//!
//! The backend is the source of truth for search results and for the saved
//! set. The core depends only on the two traits here; [`HttpBackend`] is the
//! adapter for the REST service.

mod http;
pub mod protocol;

use std::future::Future;

use crate::error::EventMapResult;
use crate::event::{Event, SavedEvent};
use crate::query::SearchQuery;

pub use http::HttpBackend;

/// Runs event searches.
pub trait EventSource {
    fn search(&self, query: &SearchQuery) -> impl Future<Output = EventMapResult<Vec<Event>>> + Send;
}

/// Remote store of saved events. No caching happens here.
pub trait SavedEventStore {
    /// The authoritative saved set.
    fn fetch_all(&self) -> impl Future<Output = EventMapResult<Vec<SavedEvent>>> + Send;

    /// Save an event. The backend may answer with the created entry or with
    /// a bare acknowledgement.
    fn save(&self, event: &Event) -> impl Future<Output = EventMapResult<Option<SavedEvent>>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = EventMapResult<()>> + Send;
}
