//! Typed endpoints of the events REST API.
//!
//! Each request type names its method, path and response type, so the HTTP
//! adapter can decode every answer into the right shape at compile time.

use reqwest::Method;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::event::{Event, SavedEvent};
use crate::query::SearchQuery;

pub trait Endpoint {
    type Response: DeserializeOwned;

    fn method() -> Method;

    /// Path relative to the backend base URL.
    fn path(&self) -> String;

    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> Option<&Event> {
        None
    }
}

/// `{ "events": [...] }`, the envelope both list endpoints answer with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsEnvelope<T> {
    pub events: Vec<T>,
}

/// Answer to a save request: the created entry, or any other acknowledgement.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SaveAck {
    Created(SavedEvent),
    Ack(IgnoredAny),
}

impl SaveAck {
    pub fn into_saved(self) -> Option<SavedEvent> {
        match self {
            SaveAck::Created(saved) => Some(saved),
            SaveAck::Ack(_) => None,
        }
    }
}

/// Error body returned by the backend on non-2xx answers.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(alias = "error", alias = "message")]
    pub detail: serde_json::Value,
}

/// `GET /search`
#[derive(Debug, Clone)]
pub struct Search {
    pub city: String,
    pub num_pages: u32,
    pub date_filters: String,
}

impl From<&SearchQuery> for Search {
    fn from(query: &SearchQuery) -> Self {
        Search {
            city: query.city.trim().to_string(),
            num_pages: query.num_pages(),
            date_filters: query.date_filters(),
        }
    }
}

impl Endpoint for Search {
    type Response = EventsEnvelope<Event>;

    fn method() -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "search".into()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("city", self.city.clone()),
            ("num_pages", self.num_pages.to_string()),
        ];
        if !self.date_filters.is_empty() {
            params.push(("date_filters", self.date_filters.clone()));
        }
        params
    }
}

/// `GET /saved_events`
#[derive(Debug, Clone, Copy)]
pub struct ListSavedEvents;

impl Endpoint for ListSavedEvents {
    type Response = EventsEnvelope<SavedEvent>;

    fn method() -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "saved_events".into()
    }
}

/// `POST /save_event`
#[derive(Debug, Clone)]
pub struct SaveEvent {
    pub event: Event,
}

impl Endpoint for SaveEvent {
    type Response = SaveAck;

    fn method() -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "save_event".into()
    }

    fn body(&self) -> Option<&Event> {
        Some(&self.event)
    }
}

/// `DELETE /delete_event/{id}`
#[derive(Debug, Clone, Copy)]
pub struct DeleteEvent {
    pub id: i64,
}

impl Endpoint for DeleteEvent {
    type Response = IgnoredAny;

    fn method() -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("delete_event/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::DateFilter;

    #[test]
    fn search_query_parameters() {
        let query = SearchQuery::new(" Austin ")
            .with_result_count(20)
            .with_date_filter(DateFilter::Weekend);
        let search = Search::from(&query);

        assert_eq!(
            search.query(),
            vec![
                ("city", "Austin".to_string()),
                ("num_pages", "2".to_string()),
                ("date_filters", "date:weekend".to_string()),
            ]
        );
    }

    #[test]
    fn search_omits_empty_date_filters() {
        let search = Search::from(&SearchQuery::new("Denver"));
        assert!(search.query().iter().all(|(name, _)| *name != "date_filters"));
    }

    #[test]
    fn save_ack_accepts_created_entry_or_bare_ack() {
        let created: SaveAck =
            serde_json::from_str(r#"{ "id": 4, "title": "Jazz Fest", "date": { "start_date": "May 1" } }"#).unwrap();
        assert_eq!(created.into_saved().map(|s| s.id), Some(4));

        let ack: SaveAck = serde_json::from_str(r#"{ "message": "saved" }"#).unwrap();
        assert!(ack.into_saved().is_none());

        let null: SaveAck = serde_json::from_str("null").unwrap();
        assert!(null.into_saved().is_none());
    }

    #[test]
    fn delete_path_carries_the_id() {
        assert_eq!(DeleteEvent { id: 12 }.path(), "delete_event/12");
    }
}
