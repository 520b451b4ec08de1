//! Core types for eventmap.
//!
//! This crate holds everything that is not view chrome:
//! - `Event`, `SavedEvent` and the `EventKey` that joins them
//! - `marker::MarkerRegistry`, the keyed cache of on-map markers
//! - `reconcile`, the pure diff between wanted and placed markers
//! - `session::SearchSession`, which drives searches and save toggles
//! - `backend`, the HTTP adapter for the events service

pub mod backend;
pub mod config;
pub mod query;
pub mod error;
pub mod event;
pub mod key;
pub mod marker;
pub mod reconcile;
pub mod session;

pub use error::{EventMapError, EventMapResult};
pub use event::{Coordinates, Event, EventDate, SavedEvent};
pub use key::{EventKey, Keyed};

#[cfg(test)]
pub(crate) mod testing;
