//! Event identity.
//!
//! A search result and a saved event are the same logical event when their
//! titles and start dates match. `EventKey` is that join key; every set and
//! map in the crate is keyed by it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::{Coordinates, Event, SavedEvent};

const SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventKey(String);

impl EventKey {
    pub fn of(event: &Event) -> Self {
        Self::from_parts(&event.title, event.start_date())
    }

    pub fn from_parts(title: &str, start_date: &str) -> Self {
        let mut key = String::with_capacity(title.len() + start_date.len() + 1);
        key.push_str(title);
        key.push(SEPARATOR);
        key.push_str(start_date);
        EventKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that carries an event and can therefore be keyed and placed.
pub trait Keyed {
    fn event(&self) -> &Event;

    fn key(&self) -> EventKey {
        EventKey::of(self.event())
    }

    fn coordinates(&self) -> Option<Coordinates> {
        self.event().coordinates
    }
}

impl Keyed for Event {
    fn event(&self) -> &Event {
        self
    }
}

impl Keyed for SavedEvent {
    fn event(&self) -> &Event {
        &self.event
    }
}
