//! Client copy of the backend's saved set.

use crate::event::SavedEvent;
use crate::key::{EventKey, Keyed};

/// The last confirmed saved set, replaced wholesale on every fetch.
///
/// Fetches are numbered when issued. A fetch that was issued before the one
/// already applied is stale and gets dropped, whatever order the answers
/// arrive in.
#[derive(Debug, Default)]
pub struct SavedSet {
    events: Vec<SavedEvent>,
    applied_ticket: u64,
}

impl SavedSet {
    /// Replace the set with the answer to fetch `ticket`. Returns false when
    /// a newer fetch was already applied.
    pub fn replace(&mut self, ticket: u64, events: Vec<SavedEvent>) -> bool {
        if ticket <= self.applied_ticket {
            return false;
        }
        self.applied_ticket = ticket;
        self.events = events;
        true
    }

    pub fn get(&self, key: &EventKey) -> Option<&SavedEvent> {
        self.events.iter().find(|s| s.key() == *key)
    }

    /// Backend ids of every entry under `key`. The backend does not enforce
    /// one entry per key, so there may be more than one.
    pub fn ids_of(&self, key: &EventKey) -> Vec<i64> {
        self.events.iter().filter(|s| s.key() == *key).map(|s| s.id).collect()
    }

    pub fn contains(&self, key: &EventKey) -> bool {
        self.get(key).is_some()
    }

    pub fn events(&self) -> &[SavedEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;

    fn saved(id: i64, title: &str) -> SavedEvent {
        SavedEvent::new(id, Event::new(title, "May 1"))
    }

    #[test]
    fn newer_fetch_replaces_wholesale() {
        let mut set = SavedSet::default();
        assert!(set.replace(1, vec![saved(1, "a"), saved(2, "b")]));
        assert!(set.replace(2, vec![saved(3, "c")]));

        assert_eq!(set.len(), 1);
        assert!(set.contains(&EventKey::from_parts("c", "May 1")));
        assert!(!set.contains(&EventKey::from_parts("a", "May 1")));
    }

    #[test]
    fn stale_fetch_is_dropped() {
        let mut set = SavedSet::default();
        assert!(set.replace(2, vec![saved(1, "a"), saved(2, "b")]));
        assert!(!set.replace(1, Vec::new()));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn lookup_by_key_finds_the_server_id() {
        let mut set = SavedSet::default();
        set.replace(1, vec![saved(9, "a")]);
        assert_eq!(set.get(&EventKey::from_parts("a", "May 1")).map(|s| s.id), Some(9));
    }

    #[test]
    fn ids_of_lists_every_duplicate() {
        let mut set = SavedSet::default();
        set.replace(1, vec![saved(4, "a"), saved(5, "b"), saved(6, "a")]);
        assert_eq!(set.ids_of(&EventKey::from_parts("a", "May 1")), vec![4, 6]);
        assert!(set.ids_of(&EventKey::from_parts("c", "May 1")).is_empty());
    }
}
