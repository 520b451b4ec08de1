//! Per-key single-flight guard.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::key::EventKey;

/// Keys with an operation in progress.
#[derive(Debug, Default)]
pub struct SingleFlight {
    keys: Mutex<HashSet<EventKey>>,
}

impl SingleFlight {
    /// Claim `key`, or `None` if it is already claimed. The claim lasts until
    /// the returned guard is dropped, including when its future is cancelled.
    pub fn try_acquire(&self, key: &EventKey) -> Option<FlightGuard<'_>> {
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key.clone()) {
            return None;
        }
        Some(FlightGuard {
            flight: self,
            key: key.clone(),
        })
    }

    pub fn is_in_flight(&self, key: &EventKey) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

#[derive(Debug)]
pub struct FlightGuard<'a> {
    flight: &'a SingleFlight,
    key: EventKey,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flight
            .keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
