//! Search session: the orchestrator between the backend and the map.
//!
//! The session owns the last search results, the client copy of the saved
//! set and the marker registry. Every change to any of them ends in one
//! reconciliation pass, which is the only path by which markers change.
//!
//! Locks guard plain data and are never held across an `.await`, so
//! operations only interleave at backend calls.

mod saved_set;
mod single_flight;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::backend::{EventSource, SavedEventStore};
use crate::error::{EventMapError, EventMapResult};
use crate::event::{Event, SavedEvent};
use crate::key::{EventKey, Keyed};
use crate::marker::{
    CameraTarget, MapSurface, MarkerRegistry, MarkerView, RESULT_ZOOM, SAVED_ZOOM, SEARCH_ZOOM,
};
use crate::query::SearchQuery;
use crate::reconcile::{self, ReconcileStats};

pub use saved_set::SavedSet;
pub use single_flight::{FlightGuard, SingleFlight};

/// What a successful search produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub events: Vec<Event>,
    /// First returned event with coordinates, at search zoom.
    pub focus: Option<CameraTarget>,
    pub stats: ReconcileStats,
}

/// Which way a save toggle went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Saved,
    Unsaved,
}

/// Where a focused event was picked from; decides the zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOrigin {
    SearchResult,
    Saved,
}

impl FocusOrigin {
    pub fn zoom(&self) -> f64 {
        match self {
            FocusOrigin::SearchResult => RESULT_ZOOM,
            FocusOrigin::Saved => SAVED_ZOOM,
        }
    }
}

struct SessionState<S: MapSurface> {
    /// `None` once the map surface has been torn down.
    registry: Option<MarkerRegistry<S>>,
    search_results: Vec<Event>,
    saved: SavedSet,
}

impl<S: MapSurface> SessionState<S> {
    fn reconcile(&mut self) -> ReconcileStats {
        match self.registry.as_mut() {
            Some(registry) => reconcile::reconcile(registry, &self.search_results, self.saved.events()),
            None => {
                debug!("map detached, skipping reconciliation");
                ReconcileStats::default()
            }
        }
    }

    fn fly_to(&mut self, target: CameraTarget) {
        if let Some(registry) = self.registry.as_mut() {
            registry.surface_mut().fly_to(target);
        }
    }
}

pub struct SearchSession<B, S: MapSurface> {
    backend: B,
    state: Mutex<SessionState<S>>,
    toggles: SingleFlight,
    fetch_tickets: AtomicU64,
}

impl<B, S> SearchSession<B, S>
where
    B: EventSource + SavedEventStore,
    S: MapSurface,
{
    /// A session drawing on `surface`. Call [`Self::load_saved_events`] once
    /// to bring in the saved set.
    pub fn new(backend: B, surface: S) -> Self {
        SearchSession {
            backend,
            state: Mutex::new(SessionState {
                registry: Some(MarkerRegistry::new(surface)),
                search_results: Vec::new(),
                saved: SavedSet::default(),
            }),
            toggles: SingleFlight::default(),
            fetch_tickets: AtomicU64::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a search and reconcile its results against the last known saved set.
    ///
    /// On failure, and when the backend finds nothing, the previous results
    /// and markers are left as they were.
    pub async fn search(&self, query: &SearchQuery) -> EventMapResult<SearchOutcome> {
        query.validate().inspect_err(|e| warn!(error = %e, "rejected search"))?;

        info!(city = %query.city, pages = query.num_pages(), filter = %query.date_filters(), "searching");
        let events = self
            .backend
            .search(query)
            .await
            .inspect_err(|e| warn!(city = %query.city, error = %e, "search failed"))?;

        if events.is_empty() {
            info!(city = %query.city, "search found no events, keeping previous results");
            return Ok(SearchOutcome {
                events,
                focus: None,
                stats: ReconcileStats::default(),
            });
        }

        let focus = events
            .iter()
            .find_map(|e| e.coordinates)
            .map(|center| CameraTarget::new(center, SEARCH_ZOOM));

        let mut state = self.state();
        state.search_results = events.clone();
        let stats = state.reconcile();
        if let Some(target) = focus {
            state.fly_to(target);
        }
        drop(state);

        info!(city = %query.city, events = events.len(), %stats, "search applied");
        Ok(SearchOutcome { events, focus, stats })
    }

    /// Fetch the saved set, replace the local copy and reconcile.
    ///
    /// If a fetch issued later has already been applied, this answer is
    /// dropped and nothing changes.
    pub async fn load_saved_events(&self) -> EventMapResult<ReconcileStats> {
        let ticket = self.fetch_tickets.fetch_add(1, Ordering::SeqCst) + 1;

        let events = self
            .backend
            .fetch_all()
            .await
            .inspect_err(|e| warn!(error = %e, "could not fetch saved events"))?;

        let mut state = self.state();
        let count = events.len();
        if !state.saved.replace(ticket, events) {
            debug!(ticket, "dropping stale saved-events fetch");
            return Ok(ReconcileStats::default());
        }
        let stats = state.reconcile();
        drop(state);

        info!(saved = count, %stats, "saved events refreshed");
        Ok(stats)
    }

    /// Save `event` if it is not in the saved set, otherwise delete every
    /// saved entry under its key, then refresh the saved set.
    ///
    /// Only one toggle per event key runs at a time; a second request for the
    /// same key while the first is in flight fails with
    /// [`EventMapError::ToggleInFlight`] without touching the backend.
    pub async fn toggle_save(&self, event: &Event) -> EventMapResult<ToggleOutcome> {
        let key = event.key();
        let Some(_guard) = self.toggles.try_acquire(&key) else {
            warn!(key = %key, "toggle already in flight, ignoring");
            return Err(EventMapError::ToggleInFlight(key));
        };

        let saved_ids = self.state().saved.ids_of(&key);

        let outcome = if saved_ids.is_empty() {
            debug!(key = %key, "saving event");
            self.backend
                .save(event)
                .await
                .inspect_err(|e| warn!(key = %key, error = %e, "save failed"))?;
            ToggleOutcome::Saved
        } else {
            for id in saved_ids {
                debug!(key = %key, id, "deleting saved event");
                self.backend
                    .delete(id)
                    .await
                    .inspect_err(|e| warn!(key = %key, id, error = %e, "delete failed"))?;
            }
            ToggleOutcome::Unsaved
        };

        self.load_saved_events().await?;
        Ok(outcome)
    }

    /// Fly the camera to one event.
    pub fn focus(&self, event: &impl Keyed, origin: FocusOrigin) -> EventMapResult<CameraTarget> {
        let center = event
            .coordinates()
            .ok_or_else(|| EventMapError::NoCoordinates(event.key()))?;
        let target = CameraTarget::new(center, origin.zoom());
        self.state().fly_to(target);
        Ok(target)
    }

    /// Tear down the map. Its markers are removed and the surface handed
    /// back. Operations finishing afterwards still update results and the
    /// saved set but leave markers alone.
    pub fn detach_map(&self) -> Option<S> {
        let registry = self.state().registry.take()?;
        debug!(markers = registry.len(), "detaching map");
        Some(registry.release())
    }

    /// Draw the current state on a new surface, replacing any attached one.
    pub fn attach_map(&self, surface: S) -> ReconcileStats {
        let mut state = self.state();
        if let Some(old) = state.registry.replace(MarkerRegistry::new(surface)) {
            old.release();
        }
        state.reconcile()
    }

    pub fn is_map_attached(&self) -> bool {
        self.state().registry.is_some()
    }

    /// Markers currently on the map, sorted by key.
    pub fn markers(&self) -> Vec<MarkerView> {
        self.state()
            .registry
            .as_ref()
            .map(MarkerRegistry::snapshot)
            .unwrap_or_default()
    }

    /// Run `f` against the attached registry, if any.
    pub fn with_registry<R>(&self, f: impl FnOnce(&MarkerRegistry<S>) -> R) -> Option<R> {
        self.state().registry.as_ref().map(f)
    }

    pub fn search_results(&self) -> Vec<Event> {
        self.state().search_results.clone()
    }

    pub fn saved_events(&self) -> Vec<SavedEvent> {
        self.state().saved.events().to_vec()
    }

    pub fn is_saved(&self, key: &EventKey) -> bool {
        self.state().saved.contains(key)
    }

    pub fn is_toggle_in_flight(&self, key: &EventKey) -> bool {
        self.toggles.is_in_flight(key)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
