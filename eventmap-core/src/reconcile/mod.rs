//! Reconciliation of map markers against search results and the saved set.
//!
//! Computing the plan is pure; applying it is the only place the marker
//! registry is ever mutated.

mod diff_kind;
mod marker_diff;
mod plan;

use std::fmt;

use tracing::debug;

use crate::event::{Event, SavedEvent};
use crate::marker::{MapSurface, MarkerRegistry};

pub use diff_kind::DiffKind;
pub use marker_diff::MarkerDiff;
pub use plan::{ReconcilePlan, desired_markers};

/// Mutations performed by one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub created: usize,
    pub restyled: usize,
    pub removed: usize,
}

impl ReconcileStats {
    pub fn is_empty(&self) -> bool {
        self.created == 0 && self.restyled == 0 && self.removed == 0
    }

    pub fn total(&self) -> usize {
        self.created + self.restyled + self.removed
    }
}

impl fmt::Display for ReconcileStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} restyled, {} removed",
            self.created, self.restyled, self.removed
        )
    }
}

/// Bring `registry` in line with the given search results and saved set.
pub fn reconcile<S: MapSurface>(
    registry: &mut MarkerRegistry<S>,
    search_results: &[Event],
    saved_events: &[SavedEvent],
) -> ReconcileStats {
    let plan = ReconcilePlan::for_registry(registry, search_results, saved_events);
    if plan.is_empty() {
        return ReconcileStats::default();
    }

    let stats = plan.apply(registry);
    debug!(%stats, markers = registry.len(), "reconciled markers");
    stats
}
