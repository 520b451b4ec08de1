//! Marker plan computation and application.

use std::collections::{BTreeMap, BTreeSet};

use crate::event::{Event, SavedEvent};
use crate::key::{EventKey, Keyed};
use crate::marker::{MapSurface, MarkerRegistry, MarkerSpec, MarkerStyle, Upsert};
use crate::reconcile::{DiffKind, MarkerDiff, ReconcileStats};

/// The markers that should be on the map for a given pair of event lists.
///
/// Saved status wins the style when a key is in both lists. The position comes
/// from the saved entry when it has coordinates, otherwise from the search
/// result. Within one list the first entry with coordinates wins. Entries
/// without coordinates never become markers.
pub fn desired_markers(search_results: &[Event], saved_events: &[SavedEvent]) -> BTreeMap<EventKey, MarkerSpec> {
    let saved_keys: BTreeSet<EventKey> = saved_events.iter().map(Keyed::key).collect();
    let mut desired = BTreeMap::new();

    // Saved entries first, so their coordinates take precedence
    for saved in saved_events {
        if let Some(position) = saved.coordinates() {
            desired.entry(saved.key()).or_insert_with(|| MarkerSpec {
                position,
                style: MarkerStyle::Saved,
                label: saved.event.title.clone(),
            });
        }
    }

    for event in search_results {
        let Some(position) = event.coordinates else {
            continue;
        };
        let key = event.key();
        let style = if saved_keys.contains(&key) {
            MarkerStyle::Saved
        } else {
            MarkerStyle::Default
        };
        desired.entry(key).or_insert_with(|| MarkerSpec {
            position,
            style,
            label: event.title.clone(),
        });
    }

    desired
}

/// The minimal set of marker mutations between what is on the map and what
/// should be. Removals come first, then creates and restyles in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcilePlan {
    pub diffs: Vec<MarkerDiff>,
}

impl ReconcilePlan {
    pub fn compute(desired: BTreeMap<EventKey, MarkerSpec>, current: &BTreeMap<EventKey, MarkerStyle>) -> Self {
        let mut diffs = Vec::new();

        for (key, style) in current {
            if desired.contains_key(key) {
                continue;
            }
            if let Some(diff) = MarkerDiff::get_diff(key, Some(*style), None) {
                diffs.push(diff);
            }
        }

        for (key, spec) in desired {
            let old = current.get(&key).copied();
            if let Some(diff) = MarkerDiff::get_diff(&key, old, Some(spec)) {
                diffs.push(diff);
            }
        }

        ReconcilePlan { diffs }
    }

    /// Plan against the markers a registry currently holds.
    pub fn for_registry<S: MapSurface>(
        registry: &MarkerRegistry<S>,
        search_results: &[Event],
        saved_events: &[SavedEvent],
    ) -> Self {
        Self::compute(desired_markers(search_results, saved_events), &registry.styles())
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    pub fn count(&self, kind: DiffKind) -> usize {
        self.diffs.iter().filter(|d| d.kind == kind).count()
    }

    pub fn apply<S: MapSurface>(self, registry: &mut MarkerRegistry<S>) -> ReconcileStats {
        let mut stats = ReconcileStats::default();

        for diff in self.diffs {
            match (diff.kind, diff.new) {
                (DiffKind::Delete, _) => {
                    if registry.remove(&diff.key) {
                        stats.removed += 1;
                    }
                }
                (_, Some(spec)) => match registry.upsert(&diff.key, spec) {
                    Upsert::Created => stats.created += 1,
                    Upsert::Restyled => stats.restyled += 1,
                    Upsert::Unchanged => {}
                },
                (_, None) => {}
            }
        }

        stats
    }
}
