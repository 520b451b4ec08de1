use std::fmt;

use crate::key::EventKey;
use crate::marker::{MarkerSpec, MarkerStyle};
use crate::reconcile::DiffKind;

/// One marker mutation: place, restyle or remove.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDiff {
    pub kind: DiffKind,
    pub key: EventKey,
    /// Style currently on the map, if a marker exists.
    pub old: Option<MarkerStyle>,
    /// What the marker should look like, if it should exist.
    pub new: Option<MarkerSpec>,
}

impl fmt::Display for MarkerDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.old, &self.new) {
            (Some(old), Some(new)) => write!(f, "{} {} ({} → {})", self.kind, self.key, old, new.style),
            (_, Some(new)) => write!(f, "{} {} ({})", self.kind, self.key, new.style),
            _ => write!(f, "{} {}", self.kind, self.key),
        }
    }
}

impl MarkerDiff {
    pub fn get_diff(key: &EventKey, old: Option<MarkerStyle>, new: Option<MarkerSpec>) -> Option<MarkerDiff> {
        let kind = match (&old, &new) {
            (None, Some(_)) => DiffKind::Create,
            (Some(_), None) => DiffKind::Delete,
            (Some(style), Some(spec)) => {
                if *style == spec.style {
                    return None;
                }
                DiffKind::Update
            }
            (None, None) => return None,
        };

        Some(MarkerDiff {
            kind,
            key: key.clone(),
            old,
            new,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Coordinates;

    fn spec(style: MarkerStyle) -> MarkerSpec {
        MarkerSpec {
            position: Coordinates::new(1.0, 2.0),
            style,
            label: "x".into(),
        }
    }

    #[test]
    fn kinds_follow_presence_and_style() {
        let key = EventKey::from_parts("x", "y");

        let create = MarkerDiff::get_diff(&key, None, Some(spec(MarkerStyle::Default)));
        assert_eq!(create.map(|d| d.kind), Some(DiffKind::Create));

        let delete = MarkerDiff::get_diff(&key, Some(MarkerStyle::Saved), None);
        assert_eq!(delete.map(|d| d.kind), Some(DiffKind::Delete));

        let update = MarkerDiff::get_diff(&key, Some(MarkerStyle::Default), Some(spec(MarkerStyle::Saved)));
        assert_eq!(update.map(|d| d.kind), Some(DiffKind::Update));

        assert!(MarkerDiff::get_diff(&key, Some(MarkerStyle::Saved), Some(spec(MarkerStyle::Saved))).is_none());
        assert!(MarkerDiff::get_diff(&key, None, None).is_none());
    }
}
