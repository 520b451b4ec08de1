//! A map surface that draws into the terminal.
//!
//! Nothing is drawn as it happens; the surface keeps a log of what it was
//! asked to do, and commands render the log once an operation settles.

use eventmap_core::EventKey;
use eventmap_core::event::Coordinates;
use eventmap_core::marker::{CameraTarget, MapSurface, MarkerSpec, MarkerStyle};

#[derive(Debug, Clone, PartialEq)]
pub enum MapOp {
    Added {
        label: String,
        position: Coordinates,
        style: MarkerStyle,
    },
    Restyled {
        label: String,
        style: MarkerStyle,
    },
    Removed {
        label: String,
    },
    Flew(CameraTarget),
}

#[derive(Debug)]
pub struct TerminalMarker {
    label: String,
}

#[derive(Debug, Default)]
pub struct TerminalMap {
    ops: Vec<MapOp>,
}

impl TerminalMap {
    /// Log position, for rendering only what happened after it.
    pub fn mark(&self) -> usize {
        self.ops.len()
    }

    pub fn ops_since(&self, mark: usize) -> &[MapOp] {
        self.ops.get(mark..).unwrap_or_default()
    }
}

impl MapSurface for TerminalMap {
    type Marker = TerminalMarker;

    fn add_marker(&mut self, _key: &EventKey, spec: &MarkerSpec) -> TerminalMarker {
        self.ops.push(MapOp::Added {
            label: spec.label.clone(),
            position: spec.position,
            style: spec.style,
        });
        TerminalMarker {
            label: spec.label.clone(),
        }
    }

    fn restyle_marker(&mut self, marker: &mut TerminalMarker, style: MarkerStyle) {
        self.ops.push(MapOp::Restyled {
            label: marker.label.clone(),
            style,
        });
    }

    fn remove_marker(&mut self, marker: TerminalMarker) {
        self.ops.push(MapOp::Removed { label: marker.label });
    }

    fn fly_to(&mut self, target: CameraTarget) {
        self.ops.push(MapOp::Flew(target));
    }
}
