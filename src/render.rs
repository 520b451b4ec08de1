//! TUI rendering traits for eventmap types.
//!
//! Extension traits that add colored terminal rendering to eventmap-core
//! types using owo_colors.

use eventmap_core::marker::{CameraTarget, MarkerStyle, MarkerView};
use eventmap_core::reconcile::{DiffKind, ReconcileStats};
use eventmap_core::{Event, SavedEvent};
use owo_colors::OwoColorize;

use crate::terminal_map::MapOp;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for DiffKind {
    fn render(&self) -> String {
        let symbol = self.symbol();
        match self {
            DiffKind::Create => symbol.green().to_string(),
            DiffKind::Update => symbol.yellow().to_string(),
            DiffKind::Delete => symbol.red().to_string(),
        }
    }
}

impl Render for MarkerStyle {
    fn render(&self) -> String {
        match self {
            MarkerStyle::Default => "●".blue().to_string(),
            MarkerStyle::Saved => "★".yellow().to_string(),
        }
    }
}

impl Render for CameraTarget {
    fn render(&self) -> String {
        format!("✈ {} {}", self.center, format!("(zoom {})", self.zoom).dimmed())
    }
}

impl Render for MapOp {
    fn render(&self) -> String {
        match self {
            MapOp::Added { label, position, style } => format!(
                "{} {} {} {}",
                DiffKind::Create.render(),
                style.render(),
                label.green(),
                position.to_string().dimmed()
            ),
            MapOp::Restyled { label, style } => format!(
                "{} {} {} {}",
                DiffKind::Update.render(),
                style.render(),
                label.yellow(),
                format!("(now {style})").dimmed()
            ),
            MapOp::Removed { label } => format!("{} {}", DiffKind::Delete.render(), label.red()),
            MapOp::Flew(target) => target.render(),
        }
    }
}

impl Render for MarkerView {
    fn render(&self) -> String {
        format!("{} {} {}", self.style.render(), self.label, self.position.to_string().dimmed())
    }
}

impl Render for ReconcileStats {
    fn render(&self) -> String {
        if self.is_empty() {
            return "Map unchanged".dimmed().to_string();
        }
        format!(
            "Markers: {} created, {} restyled, {} removed",
            self.created, self.restyled, self.removed
        )
    }
}

/// One numbered row of a result or saved list.
pub fn render_event_row(index: usize, event: &Event, saved: bool) -> String {
    let marker = if saved {
        MarkerStyle::Saved.render()
    } else if event.coordinates.is_some() {
        MarkerStyle::Default.render()
    } else {
        " ".to_string()
    };

    let when = if event.date.when.is_empty() {
        event.date.start_date.as_str()
    } else {
        event.date.when.as_str()
    };

    format!("{:>3}. {} {} {}", index, marker, event.title, when.dimmed())
}

pub fn render_saved_row(index: usize, saved: &SavedEvent) -> String {
    format!(
        "{} {}",
        render_event_row(index, &saved.event, true),
        format!("#{}", saved.id).dimmed()
    )
}

/// Render what happened on the map, most recent last.
pub fn render_map_ops(ops: &[MapOp]) -> Vec<String> {
    ops.iter().map(|op| format!("   {}", op.render())).collect()
}
