use anyhow::Result;
use eventmap_core::config::EventMapConfig;
use owo_colors::OwoColorize;

use crate::commands::{open_session, print_map_ops};
use crate::render::{Render, render_saved_row};

pub async fn run(cfg: &EventMapConfig) -> Result<()> {
    let session = open_session(cfg).await?;

    let saved = session.saved_events();
    if saved.is_empty() {
        println!("{}", "No saved events".dimmed());
        return Ok(());
    }

    println!("{}", "Saved events".bold());
    for (i, event) in saved.iter().enumerate() {
        println!("{}", render_saved_row(i + 1, event));
    }

    // Fresh session: everything on the map came from the saved set
    print_map_ops(&session, 0);

    let unplaced = saved.iter().filter(|s| s.event.coordinates.is_none()).count();
    if unplaced > 0 {
        println!(
            "\n{}",
            format!("{unplaced} saved event(s) have no location and are not on the map").dimmed()
        );
    }

    let markers = session.markers();
    println!("\n{} on map", markers.len());
    for marker in markers {
        println!("   {}", marker.render());
    }

    Ok(())
}
