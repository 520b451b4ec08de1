use anyhow::{Context, Result};
use eventmap_core::config::EventMapConfig;
use eventmap_core::session::{FocusOrigin, ToggleOutcome};
use eventmap_core::{Event, Keyed};
use owo_colors::OwoColorize;

use crate::commands::{SearchArgs, map_mark, open_session, print_map_ops, search};
use crate::render::Render;
use crate::utils::tui;

/// Toggle the saved state of one event, picked by its 1-based position in
/// either a fresh search's results or, without a search, the saved list.
pub async fn run(cfg: &EventMapConfig, index: usize, search_args: Option<SearchArgs>) -> Result<()> {
    let session = open_session(cfg).await?;

    let (event, origin) = match &search_args {
        Some(args) => {
            if !search::search(&session, cfg, args).await? {
                anyhow::bail!("Nothing to toggle: the search for '{}' returned no events", args.city);
            }
            println!();
            (pick(&session.search_results(), index)?, FocusOrigin::SearchResult)
        }
        None => {
            let saved: Vec<Event> = session.saved_events().into_iter().map(|s| s.event).collect();
            (pick(&saved, index)?, FocusOrigin::Saved)
        }
    };

    let mark = map_mark(&session);
    let spinner = tui::create_spinner(format!("Updating {}", event.title));
    let result = session.toggle_save(&event).await;
    spinner.finish_and_clear();

    match result.with_context(|| format!("Could not update '{}'", event.title))? {
        ToggleOutcome::Saved => println!("{} Saved {}", "★".yellow(), event.title.bold()),
        ToggleOutcome::Unsaved => println!("{} Removed {} from saved events", "-".red(), event.title.bold()),
    }

    if event.coordinates.is_some() {
        session.focus(&event, origin)?;
    }
    print_map_ops(&session, mark);

    let marker = session.markers().into_iter().find(|m| m.key == event.key());
    match marker {
        Some(marker) => println!("\n{}", marker.render()),
        None => println!("\n{}", "No longer on the map".dimmed()),
    }

    Ok(())
}

fn pick(events: &[Event], index: usize) -> Result<Event> {
    index
        .checked_sub(1)
        .and_then(|i| events.get(i))
        .cloned()
        .with_context(|| format!("No event #{} (there are {})", index, events.len()))
}
