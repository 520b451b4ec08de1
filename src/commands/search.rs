use anyhow::{Context, Result};
use eventmap_core::Keyed;
use eventmap_core::config::EventMapConfig;
use owo_colors::OwoColorize;

use crate::commands::{SearchArgs, Session, map_mark, open_session, print_map_ops};
use crate::render::{Render, render_event_row};
use crate::utils::tui;

pub async fn run(cfg: &EventMapConfig, args: SearchArgs) -> Result<()> {
    let session = open_session(cfg).await?;
    search(&session, cfg, &args).await?;
    Ok(())
}

/// Run the search and print the result list, the map changes and the stats.
/// Returns false when the search found nothing.
pub async fn search(session: &Session, cfg: &EventMapConfig, args: &SearchArgs) -> Result<bool> {
    let query = args.to_query(cfg)?;
    let mark = map_mark(session);

    let spinner = tui::create_spinner(format!("Searching events in {}", query.city));
    let result = session.search(&query).await;
    spinner.finish_and_clear();

    let outcome = result.with_context(|| format!("Search for events in '{}' failed", query.city))?;

    if outcome.events.is_empty() {
        println!("{}", format!("No events found in {}", query.city).dimmed());
        return Ok(false);
    }

    let filter = query
        .date_filter
        .map(|f| format!(" ({})", f.label()))
        .unwrap_or_default();
    println!("Events in {}{}", query.city.bold(), filter.dimmed());
    for (i, event) in outcome.events.iter().enumerate() {
        println!("{}", render_event_row(i + 1, event, session.is_saved(&event.key())));
    }

    print_map_ops(session, mark);
    println!("\n{}", outcome.stats.render());

    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use eventmap_core::backend::HttpBackend;
    use eventmap_core::session::SearchSession;

    use super::*;
    use crate::terminal_map::TerminalMap;

    #[tokio::test]
    async fn failed_search_is_an_error_not_an_empty_result() {
        // Bind then drop a listener to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let cfg = EventMapConfig {
            server_url: format!("http://{addr}"),
            ..EventMapConfig::default()
        };
        let session = SearchSession::new(HttpBackend::from_config(&cfg).unwrap(), TerminalMap::default());
        let args = SearchArgs {
            city: "Austin".into(),
            date: None,
            results: None,
        };

        let err = search(&session, &cfg, &args).await.unwrap_err();

        assert!(err.to_string().contains("Austin"));
        assert!(session.search_results().is_empty());
    }
}
