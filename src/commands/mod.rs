pub mod config;
pub mod saved;
pub mod search;
pub mod toggle;

use anyhow::{Context, Result};
use eventmap_core::backend::HttpBackend;
use eventmap_core::config::EventMapConfig;
use eventmap_core::query::{DateFilter, SearchQuery};
use eventmap_core::session::SearchSession;
use owo_colors::OwoColorize;

use crate::render::render_map_ops;
use crate::terminal_map::TerminalMap;
use crate::utils::tui;

pub type Session = SearchSession<HttpBackend, TerminalMap>;

/// Search options shared by commands that run a search.
#[derive(Debug, Clone)]
pub struct SearchArgs {
    pub city: String,
    pub date: Option<DateFilter>,
    pub results: Option<u32>,
}

impl SearchArgs {
    pub fn to_query(&self, cfg: &EventMapConfig) -> Result<SearchQuery> {
        let mut query = SearchQuery::new(&self.city)
            .with_result_count(self.results.unwrap_or(cfg.default_results));

        let date = match self.date {
            Some(date) => Some(date),
            None => cfg.date_filter()?,
        };
        if let Some(date) = date {
            query = query.with_date_filter(date);
        }

        Ok(query)
    }
}

/// Connect to the backend and bring in the saved set.
///
/// A failed saved-set fetch is reported but does not stop the command; the
/// session simply starts with nothing saved.
pub async fn open_session(cfg: &EventMapConfig) -> Result<Session> {
    let backend = HttpBackend::from_config(cfg).context("Could not set up the events backend")?;
    let session = SearchSession::new(backend, TerminalMap::default());

    let spinner = tui::create_spinner("Loading saved events".to_string());
    let result = session.load_saved_events().await;
    spinner.finish_and_clear();

    if let Err(e) = result {
        println!("{}", format!("Could not load saved events: {e}").red());
    }

    Ok(session)
}

/// Map log position, so a command can render only what it caused.
pub fn map_mark(session: &Session) -> usize {
    session
        .with_registry(|r| r.surface().mark())
        .unwrap_or_default()
}

pub fn print_map_ops(session: &Session, mark: usize) {
    let lines = session
        .with_registry(|r| render_map_ops(r.surface().ops_since(mark)))
        .unwrap_or_default();

    if lines.is_empty() {
        return;
    }
    println!("\n{}", "Map:".dimmed());
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_falls_back_to_config_defaults() {
        let cfg = EventMapConfig {
            default_results: 30,
            default_date_filter: Some("weekend".into()),
            ..EventMapConfig::default()
        };
        let args = SearchArgs {
            city: "Austin".into(),
            date: None,
            results: None,
        };

        let query = args.to_query(&cfg).unwrap();

        assert_eq!(query.num_pages(), 3);
        assert_eq!(query.date_filter, Some(DateFilter::Weekend));
    }

    #[test]
    fn explicit_arguments_win_over_config() {
        let cfg = EventMapConfig {
            default_date_filter: Some("weekend".into()),
            ..EventMapConfig::default()
        };
        let args = SearchArgs {
            city: "Austin".into(),
            date: Some(DateFilter::Today),
            results: Some(20),
        };

        let query = args.to_query(&cfg).unwrap();

        assert_eq!(query.result_count, 20);
        assert_eq!(query.date_filter, Some(DateFilter::Today));
    }
}
