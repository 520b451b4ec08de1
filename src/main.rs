mod commands;
mod render;
mod terminal_map;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventmap_core::config::EventMapConfig;
use eventmap_core::query::DateFilter;
use tracing_subscriber::EnvFilter;

use commands::SearchArgs;

#[derive(Parser)]
#[command(name = "eventmap")]
#[command(about = "Search for events near a place, see them on a map, and keep the ones you like")]
struct Cli {
    /// Log debug output to stderr (overrides log_level from config)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for events in a city
    Search {
        city: String,

        /// Date window: today, tomorrow, week, weekend, next_week, month, next_month
        #[arg(short, long, value_parser = parse_date_filter)]
        date: Option<DateFilter>,

        /// Number of results (10, 20 or 30)
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
        results: Option<u32>,
    },
    /// List saved events
    Saved,
    /// Save or unsave an event
    Toggle {
        /// Position of the event in the list (starting at 1)
        index: usize,

        /// Pick from this city's search results instead of the saved list
        #[arg(short, long)]
        city: Option<String>,

        #[arg(short, long, value_parser = parse_date_filter, requires = "city")]
        date: Option<DateFilter>,

        #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..), requires = "city")]
        results: Option<u32>,
    },
    /// Show the configuration
    Config {
        /// Write a default config file
        #[arg(long)]
        init: bool,
    },
}

fn parse_date_filter(s: &str) -> Result<DateFilter, String> {
    s.parse().map_err(|e: eventmap_core::EventMapError| e.to_string())
}

fn init_tracing(cfg: &EventMapConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("eventmap=debug,eventmap_core=debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&cfg.log_level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = EventMapConfig::load()?;
    init_tracing(&cfg, cli.verbose);

    tracing::debug!(server = %cfg.server_url, "loaded configuration");

    match cli.command {
        Commands::Search { city, date, results } => {
            commands::search::run(&cfg, SearchArgs { city, date, results }).await
        }
        Commands::Saved => commands::saved::run(&cfg).await,
        Commands::Toggle {
            index,
            city,
            date,
            results,
        } => {
            let search = city.map(|city| SearchArgs { city, date, results });
            commands::toggle::run(&cfg, index, search).await
        }
        Commands::Config { init } => commands::config::run(&cfg, init),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_search_with_filters() {
        let cli = Cli::try_parse_from(["eventmap", "search", "Austin", "-d", "weekend", "-n", "20"]).unwrap();
        match cli.command {
            Commands::Search { city, date, results } => {
                assert_eq!(city, "Austin");
                assert_eq!(date, Some(DateFilter::Weekend));
                assert_eq!(results, Some(20));
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn rejects_unknown_date_filter() {
        assert!(Cli::try_parse_from(["eventmap", "search", "Austin", "--date", "someday"]).is_err());
    }

    #[test]
    fn toggle_filters_require_a_city() {
        assert!(Cli::try_parse_from(["eventmap", "toggle", "1", "--date", "today"]).is_err());
        assert!(Cli::try_parse_from(["eventmap", "toggle", "2", "--city", "Denver", "--date", "today"]).is_ok());
    }
}
