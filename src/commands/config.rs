use anyhow::Result;
use eventmap_core::config::{EventMapConfig, SERVER_URL_ENV};
use owo_colors::OwoColorize;

pub fn run(cfg: &EventMapConfig, init: bool) -> Result<()> {
    let path = EventMapConfig::config_path()?;

    if init {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        EventMapConfig::create_default_config(&path)?;
        println!("Created {}", path.display());
        return Ok(());
    }

    let status = if path.exists() { "" } else { " (not created yet)" };
    println!("{}{}", path.display(), status.dimmed());
    println!();
    println!("server_url           = {}", cfg.server_url);
    println!("request_timeout_secs = {}", cfg.request_timeout_secs);
    println!("default_results      = {}", cfg.default_results);
    println!(
        "default_date_filter  = {}",
        cfg.default_date_filter.as_deref().unwrap_or("(none)")
    );
    println!("log_level            = {}", cfg.log_level);

    if std::env::var_os(SERVER_URL_ENV).is_some() {
        println!("\n{}", format!("server_url overridden by {SERVER_URL_ENV}").dimmed());
    }

    Ok(())
}
