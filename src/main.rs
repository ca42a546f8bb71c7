#![windows_subsystem = "windows"]

use anyhow::Result;
use seqfeed::{config::Config, gui};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    tracing::info!(
        "Sequencer API at {}, feed at {}",
        config.submit_url(),
        config.feed_url
    );
    gui::launch(config)?;

    Ok(())
}
