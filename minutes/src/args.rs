use std::path::PathBuf;

use clap::Parser;

/// Meeting minutes service
#[derive(Debug, Parser)]
#[command(name = "minutes", about = "Transcribe meeting recordings and summarize them into minutes")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "minutes.toml", env = "MINUTES_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "MINUTES_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Log filter directive (e.g. `info`, `minutes_pipeline=debug`)
    #[arg(long, default_value = "info", env = "MINUTES_LOG")]
    pub log_level: String,
}
