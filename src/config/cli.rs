use crate::config::EtlConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "banks-etl")]
#[command(about = "Scrape the largest banks list, convert market caps and load them into CSV and SQLite")]
pub struct CliArgs {
    /// Optional TOML file overriding the built-in settings
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliArgs {
    pub fn load_config(&self) -> Result<EtlConfig> {
        match &self.config {
            Some(path) => EtlConfig::from_file(path),
            None => Ok(EtlConfig::default()),
        }
    }
}
