pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::storage::LocalStorage;
pub use config::EtlConfig;
pub use crate::core::{etl::EtlEngine, etl::RunReport, pipeline::BanksPipeline};
pub use utils::error::{EtlError, Result};
