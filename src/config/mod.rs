#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_identifier, validate_non_empty_list, validate_non_empty_string, validate_path,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_URL: &str =
    "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks";
pub const DEFAULT_RATES_PATH: &str = "exchange_rate.csv";
pub const DEFAULT_CSV_OUTPUT_PATH: &str = "Largest_banks_data.csv";
pub const DEFAULT_LOG_PATH: &str = "code_log.txt";
pub const DEFAULT_DATABASE_PATH: &str = "Banks.db";
pub const DEFAULT_TABLE_NAME: &str = "Largest_banks";
pub const DEFAULT_QUERIES: [&str; 3] = [
    "SELECT * FROM Largest_banks",
    "SELECT AVG(MC_GBP_Billion) FROM Largest_banks",
    "SELECT Name from Largest_banks LIMIT 5",
];

/// Everything one run needs. `Default` reproduces the compiled-in constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    pub source_url: String,
    pub rates_path: String,
    pub csv_output_path: String,
    pub log_path: String,
    pub database_path: String,
    pub table_name: String,
    pub queries: Vec<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            rates_path: DEFAULT_RATES_PATH.to_string(),
            csv_output_path: DEFAULT_CSV_OUTPUT_PATH.to_string(),
            log_path: DEFAULT_LOG_PATH.to_string(),
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            queries: DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
            timeout_seconds: None,
        }
    }
}

impl ConfigProvider for EtlConfig {
    fn source_url(&self) -> &str {
        &self.source_url
    }

    fn rates_path(&self) -> &str {
        &self.rates_path
    }

    fn csv_output_path(&self) -> &str {
        &self.csv_output_path
    }

    fn log_path(&self) -> &str {
        &self.log_path
    }

    fn database_path(&self) -> &str {
        &self.database_path
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn queries(&self) -> &[String] {
        &self.queries
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for EtlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source_url", &self.source_url)?;
        validate_path("rates_path", &self.rates_path)?;
        validate_path("csv_output_path", &self.csv_output_path)?;
        validate_path("log_path", &self.log_path)?;
        validate_path("database_path", &self.database_path)?;
        validate_identifier("table_name", &self.table_name)?;

        validate_non_empty_list("queries", &self.queries)?;
        for query in &self.queries {
            validate_non_empty_string("queries", query)?;
        }
        Ok(())
    }
}
