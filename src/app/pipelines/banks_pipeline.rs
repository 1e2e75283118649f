use crate::core::{csv_sink, extract, transform};
use crate::domain::model::{BankRecord, Dataset};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;

pub struct BanksPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) client: Client,
}

impl<S: Storage, C: ConfigProvider> BanksPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BanksPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<BankRecord>> {
        let url = self.config.source_url();
        tracing::debug!("Fetching bank list from: {}", url);

        let mut request = self.client.get(url);
        if let Some(timeout) = self.config.timeout_seconds() {
            request = request.timeout(std::time::Duration::from_secs(timeout));
        }

        let response = request.send().await?;
        tracing::debug!("Response status: {}", response.status());

        if !response.status().is_success() {
            return Err(EtlError::HttpStatusError {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let html = response.text().await?;
        let records = extract::parse_bank_table(&html)?;

        tracing::info!("📥 Extracted {} banks", records.len());
        Ok(records)
    }

    async fn transform(&self, data: Vec<BankRecord>) -> Result<Dataset> {
        let rates_path = self.config.rates_path();
        tracing::debug!("Loading exchange rates from: {}", rates_path);

        let raw = self.storage.read_file(rates_path).await?;
        let rates = transform::parse_exchange_rates(&raw)?;
        tracing::debug!("Loaded {} exchange rates", rates.len());

        let dataset = transform::enrich(data, &rates)?;
        tracing::info!("🔄 Transformed {} records", dataset.len());
        Ok(dataset)
    }

    async fn load(&self, dataset: &Dataset) -> Result<String> {
        let output_path = self.config.csv_output_path();

        let csv_data = csv_sink::to_csv_bytes(dataset)?;
        tracing::debug!("Writing CSV ({} bytes) to storage", csv_data.len());
        self.storage.write_file(output_path, &csv_data).await?;

        Ok(output_path.to_string())
    }
}
