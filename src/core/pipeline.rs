pub use crate::app::pipelines::banks_pipeline::BanksPipeline;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EtlConfig;
    use crate::core::csv_sink;
    use crate::domain::model::{BankRecord, Dataset, EnrichedBankRecord};
    use crate::domain::ports::{Pipeline, Storage};
    use crate::utils::error::{EtlError, Result};
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        fn with_rates(rates_csv: &str) -> Self {
            let storage = Self::new();
            storage
                .files
                .try_lock()
                .unwrap()
                .insert("exchange_rate.csv".to_string(), rates_csv.as_bytes().to_vec());
            storage
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    const RATES: &str = "Currency,Rate\nEUR,0.93\nGBP,0.8\nINR,82.95\n";

    const BANKS_PAGE: &str = r#"<html><body><table><tbody>
<tr><th>Rank</th><th>Bank name</th><th>Market cap</th></tr>
<tr><td>1</td><td><a href="/wiki/US"><img></a> <a href="/wiki/JPM">JPMorgan Chase</a></td><td>432.92
</td></tr>
<tr><td>2</td><td><a href="/wiki/US"><img></a> <a href="/wiki/BoA">Bank of America</a></td><td>231.52
</td></tr>
</tbody></table></body></html>"#;

    fn config_for(url: String) -> EtlConfig {
        EtlConfig {
            source_url: url,
            ..EtlConfig::default()
        }
    }

    #[tokio::test]
    async fn test_extract_parses_page() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/wiki/List_of_largest_banks");
            then.status(200)
                .header("Content-Type", "text/html")
                .body(BANKS_PAGE);
        });

        let config = config_for(server.url("/wiki/List_of_largest_banks"));
        let pipeline = BanksPipeline::new(MockStorage::new(), config);

        let result = pipeline.extract().await.unwrap();

        page_mock.assert();
        assert_eq!(
            result,
            vec![
                BankRecord {
                    name: "JPMorgan Chase".to_string(),
                    market_cap_usd: 432.92,
                },
                BankRecord {
                    name: "Bank of America".to_string(),
                    market_cap_usd: 231.52,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_extract_http_error_is_fatal() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(500);
        });

        let pipeline = BanksPipeline::new(MockStorage::new(), config_for(server.url("/")));

        let err = pipeline.extract().await.unwrap_err();

        page_mock.assert();
        match err {
            EtlError::HttpStatusError { status, .. } => assert_eq!(status, 500),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_transform_reads_rates_from_storage() {
        let storage = MockStorage::with_rates(RATES);
        let pipeline = BanksPipeline::new(storage, EtlConfig::default());

        let input = vec![BankRecord {
            name: "JPMorgan Chase".to_string(),
            market_cap_usd: 432.92,
        }];
        let dataset = pipeline.transform(input).await.unwrap();

        assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        assert_eq!(record.market_cap_gbp, 346.34);
        assert_eq!(record.market_cap_inr, 35910.71);
        assert_eq!(record.market_cap_eur, 402.62);
    }

    #[tokio::test]
    async fn test_transform_missing_rates_file() {
        let pipeline = BanksPipeline::new(MockStorage::new(), EtlConfig::default());

        let err = pipeline.transform(vec![]).await.unwrap_err();
        assert!(matches!(err, EtlError::IoError(_)));
    }

    #[tokio::test]
    async fn test_transform_missing_currency() {
        let storage = MockStorage::with_rates("Currency,Rate\nEUR,0.93\nINR,82.95\n");
        let pipeline = BanksPipeline::new(storage, EtlConfig::default());

        let err = pipeline.transform(vec![]).await.unwrap_err();
        assert!(matches!(err, EtlError::RateLookupError { .. }));
    }

    #[tokio::test]
    async fn test_load_writes_csv_to_storage() {
        let storage = MockStorage::new();
        let pipeline = BanksPipeline::new(storage.clone(), EtlConfig::default());

        let dataset = Dataset::new(vec![EnrichedBankRecord {
            name: "Test Bank".to_string(),
            market_cap_usd: 100.0,
            market_cap_gbp: 80.0,
            market_cap_inr: 8250.0,
            market_cap_eur: 93.0,
        }]);

        let output_path = pipeline.load(&dataset).await.unwrap();

        assert_eq!(output_path, "Largest_banks_data.csv");
        let written = storage.get_file("Largest_banks_data.csv").await.unwrap();
        assert_eq!(csv_sink::read_csv(&written).unwrap(), dataset);
    }
}
