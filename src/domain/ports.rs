use crate::domain::model::{BankRecord, Dataset};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> &str;
    fn rates_path(&self) -> &str;
    fn csv_output_path(&self) -> &str;
    fn log_path(&self) -> &str;
    fn database_path(&self) -> &str;
    fn table_name(&self) -> &str;
    fn queries(&self) -> &[String];
    fn timeout_seconds(&self) -> Option<u64>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<BankRecord>>;
    async fn transform(&self, data: Vec<BankRecord>) -> Result<Dataset>;
    /// Writes the CSV file and returns its path.
    async fn load(&self, dataset: &Dataset) -> Result<String>;
}
