use crate::adapters::sqlite;
use crate::core::{ConfigProvider, Pipeline};
use crate::domain::model::QueryResult;
use crate::utils::error::Result;
use crate::utils::logger::ProgressLog;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct RunReport {
    pub record_count: usize,
    pub csv_path: String,
    pub table_name: String,
    pub query_results: Vec<QueryResult>,
}

pub struct EtlEngine<P: Pipeline, C: ConfigProvider> {
    pipeline: P,
    config: C,
}

impl<P: Pipeline, C: ConfigProvider> EtlEngine<P, C> {
    pub fn new(pipeline: P, config: C) -> Self {
        Self { pipeline, config }
    }

    /// Runs the whole pipeline, printing query results to stdout.
    pub async fn run(&self) -> Result<RunReport> {
        self.run_with_output(&mut std::io::stdout()).await
    }

    pub async fn run_with_output<W: Write>(&self, out: &mut W) -> Result<RunReport> {
        let progress = ProgressLog::new(self.config.log_path());

        // 連線在整個流程中持有，失敗時由 Drop 釋放
        let mut conn = sqlite::open_database(self.config.database_path())?;
        progress.log("Preliminaries complete. Initiating ETL process.")?;

        let records = self.pipeline.extract().await?;
        progress.log("Data extraction complete. Initiating Transformation process.")?;

        let dataset = self.pipeline.transform(records).await?;
        progress.log("Data transformation complete. Initiating loading process.")?;

        let csv_path = self.pipeline.load(&dataset).await?;
        tracing::info!("📁 CSV saved to: {}", csv_path);
        progress.log("Data saved to CSV file.")?;

        progress.log("SQL Connection initiated.")?;

        let table_name = self.config.table_name();
        sqlite::write_table(&dataset, &mut conn, table_name)?;
        tracing::info!("💾 Loaded {} rows into table {}", dataset.len(), table_name);
        progress.log("Data loaded to Database as table. Running the query.")?;

        let query_results = sqlite::run_queries(self.config.queries(), &conn, out)?;
        sqlite::close_database(conn)?;
        progress.log("Process Complete.")?;

        Ok(RunReport {
            record_count: dataset.len(),
            csv_path,
            table_name: table_name.to_string(),
            query_results,
        })
    }
}
