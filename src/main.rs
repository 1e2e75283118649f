use banks_etl::utils::{logger, validation::Validate};
use banks_etl::{BanksPipeline, CliArgs, EtlEngine, LocalStorage};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting banks-etl");

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };
    if args.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let storage = LocalStorage::new(".");
    let pipeline = BanksPipeline::new(storage, config.clone());
    let engine = EtlEngine::new(pipeline, config);

    match engine.run().await {
        Ok(report) => {
            tracing::info!(
                "✅ ETL process completed: {} banks, CSV at {}, table {}",
                report.record_count,
                report.csv_path,
                report.table_name
            );
        }
        Err(e) => {
            tracing::error!("❌ ETL process failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("Caused by: {:?}", e);
            std::process::exit(e.exit_code());
        }
    }
}
