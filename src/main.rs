use clap::Parser;
use payment_summary::core::{ConfigProvider, Storage};
use payment_summary::utils::{logger, validation::Validate};
use payment_summary::{
    CliConfig, EtlEngine, EtlError, LocalStorage, RunReport, Settings, StorageBackend,
    SummaryPipeline,
};

async fn execute<S, C>(storage: S, config: C, monitor: bool) -> payment_summary::Result<RunReport>
where
    S: Storage,
    C: ConfigProvider,
{
    let pipeline = SummaryPipeline::new(storage, config);
    EtlEngine::new_with_monitoring(pipeline, monitor).run().await
}

async fn run(config: CliConfig, settings: Settings) -> payment_summary::Result<RunReport> {
    let monitor_enabled = settings.monitoring.enabled;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    match settings.storage.backend {
        StorageBackend::Local => {
            let root = settings.storage.local_root.clone().ok_or_else(|| {
                EtlError::MissingConfigError {
                    field: "storage.local_root".to_string(),
                }
            })?;
            tracing::info!("Using local storage rooted at {}", root.display());
            execute(LocalStorage::new(root), config, monitor_enabled).await
        }
        #[cfg(feature = "s3")]
        StorageBackend::S3 => {
            let storage = payment_summary::S3Storage::from_settings(&settings.storage).await;
            execute(storage, config, monitor_enabled).await
        }
        #[cfg(not(feature = "s3"))]
        StorageBackend::S3 => Err(EtlError::ConfigError {
            message: "this build has no S3 support; pass --local-root".to_string(),
        }),
    }
}

fn fail(stage: &str, e: &EtlError) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        stage,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    // 缺少必要參數時 clap 會以非零狀態結束
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting payment-summary CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    let settings = match config.validate().and_then(|_| config.settings()) {
        Ok(settings) => settings,
        Err(e) => fail("Configuration validation failed", &e),
    };

    match run(config, settings).await {
        Ok(report) => {
            tracing::info!(
                "✅ Summary of {} payments written to {}",
                report.rows_processed,
                report.output_location
            );
            println!("✅ Payment summary completed successfully!");
            println!("📁 Output saved to: {}", report.output_location);
        }
        Err(e) => fail("Payment summary failed", &e),
    }
}
