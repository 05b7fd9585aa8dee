use crate::core::Pipeline;
use crate::domain::model::RunReport;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs extract, transform and load once. Nothing is written unless the
    /// first two phases succeed.
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting payment summary run");
        self.monitor.log_stats("Start");

        // Extract
        tracing::info!("Extracting source table...");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} bytes", raw_data.len());
        self.monitor.log_stats("Extract");

        // Transform
        tracing::info!("Aggregating payments...");
        let summary = self.pipeline.transform(raw_data).await?;
        let rows_processed = summary.row_count();
        tracing::info!(
            "Aggregated {} rows across {} payment types",
            rows_processed,
            summary.payment_type.len()
        );
        self.monitor.log_stats("Transform");

        // Load
        tracing::info!("Writing summary...");
        let output_location = self.pipeline.load(summary).await?;
        tracing::info!("Summary saved to: {}", output_location);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(RunReport {
            output_location,
            rows_processed,
        })
    }
}
