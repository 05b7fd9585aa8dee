use anyhow::Context;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use payment_summary::utils::{logger, validation::Validate};
use payment_summary::{EtlEngine, LambdaConfig, LambdaRequest, S3Storage, SummaryPipeline};
use serde::Serialize;

#[derive(Serialize)]
pub struct Response {
    pub message: String,
    pub output_path: String,
    pub rows_processed: usize,
}

async fn function_handler(event: LambdaEvent<LambdaRequest>) -> Result<Response, Error> {
    tracing::info!("Starting payment summary Lambda function");

    // 事件欄位優先，缺少時讀取環境變數
    let lambda_config = LambdaConfig::from_request(event.payload)
        .context("failed to resolve source and destination")?;
    lambda_config
        .validate()
        .context("invalid Lambda configuration")?;

    let storage = S3Storage::from_settings(&lambda_config.storage_settings()).await;
    let pipeline = SummaryPipeline::new(storage, lambda_config);

    let report = EtlEngine::new(pipeline)
        .run()
        .await
        .context("payment summary run failed")?;

    tracing::info!("Payment summary Lambda function completed successfully");
    Ok(Response {
        message: "Payment summary completed successfully".to_string(),
        output_path: report.output_location,
        rows_processed: report.rows_processed,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
