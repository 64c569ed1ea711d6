use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_ssm::Client as SsmClient;
use aws_service_watcher::core::RunReport;
use aws_service_watcher::utils::{logger, validation::Validate};
use aws_service_watcher::{S3Storage, ServiceWatcher, SlackWebhook, SsmParameterSource, WatcherConfig};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

type Watcher = ServiceWatcher<S3Storage, SsmParameterSource, SlackWebhook>;

/// EventBridge 排程 (rate(30 minutes)) 觸發；event 內容不使用
async fn function_handler(
    watcher: &Watcher,
    event: LambdaEvent<serde_json::Value>,
) -> Result<RunReport, Error> {
    tracing::info!(
        "Starting service check (request {})",
        event.context.request_id
    );

    let report = watcher.run().await;
    if report.failed_count() > 0 {
        tracing::warn!(
            "{} of {} regions failed; they will be retried on the next schedule",
            report.failed_count(),
            report.regions.len()
        );
    }

    Ok(report)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = WatcherConfig::from_env()?;
    config.validate()?;
    let bucket = config.bucket.clone().ok_or("BUCKET_NAME is required")?;

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let watcher = ServiceWatcher::new(
        S3Storage::new(S3Client::new(&sdk_config), bucket),
        SsmParameterSource::new(SsmClient::new(&sdk_config)),
        SlackWebhook::new(config.webhook_url.clone()),
        &config,
    );

    let watcher = &watcher;
    run(service_fn(move |event: LambdaEvent<serde_json::Value>| async move {
        function_handler(watcher, event).await
    }))
    .await
}
