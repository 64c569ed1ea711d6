use anyhow::Context;
use aws_config::BehaviorVersion;
use aws_service_watcher::core::{Notifier, ParameterSource, RunReport, Storage};
use aws_service_watcher::utils::{logger, validation::Validate};
use aws_service_watcher::{
    CliConfig, LocalStorage, S3Storage, ServiceWatcher, SlackWebhook, SsmParameterSource,
    WatcherConfig,
};
use clap::Parser;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting aws-service-watcher CLI");

    // 驗證配置
    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let source = SsmParameterSource::new(aws_sdk_ssm::Client::new(&sdk_config));
    let notifier = SlackWebhook::new(config.webhook_url.clone());

    let any_failed = match (&config.state_dir, &config.bucket) {
        (Some(dir), _) => {
            tracing::info!("📁 Using local snapshots in {}", dir.display());
            let storage = LocalStorage::new(dir.clone());
            run(ServiceWatcher::new(storage, source, notifier, &config), &config, cli.watch).await?
        }
        (None, Some(bucket)) => {
            tracing::info!("🪣 Using snapshots in s3://{}", bucket);
            let storage = S3Storage::new(aws_sdk_s3::Client::new(&sdk_config), bucket.clone());
            run(ServiceWatcher::new(storage, source, notifier, &config), &config, cli.watch).await?
        }
        (None, None) => anyhow::bail!("either --bucket or --state-dir is required"),
    };

    if any_failed {
        std::process::exit(2);
    }
    Ok(())
}

/// 單次執行，或 `--watch` 時依間隔重複執行直到 Ctrl-C
async fn run<S, P, N>(
    watcher: ServiceWatcher<S, P, N>,
    config: &WatcherConfig,
    watch: bool,
) -> anyhow::Result<bool>
where
    S: Storage,
    P: ParameterSource,
    N: Notifier,
{
    if !watch {
        let report = watcher.run().await;
        print_report(&report);
        return Ok(report.failed_count() > 0);
    }

    let period = Duration::from_secs(config.interval_minutes * 60);
    tracing::info!("🔍 Watching every {} minutes", config.interval_minutes);

    let mut ticker = tokio::time::interval(period);
    // 前一輪跑太久時不補跑
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut shutdown = std::pin::pin!(tokio::signal::ctrl_c());
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = watcher.run().await;
                print_report(&report);
            }
            result = &mut shutdown => {
                result.context("failed to listen for Ctrl-C")?;
                tracing::info!("Received Ctrl-C, stopping");
                return Ok(false);
            }
        }
    }
}

fn print_report(report: &RunReport) {
    match serde_json::to_string(report) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::warn!("Could not serialize run report: {}", e),
    }
}
