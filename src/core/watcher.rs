use crate::config::WatcherConfig;
use crate::core::lister::ServiceLister;
use crate::core::notifier::DiffNotifier;
use crate::core::snapshot::SnapshotStore;
use crate::domain::model::{DiffOutcome, Region, RegionReport, RegionStatus, RunReport};
use crate::domain::ports::{Notifier, ParameterSource, Storage};
use crate::utils::error::Result;
use chrono::Utc;
use tracing::Instrument;

pub struct ServiceWatcher<S: Storage, P: ParameterSource, N: Notifier> {
    store: SnapshotStore<S>,
    lister: ServiceLister<P>,
    notifier: N,
    regions: Vec<Region>,
}

impl<S: Storage, P: ParameterSource, N: Notifier> ServiceWatcher<S, P, N> {
    pub fn new(storage: S, source: P, notifier: N, config: &WatcherConfig) -> Self {
        Self {
            store: SnapshotStore::new(storage),
            lister: ServiceLister::new(source),
            notifier,
            regions: config.regions.clone(),
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// load → fetch → compare-and-notify
    pub async fn run_region(&self, region: &Region) -> Result<DiffOutcome> {
        let previous = self.store.load(region).await?;
        let current = self.lister.fetch(region).await?;

        DiffNotifier::new(&self.store, &self.notifier)
            .compare_and_notify(region, &previous, &current)
            .await
    }

    /// 依序檢查所有區域；單一區域失敗只記錄下來，其他區域照常執行
    pub async fn run(&self) -> RunReport {
        tracing::info!("Checking {} regions", self.regions.len());

        let mut reports = Vec::with_capacity(self.regions.len());
        for region in &self.regions {
            let span = tracing::info_span!("region", code = region.code);
            let status = match self.run_region(region).instrument(span).await {
                Ok(DiffOutcome::Unchanged) => RegionStatus::Unchanged,
                Ok(DiffOutcome::Notified { added }) => RegionStatus::Notified { added },
                Err(e) => {
                    tracing::error!("❌ {} check failed: {}", region.code, e);
                    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                    RegionStatus::Failed {
                        error: e.to_string(),
                    }
                }
            };

            reports.push(RegionReport {
                region: region.code.to_string(),
                status,
            });
        }

        let report = RunReport {
            finished_at: Utc::now(),
            regions: reports,
        };
        tracing::info!(
            "Check finished: {} notified, {} failed",
            report.notified_count(),
            report.failed_count()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::NotificationMessage;
    use crate::domain::ports::ParameterPage;
    use crate::utils::error::WatcherError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn put(&self, path: &str, data: &[u8]) {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Option<Vec<u8>>> {
            Ok(self.files.lock().await.get(path).cloned())
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    /// 以 region code 回傳單頁結果；`failing` 內的區域回傳錯誤
    #[derive(Clone, Default)]
    struct FakeDirectory {
        services: HashMap<&'static str, Vec<&'static str>>,
        failing: Vec<&'static str>,
    }

    #[async_trait]
    impl ParameterSource for FakeDirectory {
        async fn fetch_page(&self, path: &str, _next_token: Option<&str>) -> Result<ParameterPage> {
            let code = path
                .trim_start_matches("/aws/service/global-infrastructure/regions/")
                .trim_end_matches("/services");

            if self.failing.iter().any(|failing| *failing == code) {
                return Err(WatcherError::ListingIncomplete {
                    path: path.to_string(),
                    message: "AccessDeniedException".to_string(),
                });
            }

            Ok(ParameterPage {
                values: self
                    .services
                    .get(code)
                    .map(|list| list.iter().map(|s| s.to_string()).collect())
                    .unwrap_or_default(),
                next_token: None,
            })
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<NotificationMessage>>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, message: &NotificationMessage) -> crate::utils::error::Result<()> {
            self.sent.lock().await.push(message.clone());
            Ok(())
        }
    }

    fn config() -> WatcherConfig {
        WatcherConfig::new(
            Some("service-watcher-state".to_string()),
            "https://hooks.example.com/x".to_string(),
        )
    }

    #[tokio::test]
    async fn test_run_reports_every_region_in_order() {
        let storage = MockStorage::default();
        storage.put("ap-northeast-1/services.json", br#"["ec2"]"#).await;

        let mut directory = FakeDirectory::default();
        directory.services.insert("ap-northeast-1", vec!["ec2", "bedrock"]);

        let notifier = RecordingNotifier::default();
        let watcher = ServiceWatcher::new(storage.clone(), directory, notifier.clone(), &config());

        let report = watcher.run().await;

        let codes: Vec<&str> = report.regions.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(
            codes,
            vec!["ap-northeast-1", "us-east-1", "us-east-2", "us-west-1", "us-west-2"]
        );
        assert_eq!(
            report.regions[0].status,
            RegionStatus::Notified {
                added: vec!["bedrock".to_string()]
            }
        );
        // 其他區域的目錄是空的，沒有新服務
        assert_eq!(report.regions[1].status, RegionStatus::Unchanged);
        assert_eq!(notifier.sent.lock().await.len(), 1);
        assert_eq!(notifier.sent.lock().await[0].region_display_name, "東京");
    }

    #[tokio::test]
    async fn test_one_failing_region_does_not_stop_the_rest() {
        let storage = MockStorage::default();
        let mut directory = FakeDirectory::default();
        directory.failing.push("us-east-1");
        directory.services.insert("us-east-2", vec!["s3"]);

        let notifier = RecordingNotifier::default();
        let watcher = ServiceWatcher::new(storage.clone(), directory, notifier.clone(), &config());

        let report = watcher.run().await;

        assert_eq!(report.failed_count(), 1);
        assert!(matches!(
            report.regions[1].status,
            RegionStatus::Failed { .. }
        ));
        assert_eq!(
            report.regions[2].status,
            RegionStatus::Notified {
                added: vec!["s3".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn test_listing_failure_leaves_snapshot_untouched() {
        let storage = MockStorage::default();
        storage.put("us-east-1/services.json", br#"["ec2","s3"]"#).await;

        let mut directory = FakeDirectory::default();
        directory.failing.push("us-east-1");

        let watcher = ServiceWatcher::new(
            storage.clone(),
            directory,
            RecordingNotifier::default(),
            &config(),
        );

        let result = watcher.run_region(&watcher.regions()[1]).await;

        assert!(matches!(result, Err(WatcherError::ListingIncomplete { .. })));
        assert_eq!(
            storage.get_file("us-east-1/services.json").await.unwrap(),
            br#"["ec2","s3"]"#
        );
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_skips_listing_and_reports_failure() {
        let storage = MockStorage::default();
        storage.put("us-west-2/services.json", b"not json").await;

        let mut directory = FakeDirectory::default();
        directory.services.insert("us-west-2", vec!["ec2"]);

        let notifier = RecordingNotifier::default();
        let config = config().with_regions(vec![Region::new("us-west-2", "米国西部(オレゴン)")]);
        let watcher = ServiceWatcher::new(storage.clone(), directory, notifier.clone(), &config);

        let report = watcher.run().await;

        assert_eq!(report.failed_count(), 1);
        assert!(notifier.sent.lock().await.is_empty());
        assert_eq!(
            storage.get_file("us-west-2/services.json").await.unwrap(),
            b"not json"
        );
    }
}
