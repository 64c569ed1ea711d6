use crate::core::snapshot::SnapshotStore;
use crate::domain::model::{DiffOutcome, NotificationMessage, Region};
use crate::domain::ports::{Notifier, Storage};
use crate::utils::error::Result;
use std::collections::HashSet;

/// `current - previous`，依 `current` 中第一次出現的順序，重複的只留一個
pub fn added_services(previous: &HashSet<String>, current: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    current
        .iter()
        .filter(|service| !previous.contains(*service) && seen.insert(service.as_str()))
        .cloned()
        .collect()
}

pub struct DiffNotifier<'a, S: Storage, N: Notifier> {
    store: &'a SnapshotStore<S>,
    notifier: &'a N,
}

impl<'a, S: Storage, N: Notifier> DiffNotifier<'a, S, N> {
    pub fn new(store: &'a SnapshotStore<S>, notifier: &'a N) -> Self {
        Self { store, notifier }
    }

    /// 有新服務時先覆寫 snapshot 再送通知
    ///
    /// 通知失敗時錯誤會往上傳，但已寫入的 snapshot 不會回滾，
    /// 所以同一批新服務之後不會再通知一次。
    pub async fn compare_and_notify(
        &self,
        region: &Region,
        previous: &HashSet<String>,
        current: &[String],
    ) -> Result<DiffOutcome> {
        let added = added_services(previous, current);
        if added.is_empty() {
            tracing::debug!("No new services in {}", region.code);
            return Ok(DiffOutcome::Unchanged);
        }

        tracing::info!(
            "New services in {}: {}",
            region.code,
            added.join(", ")
        );

        self.store.save(region, current).await?;

        let message = NotificationMessage {
            region_display_name: region.display_name.to_string(),
            added: added.clone(),
        };
        self.notifier.notify(&message).await?;

        Ok(DiffOutcome::Notified { added })
    }
}
