use crate::domain::model::Region;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, WatcherError};
use std::collections::HashSet;

pub const SNAPSHOT_FILE: &str = "services.json";

pub fn snapshot_key(region_code: &str) -> String {
    format!("{}/{}", region_code, SNAPSHOT_FILE)
}

/// 每個區域上次確認時的完整服務清單，存成 JSON 字串陣列
pub struct SnapshotStore<S: Storage> {
    storage: S,
}

impl<S: Storage> SnapshotStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 物件不存在或內容為空字串時視為 `[]`
    pub async fn load(&self, region: &Region) -> Result<HashSet<String>> {
        let key = snapshot_key(region.code);

        let Some(data) = self.storage.read_file(&key).await? else {
            tracing::debug!("No snapshot at {}, starting from empty", key);
            return Ok(HashSet::new());
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!("Snapshot at {} is empty", key);
            return Ok(HashSet::new());
        }

        let services: Vec<String> = serde_json::from_slice(&data)
            .map_err(|source| WatcherError::CorruptSnapshot { key: key.clone(), source })?;

        tracing::debug!("Loaded {} known services from {}", services.len(), key);
        Ok(services.into_iter().collect())
    }

    /// 整份覆寫，不做合併
    pub async fn save(&self, region: &Region, services: &[String]) -> Result<()> {
        let key = snapshot_key(region.code);
        let data = serde_json::to_vec(services)?;

        self.storage.write_file(&key, &data).await?;
        tracing::debug!("Saved {} services to {}", services.len(), key);
        Ok(())
    }
}
