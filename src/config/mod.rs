#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::Region;
use crate::utils::error::{Result, WatcherError};
use crate::utils::validation::{self, Validate};
use std::env;
use std::path::PathBuf;

/// 監視的區域，依此順序處理
pub const REGIONS: &[Region] = &[
    Region::new("ap-northeast-1", "東京"),
    Region::new("us-east-1", "米国東部(バージニア北部)"),
    Region::new("us-east-2", "米国東部(オハイオ)"),
    Region::new("us-west-1", "米国西部(北カリフォルニア)"),
    Region::new("us-west-2", "米国西部(オレゴン)"),
];

pub const DEFAULT_INTERVAL_MINUTES: u64 = 30;

pub const BUCKET_ENV: &str = "BUCKET_NAME";
pub const WEBHOOK_URL_ENV: &str = "SLACK_INCOMING_WEBHOOK_URL";

/// 啟動時建立一次，之後以參考傳給各元件
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    pub bucket: Option<String>,
    pub state_dir: Option<PathBuf>,
    pub webhook_url: String,
    pub regions: Vec<Region>,
    pub interval_minutes: u64,
}

impl WatcherConfig {
    pub fn new(bucket: Option<String>, webhook_url: String) -> Self {
        Self {
            bucket,
            state_dir: None,
            webhook_url,
            regions: REGIONS.to_vec(),
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
        }
    }

    /// Lambda 用：從環境變數讀取 bucket 與 webhook URL
    pub fn from_env() -> Result<Self> {
        let bucket = env::var(BUCKET_ENV).map_err(|_| WatcherError::MissingConfigError {
            field: BUCKET_ENV.to_string(),
        })?;
        let webhook_url = env::var(WEBHOOK_URL_ENV).map_err(|_| WatcherError::MissingConfigError {
            field: WEBHOOK_URL_ENV.to_string(),
        })?;

        Ok(Self::new(Some(bucket), webhook_url))
    }

    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = regions;
        self
    }
}

pub fn find_region(code: &str) -> Option<Region> {
    REGIONS.iter().copied().find(|r| r.code == code)
}

/// 依給定的 code 篩選內建區域表；順序維持內建表的順序
pub fn select_regions(codes: &[String]) -> Result<Vec<Region>> {
    if codes.is_empty() {
        return Ok(REGIONS.to_vec());
    }

    if let Some(unknown) = codes.iter().find(|code| find_region(code).is_none()) {
        let known: Vec<&str> = REGIONS.iter().map(|r| r.code).collect();
        return Err(WatcherError::InvalidConfigValueError {
            field: "regions".to_string(),
            value: unknown.clone(),
            reason: format!("Unknown region. Known regions: {}", known.join(", ")),
        });
    }

    Ok(REGIONS
        .iter()
        .copied()
        .filter(|r| codes.iter().any(|code| code == r.code))
        .collect())
}

impl Validate for WatcherConfig {
    fn validate(&self) -> Result<()> {
        match (&self.state_dir, &self.bucket) {
            (Some(dir), _) => validation::validate_path("state_dir", &dir.to_string_lossy())?,
            (None, bucket) => {
                let bucket = validation::validate_required_field("bucket", bucket)?;
                validation::validate_s3_bucket_name("bucket", bucket)?;
            }
        }

        validation::validate_url("webhook_url", &self.webhook_url)?;

        if self.regions.is_empty() {
            return Err(WatcherError::ConfigError {
                message: "at least one region must be configured".to_string(),
            });
        }
        for region in &self.regions {
            validation::validate_aws_region("regions", region.code)?;
        }

        validation::validate_range("interval_minutes", self.interval_minutes, 1, 24 * 60)?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
