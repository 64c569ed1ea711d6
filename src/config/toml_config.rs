use crate::utils::error::{Result, WatcherError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `--config` 指定的設定檔
///
/// ```toml
/// [watcher]
/// bucket = "service-watcher-state"
/// webhook_url = "${SLACK_INCOMING_WEBHOOK_URL}"
/// regions = ["ap-northeast-1", "us-east-1"]
/// interval_minutes = 30
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub watcher: WatcherSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatcherSection {
    pub bucket: Option<String>,
    pub webhook_url: Option<String>,
    pub state_dir: Option<String>,
    pub regions: Option<Vec<String>>,
    pub interval_minutes: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WatcherError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| WatcherError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SLACK_INCOMING_WEBHOOK_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| WatcherError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}
