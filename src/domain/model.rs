use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 監視對象區域：region code 與顯示名稱
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Region {
    pub code: &'static str,
    pub display_name: &'static str,
}

impl Region {
    pub const fn new(code: &'static str, display_name: &'static str) -> Self {
        Self { code, display_name }
    }
}

/// 新服務通知內容，只在有差異時建立，不會被保存
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub region_display_name: String,
    pub added: Vec<String>,
}

impl NotificationMessage {
    pub fn text(&self) -> String {
        format!(
            "{}リージョンに新たに *{}* がやってきた。",
            self.region_display_name,
            self.added.join(", ")
        )
    }
}

/// Slack incoming webhook 的 JSON body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookPayload {
    pub username: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
}

impl From<&NotificationMessage> for WebhookPayload {
    fn from(message: &NotificationMessage) -> Self {
        Self {
            username: "AWS Service Watcher".to_string(),
            text: message.text(),
            icon_emoji: Some(":robot_face:".to_string()),
        }
    }
}

/// 一次 compare-and-notify 的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    Unchanged,
    Notified { added: Vec<String> },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegionStatus {
    Unchanged,
    Notified { added: Vec<String> },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionReport {
    pub region: String,
    #[serde(flatten)]
    pub status: RegionStatus,
}

/// 一次排程執行 (tick) 的摘要
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub finished_at: DateTime<Utc>,
    pub regions: Vec<RegionReport>,
}

impl RunReport {
    pub fn failed_count(&self) -> usize {
        self.regions
            .iter()
            .filter(|r| matches!(r.status, RegionStatus::Failed { .. }))
            .count()
    }

    pub fn notified_count(&self) -> usize {
        self.regions
            .iter()
            .filter(|r| matches!(r.status, RegionStatus::Notified { .. }))
            .count()
    }
}
