use crate::domain::model::NotificationMessage;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Object storage。物件不存在時回傳 `Ok(None)`，不是錯誤
pub trait Storage: Send + Sync {
    fn read_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 分頁查詢的一頁
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterPage {
    pub values: Vec<String>,
    pub next_token: Option<String>,
}

#[async_trait]
pub trait ParameterSource: Send + Sync {
    async fn fetch_page(&self, path: &str, next_token: Option<&str>) -> Result<ParameterPage>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &NotificationMessage) -> Result<()>;
}
