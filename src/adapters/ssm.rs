use crate::domain::ports::{ParameterPage, ParameterSource};
use crate::utils::error::{Result, WatcherError};
use async_trait::async_trait;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::Client as SsmClient;

/// SSM Parameter Store 的 `GetParametersByPath`，只取 parameter 的 value
#[derive(Debug, Clone)]
pub struct SsmParameterSource {
    client: SsmClient,
}

impl SsmParameterSource {
    pub fn new(client: SsmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ParameterSource for SsmParameterSource {
    async fn fetch_page(&self, path: &str, next_token: Option<&str>) -> Result<ParameterPage> {
        let output = self
            .client
            .get_parameters_by_path()
            .path(path)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| WatcherError::ListingIncomplete {
                path: path.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let values = output
            .parameters()
            .iter()
            .filter_map(|p| p.value().map(str::to_string))
            .collect();

        Ok(ParameterPage {
            values,
            next_token: output.next_token().map(str::to_string),
        })
    }
}
