use crate::domain::model::Region;
use crate::domain::ports::ParameterSource;
use crate::utils::error::{Result, WatcherError};
use std::collections::HashSet;

pub fn services_path(region_code: &str) -> String {
    format!(
        "/aws/service/global-infrastructure/regions/{}/services",
        region_code
    )
}

pub struct ServiceLister<P: ParameterSource> {
    source: P,
}

impl<P: ParameterSource> ServiceLister<P> {
    pub fn new(source: P) -> Self {
        Self { source }
    }

    /// 取得區域內所有服務，跟著 next token 把每一頁依序串起來
    ///
    /// 任何一頁失敗都回傳 `ListingIncomplete`，不會回傳部分結果。
    pub async fn fetch(&self, region: &Region) -> Result<Vec<String>> {
        let path = services_path(region.code);
        let mut services = Vec::new();
        let mut seen_tokens = HashSet::new();
        let mut next_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self
                .source
                .fetch_page(&path, next_token.as_deref())
                .await
                .map_err(|e| match e {
                    e @ WatcherError::ListingIncomplete { .. } => e,
                    other => WatcherError::ListingIncomplete {
                        path: path.clone(),
                        message: other.to_string(),
                    },
                })?;
            pages += 1;
            services.extend(page.values);

            match page.next_token.filter(|token| !token.is_empty()) {
                Some(token) => {
                    if !seen_tokens.insert(token.clone()) {
                        return Err(WatcherError::ListingIncomplete {
                            path,
                            message: format!("next token repeated after {} pages", pages),
                        });
                    }
                    next_token = Some(token);
                }
                None => break,
            }
        }

        tracing::debug!(
            "Fetched {} services for {} in {} pages",
            services.len(),
            region.code,
            pages
        );
        Ok(services)
    }
}
