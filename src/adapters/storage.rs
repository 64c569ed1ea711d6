use crate::domain::ports::Storage;
use crate::utils::error::{Result, WatcherError};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

impl Storage for S3Storage {
    async fn read_file(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let resp = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) if err.as_service_error().is_some_and(|e| e.is_no_such_key()) => {
                tracing::debug!("s3://{}/{} does not exist yet", self.bucket, path);
                return Ok(None);
            }
            Err(err) => {
                return Err(WatcherError::StorageUnavailable {
                    key: path.to_string(),
                    message: format!("Failed to read from S3: {}", DisplayErrorContext(&err)),
                })
            }
        };

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| WatcherError::StorageUnavailable {
                key: path.to_string(),
                message: format!("Failed to collect S3 data: {}", e),
            })?;

        Ok(Some(data.into_bytes().to_vec()))
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type("application/json")
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|e| WatcherError::StorageUnavailable {
                key: path.to_string(),
                message: format!("Failed to write to S3: {}", DisplayErrorContext(&e)),
            })?;

        tracing::debug!("Wrote {} bytes to s3://{}/{}", data.len(), self.bucket, path);
        Ok(())
    }
}

/// 本機目錄版本，`--state-dir` 時使用
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let full_path = self.base_path.join(path);

        match tokio::fs::read(&full_path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WatcherError::StorageUnavailable {
                key: full_path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);
        let unavailable = |e: std::io::Error| WatcherError::StorageUnavailable {
            key: full_path.display().to_string(),
            message: e.to_string(),
        };

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(unavailable)?;
        }

        tokio::fs::write(&full_path, data).await.map_err(unavailable)?;
        Ok(())
    }
}
