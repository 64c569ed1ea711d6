use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("Snapshot storage unavailable ({key}): {message}")]
    StorageUnavailable { key: String, message: String },

    #[error("Service listing incomplete for {path}: {message}")]
    ListingIncomplete { path: String, message: String },

    #[error("Notification delivery failed: {message}")]
    NotifyDeliveryFailed { message: String },

    #[error("Snapshot at {key} is not a JSON array of strings: {source}")]
    CorruptSnapshot {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl WatcherError {
    /// 給維運人員的處理建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            WatcherError::StorageUnavailable { .. } => {
                "Check the bucket name and the IAM permissions for s3:GetObject / s3:PutObject; the next run will retry"
            }
            WatcherError::ListingIncomplete { .. } => {
                "Check the IAM permission for ssm:GetParametersByPath; the snapshot was left untouched"
            }
            WatcherError::NotifyDeliveryFailed { .. } => {
                "Check the webhook URL; the snapshot was already updated, so this diff will not be re-sent"
            }
            WatcherError::CorruptSnapshot { .. } => {
                "Fix or empty the snapshot object; an empty object is treated as no prior state"
            }
            WatcherError::IoError(_) => "Check the state directory exists and is writable",
            WatcherError::SerializationError(_) => "Report this as a bug",
            WatcherError::ConfigError { .. }
            | WatcherError::MissingConfigError { .. }
            | WatcherError::InvalidConfigValueError { .. } => {
                "Check BUCKET_NAME, SLACK_INCOMING_WEBHOOK_URL and the command-line options"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, WatcherError>;
