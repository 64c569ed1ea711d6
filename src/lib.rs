pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{LocalStorage, S3Storage, SlackWebhook, SsmParameterSource};
pub use config::{WatcherConfig, REGIONS};
pub use crate::core::watcher::ServiceWatcher;
pub use utils::error::{Result, WatcherError};
