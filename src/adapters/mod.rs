// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod ssm;
pub mod storage;
pub mod webhook;

pub use ssm::SsmParameterSource;
pub use storage::{LocalStorage, S3Storage};
pub use webhook::SlackWebhook;
