pub mod lister;
pub mod notifier;
pub mod snapshot;
pub mod watcher;

pub use crate::domain::model::{DiffOutcome, NotificationMessage, Region, RunReport};
pub use crate::domain::ports::{Notifier, ParameterPage, ParameterSource, Storage};
pub use crate::utils::error::Result;
