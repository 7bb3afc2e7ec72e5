// Domain Layer - Pure parsing and value objects

pub mod error;
pub mod queue_manager;
pub mod stanza;

// Re-exports
pub use error::DomainError;
pub use queue_manager::{error_log_directory, QueueManagerRecord};
pub use stanza::parse_queue_manager_stanza;
