// Application Layer - Use Cases

pub mod constants;
pub mod lookup;

// Re-exports
pub use lookup::{LookupConfig, QueueManagerLookup};
