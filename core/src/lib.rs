pub mod api;
pub mod chat;
pub mod config;
pub mod document;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod report;

// Re-exports for convenience
pub use chat::ChatMessage;
pub use chat::filter::TimeWindow;
pub use error::PodiumError;
pub use pipeline::{RunOutcome, run_podium_update};
