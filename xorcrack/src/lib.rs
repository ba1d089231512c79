pub mod analyze;
pub mod config;
pub mod encode;
pub mod encrypt;
pub mod error;

pub use error::{LowConfidence, ToolsError, ToolsResult, UnreliableKeyLength};
