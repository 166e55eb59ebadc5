pub mod config;
pub mod error;
pub mod loading;
pub mod validation;

// Re-export main types
pub use config::*;
pub use error::*;
pub use loading::env_key_to_field;
