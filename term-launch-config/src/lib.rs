//! Configuration system for the term-launch option engine.
//!
//! This crate provides configuration loading and default values for the
//! launcher. It includes:
//!
//! - The launcher `Config` (zoom bounds, new-terminal mode, log level)
//! - Log level and new-terminal mode types
//! - Profile types and the profile manager used for name/id lookup

pub mod config;
pub mod defaults;
pub mod error;
pub mod profile_types;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::{LogLevel, NewTerminalMode};

// Profile types and manager
pub use profile_types::{Profile, ProfileId, ProfileManager};

/// Highest persisted-document compatibility version this engine understands.
pub const CONFIG_COMPAT_VERSION: i64 = 1;
