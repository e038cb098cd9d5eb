//! Command handlers for limit-pack CLI
//!
//! Each submodule handles a specific CLI command.

pub mod completions;
pub mod config;
pub mod init;

pub use completions::cmd_completions;
pub use config::{cmd_config, ConfigOptions};
pub use init::cmd_init;
