//! Parsing and validation of `xgen.toml` project configuration files.
//!
//! This crate reads the project configuration file and produces a strongly-typed
//! [`ProjectConfig`], which [`resolve_plan`] turns into a [`RunPlan`] with the
//! compilation target and absolute input and output paths.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE};
pub use resolve::{resolve_plan, RunPlan};
pub use types::*;
