//! Small helpers shared by the workspace crates: environment access,
//! TOML configuration loading and logging setup.

pub mod config;
pub mod env;
pub mod logging;
