//! Config Module
//!
//! Session configuration for the sandbox grid.

pub mod sandbox_config;

pub use sandbox_config::{ConfigError, DebugSection, DemoBindings, GridSection, SandboxConfig};
