//! Game Module
//!
//! Sandbox systems that build on top of the engine: block placement,
//! session configuration and the click-to-build demo driver.

pub mod config;
pub mod demo;
pub mod sandbox;

pub use config::{ConfigError, SandboxConfig};
pub use demo::{ActionOutcome, DemoMode, SandboxDemo, StepReport};
pub use sandbox::{
    BlockDefinition, BlockRegistry, PlacedBlock, PlacementError, PlacementGate,
    PlacementSettings, PlacementStore, SandboxSystem,
};
