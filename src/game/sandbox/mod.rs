//! Sandbox Module
//!
//! Block placement on the world grid: definitions, the placement store,
//! cursor tracking, the preview, and the controller tying them together.

pub mod block;
pub mod cursor;
pub mod preview;
pub mod store;
pub mod system;

pub use block::{BlockDefinition, BlockRegistry, RegistryError};
pub use cursor::CursorCache;
pub use preview::PreviewState;
pub use store::{PlacedBlock, PlacementStore};
pub use system::{
    DEFAULT_PREVIEW_ALPHA, PlacementError, PlacementGate, PlacementSettings, RemovedBlocks,
    SandboxSystem,
};
