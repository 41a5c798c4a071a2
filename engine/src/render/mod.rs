//! Render Module
//!
//! Renderer-facing side of the sandbox: the factory interface placed blocks
//! and previews are created through, an in-memory scene implementing it, and
//! instance records for batched drawing.

pub mod instancing;
pub mod renderable;
pub mod scene;

pub use instancing::{BlockInstance, INSTANCE_FLAG_DESTRUCTIBLE, instance_bytes};
pub use renderable::{RenderTemplate, RenderableFactory, RenderableHandle};
pub use scene::{SceneObject, SceneRenderables};
