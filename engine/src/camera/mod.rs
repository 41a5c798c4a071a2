//! Camera Module
//!
//! Camera state and ray casting used to resolve the pointer onto the grid.
//! This module is window-system agnostic - it only deals with camera math.

pub mod raycast;

pub use raycast::{CameraProvider, GroundPlane, PerspectiveCamera, Ray, raycast_to_ground};
