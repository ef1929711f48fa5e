// src/lib.rs
//! Gizmo Overlay
//!
//! Draws plane and snap gizmos over a 3D viewport for scene empties whose
//! names end in `_plane` or `_snap`, built on wgpu and winit.

pub mod app;
pub mod error;
pub mod gfx;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::{GizmoViewerApp, ViewerConfig};
pub use error::{OverlayError, OverlayResult, ShaderCompileError};
