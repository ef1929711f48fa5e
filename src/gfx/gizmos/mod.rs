//! # Gizmo Overlay
//!
//! Plane and snap gizmos drawn on top of a 3D viewport for every empty whose
//! name ends in `_plane` or `_snap` (any case).
//!
//! ## Key Components
//!
//! - [`OverlayLifecycleManager`] - Shows and hides the overlay in a viewport
//! - [`OverlayConfig`] - Marker kind, draw stage and GPU state of the overlay
//!
//! ## Usage
//!
//! ```no_run
//! use gizmo_overlay::gfx::gizmos::{OverlayConfig, OverlayLifecycleManager};
//! use gizmo_overlay::gfx::rendering::GizmoBackend;
//! use gizmo_overlay::gfx::viewport::{AreaKind, ViewportRegistry};
//!
//! fn show(backend: &mut dyn GizmoBackend) -> Result<(), gizmo_overlay::error::OverlayError> {
//!     let mut registry = ViewportRegistry::new();
//!     registry.add_area(AreaKind::View3D);
//!
//!     let mut overlay = OverlayLifecycleManager::new(backend, OverlayConfig::default())?;
//!     overlay.toggle_on(&mut registry)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod lifecycle;

// Re-export main types
pub use config::OverlayConfig;
pub use lifecycle::{OverlayHandle, OverlayLifecycleManager, OverlayState};
