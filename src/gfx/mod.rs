//! # Graphics Module
//!
//! Everything the gizmo overlay draws with and draws from.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - Gizmo shape tables and world transforms
//! - **Scene** ([`scene`]) - Host scene objects and the marker query
//! - **Rendering** ([`rendering`]) - Shader program, frame renderer and GPU backends
//! - **Viewport** ([`viewport`]) - Screen areas and per-stage draw handlers
//! - **Gizmos** ([`gizmos`]) - Showing and hiding the overlay
//! - **Camera** ([`camera`]) - Orbit camera for the viewer
//!
//! ## Usage
//!
//! ```no_run
//! use gizmo_overlay::gfx::scene::{Scene, SceneObject};
//!
//! let mut scene = Scene::new();
//! scene.add_object(SceneObject::empty("Floor_plane"));
//! scene.add_object(SceneObject::empty("Hook_snap"));
//! assert_eq!(scene.plane_items().count(), 1);
//! ```

pub mod camera;
pub mod geometry;
pub mod gizmos;
pub mod rendering;
pub mod scene;
pub mod viewport;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
