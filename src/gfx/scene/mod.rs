//! # Scene Module
//!
//! The host's object collection as the overlay sees it, plus the query that
//! picks gizmo markers out of it by kind and name suffix.
//!
//! ## Key Components
//!
//! - [`Scene`] - Insertion-ordered object collection
//! - [`SceneObject`] - Kind tag, display name and world matrix
//! - [`find_by_kind_and_suffix`] - Case-insensitive suffix filter
//! - [`GizmoVertex`] - GPU vertex format for gizmo batches
//!
//! ## Usage
//!
//! ```
//! use gizmo_overlay::gfx::scene::{ObjectKind, Scene, SceneObject};
//!
//! let mut scene = Scene::new();
//! scene.add_object(SceneObject::empty("Door_PLANE"));
//! scene.add_object(SceneObject::new(ObjectKind::Mesh, "Wall_plane"));
//!
//! let planes: Vec<_> = scene
//!     .objects_by_kind_and_suffix(ObjectKind::Empty, "_plane")
//!     .collect();
//! assert_eq!(planes.len(), 1);
//! ```

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{ObjectKind, SceneObject};
pub use scene::{find_by_kind_and_suffix, Scene};
pub use vertex::GizmoVertex;
