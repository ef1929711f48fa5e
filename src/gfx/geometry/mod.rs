//! # Gizmo Geometry
//!
//! Static shape tables for the gizmo markers and the routine that places them
//! in world space.
//!
//! ## Supported Shapes
//!
//! - **Plane**: flat quad drawn for `*_plane` markers
//! - **Snap**: compound arrow-like solid drawn for `*_snap` markers
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{Matrix4, SquareMatrix};
//! use gizmo_overlay::gfx::geometry::{transform, GizmoKind};
//!
//! let style = GizmoKind::Snap.style();
//! let (vertices, triangles) = transform(style.shape, &Matrix4::identity());
//! assert_eq!(vertices.len(), style.shape.vertex_count());
//! assert_eq!(triangles.len(), 34);
//! ```

pub mod shapes;

pub use shapes::{PLANE_SHAPE, SNAP_SHAPE};

use cgmath::{ElementWise, InnerSpace, Matrix3, Matrix4, SquareMatrix, Vector3, Zero};

/// Immutable local-space geometry of a gizmo
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    /// Table name, used for labels and logging
    pub name: &'static str,
    /// Vertex positions (x, y, z) in object-local space
    pub vertices: &'static [[f32; 3]],
    /// Triangle index triples into `vertices`; winding drives the shading normal
    pub triangles: &'static [[u32; 3]],
}

impl Shape {
    /// Get the number of vertices in this shape
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this shape
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Gizmo categories, selected by the marker name suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GizmoKind {
    Plane,
    Snap,
}

/// Everything needed to turn a matched marker into a draw batch
#[derive(Debug)]
pub struct GizmoStyle {
    /// Case-insensitive name suffix that selects the category
    pub suffix: &'static str,
    pub shape: &'static Shape,
    /// RGBA color passed to the shader
    pub color: [f32; 4],
    /// How strongly face orientation darkens the color, in [0, 1]
    pub normal_shading: f32,
}

static GIZMO_STYLES: [GizmoStyle; 2] = [
    GizmoStyle {
        suffix: "_plane",
        shape: &PLANE_SHAPE,
        color: [0.3, 0.9, 1.0, 0.5],
        normal_shading: 0.1,
    },
    GizmoStyle {
        suffix: "_snap",
        shape: &SNAP_SHAPE,
        color: [0.7, 0.9, 0.1, 1.0],
        normal_shading: 0.5,
    },
];

impl GizmoKind {
    /// All categories in paint order
    pub const ALL: [GizmoKind; 2] = [GizmoKind::Plane, GizmoKind::Snap];

    pub fn style(self) -> &'static GizmoStyle {
        &GIZMO_STYLES[self as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            GizmoKind::Plane => "Plane",
            GizmoKind::Snap => "Snap",
        }
    }
}

/// Translation, scale and pure rotation pulled out of an affine world matrix
#[derive(Debug, Clone, Copy)]
pub struct Decomposed {
    pub translation: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub rotation: Matrix3<f32>,
}

/// Split a world matrix into translation, non-uniform scale and rotation.
///
/// Scale is the length of each basis column. A mirrored basis (negative
/// determinant) carries its sign on the X scale so `rotation` stays a proper
/// rotation. Shear is not supported.
pub fn decompose(world: &Matrix4<f32>) -> Decomposed {
    let translation = world.w.truncate();
    let x_axis = world.x.truncate();
    let y_axis = world.y.truncate();
    let z_axis = world.z.truncate();

    let mut scale = Vector3::new(x_axis.magnitude(), y_axis.magnitude(), z_axis.magnitude());
    if Matrix3::from_cols(x_axis, y_axis, z_axis).determinant() < 0.0 {
        scale.x = -scale.x;
    }

    let rotation = Matrix3::from_cols(
        unit_axis(x_axis, scale.x),
        unit_axis(y_axis, scale.y),
        unit_axis(z_axis, scale.z),
    );

    Decomposed {
        translation,
        scale,
        rotation,
    }
}

// Collapsed axes map to zero.
fn unit_axis(axis: Vector3<f32>, length: f32) -> Vector3<f32> {
    if length.abs() > f32::EPSILON {
        axis / length
    } else {
        Vector3::zero()
    }
}

/// Map a shape into world space: `v' = R * (v ⊙ S) + T`.
///
/// Scale is applied along the local axes before rotating, so non-uniform
/// scale is not skewed by the object's rotation. Triangles are returned
/// unchanged.
pub fn transform(shape: &Shape, world: &Matrix4<f32>) -> (Vec<[f32; 3]>, &'static [[u32; 3]]) {
    let Decomposed {
        translation,
        scale,
        rotation,
    } = decompose(world);

    let vertices = shape
        .vertices
        .iter()
        .map(|&local| {
            let scaled = Vector3::from(local).mul_element_wise(scale);
            let placed: [f32; 3] = (rotation * scaled + translation).into();
            placed
        })
        .collect();

    (vertices, shape.triangles)
}
