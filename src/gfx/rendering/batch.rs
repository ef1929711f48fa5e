//! Per-frame draw batches built from matched scene objects.

use crate::gfx::geometry::{transform, GizmoKind};
use crate::gfx::scene::{GizmoVertex, SceneObject};

/// One object's gizmo, placed in world space and tagged with its shading.
///
/// Batches live for a single frame and are never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    pub kind: GizmoKind,
    pub vertices: Vec<GizmoVertex>,
    pub triangles: &'static [[u32; 3]],
    pub color: [f32; 4],
    pub normal_shading: f32,
}

impl DrawBatch {
    /// Place the shape for `kind` using the object's world matrix
    pub fn for_object(kind: GizmoKind, object: &SceneObject) -> Self {
        let style = kind.style();
        let (vertices, triangles) = transform(style.shape, &object.world_matrix);

        Self {
            kind,
            vertices: vertices.into_iter().map(GizmoVertex::from).collect(),
            triangles,
            color: style.color,
            normal_shading: style.normal_shading,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> u32 {
        (self.triangles.len() * 3) as u32
    }

    /// Flat index list, three per triangle
    pub fn indices(&self) -> &[u32] {
        self.triangles.as_flattened()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Matrix4, Vector3};

    #[test]
    fn test_batch_takes_style_and_transform() {
        let object = SceneObject::empty("door_plane")
            .with_world_matrix(Matrix4::from_translation(Vector3::new(0.0, 0.0, 2.0)));
        let batch = DrawBatch::for_object(GizmoKind::Plane, &object);

        assert_eq!(batch.color, [0.3, 0.9, 1.0, 0.5]);
        assert_eq!(batch.normal_shading, 0.1);
        assert_eq!(batch.vertex_count(), 4);
        assert_eq!(batch.vertices[1].position, [-0.5, 1.0, 2.0]);
        assert_eq!(batch.index_count(), 6);
        assert_eq!(batch.indices(), &[0, 1, 2, 0, 2, 3]);
    }
}
