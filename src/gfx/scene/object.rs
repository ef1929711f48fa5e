//! Scene objects as seen by the overlay: a kind tag, a display name and a
//! world matrix. The overlay only ever reads them.

use cgmath::{Deg, Matrix4, Quaternion, Rotation3, SquareMatrix, Vector3};

/// Kind tag of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Transform-only marker with no geometry of its own
    Empty,
    Mesh,
    Curve,
    Camera,
    Light,
}

/// A named object placed in the scene by a world transform
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub kind: ObjectKind,
    pub name: String,
    pub world_matrix: Matrix4<f32>, // cgmath 4x4 transformation matrix
}

impl SceneObject {
    /// Create a new object with identity transformation
    pub fn new(kind: ObjectKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            world_matrix: Matrix4::identity(),
        }
    }

    /// Shorthand for a transform-only marker
    pub fn empty(name: &str) -> Self {
        Self::new(ObjectKind::Empty, name)
    }

    /// Replace the world matrix (builder pattern)
    pub fn with_world_matrix(mut self, world_matrix: Matrix4<f32>) -> Self {
        self.world_matrix = world_matrix;
        self
    }

    /// Set translation, rotation and non-uniform scale (builder pattern)
    pub fn with_trs(
        mut self,
        translation: Vector3<f32>,
        rotation: Quaternion<f32>,
        scale: Vector3<f32>,
    ) -> Self {
        self.set_transform_trs(translation, rotation, scale);
        self
    }

    /// Create a complete transform from translation, rotation, and scale
    pub fn set_transform_trs(
        &mut self,
        translation: Vector3<f32>,
        rotation: Quaternion<f32>,
        scale: Vector3<f32>,
    ) {
        let t = Matrix4::from_translation(translation);
        let r = Matrix4::from(rotation);
        let s = Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
        self.world_matrix = t * r * s; // Order matters: T * R * S
    }

    /// Set absolute translation, dropping rotation and scale
    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.world_matrix = Matrix4::from_translation(translation);
    }

    /// Apply rotation around Z axis
    pub fn rotate_z(&mut self, angle: Deg<f32>) {
        self.world_matrix = self.world_matrix * Matrix4::from(Quaternion::from_angle_z(angle));
    }
}
