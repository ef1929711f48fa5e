//! GPU backend seam for gizmo drawing
//!
//! The frame renderer and shader program talk to the GPU only through
//! [`GizmoBackend`]. The wgpu implementation lives in
//! [`wgpu_backend`](super::wgpu_backend).

use std::ops::{Deref, DerefMut};

use super::batch::DrawBatch;
use crate::error::ShaderCompileError;

/// Handle to a compiled gizmo program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub(crate) u64);

/// Which triangle faces get discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullFace {
    Front,
    Back,
}

/// Fixed-function state that applies to every draw until changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawState {
    pub depth_test: bool,
    pub blend: bool,
    /// `None` disables face culling
    pub cull_face: Option<CullFace>,
}

impl DrawState {
    /// Everything off: the state a fresh backend starts in.
    pub const DISABLED: DrawState = DrawState {
        depth_test: false,
        blend: false,
        cull_face: None,
    };

    /// Depth-tested, alpha-blended, front faces culled so gizmos show their
    /// inside.
    pub const GIZMO: DrawState = DrawState {
        depth_test: true,
        blend: true,
        cull_face: Some(CullFace::Front),
    };
}

impl Default for DrawState {
    fn default() -> Self {
        Self::DISABLED
    }
}

/// Per-draw shader inputs, addressed by their WGSL field name
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    /// Column-major view-projection matrix supplied by the host camera
    ViewProj([[f32; 4]; 4]),
    Color([f32; 4]),
    NormalShading(f32),
}

impl Uniform {
    /// Field name in the `GizmoUniforms` block
    pub fn name(&self) -> &'static str {
        match self {
            Uniform::ViewProj(_) => "view_proj",
            Uniform::Color(_) => "color",
            Uniform::NormalShading(_) => "normal_shading",
        }
    }
}

/// Everything the overlay needs from a GPU.
///
/// Calls are made from the host's draw thread only, inside one draw
/// callback at a time.
pub trait GizmoBackend {
    /// Compile a vertex + fragment program
    fn compile_program(
        &mut self,
        label: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramId, ShaderCompileError>;

    fn draw_state(&self) -> DrawState;

    fn set_draw_state(&mut self, state: DrawState);

    /// Make `program` current for following uniform writes and draws
    fn bind_program(&mut self, program: ProgramId);

    fn set_uniform(&mut self, program: ProgramId, uniform: Uniform);

    /// Draw one indexed triangle batch with the current state and uniforms
    fn draw_batch(&mut self, program: ProgramId, batch: &DrawBatch);
}

/// Scoped draw state: applies `state` on acquire and puts the previous state
/// back when dropped, whichever way the scope is left.
pub struct DrawStateGuard<'a> {
    backend: &'a mut dyn GizmoBackend,
    previous: DrawState,
}

impl<'a> DrawStateGuard<'a> {
    pub fn acquire(backend: &'a mut dyn GizmoBackend, state: DrawState) -> Self {
        let previous = backend.draw_state();
        backend.set_draw_state(state);
        Self { backend, previous }
    }

    /// State that will be restored on drop
    pub fn previous(&self) -> DrawState {
        self.previous
    }
}

impl<'a> Deref for DrawStateGuard<'a> {
    type Target = dyn GizmoBackend + 'a;

    fn deref(&self) -> &Self::Target {
        self.backend
    }
}

impl<'a> DerefMut for DrawStateGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.backend
    }
}

impl Drop for DrawStateGuard<'_> {
    fn drop(&mut self) {
        self.backend.set_draw_state(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::rendering::test_backend::RecordingBackend;

    #[test]
    fn test_guard_restores_previous_state() {
        let mut backend = RecordingBackend::new();
        let outer = DrawState {
            depth_test: true,
            blend: false,
            cull_face: Some(CullFace::Back),
        };
        backend.set_draw_state(outer);

        {
            let guard = DrawStateGuard::acquire(&mut backend, DrawState::GIZMO);
            assert_eq!(guard.previous(), outer);
            assert_eq!(guard.draw_state(), DrawState::GIZMO);
        }

        assert_eq!(backend.draw_state(), outer);
    }

    #[test]
    fn test_guard_restores_on_early_return() {
        fn bail_out(backend: &mut dyn GizmoBackend) -> Option<()> {
            let _guard = DrawStateGuard::acquire(backend, DrawState::GIZMO);
            None::<()>?;
            Some(())
        }

        let mut backend = RecordingBackend::new();
        assert!(bail_out(&mut backend).is_none());
        assert_eq!(backend.draw_state(), DrawState::DISABLED);
    }

    #[test]
    fn test_uniform_names_match_shader_block() {
        let vertex = crate::gfx::rendering::shader::GIZMO_VERTEX_SOURCE;
        let fragment = crate::gfx::rendering::shader::GIZMO_FRAGMENT_SOURCE;
        for uniform in [
            Uniform::ViewProj([[0.0; 4]; 4]),
            Uniform::Color([0.0; 4]),
            Uniform::NormalShading(0.0),
        ] {
            let field = format!("{}:", uniform.name());
            assert!(vertex.contains(&field), "vertex source lacks {}", field);
            assert!(fragment.contains(&field), "fragment source lacks {}", field);
        }
    }
}
