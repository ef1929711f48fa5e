//! Gizmo shader program
//!
//! One vertex + fragment program serves both gizmo categories; per-batch
//! `color` and `normal_shading` uniforms select the look.

use super::backend::{GizmoBackend, ProgramId, Uniform};
use super::batch::DrawBatch;
use crate::error::ShaderCompileError;

pub const GIZMO_VERTEX_SOURCE: &str = include_str!("shaders/gizmo_vertex.wgsl");
pub const GIZMO_FRAGMENT_SOURCE: &str = include_str!("shaders/gizmo_fragment.wgsl");

/// A compiled program. Immutable once built; cloning shares the same GPU
/// program.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderProgram {
    id: ProgramId,
    label: String,
}

impl ShaderProgram {
    /// Compiles a program from vertex and fragment sources
    ///
    /// # Arguments
    /// * `backend` - GPU backend that owns the compiled program
    /// * `label` - Debug label, also used in error messages
    /// * `vertex_source` - WGSL source with a `vs_main` entry point
    /// * `fragment_source` - WGSL source with an `fs_main` entry point
    pub fn compile(
        backend: &mut dyn GizmoBackend,
        label: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderCompileError> {
        match backend.compile_program(label, vertex_source, fragment_source) {
            Ok(id) => {
                log::debug!("Compiled shader program '{}' ({:?})", label, id);
                Ok(Self {
                    id,
                    label: label.to_string(),
                })
            }
            Err(e) => {
                log::error!("{}", e);
                Err(e)
            }
        }
    }

    /// Compiles the built-in gizmo program
    pub fn gizmo(backend: &mut dyn GizmoBackend, label: &str) -> Result<Self, ShaderCompileError> {
        Self::compile(backend, label, GIZMO_VERTEX_SOURCE, GIZMO_FRAGMENT_SOURCE)
    }

    pub fn id(&self) -> ProgramId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bind(&self, backend: &mut dyn GizmoBackend) {
        backend.bind_program(self.id);
    }

    pub fn set_uniform(&self, backend: &mut dyn GizmoBackend, uniform: Uniform) {
        backend.set_uniform(self.id, uniform);
    }

    pub fn draw_batch(&self, backend: &mut dyn GizmoBackend, batch: &DrawBatch) {
        backend.draw_batch(self.id, batch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShaderStage;
    use crate::gfx::rendering::test_backend::{BackendCall, RecordingBackend};

    #[test]
    fn test_gizmo_sources_have_entry_points() {
        assert!(GIZMO_VERTEX_SOURCE.contains("fn vs_main"));
        assert!(GIZMO_FRAGMENT_SOURCE.contains("fn fs_main"));
        assert!(GIZMO_FRAGMENT_SOURCE.contains("dpdx"));
        assert!(GIZMO_FRAGMENT_SOURCE.contains("dpdy"));
    }

    #[test]
    fn test_compile_and_bind() {
        let mut backend = RecordingBackend::new();
        let program = ShaderProgram::gizmo(&mut backend, "Gizmo Shader").unwrap();
        assert_eq!(program.label(), "Gizmo Shader");

        program.bind(&mut backend);
        program.set_uniform(&mut backend, Uniform::NormalShading(0.5));

        assert_eq!(
            backend.calls,
            vec![
                BackendCall::Compile("Gizmo Shader".to_string()),
                BackendCall::Bind(program.id()),
                BackendCall::Uniform(program.id(), Uniform::NormalShading(0.5)),
            ]
        );
    }

    #[test]
    fn test_compile_failure_is_reported() {
        let mut backend = RecordingBackend::failing_compile(ShaderStage::Vertex, "expected `;`");
        let err = ShaderProgram::gizmo(&mut backend, "Gizmo Shader").unwrap_err();
        assert_eq!(err.stage, ShaderStage::Vertex);
        assert_eq!(err.label, "Gizmo Shader");
    }
}
