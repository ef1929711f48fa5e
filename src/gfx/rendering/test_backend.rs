//! In-memory [`GizmoBackend`] that records every call, for tests.

use super::backend::{DrawState, GizmoBackend, ProgramId, Uniform};
use super::batch::DrawBatch;
use crate::error::{ShaderCompileError, ShaderStage};
use crate::gfx::geometry::GizmoKind;

/// A draw as the GPU would have seen it: current uniforms and state, not
/// the batch's own fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub program: ProgramId,
    pub kind: GizmoKind,
    pub state: DrawState,
    pub color: Option<[f32; 4]>,
    pub normal_shading: Option<f32>,
    pub view_proj: Option<[[f32; 4]; 4]>,
    pub vertices: Vec<[f32; 3]>,
    pub index_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Compile(String),
    SetState(DrawState),
    Bind(ProgramId),
    Uniform(ProgramId, Uniform),
    Draw(RecordedDraw),
}

#[derive(Default)]
pub struct RecordingBackend {
    pub calls: Vec<BackendCall>,
    state: DrawState,
    compile_failure: Option<(ShaderStage, String)>,
    next_program: u64,
    color: Option<[f32; 4]>,
    normal_shading: Option<f32>,
    view_proj: Option<[[f32; 4]; 4]>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose every compile fails at `stage`
    pub fn failing_compile(stage: ShaderStage, message: &str) -> Self {
        Self {
            compile_failure: Some((stage, message.to_string())),
            ..Self::default()
        }
    }

    pub fn draws(&self) -> Vec<&RecordedDraw> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::Draw(draw) => Some(draw),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl GizmoBackend for RecordingBackend {
    fn compile_program(
        &mut self,
        label: &str,
        _vertex_source: &str,
        _fragment_source: &str,
    ) -> Result<ProgramId, ShaderCompileError> {
        if let Some((stage, message)) = &self.compile_failure {
            return Err(ShaderCompileError {
                label: label.to_string(),
                stage: *stage,
                message: message.clone(),
            });
        }
        self.calls.push(BackendCall::Compile(label.to_string()));
        self.next_program += 1;
        Ok(ProgramId(self.next_program))
    }

    fn draw_state(&self) -> DrawState {
        self.state
    }

    fn set_draw_state(&mut self, state: DrawState) {
        self.calls.push(BackendCall::SetState(state));
        self.state = state;
    }

    fn bind_program(&mut self, program: ProgramId) {
        self.calls.push(BackendCall::Bind(program));
    }

    fn set_uniform(&mut self, program: ProgramId, uniform: Uniform) {
        self.calls.push(BackendCall::Uniform(program, uniform));
        match uniform {
            Uniform::ViewProj(matrix) => self.view_proj = Some(matrix),
            Uniform::Color(color) => self.color = Some(color),
            Uniform::NormalShading(value) => self.normal_shading = Some(value),
        }
    }

    fn draw_batch(&mut self, program: ProgramId, batch: &DrawBatch) {
        self.calls.push(BackendCall::Draw(RecordedDraw {
            program,
            kind: batch.kind,
            state: self.state,
            color: self.color,
            normal_shading: self.normal_shading,
            view_proj: self.view_proj,
            vertices: batch.vertices.iter().map(|v| v.position).collect(),
            index_count: batch.index_count(),
        }));
    }
}
