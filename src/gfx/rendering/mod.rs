// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Gizmo batches, the shader program, the GPU backend seam with its wgpu
//! implementation, and the window's render engine.

pub mod backend;
pub mod batch;
pub mod frame_renderer;
pub mod pipeline_manager;
pub mod render_engine;
pub mod shader;
pub mod wgpu_backend;

#[cfg(test)]
pub(crate) mod test_backend;

// Re-export main types
pub use backend::{CullFace, DrawState, DrawStateGuard, GizmoBackend, ProgramId, Uniform};
pub use batch::DrawBatch;
pub use frame_renderer::{FrameContext, FrameRenderer};
pub use pipeline_manager::{PipelineConfig, PipelineManager, PipelineStats};
pub use render_engine::RenderEngine;
pub use shader::ShaderProgram;
pub use wgpu_backend::{GizmoUniforms, WgpuGizmoBackend};
