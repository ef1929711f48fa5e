//! Per-frame gizmo rendering
//!
//! Each call re-queries the scene, re-transforms every matched marker and
//! draws it. Nothing is carried over between frames.

use cgmath::Matrix4;

use super::backend::{DrawState, DrawStateGuard, GizmoBackend, Uniform};
use super::batch::DrawBatch;
use super::shader::ShaderProgram;
use crate::gfx::geometry::GizmoKind;
use crate::gfx::scene::{find_by_kind_and_suffix, ObjectKind, Scene};

/// What the host hands to a draw callback for one redraw
pub struct FrameContext<'a> {
    pub scene: &'a Scene,
    pub backend: &'a mut dyn GizmoBackend,
    /// View-projection of the viewport being drawn
    pub view_proj: Matrix4<f32>,
}

impl<'a> FrameContext<'a> {
    pub fn new(scene: &'a Scene, backend: &'a mut dyn GizmoBackend, view_proj: Matrix4<f32>) -> Self {
        Self {
            scene,
            backend,
            view_proj,
        }
    }
}

/// Draws plane and snap gizmos for every matching marker in the scene
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    program: ShaderProgram,
    marker_kind: ObjectKind,
    draw_state: DrawState,
}

impl FrameRenderer {
    pub fn new(program: ShaderProgram, marker_kind: ObjectKind, draw_state: DrawState) -> Self {
        Self {
            program,
            marker_kind,
            draw_state,
        }
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    /// One batch per matched marker: all planes first, then all snaps.
    pub fn build_batches(&self, scene: &Scene) -> Vec<DrawBatch> {
        GizmoKind::ALL
            .iter()
            .flat_map(|&kind| {
                find_by_kind_and_suffix(&scene.objects, self.marker_kind, kind.style().suffix)
                    .map(move |object| DrawBatch::for_object(kind, object))
            })
            .collect()
    }

    /// Render one frame of gizmos into the current viewport.
    ///
    /// Runs to completion on the caller's thread. The previous draw state is
    /// restored before returning.
    pub fn render_frame(&self, ctx: &mut FrameContext<'_>) {
        let mut gpu = DrawStateGuard::acquire(&mut *ctx.backend, self.draw_state);

        self.program.bind(&mut *gpu);
        self.program
            .set_uniform(&mut *gpu, Uniform::ViewProj(ctx.view_proj.into()));

        let batches = self.build_batches(ctx.scene);
        log::trace!("Drawing {} gizmo batches", batches.len());

        for batch in &batches {
            self.program.set_uniform(&mut *gpu, Uniform::Color(batch.color));
            self.program
                .set_uniform(&mut *gpu, Uniform::NormalShading(batch.normal_shading));
            self.program.draw_batch(&mut *gpu, batch);
        }
    }
}
