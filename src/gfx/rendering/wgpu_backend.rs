//! wgpu implementation of the gizmo backend
//!
//! Draw calls issued during a frame are recorded with their own buffers,
//! uniforms and draw state, then encoded into one render pass by
//! [`WgpuGizmoBackend::flush`] on top of the viewport's color and depth
//! targets.

use std::{collections::HashMap, sync::Arc};
use wgpu::*;

use super::backend::{DrawState, GizmoBackend, ProgramId, Uniform};
use super::batch::DrawBatch;
use super::pipeline_manager::{PipelineConfig, PipelineManager, PipelineStats};
use crate::error::ShaderCompileError;
use crate::gfx::scene::vertex::GizmoVertex;
use crate::wgpu_utils::{uniform_entry, GeometryBuffer, UniformBuffer};

/// Mirrors the `GizmoUniforms` block in the gizmo shaders (96 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GizmoUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub normal_shading: f32,
    _padding: [f32; 3],
}

impl Default for GizmoUniforms {
    fn default() -> Self {
        Self {
            view_proj: cgmath::Matrix4::from_scale(1.0).into(),
            color: [1.0; 4],
            normal_shading: 0.0,
            _padding: [0.0; 3],
        }
    }
}

impl GizmoUniforms {
    pub fn apply(&mut self, uniform: Uniform) {
        match uniform {
            Uniform::ViewProj(matrix) => self.view_proj = matrix,
            Uniform::Color(color) => self.color = color,
            Uniform::NormalShading(value) => self.normal_shading = value,
        }
    }
}

/// Latest uniform values per program
///
/// Each draw takes a copy, so a later `set_uniform` never reaches a draw
/// that was already recorded.
#[derive(Debug, Default)]
struct UniformTable {
    values: HashMap<ProgramId, GizmoUniforms>,
}

impl UniformTable {
    fn set(&mut self, program: ProgramId, uniform: Uniform) {
        self.values.entry(program).or_default().apply(uniform);
    }

    fn snapshot(&self, program: ProgramId) -> GizmoUniforms {
        self.values.get(&program).copied().unwrap_or_default()
    }
}

/// Batches with no vertices or no triangles record nothing.
fn has_geometry(batch: &DrawBatch) -> bool {
    !batch.vertices.is_empty() && !batch.triangles.is_empty()
}

struct PendingDraw {
    program: ProgramId,
    state: DrawState,
    vertices: GeometryBuffer<GizmoVertex>,
    indices: GeometryBuffer<u32>,
    // Keeps the uniform buffer alive until the pass is encoded.
    _uniforms: UniformBuffer<GizmoUniforms>,
    bind_group: BindGroup,
}

/// [`GizmoBackend`] on a wgpu device
pub struct WgpuGizmoBackend {
    device: Arc<Device>,
    pipelines: PipelineManager,
    uniform_layout: BindGroupLayout,
    state: DrawState,
    bound: Option<ProgramId>,
    uniforms: UniformTable,
    pending: Vec<PendingDraw>,
}

impl WgpuGizmoBackend {
    pub fn new(device: Arc<Device>, config: PipelineConfig) -> Self {
        let uniform_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Gizmo Uniform Layout"),
            entries: &[uniform_entry(0)],
        });
        let pipelines = PipelineManager::new(device.clone(), config, &uniform_layout);

        Self {
            device,
            pipelines,
            uniform_layout,
            state: DrawState::default(),
            bound: None,
            uniforms: UniformTable::default(),
            pending: Vec::new(),
        }
    }

    /// Number of draws waiting for [`flush`](Self::flush)
    pub fn pending_draws(&self) -> usize {
        self.pending.len()
    }

    pub fn pipeline_stats(&self) -> PipelineStats {
        self.pipelines.get_stats()
    }

    /// Encode all recorded draws into one pass that loads (keeps) the
    /// existing color and depth contents.
    pub fn flush(&mut self, encoder: &mut CommandEncoder, color_view: &TextureView, depth_view: &TextureView) {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Gizmo Overlay Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Load, // Draw over the viewport
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(Operations {
                    load: LoadOp::Load, // Test against scene depth
                    store: StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        for draw in &pending {
            let Some(pipeline) = self.pipelines.get_pipeline(draw.program, draw.state) else {
                continue;
            };
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, &draw.bind_group, &[]);
            render_pass.set_vertex_buffer(0, draw.vertices.slice());
            render_pass.set_index_buffer(draw.indices.slice(), IndexFormat::Uint32);
            render_pass.draw_indexed(0..draw.indices.len() as u32, 0, 0..1);
        }
    }
}

impl GizmoBackend for WgpuGizmoBackend {
    fn compile_program(
        &mut self,
        label: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramId, ShaderCompileError> {
        self.pipelines.load_program(label, vertex_source, fragment_source)
    }

    fn draw_state(&self) -> DrawState {
        self.state
    }

    fn set_draw_state(&mut self, state: DrawState) {
        self.state = state;
    }

    fn bind_program(&mut self, program: ProgramId) {
        self.bound = Some(program);
    }

    fn set_uniform(&mut self, program: ProgramId, uniform: Uniform) {
        self.uniforms.set(program, uniform);
    }

    fn draw_batch(&mut self, program: ProgramId, batch: &DrawBatch) {
        if !has_geometry(batch) {
            return;
        }
        if self.bound != Some(program) {
            log::warn!("Drawing with unbound program {:?}", program);
        }
        if !self.pipelines.prepare_pipeline(program, self.state) {
            log::warn!("Skipping gizmo draw for unknown program {:?}", program);
            return;
        }

        let uniforms = UniformBuffer::new_with_data(&self.device, &self.uniforms.snapshot(program));
        let bind_group = self.device.create_bind_group(&BindGroupDescriptor {
            label: Some("Gizmo Uniform Bind Group"),
            layout: &self.uniform_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: uniforms.binding_resource(),
            }],
        });

        self.pending.push(PendingDraw {
            program,
            state: self.state,
            vertices: GeometryBuffer::new_with_data(&self.device, &batch.vertices, BufferUsages::VERTEX),
            indices: GeometryBuffer::new_with_data(&self.device, batch.indices(), BufferUsages::INDEX),
            _uniforms: uniforms,
            bind_group,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::GizmoKind;
    use crate::gfx::rendering::shader::{GIZMO_FRAGMENT_SOURCE, GIZMO_VERTEX_SOURCE};
    use crate::gfx::scene::SceneObject;

    #[test]
    fn test_uniform_block_layout() {
        // mat4 (64) + vec4 (16) + f32, rounded up to 16-byte struct alignment
        assert_eq!(std::mem::size_of::<GizmoUniforms>(), 96);
    }

    #[test]
    fn test_uniforms_apply() {
        let mut uniforms = GizmoUniforms::default();
        uniforms.apply(Uniform::Color([0.7, 0.9, 0.1, 1.0]));
        uniforms.apply(Uniform::NormalShading(0.5));
        assert_eq!(uniforms.color, [0.7, 0.9, 0.1, 1.0]);
        assert_eq!(uniforms.normal_shading, 0.5);
        assert_eq!(uniforms.view_proj[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_snapshot_is_taken_per_draw() {
        let plane = ProgramId(1);
        let other = ProgramId(2);
        let mut table = UniformTable::default();

        table.set(plane, Uniform::ViewProj([[2.0, 0.0, 0.0, 0.0]; 4]));
        table.set(plane, Uniform::Color([0.3, 0.9, 1.0, 0.5]));
        table.set(plane, Uniform::NormalShading(0.1));
        let first = table.snapshot(plane);

        table.set(plane, Uniform::Color([0.9, 0.1, 1.0, 0.6]));
        table.set(plane, Uniform::NormalShading(0.0));
        let second = table.snapshot(plane);

        // The first draw keeps the values it was recorded with
        assert_eq!(first.color, [0.3, 0.9, 1.0, 0.5]);
        assert_eq!(first.normal_shading, 0.1);
        assert_eq!(second.color, [0.9, 0.1, 1.0, 0.6]);
        assert_eq!(second.normal_shading, 0.0);
        // View-projection carries over between draws
        assert_eq!(second.view_proj, first.view_proj);

        // Programs do not share uniforms
        assert_eq!(table.snapshot(other), GizmoUniforms::default());
    }

    #[test]
    fn test_empty_batches_record_nothing() {
        let object = SceneObject::empty("door_plane");
        let batch = DrawBatch::for_object(GizmoKind::Plane, &object);
        assert!(has_geometry(&batch));

        let no_vertices = DrawBatch {
            vertices: Vec::new(),
            ..batch.clone()
        };
        assert!(!has_geometry(&no_vertices));

        let no_triangles = DrawBatch {
            triangles: &[],
            ..batch
        };
        assert!(!has_geometry(&no_triangles));
    }

    fn validate_wgsl(source: &str) {
        let module = match naga::front::wgsl::parse_str(source) {
            Ok(module) => module,
            Err(e) => panic!("{}", e.emit_to_string(source)),
        };
        naga::valid::Validator::new(naga::valid::ValidationFlags::all(), naga::valid::Capabilities::all())
            .validate(&module)
            .unwrap();
    }

    #[test]
    fn test_gizmo_shaders_validate() {
        validate_wgsl(GIZMO_VERTEX_SOURCE);
        validate_wgsl(GIZMO_FRAGMENT_SOURCE);
    }
}
