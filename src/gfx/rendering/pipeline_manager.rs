//! Render pipeline management for gizmo programs
//!
//! Compiles gizmo programs into shader modules and lazily builds one render
//! pipeline per (program, draw state) pair, since wgpu bakes depth, blend and
//! cull state into the pipeline.

use std::{collections::HashMap, sync::Arc};
use wgpu::*;

use super::backend::{CullFace, DrawState, ProgramId};
use crate::error::{ShaderCompileError, ShaderStage};
use crate::gfx::scene::vertex::GizmoVertex;

/// Render target formats shared by every gizmo pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub color_format: TextureFormat,
    pub depth_format: TextureFormat,
    pub multisample: MultisampleState,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Gizmo Pipeline".to_string(),
            color_format: TextureFormat::Bgra8Unorm,
            depth_format: TextureFormat::Depth32Float,
            multisample: MultisampleState::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    /// Sets the color target format (builder pattern)
    ///
    /// # Arguments
    /// * `format` - Format of the viewport's color attachment
    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_format = format;
        self
    }

    /// Sets the depth attachment format (builder pattern)
    ///
    /// # Arguments
    /// * `format` - Format of the viewport's depth attachment
    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = format;
        self
    }
}

struct CompiledProgram {
    label: String,
    vertex: ShaderModule,
    fragment: ShaderModule,
}

/// Manages gizmo programs and their render pipelines with lazy creation
pub struct PipelineManager {
    device: Arc<Device>,
    config: PipelineConfig,
    layout: PipelineLayout,
    programs: HashMap<ProgramId, CompiledProgram>,
    pipelines: HashMap<(ProgramId, DrawState), RenderPipeline>,
    next_program: u64,
}

impl PipelineManager {
    /// Creates a new pipeline manager
    ///
    /// # Arguments
    /// * `device` - Shared wgpu device for creating resources
    /// * `config` - Target formats for all pipelines
    /// * `uniform_layout` - Layout of the per-draw uniform bind group (group 0)
    pub fn new(device: Arc<Device>, config: PipelineConfig, uniform_layout: &BindGroupLayout) -> Self {
        let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some(&format!("{} Layout", config.label)),
            bind_group_layouts: &[uniform_layout],
            push_constant_ranges: &[],
        });

        Self {
            device,
            config,
            layout,
            programs: HashMap::new(),
            pipelines: HashMap::new(),
            next_program: 0,
        }
    }

    /// Compiles both stages of a program
    ///
    /// # Returns
    /// The new program's id, or the first stage that failed validation
    pub fn load_program(
        &mut self,
        label: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramId, ShaderCompileError> {
        let vertex = self.compile_module(label, ShaderStage::Vertex, vertex_source)?;
        let fragment = self.compile_module(label, ShaderStage::Fragment, fragment_source)?;

        self.next_program += 1;
        let id = ProgramId(self.next_program);
        self.programs.insert(
            id,
            CompiledProgram {
                label: label.to_string(),
                vertex,
                fragment,
            },
        );
        Ok(id)
    }

    fn compile_module(
        &self,
        label: &str,
        stage: ShaderStage,
        source: &str,
    ) -> Result<ShaderModule, ShaderCompileError> {
        self.device.push_error_scope(ErrorFilter::Validation);
        let module = self.device.create_shader_module(ShaderModuleDescriptor {
            label: Some(&format!("{} ({})", label, stage)),
            source: ShaderSource::Wgsl(source.into()),
        });

        match pollster::block_on(self.device.pop_error_scope()) {
            Some(error) => Err(ShaderCompileError {
                label: label.to_string(),
                stage,
                message: error.to_string(),
            }),
            None => Ok(module),
        }
    }

    /// Makes sure a pipeline exists for `program` under `state`
    ///
    /// # Returns
    /// False if the program was never loaded
    pub fn prepare_pipeline(&mut self, program: ProgramId, state: DrawState) -> bool {
        if self.pipelines.contains_key(&(program, state)) {
            return true;
        }

        let Some(compiled) = self.programs.get(&program) else {
            return false;
        };

        let pipeline = self.create_pipeline(compiled, state);
        log::debug!(
            "Created gizmo pipeline for '{}' with {:?}",
            compiled.label,
            state
        );
        self.pipelines.insert((program, state), pipeline);
        true
    }

    /// Gets an already prepared pipeline
    pub fn get_pipeline(&self, program: ProgramId, state: DrawState) -> Option<&RenderPipeline> {
        self.pipelines.get(&(program, state))
    }

    /// Creates a render pipeline from a program and draw state
    fn create_pipeline(&self, program: &CompiledProgram, state: DrawState) -> RenderPipeline {
        // The viewport pass always has a depth attachment, so a disabled depth
        // test still needs a matching depth format.
        let depth_stencil = Some(DepthStencilState {
            format: self.config.depth_format,
            depth_write_enabled: state.depth_test,
            depth_compare: if state.depth_test {
                CompareFunction::Less
            } else {
                CompareFunction::Always
            },
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        });

        let blend = state.blend.then_some(BlendState::ALPHA_BLENDING);

        let cull_mode = state.cull_face.map(|face| match face {
            CullFace::Front => Face::Front,
            CullFace::Back => Face::Back,
        });

        self.device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(&format!("{}: {}", self.config.label, program.label)),
                layout: Some(&self.layout),
                vertex: VertexState {
                    module: &program.vertex,
                    entry_point: Some("vs_main"),
                    buffers: &[GizmoVertex::desc()],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(FragmentState {
                    module: &program.fragment,
                    entry_point: Some("fs_main"),
                    targets: &[Some(ColorTargetState {
                        format: self.config.color_format,
                        blend,
                        write_mask: ColorWrites::ALL,
                    })],
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: PrimitiveState {
                    topology: PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil,
                multisample: self.config.multisample,
                multiview: None,
                cache: None,
            })
    }

    /// Returns pipeline manager statistics
    ///
    /// Useful for debugging and performance monitoring.
    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            total_pipelines: self.pipelines.len(),
            loaded_programs: self.programs.len(),
        }
    }
}

/// Statistics about pipeline manager state
#[derive(Debug)]
pub struct PipelineStats {
    pub total_pipelines: usize,
    pub loaded_programs: usize,
}
