//! WGPU-based render engine for the gizmo viewer
//!
//! Owns the window surface, the viewport's depth buffer and the
//! [`WgpuGizmoBackend`]. Each frame clears the viewport, runs the viewport's
//! draw handlers stage by stage and encodes what they recorded on top.

use anyhow::Context;
use cgmath::Matrix4;
use std::sync::Arc;
use wgpu::TextureFormat;

use super::frame_renderer::FrameContext;
use super::pipeline_manager::PipelineConfig;
use super::wgpu_backend::WgpuGizmoBackend;
use crate::gfx::scene::Scene;
use crate::gfx::viewport::{DrawStage, ViewportId, ViewportRegistry};

const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// Surface, device and gizmo backend of one window
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    format: TextureFormat,
    clear_color: wgpu::Color,
    backend: WgpuGizmoBackend,
}

impl RenderEngine {
    /// Creates a render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `clear_color` - Viewport background
    ///
    /// # Errors
    /// Fails if no surface, adapter or device can be created.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        clear_color: wgpu::Color,
    ) -> anyhow::Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to request adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to request a device")?;
        let device = Arc::new(device);

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .context("Surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, &config);
        let backend = WgpuGizmoBackend::new(
            device.clone(),
            PipelineConfig::default()
                .with_color_format(format)
                .with_depth_format(DEPTH_FORMAT),
        );

        log::info!("Render engine ready ({:?}, {}x{})", format, config.width, config.height);

        Ok(Self {
            surface,
            device,
            queue: Arc::new(queue),
            config,
            depth_view,
            format,
            clear_color,
            backend,
        })
    }

    /// Renders one frame of `viewport` and presents it
    ///
    /// Draw handlers of every stage run in order (pre-view, post-view,
    /// post-pixel) against the viewport's cleared color and depth targets.
    ///
    /// # Returns
    /// Number of draw handlers that ran
    pub fn render_frame(
        &mut self,
        scene: &Scene,
        registry: &mut ViewportRegistry,
        viewport: ViewportId,
        view_proj: Matrix4<f32>,
    ) -> anyhow::Result<usize> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(0);
            }
            Err(e) => return Err(e).context("Failed to get surface texture"),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // PASS 1: Clear the viewport
        {
            let _clear_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Viewport Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
        }

        // PASS 2: Draw handlers, recorded into the backend
        let mut ran = 0;
        {
            let mut ctx = FrameContext::new(scene, &mut self.backend, view_proj);
            for stage in [DrawStage::PreView, DrawStage::PostView, DrawStage::PostPixel] {
                ran += registry.draw(viewport, stage, &mut ctx);
            }
        }
        log::trace!(
            "{} draw handlers recorded {} draws",
            ran,
            self.backend.pending_draws()
        );

        // PASS 3: Overlay
        self.backend
            .flush(&mut encoder, &surface_texture_view, &self.depth_view);

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(ran)
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, &self.config);
    }

    /// Returns current surface dimensions
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn surface_format(&self) -> TextureFormat {
        self.format
    }

    /// Gizmo backend, for compiling programs before the first frame
    pub fn backend_mut(&mut self) -> &mut WgpuGizmoBackend {
        &mut self.backend
    }
}

fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Viewport Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
