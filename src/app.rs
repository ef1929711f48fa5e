//! Viewer application hosting the gizmo overlay
//!
//! One window with a single 3D viewport, an orbit camera and a scene of
//! marker empties. The toggle key shows and hides the gizmos, Escape quits.

use cgmath::Vector3;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::gfx::{
    camera::{CameraController, OrbitCamera},
    gizmos::{OverlayConfig, OverlayLifecycleManager},
    rendering::RenderEngine,
    scene::Scene,
    viewport::{AreaKind, ViewportHost, ViewportId, ViewportRegistry},
};

/// Window and input settings of the viewer
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: wgpu::Color,
    /// Key that shows and hides the gizmos
    pub toggle_key: KeyCode,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Gizmo Viewer".to_string(),
            width: 1200,
            height: 800,
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.12,
                a: 1.0,
            },
            toggle_key: KeyCode::KeyG,
        }
    }
}

impl ViewerConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_toggle_key(mut self, key: KeyCode) -> Self {
        self.toggle_key = key;
        self
    }
}

pub struct GizmoViewerApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: ViewerConfig,
    overlay_config: OverlayConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    overlay: Option<OverlayLifecycleManager>,
    registry: ViewportRegistry,
    viewport: ViewportId,
    scene: Scene,
    camera: OrbitCamera,
    controller: CameraController,
}

impl GizmoViewerApp {
    pub fn new(config: ViewerConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new()?;

        let aspect = config.width as f32 / config.height.max(1) as f32;
        let mut camera = OrbitCamera::new(8.0, 0.4, 0.8, Vector3::new(0.0, 0.0, 0.0), aspect);
        camera.bounds.min_distance = Some(1.1);
        let controller = CameraController::new(0.005, 0.1);

        let mut registry = ViewportRegistry::new();
        let viewport = registry.add_area(AreaKind::View3D);

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                overlay_config: OverlayConfig::default(),
                window: None,
                render_engine: None,
                overlay: None,
                registry,
                viewport,
                scene: Scene::new(),
                camera,
                controller,
            },
        })
    }

    /// Replaces the overlay settings (builder pattern)
    pub fn with_overlay_config(mut self, config: OverlayConfig) -> Self {
        self.app_state.overlay_config = config;
        self
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.app_state.scene
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        let Some(event_loop) = self.event_loop.take() else {
            anyhow::bail!("Event loop already consumed");
        };
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

impl AppState {
    fn toggle_overlay(&mut self) {
        let Some(overlay) = self.overlay.as_mut() else {
            log::warn!("Gizmo overlay unavailable");
            return;
        };
        // A missing viewport has already been logged.
        if overlay.toggle(&mut self.registry).is_ok() {
            self.update_title();
        }
    }

    fn update_title(&self) {
        if let (Some(window), Some(overlay)) = (self.window.as_ref(), self.overlay.as_ref()) {
            window.set_title(&format!(
                "{} [{:?}: {}]",
                self.config.title,
                self.config.toggle_key,
                overlay.status_label()
            ));
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.teardown(&mut self.registry);
        }
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if let Some(window) = self.window.as_ref() {
            self.controller.process_keyed_events(event, window, &mut self.camera);
        }

        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => self.shutdown(event_loop),
            PhysicalKey::Code(key) if key == self.config.toggle_key => self.toggle_overlay(),
            _ => (),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.config.width, self.config.height));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        self.camera.resize_projection(width, height);

        let clear_color = self.config.clear_color;
        let mut renderer = match pollster::block_on(RenderEngine::new(window.clone(), width, height, clear_color)) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("{:#}", e);
                event_loop.exit();
                return;
            }
        };

        // Compile failures are logged by the shader program; the viewer keeps
        // running without gizmos.
        self.overlay =
            OverlayLifecycleManager::new(renderer.backend_mut(), self.overlay_config.clone()).ok();
        self.render_engine = Some(renderer);

        log::info!(
            "{} markers in scene, press {:?} to toggle gizmos",
            self.scene.plane_items().count() + self.scene.snap_items().count(),
            self.config.toggle_key
        );
        self.update_title();
        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.camera.resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                self.registry.tag_redraw(self.viewport);
            }
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::RedrawRequested => {
                let Some(render_engine) = self.render_engine.as_mut() else {
                    return;
                };
                if let Err(e) = render_engine.render_frame(
                    &self.scene,
                    &mut self.registry,
                    self.viewport,
                    self.camera.view_proj(),
                ) {
                    log::error!("{:#}", e);
                }
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        self.controller.process_events(&event, window, &mut self.camera);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.registry.take_redraw(self.viewport) {
            return;
        }
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
