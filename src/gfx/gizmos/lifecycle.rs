//! # Overlay lifecycle
//!
//! Attaches the gizmo [`FrameRenderer`] to a viewport's draw pipeline and
//! detaches it again. The manager is an ordinary value owned by whoever
//! drives the show/hide trigger; at most one attachment exists per manager.
//!
//! ```text
//!            toggle_on (viewport found)
//!   Inactive ──────────────────────────▶ Active
//!      ▲                                   │
//!      └───────── toggle_off / teardown ───┘
//! ```

use super::config::OverlayConfig;
use crate::error::{OverlayError, OverlayResult};
use crate::gfx::geometry::GizmoKind;
use crate::gfx::rendering::{FrameContext, FrameRenderer, GizmoBackend, ShaderProgram};
use crate::gfx::viewport::{DrawHandlerId, ViewportHost, ViewportId};

/// The live attachment of the overlay to one viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayHandle {
    pub viewport: ViewportId,
    pub handler: DrawHandlerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Inactive,
    Active,
}

/// Shows and hides the gizmo overlay
pub struct OverlayLifecycleManager {
    renderer: FrameRenderer,
    config: OverlayConfig,
    handle: Option<OverlayHandle>,
}

impl OverlayLifecycleManager {
    /// Compiles the gizmo program and returns an inactive manager
    ///
    /// # Errors
    /// [`OverlayError::ShaderCompile`] if either shader stage fails. No
    /// manager exists without a valid program.
    pub fn new(backend: &mut dyn GizmoBackend, config: OverlayConfig) -> OverlayResult<Self> {
        let program = ShaderProgram::gizmo(backend, &config.shader_label)?;
        Ok(Self::with_program(program, config))
    }

    /// Inactive manager around an already compiled program
    pub fn with_program(program: ShaderProgram, config: OverlayConfig) -> Self {
        Self {
            renderer: FrameRenderer::new(program, config.marker_kind, config.draw_state),
            config,
            handle: None,
        }
    }

    /// Installs the overlay into the host's first 3D viewport.
    ///
    /// Does nothing when already active.
    ///
    /// # Errors
    /// [`OverlayError::NoViewport`] if the host has no 3D viewport. The
    /// manager stays inactive and nothing is installed.
    pub fn toggle_on(&mut self, host: &mut dyn ViewportHost) -> OverlayResult<()> {
        if self.handle.is_some() {
            return Ok(());
        }

        let Some(viewport) = host.find_viewport() else {
            log::warn!("{}", OverlayError::NoViewport);
            return Err(OverlayError::NoViewport);
        };

        let renderer = self.renderer.clone();
        let handler = host.add_draw_handler(
            viewport,
            self.config.draw_stage,
            Box::new(move |ctx: &mut FrameContext<'_>| renderer.render_frame(ctx)),
        );
        host.tag_redraw(viewport);
        self.handle = Some(OverlayHandle { viewport, handler });

        log::info!(
            "Showing {} and {} gizmos in {:?}",
            GizmoKind::Plane.label(),
            GizmoKind::Snap.label(),
            viewport
        );
        Ok(())
    }

    /// Removes the overlay and redraws the viewport it was attached to.
    ///
    /// Does nothing when already inactive.
    pub fn toggle_off(&mut self, host: &mut dyn ViewportHost) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        if !host.remove_draw_handler(handle.handler) {
            log::debug!("Draw handler {:?} was already removed by the host", handle.handler);
        }
        host.tag_redraw(handle.viewport);
        log::info!("Hiding gizmos in {:?}", handle.viewport);
    }

    /// Flips between shown and hidden, returning the new state
    pub fn toggle(&mut self, host: &mut dyn ViewportHost) -> OverlayResult<OverlayState> {
        match self.state() {
            OverlayState::Active => self.toggle_off(host),
            OverlayState::Inactive => self.toggle_on(host)?,
        }
        Ok(self.state())
    }

    /// Detaches unconditionally. Safe to call when inactive.
    pub fn teardown(&mut self, host: &mut dyn ViewportHost) {
        self.toggle_off(host);
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn state(&self) -> OverlayState {
        if self.is_active() {
            OverlayState::Active
        } else {
            OverlayState::Inactive
        }
    }

    pub fn handle(&self) -> Option<OverlayHandle> {
        self.handle
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn program(&self) -> &ShaderProgram {
        self.renderer.program()
    }

    /// Text for the show/hide button
    pub fn status_label(&self) -> &'static str {
        match self.state() {
            OverlayState::Active => "Hide gizmos",
            OverlayState::Inactive => "Show gizmos",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShaderStage;
    use crate::gfx::rendering::test_backend::RecordingBackend;
    use crate::gfx::rendering::DrawState;
    use crate::gfx::scene::{Scene, SceneObject};
    use crate::gfx::viewport::{AreaKind, DrawStage, ViewportRegistry};
    use cgmath::{Matrix4, SquareMatrix};

    fn manager(backend: &mut RecordingBackend) -> OverlayLifecycleManager {
        OverlayLifecycleManager::new(backend, OverlayConfig::default()).unwrap()
    }

    fn registry_with_viewport() -> (ViewportRegistry, ViewportId) {
        let mut registry = ViewportRegistry::new();
        registry.add_area(AreaKind::Outliner);
        let view = registry.add_area(AreaKind::View3D);
        (registry, view)
    }

    #[test]
    fn test_toggle_on_is_idempotent() {
        let mut backend = RecordingBackend::new();
        let mut overlay = manager(&mut backend);
        let (mut registry, view) = registry_with_viewport();

        overlay.toggle_on(&mut registry).unwrap();
        let handle = overlay.handle();
        overlay.toggle_on(&mut registry).unwrap();

        assert_eq!(registry.handler_count(), 1);
        assert_eq!(overlay.handle(), handle);
        assert_eq!(handle.map(|h| h.viewport), Some(view));
        assert!(registry.needs_redraw(view));
    }

    #[test]
    fn test_toggle_off_is_idempotent() {
        let mut backend = RecordingBackend::new();
        let mut overlay = manager(&mut backend);
        let (mut registry, view) = registry_with_viewport();

        overlay.toggle_on(&mut registry).unwrap();
        registry.take_redraw(view);

        overlay.toggle_off(&mut registry);
        assert!(!overlay.is_active());
        assert_eq!(registry.handler_count(), 0);
        assert!(registry.take_redraw(view));

        overlay.toggle_off(&mut registry);
        assert!(!overlay.is_active());
        assert!(!registry.needs_redraw(view));
    }

    #[test]
    fn test_no_viewport_stays_inactive() {
        let mut backend = RecordingBackend::new();
        let mut overlay = manager(&mut backend);
        let mut registry = ViewportRegistry::new();
        registry.add_area(AreaKind::Properties);

        assert_eq!(overlay.toggle_on(&mut registry), Err(OverlayError::NoViewport));
        assert_eq!(overlay.state(), OverlayState::Inactive);
        assert_eq!(overlay.handle(), None);
        assert_eq!(registry.handler_count(), 0);
    }

    #[test]
    fn test_draws_through_viewport() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::empty("A_plane"));
        scene.add_object(SceneObject::empty("B_snap"));
        scene.add_object(SceneObject::empty("C_other"));

        let mut backend = RecordingBackend::new();
        let mut overlay = manager(&mut backend);
        let (mut registry, view) = registry_with_viewport();
        overlay.toggle_on(&mut registry).unwrap();

        {
            let mut ctx = FrameContext::new(&scene, &mut backend, Matrix4::identity());
            assert_eq!(registry.draw(view, DrawStage::PostView, &mut ctx), 1);
        }

        let draws = backend.draws();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].kind, GizmoKind::Plane);
        assert_eq!(draws[0].color, Some([0.3, 0.9, 1.0, 0.5]));
        assert_eq!(draws[0].normal_shading, Some(0.1));
        assert_eq!(draws[1].kind, GizmoKind::Snap);
        assert_eq!(draws[1].color, Some([0.7, 0.9, 0.1, 1.0]));
        assert_eq!(draws[1].normal_shading, Some(0.5));
        assert_eq!(backend.draw_state(), DrawState::DISABLED);

        overlay.teardown(&mut registry);
        backend.clear();
        let mut ctx = FrameContext::new(&scene, &mut backend, Matrix4::identity());
        assert_eq!(registry.draw(view, DrawStage::PostView, &mut ctx), 0);
    }

    #[test]
    fn test_teardown_when_inactive() {
        let mut backend = RecordingBackend::new();
        let mut overlay = manager(&mut backend);
        let (mut registry, view) = registry_with_viewport();

        overlay.teardown(&mut registry);
        assert!(!overlay.is_active());
        assert!(!registry.needs_redraw(view));
    }

    #[test]
    fn test_toggle_flips_state_and_label() {
        let mut backend = RecordingBackend::new();
        let mut overlay = manager(&mut backend);
        let (mut registry, _) = registry_with_viewport();
        assert_eq!(overlay.status_label(), "Show gizmos");

        assert_eq!(overlay.toggle(&mut registry), Ok(OverlayState::Active));
        assert_eq!(overlay.status_label(), "Hide gizmos");

        assert_eq!(overlay.toggle(&mut registry), Ok(OverlayState::Inactive));
        assert_eq!(overlay.status_label(), "Show gizmos");
        assert_eq!(registry.handler_count(), 0);
    }

    #[test]
    fn test_viewport_closed_while_active() {
        let mut backend = RecordingBackend::new();
        let mut overlay = manager(&mut backend);
        let (mut registry, view) = registry_with_viewport();

        overlay.toggle_on(&mut registry).unwrap();
        registry.remove_area(view);

        overlay.toggle_off(&mut registry);
        assert!(!overlay.is_active());
        assert_eq!(overlay.toggle_on(&mut registry), Err(OverlayError::NoViewport));
    }

    #[test]
    fn test_compile_failure_means_no_manager() {
        let mut backend = RecordingBackend::failing_compile(ShaderStage::Fragment, "unknown identifier");
        let result = OverlayLifecycleManager::new(&mut backend, OverlayConfig::default());
        assert!(matches!(
            result,
            Err(OverlayError::ShaderCompile(ref e)) if e.stage == ShaderStage::Fragment
        ));
    }

    #[test]
    fn test_configured_stage_is_used() {
        let mut backend = RecordingBackend::new();
        let config = OverlayConfig::default().with_draw_stage(DrawStage::PostPixel);
        let mut overlay = OverlayLifecycleManager::new(&mut backend, config).unwrap();
        let (mut registry, view) = registry_with_viewport();
        overlay.toggle_on(&mut registry).unwrap();

        let scene = Scene::new();
        let mut ctx = FrameContext::new(&scene, &mut backend, Matrix4::identity());
        assert_eq!(registry.draw(view, DrawStage::PostView, &mut ctx), 0);
        assert_eq!(registry.draw(view, DrawStage::PostPixel, &mut ctx), 1);
    }
}
