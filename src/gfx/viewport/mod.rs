//! # Viewport draw hooks
//!
//! The host side of the overlay: screen areas, the 3D viewports among them,
//! and the per-stage draw callbacks that run whenever a viewport redraws.
//!
//! [`ViewportHost`] is the seam the overlay talks to. [`ViewportRegistry`] is
//! the in-process implementation used by the viewer app and by tests.

use std::collections::HashSet;

use crate::gfx::rendering::FrameContext;

/// Identifies one screen area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportId(pub u32);

/// What a screen area shows. Only `View3D` areas can host gizmos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaKind {
    View3D,
    Outliner,
    Properties,
    ImageEditor,
}

/// Point in a viewport's redraw at which a handler runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawStage {
    /// Before the scene is drawn
    PreView,
    /// After the scene, in scene space with the scene's depth buffer
    PostView,
    /// After everything, in pixel space
    PostPixel,
}

/// Handle returned by [`ViewportHost::add_draw_handler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawHandlerId(u64);

pub type DrawHandler = Box<dyn FnMut(&mut FrameContext<'_>)>;

/// Draw-pipeline hooks a host exposes to overlays
pub trait ViewportHost {
    /// First 3D viewport on screen, if any
    fn find_viewport(&self) -> Option<ViewportId>;

    /// Installs `handler` to run at `stage` of every redraw of `viewport`
    fn add_draw_handler(
        &mut self,
        viewport: ViewportId,
        stage: DrawStage,
        handler: DrawHandler,
    ) -> DrawHandlerId;

    /// Returns false if the handler was already gone
    fn remove_draw_handler(&mut self, id: DrawHandlerId) -> bool;

    /// Requests a redraw of `viewport`
    fn tag_redraw(&mut self, viewport: ViewportId);
}

struct RegisteredHandler {
    id: DrawHandlerId,
    viewport: ViewportId,
    stage: DrawStage,
    handler: DrawHandler,
}

/// Areas, installed draw handlers and pending redraws of one window
#[derive(Default)]
pub struct ViewportRegistry {
    areas: Vec<(ViewportId, AreaKind)>,
    handlers: Vec<RegisteredHandler>,
    redraw: HashSet<ViewportId>,
    next_area: u32,
    next_handler: u64,
}

impl ViewportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a screen area and returns its id
    pub fn add_area(&mut self, kind: AreaKind) -> ViewportId {
        self.next_area += 1;
        let id = ViewportId(self.next_area);
        self.areas.push((id, kind));
        id
    }

    /// Closes an area. Handlers attached to it are dropped.
    pub fn remove_area(&mut self, id: ViewportId) -> bool {
        let before = self.areas.len();
        self.areas.retain(|(area, _)| *area != id);
        if self.areas.len() == before {
            return false;
        }

        let handlers = self.handlers.len();
        self.handlers.retain(|entry| entry.viewport != id);
        if handlers != self.handlers.len() {
            log::debug!(
                "Dropped {} draw handlers with area {:?}",
                handlers - self.handlers.len(),
                id
            );
        }
        self.redraw.remove(&id);
        true
    }

    pub fn area_kind(&self, id: ViewportId) -> Option<AreaKind> {
        self.areas
            .iter()
            .find(|(area, _)| *area == id)
            .map(|(_, kind)| *kind)
    }

    /// Number of installed handlers across all areas
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn needs_redraw(&self, viewport: ViewportId) -> bool {
        self.redraw.contains(&viewport)
    }

    /// Clears and returns the pending redraw flag of `viewport`
    pub fn take_redraw(&mut self, viewport: ViewportId) -> bool {
        self.redraw.remove(&viewport)
    }

    /// Runs every handler installed for `viewport` at `stage`, in
    /// installation order. Returns how many ran.
    pub fn draw(&mut self, viewport: ViewportId, stage: DrawStage, ctx: &mut FrameContext<'_>) -> usize {
        let mut ran = 0;
        for entry in self
            .handlers
            .iter_mut()
            .filter(|entry| entry.viewport == viewport && entry.stage == stage)
        {
            (entry.handler)(ctx);
            ran += 1;
        }
        ran
    }
}

impl ViewportHost for ViewportRegistry {
    fn find_viewport(&self) -> Option<ViewportId> {
        self.areas
            .iter()
            .find(|(_, kind)| *kind == AreaKind::View3D)
            .map(|(id, _)| *id)
    }

    fn add_draw_handler(
        &mut self,
        viewport: ViewportId,
        stage: DrawStage,
        handler: DrawHandler,
    ) -> DrawHandlerId {
        self.next_handler += 1;
        let id = DrawHandlerId(self.next_handler);
        self.handlers.push(RegisteredHandler {
            id,
            viewport,
            stage,
            handler,
        });
        log::debug!("Installed draw handler {:?} on {:?} at {:?}", id, viewport, stage);
        id
    }

    fn remove_draw_handler(&mut self, id: DrawHandlerId) -> bool {
        match self.handlers.iter().position(|entry| entry.id == id) {
            Some(index) => {
                self.handlers.remove(index);
                log::debug!("Removed draw handler {:?}", id);
                true
            }
            None => false,
        }
    }

    fn tag_redraw(&mut self, viewport: ViewportId) {
        self.redraw.insert(viewport);
    }
}
