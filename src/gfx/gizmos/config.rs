use crate::gfx::rendering::DrawState;
use crate::gfx::scene::ObjectKind;
use crate::gfx::viewport::DrawStage;

/// Settings of the gizmo overlay
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Kind of scene object that can carry a gizmo suffix
    pub marker_kind: ObjectKind,
    /// Viewport stage the overlay draws in
    pub draw_stage: DrawStage,
    pub shader_label: String,
    /// GPU state held while gizmos are drawn
    pub draw_state: DrawState,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            marker_kind: ObjectKind::Empty,
            draw_stage: DrawStage::PostView,
            shader_label: "Gizmo Shader".to_string(),
            draw_state: DrawState::GIZMO,
        }
    }
}

impl OverlayConfig {
    pub fn with_marker_kind(mut self, kind: ObjectKind) -> Self {
        self.marker_kind = kind;
        self
    }

    pub fn with_draw_stage(mut self, stage: DrawStage) -> Self {
        self.draw_stage = stage;
        self
    }

    pub fn with_shader_label(mut self, label: &str) -> Self {
        self.shader_label = label.to_owned();
        self
    }

    pub fn with_draw_state(mut self, state: DrawState) -> Self {
        self.draw_state = state;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::rendering::CullFace;

    #[test]
    fn test_default_matches_gizmo_state() {
        let config = OverlayConfig::default();
        assert_eq!(config.marker_kind, ObjectKind::Empty);
        assert_eq!(config.draw_stage, DrawStage::PostView);
        assert!(config.draw_state.depth_test);
        assert!(config.draw_state.blend);
        assert_eq!(config.draw_state.cull_face, Some(CullFace::Front));
    }

    #[test]
    fn test_builder() {
        let config = OverlayConfig::default()
            .with_marker_kind(ObjectKind::Mesh)
            .with_draw_stage(DrawStage::PostPixel)
            .with_shader_label("Markers");
        assert_eq!(config.marker_kind, ObjectKind::Mesh);
        assert_eq!(config.draw_stage, DrawStage::PostPixel);
        assert_eq!(config.shader_label, "Markers");
    }
}
