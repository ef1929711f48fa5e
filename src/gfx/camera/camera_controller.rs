use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::orbit_camera::OrbitCamera;

/// Mouse orbit/zoom/pan for [`OrbitCamera`]
///
/// Drag rotates, Shift+drag pans, the wheel zooms and Shift+C resets.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    pub fn process_events(&mut self, event: &DeviceEvent, window: &Window, camera: &mut OrbitCamera) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => *scroll as f32,
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                if self.is_shift_held {
                    camera.pan((-delta.0 as f32 * self.pan_speed, delta.1 as f32 * self.pan_speed));
                } else {
                    camera.add_yaw(-delta.0 as f32 * self.rotate_speed);
                    camera.add_pitch(delta.1 as f32 * self.rotate_speed);
                }
                window.request_redraw();
            }
            _ => (),
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, window: &Window, camera: &mut OrbitCamera) {
        if let PhysicalKey::Code(key) = event.physical_key {
            if self.process_key(key, event.state, camera) {
                window.request_redraw();
            }
        }
    }

    /// Applies one key transition. Returns true if the camera moved.
    pub fn process_key(&mut self, key: KeyCode, state: ElementState, camera: &mut OrbitCamera) -> bool {
        match (key, state) {
            (KeyCode::ShiftLeft | KeyCode::ShiftRight, state) => {
                self.is_shift_held = state == ElementState::Pressed;
                false
            }
            (KeyCode::KeyC, ElementState::Pressed) if self.is_shift_held => {
                log::debug!("Resetting camera to default position");
                camera.reset_to_default();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    #[test]
    fn test_shift_c_resets_and_asks_for_redraw() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = OrbitCamera::new(3.0, -0.2, 2.0, Vector3::new(1.0, 1.0, 0.0), 1.0);

        assert!(!controller.process_key(KeyCode::KeyC, ElementState::Pressed, &mut camera));
        assert_eq!(camera.distance, 3.0);

        assert!(!controller.process_key(KeyCode::ShiftLeft, ElementState::Pressed, &mut camera));
        assert!(controller.process_key(KeyCode::KeyC, ElementState::Pressed, &mut camera));
        assert_eq!(camera.distance, 8.0);
        assert_eq!(camera.target, Vector3::new(0.0, 0.0, 0.0));

        controller.process_key(KeyCode::ShiftLeft, ElementState::Released, &mut camera);
        assert!(!controller.process_key(KeyCode::KeyC, ElementState::Pressed, &mut camera));
    }
}
