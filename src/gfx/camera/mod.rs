pub mod camera_controller;
pub mod orbit_camera;

// Re-export main types
pub use camera_controller::CameraController;
pub use orbit_camera::OrbitCamera;
