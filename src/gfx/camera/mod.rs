pub mod camera_controller;
pub mod camera_utils;
pub mod orbit_camera;

// Re-export main types
pub use camera_controller::{CameraController, ControllerResponse};
pub use camera_utils::{CameraUniform, Projection, ViewParams};
pub use orbit_camera::{OrbitCamera, OrbitCameraBounds, ViewPreset};
