use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use super::orbit_camera::OrbitCamera;

/// Pixel distance treated as one wheel notch for touchpads reporting
/// `PixelDelta`.
pub const PIXELS_PER_NOTCH: f32 = 100.0;

/// What an input event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerResponse {
    Ignored,
    /// Camera angles or radius changed; the frame should be redrawn.
    CameraChanged,
    /// Pointer released where it was pressed.
    Click { position: (f32, f32) },
}

/// Routes pointer input to the orbit camera.
///
/// Drag with the left button orbits, the wheel zooms, and a press followed
/// by a release at the same spot is reported as a click for picking.
#[derive(Debug, Default, Clone)]
pub struct CameraController {
    capture_origin: Option<(f32, f32)>,
    last_position: (f32, f32),
    cursor: (f32, f32),
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_captured(&self) -> bool {
        self.capture_origin.is_some()
    }

    /// Last known cursor position in physical pixels.
    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    pub fn pointer_down(&mut self, position: (f32, f32)) {
        self.capture_origin = Some(position);
        self.last_position = position;
        self.cursor = position;
    }

    /// Orbit by the pixel delta since the previous move. Does nothing unless
    /// the pointer is captured.
    pub fn pointer_move(&mut self, position: (f32, f32), camera: &mut OrbitCamera) -> bool {
        self.cursor = position;
        if !self.is_captured() {
            return false;
        }

        let dx = position.0 - self.last_position.0;
        let dy = position.1 - self.last_position.1;
        self.last_position = position;
        if dx == 0.0 && dy == 0.0 {
            return false;
        }

        camera.set_azimuth_delta(dx);
        camera.set_polar_delta(dy);
        true
    }

    /// Release the capture. Returns the click position when the pointer did
    /// not move between press and release.
    pub fn pointer_up(&mut self, position: (f32, f32)) -> Option<(f32, f32)> {
        self.cursor = position;
        let origin = self.capture_origin.take()?;
        (origin == position).then_some(position)
    }

    pub fn scroll(&mut self, notches: f32, camera: &mut OrbitCamera) -> bool {
        if notches == 0.0 {
            return false;
        }
        camera.set_radius_delta(notches);
        true
    }

    pub fn process_window_event(
        &mut self,
        event: &WindowEvent,
        camera: &mut OrbitCamera,
    ) -> ControllerResponse {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let position = (position.x as f32, position.y as f32);
                if self.pointer_move(position, camera) {
                    ControllerResponse::CameraChanged
                } else {
                    ControllerResponse::Ignored
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    self.pointer_down(self.cursor);
                    ControllerResponse::Ignored
                }
                ElementState::Released => match self.pointer_up(self.cursor) {
                    Some(position) => ControllerResponse::Click { position },
                    None => ControllerResponse::Ignored,
                },
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(position) => {
                        position.y as f32 / PIXELS_PER_NOTCH
                    }
                };
                if self.scroll(notches, camera) {
                    ControllerResponse::CameraChanged
                } else {
                    ControllerResponse::Ignored
                }
            }
            _ => ControllerResponse::Ignored,
        }
    }
}
