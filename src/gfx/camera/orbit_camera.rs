use std::f32::consts::{FRAC_PI_2, PI};

use cgmath::{EuclideanSpace, Point3, Vector3};

use super::camera_utils::ViewParams;
use crate::{
    error::{CameraError, OptionsError},
    gfx::scene::{ObjectId, Scene},
    options::CameraOptions,
};

/// Clamp limits for the orbit camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCameraBounds {
    pub min_radius: f32,
    pub max_radius: f32,
    /// Kept above 0 so the eye never sits exactly on the up axis.
    pub min_polar: f32,
    /// Kept below π for the same reason.
    pub max_polar: f32,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self::from(&CameraOptions::default())
    }
}

impl OrbitCameraBounds {
    /// Radius limits must form a positive interval and the polar limits must
    /// lie strictly inside `(0, π)`.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.min_radius.is_finite() && self.max_radius.is_finite())
            || self.min_radius <= 0.0
            || self.min_radius > self.max_radius
        {
            return Err(OptionsError::Invalid(format!(
                "arm range [{}, {}] is not a positive interval",
                self.min_radius, self.max_radius
            )));
        }

        if !(self.min_polar > 0.0 && self.max_polar < PI && self.min_polar < self.max_polar) {
            return Err(OptionsError::Invalid(format!(
                "polar range [{}, {}] must lie strictly inside (0, π)",
                self.min_polar, self.max_polar
            )));
        }

        Ok(())
    }
}

impl From<&CameraOptions> for OrbitCameraBounds {
    fn from(options: &CameraOptions) -> Self {
        Self {
            min_radius: options.arm_min,
            max_radius: options.arm_max,
            min_polar: options.polar_min,
            max_polar: options.polar_max,
        }
    }
}

/// Canned orientations offered by the viewer toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPreset {
    /// Looking straight down at the target.
    Top,
    /// On the horizon, a quarter turn per step around the target.
    Side(i32),
    /// Looking straight up at the target.
    Bottom,
}

/// Camera orbiting a scene object on a sphere.
///
/// `polar` is measured from the +Y axis and `azimuth` around it. The target
/// is held by id: if the object leaves the scene the camera reports
/// [`CameraError::TargetMissing`] instead of following a stale position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    azimuth: f32,
    polar: f32,
    radius: f32,
    target: Option<ObjectId>,
    bounds: OrbitCameraBounds,
    /// Pointer pixels per radian of azimuth.
    pub sensitivity_x: f32,
    /// Pointer pixels per radian of polar angle.
    pub sensitivity_y: f32,
    /// Radius change per wheel notch.
    pub sensitivity_arm: f32,
    default_radius: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_valid_options(&CameraOptions::default())
    }
}

impl OrbitCamera {
    pub fn new(options: &CameraOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(Self::from_valid_options(options))
    }

    fn from_valid_options(options: &CameraOptions) -> Self {
        let mut camera = Self {
            azimuth: 0.0,
            polar: options.polar_min,
            radius: options.arm_initial,
            target: None,
            bounds: OrbitCameraBounds::from(options),
            sensitivity_x: options.sensitivity_x,
            sensitivity_y: options.sensitivity_y,
            sensitivity_arm: options.sensitivity_arm,
            default_radius: options.arm_initial,
        };
        camera.reset_to_default();
        camera
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    /// Arm length: distance from the target to the eye.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn target(&self) -> Option<ObjectId> {
        self.target
    }

    pub fn bounds(&self) -> &OrbitCameraBounds {
        &self.bounds
    }

    /// Replace the clamp limits. Polar angle and radius are pulled into the
    /// new range; invalid limits leave the camera unchanged.
    pub fn set_bounds(&mut self, bounds: OrbitCameraBounds) -> Result<(), OptionsError> {
        bounds.validate()?;
        self.bounds = bounds;
        self.set_polar(self.polar);
        self.set_radius(self.radius);
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.target.is_some()
    }

    /// Orbit around `target` from now on.
    pub fn bind(&mut self, target: ObjectId) {
        log::debug!("Camera bound to object {target}");
        self.target = Some(target);
    }

    pub fn unbind(&mut self) -> Option<ObjectId> {
        let previous = self.target.take();
        if let Some(id) = previous {
            log::debug!("Camera released object {id}");
        }
        previous
    }

    /// Start at the top view with the configured arm length.
    pub fn reset_to_default(&mut self) {
        self.azimuth = 0.0;
        self.polar = self.bounds.min_polar;
        self.set_radius(self.default_radius);
    }

    /// Turn around the up axis by a pointer movement of `d` pixels. Azimuth
    /// is left unbounded; the trigonometry wraps it.
    pub fn set_azimuth_delta(&mut self, d: f32) {
        self.set_azimuth(self.azimuth + d / self.sensitivity_x);
    }

    /// Tilt by a pointer movement of `d` pixels. Moving the pointer down
    /// (positive `d`) lifts the eye towards the top.
    pub fn set_polar_delta(&mut self, d: f32) {
        self.set_polar(self.polar - d / self.sensitivity_y);
    }

    /// Zoom by `d` wheel notches. Positive values pull the eye closer.
    pub fn set_radius_delta(&mut self, d: f32) {
        self.set_radius(self.radius - d * self.sensitivity_arm);
    }

    pub fn set_azimuth(&mut self, azimuth: f32) {
        if !azimuth.is_finite() {
            log::warn!("Ignoring non-finite azimuth {azimuth}");
            return;
        }
        self.azimuth = azimuth;
    }

    /// Set the polar angle, clamped away from the poles.
    pub fn set_polar(&mut self, polar: f32) {
        if polar.is_nan() {
            log::warn!("Ignoring NaN polar angle");
            return;
        }
        self.polar = polar.clamp(self.bounds.min_polar, self.bounds.max_polar);
    }

    pub fn set_radius(&mut self, radius: f32) {
        if radius.is_nan() {
            log::warn!("Ignoring NaN camera radius");
            return;
        }
        self.radius = radius.clamp(self.bounds.min_radius, self.bounds.max_radius);
    }

    /// Azimuth slider, in degrees (`0..=360`).
    pub fn set_azimuth_degrees(&mut self, value: f32) {
        self.set_azimuth(PI * (value / 180.0));
    }

    /// Polar slider, in half-degrees: `value` 360 is a full half-turn.
    pub fn set_polar_half_degrees(&mut self, value: f32) {
        self.set_polar(PI * (value / 360.0));
    }

    /// Arm slider: radius is the minimum arm length plus `value`.
    pub fn set_arm_offset(&mut self, value: f32) {
        self.set_radius(self.bounds.min_radius + value);
    }

    pub fn apply_preset(&mut self, preset: ViewPreset) {
        match preset {
            ViewPreset::Top => {
                self.azimuth = 0.0;
                self.polar = self.bounds.min_polar;
            }
            ViewPreset::Side(side) => {
                self.azimuth = FRAC_PI_2 * side as f32;
                self.set_polar(FRAC_PI_2);
            }
            ViewPreset::Bottom => {
                self.azimuth = 0.0;
                self.polar = self.bounds.max_polar;
            }
        }
    }

    /// World location of the bound target.
    pub fn target_location(&self, scene: &Scene) -> Result<Point3<f32>, CameraError> {
        let id = self.target.ok_or(CameraError::NoTarget)?;
        let object = scene.get(id).ok_or(CameraError::TargetMissing(id))?;
        Ok(Point3::from_vec(object.location()))
    }

    pub fn eye_position(&self, scene: &Scene) -> Result<Point3<f32>, CameraError> {
        let target = self.target_location(scene)?;
        Ok(calculate_cartesian_eye_position(
            self.polar,
            self.azimuth,
            self.radius,
            target,
        ))
    }

    /// Eye, target and up vector for the renderer's look-at.
    pub fn view_params(&self, scene: &Scene) -> Result<ViewParams, CameraError> {
        let target = self.target_location(scene)?;
        let eye = calculate_cartesian_eye_position(self.polar, self.azimuth, self.radius, target);
        Ok(ViewParams::new(eye, target))
    }
}

fn calculate_cartesian_eye_position(
    polar: f32,
    azimuth: f32,
    radius: f32,
    target: Point3<f32>,
) -> Point3<f32> {
    target
        + Vector3::new(
            radius * polar.sin() * azimuth.cos(),
            radius * polar.cos(),
            radius * polar.sin() * azimuth.sin(),
        )
}
