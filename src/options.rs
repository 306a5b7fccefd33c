//! # Viewer Options
//!
//! Tunable camera and projection parameters with TOML preset support. Every
//! struct uses `#[serde(default)]`, so a preset that only overrides
//! `[camera]` keeps the default projection.

use std::f32::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{error::OptionsError, gfx::camera::OrbitCameraBounds};

/// Orbit camera control parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Pointer pixels per radian of azimuth.
    pub sensitivity_x: f32,
    /// Pointer pixels per radian of polar angle.
    pub sensitivity_y: f32,
    /// Arm length change per wheel notch.
    pub sensitivity_arm: f32,
    pub arm_min: f32,
    pub arm_max: f32,
    pub arm_initial: f32,
    /// Smallest polar angle (radians). Must stay above 0.
    pub polar_min: f32,
    /// Largest polar angle (radians). Must stay below π.
    pub polar_max: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            sensitivity_x: 360.0 / PI,
            sensitivity_y: 480.0 / PI,
            sensitivity_arm: 5.0,
            arm_min: 20.0,
            arm_max: 100.0,
            arm_initial: 20.0,
            polar_min: PI * (0.1 / 360.0),
            polar_max: PI * (359.9 / 360.0),
        }
    }
}

impl CameraOptions {
    /// Sensitivities must be positive and the clamp ranges must be usable by
    /// [`OrbitCameraBounds`].
    pub fn validate(&self) -> Result<(), OptionsError> {
        for (name, value) in [
            ("sensitivity_x", self.sensitivity_x),
            ("sensitivity_y", self.sensitivity_y),
            ("sensitivity_arm", self.sensitivity_arm),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(OptionsError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !self.arm_initial.is_finite() {
            return Err(OptionsError::Invalid(format!(
                "arm_initial must be finite, got {}",
                self.arm_initial
            )));
        }

        OrbitCameraBounds::from(self).validate()
    }
}

/// Perspective parameters shared by the renderer and the picker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectionOptions {
    /// Vertical field of view in degrees.
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            fovy_degrees: 60.0,
            znear: 1.0,
            zfar: 10000.0,
        }
    }
}

/// Top-level options container.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ViewerOptions {
    pub camera: CameraOptions,
    pub projection: ProjectionOptions,
}

impl ViewerOptions {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path)?;
        let options = Self::from_toml(&content)?;
        log::debug!("Loaded viewer options from {}", path.display());
        Ok(options)
    }

    /// Parse and validate options from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, OptionsError> {
        let options: Self = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), OptionsError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject combinations that would break the camera clamps or the
    /// projection.
    pub fn validate(&self) -> Result<(), OptionsError> {
        self.camera.validate()?;

        let projection = &self.projection;
        if !(projection.fovy_degrees > 0.0 && projection.fovy_degrees < 180.0) {
            return Err(OptionsError::Invalid(format!(
                "field of view {} is outside (0, 180)",
                projection.fovy_degrees
            )));
        }
        if !(projection.znear > 0.0 && projection.zfar > projection.znear) {
            return Err(OptionsError::Invalid(format!(
                "clip planes near={} far={} are not ordered",
                projection.znear, projection.zfar
            )));
        }

        Ok(())
    }
}
