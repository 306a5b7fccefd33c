use cgmath::{perspective, Deg, EuclideanSpace, Matrix4, Point3, Rad, SquareMatrix, Vector3};

use crate::{error::PickingError, options::ProjectionOptions};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Look-at parameters handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl ViewParams {
    /// Y-up view from `eye` towards `target`.
    pub fn new(eye: Point3<f32>, target: Point3<f32>) -> Self {
        Self {
            eye,
            target,
            up: Vector3::unit_y(),
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Perspective projection. The renderer and the picker must share one of
/// these, or clicks will not land on what is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fovy: Rad<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new(options: &ProjectionOptions, width: u32, height: u32) -> Result<Self, PickingError> {
        Self {
            fovy: Deg(options.fovy_degrees).into(),
            aspect: 1.0,
            znear: options.znear,
            zfar: options.zfar,
        }
        .with_viewport(width, height)
    }

    /// Follow a viewport resize. Zero-sized viewports are rejected and leave
    /// the aspect ratio unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), PickingError> {
        *self = self.with_viewport(width, height)?;
        Ok(())
    }

    /// Copy of this projection with the aspect ratio of a `width`x`height`
    /// viewport.
    pub fn with_viewport(&self, width: u32, height: u32) -> Result<Self, PickingError> {
        if width == 0 || height == 0 {
            return Err(PickingError::InvalidViewport { width, height });
        }

        Ok(Self {
            aspect: width as f32 / height as f32,
            ..*self
        })
    }

    /// Projection matrix in OpenGL clip conventions (depth -1..1).
    pub fn matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    /// Projection matrix for wgpu-style depth (0..1).
    pub fn wgpu_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.matrix()
    }

    pub fn view_projection(&self, view: &ViewParams) -> Matrix4<f32> {
        self.matrix() * view.view_matrix()
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::<f32>::identity().into(),
        }
    }
}

impl CameraUniform {
    /// Uniform for a wgpu renderer looking through `view` with `projection`.
    pub fn new(view: &ViewParams, projection: &Projection) -> Self {
        let eye = view.eye.to_vec();
        Self {
            view_position: eye.extend(1.0).into(),
            view_proj: (projection.wgpu_matrix() * view.view_matrix()).into(),
        }
    }
}
