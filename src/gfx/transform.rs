//! # Object Transforms
//!
//! Composition of an object's location, Euler rotation, non-uniform scale and
//! local pivot into a single affine matrix.
//!
//! The matrix is `T(location) · Rz · Ry · Rx · S(scale) · T(-origin)`: the
//! mesh is shifted so the pivot sits at the local origin, scaled, rotated
//! about X then Y then Z, and finally moved to its world location.

use cgmath::{Matrix3, Matrix4, Rad, Vector3, Zero};

use crate::error::TransformError;

/// Inputs of an object's model matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space translation.
    pub location: Vector3<f32>,
    /// Euler angles in radians about X, Y and Z.
    pub rotation: Vector3<f32>,
    /// Per-axis scale. Zero on any axis is rejected.
    pub scale: Vector3<f32>,
    /// Local pivot that rotation and scale are applied about.
    pub origin: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            location: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            origin: Vector3::zero(),
        }
    }
}

impl Transform {
    /// Identity transform rotating and scaling about `origin`.
    pub fn with_origin(origin: Vector3<f32>) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), TransformError> {
        for (field, value) in [
            ("location", self.location),
            ("rotation", self.rotation),
            ("scale", self.scale),
            ("origin", self.origin),
        ] {
            if !(value.x.is_finite() && value.y.is_finite() && value.z.is_finite()) {
                return Err(TransformError::NonFinite { field });
            }
        }

        for (axis, value) in [('x', self.scale.x), ('y', self.scale.y), ('z', self.scale.z)] {
            if value == 0.0 {
                return Err(TransformError::ZeroScale { axis });
            }
        }

        Ok(())
    }

    /// Rotation part only, `Rz · Ry · Rx`.
    pub fn rotation_matrix(&self) -> Matrix3<f32> {
        let rx = Matrix3::from_angle_x(Rad(self.rotation.x));
        let ry = Matrix3::from_angle_y(Rad(self.rotation.y));
        let rz = Matrix3::from_angle_z(Rad(self.rotation.z));

        rz * ry * rx
    }

    pub fn matrix(&self) -> Result<Matrix4<f32>, TransformError> {
        compute_matrix(self)
    }
}

/// Build the model matrix for `transform`.
///
/// Pure function of its input: identical transforms give bit-identical
/// matrices.
pub fn compute_matrix(transform: &Transform) -> Result<Matrix4<f32>, TransformError> {
    transform.validate()?;

    let t = Matrix4::from_translation(transform.location);
    let r = Matrix4::from(transform.rotation_matrix());
    let s = Matrix4::from_nonuniform_scale(transform.scale.x, transform.scale.y, transform.scale.z);
    let o = Matrix4::from_translation(-transform.origin);

    Ok(t * r * s * o)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, SquareMatrix, Vector4};
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{a:?} != {b:?}");
    }

    fn apply(m: &Matrix4<f32>, p: Vector3<f32>) -> Vector3<f32> {
        (m * Vector4::new(p.x, p.y, p.z, 1.0)).truncate()
    }

    #[test]
    fn identity_transform_gives_identity_matrix() {
        let m = compute_matrix(&Transform::default()).unwrap();
        assert_eq!(m, Matrix4::identity());
    }

    #[test]
    fn translation_column_equals_location_without_rotation_or_pivot() {
        let transform = Transform {
            location: Vector3::new(3.0, -7.5, 42.0),
            scale: Vector3::new(2.0, 0.5, 9.0),
            ..Transform::default()
        };
        let m = compute_matrix(&transform).unwrap();
        assert_eq!(m.w.truncate(), transform.location);
        assert_eq!(m.w.w, 1.0);
    }

    #[test]
    fn pivot_maps_to_location() {
        let transform = Transform {
            location: Vector3::new(-10.0, 0.0, -50.0),
            rotation: Vector3::new(0.3, -1.2, 2.0),
            scale: Vector3::new(10.0, 10.0, 10.0),
            origin: Vector3::new(0.5, 0.5, 0.5),
        };
        let m = compute_matrix(&transform).unwrap();
        assert_vec_close(apply(&m, transform.origin), transform.location);
    }

    #[test]
    fn scale_is_applied_before_rotation() {
        // Stretch X by 2, then a quarter turn about Z sends it to +Y.
        let transform = Transform {
            rotation: Vector3::new(0.0, 0.0, FRAC_PI_2),
            scale: Vector3::new(2.0, 1.0, 1.0),
            ..Transform::default()
        };
        let m = compute_matrix(&transform).unwrap();
        assert_vec_close(apply(&m, Vector3::unit_x()), Vector3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn rotation_order_is_x_then_y_then_z() {
        let transform = Transform {
            rotation: Vector3::new(FRAC_PI_2, FRAC_PI_2, 0.0),
            ..Transform::default()
        };
        let m = compute_matrix(&transform).unwrap();
        // Rx sends +Y to +Z, then Ry sends +Z to +X.
        assert_vec_close(apply(&m, Vector3::unit_y()), Vector3::unit_x());
    }

    #[test]
    fn compute_matrix_is_idempotent() {
        let transform = Transform {
            location: Vector3::new(1.25, 2.5, -3.75),
            rotation: Vector3::new(0.1, 0.2, 0.3),
            scale: Vector3::new(1.5, -2.0, 0.25),
            origin: Vector3::new(0.5, 0.5, 0.5),
        };
        let a = compute_matrix(&transform).unwrap();
        let b = compute_matrix(&transform).unwrap();
        let a: &[f32; 16] = a.as_ref();
        let b: &[f32; 16] = b.as_ref();
        assert!(a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits()));
    }

    #[test]
    fn zero_scale_is_rejected() {
        let transform = Transform {
            scale: Vector3::new(1.0, 0.0, 1.0),
            ..Transform::default()
        };
        assert_eq!(
            compute_matrix(&transform),
            Err(TransformError::ZeroScale { axis: 'y' })
        );
    }

    #[test]
    fn non_finite_rotation_is_rejected() {
        let transform = Transform {
            rotation: Vector3::new(f32::NAN, 0.0, 0.0),
            ..Transform::default()
        };
        assert_eq!(
            compute_matrix(&transform),
            Err(TransformError::NonFinite { field: "rotation" })
        );
    }
}
