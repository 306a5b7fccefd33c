//! # Object Picking System
//!
//! This module turns a click into a selected object.
//!
//! ## How it works
//!
//! 1. **Mouse to Ray**: Unproject the click through the same view and
//!    perspective the renderer uses; the ray starts at the camera eye
//! 2. **Ray-OBB Intersection**: Clip the ray's parametric interval against the
//!    three slabs of each object's bounding box, expressed in the object's own
//!    rotated and scaled axes
//! 3. **Selection**: Return the closest intersected object
//!
//! There is no acceleration structure: every pickable object is tested, which
//! is fine at the object counts a viewer scene holds.
//!
//! ## Usage
//!
//! ```
//! use cgmath::Point3;
//! use seisview::gfx::camera::{Projection, ViewParams};
//! use seisview::gfx::picking::ObjectPicker;
//! use seisview::gfx::scene::Scene;
//! use seisview::options::ProjectionOptions;
//!
//! let scene = Scene::new();
//! let projection = Projection::new(&ProjectionOptions::default(), 800, 600).unwrap();
//! let view = ViewParams::new(Point3::new(0.0, 0.0, 10.0), Point3::new(0.0, 0.0, 0.0));
//! let picker = ObjectPicker::new(&projection);
//!
//! let hit = picker
//!     .pick_object((400.0, 300.0), (800, 600), &view, &projection, scene.iter())
//!     .unwrap();
//! assert!(hit.is_none());
//! ```

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::{
    error::{PickingError, SceneError},
    gfx::{
        camera::{Projection, ViewParams},
        scene::{ObjectId, SceneObject},
    },
};

/// Below this `|dot(ray, axis)|` the ray is treated as parallel to a slab.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Box in an object's local mesh space.
///
/// Corners are given before the object's scale; the picker scales them with
/// the object's matrix at test time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner
    pub begin: Vector3<f32>,
    /// Maximum corner
    pub end: Vector3<f32>,
    /// When false the owning object is invisible to picking.
    pub enabled: bool,
}

impl BoundingBox {
    pub fn new(begin: Vector3<f32>, end: Vector3<f32>) -> Result<Self, SceneError> {
        let bounds = Self {
            begin,
            end,
            enabled: true,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// The `[0, 1]^3` box of a unit cube.
    pub fn unit() -> Self {
        Self {
            begin: Vector3::new(0.0, 0.0, 0.0),
            end: Vector3::new(1.0, 1.0, 1.0),
            enabled: true,
        }
    }

    /// Tight bounds around `points`, or `None` when there are none.
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut begin = Vector3::from(*first);
        let mut end = begin;
        for point in rest {
            for axis in 0..3 {
                begin[axis] = begin[axis].min(point[axis]);
                end[axis] = end[axis].max(point[axis]);
            }
        }

        Some(Self {
            begin,
            end,
            enabled: true,
        })
    }

    /// `begin <= end` on every axis, all finite.
    pub fn validate(&self) -> Result<(), SceneError> {
        for (i, axis) in ['x', 'y', 'z'].into_iter().enumerate() {
            let (begin, end) = (self.begin[i], self.end[i]);
            if !(begin.is_finite() && end.is_finite() && begin <= end) {
                return Err(SceneError::InvalidBounds { axis });
            }
        }
        Ok(())
    }

    pub fn extent(&self) -> Vector3<f32> {
        self.end - self.begin
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.begin + self.end) * 0.5
    }
}

/// Result of an object picking operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    /// Id of the picked object
    pub object: ObjectId,
    /// Ray parameter where the ray enters the box
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Vector3<f32>,
}

/// Convert screen coordinates to a world-space ray.
///
/// The aspect ratio comes from `screen_size`, everything else from
/// `projection`, so the ray matches what the renderer draws under the cursor
/// as long as both use the same [`Projection`]. The ray starts at the eye.
pub fn screen_to_ray(
    screen_pos: (f32, f32),
    screen_size: (u32, u32),
    view: &ViewParams,
    projection: &Projection,
) -> Result<Ray, PickingError> {
    let (width, height) = screen_size;
    let projection = projection.with_viewport(width, height).inspect_err(|_| {
        log::warn!("Rejected unprojection for {width}x{height} viewport");
    })?;

    let (mouse_x, mouse_y) = screen_pos;

    // Convert screen coordinates to normalized device coordinates (-1 to 1)
    let ndc_x = (2.0 * mouse_x) / width as f32 - 1.0;
    let ndc_y = 1.0 - (2.0 * mouse_y) / height as f32; // Flip Y axis

    let inv_view_proj = projection
        .view_projection(view)
        .invert()
        .ok_or(PickingError::SingularProjection)?;

    let near_3d = unproject(&inv_view_proj, Vector4::new(ndc_x, ndc_y, -1.0, 1.0));
    let far_3d = unproject(&inv_view_proj, Vector4::new(ndc_x, ndc_y, 1.0, 1.0));

    let direction = far_3d - near_3d;
    let length = direction.magnitude();
    if !(length.is_finite() && length > 0.0) {
        return Err(PickingError::SingularProjection);
    }

    Ok(Ray {
        origin: view.eye.to_vec(),
        direction: direction / length,
    })
}

fn unproject(inv_view_proj: &Matrix4<f32>, ndc: Vector4<f32>) -> Vector3<f32> {
    let world = inv_view_proj * ndc;
    world.truncate() / world.w
}

/// Slab test of `ray` against `bounds` placed by `model`.
///
/// The world-space axes of the box are the first three columns of `model`;
/// their lengths are the object's absolute scale, which is applied to both
/// corners. The ray's interval starts as `clip` (usually the near and far
/// planes) and is narrowed axis by axis. Returns the surviving
/// `(t_min, t_max)`, or `None` when the interval empties.
pub fn ray_obb_intersection(
    ray: &Ray,
    bounds: &BoundingBox,
    model: &Matrix4<f32>,
    clip: (f32, f32),
) -> Option<(f32, f32)> {
    let (mut t_min, mut t_max) = clip;
    let delta = model.w.truncate() - ray.origin;

    for i in 0..3 {
        let column = model[i].truncate();
        let scale = column.magnitude();
        if !(scale.is_finite() && scale > 0.0) {
            return None;
        }
        let axis = column / scale;

        let e = axis.dot(delta);
        let f = ray.direction.dot(axis);
        let lo = bounds.begin[i] * scale;
        let hi = bounds.end[i] * scale;

        if f.abs() > PARALLEL_EPSILON {
            let mut t1 = (e + lo) / f;
            let mut t2 = (e + hi) / f;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_max = t_max.min(t2);
            t_min = t_min.max(t1);
            if t_max < t_min {
                return None;
            }
        } else if e + lo > 0.0 || e + hi < 0.0 {
            // Parallel to this slab with the origin (at -e) outside it.
            return None;
        }
    }

    Some((t_min, t_max))
}

/// Nearest pickable object along `ray`.
///
/// Disabled objects and disabled bounding boxes are skipped. On equal
/// distances the candidate that came first wins.
pub fn pick<'a, I>(ray: &Ray, candidates: I, clip: (f32, f32)) -> Option<PickResult>
where
    I: IntoIterator<Item = &'a SceneObject>,
{
    let mut closest_result: Option<PickResult> = None;

    for object in candidates {
        if !object.is_pickable() {
            continue;
        }

        let Some((distance, _)) = ray_obb_intersection(ray, object.bounds(), object.matrix(), clip)
        else {
            log::trace!("Ray misses object {}", object.id());
            continue;
        };
        log::trace!("Ray enters object {} at t={distance}", object.id());

        if distance <= 0.0 {
            continue;
        }

        // Keep the closest intersection
        if closest_result
            .as_ref()
            .map_or(true, |result| distance < result.distance)
        {
            closest_result = Some(PickResult {
                object: object.id(),
                distance,
                intersection_point: ray.point_at(distance),
            });
        }
    }

    closest_result
}

/// Picks with the clip range of a projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectPicker {
    /// Nearest ray parameter that counts as a hit
    pub near: f32,
    /// Farthest ray parameter that counts as a hit
    pub far: f32,
}

impl ObjectPicker {
    /// Clip hits to the projection's near and far planes.
    pub fn new(projection: &Projection) -> Self {
        Self {
            near: projection.znear,
            far: projection.zfar,
        }
    }

    /// Nearest hit of an already-built ray.
    pub fn pick_ray<'a, I>(&self, ray: &Ray, candidates: I) -> Option<PickResult>
    where
        I: IntoIterator<Item = &'a SceneObject>,
    {
        let result = pick(ray, candidates, (self.near, self.far));
        match &result {
            Some(hit) => log::debug!("Picked object {} at t={:.3}", hit.object, hit.distance),
            None => log::debug!("Pick ray hit nothing"),
        }
        result
    }

    /// Pick an object from the scene using mouse coordinates
    pub fn pick_object<'a, I>(
        &self,
        screen_pos: (f32, f32),
        screen_size: (u32, u32),
        view: &ViewParams,
        projection: &Projection,
        candidates: I,
    ) -> Result<Option<PickResult>, PickingError>
    where
        I: IntoIterator<Item = &'a SceneObject>,
    {
        let ray = screen_to_ray(screen_pos, screen_size, view, projection)?;
        Ok(self.pick_ray(&ray, candidates))
    }
}
