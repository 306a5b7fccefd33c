use cgmath::Vector3;

use crate::{error::SceneError, gfx::picking::BoundingBox};

use super::{MeshData, ObjectTemplate, Topology};

/// Generates a unit cube in `[0, 1]^3` with quad faces.
///
/// Corner colors follow the corner coordinates, so the cube doubles as an
/// orientation reference: the black corner sits at the local origin.
pub fn cube() -> ObjectTemplate {
    let positions = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];
    let colors = positions.clone();

    #[rustfmt::skip]
    let surfaces = vec![
        0, 1, 2, 3,
        3, 2, 6, 7,
        1, 0, 4, 5,
        2, 1, 5, 6,
        0, 3, 7, 4,
        7, 6, 5, 4,
    ];

    #[rustfmt::skip]
    let edges = vec![
        0, 1,  1, 2,  2, 3,  3, 0,
        0, 4,  1, 5,  2, 6,  3, 7,
        4, 5,  5, 6,  6, 7,  7, 4,
    ];

    ObjectTemplate {
        mesh: MeshData {
            positions,
            colors,
            surfaces,
            edges,
            topology: Topology::Quads,
        },
        bounds: BoundingBox::unit(),
        origin: Vector3::new(0.5, 0.5, 0.5),
    }
}

/// Builds a template from a flat triangle list (three positions per face),
/// e.g. the faces pulled out of an imported drawing.
///
/// With `normalize`, every axis is remapped so the geometry fills `[0, 1]`;
/// an axis with no extent is left at 0. Bounds are the vertex min/max and the
/// pivot is their centre. Trailing positions that do not complete a triangle
/// are dropped.
pub fn from_triangles(
    mut positions: Vec<[f32; 3]>,
    normalize: bool,
    color: [f32; 3],
) -> Result<ObjectTemplate, SceneError> {
    positions.truncate(positions.len() - positions.len() % 3);
    if positions.is_empty() {
        return Err(SceneError::EmptyMesh);
    }

    let mut bounds = BoundingBox::from_points(&positions).ok_or(SceneError::EmptyMesh)?;

    if normalize {
        let min = bounds.begin;
        let extent = bounds.end - bounds.begin;
        for p in &mut positions {
            for axis in 0..3 {
                p[axis] = if extent[axis] > 0.0 {
                    (p[axis] - min[axis]) / extent[axis]
                } else {
                    0.0
                };
            }
        }
        bounds = BoundingBox::from_points(&positions).ok_or(SceneError::EmptyMesh)?;
    }

    let count = positions.len() as u32;
    let surfaces: Vec<u32> = (0..count).collect();
    let edges: Vec<u32> = (0..count)
        .step_by(3)
        .flat_map(|i| [i, i + 1, i + 1, i + 2, i + 2, i])
        .collect();

    let origin = (bounds.begin + bounds.end) * 0.5;
    let mesh = MeshData {
        colors: vec![color; positions.len()],
        positions,
        surfaces,
        edges,
        topology: Topology::Triangles,
    };
    mesh.validate()?;

    log::debug!(
        "Built triangle template: {} faces, bounds {:?}..{:?}",
        mesh.primitive_count(),
        bounds.begin,
        bounds.end
    );

    Ok(ObjectTemplate {
        mesh,
        bounds,
        origin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_is_consistent() {
        let cube = cube();
        assert!(cube.mesh.validate().is_ok());
        assert_eq!(cube.mesh.vertex_count(), 8);
        assert_eq!(cube.mesh.primitive_count(), 6);
        assert_eq!(cube.mesh.edges.len(), 24);
        assert_eq!(cube.bounds.begin, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(cube.bounds.end, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn triangles_without_normalization_keep_coordinates() {
        let template = from_triangles(
            vec![[2.0, 0.0, -1.0], [4.0, 0.0, -1.0], [2.0, 6.0, 3.0]],
            false,
            [1.0, 0.0, 0.0],
        )
        .unwrap();
        assert_eq!(template.bounds.begin, Vector3::new(2.0, 0.0, -1.0));
        assert_eq!(template.bounds.end, Vector3::new(4.0, 6.0, 3.0));
        assert_eq!(template.origin, Vector3::new(3.0, 3.0, 1.0));
        assert_eq!(template.mesh.edges, vec![0, 1, 1, 2, 2, 0]);
    }

    #[test]
    fn normalization_fills_unit_box() {
        let template = from_triangles(
            vec![
                [10.0, 5.0, 7.0],
                [30.0, 5.0, 7.0],
                [10.0, 25.0, 7.0],
                [30.0, 25.0, 7.0],
            ],
            true,
            [0.0, 0.0, 0.0],
        )
        .unwrap();

        // The fourth vertex does not complete a face and is dropped.
        assert_eq!(template.mesh.vertex_count(), 3);
        assert_eq!(template.bounds.begin, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(template.bounds.end, Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(template.origin, Vector3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            from_triangles(vec![[0.0; 3]; 2], true, [1.0; 3]),
            Err(SceneError::EmptyMesh)
        );
    }
}
