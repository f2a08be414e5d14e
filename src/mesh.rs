//! CPU-side mesh data and built-in primitive shapes.
//!
//! A [`MeshData`] is what a loader hands to the transform pipeline: a flat
//! list of model-space positions, an optional list of texture coordinates,
//! and triangulated faces indexing into both. The pipeline never touches
//! faces or texcoords — they pass through to the renderer unchanged.
//!
//! Primitive shapes are plain constructor functions. There is no shape
//! hierarchy; a cube and a sphere differ only in the mesh they produce.
//!
//! # Example
//!
//! ```
//! use gimbal::{MeshData, Object3D};
//!
//! let cube = MeshData::cube();
//! let sphere = MeshData::sphere(32, 16);
//!
//! let object = Object3D::new(cube);
//! assert_eq!(object.vertices().len(), 8);
//! ```

use glam::{Vec2, Vec3};

/// Opaque handle to a texture owned by a renderer.
///
/// The transform pipeline stores and returns this value without
/// interpreting it. The newtype keeps texture handles from being confused
/// with vertex or face indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// One corner of a triangle: a vertex index plus an optional texcoord index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceVertex {
    /// Index into [`MeshData::positions`].
    pub vertex: usize,
    /// Index into [`MeshData::texcoords`], if the mesh carries any.
    pub texcoord: Option<usize>,
}

impl FaceVertex {
    /// A corner with no texture coordinate.
    pub fn position_only(vertex: usize) -> Self {
        Self {
            vertex,
            texcoord: None,
        }
    }

    /// A corner with a texture coordinate.
    pub fn textured(vertex: usize, texcoord: usize) -> Self {
        Self {
            vertex,
            texcoord: Some(texcoord),
        }
    }
}

/// A triangle. Loaders split quads before the mesh reaches this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    /// The three corners, counter-clockwise when viewed from outside.
    pub corners: [FaceVertex; 3],
}

impl Face {
    /// A triangle over three vertex indices, no texcoords.
    pub fn from_indices(a: usize, b: usize, c: usize) -> Self {
        Self {
            corners: [
                FaceVertex::position_only(a),
                FaceVertex::position_only(b),
                FaceVertex::position_only(c),
            ],
        }
    }
}

/// Raw mesh geometry as supplied by a loader or primitive generator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Model-space vertex positions.
    pub positions: Vec<Vec3>,
    /// Texture coordinates; may be empty for untextured meshes.
    pub texcoords: Vec<Vec2>,
    /// Triangulated faces indexing into the two lists above.
    pub faces: Vec<Face>,
}

impl MeshData {
    /// Creates mesh data from its parts.
    ///
    /// No validation happens here; loaders run [`MeshData::validate`]
    /// after parsing, and the primitive constructors below are correct by
    /// construction.
    pub fn new(positions: Vec<Vec3>, texcoords: Vec<Vec2>, faces: Vec<Face>) -> Self {
        Self {
            positions,
            texcoords,
            faces,
        }
    }

    /// Computes the axis-aligned bounding box as `(min, max)` corners.
    ///
    /// An empty mesh returns infinities.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in &self.positions {
            min = min.min(*p);
            max = max.max(*p);
        }
        (min, max)
    }

    /// Returns the center of the bounding box.
    pub fn center(&self) -> Vec3 {
        let (min, max) = self.bounds();
        (min + max) * 0.5
    }

    /// Returns the size of the bounding box.
    pub fn size(&self) -> Vec3 {
        let (min, max) = self.bounds();
        max - min
    }

    /// A cube with its 8 corners at ±1 on every axis.
    ///
    /// Each face is a quad split into two triangles, with the full [0,1]
    /// texture range mapped across the quad.
    pub fn cube() -> Self {
        let positions = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ];
        let texcoords = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];

        // Two textured triangles per quad, corners CCW from outside.
        fn quad(faces: &mut Vec<Face>, a: usize, b: usize, c: usize, d: usize) {
            faces.push(Face {
                corners: [
                    FaceVertex::textured(a, 0),
                    FaceVertex::textured(b, 1),
                    FaceVertex::textured(c, 2),
                ],
            });
            faces.push(Face {
                corners: [
                    FaceVertex::textured(a, 0),
                    FaceVertex::textured(c, 2),
                    FaceVertex::textured(d, 3),
                ],
            });
        }

        let mut faces = Vec::with_capacity(12);
        quad(&mut faces, 4, 5, 6, 7); // front  (z+)
        quad(&mut faces, 1, 0, 3, 2); // back   (z-)
        quad(&mut faces, 7, 6, 2, 3); // top    (y+)
        quad(&mut faces, 0, 1, 5, 4); // bottom (y-)
        quad(&mut faces, 5, 1, 2, 6); // right  (x+)
        quad(&mut faces, 0, 4, 7, 3); // left   (x-)

        Self::new(positions, texcoords, faces)
    }

    /// A regular tetrahedron inscribed in the ±1 cube, untextured.
    pub fn tetrahedron() -> Self {
        let positions = vec![
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
        ];
        let faces = vec![
            Face::from_indices(0, 1, 2),
            Face::from_indices(0, 3, 1),
            Face::from_indices(0, 2, 3),
            Face::from_indices(1, 3, 2),
        ];
        Self::new(positions, Vec::new(), faces)
    }

    /// A square pyramid: base corners at (±1, −1, ±1), apex at (0, 1, 0).
    pub fn pyramid() -> Self {
        let positions = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![
            // Sides, CCW from outside.
            Face::from_indices(0, 4, 1),
            Face::from_indices(1, 4, 2),
            Face::from_indices(2, 4, 3),
            Face::from_indices(3, 4, 0),
            // Base, facing down.
            Face::from_indices(0, 1, 2),
            Face::from_indices(0, 2, 3),
        ];
        Self::new(positions, Vec::new(), faces)
    }

    /// A UV sphere of radius 1 with equirectangular texture coordinates.
    ///
    /// `segments` divides the equator, `rings` divides pole to pole. The
    /// vertex grid has `(segments + 1) × (rings + 1)` entries so the seam
    /// column can carry its own texcoords.
    pub fn sphere(segments: u32, rings: u32) -> Self {
        let mut positions = Vec::new();
        let mut texcoords = Vec::new();
        let mut faces = Vec::new();

        for ring in 0..=rings {
            let phi = std::f32::consts::PI * ring as f32 / rings as f32;
            let y = phi.cos();
            let ring_radius = phi.sin();

            for seg in 0..=segments {
                let theta = 2.0 * std::f32::consts::PI * seg as f32 / segments as f32;
                positions.push(Vec3::new(
                    ring_radius * theta.cos(),
                    y,
                    ring_radius * theta.sin(),
                ));
                texcoords.push(Vec2::new(
                    seg as f32 / segments as f32,
                    ring as f32 / rings as f32,
                ));
            }
        }

        for ring in 0..rings {
            for seg in 0..segments {
                let current = (ring * (segments + 1) + seg) as usize;
                let next = current + segments as usize + 1;

                faces.push(Face {
                    corners: [
                        FaceVertex::textured(current, current),
                        FaceVertex::textured(next, next),
                        FaceVertex::textured(current + 1, current + 1),
                    ],
                });
                faces.push(Face {
                    corners: [
                        FaceVertex::textured(current + 1, current + 1),
                        FaceVertex::textured(next, next),
                        FaceVertex::textured(next + 1, next + 1),
                    ],
                });
            }
        }

        Self::new(positions, texcoords, faces)
    }

    /// A square plane of the given size on the XZ axes, facing +Y.
    pub fn plane(size: f32) -> Self {
        let half = size * 0.5;
        let positions = vec![
            Vec3::new(-half, 0.0, -half),
            Vec3::new(half, 0.0, -half),
            Vec3::new(half, 0.0, half),
            Vec3::new(-half, 0.0, half),
        ];
        let texcoords = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let faces = vec![
            Face {
                corners: [
                    FaceVertex::textured(0, 0),
                    FaceVertex::textured(3, 3),
                    FaceVertex::textured(2, 2),
                ],
            },
            Face {
                corners: [
                    FaceVertex::textured(0, 0),
                    FaceVertex::textured(2, 2),
                    FaceVertex::textured(1, 1),
                ],
            },
        ];
        Self::new(positions, texcoords, faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_spans_plus_minus_one() {
        let cube = MeshData::cube();
        let (min, max) = cube.bounds();
        assert_eq!(min, Vec3::splat(-1.0));
        assert_eq!(max, Vec3::splat(1.0));
        assert_eq!(cube.positions.len(), 8);
        assert_eq!(cube.faces.len(), 12);
    }

    #[test]
    fn primitives_have_valid_indices() {
        for mesh in [
            MeshData::cube(),
            MeshData::tetrahedron(),
            MeshData::pyramid(),
            MeshData::sphere(8, 4),
            MeshData::plane(2.0),
        ] {
            mesh.validate().expect("primitive indices in range");
        }
    }

    #[test]
    fn sphere_grid_has_seam_column() {
        let sphere = MeshData::sphere(8, 4);
        assert_eq!(sphere.positions.len(), 9 * 5);
        assert_eq!(sphere.texcoords.len(), sphere.positions.len());
        assert_eq!(sphere.faces.len(), 8 * 4 * 2);
    }

    #[test]
    fn plane_size_matches_request() {
        let plane = MeshData::plane(10.0);
        let size = plane.size();
        assert_eq!(size, Vec3::new(10.0, 0.0, 10.0));
        assert_eq!(plane.center(), Vec3::ZERO);
    }

    #[test]
    fn tetrahedron_is_closed() {
        let tet = MeshData::tetrahedron();
        assert_eq!(tet.positions.len(), 4);
        assert_eq!(tet.faces.len(), 4);
        assert!(tet.texcoords.is_empty());
    }
}
