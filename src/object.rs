//! Transformable 3D objects.
//!
//! An [`Object3D`] owns an immutable snapshot of the mesh it was created
//! from and a [`TransformState`]. Every mutator edits exactly one field of
//! that state and then re-derives the full vertex buffer from the original
//! snapshot — never from the previously derived vertices. Repeated
//! transforms therefore cannot accumulate floating-point drift: the
//! derived buffer is always a pure function of the originals plus the
//! current state.
//!
//! Faces, texture coordinates, and the texture handle are pass-through
//! data for a renderer; transforms never touch them.
//!
//! # Example
//!
//! ```
//! use gimbal::{MeshData, Object3D, Quaternion, Vec3};
//!
//! let mut cube = Object3D::new(MeshData::cube());
//! cube.set_position(Vec3::new(0.0, 2.0, 0.0));
//! cube.rotate(Quaternion::from_axis_angle(Vec3::Y, 0.1));
//!
//! // A renderer reads the derived vertices and unchanged faces.
//! let vertices = cube.vertices();
//! let faces = cube.faces();
//! ```

use glam::{Mat3, Vec2, Vec3};

use crate::mesh::{Face, MeshData, TextureId};
use crate::quaternion::Quaternion;
use crate::transform::{Rotation, Shear, TransformState};

/// A mesh instance with its own transform stack.
#[derive(Clone, Debug)]
pub struct Object3D {
    original_vertices: Vec<Vec3>,
    derived_vertices: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    faces: Vec<Face>,
    texture: Option<TextureId>,
    transform: TransformState,
}

impl Object3D {
    /// Creates an object from loaded mesh data with an identity transform.
    ///
    /// The mesh's positions become the immutable original vertices; indices
    /// are assumed valid (loaders validate before handing meshes over).
    pub fn new(mesh: MeshData) -> Self {
        let derived = mesh.positions.clone();
        Self {
            original_vertices: mesh.positions,
            derived_vertices: derived,
            texcoords: mesh.texcoords,
            faces: mesh.faces,
            texture: None,
            transform: TransformState::default(),
        }
    }

    /// Attaches an opaque renderer texture handle.
    pub fn texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    /// The vertices with the current transform applied.
    pub fn vertices(&self) -> &[Vec3] {
        &self.derived_vertices
    }

    /// The untransformed vertices as loaded.
    pub fn original_vertices(&self) -> &[Vec3] {
        &self.original_vertices
    }

    /// Faces, unchanged from load time.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Texture coordinates, unchanged from load time.
    pub fn texcoords(&self) -> &[Vec2] {
        &self.texcoords
    }

    /// The attached texture handle, if any.
    pub fn texture_id(&self) -> Option<TextureId> {
        self.texture
    }

    /// The current transform state.
    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    /// Moves the object by a delta in world space.
    pub fn translate(&mut self, delta: Vec3) {
        self.set_position(self.transform.position + delta);
    }

    /// Sets the absolute world-space position.
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.recompute();
    }

    /// Adds to the per-axis scale factors.
    pub fn scale(&mut self, delta: Vec3) {
        self.set_scale(self.transform.scale + delta);
    }

    /// Sets the absolute per-axis scale factors.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
        self.recompute();
    }

    /// Composes an incremental shear on top of the current one.
    ///
    /// The new shear matrix is `delta · current`; vertices are still
    /// re-derived from the originals, never from already-sheared data.
    pub fn shear(&mut self, delta: Shear) {
        self.transform.shear = delta.matrix() * self.transform.shear;
        self.recompute();
    }

    /// Replaces the shear outright.
    pub fn set_shear(&mut self, shear: Shear) {
        self.transform.shear = shear.matrix();
        self.recompute();
    }

    /// Composes a rotation on top of the current one, in world space.
    ///
    /// The active rotation becomes `normalize(q · current)` and the active
    /// mode becomes quaternion. If a matrix was active, the current
    /// rotation is taken as identity rather than converted; switching
    /// representations restarts the composition.
    pub fn rotate(&mut self, q: Quaternion) {
        let current = match self.transform.rotation {
            Rotation::Quaternion(current) => current,
            Rotation::Matrix(_) => Quaternion::IDENTITY,
        };
        self.transform.rotation = Rotation::Quaternion((q.normalize() * current).normalize());
        self.recompute();
    }

    /// Sets the absolute rotation from a quaternion (normalized on entry)
    /// and makes quaternion the active mode.
    pub fn set_rotation(&mut self, q: Quaternion) {
        self.transform.rotation = Rotation::Quaternion(q.normalize());
        self.recompute();
    }

    /// Composes a matrix rotation on top of the current one and makes
    /// matrix the active mode.
    ///
    /// The active rotation becomes `m · current`. If a quaternion was
    /// active, the current rotation is taken as the identity matrix.
    pub fn rotate_matrix(&mut self, m: Mat3) {
        let current = match self.transform.rotation {
            Rotation::Matrix(current) => current,
            Rotation::Quaternion(_) => Mat3::IDENTITY,
        };
        self.transform.rotation = Rotation::Matrix(m * current);
        self.recompute();
    }

    /// Sets the absolute rotation matrix and makes matrix the active mode.
    pub fn set_rotation_matrix(&mut self, m: Mat3) {
        self.transform.rotation = Rotation::Matrix(m);
        self.recompute();
    }

    /// Sets the pivot as a model-space point.
    pub fn set_pivot(&mut self, pivot: Vec3) {
        self.transform.pivot = pivot;
        self.recompute();
    }

    /// Sets the pivot from a world-space point.
    ///
    /// The point is carried into the object's local frame by inverse-
    /// rotating the offset from the current position, so a caller can
    /// pivot around any world location without knowing the local frame.
    pub fn set_pivot_world(&mut self, world_point: Vec3) {
        let local = self
            .transform
            .rotation
            .apply_inverse(world_point - self.transform.position);
        self.set_pivot(local);
    }

    /// Re-derives every vertex from the originals and the current state.
    fn recompute(&mut self) {
        let derived: Vec<Vec3> = self
            .original_vertices
            .iter()
            .map(|v| self.transform.apply_to_point(*v))
            .collect();
        self.derived_vertices = derived;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn single_vertex_object(v: Vec3) -> Object3D {
        Object3D::new(MeshData::new(vec![v], Vec::new(), Vec::new()))
    }

    fn assert_vertices_eq(a: &[Vec3], b: &[Vec3]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((*x - *y).length() < EPS, "{x:?} != {y:?}");
        }
    }

    #[test]
    fn quarter_turn_about_y_sends_x_to_negative_z() {
        let mut obj = single_vertex_object(Vec3::X);
        obj.rotate(Quaternion::from_axis_angle(
            Vec3::Y,
            std::f32::consts::FRAC_PI_2,
        ));
        assert!((obj.vertices()[0] - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn scale_doubles_x_extent_of_cube() {
        let mut cube = Object3D::new(MeshData::cube());
        cube.set_scale(Vec3::new(2.0, 1.0, 1.0));

        let xs: Vec<f32> = cube.vertices().iter().map(|v| v.x).collect();
        assert!((xs.iter().cloned().fold(f32::MIN, f32::max) - 2.0).abs() < EPS);
        assert!((xs.iter().cloned().fold(f32::MAX, f32::min) + 2.0).abs() < EPS);
        for (v, o) in cube.vertices().iter().zip(cube.original_vertices()) {
            assert!((v.y - o.y).abs() < EPS);
            assert!((v.z - o.z).abs() < EPS);
        }
    }

    #[test]
    fn setters_are_idempotent() {
        let mut a = Object3D::new(MeshData::cube());
        let mut b = Object3D::new(MeshData::cube());
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, 0.5, 0.0), 0.9);

        a.set_scale(Vec3::new(2.0, 3.0, 0.5));
        a.set_rotation(q);
        b.set_scale(Vec3::new(2.0, 3.0, 0.5));
        b.set_scale(Vec3::new(2.0, 3.0, 0.5));
        b.set_rotation(q);
        b.set_rotation(q);

        assert_vertices_eq(a.vertices(), b.vertices());
    }

    #[test]
    fn pivot_vertex_is_fixed_under_rotation_and_scale() {
        let corner = Vec3::new(1.0, 1.0, 1.0);
        let mut cube = Object3D::new(MeshData::cube());
        cube.set_pivot(corner);
        cube.rotate(Quaternion::from_axis_angle(Vec3::Z, 1.2));
        cube.set_scale(Vec3::new(3.0, 0.5, 2.0));

        // Corner 6 of the cube sits at the pivot.
        assert!((cube.vertices()[6] - corner).length() < EPS);

        // Translation is the only operation that moves it.
        cube.translate(Vec3::new(0.0, 5.0, 0.0));
        assert!((cube.vertices()[6] - Vec3::new(1.0, 6.0, 1.0)).length() < EPS);
    }

    #[test]
    fn incremental_rotations_compose_left() {
        let q1 = Quaternion::from_axis_angle(Vec3::Y, 0.4);
        let q2 = Quaternion::from_axis_angle(Vec3::X, -0.7);

        let mut incremental = Object3D::new(MeshData::cube());
        incremental.rotate(q1);
        incremental.rotate(q2);

        let mut absolute = Object3D::new(MeshData::cube());
        absolute.set_rotation(q2 * q1);

        assert_vertices_eq(incremental.vertices(), absolute.vertices());
    }

    #[test]
    fn translate_accumulates() {
        let mut obj = single_vertex_object(Vec3::ZERO);
        obj.translate(Vec3::new(1.0, 2.0, 3.0));
        obj.translate(Vec3::new(1.0, 2.0, 3.0));
        assert!((obj.vertices()[0] - Vec3::new(2.0, 4.0, 6.0)).length() < EPS);
    }

    #[test]
    fn additive_scale_adds_to_current_factor() {
        let mut obj = single_vertex_object(Vec3::ONE);
        obj.scale(Vec3::splat(1.0)); // 1 + 1 = 2 per axis
        assert!((obj.vertices()[0] - Vec3::splat(2.0)).length() < EPS);
        assert!((obj.transform().scale - Vec3::splat(2.0)).length() < EPS);
    }

    #[test]
    fn recompute_always_starts_from_originals() {
        let mut cube = Object3D::new(MeshData::cube());
        for _ in 0..100 {
            cube.set_scale(Vec3::splat(3.0));
        }
        cube.set_scale(Vec3::ONE);
        assert_vertices_eq(cube.vertices(), cube.original_vertices());
    }

    #[test]
    fn shear_composes_multiplicatively() {
        let delta = Shear {
            xy: 0.5,
            ..Shear::default()
        };
        let mut obj = single_vertex_object(Vec3::new(0.0, 1.0, 0.0));
        obj.shear(delta);
        obj.shear(delta);

        // delta.matrix() squared has xy = 1.0.
        assert!((obj.vertices()[0] - Vec3::new(1.0, 1.0, 0.0)).length() < EPS);
    }

    #[test]
    fn matrix_mode_starts_from_identity_when_quaternion_was_active() {
        let mut obj = single_vertex_object(Vec3::X);
        obj.set_rotation(Quaternion::from_axis_angle(Vec3::Y, 1.0));

        let quarter = Quaternion::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2)
            .to_rotation_matrix();
        obj.rotate_matrix(quarter);

        // The earlier quaternion is discarded, not converted.
        assert!(!obj.transform().rotation.is_quaternion());
        assert!((obj.vertices()[0] - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn quaternion_mode_starts_from_identity_when_matrix_was_active() {
        let mut obj = single_vertex_object(Vec3::X);
        obj.set_rotation_matrix(
            Quaternion::from_axis_angle(Vec3::Y, 1.0).to_rotation_matrix(),
        );

        obj.rotate(Quaternion::from_axis_angle(
            Vec3::Y,
            std::f32::consts::FRAC_PI_2,
        ));

        assert!(obj.transform().rotation.is_quaternion());
        assert!((obj.vertices()[0] - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn matrix_rotations_compose_left() {
        let a = Quaternion::from_axis_angle(Vec3::Y, 0.3).to_rotation_matrix();
        let b = Quaternion::from_axis_angle(Vec3::X, 0.8).to_rotation_matrix();

        let mut incremental = Object3D::new(MeshData::cube());
        incremental.rotate_matrix(a);
        incremental.rotate_matrix(b);

        let mut absolute = Object3D::new(MeshData::cube());
        absolute.set_rotation_matrix(b * a);

        assert_vertices_eq(incremental.vertices(), absolute.vertices());
    }

    #[test]
    fn world_pivot_maps_into_local_frame() {
        let mut obj = single_vertex_object(Vec3::ZERO);
        obj.set_position(Vec3::new(3.0, 2.0, 0.0));
        obj.set_pivot_world(Vec3::ZERO);
        assert!((obj.transform().pivot - Vec3::new(-3.0, -2.0, 0.0)).length() < EPS);

        // With a rotation active the offset is carried through its inverse.
        let q = Quaternion::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
        obj.set_rotation(q);
        obj.set_pivot_world(Vec3::ZERO);
        let expected = q.conjugate().rotate_vector(Vec3::new(-3.0, -2.0, 0.0));
        assert!((obj.transform().pivot - expected).length() < EPS);
    }

    #[test]
    fn faces_and_texcoords_pass_through_unchanged() {
        let mesh = MeshData::cube();
        let faces = mesh.faces.clone();
        let texcoords = mesh.texcoords.clone();

        let mut obj = Object3D::new(mesh).texture(TextureId(7));
        obj.rotate(Quaternion::from_axis_angle(Vec3::X, 1.0));
        obj.set_scale(Vec3::splat(4.0));

        assert_eq!(obj.faces(), faces.as_slice());
        assert_eq!(obj.texcoords(), texcoords.as_slice());
        assert_eq!(obj.texture_id(), Some(TextureId(7)));
    }
}
