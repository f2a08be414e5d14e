//! Transform state: the affine stack applied to an object's geometry.
//!
//! A [`TransformState`] holds translation, per-axis scale, shear, rotation,
//! and the pivot the shape-changing operations are centered on. The
//! rotation is a tagged [`Rotation`] value — either a quaternion or a 3×3
//! matrix, never both — so there is no flag to fall out of sync with the
//! data it guards.
//!
//! [`TransformState::apply_to_point`] is the single derivation function:
//! every vertex goes through scale → shear → rotate (pivot-relative), then
//! translation. The order is a fixed design choice; reordering changes the
//! result whenever more than one component is non-identity.

use glam::{Mat3, Vec3};

use crate::quaternion::Quaternion;

/// The active rotation of an object: quaternion or matrix, exclusively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rotation {
    /// A unit quaternion.
    Quaternion(Quaternion),
    /// A pure 3×3 rotation matrix.
    Matrix(Mat3),
}

impl Default for Rotation {
    fn default() -> Self {
        Self::Quaternion(Quaternion::IDENTITY)
    }
}

impl Rotation {
    /// Rotates a vector by the active representation.
    pub fn apply(&self, v: Vec3) -> Vec3 {
        match self {
            Self::Quaternion(q) => q.rotate_vector(v),
            Self::Matrix(m) => *m * v,
        }
    }

    /// Rotates a vector by the inverse rotation.
    ///
    /// The inverse of a unit quaternion is its conjugate; the inverse of a
    /// pure rotation matrix is its transpose.
    pub fn apply_inverse(&self, v: Vec3) -> Vec3 {
        match self {
            Self::Quaternion(q) => q.conjugate().rotate_vector(v),
            Self::Matrix(m) => m.transpose() * v,
        }
    }

    /// Returns true if the quaternion representation is active.
    pub fn is_quaternion(&self) -> bool {
        matches!(self, Self::Quaternion(_))
    }
}

/// Off-diagonal shear coefficients.
///
/// `xy` reads "x picks up y": the output x coordinate gains `xy * y`.
/// All six coefficients default to zero (no shear).
///
/// # Example
///
/// ```
/// use gimbal::Shear;
///
/// let shear = Shear {
///     xy: 0.5,
///     ..Shear::default()
/// };
/// let m = shear.matrix();
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shear {
    /// Contribution of y to x.
    pub xy: f32,
    /// Contribution of z to x.
    pub xz: f32,
    /// Contribution of x to y.
    pub yx: f32,
    /// Contribution of z to y.
    pub yz: f32,
    /// Contribution of x to z.
    pub zx: f32,
    /// Contribution of y to z.
    pub zy: f32,
}

impl Shear {
    /// Builds the unit-diagonal shear matrix
    ///
    /// ```text
    /// | 1  xy xz |
    /// | yx 1  yz |
    /// | zx zy 1  |
    /// ```
    pub fn matrix(&self) -> Mat3 {
        Mat3::from_cols(
            Vec3::new(1.0, self.yx, self.zx),
            Vec3::new(self.xy, 1.0, self.zy),
            Vec3::new(self.xz, self.yz, 1.0),
        )
    }
}

/// Position, scale, shear, rotation, and pivot for one object.
///
/// Owned exclusively by an [`Object3D`](crate::Object3D); the object's
/// mutators edit one field at a time and re-derive the vertex buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    /// World-space translation, applied last and independent of the pivot.
    pub position: Vec3,
    /// Per-axis scale factors applied to pivot-relative coordinates.
    pub scale: Vec3,
    /// Unit-diagonal shear matrix.
    pub shear: Mat3,
    /// Active rotation (quaternion or matrix).
    pub rotation: Rotation,
    /// Model-space point that scale, shear, and rotation are centered on.
    pub pivot: Vec3,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            shear: Mat3::IDENTITY,
            rotation: Rotation::default(),
            pivot: Vec3::ZERO,
        }
    }
}

impl TransformState {
    /// Maps a model-space point through the full transform chain.
    ///
    /// Order: pivot-relative → scale → shear → rotate → back to pivot →
    /// translate.
    pub fn apply_to_point(&self, v: Vec3) -> Vec3 {
        let relative = v - self.pivot;
        let scaled = relative * self.scale;
        let sheared = self.shear * scaled;
        let rotated = self.rotation.apply(sheared);
        rotated + self.pivot + self.position
    }
}
