//! Quaternion algebra for 3D rotations.
//!
//! This module provides [`Quaternion`], the primary rotation representation
//! used by the transform pipeline. Quaternions compose without gimbal lock,
//! interpolate cleanly, and convert to and from 3×3 rotation matrices for
//! consumers that prefer the matrix form.
//!
//! Quaternions here are plain value types: every operation returns a new
//! quaternion and nothing mutates its operands.
//!
//! # Example
//!
//! ```
//! use gimbal::{Quaternion, Vec3};
//!
//! // 90 degrees around the Y axis
//! let q = Quaternion::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
//!
//! let rotated = q.rotate_vector(Vec3::new(1.0, 0.0, 0.0));
//! assert!((rotated - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
//! ```
//!
//! # Convention
//!
//! All rotations are right-handed: a positive angle rotates
//! counterclockwise when viewed from the positive end of the axis, so a
//! 90° rotation about +Y carries +X onto −Z.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::{Mat3, Vec3};
use rand::Rng;

/// A rotation represented as w + xi + yj + zk.
///
/// A quaternion must be unit-norm before it is used as a rotation; call
/// [`Quaternion::normalize`] after composing or constructing from raw
/// components. The algebra itself (addition, multiplication, conjugation)
/// is defined for arbitrary quaternions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    /// Real (scalar) part.
    pub w: f32,
    /// i component.
    pub x: f32,
    /// j component.
    pub y: f32,
    /// k component.
    pub z: f32,
}

impl Quaternion {
    /// The identity rotation (1, 0, 0, 0).
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Creates a quaternion from raw components. No normalization is
    /// performed.
    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Creates a unit quaternion rotating by `angle` radians around `axis`.
    ///
    /// The axis does not need to be normalized. A zero axis yields the
    /// identity rotation.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let (sin, cos) = (angle * 0.5).sin_cos();
        Self {
            w: cos,
            x: axis.x * sin,
            y: axis.y * sin,
            z: axis.z * sin,
        }
    }

    /// Returns the conjugate (negated vector part).
    ///
    /// For a unit quaternion the conjugate is also the inverse rotation.
    pub fn conjugate(self) -> Self {
        Self {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Returns the Euclidean norm `sqrt(w² + x² + y² + z²)`.
    pub fn norm(self) -> f32 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns this quaternion scaled to unit norm.
    ///
    /// The zero quaternion has no direction to preserve; it normalizes to
    /// the identity rotation instead of dividing by zero. Normalizing an
    /// already-unit quaternion is a no-op (up to rounding).
    pub fn normalize(self) -> Self {
        let n = self.norm();
        if n == 0.0 {
            return Self::IDENTITY;
        }
        Self {
            w: self.w / n,
            x: self.x / n,
            y: self.y / n,
            z: self.z / n,
        }
    }

    /// Rotates a vector by this quaternion.
    ///
    /// Computes `q · (0, v) · q*` and returns the vector part. The
    /// quaternion must be unit-norm for this to be a rigid rotation;
    /// callers that store rotations normalize before storing.
    pub fn rotate_vector(self, v: Vec3) -> Vec3 {
        let v_q = Self::new(0.0, v.x, v.y, v.z);
        let rotated = self * v_q * self.conjugate();
        Vec3::new(rotated.x, rotated.y, rotated.z)
    }

    /// Converts this quaternion to a 3×3 rotation matrix.
    ///
    /// Expects a unit quaternion; the resulting matrix rotates column
    /// vectors by the same rotation as [`Quaternion::rotate_vector`].
    pub fn to_rotation_matrix(self) -> Mat3 {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);
        Mat3::from_cols(
            Vec3::new(
                1.0 - 2.0 * y * y - 2.0 * z * z,
                2.0 * x * y + 2.0 * w * z,
                2.0 * x * z - 2.0 * w * y,
            ),
            Vec3::new(
                2.0 * x * y - 2.0 * w * z,
                1.0 - 2.0 * x * x - 2.0 * z * z,
                2.0 * y * z + 2.0 * w * x,
            ),
            Vec3::new(
                2.0 * x * z + 2.0 * w * y,
                2.0 * y * z - 2.0 * w * x,
                1.0 - 2.0 * x * x - 2.0 * y * y,
            ),
        )
    }

    /// Extracts a quaternion from a pure rotation matrix.
    ///
    /// Uses Shepperd's method: branch on the trace or the largest diagonal
    /// entry so the square root always acts on a positive quantity, which
    /// stays numerically stable near trace ≈ −1 (180° rotations). The
    /// result is normalized.
    ///
    /// Note the double cover: `q` and `−q` encode the same rotation, so
    /// round-tripping through a matrix may flip every component's sign.
    pub fn from_rotation_matrix(m: Mat3) -> Self {
        // c[col][row]; m_rc below reads row r, column c.
        let c = m.to_cols_array_2d();
        let (m00, m01, m02) = (c[0][0], c[1][0], c[2][0]);
        let (m10, m11, m12) = (c[0][1], c[1][1], c[2][1]);
        let (m20, m21, m22) = (c[0][2], c[1][2], c[2][2]);

        let trace = m00 + m11 + m22;

        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0; // s = 4w
            Self {
                w: 0.25 * s,
                x: (m21 - m12) / s,
                y: (m02 - m20) / s,
                z: (m10 - m01) / s,
            }
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0; // s = 4x
            Self {
                w: (m21 - m12) / s,
                x: 0.25 * s,
                y: (m01 + m10) / s,
                z: (m02 + m20) / s,
            }
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0; // s = 4y
            Self {
                w: (m02 - m20) / s,
                x: (m01 + m10) / s,
                y: 0.25 * s,
                z: (m12 + m21) / s,
            }
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0; // s = 4z
            Self {
                w: (m10 - m01) / s,
                x: (m02 + m20) / s,
                y: (m12 + m21) / s,
                z: 0.25 * s,
            }
        };

        q.normalize()
    }

    /// Generates a random unit quaternion.
    ///
    /// Samples each component uniformly in [−1, 1] and normalizes. This is
    /// NOT a uniform distribution over rotations: normalizing cube samples
    /// weights directions toward the cube's corners relative to its face
    /// centers. Good enough for jitter and tests; use a proper SO(3)
    /// sampler if statistical uniformity matters.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            w: rng.gen_range(-1.0..=1.0),
            x: rng.gen_range(-1.0..=1.0),
            y: rng.gen_range(-1.0..=1.0),
            z: rng.gen_range(-1.0..=1.0),
        }
        .normalize()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add for Quaternion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            w: self.w + rhs.w,
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Quaternion {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            w: self.w - rhs.w,
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Mul for Quaternion {
    type Output = Self;

    /// Hamilton product. Not commutative: `a * b` rotates by `b` first,
    /// then `a`.
    fn mul(self, rhs: Self) -> Self {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self {
            w: self.w * rhs,
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            w: -self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quaternion({}, {}, {}, {})",
            self.w, self.x, self.y, self.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_quat_eq(a: Quaternion, b: Quaternion) {
        assert!(
            (a.w - b.w).abs() < EPS
                && (a.x - b.x).abs() < EPS
                && (a.y - b.y).abs() < EPS
                && (a.z - b.z).abs() < EPS,
            "{} != {}",
            a,
            b
        );
    }

    /// Equal up to the double-cover sign ambiguity.
    fn assert_same_rotation(a: Quaternion, b: Quaternion) {
        if (a.w - b.w).abs() < EPS {
            assert_quat_eq(a, b);
        } else {
            assert_quat_eq(a, -b);
        }
    }

    #[test]
    fn add_sub_are_componentwise() {
        let a = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let b = Quaternion::new(5.0, 6.0, 7.0, 8.0);
        assert_quat_eq(a + b, Quaternion::new(6.0, 8.0, 10.0, 12.0));
        assert_quat_eq(b - a, Quaternion::new(4.0, 4.0, 4.0, 4.0));
    }

    #[test]
    fn scalar_multiply_scales_all_components() {
        let q = Quaternion::new(1.0, -2.0, 3.0, -4.0);
        assert_quat_eq(q * 2.0, Quaternion::new(2.0, -4.0, 6.0, -8.0));
    }

    #[test]
    fn normalize_produces_unit_norm() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0).normalize();
        assert!((q.norm() - 1.0).abs() < EPS);
    }

    #[test]
    fn normalize_is_idempotent() {
        let q = Quaternion::new(0.3, -0.4, 0.5, 0.1).normalize();
        assert_quat_eq(q, q.normalize());
    }

    #[test]
    fn normalize_zero_falls_back_to_identity() {
        let q = Quaternion::new(0.0, 0.0, 0.0, 0.0).normalize();
        assert_quat_eq(q, Quaternion::IDENTITY);
    }

    #[test]
    fn multiplication_is_associative() {
        let a = Quaternion::from_axis_angle(Vec3::X, 0.7);
        let b = Quaternion::from_axis_angle(Vec3::Y, -1.2);
        let c = Quaternion::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.4);
        assert_quat_eq((a * b) * c, a * (b * c));
    }

    #[test]
    fn multiplication_is_not_commutative() {
        let a = Quaternion::from_axis_angle(Vec3::X, 0.7);
        let b = Quaternion::from_axis_angle(Vec3::Y, -1.2);
        let ab = a * b;
        let ba = b * a;
        let diff = (ab.w - ba.w).abs()
            + (ab.x - ba.x).abs()
            + (ab.y - ba.y).abs()
            + (ab.z - ba.z).abs();
        assert!(diff > 1e-3);
    }

    #[test]
    fn conjugate_rotation_round_trips_vectors() {
        let q = Quaternion::from_axis_angle(Vec3::new(0.3, -1.0, 0.5), 1.1);
        let v = Vec3::new(2.0, -3.0, 0.5);
        let back = q.conjugate().rotate_vector(q.rotate_vector(v));
        assert!((back - v).length() < EPS);
    }

    #[test]
    fn quarter_turn_about_y_maps_x_to_negative_z() {
        let q = Quaternion::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
        let rotated = q.rotate_vector(Vec3::X);
        assert!((rotated - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn matrix_round_trip_recovers_rotation() {
        let cases = [
            Quaternion::from_axis_angle(Vec3::Y, 0.5),
            Quaternion::from_axis_angle(Vec3::new(1.0, 2.0, -0.5), 2.8),
            // 180-degree rotations push the trace to -1 and exercise the
            // diagonal branches of the extraction.
            Quaternion::from_axis_angle(Vec3::X, std::f32::consts::PI),
            Quaternion::from_axis_angle(Vec3::Y, std::f32::consts::PI),
            Quaternion::from_axis_angle(Vec3::Z, std::f32::consts::PI),
        ];
        for q in cases {
            let back = Quaternion::from_rotation_matrix(q.to_rotation_matrix());
            assert_same_rotation(back, q);
        }
    }

    #[test]
    fn matrix_agrees_with_rotate_vector() {
        let q = Quaternion::from_axis_angle(Vec3::new(-0.2, 0.9, 0.4), 1.9);
        let m = q.to_rotation_matrix();
        let v = Vec3::new(1.5, -0.25, 3.0);
        assert!((m * v - q.rotate_vector(v)).length() < EPS);
    }

    #[test]
    fn random_is_unit_norm() {
        for _ in 0..32 {
            assert!((Quaternion::random().norm() - 1.0).abs() < EPS);
        }
    }
}
