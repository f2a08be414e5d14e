//! A free-fly camera driven by yaw and pitch.
//!
//! The camera is a continuous-parameter object: position plus two angles.
//! Pitch saturates at ±89° so the look direction can never reach the
//! vertical singularity where the view basis degenerates. The orthonormal
//! forward/right/up basis is re-derived from the angles on every query,
//! never cached.
//!
//! # Example
//!
//! ```
//! use gimbal::{Camera, Keymap, Vec3};
//!
//! let mut camera = Camera::new()
//!     .position(Vec3::new(0.0, 1.8, 5.0))
//!     .keymap(Keymap::qwerty());
//!
//! camera.process_mouse_motion(12.0, -4.0);
//! let (forward, right, up) = camera.direction_vectors();
//! ```
//!
//! # Convention
//!
//! Right-handed, +Y up. Yaw 0 with pitch 0 looks toward −Z; positive yaw
//! turns right, positive pitch looks up.

use glam::{Mat3, Vec3};

use crate::input::{Input, Keymap};

/// A yaw/pitch camera for free-fly navigation and view transforms.
#[derive(Clone, Debug)]
pub struct Camera {
    /// World-space position.
    pub position: Vec3,
    /// Horizontal angle in radians; 0 looks toward −Z.
    pub yaw: f32,
    /// Vertical angle in radians, clamped to ±[`Camera::PITCH_LIMIT`].
    pub pitch: f32,
    /// Radians of rotation per unit of mouse movement.
    pub sensitivity: f32,
    /// Movement speed in units per second.
    pub speed: f32,
    /// Movement bindings, fixed at construction.
    pub bindings: Keymap,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: 0.003,
            speed: 5.0,
            bindings: Keymap::default(),
        }
    }
}

impl Camera {
    /// Pitch saturates at ±89° (in radians), just short of straight up or
    /// down, so `direction_vectors` always has a well-defined right vector.
    pub const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the starting position.
    pub fn position(mut self, position: impl Into<Vec3>) -> Self {
        self.position = position.into();
        self
    }

    /// Sets the initial yaw in radians.
    pub fn yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    /// Sets the initial pitch in radians, clamped to the pitch limit.
    pub fn pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        self
    }

    /// Sets mouse sensitivity.
    pub fn sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Sets movement speed in units per second.
    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the movement keybindings.
    pub fn keymap(mut self, bindings: Keymap) -> Self {
        self.bindings = bindings;
        self
    }

    /// Integrates a mouse movement into yaw and pitch.
    ///
    /// The vertical axis is inverted so moving the mouse up looks up.
    /// Pitch saturates at the limit; it does not wrap.
    pub fn process_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// The unit view direction for the current yaw and pitch.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            -self.pitch.cos() * self.yaw.cos(),
        )
        .normalize_or_zero()
    }

    /// The orthonormal view basis `(forward, right, up)`.
    ///
    /// `up` is re-derived from `right × forward` rather than assumed to be
    /// world up, so the basis stays mutually orthonormal as pitch
    /// approaches the clamp.
    pub fn direction_vectors(&self) -> (Vec3, Vec3, Vec3) {
        let forward = self.forward();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        (forward, right, up)
    }

    /// Moves the camera along its basis for every held movement key.
    ///
    /// Directions are evaluated fresh from the current yaw/pitch; each
    /// held key contributes a full `speed · dt` step along its axis.
    pub fn update_position(&mut self, input: &Input, dt: f32) {
        let (forward, right, up) = self.direction_vectors();
        let step = self.speed * dt;

        if input.key_down(self.bindings.forward) {
            self.position += forward * step;
        }
        if input.key_down(self.bindings.backward) {
            self.position -= forward * step;
        }
        if input.key_down(self.bindings.right) {
            self.position += right * step;
        }
        if input.key_down(self.bindings.left) {
            self.position -= right * step;
        }
        if input.key_down(self.bindings.up) {
            self.position += up * step;
        }
        if input.key_down(self.bindings.down) {
            self.position -= up * step;
        }
    }

    /// Maps a world-space point into the camera's frame.
    ///
    /// Undoes the camera rotation — pitch and yaw matrices built with the
    /// opposing angles, pitch applied last — after subtracting the camera
    /// position. In the result the view direction is −Z, right is +X, and
    /// up is +Y, ready for a software projector.
    pub fn world_to_camera(&self, point: Vec3) -> Vec3 {
        let view = Mat3::from_rotation_x(-self.pitch) * Mat3::from_rotation_y(self.yaw);
        view * (point - self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    const EPS: f32 = 1e-5;

    #[test]
    fn yaw_zero_faces_negative_z() {
        let camera = Camera::new();
        assert!((camera.forward() - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn mouse_up_looks_up() {
        let mut camera = Camera::new();
        camera.process_mouse_motion(0.0, -10.0);
        assert!(camera.pitch > 0.0);
    }

    #[test]
    fn pitch_saturates_at_the_limit() {
        let mut camera = Camera::new();
        for _ in 0..100 {
            camera.process_mouse_motion(0.0, 1000.0);
        }
        assert_eq!(camera.pitch, -Camera::PITCH_LIMIT);

        for _ in 0..100 {
            camera.process_mouse_motion(0.0, -1000.0);
        }
        assert_eq!(camera.pitch, Camera::PITCH_LIMIT);
    }

    #[test]
    fn basis_stays_orthonormal_near_the_clamp() {
        let camera = Camera::new().yaw(1.3).pitch(Camera::PITCH_LIMIT);
        let (forward, right, up) = camera.direction_vectors();

        assert!((forward.length() - 1.0).abs() < EPS);
        assert!((right.length() - 1.0).abs() < EPS);
        assert!((up.length() - 1.0).abs() < EPS);
        assert!(forward.dot(right).abs() < EPS);
        assert!(forward.dot(up).abs() < EPS);
        assert!(right.dot(up).abs() < EPS);
    }

    #[test]
    fn movement_follows_the_view_direction() {
        let mut camera = Camera::new().position(Vec3::ZERO).yaw(0.7).pitch(0.2);
        let forward = camera.forward();

        let mut input = Input::new();
        input.press_key(KeyCode::KeyW);
        camera.update_position(&input, 0.5);

        let expected = forward * camera.speed * 0.5;
        assert!((camera.position - expected).length() < EPS);
    }

    #[test]
    fn released_keys_do_not_move_the_camera() {
        let mut camera = Camera::new();
        let start = camera.position;

        let mut input = Input::new();
        input.press_key(KeyCode::KeyW);
        input.release_key(KeyCode::KeyW);
        camera.update_position(&input, 1.0);

        assert!((camera.position - start).length() < EPS);
    }

    #[test]
    fn world_to_camera_puts_the_view_direction_on_negative_z() {
        let camera = Camera::new()
            .position(Vec3::new(2.0, -1.0, 4.0))
            .yaw(0.7)
            .pitch(0.3);

        let ahead = camera.position + camera.forward() * 2.0;
        let mapped = camera.world_to_camera(ahead);
        assert!((mapped - Vec3::new(0.0, 0.0, -2.0)).length() < EPS);

        let (_, right, _) = camera.direction_vectors();
        let beside = camera.position + right;
        let mapped = camera.world_to_camera(beside);
        assert!((mapped - Vec3::new(1.0, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn camera_origin_maps_to_origin() {
        let camera = Camera::new().position(Vec3::new(9.0, 9.0, 9.0)).yaw(2.0);
        assert!(camera.world_to_camera(camera.position).length() < EPS);
    }
}
