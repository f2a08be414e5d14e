//! # Gimbal
//!
//! **A 3D object transform pipeline that stays out of your renderer.**
//!
//! Gimbal owns the math between "mesh on disk" and "vertices to draw":
//! quaternion rotations, pivot-relative scale/shear/rotate/translate
//! stacks, and a free-fly camera. It issues no draw calls and opens no
//! windows — a renderer reads the derived vertex buffers and the
//! pass-through face, texcoord, and texture-handle data.
//!
//! ## Quick Start
//!
//! ```
//! use gimbal::{MeshData, Object3D, Quaternion, Scene, Vec3};
//!
//! let mut scene = Scene::new();
//! scene.insert("cube", Object3D::new(MeshData::cube()));
//!
//! // Spin the cube a degree per frame around Y.
//! let step = Quaternion::from_axis_angle(Vec3::Y, 1.0_f32.to_radians());
//! if let Some(cube) = scene.get_mut("cube") {
//!     cube.rotate(step);
//! }
//!
//! // Hand the renderer what it needs.
//! for (_name, object) in scene.objects() {
//!     let _vertices = object.vertices();
//!     let _faces = object.faces();
//! }
//! ```
//!
//! ## Design
//!
//! - **Recompute from original** — every transform mutation re-derives the
//!   full vertex buffer from the load-time snapshot, so repeated edits
//!   never accumulate floating-point drift.
//! - **One active rotation** — an object's rotation is a quaternion or a
//!   3×3 matrix, tagged, never both at once.
//! - **Explicit configuration** — keybindings and camera parameters are
//!   records passed at construction, not globals.

pub mod loader;

mod camera;
mod input;
mod mesh;
mod object;
mod quaternion;
mod scene;
mod transform;

pub use camera::Camera;
pub use input::{Input, Keymap};
pub use loader::MeshError;
pub use mesh::{Face, FaceVertex, MeshData, TextureId};
pub use object::Object3D;
pub use quaternion::Quaternion;
pub use scene::Scene;
pub use transform::{Rotation, Shear, TransformState};

// Re-export glam math types for convenience
pub use glam::{Mat3, Vec2, Vec3};

// Re-export commonly used winit types for convenience
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;
