//! A flat collection of named objects.
//!
//! [`Scene`] maps names to [`Object3D`] values so a caller can address
//! "the cube" across frames. It is deliberately not a scene graph: there
//! is no parenting and no transform inheritance — every object transforms
//! independently.
//!
//! # Example
//!
//! ```
//! use gimbal::{MeshData, Object3D, Scene, Vec3};
//!
//! let mut scene = Scene::new();
//! scene.insert("cube", Object3D::new(MeshData::cube()));
//! scene.insert("floor", Object3D::new(MeshData::plane(10.0)));
//!
//! if let Some(cube) = scene.get_mut("cube") {
//!     cube.set_position(Vec3::new(0.0, 1.0, 0.0));
//! }
//! ```

use std::collections::HashMap;

use crate::object::Object3D;

/// Named objects, each with its own independent transform.
#[derive(Debug, Default)]
pub struct Scene {
    objects: HashMap<String, Object3D>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an object under a name.
    ///
    /// Returns the previous object with that name, if any.
    pub fn insert(&mut self, name: impl Into<String>, object: Object3D) -> Option<Object3D> {
        self.objects.insert(name.into(), object)
    }

    /// Looks up an object by name.
    pub fn get(&self, name: &str) -> Option<&Object3D> {
        self.objects.get(name)
    }

    /// Looks up an object for mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Object3D> {
        self.objects.get_mut(name)
    }

    /// Removes an object, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Object3D> {
        self.objects.remove(name)
    }

    /// Iterates over all objects; a renderer's draw loop.
    pub fn objects(&self) -> impl Iterator<Item = (&str, &Object3D)> {
        self.objects.iter().map(|(name, obj)| (name.as_str(), obj))
    }

    /// Iterates over all objects mutably; an update loop.
    pub fn objects_mut(&mut self) -> impl Iterator<Item = (&str, &mut Object3D)> {
        self.objects
            .iter_mut()
            .map(|(name, obj)| (name.as_str(), obj))
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
