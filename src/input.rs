//! Input state tracking and movement keybindings.
//!
//! [`Input`] folds `winit` window events into queryable per-frame state:
//! which keys are held, which went down or up this frame, mouse buttons,
//! and the cursor delta the camera consumes for mouse look.
//!
//! [`Keymap`] is the explicit record of movement bindings. It is passed to
//! the camera at construction — there is no process-wide binding table —
//! so two cameras (or two windows) can use different layouts.

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Movement keybindings for a free-fly camera.
///
/// # Example
///
/// ```
/// use gimbal::{Camera, Keymap};
///
/// let qwerty = Camera::new().keymap(Keymap::qwerty());
/// let azerty = Camera::new().keymap(Keymap::azerty());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keymap {
    /// Move along the view direction.
    pub forward: KeyCode,
    /// Move against the view direction.
    pub backward: KeyCode,
    /// Strafe left.
    pub left: KeyCode,
    /// Strafe right.
    pub right: KeyCode,
    /// Move along the camera's up vector.
    pub up: KeyCode,
    /// Move against the camera's up vector.
    pub down: KeyCode,
}

impl Keymap {
    /// WASD movement with E/Q for up/down.
    pub fn qwerty() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            up: KeyCode::KeyE,
            down: KeyCode::KeyQ,
        }
    }

    /// ZQSD movement for AZERTY layouts, E/A for up/down.
    pub fn azerty() -> Self {
        Self {
            forward: KeyCode::KeyZ,
            backward: KeyCode::KeyS,
            left: KeyCode::KeyQ,
            right: KeyCode::KeyD,
            up: KeyCode::KeyE,
            down: KeyCode::KeyA,
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::qwerty()
    }
}

/// Tracks keyboard and mouse state across window events.
#[derive(Debug, Default)]
pub struct Input {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    mouse_buttons_pressed: HashSet<MouseButton>,
    mouse_buttons_released: HashSet<MouseButton>,
    mouse_position: Vec2,
    mouse_delta: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the start of each frame to reset per-frame state.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_buttons_pressed.clear();
        self.mouse_buttons_released.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    /// Records a key press directly.
    ///
    /// Useful for drivers that are not winit windows (replays, tests,
    /// headless tools); the window path goes through `handle_event`.
    pub fn press_key(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Records a key release directly.
    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
        self.keys_released.insert(key);
    }

    /// Folds one window event into the tracked state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.press_key(key),
                        ElementState::Released => self.release_key(key),
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => {
                    if !self.mouse_buttons_down.contains(button) {
                        self.mouse_buttons_pressed.insert(*button);
                    }
                    self.mouse_buttons_down.insert(*button);
                }
                ElementState::Released => {
                    self.mouse_buttons_down.remove(button);
                    self.mouse_buttons_released.insert(*button);
                }
            },
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = Vec2::new(position.x as f32, position.y as f32);
                self.mouse_delta += new_pos - self.mouse_position;
                self.mouse_position = new_pos;
            }
            _ => {}
        }
    }

    /// Returns true if the key is currently held down.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key was pressed this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the key was released this frame.
    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Returns true if the mouse button is currently held down.
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Returns true if the mouse button was pressed this frame.
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons_pressed.contains(&button)
    }

    /// Returns true if the mouse button was released this frame.
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons_released.contains(&button)
    }

    /// Current cursor position in window coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Cursor movement accumulated since `begin_frame`.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }
}
