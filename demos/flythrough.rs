//! Flies the camera toward a cube while software-projecting one corner,
//! the way a renderer without GPU matrices would consume the camera.

use gimbal::{Camera, Input, KeyCode, Keymap, MeshData, Object3D, Vec3};

fn main() {
    env_logger::init();

    let cube = Object3D::new(MeshData::cube());
    let mut camera = Camera::new()
        .position(Vec3::new(0.0, 0.5, 10.0))
        .keymap(Keymap::qwerty());

    // Hold "forward" for the whole flight.
    let mut input = Input::new();
    input.press_key(KeyCode::KeyW);

    let dt = 1.0 / 60.0;
    for frame in 0..=120 {
        camera.process_mouse_motion(0.4, 0.0);
        camera.update_position(&input, dt);

        if frame % 30 == 0 {
            let corner = cube.vertices()[6];
            let view = camera.world_to_camera(corner);
            if view.z < 0.0 {
                // Perspective divide onto a unit image plane.
                let (sx, sy) = (view.x / -view.z, view.y / -view.z);
                println!("frame {frame:3}: corner on screen at ({sx:+.3}, {sy:+.3})");
            } else {
                println!("frame {frame:3}: corner behind the camera");
            }
        }
    }
}
