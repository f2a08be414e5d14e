//! Builds a small scene and runs the transform pipeline headless,
//! printing where a tracked cube corner lands as the cube spins.

use gimbal::{MeshData, Object3D, Quaternion, Scene, Shear, Vec3};

fn main() {
    env_logger::init();

    let mut scene = Scene::new();

    scene.insert("cube", Object3D::new(MeshData::cube()));

    let mut pyramid = Object3D::new(MeshData::pyramid());
    pyramid.set_position(Vec3::new(6.0, 0.0, 0.0));
    pyramid.set_scale(Vec3::new(2.0, 5.0, 1.0));
    scene.insert("pyramid", pyramid);

    let mut sphere = Object3D::new(MeshData::sphere(16, 8));
    sphere.set_position(Vec3::new(12.0, 0.0, 0.0));
    sphere.shear(Shear {
        xy: 1.0,
        ..Shear::default()
    });
    scene.insert("sphere", sphere);

    // One degree about X per frame, composed incrementally like a
    // renderer's update loop would.
    let step = Quaternion::from_axis_angle(Vec3::X, 1.0_f32.to_radians());

    for frame in 0..=90 {
        if frame % 30 == 0 {
            let cube = scene.get("cube").unwrap();
            let corner = cube.vertices()[6];
            println!(
                "frame {frame:3}: cube corner at ({:+.3}, {:+.3}, {:+.3})",
                corner.x, corner.y, corner.z
            );
        }
        if let Some(cube) = scene.get_mut("cube") {
            cube.rotate(step);
        }
    }

    for (name, object) in scene.objects() {
        println!(
            "{name}: {} vertices, {} faces",
            object.vertices().len(),
            object.faces().len()
        );
    }
}
