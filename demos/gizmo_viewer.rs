//! Gizmo viewer demo
//!
//! A handful of marker empties around the origin. Press G to show or hide
//! their gizmos; drag to orbit, Shift+drag to pan, scroll to zoom.
//!
//! Run with `RUST_LOG=gizmo_overlay=debug` to follow the overlay lifecycle.

use cgmath::{Deg, Matrix4, Quaternion, Rotation3, Vector3};
use gizmo_overlay::gfx::scene::{ObjectKind, SceneObject};
use gizmo_overlay::{GizmoViewerApp, ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = GizmoViewerApp::new(ViewerConfig::default().with_title("Gizmo Viewer"))?;
    let scene = app.scene_mut();

    scene.add_object(SceneObject::empty("Floor_plane").with_trs(
        Vector3::new(0.0, 0.0, 0.0),
        Quaternion::from_angle_z(Deg(0.0)),
        Vector3::new(4.0, 4.0, 1.0),
    ));

    let mut wall = SceneObject::empty("Wall_PLANE");
    wall.set_translation(Vector3::new(0.0, 2.0, 1.0));
    wall.rotate_z(Deg(30.0));
    let upright = wall.world_matrix * Matrix4::from(Quaternion::from_angle_x(Deg(90.0_f32)));
    scene.add_object(wall.with_world_matrix(upright));

    for (i, x) in [-2.0_f32, 0.0, 2.0].into_iter().enumerate() {
        let mut snap = SceneObject::empty(&format!("Hook{}_snap", i));
        snap.set_translation(Vector3::new(x, -1.5, 0.5));
        snap.rotate_z(Deg(45.0 * i as f32));
        scene.add_object(snap);
    }

    // Not a marker kind, never drawn
    scene.add_object(SceneObject::new(ObjectKind::Mesh, "Crate_snap"));
    scene.add_object(SceneObject::empty("Pivot"));

    app.run()
}
