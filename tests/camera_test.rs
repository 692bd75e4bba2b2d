use cgmath::{InnerSpace, Matrix4, Point3};
use folio3d::{
    camera::{Camera, OrbitController},
    config::CameraConfig,
};

const VIEWPORT_HEIGHT: u32 = 800;

fn rig(config: &CameraConfig) -> (Camera, OrbitController) {
    let camera = Camera::new((0.0, 0.0, config.distance), (0.0, 0.0, 0.0));
    (camera, OrbitController::new(config, VIEWPORT_HEIGHT))
}

fn distance(camera: &Camera) -> f32 {
    (camera.position - Point3::new(0.0, 0.0, 0.0)).magnitude()
}

fn azimuth(camera: &Camera) -> f32 {
    camera.position.x.atan2(camera.position.z)
}

fn is_finite(m: Matrix4<f32>) -> bool {
    let cols: [[f32; 4]; 4] = m.into();
    cols.iter().flatten().all(|v| v.is_finite())
}

#[test]
fn queued_rotation_eases_in() {
    let (mut camera, mut controller) = rig(&CameraConfig::default());
    // 50 px on an 800 px viewport is an eighth of a turn
    let full = -std::f32::consts::PI / 8.0;
    controller.rotate(50.0, 0.0);

    controller.update(&mut camera);
    assert!((azimuth(&camera) - full * 0.05).abs() < 1e-4, "{}", azimuth(&camera));

    controller.update(&mut camera);
    let expected = full * (0.05 + 0.05 * 0.95);
    assert!((azimuth(&camera) - expected).abs() < 1e-4, "{}", azimuth(&camera));
}

#[test]
fn queued_rotation_converges_to_the_full_delta() {
    let (mut camera, mut controller) = rig(&CameraConfig::default());
    controller.rotate(50.0, 0.0);

    for _ in 0..600 {
        controller.update(&mut camera);
    }

    assert!((azimuth(&camera) + std::f32::consts::PI / 8.0).abs() < 1e-3);
    assert!((distance(&camera) - 5.0).abs() < 1e-3);
    assert!(camera.position.y.abs() < 1e-3);
    assert_eq!(camera.target, Point3::new(0.0, 0.0, 0.0));
}

#[test]
fn wheel_steps_zoom_towards_the_target() {
    let (mut camera, mut controller) = rig(&CameraConfig::default());

    controller.zoom(1.0);
    controller.update(&mut camera);
    assert!((distance(&camera) - 5.0 * 0.95).abs() < 1e-4);
    assert!(camera.position.z > 0.0 && camera.position.x.abs() < 1e-5);

    controller.zoom(-1.0);
    controller.update(&mut camera);
    assert!((distance(&camera) - 5.0).abs() < 1e-4);

    // the scale is consumed by one update
    controller.update(&mut camera);
    assert!((distance(&camera) - 5.0).abs() < 1e-4);
}

#[test]
fn zoom_can_be_disabled() {
    let config = CameraConfig {
        enable_zoom: false,
        ..CameraConfig::default()
    };
    let (mut camera, mut controller) = rig(&config);

    controller.zoom(3.0);
    controller.zoom(-1.0);
    controller.update(&mut camera);

    assert!((distance(&camera) - 5.0).abs() < 1e-4);
}

#[test]
fn pitch_stops_short_of_the_poles() {
    for (dy, below) in [(-8000.0, true), (8000.0, false)] {
        let (mut camera, mut controller) = rig(&CameraConfig::default());
        controller.rotate(0.0, dy);

        for _ in 0..200 {
            controller.update(&mut camera);
        }

        let p = camera.position;
        if below {
            assert!(p.y < -4.99, "{:?}", p);
        } else {
            assert!(p.y > 4.99, "{:?}", p);
        }
        // never over the pole: the camera stays on the +z side it started on
        assert!(p.z > 0.0, "{:?}", p);
        assert!(p.x.abs() < 1e-5, "{:?}", p);
        assert!(is_finite(camera.calc_matrix()));
    }
}
