use std::time::Duration;

use cgmath::{Euler, Quaternion, Rad};
use folio3d::{
    banner::{
        BannerEvent, BannerScene, font_request,
        scene::{HEADLINE, SUBTITLE},
    },
    error::Error,
    loading::{LoaderStatus, LoadingManager},
    schedule::{Animate, FixedStepClock, FrameTicker, StopSignal, run_frames},
};

use crate::common::test_utils::{self, RecordingView};

mod common;

const FONT_URL: &str = "fonts/fixture.typeface.json";

fn assert_rotation(actual: Quaternion<f32>, x: f32, y: f32) {
    let expected: Quaternion<f32> = Euler::new(Rad(x), Rad(y), Rad(0.0)).into();
    // q and -q are the same rotation
    let dot = actual.s * expected.s + actual.v.x * expected.v.x + actual.v.y * expected.v.y
        + actual.v.z * expected.v.z;
    assert!(
        (dot.abs() - 1.0).abs() < 1e-4,
        "rotation {:?} != {:?}",
        actual,
        expected
    );
}

#[test]
fn resize_is_idempotent() {
    let mut once = test_utils::scene();
    let mut twice = test_utils::scene();

    assert!(once.resize(1024, 768));
    assert!(twice.resize(1024, 768));
    assert!(twice.resize(1024, 768));

    assert_eq!(once.viewport(), (1024, 768));
    assert_eq!(once.viewport(), twice.viewport());
    assert_eq!(once.projection().aspect(), twice.projection().aspect());
    assert!((once.projection().aspect() - 1024.0 / 768.0).abs() < 1e-6);
}

#[test]
fn resize_only_depends_on_the_last_size() {
    let mut scene = test_utils::scene();
    scene.resize(300, 900);
    scene.resize(1920, 1080);
    assert_eq!(scene.viewport(), (1920, 1080));
    assert!((scene.projection().aspect() - 1920.0 / 1080.0).abs() < 1e-6);
}

#[test]
fn zero_sized_resize_is_ignored() {
    let mut scene = test_utils::scene();
    let aspect = scene.projection().aspect();

    assert!(!scene.resize(0, 720));
    assert!(!scene.resize(1280, 0));

    assert_eq!(scene.viewport(), (1280, 720));
    assert_eq!(scene.projection().aspect(), aspect);
}

#[test]
fn attaching_fits_the_projection_to_the_surface() {
    // a web canvas reports 1x1 before its first layout
    let mut scene = BannerScene::new(test_utils::config(), 1, 1).expect("valid config");
    assert_eq!(scene.projection().aspect(), 1.0);

    let projection = scene.attach((1920, 1080));
    assert!((projection.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
    assert_eq!(scene.projection().aspect(), projection.aspect());
    assert_eq!(scene.viewport(), (1920, 1080));

    let kept = scene.attach((0, 0));
    assert_eq!(kept.aspect(), projection.aspect());
    assert_eq!(scene.viewport(), (1920, 1080));
}

#[test]
fn font_request_runs_on_a_worker_thread() {
    let url = "fonts/missing.typeface.json";
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let task = runtime.spawn(font_request(url.to_string()));

    let BannerEvent::FontLoaded { url: requested, result } =
        runtime.block_on(task).expect("font task completes");

    assert_eq!(requested, url);
    assert!(
        matches!(&result, Err(Error::AssetLoad { url: failed, .. }) if failed == url),
        "{:?}",
        result
    );
}

#[test]
fn starts_with_the_placeholder_only() {
    let scene = test_utils::scene();
    let placeholder = scene.placeholder().expect("placeholder is attached");
    assert_eq!(placeholder.geometry.vertices.len(), 24);
    assert_eq!(placeholder.geometry.indices.len(), 36);
    assert!(scene.text_group().is_none());
}

#[test]
fn installing_text_removes_the_placeholder() {
    let mut scene = test_utils::scene();
    scene
        .install_text(&test_utils::typeface())
        .expect("fixture text builds");

    assert!(scene.placeholder().is_none());
    let group = scene.text_group().expect("text group is attached");
    assert_eq!(group.children().len(), 2);
    assert!(group.child(HEADLINE).is_some_and(|c| !c.geometry.is_empty()));
    assert!(group.child(SUBTITLE).is_some_and(|c| !c.geometry.is_empty()));
}

#[test]
fn placeholder_and_text_are_never_both_attached() {
    let mut scene = test_utils::scene();
    let mut loader = LoadingManager::new(scene.config().loader.clone(), RecordingView::default());
    loader.item_start(FONT_URL);

    let exclusive = |scene: &folio3d::banner::BannerScene| {
        scene.placeholder().is_some() != scene.text_group().is_some()
    };
    assert!(exclusive(&scene));

    for _ in 0..3 {
        scene.advance(&FrameTicker::new(FixedStepClock::sixty_hertz()).tick());
        assert!(exclusive(&scene));
    }

    scene.on_font_loaded(FONT_URL, Ok(test_utils::typeface()), &mut loader);
    assert!(exclusive(&scene));
    assert!(scene.text_group().is_some());

    // a second install keeps the existing text
    scene
        .install_text(&test_utils::typeface())
        .expect("second install is a no-op");
    assert!(exclusive(&scene));
}

#[test]
fn failed_font_keeps_the_placeholder() {
    let mut scene = test_utils::scene();
    let mut loader = LoadingManager::new(scene.config().loader.clone(), RecordingView::default());
    loader.item_start(FONT_URL);

    scene.on_font_loaded(
        FONT_URL,
        Err(Error::asset_load(FONT_URL, "404 Not Found")),
        &mut loader,
    );

    assert!(scene.placeholder().is_some());
    assert!(scene.text_group().is_none());
    assert!(matches!(loader.status(), LoaderStatus::Failed { .. }));
}

#[test]
fn particle_field_has_the_configured_points() {
    let scene = test_utils::scene();
    let particles = scene.particles();
    assert_eq!(particles.len(), 2000);
    assert_eq!(particles.positions().len(), 6000);
    assert!(particles.positions().iter().all(|c| (-10.0..=10.0).contains(c)));
    assert_eq!(particles.rotation_y(), 0.0);
}

#[test]
fn particle_rotation_accumulates_per_frame() {
    let mut scene = test_utils::scene();
    let frames = run_frames(
        &mut scene,
        FixedStepClock::sixty_hertz(),
        &StopSignal::new(),
        Some(120),
    );

    assert_eq!(frames, 120);
    assert!((scene.particles().rotation_y() - 120.0 * 0.0005).abs() < 1e-5);
}

#[test]
fn placeholder_spins_on_x_and_y() {
    let mut scene = test_utils::scene();
    run_frames(
        &mut scene,
        FixedStepClock::sixty_hertz(),
        &StopSignal::new(),
        Some(10),
    );

    let placeholder = scene.placeholder().expect("placeholder is attached");
    assert_rotation(placeholder.local.rotation, 0.1, 0.1);
}

#[test]
fn text_group_spins_and_floats() {
    let mut scene = test_utils::scene();
    scene
        .install_text(&test_utils::typeface())
        .expect("fixture text builds");

    let mut ticker = FrameTicker::new(FixedStepClock::new(Duration::from_millis(250)));
    let mut last = None;
    for _ in 0..8 {
        let frame = ticker.tick();
        scene.advance(&frame);
        last = Some(frame);
    }
    let last = last.expect("frames ran");

    let group = scene.text_group().expect("text group is attached");
    assert_rotation(group.local.rotation, 0.0, 8.0 * 0.005);
    let expected_y = last.seconds().sin() * 0.1;
    assert!((group.local.position.y - expected_y).abs() < 1e-6);
}

#[test]
fn stopped_signal_runs_no_frames() {
    let mut scene = test_utils::scene();
    let stop = StopSignal::new();
    stop.clone().stop();

    let frames = run_frames(&mut scene, FixedStepClock::sixty_hertz(), &stop, None);

    assert_eq!(frames, 0);
    assert_eq!(scene.particles().rotation_y(), 0.0);
}
