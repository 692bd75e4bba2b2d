use folio3d::{
    config::LoaderConfig,
    error::Error,
    loading::{LoaderStatus, LoadingManager, progress_percent},
};

use crate::common::test_utils::{self, RecordingView};

mod common;

const FONT_URL: &str = "https://threejs.org/examples/fonts/helvetiker_bold.typeface.json";

fn manager() -> LoadingManager<RecordingView> {
    LoadingManager::new(LoaderConfig::default(), RecordingView::default())
}

#[test]
fn percent_is_rounded() {
    assert_eq!(progress_percent(0, 0), 0);
    assert_eq!(progress_percent(0, 4), 0);
    assert_eq!(progress_percent(1, 3), 33);
    assert_eq!(progress_percent(2, 3), 67);
    assert_eq!(progress_percent(3, 3), 100);
}

#[test]
fn progress_message_matches_the_overlay_text() {
    let config = LoaderConfig::default();
    assert_eq!(config.progress_message(42), "Loading 3D Scene... 42%");
}

#[test]
fn completed_load_hides_the_view_after_the_delay() {
    let mut loader = manager();
    loader.item_start(FONT_URL);
    assert_eq!(loader.status(), &LoaderStatus::Loading { percent: 0 });

    loader.item_end(FONT_URL);

    assert_eq!(loader.status(), &LoaderStatus::Loaded);
    assert_eq!(loader.view().last_text(), Some("Loading 3D Scene... 100%"));
    assert_eq!(loader.view().hidden_after, vec![500]);
}

#[test]
fn partial_progress_keeps_the_view() {
    let mut loader = manager();
    loader.item_start("a.json");
    loader.item_start("b.json");

    loader.item_end("a.json");

    assert_eq!(loader.status(), &LoaderStatus::Loading { percent: 50 });
    assert_eq!(loader.items(), (1, 2));
    assert_eq!(loader.view().last_text(), Some("Loading 3D Scene... 50%"));
    assert!(loader.view().hidden_after.is_empty());
}

#[test]
fn failure_shows_the_error_and_never_hides() {
    let mut loader = manager();
    loader.item_start(FONT_URL);

    let err = Error::asset_load(FONT_URL, "network unreachable");
    loader.item_error(FONT_URL, &err);

    assert_eq!(
        loader.status(),
        &LoaderStatus::Failed {
            message: "Error loading 3D assets".into()
        }
    );
    assert_eq!(loader.view().last_text(), Some("Error loading 3D assets"));

    // late completions do not override the failure
    loader.item_end(FONT_URL);
    loader.item_start("late.json");
    loader.item_end("late.json");

    assert!(matches!(loader.status(), LoaderStatus::Failed { .. }));
    assert_eq!(loader.view().last_text(), Some("Error loading 3D assets"));
    assert!(loader.view().hidden_after.is_empty());
}

#[test]
fn terminal_state_is_reached_once() {
    let mut loader = manager();
    loader.item_start(FONT_URL);
    loader.item_end(FONT_URL);
    loader.item_error(FONT_URL, &"too late");

    assert_eq!(loader.status(), &LoaderStatus::Loaded);
    assert_eq!(loader.view().hidden_after.len(), 1);
}

#[test]
fn font_failure_reaches_the_overlay_through_the_scene() {
    let mut scene = test_utils::scene();
    let mut loader = manager();
    loader.item_start(FONT_URL);

    scene.on_font_loaded(
        FONT_URL,
        Err(Error::asset_load(FONT_URL, "HTTP status 404")),
        &mut loader,
    );

    assert_eq!(loader.view().last_text(), Some("Error loading 3D assets"));
    assert!(loader.view().hidden_after.is_empty());
}

#[test]
fn malformed_font_counts_as_a_failure() {
    let mut scene = test_utils::scene();
    let mut loader = manager();
    loader.item_start(FONT_URL);

    let malformed = folio3d::resources::font::Typeface::from_json(r#"{"glyphs": {}}"#)
        .map_err(|e| Error::asset_load(FONT_URL, e));
    scene.on_font_loaded(FONT_URL, malformed, &mut loader);

    assert!(matches!(loader.status(), LoaderStatus::Failed { .. }));
    assert!(scene.placeholder().is_some());
}

#[test]
fn successful_font_completes_loading() {
    let mut scene = test_utils::scene();
    let mut loader = manager();
    loader.item_start(FONT_URL);

    scene.on_font_loaded(FONT_URL, Ok(test_utils::typeface()), &mut loader);

    assert_eq!(loader.status(), &LoaderStatus::Loaded);
    assert_eq!(loader.view().hidden_after, vec![500]);
    assert!(scene.text_group().is_some());
}
