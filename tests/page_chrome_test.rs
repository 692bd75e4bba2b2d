use folio3d::page::chrome::{
    BACK_TO_TOP_HTML, BackToTop, LOADER_HTML, SCROLL_INDICATOR_HTML, ScrollTarget,
};

const VIEWPORT: f64 = 800.0;

#[test]
fn back_to_top_shows_past_half_a_screen() {
    assert!(!BackToTop::should_show(0.0, VIEWPORT));
    assert!(!BackToTop::should_show(400.0, VIEWPORT));
    assert!(BackToTop::should_show(400.5, VIEWPORT));
    assert!(BackToTop::should_show(5000.0, VIEWPORT));
}

#[test]
fn visibility_changes_are_reported_once() {
    let mut button = BackToTop::new();
    assert!(!button.is_visible());

    assert_eq!(button.on_scroll(100.0, VIEWPORT), None);
    assert_eq!(button.on_scroll(450.0, VIEWPORT), Some(true));
    assert_eq!(button.on_scroll(900.0, VIEWPORT), None);
    assert!(button.is_visible());
    assert_eq!(button.on_scroll(10.0, VIEWPORT), Some(false));
    assert_eq!(button.on_scroll(0.0, VIEWPORT), None);
    assert!(!button.is_visible());
}

#[test]
fn scrolling_down_flips_visibility_at_most_once() {
    let mut button = BackToTop::new();
    let flips = (0..=200)
        .map(|step| step as f64 * 10.0)
        .filter_map(|y| button.on_scroll(y, VIEWPORT))
        .collect::<Vec<_>>();
    assert_eq!(flips, vec![true]);

    let flips = (0..=200)
        .rev()
        .map(|step| step as f64 * 10.0)
        .filter_map(|y| button.on_scroll(y, VIEWPORT))
        .collect::<Vec<_>>();
    assert_eq!(flips, vec![false]);
}

#[test]
fn visibility_follows_the_viewport_height() {
    let mut button = BackToTop::new();
    assert_eq!(button.on_scroll(300.0, 1000.0), None);
    // the same offset is past the threshold on a smaller screen
    assert_eq!(button.on_scroll(300.0, 500.0), Some(true));
}

#[test]
fn scroll_targets() {
    assert_eq!(ScrollTarget::NextScreen.offset(VIEWPORT), VIEWPORT);
    assert_eq!(ScrollTarget::Top.offset(VIEWPORT), 0.0);
    assert_eq!(BackToTop::new().target(), ScrollTarget::Top);
}

#[test]
fn chrome_markup() {
    assert!(LOADER_HTML.contains(r#"class="loader-spinner""#));
    assert!(LOADER_HTML.ends_with("<div>Loading 3D Scene...</div>"));
    assert!(SCROLL_INDICATOR_HTML.contains(r#"<div class="arrow">↓</div>"#));
    assert!(SCROLL_INDICATOR_HTML.contains("Scroll to explore"));
    assert_eq!(BACK_TO_TOP_HTML, "↑");
}
