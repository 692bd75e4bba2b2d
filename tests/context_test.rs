use folio3d::context::scale_to_max;

#[test]
fn sizes_within_the_limit_are_kept() {
    assert_eq!(scale_to_max((1920, 1080), 2048), (1920, 1080));
    assert_eq!(scale_to_max((2048, 2048), 2048), (2048, 2048));
    assert_eq!(scale_to_max((1, 1), 2048), (1, 1));
}

#[test]
fn oversized_surfaces_shrink_to_the_limit() {
    assert_eq!(scale_to_max((2880, 1800), 2048), (2048, 1280));
    assert_eq!(scale_to_max((1800, 2880), 2048), (1280, 2048));
    assert_eq!(scale_to_max((4096, 4096), 2048), (2048, 2048));
}

#[test]
fn hidpi_canvas_fits_webgl2_limits() {
    let max = wgpu::Limits::downlevel_webgl2_defaults().max_texture_dimension_2d;
    // a full-window canvas on a 1440x900 screen at devicePixelRatio 2
    let (width, height) = scale_to_max((1440 * 2, 900 * 2), max);

    assert!(width <= max && height <= max, "{}x{} > {}", width, height, max);
    assert!((width as f32 / height as f32 - 1.6).abs() < 1e-2);
}

#[test]
fn extreme_aspect_ratios_keep_a_pixel() {
    assert_eq!(scale_to_max((100_000, 1), 2048), (2048, 1));
    assert_eq!(scale_to_max((1, 100_000), 2048), (1, 2048));
}
