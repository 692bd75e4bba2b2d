use folio3d::{
    banner::BannerScene,
    config::{BevelStyle, Colour, SceneConfig},
    error::Error,
};

fn rejected(config: SceneConfig) -> bool {
    matches!(config.validate(), Err(Error::InvalidConfig(_)))
}

#[test]
fn defaults_describe_the_shipped_page() {
    let config = SceneConfig::default().validate().expect("defaults are valid");

    assert_eq!(config.camera.fovy_degrees, 100.0);
    assert_eq!(config.camera.znear, 0.1);
    assert_eq!(config.camera.zfar, 1000.0);
    assert_eq!(config.camera.distance, 5.0);
    assert_eq!(config.camera.damping_factor, 0.05);
    assert_eq!(config.headline_style.size, 0.5);
    assert_eq!(config.headline_style.depth, 0.2);
    assert_eq!(
        config.headline_style.bevel,
        Some(BevelStyle {
            thickness: 0.03,
            size: 0.02,
            offset: 0.0,
            segments: 4
        })
    );
    assert_eq!(config.subtitle_style.size, 0.15);
    assert_eq!(config.subtitle_style.curve_segments, 4);
    assert_eq!(config.subtitle_offset, 0.4);
    assert_eq!(config.particles.count, 2000);
    assert_eq!(config.particles.half_extent, 10.0);
    assert_eq!(config.loader.hide_delay_millis, 500);
    assert_eq!(config.loader.error_message, "Error loading 3D assets");
    assert_eq!(
        config.loader.font_url,
        "https://threejs.org/examples/fonts/helvetiker_bold.typeface.json"
    );
}

#[test]
fn hex_colours_are_linearized() {
    let white = Colour::from_hex(0xffffff);
    for channel in [white.r, white.g, white.b] {
        assert!((channel - 1.0).abs() < 1e-6);
    }
    let black = Colour::from_hex(0x000000);
    assert_eq!((black.r, black.g, black.b), (0.0, 0.0, 0.0));

    let blue = Colour::from_hex(0x3498db);
    // sRGB 0xdb is about 0.708 linear
    assert!((blue.b - 0.708).abs() < 0.005, "{}", blue.b);
    assert!(blue.r < blue.g && blue.g < blue.b);
}

#[test]
fn profile_sets_the_banner_text() {
    let config = SceneConfig::default().with_profile("Jane Roe", "Technical Artist");
    assert_eq!(config.headline, "Jane Roe");
    assert_eq!(config.subtitle, "TECHNICAL ARTIST");
}

#[test]
fn bad_camera_is_rejected() {
    let mut config = SceneConfig::default();
    config.camera.fovy_degrees = 180.0;
    assert!(rejected(config));

    let mut config = SceneConfig::default();
    config.camera.znear = 10.0;
    config.camera.zfar = 1.0;
    assert!(rejected(config));

    let mut config = SceneConfig::default();
    config.camera.damping_factor = 1.5;
    assert!(rejected(config));
}

#[test]
fn bad_text_style_is_rejected() {
    let mut config = SceneConfig::default();
    config.headline_style.size = 0.0;
    assert!(rejected(config));

    let mut config = SceneConfig::default();
    config.subtitle_style.curve_segments = 0;
    assert!(rejected(config));

    let mut config = SceneConfig::default();
    if let Some(bevel) = config.headline_style.bevel.as_mut() {
        bevel.segments = 0;
    }
    assert!(rejected(config));
}

#[test]
fn bad_material_and_particles_are_rejected() {
    let mut config = SceneConfig::default();
    config.material.roughness = 2.0;
    assert!(rejected(config));

    let mut config = SceneConfig::default();
    config.particles.count = 0;
    assert!(rejected(config));

    let mut config = SceneConfig::default();
    config.loader.font_url.clear();
    assert!(rejected(config));
}

#[test]
fn scene_refuses_an_invalid_configuration() {
    let mut config = SceneConfig::default();
    config.particles.half_extent = -1.0;
    assert!(BannerScene::new(config, 640, 480).is_err());
}
