use folio3d::{
    banner::BannerScene,
    config::SceneConfig,
    loading::LoaderView,
    resources::font::Typeface,
};
use rand::{SeedableRng, rngs::StdRng};

/// A tiny typeface in the JSON typeface format.
///
/// Units are 1/1000 em. `A` is a plain square, `O` a square with a square
/// hole, `D` has a quadratic curve and `?` is the fallback glyph.
pub const TYPEFACE_JSON: &str = r#"{
    "familyName": "Fixture Sans",
    "resolution": 1000,
    "boundingBox": { "yMin": -200, "yMax": 800, "xMin": 0, "xMax": 800 },
    "underlineThickness": 50,
    "glyphs": {
        "A": { "ha": 700, "o": "m 0 0 l 600 0 l 600 600 l 0 600 z" },
        "O": { "ha": 700, "o": "m 0 0 l 600 0 l 600 600 l 0 600 z m 150 150 l 150 450 l 450 450 l 450 150 z" },
        "D": { "ha": 700, "o": "m 0 0 l 300 0 q 600 300 600 0 q 300 600 600 600 l 0 600 z" },
        "?": { "ha": 500, "o": "m 0 0 l 400 0 l 400 400 l 0 400 z" },
        " ": { "ha": 300 }
    }
}"#;

pub fn typeface() -> Typeface {
    Typeface::from_json(TYPEFACE_JSON).expect("fixture typeface parses")
}

/// The shipped configuration with text the fixture typeface can draw.
pub fn config() -> SceneConfig {
    SceneConfig {
        headline: "AOD".into(),
        subtitle: "A O".into(),
        ..SceneConfig::default()
    }
}

pub fn scene() -> BannerScene {
    scene_with(config())
}

pub fn scene_with(config: SceneConfig) -> BannerScene {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    BannerScene::with_rng(config, 1280, 720, &mut rng).expect("valid configuration")
}

/// Records everything the loading manager shows.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub texts: Vec<String>,
    pub hidden_after: Vec<u32>,
}

impl RecordingView {
    pub fn last_text(&self) -> Option<&str> {
        self.texts.last().map(String::as_str)
    }
}

impl LoaderView for RecordingView {
    fn set_text(&mut self, text: &str) {
        self.texts.push(text.to_string());
    }

    fn hide(&mut self, delay_millis: u32) {
        self.hidden_after.push(delay_millis);
    }
}
