use cgmath::{Deg, Vector4};
use folio3d::{
    camera::Projection,
    config::{Colour, LightingConfig},
    pipelines::{light::LightsUniform, points::quad_size},
};

const EPS: f32 = 1e-5;

fn assert_close(actual: [f32; 4], expected: [f32; 4]) {
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!((a - e).abs() < EPS, "{:?} != {:?}", actual, expected);
    }
}

fn length(v: [f32; 4]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

#[test]
fn light_colours_carry_their_intensity() {
    let lights = LightsUniform::from(&LightingConfig::default());

    assert_close(lights.ambient, [0.5, 0.5, 0.5, 1.0]);
    assert_close(lights.key_color, [1.0, 1.0, 1.0, 1.0]);

    let blue = Colour::from_hex(0x3498db);
    assert_close(
        lights.fill_color,
        [blue.r * 0.8, blue.g * 0.8, blue.b * 0.8, 1.0],
    );
}

#[test]
fn light_directions_are_unit_vectors_towards_the_light() {
    let lights = LightsUniform::from(&LightingConfig::default());

    let k = 1.0 / 3.0f32.sqrt();
    assert_close(lights.key_direction, [k, k, k, 0.0]);

    let n = 59.0f32.sqrt();
    assert_close(lights.fill_direction, [-5.0 / n, 3.0 / n, -5.0 / n, 0.0]);

    for direction in [lights.key_direction, lights.fill_direction] {
        assert!((length(direction) - 1.0).abs() < EPS);
    }
}

#[test]
fn light_at_the_origin_shines_from_above() {
    let mut config = LightingConfig::default();
    config.key.position = [0.0, 0.0, 0.0];
    let lights = LightsUniform::from(&config);
    assert_close(lights.key_direction, [0.0, 1.0, 0.0, 0.0]);
}

#[test]
fn point_quads_match_attenuated_point_sizes() {
    let (width, height) = (1600, 900);
    let point_size = 0.02;
    let projection = Projection::new(width, height, Deg(100.0), 0.1, 1000.0);
    let side = quad_size(point_size, projection.fovy());

    for depth in [1.0f32, 5.0, 12.0] {
        let top = projection.calc_matrix() * Vector4::new(0.0, side / 2.0, -depth, 1.0);
        // from -ndc to +ndc is `height` pixels
        let pixels = top.y / top.w * height as f32;
        let attenuated = point_size * (height as f32 / 2.0) / depth;
        assert!(
            (pixels - attenuated).abs() < attenuated * 1e-3,
            "depth {}: {} px, want {} px",
            depth,
            pixels,
            attenuated
        );
    }
}
