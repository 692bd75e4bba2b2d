//! Typeface documents and glyph outlines.
//!
//! Fonts use the JSON typeface format: a map of glyphs, each with an advance
//! width (`ha`) and an outline string (`o`) of drawing commands in font
//! units. Commands are `m x y` (move), `l x y` (line), `q x y cx cy`
//! (quadratic to `x y` through control `cx cy`) and `b x y c1x c1y c2x c2y`
//! (cubic to `x y`). Layout turns a string into closed 2D contours scaled to
//! the requested text size, with curves subdivided into straight segments.

use std::collections::HashMap;

use cgmath::{InnerSpace, Vector2};
use serde::Deserialize;

use crate::{error::Error, resources::load_string};

/// A closed polyline; the closing edge back to the first point is implicit.
pub type Contour = Vec<Vector2<f32>>;

#[derive(Debug, Clone, Deserialize)]
pub struct Glyph {
    /// Horizontal advance in font units.
    pub ha: f32,
    #[serde(default)]
    pub o: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FontBounds {
    #[serde(rename = "yMin")]
    pub y_min: f32,
    #[serde(rename = "yMax")]
    pub y_max: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Typeface {
    #[serde(rename = "familyName", default)]
    pub family_name: String,
    pub glyphs: HashMap<String, Glyph>,
    pub resolution: f32,
    #[serde(rename = "boundingBox")]
    pub bounding_box: FontBounds,
    #[serde(rename = "underlineThickness", default)]
    pub underline_thickness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineCommand {
    MoveTo(Vector2<f32>),
    LineTo(Vector2<f32>),
    QuadTo {
        ctrl: Vector2<f32>,
        to: Vector2<f32>,
    },
    CubicTo {
        ctrl1: Vector2<f32>,
        ctrl2: Vector2<f32>,
        to: Vector2<f32>,
    },
}

/// Fetch and parse a typeface. Fetch and parse failures are both reported as
/// an asset-load error for `url`.
pub async fn load_typeface(url: &str) -> Result<Typeface, Error> {
    let json = load_string(url)
        .await
        .map_err(|e| Error::asset_load(url, e))?;
    Typeface::from_json(&json).map_err(|e| Error::asset_load(url, e))
}

impl Typeface {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let typeface: Typeface =
            serde_json::from_str(json).map_err(|e| Error::Font(e.to_string()))?;
        if !(typeface.resolution > 0.0) {
            return Err(Error::Font(format!(
                "resolution must be positive, got {}",
                typeface.resolution
            )));
        }
        Ok(typeface)
    }

    fn glyph(&self, c: char) -> Option<&Glyph> {
        let mut buf = [0u8; 4];
        let key: &str = c.encode_utf8(&mut buf);
        self.glyphs.get(key).or_else(|| self.glyphs.get("?"))
    }

    /// Distance between baselines of consecutive lines at `size`.
    pub fn line_height(&self, size: f32) -> f32 {
        let scale = size / self.resolution;
        (self.bounding_box.y_max - self.bounding_box.y_min + self.underline_thickness) * scale
    }

    /// Lay out `text` at `size` and flatten every glyph into contours.
    ///
    /// Glyphs advance along +x; a newline returns to x = 0 one line lower.
    /// Characters missing from the font fall back to `?` and are skipped if
    /// that is missing as well.
    pub fn layout(&self, text: &str, size: f32, curve_segments: u32) -> Result<Vec<Contour>, Error> {
        let scale = size / self.resolution;
        let line_height = self.line_height(size);
        let mut offset = Vector2::new(0.0f32, 0.0f32);
        let mut contours = Vec::new();

        for c in text.chars() {
            if c == '\n' {
                offset.x = 0.0;
                offset.y -= line_height;
                continue;
            }
            let Some(glyph) = self.glyph(c) else {
                log::warn!(
                    "character {:?} is missing from typeface {:?}",
                    c,
                    self.family_name
                );
                continue;
            };
            if let Some(outline) = &glyph.o {
                let commands = parse_outline(outline)?;
                let placed = commands.into_iter().map(|cmd| place(cmd, scale, offset));
                contours.extend(flatten(placed, curve_segments.max(1)));
            }
            offset.x += glyph.ha * scale;
        }

        Ok(contours)
    }
}

fn place(cmd: OutlineCommand, scale: f32, offset: Vector2<f32>) -> OutlineCommand {
    let p = |v: Vector2<f32>| v * scale + offset;
    match cmd {
        OutlineCommand::MoveTo(to) => OutlineCommand::MoveTo(p(to)),
        OutlineCommand::LineTo(to) => OutlineCommand::LineTo(p(to)),
        OutlineCommand::QuadTo { ctrl, to } => OutlineCommand::QuadTo {
            ctrl: p(ctrl),
            to: p(to),
        },
        OutlineCommand::CubicTo { ctrl1, ctrl2, to } => OutlineCommand::CubicTo {
            ctrl1: p(ctrl1),
            ctrl2: p(ctrl2),
            to: p(to),
        },
    }
}

/// Parse an outline string into commands (still in font units).
pub fn parse_outline(outline: &str) -> Result<Vec<OutlineCommand>, Error> {
    let mut tokens = outline.split_whitespace();
    let mut commands = Vec::new();

    while let Some(action) = tokens.next() {
        let command = match action {
            "m" => OutlineCommand::MoveTo(next_point(&mut tokens, action)?),
            "l" => OutlineCommand::LineTo(next_point(&mut tokens, action)?),
            "q" => {
                let to = next_point(&mut tokens, action)?;
                let ctrl = next_point(&mut tokens, action)?;
                OutlineCommand::QuadTo { ctrl, to }
            }
            "b" => {
                let to = next_point(&mut tokens, action)?;
                let ctrl1 = next_point(&mut tokens, action)?;
                let ctrl2 = next_point(&mut tokens, action)?;
                OutlineCommand::CubicTo { ctrl1, ctrl2, to }
            }
            "z" => continue,
            other => return Err(Error::Font(format!("unknown outline command {other:?}"))),
        };
        commands.push(command);
    }

    Ok(commands)
}

fn next_point(tokens: &mut std::str::SplitWhitespace<'_>, action: &str) -> Result<Vector2<f32>, Error> {
    let mut coord = || -> Result<f32, Error> {
        let token = tokens
            .next()
            .ok_or_else(|| Error::Font(format!("command '{action}' is missing coordinates")))?;
        token
            .parse::<f32>()
            .map_err(|_| Error::Font(format!("bad coordinate {token:?} in command '{action}'")))
    };
    let x = coord()?;
    let y = coord()?;
    Ok(Vector2::new(x, y))
}

/// Subdivide curves into `segments` straight pieces and split at every move.
fn flatten(commands: impl Iterator<Item = OutlineCommand>, segments: u32) -> Vec<Contour> {
    let mut contours = Vec::new();
    let mut current: Contour = Vec::new();
    let mut cursor = Vector2::new(0.0f32, 0.0f32);

    for command in commands {
        match command {
            OutlineCommand::MoveTo(to) => {
                finish_contour(&mut contours, std::mem::take(&mut current));
                current.push(to);
                cursor = to;
            }
            OutlineCommand::LineTo(to) => {
                current.push(to);
                cursor = to;
            }
            OutlineCommand::QuadTo { ctrl, to } => {
                let from = cursor;
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let u = 1.0 - t;
                    current.push(from * (u * u) + ctrl * (2.0 * u * t) + to * (t * t));
                }
                cursor = to;
            }
            OutlineCommand::CubicTo { ctrl1, ctrl2, to } => {
                let from = cursor;
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let u = 1.0 - t;
                    current.push(
                        from * (u * u * u)
                            + ctrl1 * (3.0 * u * u * t)
                            + ctrl2 * (3.0 * u * t * t)
                            + to * (t * t * t),
                    );
                }
                cursor = to;
            }
        }
    }
    finish_contour(&mut contours, current);

    contours
}

fn finish_contour(contours: &mut Vec<Contour>, mut contour: Contour) {
    const EPS: f32 = 1e-6;
    contour.dedup_by(|a, b| (*a - *b).magnitude2() < EPS);
    while contour.len() > 1 {
        let (first, last) = (contour[0], contour[contour.len() - 1]);
        if (first - last).magnitude2() < EPS {
            contour.pop();
        } else {
            break;
        }
    }
    if contour.len() >= 3 {
        contours.push(contour);
    }
}
