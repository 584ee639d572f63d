//! [`TtfShaper`] measures text with the metrics of OpenType faces loaded by `ttf-parser`.
//!
//! The face bytes stay owned by the host; the shaper only borrows the parsed [`ttf_parser::Face`]s.

use std::collections::HashMap;

use crate::font::{FontDescription, FontFamily, ShapedText, TextShaper};
use crate::geometry::InkRect;

/// Ink bounds as `(x_min, y_min, x_max, y_max)` in layout coordinates
type Bounds = (f64, f64, f64, f64);

/// Places a glyph bounding box, in y-up font units, in the y-down layout of a line whose top is
/// `ascender` above the baseline, with the glyph origin at `pen`.
fn glyph_bounds(rect: ttf_parser::Rect, pen: f64, ascender: f64, scale: f64) -> Bounds {
    (
        pen + f64::from(rect.x_min) * scale,
        ascender - f64::from(rect.y_max) * scale,
        pen + f64::from(rect.x_max) * scale,
        ascender - f64::from(rect.y_min) * scale,
    )
}

fn merge(ink: Option<Bounds>, glyph: Bounds) -> Bounds {
    match ink {
        None => glyph,
        Some((x0, y0, x1, y1)) => (x0.min(glyph.0), y0.min(glyph.1), x1.max(glyph.2), y1.max(glyph.3)),
    }
}

/// A [`TextShaper`] over [`ttf_parser::Face`]s, one per [`FontFamily`] plus a default face.
///
/// Runs are laid out glyph after glyph with their horizontal advances; there is no kerning or
/// complex-script shaping. The face is used as is for every [`crate::font::FontStyle`] and
/// [`crate::font::FontWeight`]. A run containing a character the face has no glyph for cannot be shaped.
pub struct TtfShaper<'a> {
    default: ttf_parser::Face<'a>,
    families: HashMap<FontFamily, ttf_parser::Face<'a>>,
}

impl<'a> TtfShaper<'a> {
    /// Creates a shaper using `default` for every family.
    pub fn new(default: ttf_parser::Face<'a>) -> Self {
        Self { default, families: HashMap::new() }
    }

    /// Shapes runs of `family` with `face`.
    pub fn with_family(mut self, family: FontFamily, face: ttf_parser::Face<'a>) -> Self {
        self.families.insert(family, face);
        self
    }

    fn face(&self, family: FontFamily) -> &ttf_parser::Face<'a> {
        self.families.get(&family).unwrap_or(&self.default)
    }
}

impl<'a> TextShaper for TtfShaper<'a> {
    fn shape(&self, text: &str, font: &FontDescription) -> Option<ShapedText> {
        if text.is_empty() {
            return None;
        }

        let face = self.face(font.family);
        let scale = font.size / f64::from(face.units_per_em());
        let ascender = f64::from(face.ascender()) * scale;
        let descender = f64::from(face.descender()) * scale;

        let mut pen = 0.;
        let mut ink : Option<Bounds> = None;
        for c in text.chars() {
            let gid = face.glyph_index(c)?;
            if let Some(rect) = face.glyph_bounding_box(gid) {
                ink = Some(merge(ink, glyph_bounds(rect, pen, ascender, scale)));
            }
            pen += f64::from(face.glyph_hor_advance(gid).unwrap_or(0)) * scale;
        }

        let ink = match ink {
            Some((x_min, y_min, x_max, y_max)) => InkRect::new(x_min, y_min, x_max - x_min, y_max - y_min),
            // whitespace only
            None => InkRect::new(0., ascender, pen, 0.),
        };

        Some(ShapedText {
            ink,
            logical: InkRect::new(0., 0., pen, ascender - descender),
            baseline: ascender,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_units_to_layout() {
        // 1000 units per em at 10pt, ascender 800 units
        let rect = ttf_parser::Rect { x_min: 50, y_min: -200, x_max: 450, y_max: 700 };
        let (x0, y0, x1, y1) = glyph_bounds(rect, 3., 8., 0.01);
        assert!((x0 - 3.5).abs() < 1e-9);
        assert!((x1 - 7.5).abs() < 1e-9);
        // 7 above the baseline is 1 below the top of the line, 2 below it is 10
        assert!((y0 - 1.).abs() < 1e-9);
        assert!((y1 - 10.).abs() < 1e-9);
    }

    #[test]
    fn glyph_bounds_merge() {
        let first = (0., 2., 4., 8.);
        assert_eq!(merge(None, first), first);
        assert_eq!(merge(Some(first), (3., 1., 9., 6.)), (0., 1., 9., 8.));
    }
}
