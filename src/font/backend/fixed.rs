//! [`FixedShaper`] measures text from a small table of per-character metrics given in em.
//!
//! It is what the engine measures with when no font system is available: results only depend on the text
//! and the font description, so layouts are reproducible across machines.

use std::collections::HashMap;

use crate::font::{FontDescription, FontFamily, FontWeight, ShapedText, TextShaper};
use crate::geometry::InkRect;

/// Metrics of a glyph, in em.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphBox {
    /// horizontal advance, also the width of the ink
    pub advance: f64,
    /// top of the ink above the baseline
    pub ascent: f64,
    /// bottom of the ink below the baseline; negative when the ink floats above the baseline
    pub descent: f64,
}

impl GlyphBox {
    /// Creates glyph metrics
    pub const fn new(advance: f64, ascent: f64, descent: f64) -> Self {
        Self { advance, ascent, descent }
    }
}

/// Typographic ascent of every layout, in em
const LINE_ASCENT: f64 = 0.8;
/// Typographic descent of every layout, in em
const LINE_DESCENT: f64 = 0.2;
/// Advance growth of bold runs
const BOLD_WIDEN: f64 = 1.05;

const DEFAULT_GLYPH: GlyphBox = GlyphBox::new(0.5, 0.7, 0.);
const DESCENDER_GLYPH: GlyphBox = GlyphBox::new(0.5, 0.45, 0.2);
const SPACE_GLYPH: GlyphBox = GlyphBox::new(0.25, 0., 0.);

fn default_glyph(c: char) -> GlyphBox {
    match c {
        ' ' => SPACE_GLYPH,
        'g' | 'j' | 'p' | 'q' | 'y' => DESCENDER_GLYPH,
        // the minus sign fixes the math axis at 0.25 em
        '\u{2212}' => GlyphBox::new(0.6, 0.28, -0.22),
        '+' => GlyphBox::new(0.6, 0.5, 0.),
        '=' => GlyphBox::new(0.6, 0.36, -0.14),
        '(' | ')' | '[' | ']' | '{' | '}' | '|' => GlyphBox::new(0.3, 0.75, 0.25),
        '\u{221a}' => GlyphBox::new(0.55, 0.8, 0.2),
        _ => DEFAULT_GLYPH,
    }
}

/// A deterministic [`TextShaper`].
///
/// Characters measure with built-in em metrics unless a whole string has been given explicit metrics for a
/// family with [`FixedShaper::with_glyph`]. Empty strings cannot be shaped.
#[derive(Debug, Clone, Default)]
pub struct FixedShaper {
    glyphs: HashMap<(FontFamily, String), GlyphBox>,
}

impl FixedShaper {
    /// A shaper with only the built-in character metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives `text` shaped in `family` the metrics `glyph`.
    pub fn with_glyph(mut self, family: FontFamily, text: &str, glyph: GlyphBox) -> Self {
        self.glyphs.insert((family, text.to_owned()), glyph);
        self
    }

    fn metrics(&self, text: &str, family: FontFamily) -> GlyphBox {
        if let Some(glyph) = self.glyphs.get(&(family, text.to_owned())) {
            return *glyph;
        }

        let mut chars = text.chars().map(default_glyph);
        let first = chars.next().unwrap_or(SPACE_GLYPH);
        chars.fold(first, |acc, glyph| GlyphBox {
            advance: acc.advance + glyph.advance,
            ascent: acc.ascent.max(glyph.ascent),
            descent: acc.descent.max(glyph.descent),
        })
    }
}

impl TextShaper for FixedShaper {
    fn shape(&self, text: &str, font: &FontDescription) -> Option<ShapedText> {
        if text.is_empty() {
            return None;
        }

        let size = font.size;
        let glyph = self.metrics(text, font.family);
        let advance = match font.weight {
            FontWeight::Bold => glyph.advance * BOLD_WIDEN,
            FontWeight::Normal => glyph.advance,
        };
        let baseline = LINE_ASCENT * size;
        let width = advance * size;

        // whitespace has no ink
        let ink = if glyph.ascent + glyph.descent > 0. {
            InkRect::new(0., baseline - glyph.ascent * size, width, (glyph.ascent + glyph.descent) * size)
        } else {
            InkRect::new(0., baseline, width, 0.)
        };

        Some(ShapedText {
            ink,
            logical: InkRect::new(0., 0., width, (LINE_ASCENT + LINE_DESCENT) * size),
            baseline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minus_sets_the_axis() {
        let shaped = FixedShaper::new()
            .shape("\u{2212}", &FontDescription::new(FontFamily::Serif, 20.))
            .unwrap();
        let axis = shaped.baseline - shaped.ink.y - 0.5 * shaped.ink.height;
        assert!((axis - 5.).abs() < 1e-9);
    }

    #[test]
    fn runs_add_advances() {
        let shaper = FixedShaper::new();
        let font = FontDescription::new(FontFamily::Serif, 10.);
        let shaped = shaper.shape("xy", &font).unwrap();
        assert_eq!(shaped.ink.width, 10.);
        assert_eq!(shaped.baseline, 8.);
        assert!((shaped.ink.y - 1.).abs() < 1e-9);
        assert!((shaped.ink.height - 9.).abs() < 1e-9);

        assert_eq!(shaper.shape("", &font), None);
        assert!(shaper.shape(" ", &font).unwrap().ink.is_degenerate());
    }

    #[test]
    fn overrides_are_per_family() {
        let shaper = FixedShaper::new().with_glyph(FontFamily::Cmex10, "Z", GlyphBox::new(1., 2., 1.));
        let font = FontDescription::new(FontFamily::Cmex10, 10.);
        assert_eq!(shaper.shape("Z", &font).unwrap().ink.height, 30.);

        let serif = FontDescription::new(FontFamily::Serif, 10.);
        assert!((shaper.shape("Z", &serif).unwrap().ink.height - 7.).abs() < 1e-9);
    }
}
