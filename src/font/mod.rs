/// Implementations of the [`TextShaper`] trait: a deterministic font-less shaper and one backed by 'ttf-parser'.
#[deny(missing_docs)]
pub mod backend;
/// The table of operator glyphs: which strings can be enlarged or stretched, and the sized renderings to try.
#[deny(missing_docs)]
pub mod glyph_table;
/// Picks the sized rendering of an operator that best satisfies a stretch request.
#[deny(missing_docs)]
pub mod resolver;

use std::collections::HashMap;

use crate::geometry::InkRect;
use crate::layout::MathVariant;

pub use self::glyph_table::{GlyphFlags, GlyphTable, GlyphTableEntry, SizedGlyph};
pub use self::resolver::{resolve_operator_glyph, ResolvedGlyph};

/// Font families the engine shapes text with.
///
/// Plain text and operators missing from the glyph table use [`FontFamily::Serif`]; the TeX families hold
/// the sized renderings of stretchy operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// generic serif face
    Serif,
    /// TeX roman
    Cmr10,
    /// TeX math extension (big delimiters, big operators)
    Cmex10,
    /// TeX math symbols
    Cmsy10,
    /// symbol face
    Symbol,
}

impl FontFamily {
    /// The family name handed to a font system.
    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Serif  => "Serif",
            FontFamily::Cmr10  => "cmr10",
            FontFamily::Cmex10 => "cmex10",
            FontFamily::Cmsy10 => "cmsy10",
            FontFamily::Symbol => "Symbol",
        }
    }
}

/// Slant of a face
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontStyle {
    /// upright
    #[default]
    Normal,
    /// slanted
    Italic,
}

/// Weight of a face
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    /// regular
    #[default]
    Normal,
    /// bold
    Bold,
}

/// Family, size (in points), slant and weight of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontDescription {
    /// family
    pub family: FontFamily,
    /// size in points
    pub size: f64,
    /// slant
    pub style: FontStyle,
    /// weight
    pub weight: FontWeight,
}

impl FontDescription {
    /// An upright, regular-weight font.
    pub fn new(family: FontFamily, size: f64) -> Self {
        Self { family, size, style: FontStyle::Normal, weight: FontWeight::Normal }
    }

    /// The font plain text of the given mathematical variant is shaped with.
    pub fn for_variant(family: FontFamily, size: f64, variant: MathVariant) -> Self {
        let style = match variant {
            MathVariant::Italic | MathVariant::BoldItalic => FontStyle::Italic,
            _ => FontStyle::Normal,
        };
        let weight = match variant {
            MathVariant::Bold | MathVariant::BoldItalic => FontWeight::Bold,
            _ => FontWeight::Normal,
        };
        Self { family, size, style, weight }
    }
}

/// A string with the font it is shaped and drawn with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// UTF-8 text
    pub text: String,
    /// font of the run
    pub font: FontDescription,
}

impl TextRun {
    /// Creates a run
    pub fn new(text: impl Into<String>, font: FontDescription) -> Self {
        Self { text: text.into(), font }
    }
}

/// Extents of a shaped run, relative to the top-left of its layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapedText {
    /// the area actually covered by glyph outlines
    pub ink: InkRect,
    /// the typographic extent of the layout
    pub logical: InkRect,
    /// distance from the top of the layout to the baseline
    pub baseline: f64,
}

impl ShapedText {
    /// A run with no extent. Shaping failures measure as this.
    pub const EMPTY: Self = Self { ink: InkRect::ZERO, logical: InkRect::ZERO, baseline: 0. };
}

/// The text shaping capability the engine measures with.
///
/// A shaper must be deterministic: the same text and font always give the same extents, so that the
/// glyph picked while measuring is the glyph that gets painted.
pub trait TextShaper {
    /// Shapes `text` with `font`. Returns `None` when the text cannot be shaped at all.
    fn shape(&self, text: &str, font: &FontDescription) -> Option<ShapedText>;
}

impl<T: TextShaper + ?Sized> TextShaper for &T {
    fn shape(&self, text: &str, font: &FontDescription) -> Option<ShapedText> {
        (**self).shape(text, font)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SessionKey {
    text: String,
    family: FontFamily,
    size: u64,
    style: FontStyle,
    weight: FontWeight,
}

impl SessionKey {
    fn new(text: &str, font: &FontDescription) -> Self {
        Self {
            text: text.to_owned(),
            family: font.family,
            size: font.size.to_bits(),
            style: font.style,
            weight: font.weight,
        }
    }
}

/// Memo of shaping results, living as long as a paint backend attachment.
///
/// A run that fails to shape is remembered as [`ShapedText::EMPTY`]; the failure is logged once.
#[derive(Debug, Default)]
pub struct ShapingSession {
    cache: HashMap<SessionKey, ShapedText>,
}

impl ShapingSession {
    /// An empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes `text`, reusing an earlier result for the same text and font.
    pub fn shape(&mut self, shaper: &dyn TextShaper, text: &str, font: &FontDescription) -> ShapedText {
        let key = SessionKey::new(text, font);
        if let Some(shaped) = self.cache.get(&key) {
            return *shaped;
        }

        let shaped = match shaper.shape(text, font) {
            Some(shaped) => shaped,
            None => {
                warn!("failed to shape {:?} with {} {}pt", text, font.family.name(), font.size);
                ShapedText::EMPTY
            }
        };
        self.cache.insert(key, shaped);
        shaped
    }

    /// Number of distinct runs shaped so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Has nothing been shaped yet?
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingShaper {
        calls: Cell<usize>,
    }

    impl TextShaper for CountingShaper {
        fn shape(&self, text: &str, font: &FontDescription) -> Option<ShapedText> {
            self.calls.set(self.calls.get() + 1);
            if text == "?" {
                return None;
            }
            let width = 0.5 * font.size * text.chars().count() as f64;
            Some(ShapedText {
                ink: InkRect::new(0., 0., width, font.size),
                logical: InkRect::new(0., 0., width, font.size),
                baseline: 0.8 * font.size,
            })
        }
    }

    #[test]
    fn session_memoizes() {
        let shaper = CountingShaper { calls: Cell::new(0) };
        let mut session = ShapingSession::new();
        let font = FontDescription::new(FontFamily::Serif, 12.);

        let a = session.shape(&shaper, "ab", &font);
        let b = session.shape(&shaper, "ab", &font);
        assert_eq!(a, b);
        assert_eq!(shaper.calls.get(), 1);

        session.shape(&shaper, "ab", &FontDescription::new(FontFamily::Serif, 14.));
        assert_eq!(shaper.calls.get(), 2);
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn failures_shape_as_empty() {
        let shaper = CountingShaper { calls: Cell::new(0) };
        let mut session = ShapingSession::new();
        let font = FontDescription::new(FontFamily::Serif, 12.);
        assert_eq!(session.shape(&shaper, "?", &font), ShapedText::EMPTY);
    }

    #[test]
    fn variant_styles() {
        let italic = FontDescription::for_variant(FontFamily::Serif, 10., MathVariant::Italic);
        assert_eq!(italic.style, FontStyle::Italic);
        assert_eq!(italic.weight, FontWeight::Normal);

        let bold_italic = FontDescription::for_variant(FontFamily::Serif, 10., MathVariant::BoldItalic);
        assert_eq!(bold_italic.style, FontStyle::Italic);
        assert_eq!(bold_italic.weight, FontWeight::Bold);

        let script = FontDescription::for_variant(FontFamily::Serif, 10., MathVariant::Script);
        assert_eq!(script, FontDescription::new(FontFamily::Serif, 10.));
    }
}
