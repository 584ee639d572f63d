//! Chooses which rendering of an operator to measure and paint.
//!
//! Both the measure pass and the render pass go through [`resolve_operator_glyph`] with the same stretch
//! request, so they always agree on the glyph.

use crate::geometry::{BoxMetrics, InkRect};
use crate::layout::constants::LARGE_OP_SCALE;
use crate::layout::StyleContext;

use super::glyph_table::{GlyphFlags, GlyphTable, GlyphTableEntry};
use super::{FontDescription, FontFamily, ShapedText, ShapingSession, TextRun, TextShaper};

/// The rendering picked for an operator, with its shaped extents.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGlyph {
    /// what to draw
    pub run: TextRun,
    /// extents of `run`
    pub shaped: ShapedText,
    /// capabilities of the table entry, [`GlyphFlags::NONE`] on a table miss
    pub flags: GlyphFlags,
    /// index of the chosen sized rendering, `None` on a table miss
    pub index: Option<usize>,
}

impl ResolvedGlyph {
    /// Ink extents of the chosen rendering
    pub fn ink(&self) -> &InkRect {
        &self.shaped.ink
    }
}

/// Does `ink` cover the stretch request on every axis the entry can stretch along?
///
/// An entry that stretches along no axis is satisfied by anything.
fn covers(flags: &GlyphFlags, ink: &InkRect, stretch: &BoxMetrics) -> bool {
    let vertical = !flags.stretch_vertical || ink.height >= stretch.total_height();
    let horizontal = !flags.stretch_horizontal || ink.width >= stretch.width;
    vertical && horizontal
}

/// Resolves `text` to a rendering.
///
/// On a table miss the text itself is shaped in [`FontFamily::Serif`], scaled by [`LARGE_OP_SCALE`] when
/// `large`. On a hit, the sized renderings are tried smallest first:
///
///  - a large operator whose entry has a dedicated large version, and which is not asked to stretch,
///    starts at the second rendering at the plain size;
///  - otherwise every rendering is tried at the (possibly large-scaled) size.
///
/// Without a stretch request the first candidate wins. With one, the first candidate covering the request
/// wins, and the last candidate when none does.
pub fn resolve_operator_glyph(
    session: &mut ShapingSession,
    shaper: &dyn TextShaper,
    table: &GlyphTable,
    style: &StyleContext,
    text: &str,
    large: bool,
    stretch: &BoxMetrics,
) -> ResolvedGlyph {
    let large_scale = if large { LARGE_OP_SCALE } else { 1. };

    if let Some(entry) = table.find(text) {
        if let Some(resolved) = resolve_entry(session, shaper, entry, style, large, stretch) {
            return resolved;
        }
    }

    let font = FontDescription::for_variant(FontFamily::Serif, style.math_size * large_scale, style.math_variant);
    let shaped = session.shape(shaper, text, &font);
    debug!("operator {:?} not in glyph table, shaped with {}pt serif", text, font.size);
    ResolvedGlyph {
        run: TextRun::new(text, font),
        shaped,
        flags: GlyphFlags::NONE,
        index: None,
    }
}

fn resolve_entry(
    session: &mut ShapingSession,
    shaper: &dyn TextShaper,
    entry: &GlyphTableEntry,
    style: &StyleContext,
    large: bool,
    stretch: &BoxMetrics,
) -> Option<ResolvedGlyph> {
    let use_large_version = large
        && entry.flags.has_large_version
        && !stretch.defined
        && entry.sized_glyphs.len() > 1;

    let (start, size) = if use_large_version {
        (1, style.math_size)
    } else {
        (0, style.math_size * if large { LARGE_OP_SCALE } else { 1. })
    };

    if stretch.defined {
        debug!("stretching {:?} to w = {}, h = {}, d = {}", entry.text, stretch.width, stretch.height, stretch.depth);
    }

    let mut chosen = None;
    for (index, glyph) in entry.sized_glyphs.iter().enumerate().skip(start) {
        let font = FontDescription::new(glyph.font, size);
        let shaped = session.shape(shaper, &glyph.utf8, &font);
        trace!("glyph #{} of {:?}: width = {}, height = {}", index, entry.text, shaped.ink.width, shaped.ink.height);

        let accepted = !stretch.defined || covers(&entry.flags, &shaped.ink, stretch);
        chosen = Some(ResolvedGlyph {
            run: TextRun::new(glyph.utf8.as_str(), font),
            shaped,
            flags: entry.flags,
            index: Some(index),
        });
        if accepted {
            debug!("found sized glyph #{} for {:?}", index, entry.text);
            break;
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::backend::fixed::{FixedShaper, GlyphBox};
    use crate::font::glyph_table::GlyphTableEntry;
    use crate::font::FontFamily::{Cmex10, Serif};

    fn delimiter_table() -> GlyphTable {
        GlyphTable::from_entries(vec![
            GlyphTableEntry::new("(", GlyphFlags { stretch_vertical: true, ..GlyphFlags::NONE },
                &[(Serif, "("), (Cmex10, "1"), (Cmex10, "2"), (Cmex10, "3")]),
            GlyphTableEntry::new("S", GlyphFlags { has_large_version: true, align_axis: true, ..GlyphFlags::NONE },
                &[(Cmex10, "s"), (Cmex10, "S")]),
        ])
    }

    fn shaper() -> FixedShaper {
        // ink heights at 10pt: 10, 20, 30, 40
        FixedShaper::new()
            .with_glyph(Serif, "(", GlyphBox::new(0.4, 0.75, 0.25))
            .with_glyph(Cmex10, "1", GlyphBox::new(0.5, 1.5, 0.5))
            .with_glyph(Cmex10, "2", GlyphBox::new(0.6, 2.0, 1.0))
            .with_glyph(Cmex10, "3", GlyphBox::new(0.7, 3.0, 1.0))
    }

    fn resolve(text: &str, large: bool, stretch: &BoxMetrics) -> ResolvedGlyph {
        let style = StyleContext::default().with_size(10.);
        resolve_operator_glyph(&mut ShapingSession::new(), &shaper(), &delimiter_table(), &style, text, large, stretch)
    }

    #[test]
    fn natural_size_takes_first() {
        let glyph = resolve("(", false, &BoxMetrics::NULL);
        assert_eq!(glyph.index, Some(0));
        assert_eq!(glyph.run.font.family, Serif);
        assert_eq!(glyph.run.font.size, 10.);
    }

    #[test]
    fn stretch_picks_first_covering() {
        let glyph = resolve("(", false, &BoxMetrics::new(5., 15., 10.));
        assert_eq!(glyph.index, Some(2));
        assert_eq!(glyph.run.text, "2");

        // exactly covering is enough
        let glyph = resolve("(", false, &BoxMetrics::new(5., 12., 8.));
        assert_eq!(glyph.index, Some(1));
    }

    #[test]
    fn stretch_falls_back_to_last() {
        let glyph = resolve("(", false, &BoxMetrics::new(5., 100., 100.));
        assert_eq!(glyph.index, Some(3));
    }

    #[test]
    fn large_version() {
        let glyph = resolve("S", true, &BoxMetrics::NULL);
        assert_eq!(glyph.index, Some(1));
        assert_eq!(glyph.run.font.size, 10.);

        // a stretch request disables the dedicated large version
        let glyph = resolve("S", true, &BoxMetrics::new(1., 1., 1.));
        assert_eq!(glyph.index, Some(0));
        assert_eq!(glyph.run.font.size, 16.);
    }

    #[test]
    fn table_miss_uses_serif() {
        let glyph = resolve("x", true, &BoxMetrics::NULL);
        assert_eq!(glyph.index, None);
        assert_eq!(glyph.flags, GlyphFlags::NONE);
        assert_eq!(glyph.run, TextRun::new("x", FontDescription::new(Serif, 16.)));
    }

    #[test]
    fn resolution_is_deterministic() {
        let stretch = BoxMetrics::new(5., 15., 10.);
        assert_eq!(resolve("(", false, &stretch), resolve("(", false, &stretch));
        assert_eq!(resolve("y", false, &stretch), resolve("y", false, &stretch));
    }
}
