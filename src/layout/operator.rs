//! Measurement primitives: text runs, operators, radical signs, the math axis.
//!
//! All of them read the current style of the [`RenderContext`] and snap their results on raster surfaces.

use crate::font::{FontDescription, FontFamily, ResolvedGlyph};
use crate::geometry::{split_around_axis, symmetric_stretch, BoxMetrics};
use crate::render::context::RenderContext;

use super::constants::{MEDIUM_SPACE, RADICAL_ORDER_X_OFFSET, RADICAL_ORDER_Y_OFFSET, RADICAL_TOP_LINE_WIDTH};

/// The string whose ink centre defines the math axis.
const AXIS_REFERENCE: &str = "\u{2212}";

/// Computes the box of an operator whose glyph has been resolved.
///
///  - Along a stretchable axis, a defined stretch request is passed through: the box takes the request's
///    width, or its height and depth.
///  - Elsewhere the box is the glyph's ink, measured from the baseline.
///  - Without a stretch request, operators flagged to sit on the math axis are re-centred on it
///    ([`split_around_axis`]).
///  - With a stretch request, symmetric operators that stretch vertically grow to be symmetric about the
///    axis ([`symmetric_stretch`]).
///
/// Negative extents are folded to zero once the box is complete.
pub fn operator_box(
    glyph: &ResolvedGlyph,
    stretch: &BoxMetrics,
    symmetric: bool,
    axis_offset: f64,
    is_vector: bool,
) -> BoxMetrics {
    let ink = glyph.ink();
    let flags = glyph.flags;

    let (mut height, mut depth) = if stretch.defined && flags.stretch_vertical {
        (stretch.height, stretch.depth)
    } else {
        (glyph.shaped.baseline - ink.y, ink.y + ink.height - glyph.shaped.baseline)
    };
    let width = if stretch.defined && flags.stretch_horizontal {
        stretch.width
    } else {
        ink.width
    };

    if !stretch.defined && flags.align_axis {
        (height, depth) = split_around_axis(height + depth, axis_offset, is_vector);
    } else if stretch.defined && symmetric && flags.stretch_vertical {
        (height, depth) = symmetric_stretch(axis_offset, height, depth, is_vector);
    }

    BoxMetrics::new(width, height, depth).folded()
}

/// Geometry of a radical sign, as computed by [`RenderContext::measure_radical`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RadicalMetrics {
    /// box of the radical sign
    pub bbox: BoxMetrics,
    /// the stretch request the sign was measured with, kept to paint the same glyph
    pub stretch: BoxMetrics,
    /// horizontal position of the right edge of an index, from the left of the sign
    pub x_offset: f64,
    /// raise of the baseline of an index above the bottom of the sign
    pub y_offset: f64,
    /// thickness of the bar above the content
    pub thickness: f64,
}

impl<'a> RenderContext<'a> {
    /// Distance from the baseline to the math axis at `math_size`: the vertical centre of the ink of a minus
    /// sign shaped in the upright serif face.
    pub fn measure_axis_offset(&mut self, math_size: f64) -> f64 {
        let font = FontDescription::new(FontFamily::Serif, math_size);
        let shaped = self.shape(AXIS_REFERENCE, &font);
        let axis = shaped.baseline - shaped.ink.y - 0.5 * shaped.ink.height;
        trace!("axis offset at {}pt: {}", math_size, axis);
        axis
    }

    /// Thinnest visible line: one device unit.
    pub fn measure_hairline(&self) -> f64 {
        self.measure_length(1.)
    }

    /// Box of a text run in the current style, shaped in the serif face. `None` measures as the null box.
    pub fn measure_text(&mut self, text: Option<&str>) -> BoxMetrics {
        let Some(text) = text else {
            return BoxMetrics::NULL;
        };
        let style = self.current_style();
        let font = FontDescription::for_variant(FontFamily::Serif, style.math_size, style.math_variant);
        let shaped = self.shape(text, &font);

        BoxMetrics::new(
            shaped.ink.width,
            shaped.baseline - shaped.ink.y,
            shaped.ink.y + shaped.ink.height - shaped.baseline,
        ).folded()
    }

    /// Box of an operator in the current style.
    ///
    /// `large` asks for the display-style rendering; `symmetric` keeps a vertically stretched operator
    /// symmetric about the axis at `axis_offset`; `stretch` is the box to cover, or the null box.
    /// `None` measures as the null box.
    pub fn measure_operator(
        &mut self,
        text: Option<&str>,
        large: bool,
        symmetric: bool,
        axis_offset: f64,
        stretch: &BoxMetrics,
    ) -> BoxMetrics {
        let Some(text) = text else {
            return BoxMetrics::NULL;
        };
        let glyph = self.resolve_glyph(text, large, stretch);
        let bbox = operator_box(&glyph, stretch, symmetric, axis_offset, self.is_vector);
        debug!("operator {:?}: glyph {:?}, w = {}, h = {}, d = {}", text, glyph.index, bbox.width, bbox.height, bbox.depth);
        bbox
    }

    /// Measures a radical sign around content of box `content`.
    ///
    /// The sign is stretched to the content grown by a medium space above and below, plus the bar
    /// thickness above.
    pub fn measure_radical(&mut self, content: &BoxMetrics) -> RadicalMetrics {
        let style = self.current_style();
        let thickness = self.measure_length(style.em(RADICAL_TOP_LINE_WIDTH));
        let thickness = if self.is_vector { thickness } else { thickness.max(1.) };
        let medium_space = self.measure_em(MEDIUM_SPACE);

        let mut stretch = *content;
        stretch.height += medium_space + thickness;
        stretch.depth += medium_space;

        let bbox = self.measure_operator(Some("\u{221a}"), false, false, 0., &stretch);

        let x_offset = self.measure_length(bbox.width * RADICAL_ORDER_X_OFFSET);
        let y_offset = self.measure_length(bbox.total_height() * RADICAL_ORDER_Y_OFFSET - style.em(MEDIUM_SPACE));

        RadicalMetrics { bbox, stretch, x_offset, y_offset, thickness }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::backend::fixed::{FixedShaper, GlyphBox};
    use crate::font::{GlyphFlags, ShapedText, TextRun};
    use crate::geometry::InkRect;
    use crate::layout::StyleContext;
    use crate::render::context::ViewSettings;

    fn glyph(flags: GlyphFlags, ink: InkRect, baseline: f64) -> ResolvedGlyph {
        ResolvedGlyph {
            run: TextRun::new("x", FontDescription::new(FontFamily::Serif, 10.)),
            shaped: ShapedText { ink, logical: ink, baseline },
            flags,
            index: Some(0),
        }
    }

    #[test]
    fn natural_box_from_ink() {
        let g = glyph(GlyphFlags::NONE, InkRect::new(1., 2., 6., 10.), 9.);
        assert_eq!(operator_box(&g, &BoxMetrics::NULL, false, 3., true), BoxMetrics::new(6., 7., 3.));
    }

    #[test]
    fn axis_aligned_box() {
        let flags = GlyphFlags { align_axis: true, ..GlyphFlags::NONE };
        let g = glyph(flags, InkRect::new(0., 4., 6., 4.), 9.);
        let bbox = operator_box(&g, &BoxMetrics::NULL, false, 3., true);
        assert_eq!(bbox, BoxMetrics::new(6., 5., 0.).folded());
        assert_eq!(bbox.height, 5.);
    }

    #[test]
    fn stretch_passes_through() {
        let flags = GlyphFlags { stretch_vertical: true, ..GlyphFlags::NONE };
        let g = glyph(flags, InkRect::new(0., 0., 4., 10.), 8.);
        let stretch = BoxMetrics::new(30., 15., 5.);
        assert_eq!(operator_box(&g, &stretch, false, 3., true), BoxMetrics::new(4., 15., 5.));
        // symmetric about the axis: half = max(3 + 5, 15 - 3) = 12
        assert_eq!(operator_box(&g, &stretch, true, 3., true), BoxMetrics::new(4., 15., 9.));

        let flags = GlyphFlags { stretch_horizontal: true, ..GlyphFlags::NONE };
        let g = glyph(flags, InkRect::new(0., 0., 4., 10.), 8.);
        assert_eq!(operator_box(&g, &stretch, true, 3., true), BoxMetrics::new(30., 8., 2.));
    }

    #[test]
    fn null_text_is_null_box() {
        let shaper = FixedShaper::new();
        let mut ctx = RenderContext::new(&shaper, ViewSettings::default());
        assert_eq!(ctx.measure_text(None), BoxMetrics::NULL);
        for stretch in [BoxMetrics::NULL, BoxMetrics::new(10., 10., 10.)] {
            assert_eq!(ctx.measure_operator(None, true, true, 2., &stretch), BoxMetrics::NULL);
        }
    }

    #[test]
    fn text_box() {
        let shaper = FixedShaper::new();
        let mut ctx = RenderContext::new(&shaper, ViewSettings::default());
        ctx.push_style(StyleContext::default().with_size(10.));
        let bbox = ctx.measure_text(Some("xy"));
        assert_eq!(bbox.width, 10.);
        assert!((bbox.height - 7.).abs() < 1e-9);
        assert!((bbox.depth - 2.).abs() < 1e-9);

        // the minus sign floats above the baseline
        let minus = ctx.measure_text(Some("\u{2212}"));
        assert_eq!(minus.depth, 0.);
        ctx.pop_style();
    }

    #[test]
    fn axis_offset() {
        let shaper = FixedShaper::new();
        let mut ctx = RenderContext::new(&shaper, ViewSettings::default());
        assert!((ctx.measure_axis_offset(20.) - 5.).abs() < 1e-9);
    }

    #[test]
    fn radical_stretch_target() {
        let shaper = FixedShaper::new()
            .with_glyph(FontFamily::Cmex10, "s", GlyphBox::new(1., 3., 1.));
        let mut ctx = RenderContext::new(&shaper, ViewSettings::default());
        ctx.push_style(StyleContext::default().with_size(12.));

        let radical = ctx.measure_radical(&BoxMetrics::new(20., 10., 2.));
        // medium space at 12pt snaps to 3, the bar to 1
        assert_eq!(radical.thickness, 1.);
        assert_eq!(radical.stretch, BoxMetrics::new(20., 14., 5.));
        assert!(radical.bbox.height >= radical.stretch.height);
        assert!(radical.bbox.depth >= radical.stretch.depth);
        ctx.pop_style();
    }
}
