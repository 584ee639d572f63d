//! Paint operations issued by nodes during the render pass.
//!
//! Every operation paints in the current style of the [`RenderContext`] and does nothing when no paint
//! backend is attached. Positions are baseline origins: `(x, y)` is the left end of the baseline of the box
//! being painted.

use std::f64::consts::PI;

use crate::font::{FontDescription, FontFamily, ShapedText, TextRun};
use crate::geometry::BoxMetrics;
use crate::layout::constants::RADICAL_TOP_LINE_WIDTH;
use crate::layout::operator::RadicalMetrics;

use super::context::RenderContext;
use super::{LineCap, LineStyle, PaintBackend, RGBA};

const DASHES: [f64; 2] = [3., 2.];
const ORIGIN_DOT: RGBA = RGBA(1., 0., 0., 0.1);
const BBOX_OVERLAY: RGBA = RGBA(0., 0., 1., 0.1);
const LOGICAL_RECT: RGBA = RGBA(1., 0., 0., 1.);
const INK_RECT: RGBA = RGBA(0., 1., 0., 1.);

fn origin_dot(out: &mut dyn PaintBackend, x: f64, y: f64) {
    out.set_source_rgba(ORIGIN_DOT);
    out.arc(x, y, 1., 0., 2. * PI);
    out.fill();
}

/// Outlines the logical and ink rectangles of a layout whose top-left corner is at `(x, y)`.
fn layout_rects(out: &mut dyn PaintBackend, x: f64, y: f64, shaped: &ShapedText) {
    out.set_line_width(0.1);
    let logical = shaped.logical;
    out.set_source_rgba(LOGICAL_RECT);
    out.rectangle(x + logical.x, y + logical.y, logical.width, logical.height);
    out.stroke();
    let ink = shaped.ink;
    out.set_source_rgba(INK_RECT);
    out.rectangle(x + ink.x, y + ink.y, ink.width, ink.height);
    out.stroke();
}

/// Line width and position of a fraction bar.
///
/// On raster surfaces the width is rounded to whole units (at least one) and the line is moved so that it
/// covers whole pixel rows: to a pixel boundary for an even width, to a pixel centre for an odd one.
fn fraction_line_geometry(x: f64, y: f64, thickness: f64, is_vector: bool) -> (f64, f64, f64) {
    if is_vector {
        return (x, y, thickness);
    }
    let rounded = ((thickness + 0.5) as i64).max(1);
    if rounded % 2 == 0 {
        ((x + 0.5).trunc(), (y + 0.5).trunc(), rounded as f64)
    } else {
        (0.5 + x.trunc(), 0.5 + y.trunc(), rounded as f64)
    }
}

impl<'a> RenderContext<'a> {
    /// Paints a text run so that its ink starts at `x` and its baseline lies on `y`.
    pub fn show_text(&mut self, x: f64, y: f64, text: Option<&str>) {
        let Some(text) = text else {
            return;
        };
        let style = self.current_style();
        let font = FontDescription::for_variant(FontFamily::Serif, style.math_size, style.math_variant);
        let shaped = self.shape(text, &font);
        if shaped.ink.is_degenerate() {
            return;
        }

        let debug = self.settings.debug_overlay;
        let Some(out) = self.painter() else {
            return;
        };

        let (left, top) = (x - shaped.ink.x, y - shaped.baseline);
        out.save();
        if debug {
            origin_dot(out, x, y);
            layout_rects(out, left, top, &shaped);
        }
        out.set_source_rgba(style.math_color);
        out.move_to(left, top);
        out.show_text(&TextRun::new(text, font));
        out.restore();
    }

    /// Paints an operator measured to `bbox` with the stretch request `stretch`.
    ///
    /// The glyph is resolved again with the same request, so it is the glyph that was measured. Its ink is
    /// placed with its top at `y - bbox.height` and scaled up along the stretchable axes it does not cover.
    pub fn show_operator(
        &mut self,
        x: f64,
        y: f64,
        text: Option<&str>,
        large: bool,
        stretch: &BoxMetrics,
        bbox: &BoxMetrics,
    ) {
        let Some(text) = text else {
            return;
        };
        if !bbox.defined {
            return;
        }

        let glyph = self.resolve_glyph(text, large, stretch);
        let ink = *glyph.ink();
        if ink.is_degenerate() {
            return;
        }

        let flags = glyph.flags;
        let scale_x = if stretch.defined && flags.stretch_horizontal && bbox.width > ink.width {
            bbox.width / ink.width
        } else {
            1.
        };
        let scale_y = if stretch.defined && flags.stretch_vertical && bbox.total_height() > ink.height {
            bbox.total_height() / ink.height
        } else {
            1.
        };
        debug!("show operator {:?}: x_scale = {}, y_scale = {}", text, scale_x, scale_y);

        let color = self.current_style().math_color;
        let debug = self.settings.debug_overlay;
        let Some(out) = self.painter() else {
            return;
        };

        out.save();
        if debug {
            origin_dot(out, x, y);
        }
        out.translate(x, y - bbox.height);
        out.scale(scale_x, scale_y);
        out.move_to(-ink.x, -ink.y);
        out.set_source_rgba(color);
        out.show_text(&glyph.run);
        out.restore();
    }

    /// Paints a radical sign at `x` and the bar covering `width` units of content to its right.
    pub fn show_radical(&mut self, x: f64, y: f64, width: f64, radical: &RadicalMetrics) {
        self.show_operator(x, y, Some("\u{221a}"), false, &radical.stretch, &radical.bbox);

        let style = self.current_style();
        let sign = radical.bbox;
        let thickness = radical.thickness;
        let x = x + sign.width;
        let bar_y = y - sign.height + 0.5 * thickness;

        let Some(out) = self.painter() else {
            return;
        };
        out.save();
        out.set_source_rgba(style.math_color);
        out.set_line_width(thickness);
        out.set_line_cap(LineCap::Round);
        out.move_to(x - 0.5 * style.em(RADICAL_TOP_LINE_WIDTH), bar_y);
        out.line_to(x + width - 0.5 * thickness, bar_y);
        out.stroke();
        out.restore();
    }

    /// Strokes a horizontal bar of `width` centred on `y`.
    ///
    /// On raster surfaces a bar thinner than a unit is drawn one unit wide with an alpha equal to its
    /// thickness.
    pub fn draw_fraction_line(&mut self, x: f64, y: f64, width: f64, thickness: f64, color: RGBA) {
        let is_vector = self.is_vector;
        let (x, y, line_width) = fraction_line_geometry(x, y, thickness, is_vector);
        let alpha = if thickness < 1. && !is_vector { thickness } else { color.alpha() };
        debug!("fraction line at y = {}, thickness = {}", y, line_width);

        let Some(out) = self.painter() else {
            return;
        };
        out.save();
        out.set_line_width(line_width);
        out.set_source_rgba(color.with_alpha(alpha));
        out.move_to(x, y);
        out.line_to(x + width, y);
        out.stroke();
        out.restore();
    }

    /// Fills `bbox` at `(x, y)` with the background colour of the current style.
    pub fn show_background(&mut self, x: f64, y: f64, bbox: &BoxMetrics) {
        let background = self.current_style().math_background;
        let Some(out) = self.painter() else {
            return;
        };
        out.set_source_rgba(background);
        out.rectangle(x, y - bbox.height, bbox.width, bbox.total_height());
        out.fill();
    }

    /// Debug overlay: fills the parts of `bbox` above and below the baseline in translucent blue.
    pub fn show_bbox(&mut self, x: f64, y: f64, bbox: &BoxMetrics) {
        if !self.settings.debug_overlay {
            return;
        }
        let Some(out) = self.painter() else {
            return;
        };
        out.set_source_rgba(BBOX_OVERLAY);
        out.rectangle(x, y, bbox.width, -bbox.height);
        out.rectangle(x, y, bbox.width, bbox.depth);
        out.fill();
    }

    fn emit_stroke_attributes(&mut self, line: LineStyle) -> Option<&mut (dyn PaintBackend + 'a)> {
        let color = self.current_style().math_color;
        let out = self.painter()?;
        match line {
            LineStyle::Dashed => out.set_dash(&DASHES, 0.),
            LineStyle::Solid => out.set_dash(&[], 0.),
        }
        out.set_line_width(1.);
        out.set_source_rgba(color);
        Some(out)
    }

    /// Strokes the outline of a rectangle, one unit wide.
    pub fn show_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64, line: LineStyle) {
        if let Some(out) = self.emit_stroke_attributes(line) {
            out.rectangle(x, y, width, height);
            out.stroke();
        }
    }

    /// Strokes a segment, one unit wide.
    pub fn show_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, line: LineStyle) {
        if let Some(out) = self.emit_stroke_attributes(line) {
            out.move_to(x0, y0);
            out.line_to(x1, y1);
            out.stroke();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::backend::fixed::FixedShaper;
    use crate::layout::StyleContext;
    use crate::render::context::ViewSettings;
    use crate::render::recording::{DrawCmd, RecordingBackend};

    #[test]
    fn raster_fraction_line() {
        assert_eq!(fraction_line_geometry(3.2, 10.7, 0.4, false), (3.5, 10.5, 1.));
        assert_eq!(fraction_line_geometry(3.2, 10.7, 1.6, false), (3., 11., 2.));
        assert_eq!(fraction_line_geometry(3.2, 10.7, 0.4, true), (3.2, 10.7, 0.4));
    }

    #[test]
    fn thin_bar_is_translucent() {
        let shaper = FixedShaper::new();
        let mut backend = RecordingBackend::raster();
        {
            let mut ctx = RenderContext::new(&shaper, ViewSettings::default());
            ctx.attach_paint_backend(&mut backend);
            ctx.draw_fraction_line(0., 10., 20., 0.4, RGBA::BLACK);
        }
        match backend.commands() {
            [DrawCmd::Stroke { line_width, color, .. }] => {
                assert_eq!(*line_width, 1.);
                assert_eq!(color.alpha(), 0.4);
            }
            cmds => panic!("unexpected commands {:?}", cmds),
        }
    }

    #[test]
    fn stroke_attributes() {
        let shaper = FixedShaper::new();
        let mut backend = RecordingBackend::raster();
        {
            let mut ctx = RenderContext::new(&shaper, ViewSettings::default());
            ctx.attach_paint_backend(&mut backend);
            ctx.push_style(StyleContext::default().with_color(RGBA(1., 0., 0., 1.)));
            ctx.show_line(0., 0., 10., 0., LineStyle::Dashed);
            ctx.show_rectangle(0., 0., 10., 5., LineStyle::Solid);
            ctx.pop_style();
        }
        match backend.commands() {
            [DrawCmd::Stroke { dash: dashed, color, line_width, .. }, DrawCmd::Stroke { dash: solid, .. }] => {
                assert_eq!(dashed, &vec![3., 2.]);
                assert!(solid.is_empty());
                assert_eq!(*color, RGBA(1., 0., 0., 1.));
                assert_eq!(*line_width, 1.);
            }
            cmds => panic!("unexpected commands {:?}", cmds),
        }
    }

    #[test]
    fn overlay_only_when_enabled() {
        let shaper = FixedShaper::new();
        let mut backend = RecordingBackend::raster();
        {
            let mut ctx = RenderContext::new(&shaper, ViewSettings::default());
            ctx.attach_paint_backend(&mut backend);
            ctx.show_bbox(0., 10., &BoxMetrics::new(5., 4., 2.));
            ctx.set_debug_overlay(true);
            ctx.show_bbox(0., 10., &BoxMetrics::new(5., 4., 2.));
        }
        match backend.commands() {
            [DrawCmd::Fill { color, .. }] => assert_eq!(*color, BBOX_OVERLAY),
            cmds => panic!("unexpected commands {:?}", cmds),
        }
    }

    #[test]
    fn empty_text_paints_nothing() {
        let shaper = FixedShaper::new();
        let mut backend = RecordingBackend::raster();
        {
            let mut ctx = RenderContext::new(&shaper, ViewSettings::default());
            ctx.attach_paint_backend(&mut backend);
            ctx.show_text(0., 0., Some(""));
            ctx.show_text(0., 0., Some(" "));
            ctx.show_text(0., 0., None);
            ctx.show_operator(0., 0., None, false, &BoxMetrics::NULL, &BoxMetrics::new(1., 1., 1.));
            ctx.show_operator(0., 0., Some("+"), false, &BoxMetrics::NULL, &BoxMetrics::NULL);
        }
        assert!(backend.commands().iter().all(|cmd| !matches!(cmd, DrawCmd::Text { .. })));
    }
}
