//! State shared by the three passes over a formula tree.

use crate::dimensions::units::Em;
use crate::dimensions::Unit;
use crate::error::{RenderError, RenderResult};
use crate::font::{
    resolve_operator_glyph, FontDescription, GlyphTable, ResolvedGlyph, ShapedText, ShapingSession, TextShaper,
};
use crate::geometry::{snap_length, BoxMetrics};
use crate::layout::StyleContext;

use super::PaintBackend;

/// Settings of a [`RenderContext`]. Hosts can load them with serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Paint diagnostics: node boxes, text ink and logical rectangles, origin dots.
    pub debug_overlay: bool,
    /// Deepest nesting of nodes processed; deeper subtrees measure as the null box.
    pub max_depth: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self { debug_overlay: false, max_depth: 256 }
    }
}

/// Everything a node needs while it is measured, laid out and painted.
///
/// The context owns the style stack, the attachment to a paint backend and the shaping session that lives
/// as long as that attachment. It is not meant to be shared between threads; one context processes one tree
/// at a time.
pub struct RenderContext<'a> {
    pub(crate) shaper: &'a dyn TextShaper,
    pub(crate) glyphs: &'a GlyphTable,
    pub(crate) settings: ViewSettings,
    pub(crate) target: Option<&'a mut dyn PaintBackend>,
    pub(crate) session: ShapingSession,
    pub(crate) is_vector: bool,
    styles: Vec<StyleContext>,
    depth: usize,
    fault: Option<RenderError>,
}

impl<'a> RenderContext<'a> {
    /// Creates a context measuring with `shaper` and the built-in glyph table. Until a paint backend is
    /// attached, lengths are snapped as for a raster surface.
    pub fn new(shaper: &'a dyn TextShaper, settings: ViewSettings) -> Self {
        Self {
            shaper,
            glyphs: GlyphTable::builtin(),
            settings,
            target: None,
            session: ShapingSession::new(),
            is_vector: false,
            styles: Vec::new(),
            depth: 0,
            fault: None,
        }
    }

    /// Uses `glyphs` instead of the built-in table.
    pub fn with_glyph_table(mut self, glyphs: &'a GlyphTable) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Current settings
    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    /// Turns the debug overlay on or off.
    pub fn set_debug_overlay(&mut self, debug: bool) {
        self.settings.debug_overlay = debug;
    }

    /// Attaches the surface later render calls paint on, replacing any previous attachment.
    ///
    /// The vector/raster kind is read from the backend and a fresh shaping session starts.
    pub fn attach_paint_backend(&mut self, backend: &'a mut dyn PaintBackend) {
        self.is_vector = backend.is_vector();
        self.session = ShapingSession::new();
        debug!("attached {} paint backend", if self.is_vector { "vector" } else { "raster" });
        self.target = Some(backend);
    }

    /// Drops the attachment and its shaping session.
    pub fn detach_paint_backend(&mut self) {
        self.target = None;
        self.session = ShapingSession::new();
        self.is_vector = false;
    }

    /// Is a paint backend attached?
    pub fn has_paint_backend(&self) -> bool {
        self.target.is_some()
    }

    /// Are lengths kept exact (vector surface) rather than snapped to whole units?
    pub fn is_vector(&self) -> bool {
        self.is_vector
    }

    /// Makes `style` the current style.
    ///
    /// [`crate::layout::engine`] pushes and pops the style of every node it processes; hosts driving
    /// measurement primitives by hand must keep their own pushes and pops balanced.
    pub fn push_style(&mut self, style: StyleContext) {
        trace!("push style (size {}), depth {}", style.math_size, self.styles.len() + 1);
        self.styles.push(style);
    }

    /// Restores the style that was current before the matching [`RenderContext::push_style`].
    pub fn pop_style(&mut self) -> Option<StyleContext> {
        let style = self.styles.pop();
        trace!("pop style, depth {}", self.styles.len());
        style
    }

    /// Number of styles on the stack
    pub fn style_depth(&self) -> usize {
        self.styles.len()
    }

    /// The style of the node being processed. Outside of any node this is the default style.
    pub fn current_style(&self) -> StyleContext {
        self.styles.last().copied().unwrap_or_default()
    }

    /// Snaps a length to whole units on raster surfaces.
    pub fn measure_length(&self, length: f64) -> f64 {
        snap_length(length, self.is_vector)
    }

    /// Snapped device length of an em quantity in the current style.
    pub fn measure_em(&self, length: Unit<Em>) -> f64 {
        self.measure_length(self.current_style().em(length))
    }

    pub(crate) fn shape(&mut self, text: &str, font: &FontDescription) -> ShapedText {
        self.session.shape(self.shaper, text, font)
    }

    pub(crate) fn resolve_glyph(&mut self, text: &str, large: bool, stretch: &BoxMetrics) -> ResolvedGlyph {
        let style = self.current_style();
        resolve_operator_glyph(&mut self.session, self.shaper, self.glyphs, &style, text, large, stretch)
    }

    pub(crate) fn painter(&mut self) -> Option<&mut (dyn PaintBackend + 'a)> {
        self.target.as_deref_mut()
    }

    /// Starts a top-level call.
    pub(crate) fn begin_pass(&mut self) {
        self.depth = 0;
        self.fault = None;
    }

    /// Finishes a top-level call: the style stack must be empty again.
    pub(crate) fn end_pass(&mut self) -> RenderResult<()> {
        if !self.styles.is_empty() {
            warn!("{} style contexts left on the stack, clearing", self.styles.len());
            self.styles.clear();
        }
        match self.fault.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Enters one level of nesting; `false` when the limit is reached.
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= self.settings.max_depth {
            if self.fault.is_none() {
                warn!("formula nests deeper than {} levels, subtree skipped", self.settings.max_depth);
                self.fault = Some(RenderError::NestingTooDeep { limit: self.settings.max_depth });
            }
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::backend::fixed::FixedShaper;
    use crate::render::recording::RecordingBackend;

    #[test]
    fn style_stack() {
        let shaper = FixedShaper::new();
        let mut ctx = RenderContext::new(&shaper, ViewSettings::default());
        assert_eq!(ctx.current_style(), StyleContext::default());

        ctx.push_style(StyleContext::default().with_size(20.));
        ctx.push_style(StyleContext::default().with_size(30.));
        assert_eq!(ctx.current_style().math_size, 30.);
        assert_eq!(ctx.pop_style().map(|s| s.math_size), Some(30.));
        assert_eq!(ctx.current_style().math_size, 20.);
        assert_eq!(ctx.style_depth(), 1);

        // a dangling push is cleared, not reported as an error
        assert_eq!(ctx.end_pass(), Ok(()));
        assert_eq!(ctx.style_depth(), 0);
    }

    #[test]
    fn attachment_sets_surface_kind() {
        let shaper = FixedShaper::new();
        let mut backend = RecordingBackend::vector();
        let mut ctx = RenderContext::new(&shaper, ViewSettings::default());
        assert!(!ctx.is_vector());
        assert_eq!(ctx.measure_length(2.4), 2.);

        ctx.attach_paint_backend(&mut backend);
        assert!(ctx.has_paint_backend());
        assert!(ctx.is_vector());
        assert_eq!(ctx.measure_length(2.4), 2.4);

        ctx.detach_paint_backend();
        assert!(!ctx.has_paint_backend());
    }

    #[test]
    fn depth_limit() {
        let shaper = FixedShaper::new();
        let mut ctx = RenderContext::new(&shaper, ViewSettings { max_depth: 2, ..ViewSettings::default() });
        ctx.begin_pass();
        assert!(ctx.enter());
        assert!(ctx.enter());
        assert!(!ctx.enter());
        ctx.leave();
        ctx.leave();
        assert_eq!(ctx.end_pass(), Err(RenderError::NestingTooDeep { limit: 2 }));
    }

    #[test]
    fn settings_from_json() {
        let settings : ViewSettings = serde_json::from_str(r#"{ "debug_overlay": true }"#).unwrap();
        assert_eq!(settings, ViewSettings { debug_overlay: true, max_depth: 256 });
    }
}
