//! Measuring and positioning formula nodes.
//!
//! A formula is a tree of nodes implementing [`MathNode`]. Laying it out takes three passes over the tree,
//! driven by [`engine`]:
//!
//!  1. **measure**: every node computes its [`BoxMetrics`] bottom-up. A node may receive a *stretch request*,
//!     a box it should grow to cover (a fence next to a tall fraction, for instance).
//!  2. **layout**: every node receives the absolute position of its baseline origin and places its children.
//!  3. **render**: every node issues paint calls through the [`RenderContext`].
//!
//! While a node is processed, its [`StyleContext`] is the top of the context's style stack: measurement
//! primitives such as [`RenderContext::measure_text`] read the math size, variant and colour from there.
//!
//! Coordinates grow rightwards and downwards; the y coordinate handed to a node is its baseline.

pub mod constants;
pub mod engine;
pub mod nodes;
pub mod operator;

use crate::dimensions::units::{Em, FontSize};
use crate::dimensions::Unit;
use crate::geometry::BoxMetrics;
use crate::render::context::RenderContext;
use crate::render::RGBA;

/// Mathematical variants of text, as in the `mathvariant` attribute.
///
/// Only the italic and bold flavours change the font text is shaped with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MathVariant {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
    DoubleStruck,
    BoldFraktur,
    Script,
    BoldScript,
    Fraktur,
    SansSerif,
    BoldSansSerif,
    SansSerifItalic,
    SansSerifBoldItalic,
    Monospace,
}

/// Resolved presentation attributes of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleContext {
    /// font size in points
    pub math_size: f64,
    /// text variant
    pub math_variant: MathVariant,
    /// colour of text, operators and lines
    pub math_color: RGBA,
    /// colour of the node's background, not painted when fully transparent
    pub math_background: RGBA,
}

impl Default for StyleContext {
    fn default() -> Self {
        Self {
            math_size: 12.,
            math_variant: MathVariant::Normal,
            math_color: RGBA::BLACK,
            math_background: RGBA::TRANSPARENT,
        }
    }
}

impl StyleContext {
    /// Same style at another font size
    pub fn with_size(self, math_size: f64) -> Self {
        Self { math_size, ..self }
    }

    /// Same style with another text variant
    pub fn with_variant(self, math_variant: MathVariant) -> Self {
        Self { math_variant, ..self }
    }

    /// Same style with another foreground colour
    pub fn with_color(self, math_color: RGBA) -> Self {
        Self { math_color, ..self }
    }

    /// Same style with another background colour
    pub fn with_background(self, math_background: RGBA) -> Self {
        Self { math_background, ..self }
    }

    /// Style of scripts attached to a node of this style: the size shrinks by
    /// [`SCRIPT_SIZE_MULTIPLIER`](constants::SCRIPT_SIZE_MULTIPLIER).
    pub fn script(self) -> Self {
        self.with_size(self.math_size * constants::SCRIPT_SIZE_MULTIPLIER)
    }

    /// The font size as a typed ratio
    pub fn font_size(&self) -> Unit<FontSize> {
        Unit::<FontSize>::from_points(self.math_size)
    }

    /// Device length of an em quantity in this style, unsnapped.
    pub fn em(&self, len: Unit<Em>) -> f64 {
        self.font_size().length(len)
    }
}

/// Where a node ended up: the baseline origin given by the layout pass and the box from the measure pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeGeometry {
    /// left edge
    pub x: f64,
    /// baseline
    pub y: f64,
    /// measured box
    pub bbox: BoxMetrics,
}

/// The capability every formula node provides to the layout engine.
///
/// Nodes never call each other's passes directly: children are measured, laid out and rendered through
/// [`engine::measure_node`], [`engine::layout_node`] and [`engine::render_node`], which keep the style
/// stack balanced and record the resulting [`NodeGeometry`].
pub trait MathNode {
    /// Short name used in log messages
    fn kind(&self) -> &'static str;

    /// Presentation attributes of this node
    fn style(&self) -> &StyleContext;

    /// Can this node grow to a stretch request? Rows re-measure stretchy children against their siblings.
    fn is_stretchy(&self) -> bool {
        false
    }

    /// Position and box recorded by the engine
    fn geometry(&self) -> &NodeGeometry;

    /// Mutable access for the engine
    fn geometry_mut(&mut self) -> &mut NodeGeometry;

    /// Computes the box of this node. `stretch` is the null box unless the node is asked to grow.
    /// Must be idempotent for identical inputs.
    fn measure(&mut self, ctx: &mut RenderContext<'_>, stretch: &BoxMetrics) -> BoxMetrics;

    /// Positions the children given this node's baseline origin and box.
    fn layout(&mut self, ctx: &mut RenderContext<'_>, x: f64, y: f64, bbox: &BoxMetrics);

    /// Paints this node and its children.
    fn render(&mut self, ctx: &mut RenderContext<'_>);

    /// Visits the direct children, in paint order.
    fn for_each_child(&self, _f: &mut dyn FnMut(&dyn MathNode)) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn em_lengths_follow_style() {
        let style = StyleContext::default().with_size(18.);
        assert!((style.em(constants::MEDIUM_SPACE) - 4.).abs() < 1e-9);
        assert!((style.script().math_size - 12.78).abs() < 1e-9);
        assert_eq!(style.script().math_color, style.math_color);
    }
}
