//! Node kinds shipped with the crate: text tokens, spaces, operators, rows, fractions, radicals and scripts.
//!
//! Each node carries its own resolved [`StyleContext`]; nothing is inherited from the parent. Scripts, for
//! instance, are expected to be given a [`StyleContext::script`] style by whoever builds the tree.
//!
//! ```
//! use mathview::layout::nodes::{Fraction, Operator, Row, Text};
//! use mathview::layout::StyleContext;
//!
//! // ( a / b )
//! let style = StyleContext::default().with_size(20.);
//! let mut formula = Row::new()
//!     .with(Operator::new("(").stretchy().with_style(style))
//!     .with(Fraction::new(Text::new("a").with_style(style), Text::new("b").with_style(style)).with_style(style))
//!     .with(Operator::new(")").stretchy().with_style(style))
//!     .with_style(style);
//! # let _ = &mut formula;
//! ```

use crate::dimensions::units::Em;
use crate::dimensions::Unit;
use crate::geometry::BoxMetrics;
use crate::render::context::RenderContext;

use super::constants::{
    SCRIPT_SPACE, SUBSCRIPT_SHIFT_DOWN, SUB_SUPERSCRIPT_GAP_MIN, SUPERSCRIPT_DROP_MAX, SUPERSCRIPT_SHIFT_UP,
    THIN_SPACE,
};
use super::engine::{layout_node, measure_node, render_node};
use super::operator::RadicalMetrics;
use super::{MathNode, NodeGeometry, StyleContext};

/// An owned child node
pub type Child = Box<dyn MathNode>;

macro_rules! node_accessors {
    ($kind:literal) => {
        fn kind(&self) -> &'static str { $kind }
        fn style(&self) -> &StyleContext { &self.style }
        fn geometry(&self) -> &NodeGeometry { &self.geometry }
        fn geometry_mut(&mut self) -> &mut NodeGeometry { &mut self.geometry }
    };
}

macro_rules! with_style {
    ($($node:ident),*) => {
        $(
            impl $node {
                /// Replaces the style of this node
                pub fn with_style(mut self, style: StyleContext) -> Self {
                    self.style = style;
                    self
                }
            }
        )*
    };
}

with_style!(Text, Space, Operator, Row, Fraction, Radical, Scripts);

fn measure_child(ctx: &mut RenderContext<'_>, child: &mut Option<Child>) -> BoxMetrics {
    match child {
        Some(child) => measure_node(ctx, child.as_mut(), &BoxMetrics::NULL),
        None => BoxMetrics::NULL,
    }
}

fn child_box(child: &Option<Child>) -> BoxMetrics {
    child.as_ref().map_or(BoxMetrics::NULL, |child| child.geometry().bbox)
}

/// A run of text: identifier, number or plain text.
pub struct Text {
    text: String,
    style: StyleContext,
    geometry: NodeGeometry,
}

impl Text {
    /// Creates a text token in the default style
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), style: StyleContext::default(), geometry: NodeGeometry::default() }
    }
}

impl MathNode for Text {
    node_accessors!("text");

    fn measure(&mut self, ctx: &mut RenderContext<'_>, _stretch: &BoxMetrics) -> BoxMetrics {
        ctx.measure_text(Some(&self.text))
    }

    fn layout(&mut self, _ctx: &mut RenderContext<'_>, _x: f64, _y: f64, _bbox: &BoxMetrics) {}

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        ctx.show_text(self.geometry.x, self.geometry.y, Some(&self.text));
    }
}

/// Fixed horizontal space
pub struct Space {
    width: Unit<Em>,
    style: StyleContext,
    geometry: NodeGeometry,
}

impl Space {
    /// Creates a space of `width`
    pub fn new(width: Unit<Em>) -> Self {
        Self { width, style: StyleContext::default(), geometry: NodeGeometry::default() }
    }
}

impl MathNode for Space {
    node_accessors!("space");

    fn measure(&mut self, ctx: &mut RenderContext<'_>, _stretch: &BoxMetrics) -> BoxMetrics {
        BoxMetrics::new(ctx.measure_em(self.width), 0., 0.)
    }

    fn layout(&mut self, _ctx: &mut RenderContext<'_>, _x: f64, _y: f64, _bbox: &BoxMetrics) {}

    fn render(&mut self, _ctx: &mut RenderContext<'_>) {}
}

/// An operator, fence or separator.
///
/// A stretchy operator grows to the stretch request it is measured with and keeps that request to be painted
/// with the same glyph.
pub struct Operator {
    text: Option<String>,
    large: bool,
    symmetric: bool,
    stretchy: bool,
    stretch: BoxMetrics,
    style: StyleContext,
    geometry: NodeGeometry,
}

impl Operator {
    /// Creates a symmetric, non-stretchy operator of normal size.
    pub fn new(text: impl Into<String>) -> Self {
        Self::from_text(Some(text.into()))
    }

    /// An operator with no text: measures as the null box and paints nothing.
    pub fn empty() -> Self {
        Self::from_text(None)
    }

    fn from_text(text: Option<String>) -> Self {
        Self {
            text,
            large: false,
            symmetric: true,
            stretchy: false,
            stretch: BoxMetrics::NULL,
            style: StyleContext::default(),
            geometry: NodeGeometry::default(),
        }
    }

    /// Uses the display-style rendering
    pub fn large(mut self) -> Self {
        self.large = true;
        self
    }

    /// Accepts stretch requests
    pub fn stretchy(mut self) -> Self {
        self.stretchy = true;
        self
    }

    /// Whether a vertical stretch stays symmetric about the math axis
    pub fn symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    /// The stretch request of the last measurement
    pub fn stretch(&self) -> &BoxMetrics {
        &self.stretch
    }
}

impl MathNode for Operator {
    node_accessors!("operator");

    fn is_stretchy(&self) -> bool {
        self.stretchy
    }

    fn measure(&mut self, ctx: &mut RenderContext<'_>, stretch: &BoxMetrics) -> BoxMetrics {
        let axis = ctx.measure_axis_offset(self.style.math_size);
        self.stretch = if self.stretchy { *stretch } else { BoxMetrics::NULL };
        ctx.measure_operator(self.text.as_deref(), self.large, self.symmetric, axis, &self.stretch)
    }

    fn layout(&mut self, _ctx: &mut RenderContext<'_>, _x: f64, _y: f64, _bbox: &BoxMetrics) {}

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        let geometry = self.geometry;
        ctx.show_operator(geometry.x, geometry.y, self.text.as_deref(), self.large, &self.stretch, &geometry.bbox);
    }
}

/// A horizontal list of nodes.
///
/// Stretchy children are measured a second time, asked to cover the union of the boxes of the other
/// children.
pub struct Row {
    children: Vec<Child>,
    style: StyleContext,
    geometry: NodeGeometry,
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

impl Row {
    /// An empty row
    pub fn new() -> Self {
        Self { children: Vec::new(), style: StyleContext::default(), geometry: NodeGeometry::default() }
    }

    /// Appends `child`
    pub fn with(mut self, child: impl MathNode + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    /// Appends an already boxed child
    pub fn push(&mut self, child: Child) {
        self.children.push(child);
    }

    /// The children, in order
    pub fn children(&self) -> &[Child] {
        &self.children
    }
}

impl MathNode for Row {
    node_accessors!("row");

    fn measure(&mut self, ctx: &mut RenderContext<'_>, _stretch: &BoxMetrics) -> BoxMetrics {
        let mut content = BoxMetrics::NULL;
        let mut has_stretchy = false;
        for child in &mut self.children {
            let bbox = measure_node(ctx, child.as_mut(), &BoxMetrics::NULL);
            if child.is_stretchy() {
                has_stretchy = true;
            } else {
                content = content.union(&bbox);
            }
        }

        if has_stretchy && content.defined {
            for child in self.children.iter_mut().filter(|child| child.is_stretchy()) {
                measure_node(ctx, child.as_mut(), &content);
            }
        }

        self.children.iter()
            .fold(BoxMetrics::ZERO, |bbox, child| bbox.append(&child.geometry().bbox))
    }

    fn layout(&mut self, ctx: &mut RenderContext<'_>, x: f64, y: f64, _bbox: &BoxMetrics) {
        let mut cursor = x;
        for child in &mut self.children {
            let bbox = child.geometry().bbox;
            layout_node(ctx, child.as_mut(), cursor, y, &bbox);
            if bbox.defined {
                cursor += bbox.width;
            }
        }
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        for child in &mut self.children {
            render_node(ctx, child.as_mut());
        }
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn MathNode)) {
        for child in &self.children {
            f(child.as_ref());
        }
    }
}

/// A numerator over a denominator, separated by a bar on the math axis.
pub struct Fraction {
    numerator: Child,
    denominator: Child,
    line_thickness: Option<Unit<Em>>,
    axis: f64,
    thickness: f64,
    space: f64,
    style: StyleContext,
    geometry: NodeGeometry,
}

impl Fraction {
    /// A fraction with a hairline bar
    pub fn new(numerator: impl MathNode + 'static, denominator: impl MathNode + 'static) -> Self {
        Self {
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
            line_thickness: None,
            axis: 0.,
            thickness: 0.,
            space: 0.,
            style: StyleContext::default(),
            geometry: NodeGeometry::default(),
        }
    }

    /// Sets the bar thickness; zero draws no bar.
    pub fn with_line_thickness(mut self, thickness: Unit<Em>) -> Self {
        self.line_thickness = Some(thickness);
        self
    }
}

impl MathNode for Fraction {
    node_accessors!("fraction");

    fn measure(&mut self, ctx: &mut RenderContext<'_>, _stretch: &BoxMetrics) -> BoxMetrics {
        let num = measure_node(ctx, self.numerator.as_mut(), &BoxMetrics::NULL);
        let den = measure_node(ctx, self.denominator.as_mut(), &BoxMetrics::NULL);

        self.axis = ctx.measure_axis_offset(self.style.math_size);
        self.thickness = match self.line_thickness {
            Some(thickness) => ctx.measure_em(thickness),
            None => ctx.measure_hairline(),
        };
        self.space = ctx.measure_em(THIN_SPACE);

        let half = 0.5 * self.thickness;
        BoxMetrics::new(
            num.width.max(den.width) + 2. * self.space,
            self.axis + half + self.space + num.total_height(),
            den.total_height() + self.space + half - self.axis,
        ).folded()
    }

    fn layout(&mut self, ctx: &mut RenderContext<'_>, x: f64, y: f64, bbox: &BoxMetrics) {
        let half = 0.5 * self.thickness;

        let num = self.numerator.geometry().bbox;
        let num_x = x + 0.5 * (bbox.width - num.width);
        let num_y = y - self.axis - half - self.space - num.depth;
        layout_node(ctx, self.numerator.as_mut(), num_x, num_y, &num);

        let den = self.denominator.geometry().bbox;
        let den_x = x + 0.5 * (bbox.width - den.width);
        let den_y = y - self.axis + half + self.space + den.height;
        layout_node(ctx, self.denominator.as_mut(), den_x, den_y, &den);
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        render_node(ctx, self.numerator.as_mut());
        render_node(ctx, self.denominator.as_mut());

        if self.thickness > 0. {
            let geometry = self.geometry;
            ctx.draw_fraction_line(
                geometry.x, geometry.y - self.axis, geometry.bbox.width, self.thickness, self.style.math_color,
            );
        }
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn MathNode)) {
        f(self.numerator.as_ref());
        f(self.denominator.as_ref());
    }
}

/// A square root, or an n-th root when an index is given.
pub struct Radical {
    base: Child,
    index: Option<Child>,
    radical: RadicalMetrics,
    sign_x: f64,
    index_raise: f64,
    style: StyleContext,
    geometry: NodeGeometry,
}

impl Radical {
    /// Square root of `base`
    pub fn new(base: impl MathNode + 'static) -> Self {
        Self {
            base: Box::new(base),
            index: None,
            radical: RadicalMetrics::default(),
            sign_x: 0.,
            index_raise: 0.,
            style: StyleContext::default(),
            geometry: NodeGeometry::default(),
        }
    }

    /// Root of order `index`
    pub fn with_index(mut self, index: impl MathNode + 'static) -> Self {
        self.index = Some(Box::new(index));
        self
    }

    /// Geometry of the radical sign from the last measurement
    pub fn radical(&self) -> &RadicalMetrics {
        &self.radical
    }
}

impl MathNode for Radical {
    node_accessors!("radical");

    fn measure(&mut self, ctx: &mut RenderContext<'_>, _stretch: &BoxMetrics) -> BoxMetrics {
        let base = measure_node(ctx, self.base.as_mut(), &BoxMetrics::NULL);
        self.radical = ctx.measure_radical(&base);
        let sign = self.radical.bbox;

        let mut bbox = BoxMetrics::new(
            sign.width + base.width,
            sign.height.max(base.height),
            sign.depth.max(base.depth),
        );

        self.sign_x = 0.;
        self.index_raise = 0.;
        let index = measure_child(ctx, &mut self.index);
        if index.defined {
            // index baseline sits y_offset above the bottom of the sign, its right edge at x_offset
            self.sign_x = (index.width - self.radical.x_offset).max(0.);
            self.index_raise = self.radical.y_offset - sign.depth;
            bbox.width += self.sign_x;
            bbox.height = bbox.height.max(self.index_raise + index.height);
            bbox.depth = bbox.depth.max(index.depth - self.index_raise);
        }
        bbox.folded()
    }

    fn layout(&mut self, ctx: &mut RenderContext<'_>, x: f64, y: f64, _bbox: &BoxMetrics) {
        let sign_x = x + self.sign_x;

        let base = self.base.geometry().bbox;
        layout_node(ctx, self.base.as_mut(), sign_x + self.radical.bbox.width, y, &base);

        let index = child_box(&self.index);
        if let Some(child) = &mut self.index {
            let index_x = sign_x + self.radical.x_offset - index.width;
            layout_node(ctx, child.as_mut(), index_x, y - self.index_raise, &index);
        }
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        let geometry = self.geometry;
        let base_width = self.base.geometry().bbox.width;
        ctx.show_radical(geometry.x + self.sign_x, geometry.y, base_width, &self.radical);

        render_node(ctx, self.base.as_mut());
        if let Some(index) = &mut self.index {
            render_node(ctx, index.as_mut());
        }
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn MathNode)) {
        f(self.base.as_ref());
        if let Some(index) = &self.index {
            f(index.as_ref());
        }
    }
}

/// A base with an optional subscript and superscript.
pub struct Scripts {
    base: Child,
    subscript: Option<Child>,
    superscript: Option<Child>,
    sub_shift: f64,
    sup_shift: f64,
    style: StyleContext,
    geometry: NodeGeometry,
}

impl Scripts {
    /// `base` with no script yet
    pub fn new(base: impl MathNode + 'static) -> Self {
        Self {
            base: Box::new(base),
            subscript: None,
            superscript: None,
            sub_shift: 0.,
            sup_shift: 0.,
            style: StyleContext::default(),
            geometry: NodeGeometry::default(),
        }
    }

    /// Attaches a subscript
    pub fn with_subscript(mut self, subscript: impl MathNode + 'static) -> Self {
        self.subscript = Some(Box::new(subscript));
        self
    }

    /// Attaches a superscript
    pub fn with_superscript(mut self, superscript: impl MathNode + 'static) -> Self {
        self.superscript = Some(Box::new(superscript));
        self
    }
}

impl MathNode for Scripts {
    node_accessors!("scripts");

    fn measure(&mut self, ctx: &mut RenderContext<'_>, _stretch: &BoxMetrics) -> BoxMetrics {
        let base = measure_node(ctx, self.base.as_mut(), &BoxMetrics::NULL);
        let sub = measure_child(ctx, &mut self.subscript);
        let sup = measure_child(ctx, &mut self.superscript);

        self.sup_shift = ctx.measure_em(SUPERSCRIPT_SHIFT_UP)
            .max(base.height - ctx.measure_em(SUPERSCRIPT_DROP_MAX));
        self.sub_shift = ctx.measure_em(SUBSCRIPT_SHIFT_DOWN).max(base.depth);

        if sub.defined && sup.defined {
            let gap = (self.sup_shift - sup.depth) - (sub.height - self.sub_shift);
            let gap_min = ctx.measure_em(SUB_SUPERSCRIPT_GAP_MIN);
            if gap < gap_min {
                self.sub_shift += gap_min - gap;
            }
        }

        if !base.defined && !sub.defined && !sup.defined {
            return BoxMetrics::NULL;
        }
        // scripts on a null base still take room
        let mut bbox = if base.defined { base } else { BoxMetrics::ZERO };
        if sub.defined || sup.defined {
            bbox.width += sub.width.max(sup.width) + ctx.measure_em(SCRIPT_SPACE);
        }
        if sup.defined {
            bbox.height = bbox.height.max(self.sup_shift + sup.height);
        }
        if sub.defined {
            bbox.depth = bbox.depth.max(self.sub_shift + sub.depth);
        }
        bbox
    }

    fn layout(&mut self, ctx: &mut RenderContext<'_>, x: f64, y: f64, _bbox: &BoxMetrics) {
        let base = self.base.geometry().bbox;
        layout_node(ctx, self.base.as_mut(), x, y, &base);

        let script_x = x + base.width;
        let sub = child_box(&self.subscript);
        if let Some(child) = &mut self.subscript {
            layout_node(ctx, child.as_mut(), script_x, y + self.sub_shift, &sub);
        }
        let sup = child_box(&self.superscript);
        if let Some(child) = &mut self.superscript {
            layout_node(ctx, child.as_mut(), script_x, y - self.sup_shift, &sup);
        }
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        render_node(ctx, self.base.as_mut());
        if let Some(child) = &mut self.subscript {
            render_node(ctx, child.as_mut());
        }
        if let Some(child) = &mut self.superscript {
            render_node(ctx, child.as_mut());
        }
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn MathNode)) {
        f(self.base.as_ref());
        for child in [&self.subscript, &self.superscript].into_iter().flatten() {
            f(child.as_ref());
        }
    }
}
