//! This module drives the three passes over a formula tree.
//! The entry points are [`measure`] and [`render`]; nodes process their children with [`measure_node`],
//! [`layout_node`] and [`render_node`].
//!
//! Each driver pushes the node's style before handing control to the node and pops it afterwards, records
//! the node's [`NodeGeometry`](super::NodeGeometry), and guards against trees nesting deeper than
//! [`ViewSettings::max_depth`](crate::render::context::ViewSettings).

use super::MathNode;

use crate::error::{RenderError, RenderResult};
use crate::geometry::BoxMetrics;
use crate::render::context::RenderContext;

/// Measures `node` with the stretch request `stretch` and records the box.
///
/// A node past the nesting limit is not measured: it gets the null box.
pub fn measure_node(ctx: &mut RenderContext<'_>, node: &mut dyn MathNode, stretch: &BoxMetrics) -> BoxMetrics {
    if !ctx.enter() {
        node.geometry_mut().bbox = BoxMetrics::NULL;
        return BoxMetrics::NULL;
    }
    ctx.push_style(*node.style());
    let bbox = node.measure(ctx, stretch);
    ctx.pop_style();
    ctx.leave();

    trace!("measured {}: w = {}, h = {}, d = {}", node.kind(), bbox.width, bbox.height, bbox.depth);
    node.geometry_mut().bbox = bbox;
    bbox
}

/// Places `node` with its baseline origin at `(x, y)`.
pub fn layout_node(ctx: &mut RenderContext<'_>, node: &mut dyn MathNode, x: f64, y: f64, bbox: &BoxMetrics) {
    let geometry = node.geometry_mut();
    geometry.x = x;
    geometry.y = y;
    geometry.bbox = *bbox;

    if !ctx.enter() {
        return;
    }
    ctx.push_style(*node.style());
    node.layout(ctx, x, y, bbox);
    ctx.pop_style();
    ctx.leave();
}

/// Paints `node`: its background, the node itself, then the debug overlay of its box.
pub fn render_node(ctx: &mut RenderContext<'_>, node: &mut dyn MathNode) {
    if !ctx.enter() {
        return;
    }
    let geometry = *node.geometry();
    ctx.push_style(*node.style());

    if geometry.bbox.defined {
        if !node.style().math_background.is_transparent() {
            ctx.show_background(geometry.x, geometry.y, &geometry.bbox);
        }
        node.render(ctx);
        ctx.show_bbox(geometry.x, geometry.y, &geometry.bbox);
    }

    ctx.pop_style();
    ctx.leave();
}

/// Measures the tree rooted at `root`, returning its width and total height (height + depth).
///
/// A root measuring to the null box gives `(0, 0)`.
pub fn measure(ctx: &mut RenderContext<'_>, root: &mut dyn MathNode) -> RenderResult<(f64, f64)> {
    ctx.begin_pass();
    let bbox = measure_node(ctx, root, &BoxMetrics::NULL);
    ctx.end_pass()?;

    if !bbox.defined {
        return Ok((0., 0.));
    }
    Ok((bbox.width, bbox.total_height()))
}

/// Measures, lays out and paints the tree rooted at `root` on the attached paint backend.
///
/// The root's baseline origin is `(0, height)`, so the formula's top-left corner sits at the origin of the
/// surface. The graphics state of the backend is saved before and restored after painting.
pub fn render(ctx: &mut RenderContext<'_>, root: &mut dyn MathNode) -> RenderResult<BoxMetrics> {
    if !ctx.has_paint_backend() {
        return Err(RenderError::NoPaintBackend);
    }

    ctx.begin_pass();
    let bbox = measure_node(ctx, root, &BoxMetrics::NULL);
    debug!("render {}: w = {}, h = {}, d = {}", root.kind(), bbox.width, bbox.height, bbox.depth);

    layout_node(ctx, root, 0., 0., &bbox);

    if let Some(out) = ctx.painter() {
        out.save();
        out.translate(0., bbox.height);
    }
    render_node(ctx, root);
    if let Some(out) = ctx.painter() {
        out.restore();
    }

    ctx.end_pass()?;
    if !bbox.defined {
        return Err(RenderError::UndefinedRoot);
    }
    Ok(bbox)
}

/// Collects the geometry of every node of the tree, parents before children.
pub fn collect_geometry(root: &dyn MathNode) -> Vec<(&'static str, super::NodeGeometry)> {
    fn visit(node: &dyn MathNode, out: &mut Vec<(&'static str, super::NodeGeometry)>) {
        out.push((node.kind(), *node.geometry()));
        node.for_each_child(&mut |child| visit(child, out));
    }
    let mut out = Vec::new();
    visit(root, &mut out);
    out
}
