/*! # A box-model layout engine for mathematical formulas.

This crate measures, positions and paints trees of mathematical formula nodes (rows, fractions, radicals,
scripts, stretchy operators, text tokens) onto a 2D painting surface such as a Cairo context.

Every node measures to a box: a width, a height above the baseline and a depth below it. Operators like
fences, big operators and radical signs are looked up in a glyph table listing renderings of increasing size;
the engine picks the smallest one that covers what the operator is asked to stretch to, and scales it up if
none does. Operators on the math axis (`+`, `=`) are centred on it.

## Basic usage

Rendering a formula takes three ingredients: a [`TextShaper`](crate::font::TextShaper) to measure text, a
[`PaintBackend`](crate::render::PaintBackend) to paint on, and the formula tree itself.

```
use mathview::font::backend::fixed::FixedShaper;
use mathview::layout::nodes::{Fraction, Operator, Row, Text};
use mathview::render::context::{RenderContext, ViewSettings};
use mathview::render::recording::RecordingBackend;

let shaper = FixedShaper::new();
let mut formula = Row::new()
    .with(Text::new("x"))
    .with(Operator::new("="))
    .with(Fraction::new(Text::new("1"), Text::new("2")));

let mut backend = RecordingBackend::raster();
let mut ctx = RenderContext::new(&shaper, ViewSettings::default());

// the size of the formula, e.g. to create a surface of the right size
let (width, height) = mathview::measure(&mut ctx, &mut formula).unwrap();

ctx.attach_paint_backend(&mut backend);
let bbox = mathview::render(&mut ctx, &mut formula).unwrap();
assert_eq!(bbox.width, width);
assert_eq!(bbox.height + bbox.depth, height);

drop(ctx);
assert_eq!(backend.texts().count(), 4);
```

With the `cairo-renderer` feature, [`CairoShaper`](crate::render::cairo::CairoShaper) and
[`CairoBackend`](crate::render::cairo::CairoBackend) measure and paint with Cairo:

```ignore
let surface = cairo::SvgSurface::new(800., 600., Some("out.svg")).expect("Couldn't create SVG surface");
let context = cairo::Context::new(&surface).expect("Couldn't get context for SVG surface");
let mut backend = mathview::render::cairo::CairoBackend::new(context);
let shaper = mathview::render::cairo::CairoShaper::new().expect("Couldn't create measuring surface");

let mut ctx = RenderContext::new(&shaper, ViewSettings::default());
ctx.attach_paint_backend(&mut backend);
mathview::render(&mut ctx, &mut formula).expect("Error in rendering");
```

Notes:

 - `render` places the top-left corner of the formula at (0, 0) in the backend's current user space.
 - On raster surfaces every length is snapped to whole units so that lines and glyphs land on pixel
   boundaries; on vector surfaces (SVG, PDF) lengths are kept exact.
 - Diagnostics go through the `log` crate; `ViewSettings::debug_overlay` paints node boxes and text extents.

## Implementing nodes

Hosts with their own document model implement [`MathNode`](crate::layout::MathNode) for their elements.
A node measures its children through [`measure_node`](crate::layout::engine::measure_node), places them
through [`layout_node`](crate::layout::engine::layout_node) and paints them through
[`render_node`](crate::layout::engine::render_node); the measurement primitives
([`RenderContext::measure_text`](crate::render::context::RenderContext::measure_text),
[`RenderContext::measure_operator`](crate::render::context::RenderContext::measure_operator), ...) and
paint operations ([`RenderContext::show_text`](crate::render::context::RenderContext::show_text),
[`RenderContext::draw_fraction_line`](crate::render::context::RenderContext::draw_fraction_line), ...) do
the rest.
*/



#[macro_use]
extern crate serde_derive;



#[macro_use]
extern crate log;

#[deny(missing_docs)]
pub mod error;
#[deny(missing_docs)]
pub mod dimensions;
#[deny(missing_docs)]
pub mod geometry;
pub mod font;
pub mod layout;
pub mod render;

pub use error::{RenderError, RenderResult};
pub use geometry::BoxMetrics;
pub use layout::engine::{measure, render};
