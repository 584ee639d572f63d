//! Draw laid out formula trees onto a [`PaintBackend`], such as a Cairo surface or a command recorder.
//!
//! ## Backends
//!
//! The [`PaintBackend`] trait represents all graphical operations needed to paint a formula. It is a
//! stateful 2D path API:
//!
//!   - graphics state: `save`, `restore`, `translate`, `scale`, colour, line width, dash pattern and line cap
//!   - paths: `move_to`, `line_to`, `rectangle`, `arc`, finished by `fill` or `stroke`
//!   - text: `show_text` draws a [`TextRun`] with the top-left corner of its layout at the current point.
//!
//! Two backends ship with the crate:
//!
//!  - [`recording::RecordingBackend`]: records absolute paint commands, always available
//!  - [`cairo::CairoBackend`]: paints on a Cairo context, feature `cairo-renderer`
//!
//! ## Caveat on coordinate systems
//!
//! The top is oriented along -Y. So in particular, the Y coordinate of a superscript's baseline is less than
//! the Y coordinate of its base's baseline.

pub mod context;
pub mod paint;
pub mod recording;

#[cfg(feature="cairo-renderer")]
pub mod cairo;

pub use crate::font::TextRun;

/// A colour with red, green, blue and alpha components between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RGBA(pub f64, pub f64, pub f64, pub f64);

impl RGBA {
    /// opaque black
    pub const BLACK: RGBA = RGBA(0., 0., 0., 1.);
    /// fully transparent
    pub const TRANSPARENT: RGBA = RGBA(0., 0., 0., 0.);

    /// Same colour, other alpha
    pub fn with_alpha(self, alpha: f64) -> Self {
        RGBA(self.0, self.1, self.2, alpha)
    }

    /// Alpha component
    pub fn alpha(&self) -> f64 {
        self.3
    }

    /// Does painting with this colour leave no trace?
    pub fn is_transparent(&self) -> bool {
        self.3 <= 0.
    }
}

/// How rectangles and lines are stroked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    /// continuous line
    #[default]
    Solid,
    /// dash pattern `[3, 2]`
    Dashed,
}

/// Shape of line ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCap {
    /// ends exactly at the end point
    #[default]
    Butt,
    /// half disc around the end point
    Round,
    /// half square around the end point
    Square,
}

/// The drawing surface the render pass paints on.
///
/// Coordinates are user-space coordinates, transformed by the current `translate`/`scale` state. `save` and
/// `restore` push and pop the whole graphics state: transform, colour, line width, dash pattern and cap.
pub trait PaintBackend {
    /// Does the surface store geometry exactly (SVG, PDF) rather than pixels? Lengths are only snapped to
    /// whole units on raster surfaces.
    fn is_vector(&self) -> bool;

    /// Pushes the graphics state
    fn save(&mut self);
    /// Pops the graphics state
    fn restore(&mut self);
    /// Moves the user-space origin
    fn translate(&mut self, dx: f64, dy: f64);
    /// Scales user space
    fn scale(&mut self, sx: f64, sy: f64);

    /// Starts a new sub-path at `(x, y)`; also sets the current point for [`PaintBackend::show_text`].
    fn move_to(&mut self, x: f64, y: f64);
    /// Adds a line segment from the current point
    fn line_to(&mut self, x: f64, y: f64);
    /// Adds a closed rectangle sub-path
    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Adds a circular arc, angles in radians
    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64);
    /// Fills and clears the current path
    fn fill(&mut self);
    /// Strokes and clears the current path
    fn stroke(&mut self);

    /// Sets the source colour
    fn set_source_rgba(&mut self, color: RGBA);
    /// Sets the stroke width
    fn set_line_width(&mut self, width: f64);
    /// Sets the dash pattern; an empty pattern strokes solid lines
    fn set_dash(&mut self, dashes: &[f64], offset: f64);
    /// Sets the shape of line ends
    fn set_line_cap(&mut self, cap: LineCap);

    /// Draws `run` with the top-left corner of its layout at the current point.
    fn show_text(&mut self, run: &TextRun);
}
