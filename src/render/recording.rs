//! A [`PaintBackend`] that records what would be painted, in absolute coordinates.
//!
//! Paths are transformed by the graphics state when they are built, as a real 2D library would, so the
//! recorded commands are independent of how the painter used `translate` and `scale`. The command list
//! derives serde traits and can be dumped for inspection.

use super::{LineCap, PaintBackend, TextRun, RGBA};

/// A path element, in absolute coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    Arc { xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64 },
}

/// A recorded paint command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCmd {
    /// a filled path
    Fill { path: Vec<PathSegment>, color: RGBA },
    /// a stroked path, `line_width` in user units at the time of stroking
    Stroke { path: Vec<PathSegment>, color: RGBA, line_width: f64, dash: Vec<f64>, cap: LineCap },
    /// a text run whose layout's top-left corner is at `(x, y)`, drawn with the given scale
    Text { x: f64, y: f64, scale_x: f64, scale_y: f64, run: TextRun, color: RGBA },
}

#[derive(Debug, Clone)]
struct GraphicsState {
    tx: f64,
    ty: f64,
    sx: f64,
    sy: f64,
    color: RGBA,
    line_width: f64,
    dash: Vec<f64>,
    cap: LineCap,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            tx: 0., ty: 0., sx: 1., sy: 1.,
            color: RGBA::BLACK,
            line_width: 2.,
            dash: Vec::new(),
            cap: LineCap::Butt,
        }
    }
}

impl GraphicsState {
    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.tx + self.sx * x, self.ty + self.sy * y)
    }
}

/// Records paint commands instead of painting.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    is_vector: bool,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    path: Vec<PathSegment>,
    current: Option<(f64, f64)>,
    commands: Vec<DrawCmd>,
    unbalanced_restores: usize,
}

impl RecordingBackend {
    fn new(is_vector: bool) -> Self {
        Self {
            is_vector,
            state: GraphicsState::default(),
            saved: Vec::new(),
            path: Vec::new(),
            current: None,
            commands: Vec::new(),
            unbalanced_restores: 0,
        }
    }

    /// Records as a pixel surface would be painted: lengths get snapped.
    pub fn raster() -> Self {
        Self::new(false)
    }

    /// Records as a vector surface would be painted: lengths stay exact.
    pub fn vector() -> Self {
        Self::new(true)
    }

    /// Commands recorded so far
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Takes the recorded commands
    pub fn into_commands(self) -> Vec<DrawCmd> {
        self.commands
    }

    /// Text runs recorded so far, with the top-left corner of their layout.
    pub fn texts(&self) -> impl Iterator<Item = (&TextRun, f64, f64)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { run, x, y, .. } => Some((run, *x, *y)),
            _ => None,
        })
    }

    /// Has every `save` been matched by a `restore`, and no `restore` come without a `save`?
    pub fn is_balanced(&self) -> bool {
        self.saved.is_empty() && self.unbalanced_restores == 0
    }
}

impl PaintBackend for RecordingBackend {
    fn is_vector(&self) -> bool {
        self.is_vector
    }

    fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.state = state,
            None => {
                warn!("restore without matching save");
                self.unbalanced_restores += 1;
            }
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.tx += self.state.sx * dx;
        self.state.ty += self.state.sy * dy;
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.sx *= sx;
        self.state.sy *= sy;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let (x, y) = self.state.apply(x, y);
        self.current = Some((x, y));
        self.path.push(PathSegment::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let (x, y) = self.state.apply(x, y);
        self.current = Some((x, y));
        self.path.push(PathSegment::LineTo { x, y });
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (x, y) = self.state.apply(x, y);
        self.current = Some((x, y));
        self.path.push(PathSegment::Rectangle {
            x, y,
            width: width * self.state.sx,
            height: height * self.state.sy,
        });
    }

    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        let (xc, yc) = self.state.apply(xc, yc);
        let radius = radius * self.state.sx.abs();
        self.current = Some((xc + radius * angle2.cos(), yc + radius * angle2.sin()));
        self.path.push(PathSegment::Arc { xc, yc, radius, angle1, angle2 });
    }

    fn fill(&mut self) {
        let path = std::mem::take(&mut self.path);
        self.current = None;
        self.commands.push(DrawCmd::Fill { path, color: self.state.color });
    }

    fn stroke(&mut self) {
        let path = std::mem::take(&mut self.path);
        self.current = None;
        self.commands.push(DrawCmd::Stroke {
            path,
            color: self.state.color,
            line_width: self.state.line_width,
            dash: self.state.dash.clone(),
            cap: self.state.cap,
        });
    }

    fn set_source_rgba(&mut self, color: RGBA) {
        self.state.color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_dash(&mut self, dashes: &[f64], _offset: f64) {
        self.state.dash = dashes.to_vec();
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.cap = cap;
    }

    fn show_text(&mut self, run: &TextRun) {
        let (x, y) = self.current.unwrap_or_else(|| self.state.apply(0., 0.));
        self.path.clear();
        self.commands.push(DrawCmd::Text {
            x, y,
            scale_x: self.state.sx,
            scale_y: self.state.sy,
            run: run.clone(),
            color: self.state.color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontDescription, FontFamily};

    #[test]
    fn paths_are_absolute() {
        let mut backend = RecordingBackend::raster();
        backend.save();
        backend.translate(10., 20.);
        backend.scale(2., 3.);
        backend.rectangle(1., 1., 4., 5.);
        backend.fill();
        backend.move_to(-1., -2.);
        backend.show_text(&TextRun::new("x", FontDescription::new(FontFamily::Serif, 12.)));
        backend.restore();
        backend.move_to(1., 1.);
        backend.line_to(2., 1.);
        backend.stroke();

        assert!(backend.is_balanced());
        let cmds = backend.into_commands();
        assert_eq!(cmds[0], DrawCmd::Fill {
            path: vec![PathSegment::Rectangle { x: 12., y: 23., width: 8., height: 15. }],
            color: RGBA::BLACK,
        });
        match &cmds[1] {
            DrawCmd::Text { x, y, scale_x, scale_y, .. } => assert_eq!((*x, *y, *scale_x, *scale_y), (8., 14., 2., 3.)),
            cmd => panic!("unexpected {:?}", cmd),
        }
        match &cmds[2] {
            DrawCmd::Stroke { path, line_width, .. } => {
                assert_eq!(path[0], PathSegment::MoveTo { x: 1., y: 1. });
                assert_eq!(*line_width, 2.);
            }
            cmd => panic!("unexpected {:?}", cmd),
        }
    }

    #[test]
    fn unmatched_restore() {
        let mut backend = RecordingBackend::vector();
        backend.restore();
        assert!(!backend.is_balanced());
    }
}
