use cairo::{Context, FontSlant, Format, ImageSurface, SurfaceType};

use crate::font::{FontDescription, FontStyle, FontWeight, ShapedText, TextShaper};
use crate::geometry::InkRect;

use super::{LineCap, PaintBackend, TextRun, RGBA};

fn check<T>(result: Result<T, cairo::Error>, operation: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("cairo {} failed: {}", operation, err);
            None
        }
    }
}

fn select_font(context: &Context, font: &FontDescription) {
    let slant = match font.style {
        FontStyle::Normal => FontSlant::Normal,
        FontStyle::Italic => FontSlant::Italic,
    };
    let weight = match font.weight {
        FontWeight::Normal => cairo::FontWeight::Normal,
        FontWeight::Bold => cairo::FontWeight::Bold,
    };
    context.select_font_face(font.family.name(), slant, weight);
    context.set_font_size(font.size);
}

/// Paints on a Cairo context.
///
/// SVG, PDF and PostScript targets count as vector surfaces; everything else is raster. Text is drawn with
/// Cairo's toy font API, matching [`CairoShaper`].
pub struct CairoBackend {
    context : Context,
    is_vector : bool,
}

impl CairoBackend {
    /// Wraps `context`; the source colour is reset to opaque black.
    pub fn new(context: Context) -> Self {
        context.set_source_rgba(0., 0., 0., 1.);
        let is_vector = matches!(context.target().type_(), SurfaceType::Svg | SurfaceType::Pdf | SurfaceType::Ps);
        Self { context, is_vector }
    }

    /// Gives the context back
    pub fn context(self) -> Context
    {self.context}
}

impl PaintBackend for CairoBackend {
    fn is_vector(&self) -> bool {
        self.is_vector
    }

    fn save(&mut self) {
        check(self.context.save(), "save");
    }

    fn restore(&mut self) {
        check(self.context.restore(), "restore");
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.context.translate(dx, dy);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.context.scale(sx, sy);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.rectangle(x, y, width, height);
    }

    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.context.arc(xc, yc, radius, angle1, angle2);
    }

    fn fill(&mut self) {
        check(self.context.fill(), "fill");
    }

    fn stroke(&mut self) {
        check(self.context.stroke(), "stroke");
    }

    fn set_source_rgba(&mut self, color: RGBA) {
        self.context.set_source_rgba(color.0, color.1, color.2, color.3);
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_dash(&mut self, dashes: &[f64], offset: f64) {
        self.context.set_dash(dashes, offset);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.context.set_line_cap(match cap {
            LineCap::Butt => cairo::LineCap::Butt,
            LineCap::Round => cairo::LineCap::Round,
            LineCap::Square => cairo::LineCap::Square,
        });
    }

    fn show_text(&mut self, run: &TextRun) {
        let context = &self.context;
        let Some((x, y)) = check(context.current_point(), "current_point") else {
            return;
        };
        select_font(context, &run.font);
        let Some(extents) = check(context.font_extents(), "font_extents") else {
            return;
        };
        // Cairo draws from the baseline, the current point is the top of the layout
        context.move_to(x, y + extents.ascent());
        check(context.show_text(&run.text), "show_text");
    }
}

/// Measures text with Cairo's toy font API on a private 1x1 image surface.
pub struct CairoShaper {
    context : Context,
}

impl CairoShaper {
    /// Creates the measuring surface.
    pub fn new() -> Result<Self, cairo::Error> {
        let surface = ImageSurface::create(Format::ARgb32, 1, 1)?;
        let context = Context::new(&surface)?;
        Ok(Self { context })
    }
}

impl TextShaper for CairoShaper {
    fn shape(&self, text: &str, font: &FontDescription) -> Option<ShapedText> {
        if text.is_empty() {
            return None;
        }
        select_font(&self.context, font);
        let font_extents = check(self.context.font_extents(), "font_extents")?;
        let text_extents = check(self.context.text_extents(text), "text_extents")?;

        let baseline = font_extents.ascent();
        Some(ShapedText {
            ink: InkRect::new(
                text_extents.x_bearing(),
                baseline + text_extents.y_bearing(),
                text_extents.width(),
                text_extents.height(),
            ),
            logical: InkRect::new(0., 0., text_extents.x_advance(), font_extents.ascent() + font_extents.descent()),
            baseline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontFamily;

    #[test]
    fn image_surfaces_are_raster() {
        let surface = ImageSurface::create(Format::ARgb32, 10, 10).unwrap();
        let backend = CairoBackend::new(Context::new(&surface).unwrap());
        assert!(!backend.is_vector());
    }

    #[test]
    fn shaper_measures_text() {
        let shaper = CairoShaper::new().unwrap();
        let shaped = shaper.shape("x", &FontDescription::new(FontFamily::Serif, 20.)).unwrap();
        assert!(shaped.baseline > 0.);
        assert!(shaped.logical.width > 0.);
        assert_eq!(shaper.shape("", &FontDescription::new(FontFamily::Serif, 20.)), None);
    }
}
