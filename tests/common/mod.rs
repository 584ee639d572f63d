#![allow(dead_code)]

use mathview::font::backend::fixed::{FixedShaper, GlyphBox};
use mathview::font::{FontFamily, GlyphFlags, GlyphTable, GlyphTableEntry};
use mathview::render::recording::{DrawCmd, PathSegment};
use mathview::render::RGBA;

pub const EPSILON: f64 = 1e-9;

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn assert_close(left: f64, right: f64) {
    assert!((left - right).abs() < EPSILON, "{} != {}", left, right);
}

/// Fences with three extra sizes whose ink is 2, 3 and 4 em tall.
pub fn fence_table() -> GlyphTable {
    let flags = GlyphFlags { stretch_vertical: true, ..GlyphFlags::NONE };
    let sizes = [(FontFamily::Serif, "("), (FontFamily::Cmex10, "1"), (FontFamily::Cmex10, "2"), (FontFamily::Cmex10, "3")];
    GlyphTable::from_entries([
        GlyphTableEntry::new("(", flags, &sizes),
        GlyphTableEntry::new(")", flags, &sizes),
    ])
}

pub fn fence_shaper() -> FixedShaper {
    FixedShaper::new()
        .with_glyph(FontFamily::Cmex10, "1", GlyphBox::new(0.5, 1.5, 0.5))
        .with_glyph(FontFamily::Cmex10, "2", GlyphBox::new(0.6, 2.0, 1.0))
        .with_glyph(FontFamily::Cmex10, "3", GlyphBox::new(0.7, 3.0, 1.0))
}

pub fn strokes(cmds: &[DrawCmd]) -> impl Iterator<Item = (&Vec<PathSegment>, f64, RGBA)> + '_ {
    cmds.iter().filter_map(|cmd| match cmd {
        DrawCmd::Stroke { path, line_width, color, .. } => Some((path, *line_width, *color)),
        _ => None,
    })
}

pub fn fills(cmds: &[DrawCmd]) -> impl Iterator<Item = (&Vec<PathSegment>, RGBA)> + '_ {
    cmds.iter().filter_map(|cmd| match cmd {
        DrawCmd::Fill { path, color } => Some((path, *color)),
        _ => None,
    })
}
