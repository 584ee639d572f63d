/// A shaper with fixed per-character metrics, needing no font files.
pub mod fixed;

#[cfg(feature="ttfparser-shaper")]
/// A shaper reading metrics from OpenType faces with 'ttf-parser'.
pub mod ttf_parser;
