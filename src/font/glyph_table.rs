//! Operators that can be enlarged or stretched are looked up in a [`GlyphTable`]. An entry lists the sized
//! renderings of the operator, smallest first, each as a string in one of the [`FontFamily`] faces.
//!
//! The built-in table ([`GlyphTable::builtin`]) covers fences, big operators, the radical sign, arrows and
//! the operators that sit on the math axis. Hosts can load their own table with serde:
//!
//! ```
//! # use mathview::font::GlyphTable;
//! let json = r#"[
//!     { "text": "|", "flags": { "stretch_vertical": true },
//!       "sized_glyphs": [ { "font": "serif", "utf8": "|" }, { "font": "cmex10", "utf8": "ª" } ] }
//! ]"#;
//! let table : GlyphTable = serde_json::from_str(json).unwrap();
//! assert!(table.find("|").unwrap().flags.stretch_vertical);
//! assert!(table.find("(").is_none());
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use super::FontFamily;

/// Capabilities of a table entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphFlags {
    /// the second sized rendering is a dedicated display-style version
    pub has_large_version: bool,
    /// the operator can grow horizontally
    pub stretch_horizontal: bool,
    /// the operator can grow vertically
    pub stretch_vertical: bool,
    /// the operator is centred on the math axis when not stretched
    pub align_axis: bool,
}

impl GlyphFlags {
    /// No capability at all
    pub const NONE: Self = Self {
        has_large_version: false,
        stretch_horizontal: false,
        stretch_vertical: false,
        align_axis: false,
    };

    const FENCE: Self = Self { stretch_vertical: true, ..Self::NONE };
    const BIG_OP: Self = Self { has_large_version: true, align_axis: true, ..Self::NONE };
    const AXIS: Self = Self { align_axis: true, ..Self::NONE };
    const ARROW: Self = Self { stretch_horizontal: true, align_axis: true, ..Self::NONE };

    /// Can the operator grow along at least one axis?
    pub fn stretches(&self) -> bool {
        self.stretch_horizontal || self.stretch_vertical
    }
}

/// One rendering of an operator: a string in a given family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizedGlyph {
    /// family the string is shaped in
    pub font: FontFamily,
    /// the string
    pub utf8: String,
}

/// An operator string with its capabilities and sized renderings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphTableEntry {
    /// the operator as it appears in the formula
    pub text: String,
    /// capabilities
    #[serde(default)]
    pub flags: GlyphFlags,
    /// renderings, smallest first
    pub sized_glyphs: Vec<SizedGlyph>,
}

impl GlyphTableEntry {
    /// Creates an entry from `(family, string)` pairs.
    pub fn new(text: impl Into<String>, flags: GlyphFlags, sized_glyphs: &[(FontFamily, &str)]) -> Self {
        Self {
            text: text.into(),
            flags,
            sized_glyphs: sized_glyphs.iter()
                .map(|&(font, utf8)| SizedGlyph { font, utf8: utf8.to_owned() })
                .collect(),
        }
    }
}

/// Lookup from operator string to its [`GlyphTableEntry`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Vec<GlyphTableEntry>")]
pub struct GlyphTable {
    entries: HashMap<String, GlyphTableEntry>,
}

impl From<Vec<GlyphTableEntry>> for GlyphTable {
    fn from(entries: Vec<GlyphTableEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl GlyphTable {
    /// Builds a table. Entries without any rendering are dropped; a later entry for the same string
    /// replaces an earlier one.
    pub fn from_entries(entries: impl IntoIterator<Item = GlyphTableEntry>) -> Self {
        let mut map = HashMap::new();
        for entry in entries {
            if entry.sized_glyphs.is_empty() {
                warn!("glyph table entry {:?} has no sized glyph, ignored", entry.text);
                continue;
            }
            map.insert(entry.text.clone(), entry);
        }
        Self { entries: map }
    }

    /// The table used unless the host provides its own. Built once, read-only afterwards.
    pub fn builtin() -> &'static GlyphTable {
        static TABLE: OnceLock<GlyphTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            GlyphTable::from_entries(
                BUILTIN_GLYPHS.iter()
                    .map(|&(text, flags, sized)| GlyphTableEntry::new(text, flags, sized))
            )
        })
    }

    /// Entry for exactly `text`, if any.
    pub fn find(&self, text: &str) -> Option<&GlyphTableEntry> {
        self.entries.get(text)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

use super::FontFamily::{Cmex10, Cmr10, Cmsy10, Serif, Symbol};

// Sized renderings in cmex10 use the code points the TeX fonts are mapped to when installed as system fonts.
const BUILTIN_GLYPHS: &[(&str, GlyphFlags, &[(FontFamily, &str)])] = &[
    ("(", GlyphFlags::FENCE, &[(Cmr10, "("), (Cmex10, "\u{a1}"), (Cmex10, "\u{b3}"), (Cmex10, "\u{b5}"), (Cmex10, "\u{c3}")]),
    (")", GlyphFlags::FENCE, &[(Cmr10, ")"), (Cmex10, "\u{a2}"), (Cmex10, "\u{b4}"), (Cmex10, "\u{b6}"), (Cmex10, "!")]),
    ("[", GlyphFlags::FENCE, &[(Cmr10, "["), (Cmex10, "\u{a3}"), (Cmex10, "h"), (Cmex10, "\u{b7}"), (Cmex10, "\"")]),
    ("]", GlyphFlags::FENCE, &[(Cmr10, "]"), (Cmex10, "\u{a4}"), (Cmex10, "i"), (Cmex10, "\u{b8}"), (Cmex10, "#")]),
    ("{", GlyphFlags::FENCE, &[(Cmsy10, "f"), (Cmex10, "\u{a9}"), (Cmex10, "n"), (Cmex10, "\u{bd}"), (Cmex10, "(")]),
    ("}", GlyphFlags::FENCE, &[(Cmsy10, "g"), (Cmex10, "\u{aa}"), (Cmex10, "o"), (Cmex10, "\u{be}"), (Cmex10, ")")]),
    ("|", GlyphFlags::FENCE, &[(Cmsy10, "j"), (Cmex10, "\u{af}"), (Cmex10, "B")]),
    ("\u{2211}", GlyphFlags::BIG_OP, &[(Cmex10, "P"), (Cmex10, "X")]),
    ("\u{220f}", GlyphFlags::BIG_OP, &[(Cmex10, "Q"), (Cmex10, "Y")]),
    ("\u{222b}", GlyphFlags::BIG_OP, &[(Cmex10, "R"), (Cmex10, "Z")]),
    ("\u{221a}", GlyphFlags::FENCE, &[(Cmsy10, "p"), (Cmex10, "q"), (Cmex10, "r"), (Cmex10, "s")]),
    ("+", GlyphFlags::AXIS, &[(Cmr10, "+")]),
    ("\u{2212}", GlyphFlags::AXIS, &[(Serif, "\u{2212}")]),
    ("=", GlyphFlags::AXIS, &[(Cmr10, "=")]),
    ("<", GlyphFlags::AXIS, &[(Serif, "<")]),
    (">", GlyphFlags::AXIS, &[(Serif, ">")]),
    ("\u{d7}", GlyphFlags::AXIS, &[(Serif, "\u{d7}")]),
    ("\u{b1}", GlyphFlags::AXIS, &[(Serif, "\u{b1}")]),
    ("\u{2192}", GlyphFlags::ARROW, &[(Symbol, "\u{2192}")]),
    ("\u{2190}", GlyphFlags::ARROW, &[(Symbol, "\u{2190}")]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_entries() {
        let table = GlyphTable::builtin();
        assert_eq!(table.len(), BUILTIN_GLYPHS.len());

        let integral = table.find("\u{222b}").unwrap();
        assert!(integral.flags.has_large_version);
        assert!(!integral.flags.stretches());
        assert_eq!(integral.sized_glyphs[1], SizedGlyph { font: Cmex10, utf8: "Z".to_owned() });

        let paren = table.find("(").unwrap();
        assert!(paren.flags.stretch_vertical);
        assert_eq!(paren.sized_glyphs.len(), 5);

        assert!(table.find("x").is_none());
        assert!(std::ptr::eq(table, GlyphTable::builtin()));
    }

    #[test]
    fn empty_entries_are_dropped() {
        let table = GlyphTable::from_entries(vec![
            GlyphTableEntry::new("a", GlyphFlags::NONE, &[]),
            GlyphTableEntry::new("b", GlyphFlags::AXIS, &[(Serif, "b")]),
        ]);
        assert_eq!(table.len(), 1);
        assert!(table.find("a").is_none());
    }

    #[test]
    fn load_from_json() {
        let json = r#"[
            { "text": "~", "flags": { "stretch_horizontal": true, "align_axis": true },
              "sized_glyphs": [ { "font": "serif", "utf8": "~" }, { "font": "cmex10", "utf8": "e" } ] },
            { "text": "!", "sized_glyphs": [ { "font": "cmr10", "utf8": "!" } ] }
        ]"#;
        let table : GlyphTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 2);
        let tilde = table.find("~").unwrap();
        assert!(tilde.flags.stretch_horizontal && tilde.flags.align_axis);
        assert!(!tilde.flags.stretch_vertical);
        assert_eq!(table.find("!").unwrap().flags, GlyphFlags::NONE);
    }
}
