//! Length constants for layout

use crate::dimensions::{units::Em, Unit};

// From the MathML spacing scale: veryverythinmathspace = 1/18 em ... veryverythickmathspace = 7/18 em
/// `thinmathspace`: padding around a fraction, gap between a fraction bar and its numerator/denominator.
pub const THIN_SPACE        : Unit<Em> = Unit::<Em>::new(3. / 18.);
/// `mediummathspace`: clearance between a radical sign and its content.
pub const MEDIUM_SPACE      : Unit<Em> = Unit::<Em>::new(4. / 18.);

/// Font size multiplier of large operators (display-style sums, integrals) that have no dedicated large rendering.
pub const LARGE_OP_SCALE    : f64 = 1.6;

/// Thickness of the bar above the content of a radical.
pub const RADICAL_TOP_LINE_WIDTH : Unit<Em> = Unit::<Em>::new(0.03);
/// Fraction of the radical sign's width at which the right edge of an index sits.
pub const RADICAL_ORDER_X_OFFSET : f64 = 0.55;
/// Fraction of the radical sign's total height at which the baseline of an index sits, from the bottom.
pub const RADICAL_ORDER_Y_OFFSET : f64 = 0.5;

/// Minimal raise of a superscript baseline.
pub const SUPERSCRIPT_SHIFT_UP   : Unit<Em> = Unit::<Em>::new(0.45);
/// How far below the top of the base a superscript baseline may drop.
pub const SUPERSCRIPT_DROP_MAX   : Unit<Em> = Unit::<Em>::new(0.25);
/// Minimal drop of a subscript baseline.
pub const SUBSCRIPT_SHIFT_DOWN   : Unit<Em> = Unit::<Em>::new(0.25);
/// Minimal vertical gap between a subscript and a superscript attached to the same base.
pub const SUB_SUPERSCRIPT_GAP_MIN : Unit<Em> = Unit::<Em>::new(0.2);
/// Space after scripts
pub const SCRIPT_SPACE           : Unit<Em> = Unit::<Em>::new(0.05);
/// Font size multiplier for each script level, as in `scriptsizemultiplier`.
pub const SCRIPT_SIZE_MULTIPLIER : f64 = 0.71;
