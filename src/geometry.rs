//! Geometric primitives of the box model
//!
//! Every formula node measures to a [`BoxMetrics`]: a width and the extents above (height) and below (depth)
//! the baseline. Text shaping reports [`InkRect`]s, rectangles relative to the top-left corner of the shaped
//! layout with y growing downwards.
//!
//! The free functions at the bottom implement the pixel snapping policy and the two ways of centring a box
//! on the math axis.

/// Width, height above the baseline and depth below it.
///
/// A box is either *defined* (a real extent, possibly zero) or *null*, i.e. "no constraint / nothing".
/// The null box is distinct from a defined box of zero extent: a stretch request is a null box when nothing
/// asks the operator to stretch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxMetrics {
    /// horizontal extent
    pub width: f64,
    /// extent above the baseline
    pub height: f64,
    /// extent below the baseline
    pub depth: f64,
    /// `false` for the null box
    pub defined: bool,
}

impl Default for BoxMetrics {
    fn default() -> Self {
        Self::NULL
    }
}

impl BoxMetrics {
    /// The null box.
    pub const NULL: Self = Self { width: 0., height: 0., depth: 0., defined: false };

    /// A defined box of zero extent.
    pub const ZERO: Self = Self { width: 0., height: 0., depth: 0., defined: true };

    /// Creates a defined box. The extents are taken as is, see [`BoxMetrics::folded`].
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self { width, height, depth, defined: true }
    }

    /// Is this the null box?
    pub fn is_null(&self) -> bool {
        !self.defined
    }

    /// `height + depth`
    pub fn total_height(&self) -> f64 {
        self.height + self.depth
    }

    /// Folds negative extents to zero.
    ///
    /// Ink that lies entirely above the baseline (a minus sign) gives a negative depth once measured from
    /// the baseline; a finished box never carries one. The null box is returned unchanged.
    pub fn folded(self) -> Self {
        if !self.defined {
            return self;
        }
        Self {
            width: self.width.max(0.),
            height: self.height.max(0.),
            depth: self.depth.max(0.),
            defined: true,
        }
    }

    /// Places `other` to the right of `self`: widths add, height and depth take the maximum.
    /// A null box contributes nothing.
    pub fn append(&self, other: &Self) -> Self {
        match (self.defined, other.defined) {
            (false, _) => *other,
            (_, false) => *self,
            _ => Self::new(
                self.width + other.width,
                self.height.max(other.height),
                self.depth.max(other.depth),
            ),
        }
    }

    /// Overlays `other` on `self` at the same origin: each extent takes the maximum.
    /// A null box contributes nothing.
    pub fn union(&self, other: &Self) -> Self {
        match (self.defined, other.defined) {
            (false, _) => *other,
            (_, false) => *self,
            _ => Self::new(
                self.width.max(other.width),
                self.height.max(other.height),
                self.depth.max(other.depth),
            ),
        }
    }
}

/// A rectangle relative to the top-left of a shaped text layout, y downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InkRect {
    /// left edge
    pub x: f64,
    /// top edge
    pub y: f64,
    /// horizontal extent
    pub width: f64,
    /// vertical extent
    pub height: f64,
}

impl InkRect {
    /// Creates a rectangle from its top-left corner and dimensions.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0., 0., 0., 0.);

    /// A rectangle with no area draws nothing.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0. || self.height <= 0.
    }
}

/// Rounds a length to whole device units when painting to a raster surface.
///
/// Raster rounding is `floor(x + 0.5)` (halves go up, also for negative lengths); vector surfaces keep
/// the exact value.
pub fn snap_length(length: f64, is_vector: bool) -> f64 {
    if is_vector {
        length
    } else {
        (length + 0.5).floor()
    }
}

/// Splits a total vertical extent so that its centre sits on the math axis.
///
/// Returns `(height, depth)` with `height = 0.5 * total + axis_offset` and `depth = 0.5 * total - axis_offset`,
/// each snapped.
pub fn split_around_axis(total: f64, axis_offset: f64, is_vector: bool) -> (f64, f64) {
    let height = snap_length(0.5 * total + axis_offset, is_vector);
    let depth = snap_length(0.5 * total - axis_offset, is_vector);
    (height, depth)
}

/// Grows `(height, depth)` so that the extent is symmetric about the math axis.
///
/// The half extent is `max(axis_offset + depth, height - axis_offset)`; returns
/// `(half + axis_offset, half - axis_offset)`, each snapped.
pub fn symmetric_stretch(axis_offset: f64, height: f64, depth: f64, is_vector: bool) -> (f64, f64) {
    let half = (axis_offset + depth).max(height - axis_offset);
    (
        snap_length(half + axis_offset, is_vector),
        snap_length(half - axis_offset, is_vector),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn snapping() {
        assert_eq!(snap_length(2.4, false), 2.);
        assert_eq!(snap_length(2.5, false), 3.);
        assert_eq!(snap_length(-2.5, false), -2.);
        assert_eq!(snap_length(2.4, true), 2.4);
    }

    #[test]
    fn null_box_contributes_nothing() {
        let a = BoxMetrics::new(3., 4., 1.);
        assert_eq!(a.append(&BoxMetrics::NULL), a);
        assert_eq!(BoxMetrics::NULL.append(&a), a);
        assert_eq!(BoxMetrics::NULL.union(&BoxMetrics::NULL), BoxMetrics::NULL);
        assert!(BoxMetrics::ZERO.defined);
        assert_ne!(BoxMetrics::ZERO, BoxMetrics::NULL);
    }

    #[test]
    fn append_and_union() {
        let a = BoxMetrics::new(3., 4., 1.);
        let b = BoxMetrics::new(2., 2., 3.);
        assert_eq!(a.append(&b), BoxMetrics::new(5., 4., 3.));
        assert_eq!(a.union(&b), BoxMetrics::new(3., 4., 3.));
    }

    #[test]
    fn folding_negative_depth() {
        let minus = BoxMetrics::new(5., 3.4, -2.6);
        assert_eq!(minus.folded(), BoxMetrics::new(5., 3.4, 0.));
        assert_eq!(BoxMetrics::NULL.folded(), BoxMetrics::NULL);
    }

    #[test]
    fn symmetric_about_axis() {
        // a delimiter stretched to a box sitting mostly above the axis
        let (h, d) = symmetric_stretch(3., 10., 2., false);
        assert_eq!((h, d), (10., 4.));
        assert_eq!(h - 3., d + 3.);
    }

    proptest! {
        #[test]
        fn split_keeps_total(total in 0.0..500.0f64, axis in -50.0..50.0f64) {
            let (h, d) = split_around_axis(total, axis, true);
            prop_assert!((h + d - total).abs() < 1e-9);
            prop_assert!((h - d - 2. * axis).abs() < 1e-9);

            let (h, d) = split_around_axis(total, axis, false);
            prop_assert!((h + d - snap_length(total, false)).abs() <= 1.);
            prop_assert_eq!(h.fract(), 0.);
            prop_assert_eq!(d.fract(), 0.);
        }

        #[test]
        fn symmetric_covers_request(axis in 0.0..20.0f64, height in 0.0..200.0f64, depth in 0.0..200.0f64) {
            let (h, d) = symmetric_stretch(axis, height, depth, true);
            prop_assert!((h - axis - (d + axis)).abs() < 1e-9);
            prop_assert!(h >= height - 1e-9);
            prop_assert!(d >= depth - 1e-9);
        }
    }
}
