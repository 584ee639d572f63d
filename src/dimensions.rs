//! Types for quantities with units (em, points)
//!
//! Spacing constants of the layout engine are written in [`Em`] and only become device lengths once
//! multiplied by the font size of the current style. Keeping the unit in the type makes it impossible to
//! add an em quantity to a device length by mistake.


use std::ops::{Mul, Div, Neg};
use std::fmt::Debug;

use self::units::{Em, FontSize, Pt};
pub mod units;

/// A f64 value with its unit represented in the type
pub struct Unit<U> {
    value : f64,
    _phantom : std::marker::PhantomData<U>,
}


impl<U> PartialEq for Unit<U> {
    fn eq(&self, other: &Self) -> bool {
        self.value.eq(&other.value)
    }
}

impl<U> Clone for Unit<U> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<U> Copy for Unit<U> {}
impl<U> Debug for Unit<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let type_name = std::any::type_name::<U>();
        write!(f, "Unit::<{}>::new({})", type_name, self.value)
    }
}


impl<U> Unit<U> {
    /// The zero value
    pub const ZERO : Self = Self::new(0.);

    /// Creates a value with unit from a unit-less value.
    /// To be used with care: you need to manually check that the value you pass is indeed in the right dimension.
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            _phantom: std::marker::PhantomData
        }
    }

    /// Converts a value to a unit-less value ("unsafe" since it removes information about dimensions)
    #[inline]
    pub const fn to_unitless(self) -> f64
    { self.value }
}

impl Unit<FontSize> {
    /// Font size of a style whose `math_size` is given in points.
    pub const fn from_points(size: f64) -> Self {
        Self::new(size)
    }

    /// Device length of an em quantity at this font size.
    pub fn length(self, len: Unit<Em>) -> f64 {
        let pt : Unit<Pt> = len * self;
        pt.to_unitless()
    }
}

impl<U> Neg for Unit<U> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(- self.value)
    }
}


impl<U, V> Mul<Unit<units::Ratio<U, V>>> for Unit<V> {
    type Output = Unit<U>;

    fn mul(self, rhs: Unit<units::Ratio<U, V>>) -> Self::Output {
        Unit::<U>::new(self.value * rhs.value)
    }
}

impl<U, V> Div<Unit<V>> for Unit<U> {
    type Output = Unit<units::Ratio<U, V>>;

    fn div(self, rhs: Unit<V>) -> Self::Output {
        Unit::<units::Ratio<U, V>>::new(self.value / rhs.value)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn em_lengths_follow_font_size() {
        let size = Unit::<FontSize>::from_points(12.);
        assert_eq!(size.length(Unit::<Em>::new(0.5)), 6.);
        assert_eq!(size.length(Unit::<Em>::ZERO), 0.);
        assert_eq!(size.length(-Unit::<Em>::new(1.)), -12.);
    }

    #[test]
    fn ratio_of_lengths() {
        let a = Unit::<Pt>::new(6.);
        let b = Unit::<Em>::new(0.5);
        let size = a / b;
        assert_eq!(size.to_unitless(), 12.);
        assert_eq!(b * size, a);
    }
}
