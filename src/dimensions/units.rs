//! Units used by the layout engine: em and points
//!
//! The conversion between [`Em`] and [`Pt`] is precisely what specifying a font size is about (cf [`FontSize`]).
//! Device lengths handed to a paint backend are expressed in points; at the default 1:1 user transform one point
//! is one device unit.

// ------------------------- BASIC UNITS --------------------------------

/// A virtual unit conventionally corresponding to the width of an em-dash and to the font size.
///
/// All the spacing constants of the engine (gaps around fraction bars, script shifts, the space
/// around a radical) are given in em so that they scale with the current style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Em;


/// Specifying a font size is by definition specifying how many points there is in an em.
/// 12 pt size means "1 em = 12 pt"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pt;


/// Font size is expressed in pt / em
pub type FontSize = Ratio<Pt, Em>;

// ------------------- UNIT COMBINATORS -------------------------

/// If U is a unit and V is a unit, Ratio<U, V> is the unit U . V⁻¹
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio<U, V> {
	_numerator    : std::marker::PhantomData<U>,
	_denominator  : std::marker::PhantomData<V>,
}
