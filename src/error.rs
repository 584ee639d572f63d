//! Errors reported by the top-level measure and render calls.
//!
//! Degenerate geometry (an empty text run, a glyph missing from the table, an operator without text) is
//! never an error: it degrades to the null box and paints nothing. The variants below are the few conditions
//! a host can act on.

use std::fmt;

/// Result type for [`RenderError`]
pub type RenderResult<T> = ::std::result::Result<T, RenderError>;

/// Errors returned by [`crate::measure`] and [`crate::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// `render` was called while no paint backend was attached to the context.
    NoPaintBackend,
    /// The tree nests deeper than the configured limit; the offending subtree was measured as the null box
    /// and nothing was painted for it.
    NestingTooDeep {
        /// the `max_depth` setting in effect
        limit: usize,
    },
    /// The root of the tree measured to the null box: there is nothing to lay out.
    UndefinedRoot,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::RenderError::*;
        match *self {
            NoPaintBackend =>
                write!(f, "no paint backend attached"),
            NestingTooDeep { limit } =>
                write!(f, "formula tree nests deeper than {} levels", limit),
            UndefinedRoot =>
                write!(f, "root node has no defined box"),
        }
    }
}

impl std::error::Error for RenderError {}
