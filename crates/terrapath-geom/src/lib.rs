//! Integer grid geometry shared by the terrapath crates.
//!
//! [`Point`] doubles as the node identity of grid graphs, so it is `Copy`,
//! `Eq` and `Hash`. [`Range`] is a half-open rectangle used for bounds checks
//! and row-major iteration.

mod geom;

pub use geom::{Point, Range, RangeIter};
