//! Bounded lattice polytopes: exact H-representations over the integer lattice.
//!
//! A polytope is a finite list of integer inequalities `a·x <= b` (or `a·x < b`)
//! together with an axis-aligned bounding domain that encloses every lattice
//! point satisfying them. Polytopes are built from a lattice simplex or from a
//! domain plus half-spaces, then cut, dilated, Minkowski-summed with unit
//! segments/cells, and finally queried or enumerated.
//!
//! Layout
//! - `space`: integer point helpers on `nalgebra::SVector` (checked dot, cross, base vectors).
//! - `domain`: axis-aligned lattice boxes and their point iteration.
//! - `linalg`: exact integer determinant / adjugate (no floats anywhere).
//! - `edge`: per-dimension edge constraints needed by exact Minkowski sums.
//! - `polytope`: the engine.
//! - `rand`: reproducible random lattice simplices for tests and benches.

pub mod domain;
pub mod edge;
pub mod error;
pub mod linalg;
pub mod polytope;
pub mod rand;
pub mod space;

#[cfg(feature = "bigint")]
pub use num_bigint::BigInt;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use domain::BoxDomain;
pub use error::{LinalgError, PolytopeError};
pub use polytope::BoundedLatticePolytope;
pub use space::{LatticeInt, Point};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::domain::BoxDomain;
    pub use crate::edge::EdgeConstraints;
    pub use crate::error::{LinalgError, PolytopeError};
    pub use crate::polytope::{
        BoundedLatticePolytope, EdgePolicy, HalfSpace, LeftStrictUnitCell, LeftStrictUnitSegment,
        RightStrictUnitCell, RightStrictUnitSegment, SegmentKind, SimplexCfg, UnitCell,
        UnitSegment, UnitSummand,
    };
    pub use crate::rand::{draw_simplex, ReplayToken, SamplerCfg};
    pub use crate::space::{point, LatticeInt, Point};
}
