//! Bounded lattice polytopes in H-representation.
//!
//! Purpose
//! - Represent `P = {x in Z^N : A x <= B}` with per-row strictness and a
//!   bounding box `D` that encloses every lattice solution.
//! - Support the operations used by digital-geometry callers: cuts, dilation,
//!   Minkowski sums with axis-aligned unit segments/cells, lattice-point
//!   counting and enumeration.
//!
//! Conventions
//! - Rows are `a·x <= b` (large) or `a·x < b` (strict); normals are integer and
//!   not normalized, row indices are stable and returned by `cut`.
//! - A default-constructed polytope is invalid: it contains nothing and
//!   refuses `cut`/`dilate`.
//! - Enumeration scans `D`, so its cost is the volume of the box, not of the
//!   polytope. Keep `D` tight by building from tight data.
//!
//! Code cross-refs: `store::InequalityStore`, `crate::edge::EdgeConstraints`,
//! `crate::linalg::IntMatrix`.

mod build;
mod enumerate;
mod ops;
mod store;
mod types;


use std::fmt;

use crate::domain::BoxDomain;
use crate::error::PolytopeError;
use crate::space::{LatticeInt, Point};

use store::InequalityStore;

pub use types::{
    EdgePolicy, HalfSpace, LeftStrictUnitCell, LeftStrictUnitSegment, RightStrictUnitCell,
    RightStrictUnitSegment, SegmentKind, SimplexCfg, UnitCell, UnitSegment, UnitSummand,
};

/// Convex lattice polytope given by integer inequalities and a bounding box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedLatticePolytope<I: LatticeInt, const N: usize> {
    store: InequalityStore<I, N>,
    valid: bool,
    edge_constraints_complete: bool,
}

impl<I: LatticeInt, const N: usize> Default for BoundedLatticePolytope<I, N> {
    fn default() -> Self {
        Self {
            store: InequalityStore::default(),
            valid: false,
            edge_constraints_complete: false,
        }
    }
}

impl<I: LatticeInt, const N: usize> BoundedLatticePolytope<I, N> {
    /// `false` for a default-constructed polytope.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn class_name(&self) -> &'static str {
        "BoundedLatticePolytope"
    }

    /// Bounding domain `D`.
    #[inline]
    pub fn domain(&self) -> &BoxDomain<I, N> {
        &self.store.domain
    }

    /// `false` when a simplex was built without the edge rows its dimension
    /// would need for exact Minkowski sums.
    #[inline]
    pub fn edge_constraints_complete(&self) -> bool {
        self.edge_constraints_complete
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.store.len()
    }

    /// Row `i`, if it exists.
    #[inline]
    pub fn row(&self, i: usize) -> Option<HalfSpace<I, N>> {
        (i < self.store.len()).then(|| self.store.row(i))
    }

    pub fn rows(&self) -> impl Iterator<Item = HalfSpace<I, N>> + '_ {
        (0..self.store.len()).map(|i| self.store.row(i))
    }

    /// Row normals `A`.
    #[inline]
    pub fn normals(&self) -> &[Point<I, N>] {
        &self.store.a
    }

    /// Row bounds `B`.
    #[inline]
    pub fn bounds(&self) -> &[I] {
        &self.store.b
    }

    /// Row flags `I` (`true` = large).
    #[inline]
    pub fn large_flags(&self) -> &[bool] {
        &self.store.large
    }

    /// `p` lies in `D` and satisfies every row.
    #[inline]
    pub fn is_inside(&self, p: &Point<I, N>) -> bool {
        self.valid && self.store.domain.is_inside(p) && self.store.satisfies(p)
    }

    /// Row test for a point already known to lie in `D`.
    ///
    /// The precondition is checked: a point outside `D` yields
    /// `PolytopeError::PointOutsideDomain` instead of an unspecified answer.
    pub fn is_domain_point_inside(&self, p: &Point<I, N>) -> Result<bool, PolytopeError> {
        if !self.valid {
            return Err(PolytopeError::NotInitialized);
        }
        if !self.store.domain.is_inside(p) {
            return Err(PolytopeError::PointOutsideDomain);
        }
        Ok(self.store.satisfies(p))
    }
}

impl<I: LatticeInt, const N: usize> fmt::Display for BoundedLatticePolytope<I, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[{}<{}> A.rows={} valid={} edge_constraints_complete={} D={}]",
            self.class_name(),
            N,
            self.row_count(),
            self.valid,
            self.edge_constraints_complete,
            self.store.domain
        )?;
        for h in self.rows() {
            writeln!(f, "  {h}")?;
        }
        Ok(())
    }
}
