//! Value types around the polytope: rows, Minkowski operands, build config.

use std::fmt;

use crate::space::{fmt_point, satisfies_row, LatticeInt, Point};

/// Half-space `normal · x <= bound` (large) or `normal · x < bound` (strict).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HalfSpace<I: LatticeInt, const N: usize> {
    pub normal: Point<I, N>,
    pub bound: I,
    pub large: bool,
}

impl<I: LatticeInt, const N: usize> HalfSpace<I, N> {
    /// Closed half-space `normal · x <= bound`.
    #[inline]
    pub fn new(normal: Point<I, N>, bound: I) -> Self {
        Self {
            normal,
            bound,
            large: true,
        }
    }

    /// Open half-space `normal · x < bound`.
    #[inline]
    pub fn strict(normal: Point<I, N>, bound: I) -> Self {
        Self {
            normal,
            bound,
            large: false,
        }
    }

    #[inline]
    pub fn contains(&self, p: &Point<I, N>) -> bool {
        satisfies_row(&self.normal, p, &self.bound, self.large)
    }
}

impl<I: LatticeInt, const N: usize> fmt::Display for HalfSpace<I, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_point(f, &self.normal)?;
        let op = if self.large { "<=" } else { "<" };
        write!(f, " . x {op} {}", self.bound)
    }
}

/// Endpoint policy of a unit segment `[0, e_k]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// Both endpoints included.
    Closed,
    /// `[0, e_k)`.
    RightStrict,
    /// `(0, e_k]`.
    LeftStrict,
}

/// Closed unit segment `[0, e_k]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitSegment {
    pub k: usize,
}

/// Unit segment `[0, e_k)`, far endpoint excluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RightStrictUnitSegment {
    pub k: usize,
}

/// Unit segment `(0, e_k]`, origin excluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeftStrictUnitSegment {
    pub k: usize,
}

impl UnitSegment {
    #[inline]
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl RightStrictUnitSegment {
    #[inline]
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl LeftStrictUnitSegment {
    #[inline]
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

/// Minkowski sum of closed unit segments along `dims`; empty `dims` is the origin.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitCell {
    pub dims: Vec<usize>,
}

/// Minkowski sum of right-strict unit segments along `dims`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RightStrictUnitCell {
    pub dims: Vec<usize>,
}

/// Minkowski sum of left-strict unit segments along `dims`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeftStrictUnitCell {
    pub dims: Vec<usize>,
}

impl UnitCell {
    pub fn new(dims: impl IntoIterator<Item = usize>) -> Self {
        Self {
            dims: dims.into_iter().collect(),
        }
    }
}

impl RightStrictUnitCell {
    pub fn new(dims: impl IntoIterator<Item = usize>) -> Self {
        Self {
            dims: dims.into_iter().collect(),
        }
    }
}

impl LeftStrictUnitCell {
    pub fn new(dims: impl IntoIterator<Item = usize>) -> Self {
        Self {
            dims: dims.into_iter().collect(),
        }
    }
}

/// Operand of a Minkowski sum: a sum of unit segments along coordinate axes.
pub trait UnitSummand {
    /// `(axis, kind)` of each segment, in summation order.
    fn segments(&self) -> Vec<(usize, SegmentKind)>;
}

impl UnitSummand for UnitSegment {
    fn segments(&self) -> Vec<(usize, SegmentKind)> {
        vec![(self.k, SegmentKind::Closed)]
    }
}

impl UnitSummand for RightStrictUnitSegment {
    fn segments(&self) -> Vec<(usize, SegmentKind)> {
        vec![(self.k, SegmentKind::RightStrict)]
    }
}

impl UnitSummand for LeftStrictUnitSegment {
    fn segments(&self) -> Vec<(usize, SegmentKind)> {
        vec![(self.k, SegmentKind::LeftStrict)]
    }
}

impl UnitSummand for UnitCell {
    fn segments(&self) -> Vec<(usize, SegmentKind)> {
        self.dims.iter().map(|&k| (k, SegmentKind::Closed)).collect()
    }
}

impl UnitSummand for RightStrictUnitCell {
    fn segments(&self) -> Vec<(usize, SegmentKind)> {
        self.dims.iter().map(|&k| (k, SegmentKind::RightStrict)).collect()
    }
}

impl UnitSummand for LeftStrictUnitCell {
    fn segments(&self) -> Vec<(usize, SegmentKind)> {
        self.dims.iter().map(|&k| (k, SegmentKind::LeftStrict)).collect()
    }
}

fn fmt_dims(f: &mut fmt::Formatter<'_>, dims: &[usize]) -> fmt::Result {
    write!(f, "{{")?;
    for d in dims {
        write!(f, "{d}")?;
    }
    write!(f, "}}")
}

impl fmt::Display for UnitCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_dims(f, &self.dims)
    }
}

impl fmt::Display for RightStrictUnitCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_dims(f, &self.dims)
    }
}

impl fmt::Display for LeftStrictUnitCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_dims(f, &self.dims)
    }
}

/// What simplex construction does when the dimension has no edge-constraint rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Fail with `PolytopeError::UnsupportedDimension`.
    #[default]
    Require,
    /// Build without edge constraints. The polytope is exact, but later
    /// Minkowski sums may overshoot; `edge_constraints_complete()` reports it.
    SkipUnsupported,
}

/// Simplex construction configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimplexCfg {
    pub edge_policy: EdgePolicy,
}
