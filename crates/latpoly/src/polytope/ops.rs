//! In-place operations: cuts, dilation, Minkowski sums with unit segments and cells.

use std::ops::{Add, AddAssign};

use crate::domain::BoxDomain;
use crate::error::{LinalgError, PolytopeError};
use crate::space::{add, is_zero, minus, mul, LatticeInt, Point};

use super::store::InequalityStore;
use super::types::{
    HalfSpace, LeftStrictUnitCell, LeftStrictUnitSegment, RightStrictUnitCell,
    RightStrictUnitSegment, SegmentKind, UnitCell, UnitSegment, UnitSummand,
};
use super::BoundedLatticePolytope;

impl<I: LatticeInt, const N: usize> BoundedLatticePolytope<I, N> {
    /// Index of the first row whose normal is a positive multiple of `a`.
    #[inline]
    pub fn find_parallel(&self, a: &Point<I, N>) -> Option<usize> {
        self.store.find_parallel(a)
    }

    /// Intersect with `a·x <= b` (`large`) or `a·x < b`.
    ///
    /// A row with a parallel normal is replaced if the new one is tighter
    /// (strictness is combined on equal bounds); otherwise the row is
    /// appended. Returns the index of the row that now carries the cut.
    /// Axis-aligned cuts also shrink the domain.
    ///
    /// Fails with `PolytopeError::Linalg(LinalgError::Overflow)`, leaving the
    /// rows as they were, when comparing against a parallel row overflows.
    pub fn cut(&mut self, a: Point<I, N>, b: I, large: bool) -> Result<usize, PolytopeError> {
        if !self.valid {
            return Err(PolytopeError::NotInitialized);
        }
        if is_zero(&a) {
            return Err(PolytopeError::ZeroNormal);
        }
        let k = self.store.merge_or_append(a, b, large)?;
        self.store.tighten_domain_with(k);
        Ok(k)
    }

    #[inline]
    pub fn cut_halfspace(&mut self, hs: HalfSpace<I, N>) -> Result<usize, PolytopeError> {
        self.cut(hs.normal, hs.bound, hs.large)
    }

    /// Dilate by `t > 0`: `B <- t·B`.
    ///
    /// The domain grows to `[t·l - (t-1), t·u + (t-1)]`, which still holds the
    /// real solution set scaled by `t`, then shrinks back with the axis rows.
    /// If a scaled bound or domain corner leaves `I` the result is
    /// `PolytopeError::Linalg(LinalgError::Overflow)` and `self` is unchanged.
    pub fn dilate(&mut self, t: I) -> Result<(), PolytopeError> {
        if !self.valid {
            return Err(PolytopeError::NotInitialized);
        }
        if !t.is_positive() {
            return Err(PolytopeError::NonPositiveDilation);
        }
        if t.is_one() {
            return Ok(());
        }
        let b = self
            .store
            .b
            .iter()
            .map(|b| mul(b, &t))
            .collect::<Result<Vec<_>, _>>()?;
        let slack = minus(&t, &I::one())?;
        let d = &self.store.domain;
        let mut lower = d.lower.clone();
        let mut upper = d.upper.clone();
        for k in 0..N {
            lower[k] = minus(&mul(&d.lower[k], &t)?, &slack)?;
            upper[k] = add(&mul(&d.upper[k], &t)?, &slack)?;
        }
        self.store.b = b;
        self.store.domain = BoxDomain::new(lower, upper);
        self.store.tighten_domain();
        Ok(())
    }

    /// Dilated copy; `self` is untouched.
    pub fn dilated(&self, t: I) -> Result<Self, PolytopeError> {
        let mut out = self.clone();
        out.dilate(t)?;
        Ok(out)
    }

    /// Minkowski sum with a unit segment or cell, reporting failures.
    ///
    /// Each segment `[0, e_k]` moves every row with `a_k > 0` out by `a_k`
    /// and leaves the others unchanged. Right-strict segments make the moved
    /// rows strict, left-strict ones make the rows with `a_k < 0` strict.
    ///
    /// Fails with `PolytopeError::AxisOutOfRange` for an axis `>= N` and with
    /// `PolytopeError::Linalg(LinalgError::Overflow)` when a shifted bound
    /// leaves `I`; `self` is unchanged on failure. No-op on an invalid polytope.
    pub fn try_minkowski_sum<S: UnitSummand + ?Sized>(
        &mut self,
        summand: &S,
    ) -> Result<(), PolytopeError> {
        let segments = summand.segments();
        if let Some(&(axis, _)) = segments.iter().find(|(k, _)| *k >= N) {
            return Err(PolytopeError::AxisOutOfRange { axis, dimension: N });
        }
        if !self.valid {
            return Ok(());
        }
        let mut next = self.store.clone();
        for (k, kind) in segments {
            sum_segment(&mut next, k, kind)?;
        }
        self.store = next;
        Ok(())
    }

    /// Minkowski sum on a copy; `self` is untouched.
    pub fn try_minkowski_summed<S: UnitSummand + ?Sized>(
        &self,
        summand: &S,
    ) -> Result<Self, PolytopeError> {
        let mut out = self.clone();
        out.try_minkowski_sum(summand)?;
        Ok(out)
    }
}

fn sum_segment<I: LatticeInt, const N: usize>(
    s: &mut InequalityStore<I, N>,
    k: usize,
    kind: SegmentKind,
) -> Result<(), LinalgError> {
    for i in 0..s.a.len() {
        let c = &s.a[i][k];
        if c.is_positive() {
            s.b[i] = add(&s.b[i], c)?;
            if kind == SegmentKind::RightStrict {
                s.large[i] = false;
            }
        } else if c.is_negative() && kind == SegmentKind::LeftStrict {
            s.large[i] = false;
        }
    }
    s.domain.upper[k] = add(&s.domain.upper[k], &I::one())?;
    s.tighten_domain();
    Ok(())
}

macro_rules! impl_minkowski {
    ($($operand:ty),+ $(,)?) => {$(
        /// Minkowski sum in place.
        ///
        /// # Panics
        /// Panics if an axis is not below the dimension or a bound overflows;
        /// [`BoundedLatticePolytope::try_minkowski_sum`] reports both instead.
        impl<I: LatticeInt, const N: usize> AddAssign<$operand> for BoundedLatticePolytope<I, N> {
            #[track_caller]
            fn add_assign(&mut self, rhs: $operand) {
                *self += &rhs;
            }
        }

        impl<I: LatticeInt, const N: usize> AddAssign<&$operand> for BoundedLatticePolytope<I, N> {
            #[track_caller]
            fn add_assign(&mut self, rhs: &$operand) {
                if let Err(e) = self.try_minkowski_sum(rhs) {
                    panic!("Minkowski sum with {rhs:?} failed: {e}");
                }
            }
        }

        impl<I: LatticeInt, const N: usize> Add<$operand> for BoundedLatticePolytope<I, N> {
            type Output = Self;
            fn add(mut self, rhs: $operand) -> Self {
                self += rhs;
                self
            }
        }

        impl<I: LatticeInt, const N: usize> Add<$operand> for &BoundedLatticePolytope<I, N> {
            type Output = BoundedLatticePolytope<I, N>;
            fn add(self, rhs: $operand) -> Self::Output {
                let mut out = self.clone();
                out += rhs;
                out
            }
        }
    )+};
}

impl_minkowski!(
    UnitSegment,
    RightStrictUnitSegment,
    LeftStrictUnitSegment,
    UnitCell,
    RightStrictUnitCell,
    LeftStrictUnitCell,
);
