//! Inequality storage: parallel rows `A`, `B`, `I` and the bounding domain `D`.
//!
//! Invariants
//! - `a.len() == b.len() == large.len()`; index = constraint id, stable.
//! - `domain` contains every lattice point satisfying all rows, and the real
//!   solution set lies strictly within one unit of it on each axis. Axis rows
//!   keep it tight; other rows never touch it.

use crate::domain::BoxDomain;
use crate::error::LinalgError;
use crate::space::{
    axis_of, base, content, minus, mul, negate, primitive, satisfies_row, LatticeInt, Point,
};

use super::types::HalfSpace;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct InequalityStore<I: LatticeInt, const N: usize> {
    pub(crate) a: Vec<Point<I, N>>,
    pub(crate) b: Vec<I>,
    pub(crate) large: Vec<bool>,
    pub(crate) domain: BoxDomain<I, N>,
}

impl<I: LatticeInt, const N: usize> Default for InequalityStore<I, N> {
    fn default() -> Self {
        Self {
            a: Vec::new(),
            b: Vec::new(),
            large: Vec::new(),
            domain: BoxDomain::empty(),
        }
    }
}

impl<I: LatticeInt, const N: usize> InequalityStore<I, N> {
    /// Store holding the `2N` axis rows of `domain`: row `2s` is `x_s <= upper_s`,
    /// row `2s + 1` is `-x_s <= -lower_s`.
    pub(crate) fn from_domain(domain: BoxDomain<I, N>) -> Result<Self, LinalgError> {
        let mut store = Self {
            a: Vec::with_capacity(2 * N),
            b: Vec::with_capacity(2 * N),
            large: Vec::with_capacity(2 * N),
            domain: BoxDomain::empty(),
        };
        for s in 0..N {
            store.push(base(s, I::one()), domain.upper[s].clone(), true);
            store.push(base(s, -I::one()), negate(&domain.lower[s])?, true);
        }
        store.domain = domain;
        Ok(store)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.a.len()
    }

    #[inline]
    pub(crate) fn row(&self, i: usize) -> HalfSpace<I, N> {
        HalfSpace {
            normal: self.a[i].clone(),
            bound: self.b[i].clone(),
            large: self.large[i],
        }
    }

    /// Append a row without merging; returns its index.
    #[inline]
    pub(crate) fn push(&mut self, a: Point<I, N>, b: I, large: bool) -> usize {
        self.a.push(a);
        self.b.push(b);
        self.large.push(large);
        self.a.len() - 1
    }

    /// First row whose normal is a positive multiple of `a`.
    pub(crate) fn find_parallel(&self, a: &Point<I, N>) -> Option<usize> {
        let dir = primitive(a)?;
        self.a
            .iter()
            .position(|row| primitive(row).is_some_and(|r| r == dir))
    }

    /// Intersect with `a·x <= b` (or `<`): tighten a parallel row or append.
    ///
    /// Rows `g_a·u·x <= b` and `g_k·u·x <= B_k` share the primitive direction
    /// `u`, so the tighter one has the smaller `b / g`; compared by
    /// cross-multiplication to stay exact. On equal bounds strictness wins.
    /// Fails without touching the store if a product leaves `I`.
    pub(crate) fn merge_or_append(
        &mut self,
        a: Point<I, N>,
        b: I,
        large: bool,
    ) -> Result<usize, LinalgError> {
        let Some(k) = self.find_parallel(&a) else {
            return Ok(self.push(a, b, large));
        };
        let new_scaled = mul(&b, &content(&self.a[k]))?;
        let old_scaled = mul(&self.b[k], &content(&a))?;
        if new_scaled < old_scaled {
            tracing::trace!(row = k, "cut tightens parallel row");
            self.a[k] = a;
            self.b[k] = b;
            self.large[k] = large;
        } else if new_scaled == old_scaled {
            self.large[k] = self.large[k] && large;
        }
        Ok(k)
    }

    /// Every row holds at `p` (no domain test).
    #[inline]
    pub(crate) fn satisfies(&self, p: &Point<I, N>) -> bool {
        self.a
            .iter()
            .zip(self.b.iter())
            .zip(self.large.iter())
            .all(|((a, b), &large)| satisfies_row(a, p, b, large))
    }

    /// Shrink the domain with row `i` if it is axis-aligned.
    ///
    /// `c·x_k <= b` gives `x_k <= floor(b/c)` for `c > 0` and
    /// `x_k >= -floor(b/|c|)` for `c < 0`; a strict row is the large row `b - 1`
    /// on the lattice. A bound that does not fit `I` leaves the domain as is.
    pub(crate) fn tighten_domain_with(&mut self, i: usize) {
        let Some((k, c)) = axis_of(&self.a[i]) else {
            return;
        };
        let b = if self.large[i] {
            Ok(self.b[i].clone())
        } else {
            minus(&self.b[i], &I::one())
        };
        let Ok(b) = b else {
            return;
        };
        if c.is_positive() {
            let hi = b.div_floor(&c);
            if hi < self.domain.upper[k] {
                self.domain.upper[k] = hi;
            }
        } else {
            let lo = negate(&c).and_then(|m| negate(&b.div_floor(&m)));
            if let Ok(lo) = lo {
                if lo > self.domain.lower[k] {
                    self.domain.lower[k] = lo;
                }
            }
        }
    }

    /// Re-tighten the domain with every axis-aligned row.
    pub(crate) fn tighten_domain(&mut self) {
        for i in 0..self.len() {
            self.tighten_domain_with(i);
        }
    }
}
