//! Lattice-point counting and enumeration by scanning the bounding domain.

use crate::domain::BoxDomain;
use crate::space::{LatticeInt, Point};

use super::BoundedLatticePolytope;

impl<I: LatticeInt, const N: usize> BoundedLatticePolytope<I, N> {
    /// Lattice points of the polytope inside `box_`, axis 0 varying fastest.
    fn scan(&self, box_: BoxDomain<I, N>) -> impl Iterator<Item = Point<I, N>> + '_ {
        let box_ = if self.valid { box_ } else { BoxDomain::empty() };
        box_.points().filter(move |p| self.store.satisfies(p))
    }

    /// Lattice points of the polytope, axis 0 varying fastest.
    pub fn iter_points(&self) -> impl Iterator<Item = Point<I, N>> + '_ {
        self.scan(self.store.domain.clone())
    }

    /// Number of lattice points; 0 for an invalid polytope.
    pub fn count(&self) -> u64 {
        self.iter_points().count() as u64
    }

    /// Number of lattice points in the box `[low, hi]`.
    pub fn count_in(&self, low: &Point<I, N>, hi: &Point<I, N>) -> u64 {
        let window = self.store.domain.intersect(&BoxDomain::new(low.clone(), hi.clone()));
        self.scan(window).count() as u64
    }

    /// `min(count(), max)`; stops scanning once `max` points are found.
    pub fn count_up_to(&self, max: u64) -> u64 {
        let cap = usize::try_from(max).unwrap_or(usize::MAX);
        self.iter_points().take(cap).count() as u64
    }

    /// All lattice points in scan order.
    pub fn points(&self) -> Vec<Point<I, N>> {
        self.iter_points().collect()
    }

    /// Replace the contents of `out` with the lattice points.
    pub fn get_points(&self, out: &mut Vec<Point<I, N>>) {
        out.clear();
        out.extend(self.iter_points());
    }

    /// Add the lattice points to any collection (e.g. a `HashSet`).
    pub fn insert_points<S: Extend<Point<I, N>>>(&self, set: &mut S) {
        set.extend(self.iter_points());
    }
}
