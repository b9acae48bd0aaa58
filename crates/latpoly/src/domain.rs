//! Axis-aligned lattice boxes `[lower, upper]` and their point iteration.
//!
//! A box with `lower[k] > upper[k]` on some axis is empty; every operation
//! accepts empty boxes and treats them as containing nothing.

use std::fmt;

use crate::space::{fmt_point, inf, sup, LatticeInt, Point};

/// Closed lattice box `{x : lower <= x <= upper}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoxDomain<I: LatticeInt, const N: usize> {
    pub lower: Point<I, N>,
    pub upper: Point<I, N>,
}

impl<I: LatticeInt, const N: usize> BoxDomain<I, N> {
    #[inline]
    pub fn new(lower: Point<I, N>, upper: Point<I, N>) -> Self {
        Self { lower, upper }
    }

    /// Canonical empty box (`lower = 0`, `upper = -1`).
    #[inline]
    pub fn empty() -> Self {
        Self {
            lower: Point::from_element(I::zero()),
            upper: Point::from_element(-I::one()),
        }
    }

    /// Smallest box containing every point; `None` for no points.
    pub fn bounding<'a, It>(points: It) -> Option<Self>
    where
        It: IntoIterator<Item = &'a Point<I, N>>,
    {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (lower, upper) = it.fold((first.clone(), first.clone()), |(lo, hi), p| (inf(&lo, p), sup(&hi, p)));
        Some(Self { lower, upper })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lower.iter().zip(self.upper.iter()).any(|(l, u)| l > u)
    }

    #[inline]
    pub fn is_inside(&self, p: &Point<I, N>) -> bool {
        (0..N).all(|k| self.lower[k] <= p[k] && p[k] <= self.upper[k])
    }

    /// Box intersection (possibly empty).
    #[inline]
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            lower: sup(&self.lower, &other.lower),
            upper: inf(&self.upper, &other.upper),
        }
    }

    /// Number of lattice values per axis (`upper - lower + 1`, zero when empty).
    ///
    /// `None` if an extent does not fit `I`.
    pub fn extent(&self) -> Option<Point<I, N>> {
        let mut out = Point::from_element(I::zero());
        if self.is_empty() {
            return Some(out);
        }
        for k in 0..N {
            out[k] = self.upper[k]
                .checked_sub(&self.lower[k])?
                .checked_add(&I::one())?;
        }
        Some(out)
    }

    /// Lattice points in lexicographic order, axis 0 varying fastest.
    #[inline]
    pub fn points(&self) -> DomainPoints<I, N> {
        DomainPoints {
            lower: self.lower.clone(),
            upper: self.upper.clone(),
            next: if self.is_empty() {
                None
            } else {
                Some(self.lower.clone())
            },
        }
    }
}

impl<I: LatticeInt, const N: usize> fmt::Display for BoxDomain<I, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        fmt_point(f, &self.lower)?;
        write!(f, " .. ")?;
        fmt_point(f, &self.upper)?;
        write!(f, "]")
    }
}

/// Iterator over the lattice points of a [`BoxDomain`].
#[derive(Clone, Debug)]
pub struct DomainPoints<I: LatticeInt, const N: usize> {
    lower: Point<I, N>,
    upper: Point<I, N>,
    next: Option<Point<I, N>>,
}

impl<I: LatticeInt, const N: usize> Iterator for DomainPoints<I, N> {
    type Item = Point<I, N>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut p = current.clone();
        let mut advanced = false;
        for k in 0..N {
            if p[k] < self.upper[k] {
                p[k] = p[k].clone() + I::one();
                advanced = true;
                break;
            }
            p[k] = self.lower[k].clone();
        }
        self.next = if advanced { Some(p) } else { None };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::point;

    #[test]
    fn iterates_axis_zero_fastest() {
        let d = BoxDomain::new(point([0i64, 0]), point([1, 1]));
        let pts: Vec<_> = d.points().collect();
        assert_eq!(
            pts,
            vec![point([0, 0]), point([1, 0]), point([0, 1]), point([1, 1])]
        );
    }

    #[test]
    fn empty_boxes() {
        let e: BoxDomain<i64, 3> = BoxDomain::empty();
        assert!(e.is_empty());
        assert_eq!(e.points().count(), 0);
        assert_eq!(e.extent(), Some(point([0, 0, 0])));

        let a = BoxDomain::new(point([0i64, 0]), point([2, 2]));
        let b = BoxDomain::new(point([3i64, 0]), point([4, 2]));
        assert!(a.intersect(&b).is_empty());
    }

    #[test]
    fn iteration_stops_at_the_type_maximum() {
        let d = BoxDomain::new(point([i64::MAX - 1]), point([i64::MAX]));
        let pts: Vec<_> = d.points().collect();
        assert_eq!(pts, vec![point([i64::MAX - 1]), point([i64::MAX])]);
        assert_eq!(d.extent(), Some(point([2])));
        let full = BoxDomain::new(point([i64::MIN]), point([i64::MAX]));
        assert_eq!(full.extent(), None);
    }

    #[test]
    fn bounding_box_and_membership() {
        let pts = [point([1i64, -2, 0]), point([-1, 4, 2]), point([0, 0, 5])];
        let d = BoxDomain::bounding(pts.iter()).unwrap();
        assert_eq!(d.lower, point([-1, -2, 0]));
        assert_eq!(d.upper, point([1, 4, 5]));
        assert!(d.is_inside(&point([0, 0, 0])));
        assert!(!d.is_inside(&point([2, 0, 0])));
        assert_eq!(d.extent(), Some(point([3, 7, 6])));
        assert_eq!(d.points().count(), 3 * 7 * 6);
        assert_eq!(d.to_string(), "[(-1, -2, 0) .. (1, 4, 5)]");
    }
}
