//! Construction: lattice simplex or domain plus half-spaces.

use tracing::{debug, warn};

use crate::domain::BoxDomain;
use crate::edge::EdgeConstraints;
use crate::error::{LinalgError, PolytopeError};
use crate::linalg::{normalize_row, IntMatrix};
use crate::space::{is_zero, mul, negate, LatticeInt, Point};

use super::store::InequalityStore;
use super::types::{EdgePolicy, HalfSpace, SimplexCfg};
use super::BoundedLatticePolytope;

impl<I: LatticeInt, const N: usize> BoundedLatticePolytope<I, N> {
    /// Simplex with `N + 1` affinely independent vertices, default config.
    ///
    /// ```
    /// use latpoly::prelude::*;
    /// let tri = BoundedLatticePolytope::<i64, 2>::from_simplex(&[
    ///     point([0, 0]),
    ///     point([2, 0]),
    ///     point([0, 2]),
    /// ])
    /// .unwrap();
    /// assert_eq!(tri.count(), 6);
    /// ```
    pub fn from_simplex(points: &[Point<I, N>]) -> Result<Self, PolytopeError> {
        Self::from_simplex_with(points, SimplexCfg::default())
    }

    /// Simplex with `N + 1` affinely independent vertices.
    ///
    /// Rows: the `2N` rows of the bounding box of the vertices, then one row
    /// per facet (merged into a parallel box row when one exists), then the
    /// edge constraints of the dimension.
    ///
    /// Facet rows come from the adjugate of `H = [p_j | 1]`: column `i` of
    /// `adj(H)` is `(w, w0)` with `w·p_j + w0 = det(H)·δ_ij`, so the plane
    /// through every vertex but `p_i` has normal `-sign(det)·w` and bound
    /// `sign(det)·w0`, oriented to keep `p_i` inside.
    ///
    /// Fixed-width coordinates whose minors leave the integer type give
    /// `PolytopeError::Linalg(LinalgError::Overflow)`; use a wider `I` then.
    pub fn from_simplex_with(points: &[Point<I, N>], cfg: SimplexCfg) -> Result<Self, PolytopeError> {
        if points.len() != N + 1 {
            return Err(PolytopeError::WrongPointCount {
                expected: N + 1,
                got: points.len(),
            });
        }
        let edges = EdgeConstraints::for_dimension(N);
        let edge_constraints_complete = match (edges, cfg.edge_policy) {
            (EdgeConstraints::Unsupported { dimension }, EdgePolicy::Require) => {
                return Err(PolytopeError::UnsupportedDimension { dimension });
            }
            (EdgeConstraints::Unsupported { dimension }, EdgePolicy::SkipUnsupported) => {
                warn!(
                    dimension,
                    "no edge constraints for this dimension; Minkowski sums may be inexact"
                );
                false
            }
            _ => true,
        };

        let h = IntMatrix::from_fn(N + 1, N + 1, |r, c| {
            if c < N {
                points[r][c].clone()
            } else {
                I::one()
            }
        });
        let inv = match h.inverse() {
            Ok(inv) => inv,
            Err(LinalgError::Singular) => return Err(PolytopeError::DegenerateSimplex),
            Err(e) => return Err(e.into()),
        };
        let sign = inv.det.signum();

        let domain = BoxDomain::bounding(points.iter()).ok_or(PolytopeError::EmptyDomain)?;
        let mut store = InequalityStore::from_domain(domain)?;
        for i in 0..=N {
            let w = inv.adjugate.column(i);
            let mut row = w[..N]
                .iter()
                .map(|x| negate(&mul(&sign, x)?))
                .collect::<Result<Vec<I>, _>>()?;
            row.push(mul(&sign, &w[N])?);
            normalize_row(&mut row);
            let normal = Point::from_fn(|r, _| row[r].clone());
            let k = store.merge_or_append(normal, row[N].clone(), true)?;
            store.tighten_domain_with(k);
        }

        if edge_constraints_complete {
            for i in 0..=N {
                for j in (i + 1)..=N {
                    for hs in edges.edge_halfspaces(points, i, j)? {
                        let k = store.merge_or_append(hs.normal, hs.bound, hs.large)?;
                        store.tighten_domain_with(k);
                    }
                }
            }
        }

        debug!(
            dimension = N,
            rows = store.len(),
            extent = ?store.domain.extent(),
            edge_constraints_complete,
            "simplex polytope built"
        );
        Ok(Self {
            store,
            valid: true,
            edge_constraints_complete,
        })
    }

    /// Polytope `{x in domain : h(x) for every h}`.
    ///
    /// The `2N` domain rows come first, then `halfspaces` in order, appended
    /// verbatim (no merging), so row `2N + i` is the `i`-th input.
    pub fn from_domain<It>(domain: BoxDomain<I, N>, halfspaces: It) -> Result<Self, PolytopeError>
    where
        It: IntoIterator<Item = HalfSpace<I, N>>,
    {
        if domain.is_empty() {
            return Err(PolytopeError::EmptyDomain);
        }
        let mut store = InequalityStore::from_domain(domain)?;
        for hs in halfspaces {
            if is_zero(&hs.normal) {
                return Err(PolytopeError::ZeroNormal);
            }
            let k = store.push(hs.normal, hs.bound, hs.large);
            store.tighten_domain_with(k);
        }
        debug!(
            dimension = N,
            rows = store.len(),
            extent = ?store.domain.extent(),
            "domain polytope built"
        );
        Ok(Self {
            store,
            valid: true,
            edge_constraints_complete: true,
        })
    }

    /// Re-initialize in place from a simplex; on error `self` is unchanged.
    pub fn init_from_simplex(&mut self, points: &[Point<I, N>]) -> Result<(), PolytopeError> {
        *self = Self::from_simplex(points)?;
        Ok(())
    }

    /// Re-initialize in place from a domain and half-spaces; on error `self` is unchanged.
    pub fn init_from_domain<It>(
        &mut self,
        domain: BoxDomain<I, N>,
        halfspaces: It,
    ) -> Result<(), PolytopeError>
    where
        It: IntoIterator<Item = HalfSpace<I, N>>,
    {
        *self = Self::from_domain(domain, halfspaces)?;
        Ok(())
    }
}
