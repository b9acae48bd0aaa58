//! Edge constraints: extra simplex rows that keep unit Minkowski sums exact.
//!
//! Summing an H-polytope with `[0, e_k]` only shifts existing rows, so the
//! result is exact only if every facet normal of the sum is already a row.
//! For a simplex the missing normals are `edge × e_k`; in 1D and 2D they are
//! axis normals (always present as domain rows), in 3D they are the
//! cross-product rows derived here, and above 3D the faces of higher
//! dimension would also be needed, which is not implemented.

use crate::error::{LinalgError, PolytopeError};
use crate::polytope::HalfSpace;
use crate::space::{cross3, dot, satisfies_row, sub, LatticeInt, Point};

/// Edge-constraint capability for an ambient dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeConstraints {
    /// Dimension <= 2: axis rows already carry every needed normal.
    NotNeeded,
    /// Dimension 3: rows spanned by an edge and a coordinate axis.
    CrossProduct3d,
    /// No rule for this dimension.
    Unsupported { dimension: usize },
}

impl EdgeConstraints {
    pub fn for_dimension(dimension: usize) -> Self {
        match dimension {
            0..=2 => Self::NotNeeded,
            3 => Self::CrossProduct3d,
            d => Self::Unsupported { dimension: d },
        }
    }

    /// Half-spaces bounding simplex edge `(i, j)` along each axis.
    ///
    /// A candidate row `n = (p_i - p_j) × (±e_k)`, `b = n · p_i` is kept when
    /// exactly `N - 1` simplex points lie strictly below it, i.e. the plane
    /// through the edge supports the simplex.
    ///
    /// # Panics
    /// Panics if `i` or `j` is not an index of `pts`.
    pub fn edge_halfspaces<I: LatticeInt, const N: usize>(
        &self,
        pts: &[Point<I, N>],
        i: usize,
        j: usize,
    ) -> Result<Vec<HalfSpace<I, N>>, PolytopeError> {
        match *self {
            Self::NotNeeded => Ok(Vec::new()),
            Self::Unsupported { dimension } => {
                Err(PolytopeError::UnsupportedDimension { dimension })
            }
            Self::CrossProduct3d if N != 3 => {
                Err(PolytopeError::UnsupportedDimension { dimension: N })
            }
            Self::CrossProduct3d => Ok(cross_product_rows(pts, i, j)?),
        }
    }
}

fn cross_product_rows<I: LatticeInt, const N: usize>(
    pts: &[Point<I, N>],
    i: usize,
    j: usize,
) -> Result<Vec<HalfSpace<I, N>>, LinalgError> {
    let ab = sub(&pts[i], &pts[j])?;
    let ab = [ab[0].clone(), ab[1].clone(), ab[2].clone()];
    let mut out = Vec::new();
    for s in [I::one(), -I::one()] {
        for k in 0..3 {
            let mut e = [I::zero(), I::zero(), I::zero()];
            e[k] = s.clone();
            let n3 = cross3(&ab, &e)?;
            let n: Point<I, N> = Point::from_fn(|r, _| n3[r].clone());
            let b = dot(&n, &pts[i])?;
            let below = pts
                .iter()
                .filter(|p| satisfies_row(&n, p, &b, false))
                .count();
            if below == N - 1 {
                out.push(HalfSpace::new(n, b));
            }
        }
    }
    Ok(out)
}
