//! JSON polytope descriptions and their dimension dispatch.
//!
//! A description is either a simplex or a domain with half-spaces, followed by
//! a list of operations applied in order:
//!
//! ```json
//! {"simplex": [[0, 0], [2, 0], [0, 2]],
//!  "ops": [{"dilate": 3}, {"segment": {"axis": 0, "kind": "right_strict"}}]}
//! ```

use anyhow::{bail, Context, Result};
use latpoly::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct HalfSpaceDesc {
    pub normal: Vec<i64>,
    pub bound: i64,
    #[serde(default)]
    pub strict: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DomainDesc {
    pub lower: Vec<i64>,
    pub upper: Vec<i64>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKindDesc {
    #[default]
    Closed,
    RightStrict,
    LeftStrict,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OpDesc {
    Cut(HalfSpaceDesc),
    Dilate(i64),
    Segment {
        axis: usize,
        #[serde(default)]
        kind: SegmentKindDesc,
    },
    Cell {
        axes: Vec<usize>,
        #[serde(default)]
        kind: SegmentKindDesc,
    },
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PolytopeDesc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simplex: Option<Vec<Vec<i64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<DomainDesc>,
    #[serde(default)]
    pub halfspaces: Vec<HalfSpaceDesc>,
    #[serde(default)]
    pub ops: Vec<OpDesc>,
}

impl PolytopeDesc {
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }

    /// Ambient dimension, taken from the first simplex vertex or the domain.
    pub fn dimension(&self) -> Result<usize> {
        match (&self.simplex, &self.domain) {
            (Some(_), Some(_)) => bail!("give either \"simplex\" or \"domain\", not both"),
            (Some(pts), None) => pts
                .first()
                .map(Vec::len)
                .context("\"simplex\" has no vertices"),
            (None, Some(d)) => Ok(d.lower.len()),
            (None, None) => bail!("missing \"simplex\" or \"domain\""),
        }
    }
}

fn to_point<const N: usize>(v: &[i64]) -> Result<Point<i64, N>, PolytopeError> {
    if v.len() != N {
        return Err(PolytopeError::DimensionMismatch {
            expected: N,
            got: v.len(),
        });
    }
    Ok(Point::from_fn(|r, _| v[r]))
}

fn to_halfspace<const N: usize>(h: &HalfSpaceDesc) -> Result<HalfSpace<i64, N>, PolytopeError> {
    let normal = to_point(&h.normal)?;
    Ok(if h.strict {
        HalfSpace::strict(normal, h.bound)
    } else {
        HalfSpace::new(normal, h.bound)
    })
}


/// Build and apply `desc.ops` in dimension `N`.
pub fn build<const N: usize>(
    desc: &PolytopeDesc,
    allow_inexact: bool,
) -> Result<BoundedLatticePolytope<i64, N>> {
    let mut poly = match (&desc.simplex, &desc.domain) {
        (Some(pts), None) => {
            let pts = pts
                .iter()
                .map(|p| to_point::<N>(p))
                .collect::<Result<Vec<_>, _>>()?;
            let cfg = SimplexCfg {
                edge_policy: if allow_inexact {
                    EdgePolicy::SkipUnsupported
                } else {
                    EdgePolicy::Require
                },
            };
            BoundedLatticePolytope::from_simplex_with(&pts, cfg)?
        }
        (None, Some(d)) => {
            let domain = BoxDomain::new(to_point(&d.lower)?, to_point(&d.upper)?);
            let hs = desc
                .halfspaces
                .iter()
                .map(to_halfspace::<N>)
                .collect::<Result<Vec<_>, _>>()?;
            BoundedLatticePolytope::from_domain(domain, hs)?
        }
        _ => bail!("give exactly one of \"simplex\" or \"domain\""),
    };
    for (i, op) in desc.ops.iter().enumerate() {
        apply(&mut poly, op).with_context(|| format!("op #{i}"))?;
    }
    Ok(poly)
}

fn apply<const N: usize>(poly: &mut BoundedLatticePolytope<i64, N>, op: &OpDesc) -> Result<()> {
    match op {
        OpDesc::Cut(h) => {
            poly.cut_halfspace(to_halfspace(h)?)?;
        }
        OpDesc::Dilate(t) => poly.dilate(*t)?,
        OpDesc::Segment { axis, kind } => match kind {
            SegmentKindDesc::Closed => poly.try_minkowski_sum(&UnitSegment::new(*axis))?,
            SegmentKindDesc::RightStrict => {
                poly.try_minkowski_sum(&RightStrictUnitSegment::new(*axis))?
            }
            SegmentKindDesc::LeftStrict => {
                poly.try_minkowski_sum(&LeftStrictUnitSegment::new(*axis))?
            }
        },
        OpDesc::Cell { axes, kind } => {
            let axes = axes.iter().copied();
            match kind {
                SegmentKindDesc::Closed => poly.try_minkowski_sum(&UnitCell::new(axes))?,
                SegmentKindDesc::RightStrict => {
                    poly.try_minkowski_sum(&RightStrictUnitCell::new(axes))?
                }
                SegmentKindDesc::LeftStrict => {
                    poly.try_minkowski_sum(&LeftStrictUnitCell::new(axes))?
                }
            }
        }
    }
    Ok(())
}

/// A polytope in one of the dimensions the CLI supports.
#[derive(Clone, Debug)]
pub enum AnyPolytope {
    D1(BoundedLatticePolytope<i64, 1>),
    D2(BoundedLatticePolytope<i64, 2>),
    D3(BoundedLatticePolytope<i64, 3>),
    D4(BoundedLatticePolytope<i64, 4>),
}

macro_rules! dispatch {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            AnyPolytope::D1($p) => $body,
            AnyPolytope::D2($p) => $body,
            AnyPolytope::D3($p) => $body,
            AnyPolytope::D4($p) => $body,
        }
    };
}

fn window<const N: usize>(v: &[i64]) -> Result<Point<i64, N>> {
    Ok(to_point::<N>(v)?)
}

impl AnyPolytope {
    pub fn build(desc: &PolytopeDesc, allow_inexact: bool) -> Result<Self> {
        let dim = desc.dimension()?;
        Ok(match dim {
            1 => Self::D1(build(desc, allow_inexact)?),
            2 => Self::D2(build(desc, allow_inexact)?),
            3 => Self::D3(build(desc, allow_inexact)?),
            4 => Self::D4(build(desc, allow_inexact)?),
            d => bail!("dimension {d} not supported (1 to 4)"),
        })
    }

    pub fn dimension(&self) -> usize {
        dispatch!(self, p => p.domain().lower.len())
    }

    pub fn count(&self) -> u64 {
        dispatch!(self, p => p.count())
    }

    pub fn count_up_to(&self, max: u64) -> u64 {
        dispatch!(self, p => p.count_up_to(max))
    }

    pub fn count_in(&self, low: &[i64], high: &[i64]) -> Result<u64> {
        dispatch!(self, p => Ok(p.count_in(&window(low)?, &window(high)?)))
    }

    pub fn points(&self) -> Vec<Vec<i64>> {
        dispatch!(self, p => p.points().iter().map(|q| q.iter().copied().collect()).collect())
    }

    pub fn edge_constraints_complete(&self) -> bool {
        dispatch!(self, p => p.edge_constraints_complete())
    }

    pub fn row_count(&self) -> usize {
        dispatch!(self, p => p.row_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> PolytopeDesc {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn simplex_with_ops() {
        let desc = parse(
            r#"{"simplex": [[0, 0], [2, 0], [0, 2]],
                "ops": [{"dilate": 3}, {"segment": {"axis": 0}}]}"#,
        );
        assert_eq!(desc.dimension().unwrap(), 2);
        assert_eq!(
            desc.ops[1],
            OpDesc::Segment {
                axis: 0,
                kind: SegmentKindDesc::Closed
            }
        );
        let p = AnyPolytope::build(&desc, false).unwrap();
        assert_eq!(p.dimension(), 2);
        // 3x triangle has 28 points; the segment adds the 7 on x + y = 7.
        assert_eq!(p.count(), 35);
        assert_eq!(p.count_up_to(10), 10);
        assert_eq!(p.count_in(&[0, 0], &[0, 6]).unwrap(), 7);
    }

    #[test]
    fn domain_with_halfspaces_and_cut() {
        let desc = parse(
            r#"{"domain": {"lower": [0, 0], "upper": [3, 3]},
                "halfspaces": [{"normal": [1, 1], "bound": 4}],
                "ops": [{"cut": {"normal": [1, 0], "bound": 1, "strict": true}}]}"#,
        );
        let p = AnyPolytope::build(&desc, false).unwrap();
        assert_eq!(p.count(), 4);
        assert_eq!(p.points()[1], vec![0, 1]);
    }

    #[test]
    fn cells_and_strict_kinds() {
        let desc = parse(
            r#"{"simplex": [[0, 0], [2, 0], [0, 2]],
                "ops": [{"cell": {"axes": [0, 1], "kind": "right_strict"}}]}"#,
        );
        assert_eq!(AnyPolytope::build(&desc, false).unwrap().count(), 8);
    }

    #[test]
    fn four_dimensional_simplex_needs_opt_in() {
        let desc = parse(
            r#"{"simplex": [[0,0,0,0],[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]]}"#,
        );
        let err = AnyPolytope::build(&desc, false).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PolytopeError>(),
            Some(&PolytopeError::UnsupportedDimension { dimension: 4 })
        );
        let p = AnyPolytope::build(&desc, true).unwrap();
        assert!(!p.edge_constraints_complete());
        assert_eq!(p.count(), 5);
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        let mixed = parse(r#"{"simplex": [[0, 0], [1, 0, 0], [0, 1]]}"#);
        let err = AnyPolytope::build(&mixed, false).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PolytopeError>(),
            Some(&PolytopeError::DimensionMismatch {
                expected: 2,
                got: 3
            })
        );
        assert!(parse("{}").dimension().is_err());
        let bad_axis = parse(r#"{"simplex": [[0], [3]], "ops": [{"segment": {"axis": 1}}]}"#);
        let err = AnyPolytope::build(&bad_axis, false).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PolytopeError>(),
            Some(&PolytopeError::AxisOutOfRange {
                axis: 1,
                dimension: 1
            })
        );
        let five = parse(r#"{"domain": {"lower": [0,0,0,0,0], "upper": [1,1,1,1,1]}}"#);
        assert!(AnyPolytope::build(&five, false).is_err());
        let flat = parse(r#"{"simplex": [[0, 0], [1, 1], [2, 2]]}"#);
        assert!(AnyPolytope::build(&flat, false).is_err());
    }

    #[test]
    fn overflowing_ops_fail_cleanly() {
        let seg = parse(
            r#"{"domain": {"lower": [0, 0], "upper": [9223372036854775807, 0]},
                "ops": [{"segment": {"axis": 0}}]}"#,
        );
        let err = AnyPolytope::build(&seg, false).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PolytopeError>(),
            Some(&PolytopeError::Linalg(LinalgError::Overflow))
        );
        let dil = parse(
            r#"{"simplex": [[0, 0], [2, 0], [0, 2]],
                "ops": [{"dilate": 4611686018427387903}]}"#,
        );
        let err = AnyPolytope::build(&dil, false).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PolytopeError>(),
            Some(&PolytopeError::Linalg(LinalgError::Overflow))
        );
    }
}
