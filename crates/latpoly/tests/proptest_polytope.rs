//! Property-based tests for bounded lattice polytopes.
//!
//! Properties checked on random 2D and 3D simplices:
//! - membership agrees between `is_inside` and the domain-point variant
//! - counting agrees with enumeration and with capped counting
//! - repeated cuts are idempotent
//! - dilation matches the simplex of scaled vertices
//! - Minkowski sums with unit segments commute and only differ in strictness
//!   between the closed and right-strict variants
//! - 3D sums with unit cells match a brute-force convex hull of the shifted
//!   vertices

use std::collections::HashSet;

#[cfg(feature = "bigint")]
use latpoly::BigInt;
use latpoly::prelude::*;
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = i64> {
    -5i64..=5
}

fn simplex2() -> impl Strategy<Value = Vec<Point<i64, 2>>> {
    prop::collection::vec(prop::array::uniform2(coord()).prop_map(point), 3)
        .prop_filter("non-degenerate", |pts| {
            BoundedLatticePolytope::<i64, 2>::from_simplex(pts).is_ok()
        })
}

fn simplex3() -> impl Strategy<Value = Vec<Point<i64, 3>>> {
    prop::collection::vec(prop::array::uniform3(-3i64..=3).prop_map(point), 4)
        .prop_filter("non-degenerate", |pts| {
            BoundedLatticePolytope::<i64, 3>::from_simplex(pts).is_ok()
        })
}

fn build<const N: usize>(pts: &[Point<i64, N>]) -> BoundedLatticePolytope<i64, N> {
    BoundedLatticePolytope::from_simplex(pts).expect("filtered non-degenerate")
}

proptest! {
    #[test]
    fn prop_membership_agrees_on_domain(pts in simplex2()) {
        let p = build(&pts);
        for q in p.domain().points() {
            prop_assert_eq!(p.is_domain_point_inside(&q), Ok(p.is_inside(&q)));
        }
        for v in &pts {
            prop_assert!(p.is_inside(v));
        }
    }

    #[test]
    fn prop_count_matches_points(pts in simplex3(), cap in 0u64..20) {
        let p = build(&pts);
        let n = p.count();
        prop_assert_eq!(n, p.points().len() as u64);
        prop_assert_eq!(p.count_up_to(cap), n.min(cap));
        prop_assert_eq!(p.count_in(&p.domain().lower, &p.domain().upper), n);
        let mut set = HashSet::new();
        p.insert_points(&mut set);
        p.insert_points(&mut set);
        prop_assert_eq!(set.len() as u64, n);
    }

    #[test]
    fn prop_cut_twice_equals_once(
        pts in simplex2(),
        a in prop::array::uniform2(-3i64..=3).prop_filter("non-zero", |a| a != &[0, 0]),
        b in -6i64..=6,
        large in any::<bool>(),
    ) {
        let mut once = build(&pts);
        once.cut(point(a), b, large).unwrap();
        let mut twice = once.clone();
        twice.cut(point(a), b, large).unwrap();
        prop_assert_eq!(once.normals(), twice.normals());
        prop_assert_eq!(once.bounds(), twice.bounds());
        prop_assert_eq!(once.large_flags(), twice.large_flags());
        prop_assert_eq!(once.count(), twice.count());
        // Cutting never adds points.
        prop_assert!(once.count() <= build(&pts).count());
    }

    #[test]
    fn prop_dilation_matches_scaled_vertices(pts in simplex2(), t in 1i64..=4) {
        let dilated = build(&pts).dilated(t).unwrap();
        let scaled: Vec<Point<i64, 2>> = pts.iter().map(|p| p.map(|x| x * t)).collect();
        let direct = build(&scaled);
        let mut a = dilated.points();
        let mut b = direct.points();
        a.sort_by_key(|p| (p[0], p[1]));
        b.sort_by_key(|p| (p[0], p[1]));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_dilation_matches_scaled_vertices_3d(pts in simplex3(), t in 1i64..=3) {
        let dilated = build(&pts).dilated(t).unwrap();
        let scaled: Vec<Point<i64, 3>> = pts.iter().map(|p| p.map(|x| x * t)).collect();
        prop_assert_eq!(dilated.count(), build(&scaled).count());
    }

    #[test]
    fn prop_right_strict_segment_shares_bounds(pts in simplex3(), k in 0usize..3) {
        let p = build(&pts);
        let closed = &p + UnitSegment::new(k);
        let right = &p + RightStrictUnitSegment::new(k);
        prop_assert_eq!(closed.bounds(), right.bounds());
        prop_assert_eq!(closed.normals(), right.normals());
        for (i, a) in p.normals().iter().enumerate() {
            let shifted = a[k] > 0;
            prop_assert_eq!(right.large_flags()[i], p.large_flags()[i] && !shifted);
        }
        prop_assert!(right.count() <= closed.count());
        prop_assert!(p.count() <= closed.count());
    }

    #[test]
    fn prop_segment_sums_commute(pts in simplex3(), j in 0usize..3, k in 0usize..3) {
        let p = build(&pts);
        let jk = &p + UnitSegment::new(j) + LeftStrictUnitSegment::new(k);
        let kj = &p + LeftStrictUnitSegment::new(k) + UnitSegment::new(j);
        prop_assert_eq!(jk.normals(), kj.normals());
        prop_assert_eq!(jk.bounds(), kj.bounds());
        prop_assert_eq!(jk.large_flags(), kj.large_flags());
        prop_assert_eq!(jk.count(), kj.count());
    }

    #[test]
    fn prop_segment_sum_contains_both_ends(pts in simplex2(), k in 0usize..2) {
        let p = build(&pts);
        let sum = &p + UnitSegment::new(k);
        let e = latpoly::space::base::<i64, 2>(k, 1);
        for q in p.points() {
            prop_assert!(sum.is_inside(&q));
            prop_assert!(sum.is_inside(&(q + e)));
        }
    }
}

/// `x` lies in the convex hull of `verts` (3D, brute force over vertex triples).
fn in_hull3(verts: &[[i64; 3]], x: [i64; 3]) -> bool {
    let sub = |a: [i64; 3], b: [i64; 3]| [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
    let dot = |a: [i64; 3], b: [i64; 3]| a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
    let n = verts.len();
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let normal =
                    latpoly::space::cross3(&sub(verts[j], verts[i]), &sub(verts[k], verts[i]))
                        .expect("small coordinates");
                if normal == [0, 0, 0] {
                    continue;
                }
                let side = |v: [i64; 3]| dot(normal, sub(v, verts[i]));
                if verts.iter().all(|&v| side(v) <= 0) && side(x) > 0 {
                    return false;
                }
                if verts.iter().all(|&v| side(v) >= 0) && side(x) < 0 {
                    return false;
                }
            }
        }
    }
    true
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_cell_sum_matches_hull_3d(
        pts in prop::collection::vec(prop::array::uniform3(-2i64..=2).prop_map(point), 4)
            .prop_filter("non-degenerate", |pts| {
                BoundedLatticePolytope::<i64, 3>::from_simplex(pts).is_ok()
            }),
        dims in prop::sample::subsequence(vec![0usize, 1, 2], 1..=2),
    ) {
        let sum = build(&pts) + UnitCell::new(dims.iter().copied());
        let mut verts: Vec<[i64; 3]> = Vec::new();
        for mask in 0..(1u32 << dims.len()) {
            for p in &pts {
                let mut v = [p[0], p[1], p[2]];
                for (bit, &k) in dims.iter().enumerate() {
                    if mask & (1 << bit) != 0 {
                        v[k] += 1;
                    }
                }
                verts.push(v);
            }
        }
        verts.sort_unstable();
        verts.dedup();
        let lo = verts.iter().fold([i64::MAX; 3], |m, v| [m[0].min(v[0]), m[1].min(v[1]), m[2].min(v[2])]);
        let hi = verts.iter().fold([i64::MIN; 3], |m, v| [m[0].max(v[0]), m[1].max(v[1]), m[2].max(v[2])]);
        for z in lo[2]..=hi[2] {
            for y in lo[1]..=hi[1] {
                for x in lo[0]..=hi[0] {
                    let q = [x, y, z];
                    prop_assert_eq!(sum.is_inside(&point(q)), in_hull3(&verts, q), "at {:?}", q);
                }
            }
        }
        prop_assert!(sum.domain().lower.iter().zip(lo.iter()).all(|(a, b)| a >= b));
        prop_assert!(sum.domain().upper.iter().zip(hi.iter()).all(|(a, b)| a <= b));
    }
}

#[cfg(feature = "bigint")]
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_bigint_agrees_with_i64(pts in simplex3(), t in 1i64..=3, k in 0usize..3) {
        let wide: Vec<Point<BigInt, 3>> = pts.iter().map(|p| p.map(BigInt::from)).collect();
        let big = BoundedLatticePolytope::<BigInt, 3>::from_simplex(&wide).unwrap();
        let small = build(&pts);
        prop_assert_eq!(big.count(), small.count());
        let big = big.dilated(BigInt::from(t)).unwrap() + LeftStrictUnitSegment::new(k);
        let small = small.dilated(t).unwrap() + LeftStrictUnitSegment::new(k);
        prop_assert_eq!(big.count(), small.count());
    }
}

#[test]
fn overflow_surfaces_as_errors() {
    let p = build(&[point([0, 0]), point([3, 0]), point([0, 3])]);
    assert_eq!(
        p.dilated(i64::MAX),
        Err(PolytopeError::Linalg(LinalgError::Overflow))
    );
    let edge = BoundedLatticePolytope::<i64, 2>::from_domain(
        BoxDomain::new(point([i64::MAX - 3, 0]), point([i64::MAX, 1])),
        [],
    )
    .unwrap();
    assert_eq!(edge.count(), 8);
    assert_eq!(
        edge.try_minkowski_summed(&UnitCell::new([1, 0])),
        Err(PolytopeError::Linalg(LinalgError::Overflow))
    );
    let grown = edge.try_minkowski_summed(&UnitSegment::new(1)).unwrap();
    assert_eq!(grown.count(), 12);
}

#[test]
fn non_positive_dilation_and_flat_simplices_are_rejected() {
    let p = build(&[point([0, 0]), point([3, 0]), point([0, 3])]);
    for t in [0, -1, -7] {
        assert_eq!(p.dilated(t), Err(PolytopeError::NonPositiveDilation));
    }
    assert_eq!(
        BoundedLatticePolytope::<i64, 3>::from_simplex(&[
            point([0, 0, 0]),
            point([1, 0, 0]),
            point([0, 1, 0]),
            point([1, 1, 0]),
        ]),
        Err(PolytopeError::DegenerateSimplex)
    );
}
