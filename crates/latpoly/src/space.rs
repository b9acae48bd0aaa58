//! Integer points and vectors on `nalgebra` static vectors.
//!
//! Only storage and indexing come from `nalgebra`; arithmetic is spelled out
//! with `num-traits` bounds and checked operations, so fixed-width integers
//! report overflow instead of wrapping and arbitrary-precision integers plug in
//! unchanged.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use nalgebra::{SVector, Scalar};
use num_integer::Integer;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, FromPrimitive, Signed, ToPrimitive};

use crate::error::LinalgError;

/// Lattice point (and lattice vector) in `Z^N`.
pub type Point<I, const N: usize> = SVector<I, N>;

/// Exact signed integer usable as a lattice coordinate.
///
/// Implemented for every primitive signed integer and, with the `bigint`
/// feature, for `num_bigint::BigInt`. `i64` is the default used by the CLI;
/// `i128` or `BigInt` are the choices when products of coordinates get large.
pub trait LatticeInt:
    Scalar
    + Ord
    + Hash
    + fmt::Display
    + Integer
    + Signed
    + CheckedAdd
    + CheckedSub
    + CheckedMul
    + FromPrimitive
    + ToPrimitive
    + Send
    + Sync
{
}

impl<T> LatticeInt for T where
    T: Scalar
        + Ord
        + Hash
        + fmt::Display
        + Integer
        + Signed
        + CheckedAdd
        + CheckedSub
        + CheckedMul
        + FromPrimitive
        + ToPrimitive
        + Send
        + Sync
{
}

#[inline]
pub(crate) fn add<I: LatticeInt>(a: &I, b: &I) -> Result<I, LinalgError> {
    a.checked_add(b).ok_or(LinalgError::Overflow)
}

#[inline]
pub(crate) fn minus<I: LatticeInt>(a: &I, b: &I) -> Result<I, LinalgError> {
    a.checked_sub(b).ok_or(LinalgError::Overflow)
}

#[inline]
pub(crate) fn mul<I: LatticeInt>(a: &I, b: &I) -> Result<I, LinalgError> {
    a.checked_mul(b).ok_or(LinalgError::Overflow)
}

/// `-a`; fails for the most negative value of a fixed-width type.
#[inline]
pub(crate) fn negate<I: LatticeInt>(a: &I) -> Result<I, LinalgError> {
    minus(&I::zero(), a)
}

/// Build a point from its coordinates.
#[inline]
pub fn point<I: LatticeInt, const N: usize>(coords: [I; N]) -> Point<I, N> {
    Point::from_fn(|i, _| coords[i].clone())
}

/// `a · b`, or [`LinalgError::Overflow`] if any partial sum leaves `I`.
pub fn dot<I: LatticeInt, const N: usize>(
    a: &Point<I, N>,
    b: &Point<I, N>,
) -> Result<I, LinalgError> {
    a.iter()
        .zip(b.iter())
        .try_fold(I::zero(), |acc, (x, y)| add(&acc, &mul(x, y)?))
}

/// Compares `a · p` with `b` exactly.
///
/// When the dot product leaves `I` the comparison is redone in `i128`;
/// `None` means it does not fit there either.
pub fn dot_cmp<I: LatticeInt, const N: usize>(
    a: &Point<I, N>,
    p: &Point<I, N>,
    b: &I,
) -> Option<Ordering> {
    if let Ok(v) = dot(a, p) {
        return Some(v.cmp(b));
    }
    let mut acc: i128 = 0;
    for (x, y) in a.iter().zip(p.iter()) {
        acc = acc.checked_add(x.to_i128()?.checked_mul(y.to_i128()?)?)?;
    }
    Some(acc.cmp(&b.to_i128()?))
}

/// `a · p <= b`, or `a · p < b` when `large` is false.
///
/// A dot product too large to compare counts as violating the row.
#[inline]
pub fn satisfies_row<I: LatticeInt, const N: usize>(
    a: &Point<I, N>,
    p: &Point<I, N>,
    b: &I,
    large: bool,
) -> bool {
    match dot_cmp(a, p, b) {
        Some(Ordering::Less) => true,
        Some(Ordering::Equal) => large,
        _ => false,
    }
}

/// `a - b`.
pub fn sub<I: LatticeInt, const N: usize>(
    a: &Point<I, N>,
    b: &Point<I, N>,
) -> Result<Point<I, N>, LinalgError> {
    let mut out = a.clone();
    for (o, y) in out.iter_mut().zip(b.iter()) {
        *o = minus(o, y)?;
    }
    Ok(out)
}

/// Componentwise minimum.
#[inline]
pub fn inf<I: LatticeInt, const N: usize>(a: &Point<I, N>, b: &Point<I, N>) -> Point<I, N> {
    a.zip_map(b, |x, y| x.min(y))
}

/// Componentwise maximum.
#[inline]
pub fn sup<I: LatticeInt, const N: usize>(a: &Point<I, N>, b: &Point<I, N>) -> Point<I, N> {
    a.zip_map(b, |x, y| x.max(y))
}

/// `value · e_k`.
///
/// # Panics
/// Panics if `k >= N`.
#[inline]
pub fn base<I: LatticeInt, const N: usize>(k: usize, value: I) -> Point<I, N> {
    assert!(k < N, "axis {k} out of range for dimension {N}");
    Point::from_fn(|i, _| if i == k { value.clone() } else { I::zero() })
}

/// Cross product in `Z^3`.
pub fn cross3<I: LatticeInt>(a: &[I; 3], b: &[I; 3]) -> Result<[I; 3], LinalgError> {
    let term = |i: usize, j: usize| minus(&mul(&a[i], &b[j])?, &mul(&a[j], &b[i])?);
    Ok([term(1, 2)?, term(2, 0)?, term(0, 1)?])
}

/// Gcd of all entries (zero for the zero vector).
#[inline]
pub fn content<I: LatticeInt, const N: usize>(a: &Point<I, N>) -> I {
    a.iter().fold(I::zero(), |g, x| g.gcd(x))
}

/// `true` if every entry is zero.
#[inline]
pub fn is_zero<I: LatticeInt, const N: usize>(a: &Point<I, N>) -> bool {
    a.iter().all(|x| x.is_zero())
}

/// Primitive vector with the direction of `a`; `None` for the zero vector.
#[inline]
pub fn primitive<I: LatticeInt, const N: usize>(a: &Point<I, N>) -> Option<Point<I, N>> {
    let g = content(a);
    if g.is_zero() {
        return None;
    }
    Some(a.map(|x| x / g.clone()))
}

/// `Some((k, c))` when `a = c · e_k` with `c != 0`.
pub fn axis_of<I: LatticeInt, const N: usize>(a: &Point<I, N>) -> Option<(usize, I)> {
    let mut found = None;
    for (k, c) in a.iter().enumerate() {
        if c.is_zero() {
            continue;
        }
        if found.is_some() {
            return None;
        }
        found = Some((k, c.clone()));
    }
    found
}

/// Writes `(x0, x1, ...)`.
pub(crate) fn fmt_point<I: LatticeInt, const N: usize>(
    f: &mut fmt::Formatter<'_>,
    p: &Point<I, N>,
) -> fmt::Result {
    write!(f, "(")?;
    for (k, x) in p.iter().enumerate() {
        if k > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{x}")?;
    }
    write!(f, ")")
}
