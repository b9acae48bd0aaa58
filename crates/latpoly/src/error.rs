//! Error types for polytope construction and exact linear algebra.
//!
//! Every precondition the engine checks surfaces here as a value; nothing in
//! the library recovers silently from a bad input.

use thiserror::Error;

/// Failures of the exact integer matrix routines in [`crate::linalg`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LinalgError {
    /// Determinant is zero.
    #[error("matrix is singular")]
    Singular,
    /// Operation requires a square matrix.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    /// An intermediate product left the range of the integer type.
    #[error("integer overflow in exact arithmetic")]
    Overflow,
}

/// Failures of polytope construction and modification.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PolytopeError {
    /// The polytope was default-constructed and never initialized.
    #[error("polytope is not initialized")]
    NotInitialized,
    /// A simplex needs exactly `dimension + 1` points.
    #[error("simplex needs {expected} points, got {got}")]
    WrongPointCount { expected: usize, got: usize },
    /// Simplex points are affinely dependent.
    #[error("simplex points are affinely dependent")]
    DegenerateSimplex,
    /// Edge constraints are not derived in this dimension.
    #[error("edge constraints are not available in dimension {dimension}")]
    UnsupportedDimension { dimension: usize },
    /// Dilation factor must be a positive integer.
    #[error("dilation factor must be positive")]
    NonPositiveDilation,
    /// Point lies outside the bounding domain.
    #[error("point lies outside the polytope domain")]
    PointOutsideDomain,
    /// Half-space normal is the zero vector.
    #[error("half-space normal is zero")]
    ZeroNormal,
    /// Bounding domain contains no lattice point.
    #[error("bounding domain is empty")]
    EmptyDomain,
    /// Minkowski summand names an axis outside `0..dimension`.
    #[error("axis {axis} out of range for dimension {dimension}")]
    AxisOutOfRange { axis: usize, dimension: usize },
    /// Coordinate list does not match the ambient dimension.
    #[error("expected {expected} coordinates, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}
