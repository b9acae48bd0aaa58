//! Lattice-point counts of a 3D simplex under dilation and unit-cell sums.
//!
//! Run: `cargo run -p latpoly --example simplex_counts`

use latpoly::prelude::*;

fn main() -> Result<(), PolytopeError> {
    let tet = BoundedLatticePolytope::<i64, 3>::from_simplex(&[
        point([0, 0, 0]),
        point([3, 1, 0]),
        point([1, 3, 1]),
        point([0, 1, 3]),
    ])?;
    print!("{tet}");
    for t in 1..=4 {
        let p = tet.dilated(t)?;
        let grown = &p + UnitCell::new([0, 1, 2]);
        println!(
            "t={t}: {} points, {} after + unit cube, domain {}",
            p.count(),
            grown.count(),
            grown.domain()
        );
    }
    Ok(())
}
