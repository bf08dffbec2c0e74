use sha2::Digest as _;

use crate::fractal::grid::Grid;

/// SHA-256 over the grid dimensions and cells (little-endian), as lowercase hex.
///
/// Two runs with the same configuration produce the same digest regardless of worker count or
/// policy.
pub fn grid_digest(grid: &Grid) -> String {
    let mut hasher = sha2::Sha256::new();
    hasher.update(grid.width().to_le_bytes());
    hasher.update(grid.height().to_le_bytes());
    for &cell in grid.cells() {
        hasher.update(cell.to_le_bytes());
    }
    hex(&hasher.finalize())
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Canvas;

    #[test]
    fn digest_is_stable_and_sensitive() {
        let mut g = Grid::new(Canvas::new(3, 2).unwrap());
        let a = grid_digest(&g);
        assert_eq!(a.len(), 64);
        assert_eq!(a, grid_digest(&g.clone()));

        g.row_mut(1)[2] = 1;
        assert_ne!(a, grid_digest(&g));
    }

    #[test]
    fn digest_includes_dimensions() {
        let wide = Grid::new(Canvas::new(4, 1).unwrap());
        let tall = Grid::new(Canvas::new(1, 4).unwrap());
        assert_ne!(grid_digest(&wide), grid_digest(&tall));
    }
}
