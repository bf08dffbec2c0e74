use crate::foundation::core::{Canvas, RowRange};
use crate::foundation::error::{EscapadeError, EscapadeResult};

/// Iteration counts for every pixel, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    canvas: Canvas,
    cells: Vec<u32>,
}

impl Grid {
    /// Allocate a zeroed grid.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            cells: vec![0; canvas.cell_count()],
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn get(&self, row: u32, col: u32) -> Option<u32> {
        if row >= self.canvas.height || col >= self.canvas.width {
            return None;
        }
        self.cells
            .get(row as usize * self.canvas.width as usize + col as usize)
            .copied()
    }

    /// Borrow one row.
    ///
    /// Panics if `row >= height`.
    pub fn row(&self, row: u32) -> &[u32] {
        let w = self.canvas.width as usize;
        let start = row as usize * w;
        &self.cells[start..start + w]
    }

    /// Borrow one row mutably.
    ///
    /// Panics if `row >= height`.
    pub fn row_mut(&mut self, row: u32) -> &mut [u32] {
        let w = self.canvas.width as usize;
        let start = row as usize * w;
        &mut self.cells[start..start + w]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks_exact(self.canvas.width as usize)
    }

    /// Copy out the cells of `range` as one contiguous row-major block.
    pub fn band(&self, range: RowRange) -> EscapadeResult<RowBand> {
        self.check_range(range)?;
        let w = self.canvas.width as usize;
        let cells = self.cells[range.start as usize * w..range.end as usize * w].to_vec();
        Ok(RowBand { range, cells })
    }

    /// Write a band back at its original row indices.
    pub fn put_band(&mut self, band: &RowBand) -> EscapadeResult<()> {
        self.check_range(band.range)?;
        let w = self.canvas.width as usize;
        let expected = band.range.len_rows() as usize * w;
        if band.cells.len() != expected {
            return Err(EscapadeError::validation(format!(
                "row band {} carries {} cells, expected {expected}",
                band.range,
                band.cells.len()
            )));
        }
        self.cells[band.range.start as usize * w..band.range.end as usize * w]
            .copy_from_slice(&band.cells);
        Ok(())
    }

    fn check_range(&self, range: RowRange) -> EscapadeResult<()> {
        if range.start > range.end || range.end > self.canvas.height {
            return Err(EscapadeError::validation(format!(
                "row range {range} outside grid of height {}",
                self.canvas.height
            )));
        }
        Ok(())
    }
}

/// A contiguous block of rows taken from a [`Grid`], tagged with where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowBand {
    /// Rows covered by `cells`.
    pub range: RowRange,
    /// Row-major cells, `range.len_rows() * width` values.
    pub cells: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: u32, h: u32) -> Canvas {
        Canvas::new(w, h).unwrap()
    }

    #[test]
    fn band_roundtrip_lands_at_original_rows() {
        let mut src = Grid::new(canvas(3, 4));
        for r in 0..4 {
            for (c, cell) in src.row_mut(r).iter_mut().enumerate() {
                *cell = r * 10 + c as u32;
            }
        }

        let band = src.band(RowRange::new(1, 3).unwrap()).unwrap();
        assert_eq!(band.cells, vec![10, 11, 12, 20, 21, 22]);

        let mut dst = Grid::new(canvas(3, 4));
        dst.put_band(&band).unwrap();
        assert_eq!(dst.row(0), &[0, 0, 0]);
        assert_eq!(dst.row(1), &[10, 11, 12]);
        assert_eq!(dst.row(2), &[20, 21, 22]);
        assert_eq!(dst.get(2, 2), Some(22));
        assert_eq!(dst.get(4, 0), None);
    }

    #[test]
    fn empty_band_is_allowed() {
        let g = Grid::new(canvas(2, 2));
        let band = g.band(RowRange::new(2, 2).unwrap()).unwrap();
        assert!(band.cells.is_empty());
    }

    #[test]
    fn out_of_bounds_and_missized_bands_are_rejected() {
        let mut g = Grid::new(canvas(2, 2));
        assert!(g.band(RowRange::new(1, 3).unwrap()).is_err());

        let short = RowBand {
            range: RowRange::new(0, 1).unwrap(),
            cells: vec![1],
        };
        assert!(g.put_band(&short).is_err());
    }

    #[test]
    fn rows_iterates_in_order() {
        let mut g = Grid::new(canvas(2, 3));
        g.row_mut(2).copy_from_slice(&[7, 9]);
        let rows: Vec<&[u32]> = g.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], &[7, 9]);
    }
}
