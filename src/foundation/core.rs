use crate::foundation::error::{EscapadeError, EscapadeResult};

/// Image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels (columns).
    pub width: u32,
    /// Height in pixels (rows).
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> EscapadeResult<Self> {
        if width == 0 || height == 0 {
            return Err(EscapadeError::validation(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Number of cells in a full grid of this size.
    pub fn cell_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A sampled point of the complex plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    /// Real component.
    pub real: f64,
    /// Imaginary component.
    pub imag: f64,
}

impl Coordinate {
    pub const fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    /// Map grid position `(row, col)` onto the plane.
    ///
    /// The image spans `[-2, 2)` on both axes, centered on the origin.
    pub fn for_pixel(canvas: Canvas, row: u32, col: u32) -> Self {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        Self {
            real: (f64::from(col) - w / 2.0) * 4.0 / w,
            imag: (f64::from(row) - h / 2.0) * 4.0 / h,
        }
    }
}

/// Half-open row range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RowRange {
    /// Inclusive first row.
    pub start: u32,
    /// Exclusive end row.
    pub end: u32,
}

impl RowRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: u32, end: u32) -> EscapadeResult<Self> {
        if start > end {
            return Err(EscapadeError::validation("RowRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of rows contained in the range.
    pub fn len_rows(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Return `true` when the range has no rows.
    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// Return `true` when `row` is inside `[start, end)`.
    pub fn contains(self, row: u32) -> bool {
        self.start <= row && row < self.end
    }

    pub fn rows(self) -> std::ops::Range<u32> {
        self.start..self.end
    }
}

impl std::fmt::Display for RowRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A worker's position within its group, fixed for the worker's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerIdentity {
    /// 0-based rank. Rank 0 coordinates.
    pub rank: usize,
    /// Total number of workers in the group.
    pub size: usize,
}

impl WorkerIdentity {
    pub fn new(rank: usize, size: usize) -> EscapadeResult<Self> {
        if size == 0 {
            return Err(EscapadeError::validation("worker count must be >= 1"));
        }
        if rank >= size {
            return Err(EscapadeError::validation(format!(
                "worker rank {rank} out of range for group of {size}"
            )));
        }
        Ok(Self { rank, size })
    }

    /// Return `true` for the rank that receives reductions and gathers.
    pub fn is_coordinator(self) -> bool {
        self.rank == crate::group::COORDINATOR
    }
}
