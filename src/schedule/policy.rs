use crate::foundation::core::{Coordinate, RowRange};
use crate::foundation::error::EscapadeResult;
use crate::fractal::escape::escape_count;
use crate::fractal::grid::Grid;
use crate::group::WorkerGroup;
use crate::schedule::partition::max_rows;

/// How a worker walks its assigned rows.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentPolicy {
    /// Compute the whole block with no synchronization.
    #[default]
    Static,
    /// Rendezvous with every other worker after each row.
    Dynamic,
}

impl AssignmentPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }
}

impl std::fmt::Display for AssignmentPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fill one row of `grid` with escape counts.
pub fn render_row(grid: &mut Grid, row: u32, max_iterations: u32) {
    let canvas = grid.canvas();
    for (col, cell) in grid.row_mut(row).iter_mut().enumerate() {
        *cell = escape_count(Coordinate::for_pixel(canvas, row, col as u32), max_iterations);
    }
}

/// Run one full pass of `policy` over `rows`.
///
/// Under [`AssignmentPolicy::Dynamic`] every worker enters exactly
/// [`max_rows`]`(height, size)` barriers per pass. Workers with shorter ranges keep arriving at
/// the barrier after their last row until the longest range is done, otherwise uneven
/// partitions would leave the group waiting on a barrier nobody else reaches.
pub fn run_pass(
    policy: AssignmentPolicy,
    group: &dyn WorkerGroup,
    grid: &mut Grid,
    rows: RowRange,
    max_iterations: u32,
) -> EscapadeResult<()> {
    match policy {
        AssignmentPolicy::Static => {
            for row in rows.rows() {
                render_row(grid, row, max_iterations);
            }
        }
        AssignmentPolicy::Dynamic => {
            let rounds = max_rows(grid.height(), group.size());
            for round in 0..rounds {
                if round < rows.len_rows() {
                    render_row(grid, rows.start + round, max_iterations);
                }
                group.barrier()?;
            }
        }
    }
    Ok(())
}
