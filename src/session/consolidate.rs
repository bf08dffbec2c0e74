use crate::foundation::core::{Canvas, RowRange};
use crate::foundation::error::{EscapadeError, EscapadeResult};
use crate::fractal::grid::{Grid, RowBand};
use crate::group::WorkerGroup;
use crate::schedule::partition::partition;

/// Gather every worker's rows into one grid on the coordinator.
///
/// Each worker contributes exactly its own `rows` of `grid`. The coordinator gets the assembled
/// grid; every other worker gets `None`.
pub fn consolidate(
    group: &dyn WorkerGroup,
    grid: &Grid,
    rows: RowRange,
) -> EscapadeResult<Option<Grid>> {
    let band = grid.band(rows)?;
    let Some(bands) = group.gather_rows(band)? else {
        return Ok(None);
    };
    assemble(grid.canvas(), group.size(), bands).map(Some)
}

/// Build the full grid from bands ordered by source rank.
///
/// Rejects a band that does not match its sender's assigned range, and any row left unpopulated
/// or populated twice.
pub fn assemble(canvas: Canvas, workers: usize, bands: Vec<RowBand>) -> EscapadeResult<Grid> {
    if bands.len() != workers {
        return Err(EscapadeError::consolidation(format!(
            "expected {workers} contributions, got {}",
            bands.len()
        )));
    }

    let mut out = Grid::new(canvas);
    let mut source_of_row: Vec<Option<usize>> = vec![None; canvas.height as usize];

    for (source, band) in bands.iter().enumerate() {
        let assigned = partition(canvas.height, workers, source);
        if band.range != assigned {
            return Err(EscapadeError::consolidation(format!(
                "worker {source} contributed rows {} but owns {assigned}",
                band.range
            )));
        }
        for row in band.range.rows() {
            let slot = &mut source_of_row[row as usize];
            if let Some(first) = *slot {
                return Err(EscapadeError::consolidation(format!(
                    "row {row} contributed by both worker {first} and worker {source}"
                )));
            }
            *slot = Some(source);
        }
        out.put_band(band)
            .map_err(|e| EscapadeError::consolidation(format!("worker {source}: {e}")))?;
    }

    if let Some(row) = source_of_row.iter().position(Option::is_none) {
        return Err(EscapadeError::consolidation(format!(
            "row {row} was not contributed by any worker"
        )));
    }

    tracing::debug!(
        workers,
        rows = canvas.height,
        "consolidated grid from all workers"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(2, 4).unwrap()
    }

    fn band(start: u32, end: u32, fill: u32) -> RowBand {
        RowBand {
            range: RowRange::new(start, end).unwrap(),
            cells: vec![fill; (end - start) as usize * 2],
        }
    }

    #[test]
    fn assembles_bands_at_their_rows() {
        let g = assemble(canvas(), 2, vec![band(0, 2, 1), band(2, 4, 2)]).unwrap();
        assert_eq!(g.cells(), &[1, 1, 1, 1, 2, 2, 2, 2]);
    }

    #[test]
    fn rejects_rows_outside_the_senders_range() {
        let err = assemble(canvas(), 2, vec![band(0, 3, 1), band(2, 4, 2)]).unwrap_err();
        assert!(err.to_string().contains("worker 0 contributed rows [0, 3)"), "{err}");
    }

    #[test]
    fn rejects_missing_contributions() {
        let err = assemble(canvas(), 2, vec![band(0, 2, 1)]).unwrap_err();
        assert!(err.to_string().contains("expected 2 contributions"), "{err}");
    }

    #[test]
    fn rejects_missized_band() {
        let mut short = band(2, 4, 2);
        short.cells.pop();
        let err = assemble(canvas(), 2, vec![band(0, 2, 1), short]).unwrap_err();
        assert!(err.to_string().contains("consolidation error:"), "{err}");
    }

    #[test]
    fn empty_ranges_contribute_nothing() {
        // 4 workers over 2 rows: only the last worker owns rows.
        let c = Canvas::new(3, 2).unwrap();
        let bands = vec![
            RowBand {
                range: RowRange::new(0, 0).unwrap(),
                cells: vec![],
            },
            RowBand {
                range: RowRange::new(0, 0).unwrap(),
                cells: vec![],
            },
            RowBand {
                range: RowRange::new(0, 0).unwrap(),
                cells: vec![],
            },
            RowBand {
                range: RowRange::new(0, 2).unwrap(),
                cells: vec![5; 6],
            },
        ];
        let g = assemble(c, 4, bands).unwrap();
        assert!(g.cells().iter().all(|&v| v == 5));
    }
}
