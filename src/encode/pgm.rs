use std::io::Write;
use std::path::Path;

use crate::foundation::error::EscapadeResult;
use crate::fractal::grid::Grid;

/// Declared maximum gray value in the header.
pub const PGM_MAXVAL: u32 = 255;

/// Write `grid` as a plain (ASCII, `P2`) graymap.
///
/// One text line per grid row, each value followed by a single space. The header always
/// declares a max value of 255; cells are written as-is.
pub fn write_pgm<W: Write>(mut w: W, grid: &Grid) -> EscapadeResult<()> {
    writeln!(w, "P2")?;
    writeln!(w, "{} {}", grid.width(), grid.height())?;
    writeln!(w, "{PGM_MAXVAL}")?;
    for row in grid.rows() {
        for v in row {
            write!(w, "{v} ")?;
        }
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}

/// Write `grid` to `path`, creating parent directories as needed.
pub fn write_pgm_file(path: &Path, grid: &Grid) -> EscapadeResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let f = std::fs::File::create(path)?;
    write_pgm(std::io::BufWriter::new(f), grid)
}
