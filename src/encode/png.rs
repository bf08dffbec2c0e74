use std::path::Path;

use crate::foundation::error::{EscapadeError, EscapadeResult};
use crate::fractal::grid::Grid;

/// Scale iteration counts in `[0, max_iterations]` to 8-bit gray.
pub fn to_gray8(grid: &Grid, max_iterations: u32) -> Vec<u8> {
    let max = u64::from(max_iterations.max(1));
    grid.cells()
        .iter()
        .map(|&v| ((u64::from(v.min(max_iterations)) * 255 + max / 2) / max) as u8)
        .collect()
}

/// Write an 8-bit grayscale PNG preview of `grid`.
pub fn write_png_preview(path: &Path, grid: &Grid, max_iterations: u32) -> EscapadeResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let gray = to_gray8(grid, max_iterations);
    image::save_buffer_with_format(
        path,
        &gray,
        grid.width(),
        grid.height(),
        image::ColorType::L8,
        image::ImageFormat::Png,
    )
    .map_err(|e| EscapadeError::Other(anyhow::anyhow!("write png '{}': {e}", path.display())))
}
