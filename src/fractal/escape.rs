use crate::foundation::core::Coordinate;

/// Escape radius squared.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Count iterations of `z <- z^2 + c` (from `z = 0`) until the orbit escapes.
///
/// The escape test reads `|z|^2` from the values *before* the update of the same iteration, so a
/// point is reported one step after its orbit first leaves the radius. At least one iteration
/// always runs; the result is in `[1, max_iterations]` for `max_iterations >= 1`.
pub fn escape_count(c: Coordinate, max_iterations: u32) -> u32 {
    let mut x = 0.0_f64;
    let mut y = 0.0_f64;
    let mut iteration = 0u32;
    loop {
        let x2 = x * x;
        let y2 = y * y;
        y = 2.0 * x * y + c.imag;
        x = x2 - y2 + c.real;
        let magnitude_sq = x2 + y2;
        iteration += 1;
        if iteration >= max_iterations || magnitude_sq >= ESCAPE_RADIUS_SQ {
            return iteration;
        }
    }
}
