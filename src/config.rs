use std::path::{Path, PathBuf};

use crate::foundation::core::Canvas;
use crate::foundation::error::{EscapadeError, EscapadeResult};
use crate::schedule::policy::AssignmentPolicy;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
pub const DEFAULT_MAX_ITERATIONS: u32 = 255;
pub const DEFAULT_TRIALS: u32 = 10;
pub const DEFAULT_OUT: &str = "mandelbrot.pgm";
/// Upper bound on group size; every worker gets its own OS thread.
pub const MAX_WORKERS: usize = 1024;

/// Everything a run needs to know, fixed before any worker starts.
///
/// Missing JSON fields fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Iteration cap for the escape test.
    pub max_iterations: u32,
    /// Timed repetitions of the full pass.
    pub trials: u32,
    /// Row assignment policy.
    pub policy: AssignmentPolicy,
    /// Graymap output path, written by the coordinator only.
    pub out: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            trials: DEFAULT_TRIALS,
            policy: AssignmentPolicy::Static,
            out: PathBuf::from(DEFAULT_OUT),
        }
    }
}

impl RenderConfig {
    /// Load a config from a JSON file.
    pub fn from_json_file(path: &Path) -> EscapadeResult<Self> {
        let f = std::fs::File::open(path)?;
        let cfg: Self = serde_json::from_reader(std::io::BufReader::new(f))
            .map_err(|e| EscapadeError::serde(format!("{}: {e}", path.display())))?;
        Ok(cfg)
    }

    pub fn canvas(&self) -> EscapadeResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    pub fn validate(&self) -> EscapadeResult<()> {
        self.canvas()?;
        if self.max_iterations == 0 {
            return Err(EscapadeError::validation("max_iterations must be >= 1"));
        }
        if self.trials == 0 {
            return Err(EscapadeError::validation("trials must be >= 1"));
        }
        if self.out.as_os_str().is_empty() {
            return Err(EscapadeError::validation("output path must not be empty"));
        }
        Ok(())
    }

    /// Check that `workers` can share this image.
    pub fn validate_workers(&self, workers: usize) -> EscapadeResult<()> {
        if workers == 0 {
            return Err(EscapadeError::validation("worker count must be >= 1"));
        }
        if workers > MAX_WORKERS {
            return Err(EscapadeError::validation(format!(
                "worker count {workers} exceeds the maximum of {MAX_WORKERS}"
            )));
        }
        Ok(())
    }
}
