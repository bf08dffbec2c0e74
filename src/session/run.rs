use std::path::Path;

use crate::config::RenderConfig;
use crate::encode::pgm::write_pgm_file;
use crate::encode::png::write_png_preview;
use crate::fingerprint::grid_digest;
use crate::foundation::core::{RowRange, WorkerIdentity};
use crate::foundation::error::{EscapadeError, EscapadeResult};
use crate::fractal::grid::Grid;
use crate::group::WorkerGroup;
use crate::group::local::LocalGroup;
use crate::schedule::partition::rows_for;
use crate::session::consolidate::consolidate;
use crate::session::harness::{TimingSummary, run_trials};

/// What one worker ends up with after a run.
#[derive(Clone, Debug)]
pub struct WorkerOutcome {
    pub identity: WorkerIdentity,
    pub rows: RowRange,
    pub timing: TimingSummary,
    /// The consolidated grid; `Some` on the coordinator only.
    pub grid: Option<Grid>,
}

/// Drive one worker through the whole run: time the trials, then consolidate.
///
/// Every worker in the group must call this with the same `cfg`.
#[tracing::instrument(skip(group, cfg), fields(rank = group.rank(), size = group.size()))]
pub fn run_worker(group: &dyn WorkerGroup, cfg: &RenderConfig) -> EscapadeResult<WorkerOutcome> {
    let canvas = cfg.canvas()?;
    let rows = rows_for(canvas.height, group.identity());
    tracing::debug!(%rows, "assigned rows");

    let mut grid = Grid::new(canvas);
    let timing = run_trials(group, cfg, &mut grid, rows)?;
    let grid = consolidate(group, &grid, rows)?;

    Ok(WorkerOutcome {
        identity: group.identity(),
        rows,
        timing,
        grid,
    })
}

/// Coordinator's view of a finished run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub config: RenderConfig,
    pub workers: usize,
    /// Mean time per worker per trial, in seconds.
    pub global_avg_secs: f64,
    /// Rows owned by each rank.
    pub ranges: Vec<RowRange>,
    pub grid: Grid,
}

impl RunReport {
    pub fn global_avg_ms(&self) -> f64 {
        self.global_avg_secs * 1000.0
    }

    pub fn digest(&self) -> String {
        grid_digest(&self.grid)
    }

    /// Write the graymap to `config.out`.
    pub fn write_pgm(&self) -> EscapadeResult<()> {
        write_pgm_file(&self.config.out, &self.grid)
    }

    pub fn write_png(&self, path: &Path) -> EscapadeResult<()> {
        write_png_preview(path, &self.grid, self.config.max_iterations)
    }

    /// Serializable summary for machine consumption.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            width: self.config.width,
            height: self.config.height,
            max_iterations: self.config.max_iterations,
            trials: self.config.trials,
            policy: self.config.policy.to_string(),
            workers: self.workers,
            global_avg_ms: self.global_avg_ms(),
            ranges: self.ranges.clone(),
            out: self.config.out.display().to_string(),
            sha256: self.digest(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunSummary {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub trials: u32,
    pub policy: String,
    pub workers: usize,
    pub global_avg_ms: f64,
    pub ranges: Vec<RowRange>,
    pub out: String,
    pub sha256: String,
}

/// Run the whole benchmark on an in-process group of `workers`.
///
/// Nothing is written to disk; see [`RunReport::write_pgm`].
pub fn render_local(cfg: &RenderConfig, workers: usize) -> EscapadeResult<RunReport> {
    cfg.validate()?;
    cfg.validate_workers(workers)?;

    let group = LocalGroup::new(workers)?;
    tracing::info!(
        workers,
        policy = %cfg.policy,
        width = cfg.width,
        height = cfg.height,
        trials = cfg.trials,
        "starting run"
    );
    let outcomes = group.run(|w| run_worker(w, cfg));

    let mut coordinator = None;
    let mut ranges = Vec::with_capacity(workers);
    for outcome in outcomes {
        let outcome = outcome?;
        ranges.push(outcome.rows);
        if outcome.identity.is_coordinator() {
            coordinator = Some(outcome);
        }
    }

    let coordinator =
        coordinator.ok_or_else(|| EscapadeError::group("coordinator produced no outcome"))?;
    let grid = coordinator
        .grid
        .ok_or_else(|| EscapadeError::consolidation("coordinator holds no consolidated grid"))?;
    let global_avg_secs = coordinator
        .timing
        .global_avg_secs
        .ok_or_else(|| EscapadeError::group("coordinator holds no reduced timing"))?;

    Ok(RunReport {
        config: cfg.clone(),
        workers,
        global_avg_secs,
        ranges,
        grid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::policy::AssignmentPolicy;

    fn small(policy: AssignmentPolicy) -> RenderConfig {
        RenderConfig {
            width: 4,
            height: 4,
            max_iterations: 32,
            trials: 2,
            policy,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn four_by_four_over_two_workers_fills_every_cell() {
        let report = render_local(&small(AssignmentPolicy::Static), 2).unwrap();
        assert_eq!(
            report.ranges,
            vec![RowRange::new(0, 2).unwrap(), RowRange::new(2, 4).unwrap()]
        );
        assert_eq!(report.grid.cells().len(), 16);
        assert!(report.grid.cells().iter().all(|&v| v >= 1));
        assert!(report.global_avg_secs >= 0.0);
    }

    #[test]
    fn invalid_config_is_rejected_before_launch() {
        let cfg = RenderConfig {
            trials: 0,
            ..small(AssignmentPolicy::Static)
        };
        assert!(render_local(&cfg, 2).is_err());
        assert!(render_local(&small(AssignmentPolicy::Static), 0).is_err());
    }

    #[test]
    fn only_the_coordinator_keeps_a_grid() {
        let cfg = small(AssignmentPolicy::Dynamic);
        let group = LocalGroup::new(3).unwrap();
        let outcomes = group.run(|w| run_worker(w, &cfg).unwrap());
        assert!(outcomes[0].grid.is_some());
        assert!(outcomes[1].grid.is_none());
        assert!(outcomes[2].grid.is_none());
        assert_eq!(outcomes[2].rows, RowRange::new(2, 4).unwrap());
    }

    #[test]
    fn summary_serializes() {
        let report = render_local(&small(AssignmentPolicy::Dynamic), 3).unwrap();
        let summary = report.summary();
        assert_eq!(summary.policy, "dynamic");
        assert_eq!(summary.workers, 3);
        let json = serde_json::to_string(&summary).unwrap();
        let back: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sha256, summary.sha256);
    }
}
