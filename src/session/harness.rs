use std::time::{Duration, Instant};

use crate::config::RenderConfig;
use crate::foundation::core::RowRange;
use crate::foundation::error::EscapadeResult;
use crate::fractal::grid::Grid;
use crate::group::WorkerGroup;
use crate::schedule::policy::run_pass;

/// Elapsed time of each trial on one worker.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrialTimings {
    samples: Vec<Duration>,
}

impl TrialTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(trials: usize) -> Self {
        Self {
            samples: Vec::with_capacity(trials),
        }
    }

    pub fn push(&mut self, elapsed: Duration) {
        self.samples.push(elapsed);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn total(&self) -> Duration {
        self.samples.iter().sum()
    }

    /// Mean trial duration in seconds, 0 when no trial ran.
    pub fn mean_secs(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.total().as_secs_f64() / self.samples.len() as f64
    }
}

/// Timing result of one worker after the reduction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingSummary {
    /// Trials run per worker.
    pub trials: u32,
    /// Workers in the group.
    pub workers: usize,
    /// This worker's mean trial time in seconds.
    pub local_mean_secs: f64,
    /// Mean time per worker per trial in seconds; only set on the coordinator.
    pub global_avg_secs: Option<f64>,
}

impl TimingSummary {
    pub fn global_avg_ms(&self) -> Option<f64> {
        self.global_avg_secs.map(|s| s * 1000.0)
    }
}

/// Run `cfg.trials` timed passes of the configured policy over `rows`.
///
/// Each trial starts at a group-wide barrier. On return `grid` holds the last trial's values for
/// `rows` and the timings have been reduced onto the coordinator.
pub fn run_trials(
    group: &dyn WorkerGroup,
    cfg: &RenderConfig,
    grid: &mut Grid,
    rows: RowRange,
) -> EscapadeResult<TimingSummary> {
    let rank = group.rank();
    let mut timings = TrialTimings::with_capacity(cfg.trials as usize);

    for trial in 0..cfg.trials {
        group.barrier()?;
        let start = Instant::now();
        run_pass(cfg.policy, group, grid, rows, cfg.max_iterations)?;
        let elapsed = start.elapsed();

        tracing::info!(
            worker = rank,
            trial,
            secs = elapsed.as_secs_f64(),
            "execution time of trial [{trial}] on worker {rank}: {:.6} seconds",
            elapsed.as_secs_f64()
        );
        timings.push(elapsed);
    }

    let global_avg_secs = reduce_timings(group, &timings)?;
    if let Some(avg) = global_avg_secs {
        tracing::debug!(
            workers = group.size(),
            trials = cfg.trials,
            avg_ms = avg * 1000.0,
            policy = %cfg.policy,
            "timings reduced"
        );
    }

    Ok(TimingSummary {
        trials: cfg.trials,
        workers: group.size(),
        local_mean_secs: timings.mean_secs(),
        global_avg_secs,
    })
}

/// Combine every worker's timings into the mean time per worker per trial.
///
/// Each worker contributes its trial total (its mean times the trial count); the coordinator
/// divides the group sum by `trials * workers`. All workers must have run the same number of
/// trials. Returns `Some` on the coordinator only.
pub fn reduce_timings(
    group: &dyn WorkerGroup,
    timings: &TrialTimings,
) -> EscapadeResult<Option<f64>> {
    let total = group.reduce_sum(timings.total().as_secs_f64())?;
    let samples = (timings.len() * group.size()) as f64;
    Ok(total.map(|sum| if samples > 0.0 { sum / samples } else { 0.0 }))
}
