//! Collective operations over a fixed set of workers.
//!
//! Everything above this seam (policies, timing harness, consolidation) talks to a
//! [`WorkerGroup`] and never to a concrete transport.

use crate::foundation::core::WorkerIdentity;
use crate::foundation::error::EscapadeResult;
use crate::fractal::grid::RowBand;

pub(crate) mod local;

/// Rank of the worker that receives reductions and gathers.
pub const COORDINATOR: usize = 0;

/// Minimal capability set a worker needs from its group.
///
/// All collectives are blocking and must be entered by every worker in the same order.
/// There is no timeout: a worker that never arrives stalls the group.
pub trait WorkerGroup {
    /// This worker's 0-based rank.
    fn rank(&self) -> usize;

    /// Number of workers in the group.
    fn size(&self) -> usize;

    /// Block until every worker has reached this barrier.
    fn barrier(&self) -> EscapadeResult<()>;

    /// Sum `value` across all workers.
    ///
    /// Returns `Some(total)` on the coordinator and `None` elsewhere.
    fn reduce_sum(&self, value: f64) -> EscapadeResult<Option<f64>>;

    /// Send this worker's rows to the coordinator.
    ///
    /// The coordinator receives every worker's band (its own included) ordered by source rank;
    /// other workers receive `None`. The group moves bands as-is; checking that a band matches
    /// its sender's assignment is the caller's job.
    fn gather_rows(&self, band: RowBand) -> EscapadeResult<Option<Vec<RowBand>>>;

    fn identity(&self) -> WorkerIdentity {
        WorkerIdentity {
            rank: self.rank(),
            size: self.size(),
        }
    }

    fn is_coordinator(&self) -> bool {
        self.identity().is_coordinator()
    }
}
