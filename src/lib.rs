//! Escapade renders an escape-time fractal by splitting its rows across a group of workers and
//! benchmarks two row-assignment policies against each other.
//!
//! - [`partition`] hands each rank a contiguous block of rows.
//! - [`run_trials`] times repeated passes of an [`AssignmentPolicy`] and reduces the timings.
//! - [`consolidate`] gathers every worker's rows into one [`Grid`] on the coordinator.
//! - [`render_local`] runs the whole thing on an in-process [`LocalGroup`].
//!
//! Collectives go through the [`WorkerGroup`] trait, so any transport that provides barrier,
//! reduce-sum and gather can host the workers.
#![forbid(unsafe_code)]

mod encode;
mod foundation;
mod fractal;
mod group;
mod schedule;
mod session;

pub mod config;
pub mod fingerprint;

pub use crate::config::RenderConfig;
pub use crate::encode::pgm::{PGM_MAXVAL, write_pgm, write_pgm_file};
pub use crate::encode::png::{to_gray8, write_png_preview};
pub use crate::fingerprint::grid_digest;
pub use crate::foundation::core::{Canvas, Coordinate, RowRange, WorkerIdentity};
pub use crate::foundation::error::{EscapadeError, EscapadeResult};
pub use crate::fractal::escape::{ESCAPE_RADIUS_SQ, escape_count};
pub use crate::fractal::grid::{Grid, RowBand};
pub use crate::group::local::{LocalGroup, LocalWorker};
pub use crate::group::{COORDINATOR, WorkerGroup};
pub use crate::schedule::partition::{all_ranges, max_rows, partition, rows_for};
pub use crate::schedule::policy::{AssignmentPolicy, render_row, run_pass};
pub use crate::session::consolidate::{assemble, consolidate};
pub use crate::session::harness::{TimingSummary, TrialTimings, reduce_timings, run_trials};
pub use crate::session::run::{RunReport, RunSummary, WorkerOutcome, render_local, run_worker};
