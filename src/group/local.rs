use std::sync::{Barrier, Mutex, mpsc};

use crate::foundation::error::{EscapadeError, EscapadeResult};
use crate::fractal::grid::RowBand;
use crate::group::WorkerGroup;

enum Packet {
    Sum(f64),
    Rows(RowBand),
}

impl Packet {
    fn kind(&self) -> &'static str {
        match self {
            Self::Sum(_) => "reduce",
            Self::Rows(_) => "gather",
        }
    }
}

/// Point-to-point channel from one worker to the coordinator.
///
/// FIFO per sender, so a worker's reduce and gather payloads arrive in the order it entered the
/// collectives even when the coordinator is still busy with an earlier one.
struct Link {
    tx: mpsc::Sender<Packet>,
    rx: Mutex<mpsc::Receiver<Packet>>,
}

/// In-process worker group: one dedicated thread per rank.
///
/// Workers share nothing but the group's transport. Each runs on its own thread of a rayon pool
/// sized to the group, so a worker blocked at the barrier never holds up a sibling.
pub struct LocalGroup {
    size: usize,
    barrier: Barrier,
    links: Vec<Link>,
    pool: rayon::ThreadPool,
}

impl LocalGroup {
    /// Create a group of `size` workers.
    pub fn new(size: usize) -> EscapadeResult<Self> {
        if size == 0 {
            return Err(EscapadeError::validation("worker count must be >= 1"));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(size)
            .thread_name(|i| format!("escapade-worker-{i}"))
            .build()
            .map_err(|e| EscapadeError::group(format!("failed to build worker pool: {e}")))?;

        let links = (0..size)
            .map(|_| {
                let (tx, rx) = mpsc::channel();
                Link {
                    tx,
                    rx: Mutex::new(rx),
                }
            })
            .collect();

        Ok(Self {
            size,
            barrier: Barrier::new(size),
            links,
            pool,
        })
    }

    /// Run `op` once on every worker and collect the results in rank order.
    pub fn run<R, F>(&self, op: F) -> Vec<R>
    where
        R: Send,
        F: Fn(&LocalWorker<'_>) -> R + Sync,
    {
        self.pool.broadcast(|ctx| {
            let worker = LocalWorker {
                rank: ctx.index(),
                group: self,
            };
            op(&worker)
        })
    }

    fn send(&self, from: usize, packet: Packet) -> EscapadeResult<()> {
        self.links[from].tx.send(packet).map_err(|_| {
            EscapadeError::group(format!("link from worker {from} to coordinator is closed"))
        })
    }

    fn recv(&self, from: usize) -> EscapadeResult<Packet> {
        let rx = self.links[from]
            .rx
            .lock()
            .map_err(|_| EscapadeError::group(format!("link from worker {from} is poisoned")))?;
        rx.recv().map_err(|_| {
            EscapadeError::group(format!("link from worker {from} to coordinator is closed"))
        })
    }
}

/// One worker's handle onto a [`LocalGroup`].
pub struct LocalWorker<'g> {
    rank: usize,
    group: &'g LocalGroup,
}

impl WorkerGroup for LocalWorker<'_> {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.group.size
    }

    fn barrier(&self) -> EscapadeResult<()> {
        self.group.barrier.wait();
        Ok(())
    }

    fn reduce_sum(&self, value: f64) -> EscapadeResult<Option<f64>> {
        if !self.is_coordinator() {
            self.group.send(self.rank, Packet::Sum(value))?;
            return Ok(None);
        }

        // Accumulate in rank order so the float sum is reproducible.
        let mut total = value;
        for from in 1..self.group.size {
            match self.group.recv(from)? {
                Packet::Sum(v) => total += v,
                other => {
                    return Err(EscapadeError::group(format!(
                        "expected reduce payload from worker {from}, got {}",
                        other.kind()
                    )));
                }
            }
        }
        Ok(Some(total))
    }

    fn gather_rows(&self, band: RowBand) -> EscapadeResult<Option<Vec<RowBand>>> {
        if !self.is_coordinator() {
            self.group.send(self.rank, Packet::Rows(band))?;
            return Ok(None);
        }

        let mut bands = Vec::with_capacity(self.group.size);
        bands.push(band);
        for from in 1..self.group.size {
            match self.group.recv(from)? {
                Packet::Rows(b) => {
                    tracing::debug!(from, range = %b.range, "gathered rows");
                    bands.push(b);
                }
                other => {
                    return Err(EscapadeError::group(format!(
                        "expected gather payload from worker {from}, got {}",
                        other.kind()
                    )));
                }
            }
        }
        Ok(Some(bands))
    }
}
