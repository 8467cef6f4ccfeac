use std::num::NonZeroUsize;
use std::ops::Range;

use crossbeam_channel::{Receiver, unbounded};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::aggregator::Aggregator;
use crate::error::Result;

pub const DEFAULT_BLOCK_SIZE: usize = 100 * 1024 * 1024;

/// Hardware parallelism, or 1 when it cannot be detected.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Cuts `0..len` into contiguous blocks of `block_size` bytes. The last block takes the
/// remainder, so a region smaller than one block is a single job.
pub fn split_jobs(len: usize, block_size: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let block_size = block_size.max(1);
    let count = (len / block_size).max(1);

    (0..count)
        .map(|i| {
            let start = i * block_size;
            let end = if i + 1 == count { len } else { start + block_size };
            start..end
        })
        .collect()
}

/// Fixed set of long-lived workers, each owning one private [`Aggregator`].
pub struct WorkerPool {
    pool: ThreadPool,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("pricer-worker-{i}"))
            .build()?;
        Ok(Self { pool })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs every job against `data` and hands back one aggregator per worker.
    ///
    /// Jobs are queued up front and the sender is dropped, so a worker leaves its loop once the
    /// queue is drained. The call blocks until every worker has left.
    pub fn run(&self, data: &[u8], jobs: Vec<Range<usize>>) -> Vec<Aggregator> {
        let (tx, rx) = unbounded();
        for job in jobs {
            // rx is alive for the whole call, the send cannot fail.
            let _ = tx.send(job);
        }
        drop(tx);

        self.pool.broadcast(|ctx| work(ctx.index(), data, &rx))
    }
}

fn work(worker: usize, data: &[u8], jobs: &Receiver<Range<usize>>) -> Aggregator {
    let mut agg = Aggregator::new();
    while let Ok(job) = jobs.recv() {
        let n = agg.consume(data, job.clone());
        log::debug!("worker {worker}: {n} records in {}..{}", job.start, job.end);
    }
    agg
}
