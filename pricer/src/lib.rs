//! Finds the city with the lowest total price in a `city,product,price` file, together with
//! its cheapest products.
//!
//! The file is memory-mapped, cut into large byte blocks, and parsed by a fixed pool of
//! workers that each keep a private [`Aggregator`]. The partial states are merged once all
//! blocks are done and the report is derived from the merged state.

use std::path::Path;
use std::time::Instant;

pub mod aggregator;
pub mod error;
pub mod mapper;
pub mod merge;
pub mod parser;
pub mod pool;
pub mod report;

pub use aggregator::Aggregator;
pub use error::{Error, Result};
pub use mapper::MappedFile;
pub use parser::{Cents, Cursor, Record};
pub use pool::WorkerPool;
pub use report::{Cheapest, Price};

#[derive(Debug, Clone)]
pub struct Options {
    pub workers: usize,
    pub block_size: usize,
    pub top: usize,
    pub skip_header: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            workers: pool::default_workers(),
            block_size: pool::DEFAULT_BLOCK_SIZE,
            top: report::TOP_PRODUCTS,
            skip_header: false,
        }
    }
}

/// Aggregates an in-memory region with the full parallel pipeline.
pub fn aggregate(data: &[u8], opts: &Options) -> Result<Aggregator> {
    let mut jobs = pool::split_jobs(data.len(), opts.block_size);
    if opts.skip_header {
        let mut cursor = Cursor::new(data, 0);
        cursor.skip_line();
        if let Some(first) = jobs.first_mut() {
            first.start = cursor.position().min(first.end);
        }
    }

    let pool = WorkerPool::new(opts.workers)?;
    log::info!(
        "{} bytes in {} job(s) across {} worker(s)",
        data.len(),
        jobs.len(),
        pool.workers()
    );

    let parts = pool.run(data, jobs);
    Ok(merge::merge(parts))
}

/// Maps `filename`, aggregates it and returns the rendered report.
pub fn solve<P: AsRef<Path>>(filename: P, opts: &Options) -> Result<String> {
    let started = Instant::now();
    let mapped = MappedFile::open(&filename)?;
    if mapped.is_empty() {
        log::warn!("{} is empty", filename.as_ref().display());
    }

    let global = aggregate(mapped.bytes(), opts)?;
    log::info!(
        "{} records, {} cities in {:?}",
        global.records(),
        global.city_count(),
        started.elapsed()
    );

    Ok(report::render(&global, opts.top))
}
