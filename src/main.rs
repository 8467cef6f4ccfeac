use std::fs::File;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use pricer::{Options, pool, report};

/// Exit status for an input that cannot be opened, stat'ed or mapped.
const EXIT_MAPPING: u8 = 255;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "input.txt")]
    input: String,

    #[arg(long, default_value = "output.txt")]
    output: String,

    /// Worker threads; 0 means one per available core.
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// Bytes per parsing job.
    #[arg(long, default_value_t = pool::DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Products listed for the winning city.
    #[arg(long, default_value_t = report::TOP_PRODUCTS)]
    top: usize,

    #[arg(long)]
    skip_header: bool,

    #[arg(long, default_value = "")]
    cpuprofile: String,
}

fn run(args: &Args) -> Result<()> {
    if args.input.is_empty() {
        bail!("input param is missing");
    }

    let opts = Options {
        workers: if args.workers == 0 {
            pool::default_workers()
        } else {
            args.workers
        },
        block_size: args.block_size,
        top: args.top,
        skip_header: args.skip_header,
    };

    let profiler = if args.cpuprofile.is_empty() {
        None
    } else {
        Some(pprof::ProfilerGuard::new(1000).context("starting cpu profiler")?)
    };

    let text = pricer::solve(&args.input, &opts)?;
    report::write_report(&args.output, &text)?;

    if let Some(guard) = profiler {
        let profile = guard.report().build().context("building cpu profile")?;
        let file = File::create(&args.cpuprofile)
            .with_context(|| format!("creating {}", args.cpuprofile))?;
        profile.flamegraph(file).context("writing flamegraph")?;
        log::info!("cpu profile written to {}", args.cpuprofile);
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            let mapping = e
                .downcast_ref::<pricer::Error>()
                .is_some_and(pricer::Error::is_mapping);
            if mapping {
                ExitCode::from(EXIT_MAPPING)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
