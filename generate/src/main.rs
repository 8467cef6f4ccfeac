//! Writes a synthetic `city,product,price` dataset.

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value_t = 1_000_000)]
    lines: u64,

    #[arg(long, default_value_t = 100)]
    cities: usize,

    #[arg(long, default_value_t = 100)]
    products: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value = "input.txt")]
    output: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.cities == 0 || args.products == 0 {
        bail!("need at least one city and one product");
    }

    let mut rng = StdRng::seed_from_u64(args.seed);

    // Each product gets its own base price; a line's price scatters around it.
    let base: Vec<f64> = (0..args.products)
        .map(|_| rng.random_range(1.0..100.0))
        .collect();

    let file = File::create(&args.output).with_context(|| format!("creating {}", args.output))?;
    let mut out = BufWriter::with_capacity(1 << 20, file);

    for _ in 0..args.lines {
        let city = rng.random_range(0..args.cities);
        let product = rng.random_range(0..args.products);
        let spread = Normal::new(base[product], base[product] / 5.0)?;
        let cents = (spread.sample(&mut rng).max(0.01) * 100.0).round() as u64;

        write!(out, "city_{city},product_{product},")?;
        match rng.random_range(0..3) {
            0 if cents % 100 == 0 => writeln!(out, "{}", cents / 100)?,
            1 if cents % 10 == 0 => writeln!(out, "{}.{}", cents / 100, (cents % 100) / 10)?,
            _ => writeln!(out, "{}.{:02}", cents / 100, cents % 100)?,
        }
    }

    out.flush()?;
    Ok(())
}
