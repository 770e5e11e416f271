//! Bundle Search Demo
//!
//! Prices a basket incrementally, one scanned label at a time, printing the
//! running optimum and the bundle sequence behind it, then renders the final
//! receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-i` to choose the labels scanned, in order
//! Use `-b` to cap the number of search nodes expanded

use std::io;

use anyhow::Result;
use clap::Parser;

use tally::prelude::*;

/// Arguments for the bundle search demo
#[derive(Debug, Parser)]
struct Args {
    /// Item labels to scan, in order
    #[clap(short, long, default_value = "AAAAAAAAAA")]
    items: String,

    /// Fixture set holding the bundle rules
    #[clap(short, long, default_value = "kata")]
    fixture: String,

    /// Cap on expanded search nodes
    #[clap(short, long)]
    budget: Option<usize>,
}

/// Bundle Search Demo
#[expect(clippy::print_stdout, reason = "Example code")]
fn main() -> Result<()> {
    let args = Args::parse();
    let fixture = Fixture::from_set(&args.fixture)?;

    let mut pricer = BundlePricer::new(fixture.rules());
    if let Some(budget) = args.budget {
        pricer = pricer.with_node_budget(budget);
    }

    let mut basket = Basket::new();
    let mut last_result = None;

    for label in args.items.chars() {
        basket.add(label);

        let result = pricer.best_price(&basket)?;
        println!(
            "{basket}: {} via {}",
            result.total,
            result.applications.join(" + ")
        );

        last_result = Some(result);
    }

    if let Some(result) = last_result {
        let stdout = io::stdout();
        let mut handle = stdout.lock();

        Receipt::from_search(&result, fixture.rules())?.write_to(&mut handle)?;
    }

    Ok(())
}
