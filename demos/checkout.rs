//! Linear Checkout Demo
//!
//! Scans a string of item labels through the linear pricing engine and
//! renders the receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-i` to choose the labels scanned
//! Use `-w` for weighed scans, e.g. `-w F=2.5`

use std::io;

use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;

use tally::prelude::*;

/// Arguments for the linear checkout demo
#[derive(Debug, Parser)]
struct Args {
    /// Item labels to scan, one character each
    #[clap(short, long, default_value = "ABCBBCCC")]
    items: String,

    /// Fixture set holding the strategy catalogue
    #[clap(short, long, default_value = "standard")]
    fixture: String,

    /// Weighed scans as LABEL=QUANTITY
    #[clap(short, long, value_parser = parse_weighed)]
    weighed: Vec<(char, Decimal)>,
}

/// Parse a `LABEL=QUANTITY` pair such as `F=2.5`.
fn parse_weighed(raw: &str) -> Result<(char, Decimal), String> {
    let Some((label, quantity)) = raw.split_once('=') else {
        return Err(format!("expected LABEL=QUANTITY, got {raw}"));
    };

    let mut chars = label.chars();
    let (Some(label), None) = (chars.next(), chars.next()) else {
        return Err("label must be a single character".to_owned());
    };

    let quantity = quantity
        .parse::<Decimal>()
        .map_err(|err| err.to_string())?;

    Ok((label, quantity))
}

/// Linear Checkout Demo
#[expect(clippy::print_stdout, reason = "Example code")]
fn main() -> Result<()> {
    let args = Args::parse();
    let fixture = Fixture::from_set(&args.fixture)?;

    let mut checkout = fixture.checkout();

    for label in args.items.chars() {
        checkout.scan(label);
    }

    for &(label, quantity) in &args.weighed {
        checkout.scan_quantity(label, quantity);
    }

    let lines = checkout.lines()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Receipt::from_lines(&lines).write_to(&mut handle)?;

    println!("Total: {}", checkout.total()?);

    Ok(())
}
