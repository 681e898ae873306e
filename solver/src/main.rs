use std::fs;
use std::io::{stdin, Read};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use pipefitter::{BoardBuilder, SweepOptions};
use tracing::{info, Level};

#[derive(Parser)]
#[command(version, about = "Hint engine for rotate-the-pipes puzzles")]
struct Opts {
    /// Input file of glyph rows, `*` after a glyph pins it. Uses stdin if none specified.
    #[arg(long)]
    input_file: Option<String>,
    /// Opposite edges of the grid are adjacent.
    #[arg(long)]
    wrap: bool,
    /// Stop after this many sweeps over the grid.
    #[arg(long)]
    max_passes: Option<usize>,
    /// Printed after every row of the solved grid.
    #[arg(long, default_value = "\n")]
    delimiter: String,
    /// Log every deduction.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if opts.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let text = match &opts.input_file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("cannot read {}", path))?,
        None => {
            let mut text = String::new();
            stdin().read_to_string(&mut text)?;
            text
        }
    };

    let mut builder = BoardBuilder::from_glyphs(&text, opts.wrap);
    let mut board = builder.build().map_err(|reasons| {
        let reasons = reasons.iter().map(ToString::to_string).collect::<Vec<_>>();
        anyhow!("cannot build grid: {}", reasons.join("; "))
    })?;

    let report = board.solve_all(SweepOptions { max_passes: opts.max_passes });
    for step in &report.steps {
        println!("{}: face {}, rotate {} clockwise", step.location, step.facing, step.rotations);
    }
    println!();
    print!("{}", board.stringify(&opts.delimiter));

    if report.complete {
        info!(passes = report.passes, solved = board.is_solved(), "every cell is pinned");
    } else {
        info!(passes = report.passes, fixed = report.steps.len(), "no further progress possible right now");
    }

    Ok(())
}
