//! Seed candidate generator.
//!
//! Run with: `cargo run --release -- -o candidates.h`

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;

use expr_seed::levels::{EnumConfig, Enumerator};
use expr_seed::render::{RenderConfig, Renderer};
use expr_seed::vocab::Vocabulary;

#[derive(Parser)]
#[command(name = "expr-seed")]
#[command(about = "Enumerate non-redundant bit-vector expressions as synthesis seeds")]
struct Args {
    /// Write the generated code here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log per-level and per-rule statistics
    #[arg(short, long)]
    verbose: bool,

    /// Only log warnings
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let level = if args.verbose {
        simplelog::LevelFilter::Debug
    } else if args.quiet {
        simplelog::LevelFilter::Warn
    } else {
        simplelog::LevelFilter::Info
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let vocab = Vocabulary::default();
    let config = EnumConfig::default();

    let start = std::time::Instant::now();
    let index = Enumerator::new(&vocab, config).run();
    info!(
        "Enumerated {} candidates up to level {} in {:.3}ms",
        index.num_candidates(),
        config.max_level,
        start.elapsed().as_secs_f64() * 1000.0
    );
    for stats in index.stats() {
        info!(
            "  level {}: {} of {} kept",
            stats.level, stats.accepted, stats.generated
        );
    }

    let emission = Renderer::new(&vocab, RenderConfig::default()).render(&index);

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    write!(out, "{}", emission)?;
    out.flush()?;

    if let Some(path) = &args.output {
        info!("Wrote {} lines to {}", emission.lines().len(), path.display());
    }

    Ok(())
}
