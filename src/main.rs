use adscrub::prelude::*;
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Strip promoted entries from a timeline JSON response body
#[derive(Parser, Debug)]
#[command(name = "adscrub")]
#[command(about = "Filter advertising entries out of timeline JSON response bodies")]
#[command(version)]
struct Args {
    /// Response body file to read (stdin when omitted)
    input: Option<PathBuf>,

    /// Write the scrubbed body here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Filtering strategy
    #[arg(long, default_value = "remove", value_parser = ["remove", "neutralize"])]
    strategy: String,

    /// Card policy: strict treats bare card fields as ad markers outside threads
    #[arg(long, default_value = "strict", value_parser = ["strict", "lenient"])]
    cards: String,

    /// Extra ad identifier substrings, appended to the built-in pattern table
    #[arg(long = "pattern", num_args = 0..)]
    patterns: Vec<String>,

    /// Print a JSON size report to stderr
    #[arg(long)]
    stats: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let mut builder = ConfigBuilder::new()
        .strategy_str(&args.strategy)
        .card_policy_str(&args.cards);
    for pattern in &args.patterns {
        builder = builder.add_ad_pattern(pattern.clone());
    }
    let config = builder.build()?;

    let engine = ScrubEngine::new(config)?;

    let body = match &args.input {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let (out, report) = engine.scrub_with_report(&body);

    if args.stats {
        eprintln!("{}", serde_json::to_string(&report)?);
    }

    match &args.output {
        Some(path) => std::fs::write(path, &out)?,
        None => {
            io::stdout().write_all(&out)?;
        }
    }

    Ok(())
}
