//! campus-nav — print walking directions between two places on campus.
//!
//! Graph resources are read from a directory (`data/` by default) holding
//! one `<BUILDING>_graph.txt` per building plus the outdoor graph.
//!
//! ```text
//! campus-nav "GSD 101" "STE 110"
//! campus-nav --accessible --language fr "GSD 101" "GSD 201"
//! RUST_LOG=debug campus-nav GSD STE
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cg_core::NavConfig;
use cg_directions::{Destination, Language, NavigatorBuilder};
use cg_graph::DirectorySource;

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Indoor and outdoor campus directions")]
struct Args {
    /// Where to start: a building code, optionally followed by a room
    /// (e.g. "GSD 101").
    from: Destination,

    /// Where to go, in the same form as FROM.
    to: Destination,

    /// Directory holding the graph resources.
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Avoid stairs and edges marked as inaccessible.
    #[arg(long)]
    accessible: bool,

    /// Language of the printed steps (en or fr).
    #[arg(long, default_value = "en")]
    language: Language,

    /// Penalise routes that take a second stairway or elevator.
    #[arg(long)]
    floor_penalty: Option<u32>,

    /// Rank routes between buildings by walked metres instead of raw units.
    #[arg(long)]
    weighted: bool,

    /// Print step keys and icon names next to each step.
    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> NavConfig {
        let mut config = NavConfig { weighted_composition: self.weighted, ..NavConfig::default() };
        if let Some(penalty) = self.floor_penalty {
            config = config.with_floor_penalty(penalty);
        }
        config
    }
}

/// `RUST_LOG` when it is set and valid, `warn` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let navigator = NavigatorBuilder::new(DirectorySource::new(args.data.clone()))
        .config(args.config())
        .build();

    let results = navigator
        .get_directions_between(&args.from, &args.to, args.accessible, args.language)
        .with_context(|| format!("routing {} to {} with graphs from {}", args.from, args.to, args.data.display()))?;

    for (i, step) in results.steps.iter().enumerate() {
        let text = step.text(results.language);
        if args.verbose {
            let icon = step.icon.map_or("-", |icon| icon.material_name());
            println!("{:>3}. {text}  [{} {icon}]", i + 1, step.key);
        } else {
            println!("{:>3}. {text}", i + 1);
        }
    }

    if let Some(distance) = results.distance {
        println!();
        println!("Total distance: {distance} graph units");
    }
    Ok(if results.show_report { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
