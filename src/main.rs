//! Command-line shell: argument handling, glob expansion, logging init,
//! and exit codes. All extraction logic lives in the library.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bw2hashcat::extract::{Extractor, TerminalPrompter};

/// Convert locally stored Bitwarden credential artifacts into
/// hashcat-ready `$bitwarden$` lines.
#[derive(Parser, Debug)]
#[command(name = "bw2hashcat", version, about)]
struct Cli {
    /// data.json paths or glob patterns; with none given, standard
    /// installation locations are searched.
    targets: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bw2hashcat=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let targets = expand_targets(&cli.targets);

    let mut prompter = TerminalPrompter;
    let mut extractor = Extractor::new(&mut prompter);
    let mut failures = 0usize;
    // Each target is processed independently and to completion; one
    // target's failure must not stop the ones after it.
    for target in &targets {
        match extractor.extract(target.as_deref()) {
            Ok(record) => println!("{}", record.hashcat_line()),
            Err(err) => {
                eprintln!("{err}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Expand the positional arguments into extraction targets.
///
/// An argument containing `*` is treated as a glob pattern, everything
/// else as a literal path. No arguments means one default-search target.
fn expand_targets(args: &[String]) -> Vec<Option<PathBuf>> {
    if args.is_empty() {
        return vec![None];
    }
    let mut targets = Vec::new();
    for arg in args {
        if arg.contains('*') {
            match glob::glob(arg) {
                Ok(paths) => targets.extend(paths.flatten().map(Some)),
                Err(err) => eprintln!("bad pattern {arg}: {err}"),
            }
        } else {
            targets.push(Some(PathBuf::from(arg)));
        }
    }
    targets
}
