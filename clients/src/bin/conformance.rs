//! `kindgen-conformance`: Checks synthesized members against the laws of the
//! higher-kind encoding.
//!
//! Runs the family, naming, ownership, round-trip and idempotence validators
//! over a declaration file, or over the built-in fixtures when none is given.
//!
//! **Usage:**
//! ```text
//! kindgen-conformance [--config <toml>] [<declarations.json>]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use kindgen_clients::{init_tracing, load_config, load_declarations};
use kindgen_codegen::Synthesizer;
use kindgen_conformance::{fixtures, run_all, Severity};

/// Run the kindgen conformance suite.
#[derive(Parser)]
#[command(
    name = "kindgen-conformance",
    about = "Validate synthesized members against the higher-kind encoding laws"
)]
struct Args {
    /// JSON declaration file (default: built-in fixtures).
    declarations: Option<PathBuf>,

    /// TOML configuration overriding well-known names and the classpath.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let synth = Synthesizer::from_config(&config);
    let decls = match &args.declarations {
        Some(path) => load_declarations(path)?.declarations,
        None => fixtures::standard(synth.names()),
    };

    let report = run_all(&decls, &synth)?;

    println!("kindgen Conformance Report");
    println!("==========================");
    println!();

    for result in &report.results {
        println!("[{}] {}: {}", result.severity, result.validator, result.message);
        for detail in &result.details {
            println!("       {detail}");
        }
    }

    let failed = report.count(Severity::Failure);
    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        report.count(Severity::Pass),
        report.count(Severity::Warning),
        failed
    );

    if failed > 0 {
        eprintln!("Conformance FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
