//! `kindgen`: Synthesizes the higher-kind members of every marked declaration
//! in a JSON declaration file.
//!
//! **Outputs:** Java-style member headers grouped per declaration (`text`), or
//! an array of `{ declaration, members }` nodes (`json`), to stdout or `--out`.
//!
//! **Usage:**
//! ```text
//! kindgen [--config <toml>] [--format text|json] [--request class|methods|all]
//!         [--out <path>] <declarations.json>
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use kindgen_clients::{init_tracing, load_config, load_declarations};
use kindgen_codegen::{emit, Synthesizer};
use kindgen_model::serializer::json;
use kindgen_model::{Declaration, Request, SyntheticMember};
use kindgen_provider::AugmentProvider;

/// Output rendering.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Which member kinds to synthesize.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Requested {
    Class,
    Methods,
    All,
}

impl Requested {
    fn requests(self) -> &'static [Request] {
        match self {
            Requested::Class => &[Request::Class],
            Requested::Methods => &[Request::Methods],
            Requested::All => &Request::ALL,
        }
    }
}

/// Synthesize witness, kind-lifting, narrowing and instance members.
#[derive(Parser)]
#[command(
    name = "kindgen",
    about = "Synthesize higher-kind members for annotated generic declarations"
)]
struct Args {
    /// JSON file listing the declarations.
    declarations: PathBuf,

    /// TOML configuration overriding well-known names and the classpath.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Member kinds to synthesize.
    #[arg(long, value_enum, default_value_t = Requested::All)]
    request: Requested,

    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let set = load_declarations(&args.declarations)?;
    let declarations = set.declarations.clone();
    let provider = AugmentProvider::with_versions(Synthesizer::from_config(&config), set);

    let (results, report) = provider
        .synthesize_all(&declarations, args.request.requests())
        .context("Failed to synthesize declarations")?;

    let borrowed: Vec<(&Declaration, &[SyntheticMember])> = results
        .iter()
        .map(|r| (r.declaration, r.members.as_slice()))
        .collect();
    let output = match args.format {
        Format::Text => emit::render_all(&borrowed),
        Format::Json => {
            let mut s = serde_json::to_string_pretty(&json::to_json(&borrowed))
                .context("Failed to serialize members")?;
            s.push('\n');
            s
        }
    };

    match &args.out {
        Some(path) => {
            emit::write_file(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{output}"),
    }

    eprintln!(
        "{} declarations, {} augmented: {} witness types, {} methods",
        report.declarations, report.augmented, report.witness_count, report.method_count
    );
    Ok(())
}
