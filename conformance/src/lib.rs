//! kindgen conformance suite.
//!
//! Checks that what the synthesizer produces obeys the laws of the
//! higher-kind encoding, for any declaration set and any configured
//! synthesizer.
//!
//! # Laws
//!
//! | Validator | Law |
//! |-----------|-----|
//! | `synthesis/family` | member counts and order follow the arity table |
//! | `synthesis/naming` | names, parameters and modifiers follow the fixed table |
//! | `synthesis/ownership` | members belong to their declaration; variables are in scope |
//! | `synthesis/roundtrip` | narrowing a lifted value gives back `D<A, …>` |
//! | `synthesis/idempotence` | equal snapshots give equal members |
//!
//! # Entry Point
//!
//! ```
//! use kindgen_codegen::Synthesizer;
//! use kindgen_conformance::{fixtures, run_all};
//! use kindgen_model::Config;
//!
//! let synth = Synthesizer::from_config(&Config::default());
//! let report = run_all(&fixtures::standard(synth.names()), &synth).unwrap();
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod fixtures;
pub mod report;
pub mod validators;

use kindgen_codegen::{Synthesizer, TypeFactory};
use kindgen_model::Declaration;

pub use report::{ConformanceReport, Severity, TestResult};

/// Runs all validators over `decls` and returns the aggregated report.
///
/// Validators are run in this order:
/// 1. Family shape
/// 2. Naming contract
/// 3. Ownership
/// 4. Round-trip
/// 5. Idempotence
///
/// # Errors
///
/// Returns an error only if synthesis itself fails; law violations are
/// reported as failures.
pub fn run_all<F: TypeFactory>(
    decls: &[Declaration],
    synth: &Synthesizer<F>,
) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    tracing::info!(declarations = decls.len(), "running conformance");

    report.extend(validators::family::validate(synth, decls)?);
    report.extend(validators::naming::validate(synth, decls)?);
    report.extend(validators::ownership::validate(synth, decls)?);
    report.extend(validators::roundtrip::validate(synth, decls)?);
    report.extend(validators::idempotence::validate(synth, decls)?);

    Ok(report)
}
