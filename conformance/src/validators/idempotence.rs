//! Idempotence: synthesizing twice from the same snapshot gives equal members.

use anyhow::Result;
use kindgen_codegen::{Synthesizer, TypeFactory};
use kindgen_model::{Declaration, Request};

use super::members;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "synthesis/idempotence";

/// Runs every request twice per declaration and compares.
///
/// # Errors
///
/// Returns an error if synthesis fails.
pub fn validate<F: TypeFactory>(
    synth: &Synthesizer<F>,
    decls: &[Declaration],
) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    for decl in decls {
        let mut violations = Vec::new();
        for request in Request::ALL {
            let first = members(synth, decl, request)?;
            let second = members(synth, decl, request)?;
            if first != second {
                violations.push(format!("{} request differs between runs", request.as_str()));
            }
        }
        report.push(TestResult::from_violations(
            VALIDATOR,
            &decl.qualified_name,
            violations,
        ));
    }
    Ok(report)
}
