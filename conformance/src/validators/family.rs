//! Family shape: how many members of which name each declaration receives.
//!
//! | Arity | Witness | `narrowK` | Lifting (in order) |
//! |-------|---------|-----------|--------------------|
//! | 1 | 1 | 1 | `kind1` |
//! | 2 | 1 | 2 | `kind2`, `kind1` |
//! | 3 | 1 | 3 | `kind3`, `kind1`, `kind2` |
//! | other | 0 | 0 | none |
//!
//! An instance-marked declaration additionally ends its method list with one
//! `instance`, whatever its arity.

use anyhow::Result;
use kindgen_codegen::{Synthesizer, TypeFactory};
use kindgen_model::names::{INSTANCE, NARROW_K};
use kindgen_model::{Declaration, Request, SyntheticMember};

use super::members;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "synthesis/family";

/// Checks member counts and method order for every declaration.
///
/// Skipped with a warning when a well-known type is unresolved, since the
/// dependent members are then legitimately omitted.
///
/// # Errors
///
/// Returns an error if synthesis fails.
pub fn validate<F: TypeFactory>(
    synth: &Synthesizer<F>,
    decls: &[Declaration],
) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let missing = synth.types().missing();
    if !missing.is_empty() {
        report.push(TestResult::warn(
            VALIDATOR,
            format!("unresolved well-known types {missing:?}; family shape not checked"),
        ));
        return Ok(report);
    }

    for decl in decls {
        let mut violations = Vec::new();
        let higher_kind = decl.has_annotation(&synth.names().higher_kind);
        let instance = decl.has_annotation(&synth.names().instance);

        let lifting: &[&str] = match (higher_kind, decl.arity()) {
            (true, 1) => &["kind1"],
            (true, 2) => &["kind2", "kind1"],
            (true, 3) => &["kind3", "kind1", "kind2"],
            _ => &[],
        };
        let mut expected: Vec<&str> = vec![NARROW_K; lifting.len()];
        expected.extend_from_slice(lifting);
        if instance {
            expected.push(INSTANCE);
        }
        let expected_witnesses = usize::from(!lifting.is_empty());

        let classes = members(synth, decl, Request::Class)?;
        let witnesses = classes.iter().filter(|m| m.as_witness().is_some()).count();
        if witnesses != expected_witnesses || classes.len() != witnesses {
            violations.push(format!(
                "class request: expected {expected_witnesses} witness, got {} member(s)",
                classes.len()
            ));
        }

        let methods = members(synth, decl, Request::Methods)?;
        let actual: Vec<&str> = methods.iter().map(SyntheticMember::name).collect();
        if actual != expected {
            violations.push(format!(
                "methods request: expected {expected:?}, got {actual:?}"
            ));
        }

        report.push(TestResult::from_violations(
            VALIDATOR,
            &decl.qualified_name,
            violations,
        ));
    }
    Ok(report)
}
