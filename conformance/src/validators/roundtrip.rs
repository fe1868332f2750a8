//! Round-trip: narrowing undoes lifting.
//!
//! For every `narrowK` overload the declaration's own parameters are lifted
//! into the shape the overload accepts and narrowed back; the result must be
//! `D<A, …>` again. Every `kindN` return type must be accepted by some
//! overload, and all lifted forms must be interchangeable.

use anyhow::Result;
use kindgen_codegen::{narrow, wrapper, Synthesizer, TypeFactory};
use kindgen_model::names::NARROW_K;
use kindgen_model::{Declaration, MethodHeader, Request, SyntheticMember};

use super::members;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "synthesis/roundtrip";

/// Checks lift-then-narrow for every declaration with a kind family.
///
/// # Errors
///
/// Returns an error if synthesis or a type instantiation fails.
pub fn validate<F: TypeFactory>(
    synth: &Synthesizer<F>,
    decls: &[Declaration],
) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    for decl in decls {
        let methods: Vec<MethodHeader> = members(synth, decl, Request::Methods)?
            .into_iter()
            .filter_map(|m| match m {
                SyntheticMember::Method(m) => Some(m),
                SyntheticMember::Witness(_) => None,
            })
            .collect();
        let (narrowing, rest): (Vec<_>, Vec<_>) =
            methods.into_iter().partition(|m| m.name == NARROW_K);
        let lifting: Vec<_> = rest.into_iter().filter(|m| m.name.starts_with("kind")).collect();
        if narrowing.is_empty() && lifting.is_empty() {
            continue;
        }

        let own = synth
            .factory()
            .declaration_type(decl, decl.parameter_types())?;
        let witness = synth.factory().witness_type(decl);
        let mut violations = Vec::new();

        for overload in &narrowing {
            let Some(accepted) = overload.parameter.as_ref().map(|p| &p.ty) else {
                violations.push("narrowK without a parameter".to_owned());
                continue;
            };
            let Some(shape) = wrapper::shape_of(synth.types(), accepted) else {
                violations.push(format!("narrowK accepts `{accepted}`, not a wrapper shape"));
                continue;
            };
            let lifted = wrapper::apply(
                synth.factory(),
                synth.types(),
                shape,
                witness.clone(),
                &decl.parameter_types(),
            )?;
            match lifted.and_then(|l| narrow::narrowed_type(overload, &l)) {
                Some(back) if back == own => {}
                Some(back) => violations.push(format!("narrowK({accepted}) yields `{back}`")),
                None => violations.push(format!("narrowK({accepted}) rejects its own shape")),
            }
        }

        for lift in &lifting {
            match narrow::select_overload(&narrowing, &lift.return_type) {
                Some(overload) => {
                    let narrowed = narrow::narrowed_type(overload, &lift.return_type);
                    if narrowed.as_ref() != Some(&own) {
                        violations.push(format!("{} narrows to the wrong type", lift.name));
                    }
                }
                None => violations.push(format!("no narrowK accepts {}()", lift.name)),
            }
        }

        if let Some((first, others)) = lifting.split_first() {
            for other in others {
                if !wrapper::equivalent(synth.types(), &first.return_type, &other.return_type) {
                    violations.push(format!(
                        "{} and {} are not interchangeable",
                        first.name, other.name
                    ));
                }
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures;
    use kindgen_model::Config;

    #[test]
    fn standard_fixtures_round_trip() {
        let synth = Synthesizer::from_config(&Config::default());
        let report = validate(&synth, &fixtures::standard(synth.names())).unwrap();
        assert!(report.all_passed(), "{:#?}", report.results);
        assert_eq!(report.results.len(), 4);
    }
}
