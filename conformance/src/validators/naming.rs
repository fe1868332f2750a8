//! Naming contract: member names, parameter names, modifiers and the
//! witness capability.

use anyhow::Result;
use kindgen_codegen::{Synthesizer, TypeFactory};
use kindgen_model::names::{
    instance_type_parameter, witness_qualified_name, HKT_PARAMETER, INSTANCE, NARROW_K,
    NARROW_TYPE_PARAMETERS, WITNESS,
};
use kindgen_model::{
    Declaration, MethodHeader, Modifier, SyntheticMember, TypeExpr, WellKnownNames, WitnessType,
};

use super::all_members;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "synthesis/naming";

/// Checks every synthesized member of every declaration against the fixed
/// naming table.
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
        for member in all_members(synth, decl)? {
            match &member {
                SyntheticMember::Witness(w) => {
                    check_witness(decl, w, synth.names(), &mut violations)
                }
                SyntheticMember::Method(m) => {
                    check_method(decl, m, synth.names(), &mut violations)
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

fn check_witness(
    decl: &Declaration,
    witness: &WitnessType,
    names: &WellKnownNames,
    out: &mut Vec<String>,
) {
    if witness.name != WITNESS {
        out.push(format!("witness named `{}`", witness.name));
    }
    if witness.qualified_name != witness_qualified_name(&decl.qualified_name) {
        out.push(format!("witness qualified as `{}`", witness.qualified_name));
    }
    expect_modifiers(
        "witness",
        &witness.modifiers,
        &[Modifier::Public, Modifier::Static, Modifier::Final],
        out,
    );
    if witness.implements != [TypeExpr::class(names.kind.as_str())] {
        out.push(format!(
            "witness implements {:?}, not only `{}`",
            witness.implements, names.kind
        ));
    }
}

fn check_method(
    decl: &Declaration,
    method: &MethodHeader,
    names: &WellKnownNames,
    out: &mut Vec<String>,
) {
    let label = method.name.as_str();
    match label {
        NARROW_K => {
            expect_modifiers(label, &method.modifiers, &[Modifier::Public, Modifier::Static], out);
            match &method.parameter {
                Some(p) if p.name == HKT_PARAMETER => {}
                Some(p) => out.push(format!("narrowK parameter named `{}`", p.name)),
                None => out.push("narrowK without a parameter".to_owned()),
            }
            let count = decl.arity().min(NARROW_TYPE_PARAMETERS.len());
            let expected = &NARROW_TYPE_PARAMETERS[..count];
            expect_type_parameters(label, method, expected.iter().map(|s| (*s).to_owned()), out);
            expect_returns_declaration(decl, method, out);
        }
        "kind1" | "kind2" | "kind3" => {
            expect_modifiers(label, &method.modifiers, &[Modifier::Public], out);
            if method.parameter.is_some() || !method.type_parameters.is_empty() {
                out.push(format!("{label} is not parameterless"));
            }
            let outer = label[4..].parse::<usize>().ok();
            let applier = outer.and_then(|n| names.applier(n));
            match (&method.return_type, applier) {
                (TypeExpr::Class { name, .. }, Some(applier)) if name == applier => {}
                (ret, _) => {
                    out.push(format!("{label} returns `{ret}`, not a {applier:?} instance"))
                }
            }
        }
        INSTANCE => {
            expect_modifiers(label, &method.modifiers, &[Modifier::Public, Modifier::Static], out);
            if method.parameter.is_some() {
                out.push("instance takes a parameter".to_owned());
            }
            let expected = (0..decl.arity()).map(instance_type_parameter);
            expect_type_parameters(label, method, expected, out);
            expect_returns_declaration(decl, method, out);
        }
        other => out.push(format!("unknown member name `{other}`")),
    }
}

fn expect_modifiers(
    label: &str,
    actual: &[Modifier],
    expected: &[Modifier],
    out: &mut Vec<String>,
) {
    if actual != expected {
        let render = |ms: &[Modifier]| ms.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(" ");
        out.push(format!(
            "{label} modifiers `{}`, expected `{}`",
            render(actual),
            render(expected)
        ));
    }
}

fn expect_type_parameters(
    label: &str,
    method: &MethodHeader,
    expected: impl Iterator<Item = String>,
    out: &mut Vec<String>,
) {
    let actual: Vec<&str> = method.type_parameters.iter().map(|p| p.name.as_str()).collect();
    let expected: Vec<String> = expected.collect();
    if actual != expected {
        out.push(format!("{label} type parameters {actual:?}, expected {expected:?}"));
    }
}

/// The return type must be the declaration applied to the method's own type
/// parameters, in order.
fn expect_returns_declaration(decl: &Declaration, method: &MethodHeader, out: &mut Vec<String>) {
    let own: Vec<TypeExpr> = method
        .type_parameters
        .iter()
        .cloned()
        .map(TypeExpr::Variable)
        .collect();
    let ok = matches!(
        &method.return_type,
        TypeExpr::Class { name, args } if *name == decl.qualified_name && *args == own
    );
    if !ok {
        out.push(format!("{} returns `{}`", method.name, method.return_type));
    }
}
