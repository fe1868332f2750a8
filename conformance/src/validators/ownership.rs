//! Ownership: every member belongs to the declaration it was computed for,
//! and every type variable it mentions is in scope there.

use anyhow::Result;
use kindgen_codegen::{Synthesizer, TypeFactory};
use kindgen_model::{
    Declaration, MethodHeader, SyntheticMember, TypeExpr, TypeVariable, VariableOwner,
};

use super::all_members;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "synthesis/ownership";

/// Checks member owners and type-variable scoping for every declaration.
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
            if member.owner() != &decl.id {
                violations.push(format!("{} owned by `{}`", member.name(), member.owner()));
            }
            if let SyntheticMember::Method(method) = &member {
                check_scoping(decl, method, &mut violations);
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

/// Method type parameters are owned by the method; anything else mentioned
/// must be one of the declaration's own parameters.
fn check_scoping(decl: &Declaration, method: &MethodHeader, out: &mut Vec<String>) {
    let method_owner = VariableOwner::Method {
        declaration: decl.id.clone(),
        method: method.name.clone(),
    };
    for param in &method.type_parameters {
        if param.owner != method_owner {
            out.push(format!(
                "{} type parameter {} owned by {:?}",
                method.name, param.name, param.owner
            ));
        }
    }

    let declared = decl.parameter_types();
    let mut mentioned = Vec::new();
    if let Some(p) = &method.parameter {
        variables(&p.ty, &mut mentioned);
    }
    variables(&method.return_type, &mut mentioned);
    for var in mentioned {
        let in_scope = method.type_parameters.contains(var)
            || declared
                .iter()
                .any(|d| matches!(d, TypeExpr::Variable(v) if v == var));
        if !in_scope {
            out.push(format!("{} mentions out-of-scope variable {}", method.name, var.name));
        }
    }
}

fn variables<'a>(expr: &'a TypeExpr, out: &mut Vec<&'a TypeVariable>) {
    match expr {
        TypeExpr::Variable(v) => out.push(v),
        TypeExpr::Class { args, .. } => {
            for arg in args {
                variables(arg, out);
            }
        }
    }
}
