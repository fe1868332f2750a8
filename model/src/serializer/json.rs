//! JSON serializer for synthesized members.
//!
//! Produces one document per run: an array of `{ "declaration", "members" }`
//! nodes in input order. Each member node carries both the structured type
//! expressions and a rendered `signature` for human readers.

use serde_json::{json, Value};

use crate::model::{Declaration, MethodHeader, SyntheticMember, WitnessType};

/// Serializes the members synthesized for each declaration.
///
/// The returned value can be pretty-printed with [`serde_json::to_string_pretty`].
#[must_use]
pub fn to_json(results: &[(&Declaration, &[SyntheticMember])]) -> Value {
    let nodes: Vec<Value> = results
        .iter()
        .map(|(decl, members)| declaration_to_json(decl, members))
        .collect();
    Value::Array(nodes)
}

fn declaration_to_json(decl: &Declaration, members: &[SyntheticMember]) -> Value {
    let type_parameters: Vec<&str> = decl
        .type_parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    json!({
        "declaration": {
            "id": decl.id,
            "qualified_name": decl.qualified_name,
            "type_parameters": type_parameters,
            "version": decl.version
        },
        "members": members.iter().map(member_to_json).collect::<Vec<Value>>()
    })
}

/// Serializes a single member.
#[must_use]
pub fn member_to_json(member: &SyntheticMember) -> Value {
    match member {
        SyntheticMember::Witness(w) => witness_to_json(w),
        SyntheticMember::Method(m) => method_to_json(m),
    }
}

fn witness_to_json(witness: &WitnessType) -> Value {
    let implements: Vec<String> = witness.implements.iter().map(ToString::to_string).collect();
    json!({
        "member": "witness",
        "name": witness.name,
        "qualified_name": witness.qualified_name,
        "modifiers": witness.modifiers,
        "implements": implements
    })
}

fn method_to_json(method: &MethodHeader) -> Value {
    let type_parameters: Vec<&str> = method
        .type_parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    let mut node = json!({
        "member": "method",
        "name": method.name,
        "modifiers": method.modifiers,
        "type_parameters": type_parameters,
        "return_type": method.return_type,
        "signature": signature(method)
    });
    if let Some(param) = &method.parameter {
        node["parameter"] = json!({
            "name": param.name,
            "type": param.ty,
            "display": param.ty.to_string()
        });
    }
    node
}

/// One-line signature, e.g. `<A> narrowK(Higher1<Box.µ, A> hkt): Box<A>`.
#[must_use]
pub fn signature(method: &MethodHeader) -> String {
    let mut s = String::new();
    if !method.type_parameters.is_empty() {
        let names: Vec<&str> = method
            .type_parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        s.push_str(&format!("<{}> ", names.join(", ")));
    }
    s.push_str(&method.name);
    s.push('(');
    if let Some(param) = &method.parameter {
        s.push_str(&format!("{} {}", param.ty, param.name));
    }
    s.push_str(&format!("): {}", method.return_type));
    s
}
