//! The `instance` factory header.
//!
//! Unlike the kind family this has no arity cap: a declaration with `n` type
//! parameters gets `public static <A, B, …> D<A, B, …> instance()`, including
//! `n = 0`.

use kindgen_model::names::{instance_type_parameter, INSTANCE};
use kindgen_model::{Declaration, MethodHeader, Modifier, TypeExpr, VariableOwner};

use crate::error::SynthError;
use crate::registry::TypeFactory;

/// Builds the instance factory for `decl`.
///
/// # Errors
///
/// Returns an error if the factory fails.
pub fn synthesize<F: TypeFactory + ?Sized>(
    factory: &F,
    decl: &Declaration,
) -> Result<MethodHeader, SynthError> {
    let owner = VariableOwner::Method {
        declaration: decl.id.clone(),
        method: INSTANCE.to_owned(),
    };
    let type_parameters: Vec<_> = (0..decl.arity())
        .map(|i| factory.fresh_type_parameter(owner.clone(), &instance_type_parameter(i), i))
        .collect();
    let args = type_parameters
        .iter()
        .cloned()
        .map(TypeExpr::Variable)
        .collect();

    Ok(MethodHeader {
        owner: decl.id.clone(),
        name: INSTANCE.to_owned(),
        modifiers: vec![Modifier::Public, Modifier::Static],
        type_parameters,
        parameter: None,
        return_type: factory.declaration_type(decl, args)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ClassPath;

    #[test]
    fn one_fresh_parameter_per_declaration_parameter() {
        let decl = Declaration::new("com.example.Quad", ["W", "X", "Y", "Z"]);
        let method = synthesize(&ClassPath::new(), &decl).unwrap();
        assert_eq!(method.name, "instance");
        assert_eq!(method.return_type.to_string(), "Quad<A, B, C, D>");
        assert!(method.parameter.is_none());
        assert!(method.has_modifier(Modifier::Static));
    }

    #[test]
    fn zero_arity_declaration() {
        let decl = Declaration::new("com.example.Unit", Vec::<&str>::new());
        let method = synthesize(&ClassPath::new(), &decl).unwrap();
        assert!(method.type_parameters.is_empty());
        assert_eq!(method.return_type, TypeExpr::class("com.example.Unit"));
    }
}
