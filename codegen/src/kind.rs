//! Kind-lifting methods: `kind1`, `kind2`, `kind3`.
//!
//! Each method takes no arguments and returns the declaration's own type
//! parameters applied to its witness in one shape. The name follows the
//! outermost applier, so `Triple<A, B, C>` gets `kind3` (canonical), `kind1`
//! (fully unary) and `kind2` (`Higher2<Higher1<µ, A>, B, C>`).

use kindgen_model::{Declaration, MethodHeader, Modifier};

use crate::error::SynthError;
use crate::registry::{TypeFactory, WrapperTypes};
use crate::wrapper::{self, Arity, WrapperShape};

/// Builds every lifting method for a declaration of the given arity.
///
/// # Errors
///
/// Returns an error if the factory fails.
pub fn synthesize<F: TypeFactory + ?Sized>(
    factory: &F,
    types: &WrapperTypes,
    decl: &Declaration,
    arity: Arity,
) -> Result<Vec<MethodHeader>, SynthError> {
    let mut methods = Vec::new();
    for shape in arity.lifting_shapes() {
        if let Some(method) = lifting_method(factory, types, decl, shape)? {
            methods.push(method);
        }
    }
    Ok(methods)
}

/// Builds the lifting method for one shape; `None` if an applier is missing.
///
/// # Errors
///
/// Returns an error if the factory fails.
pub fn lifting_method<F: TypeFactory + ?Sized>(
    factory: &F,
    types: &WrapperTypes,
    decl: &Declaration,
    shape: WrapperShape,
) -> Result<Option<MethodHeader>, SynthError> {
    let witness = factory.witness_type(decl);
    let Some(return_type) = wrapper::apply(factory, types, shape, witness, &decl.parameter_types())?
    else {
        tracing::debug!(
            declaration = %decl.qualified_name,
            method = %shape.lifting_name(),
            "applier not resolved; lifting method omitted"
        );
        return Ok(None);
    };

    Ok(Some(MethodHeader {
        owner: decl.id.clone(),
        name: shape.lifting_name(),
        modifiers: vec![Modifier::Public],
        type_parameters: Vec::new(),
        parameter: None,
        return_type,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ClassPath;
    use kindgen_model::{Config, WellKnownNames};

    #[test]
    fn lifting_uses_the_declarations_own_parameters() {
        let cp = ClassPath::from_config(&Config::default());
        let types = WrapperTypes::resolve(&cp, &WellKnownNames::default());
        let decl = Declaration::new("com.example.Pair", ["L", "R"]);

        let methods = synthesize(&cp, &types, &decl, Arity::Two).unwrap();
        let rendered: Vec<(String, String)> = methods
            .iter()
            .map(|m| (m.name.clone(), m.return_type.to_string()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("kind2".to_owned(), "Higher2<Pair.µ, L, R>".to_owned()),
                ("kind1".to_owned(), "Higher1<Higher1<Pair.µ, L>, R>".to_owned()),
            ]
        );
        assert!(methods.iter().all(|m| m.parameter.is_none()));
        assert!(methods.iter().all(|m| !m.has_modifier(Modifier::Static)));
    }

    #[test]
    fn missing_canonical_applier_drops_only_that_method() {
        let names = WellKnownNames::default();
        let cp = ClassPath::from_config(&Config::default()).without(&names.higher3);
        let types = WrapperTypes::resolve(&cp, &names);
        let decl = Declaration::new("com.example.Triple", ["A", "B", "C"]);

        let names: Vec<String> = synthesize(&cp, &types, &decl, Arity::Three)
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["kind1", "kind2"]);
    }
}
