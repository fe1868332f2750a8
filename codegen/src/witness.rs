//! The nested witness type `µ`.

use kindgen_model::names::{witness_qualified_name, WITNESS};
use kindgen_model::{Declaration, Modifier, WitnessType};

use crate::error::SynthError;
use crate::registry::{TypeFactory, WrapperTypes};

/// Builds `public static final class µ implements Kind` nested in `decl`.
///
/// Returns `None` when the marker capability is not resolved, since a witness
/// that does not declare it would not be accepted by any applier.
///
/// # Errors
///
/// Returns an error if the factory fails.
pub fn synthesize<F: TypeFactory + ?Sized>(
    factory: &F,
    types: &WrapperTypes,
    decl: &Declaration,
) -> Result<Option<WitnessType>, SynthError> {
    let Some(kind) = &types.kind else {
        tracing::warn!(
            declaration = %decl.qualified_name,
            "marker capability not resolved; witness omitted"
        );
        return Ok(None);
    };
    let marker = factory.instantiate(kind, Vec::new())?;

    Ok(Some(WitnessType {
        owner: decl.id.clone(),
        name: WITNESS.to_owned(),
        qualified_name: witness_qualified_name(&decl.qualified_name),
        modifiers: vec![Modifier::Public, Modifier::Static, Modifier::Final],
        implements: vec![marker],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ClassPath;
    use kindgen_model::{Config, TypeExpr, WellKnownNames};

    #[test]
    fn witness_is_public_static_final_kind() {
        let names = WellKnownNames::default();
        let cp = ClassPath::from_config(&Config::default());
        let types = WrapperTypes::resolve(&cp, &names);
        let decl = Declaration::new("com.example.Example", ["A"]);

        let witness = synthesize(&cp, &types, &decl).unwrap().unwrap();
        assert_eq!(witness.name, "µ");
        assert_eq!(witness.qualified_name, "com.example.Example.µ");
        assert_eq!(
            witness.modifiers,
            vec![Modifier::Public, Modifier::Static, Modifier::Final]
        );
        assert_eq!(witness.implements, vec![TypeExpr::class(names.kind)]);
        assert_eq!(witness.owner, decl.id);
    }

    #[test]
    fn missing_kind_omits_witness() {
        let names = WellKnownNames::default();
        let cp = ClassPath::from_config(&Config::default()).without(&names.kind);
        let types = WrapperTypes::resolve(&cp, &names);
        let decl = Declaration::new("com.example.Example", ["A"]);
        assert!(synthesize(&cp, &types, &decl).unwrap().is_none());
    }
}
