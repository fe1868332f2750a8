//! kindgen declaration model.
//!
//! The `kindgen-model` crate holds the read-only view of generic declarations
//! that the synthesizer consumes, the type expressions it builds, and the
//! immutable synthetic member records it returns, along with configuration
//! and JSON (de)serialization.
//!
//! # Entry Point
//!
//! ```
//! let set = kindgen_model::DeclarationSet::from_json(r#"{
//!     "declarations": [
//!         { "qualified_name": "com.example.Pair", "type_parameters": ["A", "B"],
//!           "annotations": ["com.github.tonivade.purefun.HigherKind"] }
//!     ]
//! }"#).unwrap();
//! assert_eq!(set.declarations[0].arity(), 2);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod error;
pub mod model;
pub mod names;
pub mod serializer;

use std::collections::HashSet;

use serde::Deserialize;

pub use config::{ClassEntry, Config};
pub use error::{ConfigError, ModelError};
pub use model::{
    Bindings, Declaration, DeclarationId, MethodHeader, Modifier, Parameter, Request,
    SyntheticMember, TypeExpr, TypeParameter, TypeVariable, VariableOwner, WitnessType,
};
pub use names::WellKnownNames;

/// On-disk shape of a declaration file.
#[derive(Debug, Deserialize)]
struct DeclarationFile {
    declarations: Vec<DeclarationInput>,
}

#[derive(Debug, Deserialize)]
struct DeclarationInput {
    #[serde(default)]
    id: Option<String>,
    qualified_name: String,
    #[serde(default)]
    type_parameters: Vec<String>,
    #[serde(default)]
    annotations: Vec<String>,
    #[serde(default)]
    version: u64,
}

/// A validated, ordered collection of declarations.
#[derive(Debug, Clone, Default)]
pub struct DeclarationSet {
    /// Declarations in input order.
    pub declarations: Vec<Declaration>,
}

impl DeclarationSet {
    /// Parses and validates a JSON declaration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the schema, a name is
    /// empty, a declaration repeats a type-parameter name, or two
    /// declarations share an id.
    pub fn from_json(s: &str) -> Result<Self, ModelError> {
        let file: DeclarationFile = serde_json::from_str(s)?;
        let mut declarations = Vec::with_capacity(file.declarations.len());
        let mut ids = HashSet::new();

        for (index, input) in file.declarations.into_iter().enumerate() {
            if input.qualified_name.trim().is_empty() {
                return Err(ModelError::EmptyQualifiedName { index });
            }
            let mut seen = HashSet::new();
            for (i, name) in input.type_parameters.iter().enumerate() {
                if name.trim().is_empty() {
                    return Err(ModelError::EmptyTypeParameter {
                        declaration: input.qualified_name.clone(),
                        index: i,
                    });
                }
                if !seen.insert(name.as_str()) {
                    return Err(ModelError::DuplicateTypeParameter {
                        declaration: input.qualified_name.clone(),
                        name: name.clone(),
                    });
                }
            }

            let mut decl = Declaration::new(input.qualified_name, &input.type_parameters);
            if let Some(id) = input.id {
                decl.id = DeclarationId::new(id);
            }
            decl.annotations = input.annotations;
            decl.version = input.version;

            if !ids.insert(decl.id.clone()) {
                return Err(ModelError::DuplicateId(decl.id.0));
            }
            declarations.push(decl);
        }

        Ok(Self { declarations })
    }

    /// Looks up a declaration by id. Returns `None` if not found.
    #[must_use]
    pub fn find(&self, id: &DeclarationId) -> Option<&Declaration> {
        self.declarations.iter().find(|d| &d.id == id)
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if the set holds no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_declaration() {
        let set = DeclarationSet::from_json(
            r#"{ "declarations": [
                { "qualified_name": "com.example.Box", "type_parameters": ["T"] }
            ] }"#,
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        let decl = &set.declarations[0];
        assert_eq!(decl.id.as_str(), "com.example.Box");
        assert!(decl.annotations.is_empty());
        assert_eq!(decl.version, 0);
    }

    #[test]
    fn explicit_id_is_kept() {
        let set = DeclarationSet::from_json(
            r#"{ "declarations": [ { "id": "box#1", "qualified_name": "com.example.Box" } ] }"#,
        )
        .unwrap();
        assert!(set.find(&DeclarationId::new("box#1")).is_some());
    }

    #[test]
    fn duplicate_type_parameter_is_rejected() {
        let err = DeclarationSet::from_json(
            r#"{ "declarations": [ { "qualified_name": "P", "type_parameters": ["A", "A"] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateTypeParameter { .. }));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let err = DeclarationSet::from_json(
            r#"{ "declarations": [ { "qualified_name": "P" }, { "qualified_name": "P" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateId(_)));
    }

    #[test]
    fn empty_qualified_name_is_rejected() {
        let err = DeclarationSet::from_json(r#"{ "declarations": [ { "qualified_name": " " } ] }"#)
            .unwrap_err();
        assert!(matches!(err, ModelError::EmptyQualifiedName { index: 0 }));
    }
}
