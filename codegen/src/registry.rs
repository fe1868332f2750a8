//! Type registry: the factory seam and the well-known types resolved once.
//!
//! The synthesizer never looks a name up while building members. Everything
//! it needs from the outside world is resolved into [`WrapperTypes`] when the
//! synthesizer is constructed, and everything it builds goes through a
//! [`TypeFactory`].

use std::collections::HashMap;

use kindgen_model::names::{witness_qualified_name, WellKnownNames};
use kindgen_model::{ClassEntry, Config, Declaration, TypeExpr, TypeVariable, VariableOwner};
use thiserror::Error;

/// A resolved external class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassRef {
    /// Fully-qualified class name.
    pub qualified_name: String,
    /// Number of type parameters.
    pub arity: usize,
}

/// A host factory rejected a request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FactoryError {
    /// A class was instantiated with the wrong number of type arguments.
    #[error("`{class}` takes {expected} type argument(s), got {actual}")]
    ArityMismatch {
        /// Class being instantiated.
        class: String,
        /// Declared number of type parameters.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },
}

/// Builds type expressions and fresh type parameters on behalf of the synthesizer.
///
/// Only [`TypeFactory::resolve_class`] is required; the remaining methods
/// have structural defaults that most hosts keep.
pub trait TypeFactory {
    /// Resolves a class by fully-qualified name within the search scope.
    fn resolve_class(&self, qualified_name: &str) -> Option<ClassRef>;

    /// Instantiates a resolved class with the given type arguments.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::ArityMismatch`] if the argument count differs
    /// from the class arity.
    fn instantiate(&self, class: &ClassRef, args: Vec<TypeExpr>) -> Result<TypeExpr, FactoryError> {
        if args.len() != class.arity {
            return Err(FactoryError::ArityMismatch {
                class: class.qualified_name.clone(),
                expected: class.arity,
                actual: args.len(),
            });
        }
        Ok(TypeExpr::Class {
            name: class.qualified_name.clone(),
            args,
        })
    }

    /// Instantiates `decl` with the given type arguments.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::ArityMismatch`] if the argument count differs
    /// from the declaration arity.
    fn declaration_type(
        &self,
        decl: &Declaration,
        args: Vec<TypeExpr>,
    ) -> Result<TypeExpr, FactoryError> {
        let class = ClassRef {
            qualified_name: decl.qualified_name.clone(),
            arity: decl.arity(),
        };
        self.instantiate(&class, args)
    }

    /// Reference to the witness type nested in `decl`.
    ///
    /// Built by name rather than resolved: the witness is itself synthetic,
    /// and resolving it would re-enter synthesis for the same declaration.
    fn witness_type(&self, decl: &Declaration) -> TypeExpr {
        TypeExpr::class(witness_qualified_name(&decl.qualified_name))
    }

    /// Creates a fresh synthetic type parameter.
    fn fresh_type_parameter(&self, owner: VariableOwner, name: &str, index: usize) -> TypeVariable {
        TypeVariable {
            name: name.to_owned(),
            index,
            owner,
        }
    }
}

/// In-memory search scope of known external classes.
#[derive(Debug, Clone, Default)]
pub struct ClassPath {
    classes: HashMap<String, ClassRef>,
}

impl ClassPath {
    /// Creates an empty class path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the class path described by a configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::from_entries(&config.classpath())
    }

    /// Builds a class path from explicit entries.
    #[must_use]
    pub fn from_entries(entries: &[ClassEntry]) -> Self {
        entries
            .iter()
            .fold(Self::new(), |cp, e| cp.with_class(&e.name, e.arity))
    }

    /// Returns this class path with one more class.
    #[must_use]
    pub fn with_class(mut self, qualified_name: &str, arity: usize) -> Self {
        self.classes.insert(
            qualified_name.to_owned(),
            ClassRef {
                qualified_name: qualified_name.to_owned(),
                arity,
            },
        );
        self
    }

    /// Returns this class path without the named class.
    #[must_use]
    pub fn without(mut self, qualified_name: &str) -> Self {
        self.classes.remove(qualified_name);
        self
    }

    /// Number of known classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if no class is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl TypeFactory for ClassPath {
    fn resolve_class(&self, qualified_name: &str) -> Option<ClassRef> {
        self.classes.get(qualified_name).cloned()
    }
}

/// The marker capability and the unary/binary/ternary appliers, resolved once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapperTypes {
    /// Zero-argument marker capability implemented by witnesses.
    pub kind: Option<ClassRef>,
    appliers: [Option<ClassRef>; 3],
}

impl WrapperTypes {
    /// Resolves every well-known type through `factory`.
    ///
    /// A type that resolves with an unexpected arity is treated as missing:
    /// the applier for `n` arguments must take `n + 1` (the witness first),
    /// and the marker must take none.
    pub fn resolve<F: TypeFactory + ?Sized>(factory: &F, names: &WellKnownNames) -> Self {
        let kind = resolve_with_arity(factory, &names.kind, 0);
        let appliers = [
            resolve_with_arity(factory, &names.higher1, 2),
            resolve_with_arity(factory, &names.higher2, 3),
            resolve_with_arity(factory, &names.higher3, 4),
        ];
        Self { kind, appliers }
    }

    /// The applier taking `n` type arguments after the witness, for `n` in 1..=3.
    #[must_use]
    pub fn applier(&self, n: usize) -> Option<&ClassRef> {
        n.checked_sub(1)
            .and_then(|i| self.appliers.get(i))
            .and_then(Option::as_ref)
    }

    /// If `name` is a resolved applier, how many arguments it applies.
    #[must_use]
    pub fn applier_arity(&self, name: &str) -> Option<usize> {
        self.appliers
            .iter()
            .position(|a| a.as_ref().is_some_and(|c| c.qualified_name == name))
            .map(|i| i + 1)
    }

    /// Labels of the well-known types that did not resolve.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.kind.is_none() {
            missing.push("kind");
        }
        for (label, applier) in ["higher1", "higher2", "higher3"].iter().zip(&self.appliers) {
            if applier.is_none() {
                missing.push(*label);
            }
        }
        missing
    }
}

fn resolve_with_arity<F: TypeFactory + ?Sized>(
    factory: &F,
    qualified_name: &str,
    arity: usize,
) -> Option<ClassRef> {
    let class = factory.resolve_class(qualified_name)?;
    if class.arity == arity {
        Some(class)
    } else {
        tracing::warn!(
            class = %qualified_name,
            expected = arity,
            actual = class.arity,
            "well-known type resolved with unexpected arity; treating as missing"
        );
        None
    }
}
