//! Core declaration model types.
//!
//! These types describe what the synthesizer reads (generic declarations and
//! their type parameters) and what it produces (type expressions and
//! header-only synthetic members). Every value here is an immutable record;
//! the host owns declarations and hands the synthesizer a snapshot.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable value identity of a declaration, independent of any live object graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclarationId(pub String);

impl DeclarationId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A type parameter of a generic declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParameter {
    /// Identifier as written in source (e.g. `"A"`).
    pub name: String,
    /// Zero-based position in the declaration's parameter list.
    pub index: usize,
}

/// A generic type declaration as exposed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Stable identity used for cache keys and member ownership.
    pub id: DeclarationId,
    /// Fully-qualified name (e.g. `"com.example.Pair"`).
    pub qualified_name: String,
    /// Ordered type parameters.
    pub type_parameters: Vec<TypeParameter>,
    /// Fully-qualified names of the annotations present on the declaration.
    pub annotations: Vec<String>,
    /// Host modification counter; bumped on every source edit.
    pub version: u64,
}

impl Declaration {
    /// Creates a declaration whose id is its qualified name, at version 0.
    pub fn new<S: AsRef<str>>(
        qualified_name: impl Into<String>,
        type_parameters: impl IntoIterator<Item = S>,
    ) -> Self {
        let qualified_name = qualified_name.into();
        Self {
            id: DeclarationId::new(qualified_name.clone()),
            qualified_name,
            type_parameters: type_parameters
                .into_iter()
                .enumerate()
                .map(|(index, name)| TypeParameter {
                    name: name.as_ref().to_owned(),
                    index,
                })
                .collect(),
            annotations: Vec::new(),
            version: 0,
        }
    }

    /// Returns this declaration with one more annotation attached.
    pub fn with_annotation(mut self, qualified_name: impl Into<String>) -> Self {
        self.annotations.push(qualified_name.into());
        self
    }

    /// Returns true if the declaration carries the named annotation.
    #[must_use]
    pub fn has_annotation(&self, qualified_name: &str) -> bool {
        self.annotations.iter().any(|a| a == qualified_name)
    }

    /// Number of type parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }

    /// Last dotted segment of the qualified name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        local_name(&self.qualified_name)
    }

    /// The declaration's own type parameters as type variables.
    #[must_use]
    pub fn parameter_types(&self) -> Vec<TypeExpr> {
        self.type_parameters
            .iter()
            .map(|p| {
                TypeExpr::Variable(TypeVariable {
                    name: p.name.clone(),
                    index: p.index,
                    owner: VariableOwner::Declaration(self.id.clone()),
                })
            })
            .collect()
    }

    /// Records a source edit.
    pub fn bump_version(&mut self) {
        self.version += 1;
    }
}

/// What a type variable belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableOwner {
    /// A type parameter of the declaration itself.
    Declaration(DeclarationId),
    /// A fresh type parameter introduced by a synthetic method.
    Method {
        /// Declaration the method is synthesized into.
        declaration: DeclarationId,
        /// Method name (overloads share it).
        method: String,
    },
}

/// A reference to a type parameter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeVariable {
    /// Parameter name.
    pub name: String,
    /// Zero-based position in the owner's parameter list.
    pub index: usize,
    /// Declaring element.
    pub owner: VariableOwner,
}

/// A type expression: a type variable or an instantiated class type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    /// A type parameter reference.
    Variable(TypeVariable),
    /// A class type with its type arguments (empty for raw or non-generic types).
    Class {
        /// Fully-qualified class name.
        name: String,
        /// Ordered type arguments.
        args: Vec<TypeExpr>,
    },
}

/// Substitution from type variables to type expressions.
pub type Bindings = BTreeMap<TypeVariable, TypeExpr>;

impl TypeExpr {
    /// A class type with no type arguments.
    pub fn class(name: impl Into<String>) -> Self {
        TypeExpr::Class {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Matches `self` as a pattern against `actual`, binding variables owned
    /// by `owner`. Variables with any other owner must match exactly.
    ///
    /// Returns false on a structural mismatch or a conflicting binding.
    pub fn bind(&self, actual: &TypeExpr, owner: &VariableOwner, bindings: &mut Bindings) -> bool {
        match self {
            TypeExpr::Variable(var) if &var.owner == owner => match bindings.get(var) {
                Some(bound) => bound == actual,
                None => {
                    bindings.insert(var.clone(), actual.clone());
                    true
                }
            },
            TypeExpr::Variable(_) => self == actual,
            TypeExpr::Class { name, args } => match actual {
                TypeExpr::Class {
                    name: other_name,
                    args: other_args,
                } => {
                    name == other_name
                        && args.len() == other_args.len()
                        && args
                            .iter()
                            .zip(other_args)
                            .all(|(p, a)| p.bind(a, owner, bindings))
                }
                TypeExpr::Variable(_) => false,
            },
        }
    }

    /// Replaces every bound variable with its binding.
    #[must_use]
    pub fn substitute(&self, bindings: &Bindings) -> TypeExpr {
        match self {
            TypeExpr::Variable(var) => bindings.get(var).cloned().unwrap_or_else(|| self.clone()),
            TypeExpr::Class { name, args } => TypeExpr::Class {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(bindings)).collect(),
            },
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Variable(var) => f.write_str(&var.name),
            TypeExpr::Class { name, args } => {
                f.write_str(simple_name(name))?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}

/// Member modifiers carried by synthetic declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Visible everywhere.
    Public,
    /// Not tied to an instance of the owner.
    Static,
    /// Cannot be extended.
    Final,
}

impl Modifier {
    /// Source keyword.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Static => "static",
            Modifier::Final => "final",
        }
    }
}

/// Which family of synthetic members the host is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Request {
    /// Nested types.
    Class,
    /// Methods.
    Methods,
}

impl Request {
    /// Both request kinds, in the order hosts usually ask for them.
    pub const ALL: [Request; 2] = [Request::Class, Request::Methods];

    /// Returns the lowercase request name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Request::Class => "class",
            Request::Methods => "methods",
        }
    }
}

/// The nested marker type identifying a declaration as a type constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WitnessType {
    /// Declaration the witness is nested in.
    pub owner: DeclarationId,
    /// Simple name (always the reserved witness identifier).
    pub name: String,
    /// Fully-qualified name (`<owner>.<name>`).
    pub qualified_name: String,
    /// Modifiers, in source order.
    pub modifiers: Vec<Modifier>,
    /// Implemented capabilities.
    pub implements: Vec<TypeExpr>,
}

/// The sole value parameter of a synthetic method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    pub ty: TypeExpr,
}

/// A header-only synthetic method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodHeader {
    /// Declaration the method is synthesized into.
    pub owner: DeclarationId,
    /// Method name.
    pub name: String,
    /// Modifiers, in source order.
    pub modifiers: Vec<Modifier>,
    /// Fresh method-level type parameters.
    pub type_parameters: Vec<TypeVariable>,
    /// Value parameter, if any.
    pub parameter: Option<Parameter>,
    /// Declared return type.
    pub return_type: TypeExpr,
}

impl MethodHeader {
    /// Returns true if the method carries `modifier`.
    #[must_use]
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

/// A member synthesized for a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum SyntheticMember {
    /// The nested witness type.
    Witness(WitnessType),
    /// A synthetic method.
    Method(MethodHeader),
}

impl SyntheticMember {
    /// Simple name of the member.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            SyntheticMember::Witness(w) => &w.name,
            SyntheticMember::Method(m) => &m.name,
        }
    }

    /// Declaration the member belongs to.
    #[must_use]
    pub fn owner(&self) -> &DeclarationId {
        match self {
            SyntheticMember::Witness(w) => &w.owner,
            SyntheticMember::Method(m) => &m.owner,
        }
    }

    /// Returns the method header, if this member is a method.
    #[must_use]
    pub fn as_method(&self) -> Option<&MethodHeader> {
        match self {
            SyntheticMember::Method(m) => Some(m),
            SyntheticMember::Witness(_) => None,
        }
    }

    /// Returns the witness type, if this member is one.
    #[must_use]
    pub fn as_witness(&self) -> Option<&WitnessType> {
        match self {
            SyntheticMember::Witness(w) => Some(w),
            SyntheticMember::Method(_) => None,
        }
    }
}

/// Extracts the last dotted segment of a qualified name.
#[must_use]
pub fn local_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Display name of a qualified class name: everything from the first segment
/// that starts with an uppercase letter, so nested types keep their outer
/// class (`com.example.Pair.µ` → `Pair.µ`).
#[must_use]
pub fn simple_name(qualified: &str) -> &str {
    let mut offset = 0;
    for segment in qualified.split('.') {
        if segment.chars().next().is_some_and(char::is_uppercase) {
            return &qualified[offset..];
        }
        offset += segment.len() + 1;
    }
    local_name(qualified)
}
