//! Names the synthesizer recognises and produces.
//!
//! The member and parameter names are a bit-exact contract with code that
//! calls the synthetic members, so they are constants. The annotation and
//! applier type names depend on the library being augmented and can be
//! overridden through [`crate::config::Config`].

use serde::{Deserialize, Serialize};

/// Reserved identifier of the nested witness type.
pub const WITNESS: &str = "µ";
/// Name shared by every narrowing overload.
pub const NARROW_K: &str = "narrowK";
/// Sole parameter name of every narrowing overload.
pub const HKT_PARAMETER: &str = "hkt";
/// Name of the instance factory.
pub const INSTANCE: &str = "instance";
/// Fresh type-parameter names used by narrowing overloads, by position.
pub const NARROW_TYPE_PARAMETERS: [&str; 3] = ["A", "B", "C"];

/// Fully-qualified name of the witness nested in `owner`.
#[must_use]
pub fn witness_qualified_name(owner: &str) -> String {
    format!("{owner}.{WITNESS}")
}

/// Lifting method name for an outermost applier of the given arity.
///
/// `kind_method(1)` is `"kind1"`; every lifting variant whose outermost shape
/// is unary shares it regardless of the declaration's own arity.
#[must_use]
pub fn kind_method(outer: usize) -> String {
    format!("kind{outer}")
}

/// Fresh type-parameter name of the instance factory at `index`.
///
/// `A`..`Z` by position, then `A26`, `A27`, …
#[must_use]
pub fn instance_type_parameter(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => format!("A{index}"),
    }
}

/// Default package of the augmented library.
pub const DEFAULT_PACKAGE: &str = "com.github.tonivade.purefun";

/// Fully-qualified names of the externally defined annotations and types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WellKnownNames {
    /// Annotation marking a declaration for witness/kind/narrow synthesis.
    pub higher_kind: String,
    /// Annotation marking a declaration for instance-factory synthesis.
    pub instance: String,
    /// Zero-argument marker capability implemented by every witness.
    pub kind: String,
    /// Unary applier type (`Higher1<W, A>`).
    pub higher1: String,
    /// Binary applier type (`Higher2<W, A, B>`).
    pub higher2: String,
    /// Ternary applier type (`Higher3<W, A, B, C>`).
    pub higher3: String,
}

impl WellKnownNames {
    /// Qualified name of the `n`-ary applier, for `n` in 1..=3.
    #[must_use]
    pub fn applier(&self, n: usize) -> Option<&str> {
        match n {
            1 => Some(&self.higher1),
            2 => Some(&self.higher2),
            3 => Some(&self.higher3),
            _ => None,
        }
    }

    /// Every name, paired with its field label, for validation messages.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("higher_kind", &self.higher_kind),
            ("instance", &self.instance),
            ("kind", &self.kind),
            ("higher1", &self.higher1),
            ("higher2", &self.higher2),
            ("higher3", &self.higher3),
        ]
    }
}

impl Default for WellKnownNames {
    fn default() -> Self {
        Self {
            higher_kind: format!("{DEFAULT_PACKAGE}.HigherKind"),
            instance: format!("{DEFAULT_PACKAGE}.Instance"),
            kind: format!("{DEFAULT_PACKAGE}.Kind"),
            higher1: format!("{DEFAULT_PACKAGE}.Higher1"),
            higher2: format!("{DEFAULT_PACKAGE}.Higher2"),
            higher3: format!("{DEFAULT_PACKAGE}.Higher3"),
        }
    }
}
