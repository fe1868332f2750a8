//! kindgen synthesizer.
//!
//! Given a generic declaration, derives the header-only members that let it
//! take part in a higher-kinded encoding over first-order generics:
//!
//! - a nested witness type `µ` implementing the `Kind` marker,
//! - `narrowK` overloads recovering `D<A, …>` from any accepted wrapper shape,
//! - `kind1` / `kind2` / `kind3` methods lifting `D<A, …>` into those shapes,
//! - an `instance` factory for declarations carrying the instance marker.
//!
//! The kind family is defined for one to three type parameters only; other
//! arities produce nothing. The instance factory has no such cap.
//!
//! # Entry Point
//!
//! ```
//! use kindgen_codegen::Synthesizer;
//! use kindgen_model::{Config, Declaration, Request, WellKnownNames};
//!
//! let synth = Synthesizer::from_config(&Config::default());
//! let decl = Declaration::new("com.example.Pair", ["A", "B"])
//!     .with_annotation(WellKnownNames::default().higher_kind);
//! let methods = synth.synthesize(&decl, Request::Methods).unwrap();
//! assert_eq!(methods.len(), 4);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod dispatch;
pub mod emit;
pub mod error;
pub mod instance;
pub mod kind;
pub mod narrow;
pub mod registry;
pub mod witness;
pub mod wrapper;

use kindgen_model::SyntheticMember;

pub use dispatch::{Marker, Synthesizer};
pub use error::SynthError;
pub use registry::{ClassPath, ClassRef, FactoryError, TypeFactory, WrapperTypes};
pub use wrapper::{Arity, WrapperShape};

/// Report of what was synthesized in a batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SynthesisReport {
    /// Declarations processed.
    pub declarations: usize,
    /// Declarations that received at least one member.
    pub augmented: usize,
    /// Witness types synthesized.
    pub witness_count: usize,
    /// Methods synthesized.
    pub method_count: usize,
}

impl SynthesisReport {
    /// Counts the members synthesized for one declaration.
    pub fn record(&mut self, members: &[SyntheticMember]) {
        self.declarations += 1;
        if !members.is_empty() {
            self.augmented += 1;
        }
        for member in members {
            match member {
                SyntheticMember::Witness(_) => self.witness_count += 1,
                SyntheticMember::Method(_) => self.method_count += 1,
            }
        }
    }
}
