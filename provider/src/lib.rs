//! kindgen host boundary.
//!
//! Hosts ask for a declaration's synthetic members repeatedly and sometimes
//! re-entrantly. [`AugmentProvider`] wraps a [`kindgen_codegen::Synthesizer`]
//! with a versioned [`MemoCache`] and one [`RecursionGuard`] per request kind.
//!
//! ```
//! use kindgen_codegen::Synthesizer;
//! use kindgen_model::{Config, Declaration, Request, WellKnownNames};
//! use kindgen_provider::AugmentProvider;
//!
//! let provider = AugmentProvider::new(Synthesizer::from_config(&Config::default()));
//! let decl = Declaration::new("com.example.Example", ["A"])
//!     .with_annotation(WellKnownNames::default().higher_kind);
//! assert_eq!(provider.augments(&decl, Request::Methods).unwrap().len(), 2);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod cache;
pub mod guard;
pub mod provider;

pub use cache::{CacheKey, CacheStats, Members, MemoCache};
pub use guard::RecursionGuard;
pub use provider::{AugmentProvider, DeclarationMembers, TrustSnapshots, VersionSource};
