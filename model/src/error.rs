//! Error types for declaration and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// A declaration input could not be turned into a [`crate::Declaration`].
#[derive(Debug, Error)]
pub enum ModelError {
    /// The input was not valid JSON for the declaration file schema.
    #[error("invalid declaration file: {0}")]
    Json(#[from] serde_json::Error),
    /// A declaration had an empty qualified name.
    #[error("declaration #{index} has an empty qualified name")]
    EmptyQualifiedName {
        /// Position of the declaration in the input.
        index: usize,
    },
    /// A type parameter name was empty.
    #[error("declaration `{declaration}` has an empty type parameter at position {index}")]
    EmptyTypeParameter {
        /// Qualified name of the declaration.
        declaration: String,
        /// Position of the parameter.
        index: usize,
    },
    /// Two type parameters share a name.
    #[error("declaration `{declaration}` declares type parameter `{name}` twice")]
    DuplicateTypeParameter {
        /// Qualified name of the declaration.
        declaration: String,
        /// The repeated name.
        name: String,
    },
    /// Two declarations share an id.
    #[error("duplicate declaration id `{0}`")]
    DuplicateId(String),
}

/// A configuration file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file was not valid TOML for the config schema.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    /// A well-known name was configured as the empty string.
    #[error("config name `{0}` must not be empty")]
    EmptyName(&'static str),
    /// A classpath entry had an empty name.
    #[error("classpath entry #{0} has an empty name")]
    EmptyClassName(usize),
}
