//! Shared plumbing for the kindgen binaries: logging setup and input loading.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::Path;

use anyhow::{Context, Result};
use kindgen_model::{Config, DeclarationSet};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `warn`.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

/// Loads the configuration at `path`, or the defaults when none is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is invalid.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Reads and validates a JSON declaration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not validate.
pub fn load_declarations(path: &Path) -> Result<DeclarationSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    DeclarationSet::from_json(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn no_config_means_defaults() {
        assert_eq!(load_config(None).unwrap(), Config::default());
    }

    #[test]
    fn load_errors_name_the_file() {
        let path = std::env::temp_dir().join("kindgen-missing-declarations.json");
        let err = load_declarations(&path).unwrap_err();
        assert!(err.to_string().contains("kindgen-missing-declarations.json"));
    }

    #[test]
    fn reads_a_declaration_file() {
        let path = std::env::temp_dir().join(format!("kindgen-decls-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "declarations": [
                { "qualified_name": "com.example.Box", "type_parameters": ["A"] }
            ] }"#,
        )
        .unwrap();
        let set = load_declarations(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(set.len(), 1);
    }
}
