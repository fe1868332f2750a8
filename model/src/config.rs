//! TOML configuration: well-known names and the external classpath.
//!
//! ```toml
//! [names]
//! higher_kind = "org.example.HigherKind"
//!
//! [[classpath]]
//! name = "org.example.Higher1"
//! arity = 2
//! ```
//!
//! Every field is optional. When `classpath` is absent it is derived from the
//! configured names, so overriding a name moves its class along with it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::names::WellKnownNames;

/// An external class visible to the type registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    /// Fully-qualified class name.
    pub name: String,
    /// Number of type parameters.
    pub arity: usize,
}

/// Synthesizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Annotation and applier type names.
    pub names: WellKnownNames,
    /// Explicit classpath; `None` means "the configured names, all present".
    pub classpath: Option<Vec<ClassEntry>>,
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not match the schema or
    /// configures an empty name.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks that no configured name is empty.
    ///
    /// # Errors
    ///
    /// Returns the first empty name found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.names.entries() {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyName(field));
            }
        }
        if let Some(classpath) = &self.classpath {
            for (i, entry) in classpath.iter().enumerate() {
                if entry.name.trim().is_empty() {
                    return Err(ConfigError::EmptyClassName(i));
                }
            }
        }
        Ok(())
    }

    /// The effective classpath.
    #[must_use]
    pub fn classpath(&self) -> Vec<ClassEntry> {
        match &self.classpath {
            Some(entries) => entries.clone(),
            None => default_classpath(&self.names),
        }
    }
}

/// `Kind` plus the three appliers, each taking the witness as first argument.
#[must_use]
pub fn default_classpath(names: &WellKnownNames) -> Vec<ClassEntry> {
    vec![
        ClassEntry {
            name: names.kind.clone(),
            arity: 0,
        },
        ClassEntry {
            name: names.higher1.clone(),
            arity: 2,
        },
        ClassEntry {
            name: names.higher2.clone(),
            arity: 3,
        },
        ClassEntry {
            name: names.higher3.clone(),
            arity: 4,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.classpath().len(), 4);
    }

    #[test]
    fn overridden_name_moves_default_classpath() {
        let config = Config::from_toml_str(
            r#"
            [names]
            higher1 = "org.example.App1"
            "#,
        )
        .unwrap();
        assert_eq!(config.names.higher1, "org.example.App1");
        assert_eq!(config.names.higher2, "com.github.tonivade.purefun.Higher2");
        assert!(config
            .classpath()
            .iter()
            .any(|c| c.name == "org.example.App1" && c.arity == 2));
    }

    #[test]
    fn explicit_classpath_replaces_default() {
        let config = Config::from_toml_str(
            r#"
            [[classpath]]
            name = "com.github.tonivade.purefun.Higher1"
            arity = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.classpath().len(), 1);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Config::from_toml_str(
            r#"
            [names]
            kind = ""
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyName("kind")));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(matches!(
            Config::from_toml_str("names = 3"),
            Err(ConfigError::Toml(_))
        ));
    }
}
