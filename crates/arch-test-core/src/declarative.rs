//! Declarative dependency rules loaded from a TOML manifest.
//!
//! ```toml
//! [[deny-dependency]]
//! name = "domain-isolation"
//! packages = ["app/domain/..."]
//! targets = ["app/infra/..."]
//! exclude = ["app/domain/testkit"]
//! include-tests = true
//! direct = false
//! ```
//!
//! This module only parses and validates; executing the rules against a
//! module graph is the facade crate's job.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::types::DependencyRule;

/// A parsed, validated rule manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// The declared dependency rules, in file order.
    #[serde(default, rename = "deny-dependency")]
    pub rules: Vec<DenyDependency>,
}

/// One `[[deny-dependency]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DenyDependency {
    /// Optional label used in error messages.
    #[serde(default)]
    pub name: Option<String>,
    /// Root specifiers the check starts from.
    pub packages: Vec<String>,
    /// Forbidden target specifiers.
    pub targets: Vec<String>,
    /// Specifiers excluded from traversal.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Whether test-scope imports are followed.
    #[serde(default)]
    pub include_tests: bool,
    /// When true, only direct imports of a root can violate.
    #[serde(default)]
    pub direct: bool,
}

impl DenyDependency {
    /// The depth rule this declaration selects.
    #[must_use]
    pub fn rule(&self) -> DependencyRule {
        if self.direct {
            DependencyRule::Direct
        } else {
            DependencyRule::Transitive
        }
    }

    fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("deny-dependency[{index}]"))
    }
}

/// Errors loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest is not valid TOML.
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    /// A rule is structurally valid TOML but semantically incomplete.
    #[error("rule `{rule}`: {reason}")]
    Invalid {
        /// The rule's label (or positional fallback).
        rule: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The manifest file could not be read.
    #[error("failed to read manifest from {}: {source}", .path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

impl Manifest {
    /// Parses and validates a manifest from TOML content.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] on invalid TOML or on a rule with an
    /// empty `packages` or `targets` list.
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), ManifestError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.packages.is_empty() {
                return Err(ManifestError::Invalid {
                    rule: rule.label(index),
                    reason: "`packages` must not be empty".to_string(),
                });
            }
            if rule.targets.is_empty() {
                return Err(ManifestError::Invalid {
                    rule: rule.label(index),
                    reason: "`targets` must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
