//! The module-resolution seam.
//!
//! The engine never parses source files or evaluates build metadata itself.
//! Everything it knows about the import graph comes through
//! [`ModuleResolver`], which callers back with their build system of choice.

use thiserror::Error;

/// Resolves a module identifier to its direct imports.
///
/// Implementations are treated as pure, idempotent queries: the engine does
/// not retry failed resolutions and may call `resolve` once per module per
/// check. `Send + Sync` because resolution runs on the traversal thread.
pub trait ModuleResolver: Send + Sync {
    /// Resolves `module` to its imports and metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the identifier does not correspond to
    /// a real, buildable module.
    fn resolve(&self, module: &str) -> Result<ResolvedModule, ResolveError>;
}

/// The imports and metadata of one resolved module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedModule {
    /// Production imports.
    pub imports: Vec<String>,
    /// Imports made only from the module's own test sources.
    pub test_imports: Vec<String>,
    /// Imports made from the module's external test companion
    /// (the `_test` variant of the module).
    pub external_test_imports: Vec<String>,
    /// Whether this module belongs to the standard/platform library.
    /// Standard-library modules are reported but never expanded.
    pub is_std: bool,
}

impl ResolvedModule {
    /// Creates a resolved module with the given production imports.
    #[must_use]
    pub fn new<I, T>(imports: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            imports: imports.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the test-only imports.
    #[must_use]
    pub fn with_test_imports<I, T>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.test_imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the external-test-scope imports.
    #[must_use]
    pub fn with_external_test_imports<I, T>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.external_test_imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Marks this module as part of the standard/platform library.
    #[must_use]
    pub fn std_library(mut self) -> Self {
        self.is_std = true;
        self
    }
}

/// A module identifier could not be resolved to a buildable unit.
///
/// Reported to the sink; traversal continues without the node's children.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to resolve module `{module}`: {reason}")]
pub struct ResolveError {
    /// The identifier that failed to resolve.
    pub module: String,
    /// Resolver-provided explanation.
    pub reason: String,
}

impl ResolveError {
    /// Creates a new resolution error.
    #[must_use]
    pub fn new(module: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_module_builder_sets_scopes() {
        let module = ResolvedModule::new(["lib"])
            .with_test_imports(["testkit"])
            .with_external_test_imports(["blackbox"]);

        assert_eq!(module.imports, vec!["lib"]);
        assert_eq!(module.test_imports, vec!["testkit"]);
        assert_eq!(module.external_test_imports, vec!["blackbox"]);
        assert!(!module.is_std);
    }

    #[test]
    fn std_library_flag() {
        assert!(ResolvedModule::new(Vec::<String>::new()).std_library().is_std);
    }

    #[test]
    fn resolve_error_display_names_the_module() {
        let err = ResolveError::new("app/missing", "no such package");
        assert_eq!(
            err.to_string(),
            "failed to resolve module `app/missing`: no such package"
        );
    }
}
