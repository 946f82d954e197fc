//! A programmable in-memory module graph.
//!
//! Implements both [`ModuleResolver`] and [`PatternExpander`] so checks can
//! run against a hypothetical graph with no build system behind it. Used by
//! this crate's own tests and exported for downstream test authors.

use std::collections::BTreeMap;

use crate::pattern::{ExpandError, PatternExpander, WILDCARD};
use crate::resolver::{ModuleResolver, ResolveError, ResolvedModule};

/// An in-memory module graph built up one module at a time.
///
/// Identifiers that were never registered fail to resolve, exactly like a
/// package that does not exist in a real build.
///
/// ```
/// use arch_test_core::MemoryModules;
///
/// let modules = MemoryModules::new()
///     .module("app", ["app/domain"])
///     .module("app/domain", Vec::<String>::new());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryModules {
    modules: BTreeMap<String, ResolvedModule>,
}

impl MemoryModules {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module with its production imports.
    #[must_use]
    pub fn module<I, T>(mut self, name: &str, imports: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.entry(name).imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the test-only imports of a module, registering it if needed.
    #[must_use]
    pub fn test_imports<I, T>(mut self, name: &str, imports: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.entry(name).test_imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the external-test-scope imports of a module, registering it if
    /// needed.
    #[must_use]
    pub fn external_test_imports<I, T>(mut self, name: &str, imports: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.entry(name).external_test_imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Registers a standard-library module: resolvable, never expanded.
    #[must_use]
    pub fn std_module(mut self, name: &str) -> Self {
        self.entry(name).is_std = true;
        self
    }

    fn entry(&mut self, name: &str) -> &mut ResolvedModule {
        self.modules.entry(name.to_string()).or_default()
    }

    fn matches(&self, prefix: &str) -> Vec<String> {
        self.modules
            .keys()
            .filter(|name| {
                name.as_str() == prefix
                    || (name.starts_with(prefix) && name.as_bytes().get(prefix.len()) == Some(&b'/'))
            })
            .cloned()
            .collect()
    }
}

impl ModuleResolver for MemoryModules {
    fn resolve(&self, module: &str) -> Result<ResolvedModule, ResolveError> {
        self.modules
            .get(module)
            .cloned()
            .ok_or_else(|| ResolveError::new(module, "module is not part of the configured graph"))
    }
}

impl PatternExpander for MemoryModules {
    /// Expands `prefix/...` to the prefix module and everything registered
    /// under it. Exact identifiers pass through verbatim, matching real
    /// expanders that accept not-yet-known exact names.
    fn expand(&self, patterns: &[String]) -> Result<Vec<String>, ExpandError> {
        let mut expanded = Vec::new();
        for pattern in patterns {
            if let Some(prefix) = pattern.strip_suffix(&format!("/{WILDCARD}")) {
                let matched = self.matches(prefix);
                if matched.is_empty() {
                    return Err(ExpandError::NoMatch {
                        patterns: vec![pattern.clone()],
                    });
                }
                expanded.extend(matched);
            } else if pattern.contains(WILDCARD) {
                return Err(ExpandError::Failed {
                    patterns: vec![pattern.clone()],
                    reason: "only trailing `/...` wildcards are supported".to_string(),
                });
            } else {
                expanded.push(pattern.clone());
            }
        }
        Ok(expanded)
    }
}
