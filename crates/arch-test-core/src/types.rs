//! Core types for dependency checks: discovered nodes, rules, violations.

use std::fmt;
use std::sync::Arc;

/// One discovered edge-traversal event in the import graph.
///
/// Each dependency keeps an owning reference to the node it was first
/// discovered through, forming a tree rooted at each check root. Even when
/// the true import graph has diamonds, every module is visited once and
/// keeps only its first-arrival parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Module identifier. Opaque to the engine; equality is exact string match.
    pub name: String,
    /// The node that imported this one, or `None` for a traversal root.
    pub parent: Option<Arc<Dependency>>,
    /// True when this entry stands for the external test variant of the
    /// module (imports made from a `_test` companion rather than the
    /// production sources). Only affects chain rendering.
    pub via_test_scope: bool,
}

impl Dependency {
    /// Creates a traversal root (no parent, depth 0).
    #[must_use]
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            via_test_scope: false,
        }
    }

    /// Creates a node discovered through `parent`'s imports.
    #[must_use]
    pub fn imported(name: impl Into<String>, parent: Arc<Dependency>) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
            via_test_scope: false,
        }
    }

    /// Returns a copy of this node marked as its external test variant.
    ///
    /// Used as the parent of edges discovered through external test
    /// imports: the chain then shows `name_test` importing the child,
    /// rather than the production module itself.
    #[must_use]
    pub fn as_test_variant(&self) -> Self {
        Self {
            name: self.name.clone(),
            parent: self.parent.clone(),
            via_test_scope: true,
        }
    }

    /// Distance from the traversal root. Roots have depth 0, their direct
    /// imports depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent.as_deref();
        while let Some(dep) = current {
            depth += 1;
            current = dep.parent.as_deref();
        }
        depth
    }

    /// The name as rendered in a chain: test-scope entries get a `_test`
    /// suffix to distinguish them from the module's production identity.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.via_test_scope {
            format!("{}_test", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Renders the root-to-node import chain.
    ///
    /// The root appears on the first line; every subsequent step is on its
    /// own line, indented by one additional tab per depth level, with a
    /// trailing newline after the final entry.
    #[must_use]
    pub fn chain(&self) -> String {
        let mut entries = Vec::new();
        let mut current = Some(self);
        while let Some(dep) = current {
            entries.push(dep.display_name());
            current = dep.parent.as_deref();
        }
        entries.reverse();

        let mut out = String::new();
        for (depth, name) in entries.iter().enumerate() {
            for _ in 0..depth {
                out.push('\t');
            }
            out.push_str(name);
            out.push('\n');
        }
        out
    }
}

/// How deep a forbidden target may sit before it counts as a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyRule {
    /// Any reachable occurrence of a forbidden target violates (depth >= 1).
    Transitive,
    /// Only direct imports of a root violate (depth exactly 1).
    Direct,
}

impl DependencyRule {
    /// Whether a node at this dependency's depth can violate the rule.
    ///
    /// Roots themselves (depth 0) are filtered out by the evaluator before
    /// this is consulted.
    #[must_use]
    pub fn admits(self, dependency: &Dependency) -> bool {
        match self {
            Self::Transitive => true,
            Self::Direct => dependency.depth() <= 1,
        }
    }
}

impl fmt::Display for DependencyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transitive => write!(f, "transitive"),
            Self::Direct => write!(f, "direct"),
        }
    }
}

/// A detected forbidden dependency: the offending node (carrying its full
/// parent chain) and the forbidden target it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The node whose identifier matched a forbidden target.
    pub dependency: Arc<Dependency>,
    /// The target identifier that was matched.
    pub target: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(dependency: Arc<Dependency>, target: impl Into<String>) -> Self {
        Self {
            dependency,
            target: target.into(),
        }
    }

    /// The rendered import chain explaining how the target was reached.
    #[must_use]
    pub fn trace(&self) -> String {
        self.dependency.chain()
    }

    /// The root module this violation's chain starts from.
    #[must_use]
    pub fn root(&self) -> &str {
        let mut current = self.dependency.as_ref();
        while let Some(parent) = current.parent.as_deref() {
            current = parent;
        }
        &current.name
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "forbidden dependency:\n{}", self.trace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_deep() -> Arc<Dependency> {
        let root = Arc::new(Dependency::root("app"));
        let lib = Arc::new(Dependency::imported("lib", root));
        Arc::new(Dependency::imported("net/deprecated", lib))
    }

    #[test]
    fn root_has_depth_zero() {
        assert_eq!(Dependency::root("app").depth(), 0);
    }

    #[test]
    fn depth_counts_parent_chain() {
        assert_eq!(three_deep().depth(), 2);
    }

    #[test]
    fn chain_indents_one_tab_per_level() {
        assert_eq!(three_deep().chain(), "app\n\tlib\n\t\tnet/deprecated\n");
    }

    #[test]
    fn chain_of_root_is_single_line() {
        assert_eq!(Dependency::root("app").chain(), "app\n");
    }

    #[test]
    fn test_variant_renders_with_suffix() {
        let root = Arc::new(Dependency::root("app"));
        let variant = Arc::new(root.as_test_variant());
        let dep = Dependency::imported("helper", variant);
        assert_eq!(dep.chain(), "app_test\n\thelper\n");
    }

    #[test]
    fn test_variant_keeps_depth() {
        let root = Arc::new(Dependency::root("app"));
        let lib = Arc::new(Dependency::imported("lib", root));
        assert_eq!(lib.as_test_variant().depth(), lib.depth());
    }

    #[test]
    fn direct_rule_admits_depth_one_only() {
        let root = Arc::new(Dependency::root("app"));
        let direct = Arc::new(Dependency::imported("db", Arc::clone(&root)));
        let deep = Dependency::imported("driver", Arc::clone(&direct));

        assert!(DependencyRule::Direct.admits(&direct));
        assert!(!DependencyRule::Direct.admits(&deep));
        assert!(DependencyRule::Transitive.admits(&deep));
    }

    #[test]
    fn violation_root_walks_to_chain_start() {
        let violation = Violation::new(three_deep(), "net/deprecated");
        assert_eq!(violation.root(), "app");
    }

    #[test]
    fn violation_display_contains_chain() {
        let violation = Violation::new(three_deep(), "net/deprecated");
        let rendered = violation.to_string();
        assert!(rendered.ends_with("app\n\tlib\n\t\tnet/deprecated\n"));
    }
}
