//! The fluent check builder.

use arch_test_core::{
    expand_or_report, run_check, CheckConfig, DependencyRule, ModuleResolver, PatternExpander,
    ReportSink, Violation,
};

/// A dependency check under construction.
///
/// Configuration methods consume the check and return the updated value,
/// so a partially configured check can be cloned and branched without the
/// branches sharing state:
///
/// ```
/// use arch_test::{Check, CollectingSink, MemoryModules};
///
/// let modules = MemoryModules::new()
///     .module("app", ["db"])
///     .module("db", Vec::<String>::new());
/// let sink = CollectingSink::new();
///
/// let base = Check::packages(&modules, &sink, ["app"]);
/// base.clone().excluding(["db"]).should_not_depend_on(["db"]);
/// assert!(sink.is_empty());
///
/// base.should_not_depend_on(["db"]);
/// assert!(!sink.is_empty());
/// ```
pub struct Check<'a, M: ?Sized, S: ?Sized> {
    modules: &'a M,
    sink: &'a S,
    config: CheckConfig,
}

// Derived Clone would demand `M: Clone` even though only references are
// held, so spell it out.
impl<M: ?Sized, S: ?Sized> Clone for Check<'_, M, S> {
    fn clone(&self) -> Self {
        Self {
            modules: self.modules,
            sink: self.sink,
            config: self.config.clone(),
        }
    }
}

impl<'a, M, S> Check<'a, M, S>
where
    M: ModuleResolver + PatternExpander + ?Sized,
    S: ReportSink + ?Sized,
{
    /// Starts a check rooted at the given module specifiers.
    ///
    /// Roots may contain wildcards; they are expanded when an assertion
    /// runs. Violations and errors are reported to `sink`.
    pub fn packages<I, T>(modules: &'a M, sink: &'a S, roots: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            modules,
            sink,
            config: CheckConfig {
                roots: roots.into_iter().map(Into::into).collect(),
                ..CheckConfig::default()
            },
        }
    }

    /// Also follows test-scope imports during traversal.
    #[must_use]
    pub fn include_tests(mut self) -> Self {
        self.config.include_tests = true;
        self
    }

    /// Excludes the given specifiers from traversal. Cumulative: each call
    /// expands its patterns immediately and unions them into the exclusion
    /// set. Excluding a module also excludes everything reachable only
    /// through it.
    #[must_use]
    pub fn excluding<I, T>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        self.config
            .excluded
            .extend(expand_or_report(self.modules, self.sink, &patterns));
        self
    }

    /// Asserts that no root depends on any of `targets`, at any depth.
    ///
    /// Every violation found is reported to the sink and returned.
    pub fn should_not_depend_on<I, T>(&self, targets: I) -> Vec<Violation>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.run(DependencyRule::Transitive, targets)
    }

    /// Asserts that no root *directly* imports any of `targets`. Deeper
    /// matches are ignored.
    pub fn should_not_directly_depend_on<I, T>(&self, targets: I) -> Vec<Violation>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.run(DependencyRule::Direct, targets)
    }

    fn run<I, T>(&self, rule: DependencyRule, targets: I) -> Vec<Violation>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let targets: Vec<String> = targets.into_iter().map(Into::into).collect();
        run_check(self.modules, self.sink, &self.config, rule, &targets)
    }
}
