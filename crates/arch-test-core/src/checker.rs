//! Rule evaluation over the walker's node stream.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::pattern::{expand_or_report, PatternExpander};
use crate::resolver::ModuleResolver;
use crate::sink::ReportSink;
use crate::types::{DependencyRule, Violation};
use crate::walker::{WalkEvent, Walker};

/// Inputs assembled by a check builder: roots, the accumulated exclusion
/// set (already pattern-expanded) and the test-scope toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckConfig {
    /// Root specifiers traversal starts from. Expanded at check time.
    pub roots: Vec<String>,
    /// Module identifiers never traversed into and never used as roots.
    pub excluded: BTreeSet<String>,
    /// Whether test-scope imports are followed.
    pub include_tests: bool,
}

/// Runs one dependency check: walks the graph from the configured roots
/// and raises a violation for every reachable node that matches a
/// forbidden target and passes the rule's depth filter.
///
/// Each violation is reported to the sink as it is found and also
/// collected into the returned list. Resolution and expansion failures go
/// to the same sink; the check always runs the traversal to completion,
/// so every reachable violation is reported.
pub fn run_check<M, S>(
    modules: &M,
    sink: &S,
    config: &CheckConfig,
    rule: DependencyRule,
    targets: &[String],
) -> Vec<Violation>
where
    M: ModuleResolver + PatternExpander + ?Sized,
    S: ReportSink + ?Sized,
{
    let roots = expand_or_report(modules, sink, &config.roots);
    let target_set: BTreeSet<String> = expand_or_report(modules, sink, targets)
        .into_iter()
        .collect();

    debug!(
        roots = roots.len(),
        targets = target_set.len(),
        %rule,
        include_tests = config.include_tests,
        "running dependency check"
    );

    let walker = Walker::new(modules, &config.excluded, config.include_tests);
    let mut violations = Vec::new();

    walker.walk(&roots, |event| match event {
        WalkEvent::Node(dep) => {
            // Roots themselves never violate; only reached nodes do.
            if dep.parent.is_some() && target_set.contains(&dep.name) && rule.admits(&dep) {
                let target = dep.name.clone();
                let violation = Violation::new(dep, target);
                sink.report(&violation.to_string());
                violations.push(violation);
            }
        }
        WalkEvent::ResolutionFailure(err) => sink.report(&err.to_string()),
    });

    info!(violations = violations.len(), "dependency check complete");
    violations
}
