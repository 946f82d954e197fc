//! Executes declarative manifests against a module graph.

use std::path::Path;

use arch_test_core::declarative::{Manifest, ManifestError};
use arch_test_core::{DependencyRule, ModuleResolver, PatternExpander, ReportSink, Violation};
use tracing::{debug, info};

use crate::check::Check;

/// Manifest file names to search for, in priority order.
const MANIFEST_CANDIDATES: &[&str] = &["arch-test.toml", ".arch-test.toml"];

/// Runs every rule of a parsed manifest, in file order.
///
/// Violations are reported to the sink as each check finds them, and all
/// of them are returned.
pub fn run_manifest<M, S>(modules: &M, sink: &S, manifest: &Manifest) -> Vec<Violation>
where
    M: ModuleResolver + PatternExpander + ?Sized,
    S: ReportSink + ?Sized,
{
    let mut violations = Vec::new();

    for (index, rule) in manifest.rules.iter().enumerate() {
        debug!(rule = index, name = ?rule.name, "running manifest rule");

        let mut check = Check::packages(modules, sink, rule.packages.iter().cloned());
        if rule.include_tests {
            check = check.include_tests();
        }
        if !rule.exclude.is_empty() {
            check = check.excluding(rule.exclude.iter().cloned());
        }

        let found = match rule.rule() {
            DependencyRule::Direct => {
                check.should_not_directly_depend_on(rule.targets.iter().cloned())
            }
            DependencyRule::Transitive => check.should_not_depend_on(rule.targets.iter().cloned()),
        };
        violations.extend(found);
    }

    info!(
        rules = manifest.rules.len(),
        violations = violations.len(),
        "manifest run complete"
    );
    violations
}

/// Discovers and runs a manifest under `root`.
///
/// Looks for `arch-test.toml`, then `.arch-test.toml`; the first match
/// wins. A missing manifest is not an error — there are simply no rules
/// to run.
///
/// # Errors
///
/// Returns [`ManifestError`] if the file cannot be read or parsed.
pub fn run_manifest_file<M, S>(
    modules: &M,
    sink: &S,
    root: &Path,
) -> Result<Vec<Violation>, ManifestError>
where
    M: ModuleResolver + PatternExpander + ?Sized,
    S: ReportSink + ?Sized,
{
    for candidate in MANIFEST_CANDIDATES {
        let path = root.join(candidate);
        if path.exists() {
            let content =
                std::fs::read_to_string(&path).map_err(|source| ManifestError::Io {
                    path: path.clone(),
                    source,
                })?;
            let manifest = Manifest::parse(&content)?;
            return Ok(run_manifest(modules, sink, &manifest));
        }
    }

    debug!(root = %root.display(), "no manifest found");
    Ok(Vec::new())
}
