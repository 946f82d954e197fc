//! Wildcard specifier expansion.
//!
//! Specifier lists may mix exact module identifiers and wildcard patterns.
//! Only lists that actually contain the wildcard marker are sent through
//! the expander; exact lists pass through untouched, avoiding resolver
//! round-trips for the common case.

use thiserror::Error;
use tracing::debug;

use crate::sink::ReportSink;

/// The multi-segment wildcard marker recognized in specifiers,
/// e.g. `app/domain/...` for "the domain module and everything under it".
pub const WILDCARD: &str = "...";

/// Expands wildcard specifiers to the concrete module identifiers they
/// match.
///
/// External collaborator: the engine only decides *whether* to call it
/// (see [`needs_expansion`]) and how to degrade when it fails.
pub trait PatternExpander: Send + Sync {
    /// Expands `patterns` to concrete module identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandError`] when a wildcard matches nothing or the
    /// underlying resolver fails.
    fn expand(&self, patterns: &[String]) -> Result<Vec<String>, ExpandError>;
}

/// Pattern expansion failed.
///
/// Reported to the sink; the engine substitutes an empty identifier list,
/// so a root set that fails to expand produces zero traversal roots and a
/// target set that fails to expand can never be matched. Either way the
/// failure itself has already been flagged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExpandError {
    /// A wildcard pattern matched no known modules.
    #[error("patterns {patterns:?} did not match any modules")]
    NoMatch {
        /// The patterns that matched nothing.
        patterns: Vec<String>,
    },

    /// The underlying resolver failed while expanding.
    #[error("failed to expand patterns {patterns:?}: {reason}")]
    Failed {
        /// The patterns being expanded.
        patterns: Vec<String>,
        /// Resolver-provided explanation.
        reason: String,
    },
}

/// Whether a specifier list needs expansion at all.
#[must_use]
pub fn needs_expansion(patterns: &[String]) -> bool {
    patterns.iter().any(|p| p.contains(WILDCARD))
}

/// Expands `patterns`, reporting failures to the sink.
///
/// Exact-identifier lists are returned verbatim without consulting the
/// expander. Expansion failures are reported once and yield an empty list.
pub fn expand_or_report<E, S>(expander: &E, sink: &S, patterns: &[String]) -> Vec<String>
where
    E: PatternExpander + ?Sized,
    S: ReportSink + ?Sized,
{
    if !needs_expansion(patterns) {
        return patterns.to_vec();
    }

    match expander.expand(patterns) {
        Ok(expanded) => {
            debug!(
                patterns = patterns.len(),
                expanded = expanded.len(),
                "expanded wildcard specifiers"
            );
            expanded
        }
        Err(err) => {
            sink.report(&err.to_string());
            Vec::new()
        }
    }
}
