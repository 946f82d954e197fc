//! # arch-test-core
//!
//! Core engine for dependency-conformance checks.
//!
//! This crate holds everything with algorithmic content: the cycle-safe
//! breadth-first [`Walker`] over the import graph, the rule evaluator
//! ([`run_check`]), chain rendering on [`Dependency`], and the wildcard
//! expansion orchestration. What a module imports is not decided here —
//! callers supply a [`ModuleResolver`] and [`PatternExpander`], and
//! failures flow to a [`ReportSink`].
//!
//! Most users want the fluent builder in the `arch-test` facade crate
//! rather than this crate directly.
//!
//! ## Example
//!
//! ```
//! use arch_test_core::{
//!     run_check, CheckConfig, CollectingSink, DependencyRule, MemoryModules,
//! };
//!
//! let modules = MemoryModules::new()
//!     .module("app", ["lib"])
//!     .module("lib", Vec::<String>::new());
//!
//! let sink = CollectingSink::new();
//! let config = CheckConfig {
//!     roots: vec!["app".to_string()],
//!     ..CheckConfig::default()
//! };
//!
//! let violations = run_check(
//!     &modules,
//!     &sink,
//!     &config,
//!     DependencyRule::Transitive,
//!     &["lib".to_string()],
//! );
//! assert_eq!(violations.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod memory;
mod pattern;
mod resolver;
mod sink;
mod types;
mod walker;

/// Declarative rule manifest (TOML) parsing.
pub mod declarative;

pub use checker::{run_check, CheckConfig};
pub use memory::MemoryModules;
pub use pattern::{expand_or_report, needs_expansion, ExpandError, PatternExpander, WILDCARD};
pub use resolver::{ModuleResolver, ResolveError, ResolvedModule};
pub use sink::{CollectingSink, ReportSink};
pub use types::{Dependency, DependencyRule, Violation};
pub use walker::{WalkEvent, Walker, FOREIGN_IMPORT};
