//! # arch-test
//!
//! Dependency-conformance checks for test suites: assert that a set of
//! modules never depends on another set, and get the exact import chain
//! when the rule is broken.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! // tests/architecture.rs
//! use arch_test::{Check, CollectingSink};
//!
//! let sink = CollectingSink::new();
//! Check::packages(&modules, &sink, ["myapp/domain/..."])
//!     .excluding(["myapp/domain/testkit"])
//!     .should_not_depend_on(["myapp/infra/..."]);
//!
//! assert!(sink.is_empty(), "{}", sink.messages().join("\n"));
//! ```
//!
//! `modules` is anything implementing [`ModuleResolver`] and
//! [`PatternExpander`] — the resolution of "what does this module import"
//! is deliberately pluggable. [`MemoryModules`] ships with the crate for
//! modelling graphs directly.
//!
//! ## Declarative rules
//!
//! Layering rules can also live in an `arch-test.toml` manifest and run in
//! one call:
//!
//! ```rust,ignore
//! let violations = arch_test::run_manifest_file(&modules, &sink, project_root)?;
//! ```

#![forbid(unsafe_code)]

pub use arch_test_core::*;

mod check;
mod runner;

pub use check::Check;
pub use runner::{run_manifest, run_manifest_file};
