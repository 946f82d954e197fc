//! Breadth-first traversal of the import graph.
//!
//! The walker produces every module transitively reachable from a set of
//! roots exactly once, annotated with its first-arrival parent. Production
//! runs on a scoped thread and hands nodes to the consumer through a
//! rendezvous channel, so evaluation starts before the whole graph has
//! been explored while delivery stays in strict BFS discovery order.

use std::collections::{BTreeSet, VecDeque};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use crate::resolver::{ModuleResolver, ResolveError};
use crate::types::Dependency;

/// Sentinel identifier for foreign-function imports. Not a real module;
/// skipped without being emitted or expanded.
pub const FOREIGN_IMPORT: &str = "C";

/// One event produced by a traversal.
#[derive(Debug)]
pub enum WalkEvent {
    /// A newly discovered module, emitted at most once per traversal.
    Node(Arc<Dependency>),
    /// A module that could not be resolved. Its [`WalkEvent::Node`] was
    /// already emitted; it just produces no children.
    ResolutionFailure(ResolveError),
}

/// Breadth-first dependency-graph walker.
pub struct Walker<'a, R: ModuleResolver + ?Sized> {
    resolver: &'a R,
    excluded: &'a BTreeSet<String>,
    include_tests: bool,
}

impl<'a, R: ModuleResolver + ?Sized> Walker<'a, R> {
    /// Creates a walker over `resolver`.
    ///
    /// `excluded` identifiers are never traversed into: exclusion prunes
    /// the traversal itself, so everything reachable only through an
    /// excluded module disappears with it. Roots are subject to the same
    /// set.
    #[must_use]
    pub fn new(resolver: &'a R, excluded: &'a BTreeSet<String>, include_tests: bool) -> Self {
        Self {
            resolver,
            excluded,
            include_tests,
        }
    }

    /// Walks the graph from `roots`, invoking `on_event` for every event.
    ///
    /// The producer runs on its own scoped thread; `on_event` runs on the
    /// calling thread. The call returns once the traversal has completed —
    /// there is no cancellation primitive, and the visited set bounds the
    /// traversal on cyclic graphs.
    pub fn walk<F>(&self, roots: &[String], mut on_event: F)
    where
        F: FnMut(WalkEvent),
    {
        thread::scope(|scope| {
            let (tx, rx) = mpsc::sync_channel::<WalkEvent>(0);
            scope.spawn(move || self.produce(roots, &tx));
            for event in rx {
                on_event(event);
            }
        });
    }

    fn produce(&self, roots: &[String], events: &mpsc::SyncSender<WalkEvent>) {
        let mut visited: BTreeSet<String> = BTreeSet::new();
        let mut queue: VecDeque<Arc<Dependency>> = roots
            .iter()
            .map(|root| Arc::new(Dependency::root(root.clone())))
            .collect();

        while let Some(dep) = queue.pop_front() {
            if self.skip(&visited, &dep.name) {
                continue;
            }
            visited.insert(dep.name.clone());

            // A send failing means the consumer is gone; stop producing.
            if events.send(WalkEvent::Node(Arc::clone(&dep))).is_err() {
                return;
            }

            let resolved = match self.resolver.resolve(&dep.name) {
                Ok(resolved) => resolved,
                Err(err) => {
                    warn!(module = %dep.name, "resolution failed");
                    if events.send(WalkEvent::ResolutionFailure(err)).is_err() {
                        return;
                    }
                    continue;
                }
            };

            // Standard-library internals are numerous and uninteresting to
            // conformance checks: emit the module, never expand it.
            if resolved.is_std {
                debug!(module = %dep.name, "standard library module, not expanding");
                continue;
            }

            for import in &resolved.imports {
                queue.push_back(Arc::new(Dependency::imported(
                    import.as_str(),
                    Arc::clone(&dep),
                )));
            }

            if self.include_tests {
                for import in &resolved.test_imports {
                    queue.push_back(Arc::new(Dependency::imported(
                        import.as_str(),
                        Arc::clone(&dep),
                    )));
                }

                if !resolved.external_test_imports.is_empty() {
                    let test_parent = Arc::new(dep.as_test_variant());
                    for import in &resolved.external_test_imports {
                        queue.push_back(Arc::new(Dependency::imported(
                            import.as_str(),
                            Arc::clone(&test_parent),
                        )));
                    }
                }
            }
        }
    }

    fn skip(&self, visited: &BTreeSet<String>, name: &str) -> bool {
        name == FOREIGN_IMPORT || self.excluded.contains(name) || visited.contains(name)
    }
}
