//! Transitive dependency closure.
//!
//! [`PackageLoader::initialize`](crate::PackageLoader::initialize) does not
//! follow dependencies. Hosts that want every module a set of roots needs
//! flatten the graph first with [`resolve_closure`] and pass the result in.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::loader::DependencyGraph;
use crate::profile::Profile;
use crate::types::Dependency;

/// Breadth-first closure of `roots` for `profile`.
///
/// Each package id appears once; the first occurrence wins, so a root or a
/// shallower dependency decides the version over deeper ones. Roots whose
/// package is not installed are left out.
pub fn resolve_closure<G: DependencyGraph + ?Sized>(
    graph: &G,
    roots: &[Dependency],
    profile: &Profile,
) -> Vec<Dependency> {
    let mut seen = HashSet::new();
    let mut queue: VecDeque<Dependency> = VecDeque::new();
    let mut closure = Vec::new();

    for root in roots {
        if seen.insert(root.name.to_lowercase()) {
            queue.push_back(root.clone());
        }
    }

    while let Some(dependency) = queue.pop_front() {
        let Some(children) = graph.dependencies(
            &dependency.name,
            dependency.version.as_ref(),
            profile,
        ) else {
            debug!(dependency = %dependency, "package not installed, leaving out of closure");
            continue;
        };

        for child in children {
            if seen.insert(child.name.to_lowercase()) {
                queue.push_back(child);
            }
        }
        closure.push(dependency);
    }

    closure
}
