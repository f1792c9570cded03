//! Reference-parameter aliasing: per-call undirected adjacency between a
//! by-reference formal and the plain-variable actual it was bound to, plus
//! the transitive-closure walk `spec.md` §4.3 specifies for assignment
//! propagation.
//!
//! There is no teacher equivalent for this exact mechanism (Python has no
//! by-reference parameters), so this module is grounded on the general
//! adjacency-map shape the teacher uses elsewhere for graph-like lookup
//! tables (`examples/scostello-monty/crates/monty/src/namespace.rs`'s
//! `HashMap`-backed indices), built out to the undirected-graph semantics
//! `spec.md` actually asks for.

use std::collections::{HashMap, HashSet};

/// One call's alias graph: name → the other names it is linked to.
#[derive(Debug, Default, Clone)]
pub struct AliasTable {
    edges: HashMap<String, Vec<String>>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph for one call from its (formal, actual) pairs:
    /// whenever a formal is a reference parameter and its actual argument
    /// expression was a plain variable, an undirected edge links the two
    /// names. Formals that share the same actual become mutual neighbors
    /// transitively (`spec.md` §4.3), which falls out of the graph walk in
    /// [`Self::reachable`] rather than needing to be built explicitly here.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut table = Self::new();
        for (formal, actual) in pairs {
            table.add_edge(formal, actual);
        }
        table
    }

    fn add_edge(&mut self, a: String, b: String) {
        self.edges.entry(a.clone()).or_default().push(b.clone());
        self.edges.entry(b).or_default().push(a);
    }

    /// The transitive closure of `name` in this graph, excluding `name`
    /// itself (`spec.md` §4.3: "compute the transitive closure of `x` ...
    /// excluding `x` itself").
    pub fn reachable(&self, name: &str) -> HashSet<String> {
        let mut seen = HashSet::new();
        let mut stack = vec![name.to_owned()];
        while let Some(current) = stack.pop() {
            let Some(neighbors) = self.edges.get(&current) else {
                continue;
            };
            for neighbor in neighbors {
                if neighbor != name && seen.insert(neighbor.clone()) {
                    stack.push(neighbor.clone());
                }
            }
        }
        seen
    }
}
