//! Type hierarchy on petgraph: subtype → supertype edges, BFS for transitive
//! subtypes.

use std::collections::VecDeque;

use affinity_core::{DeclarationId, FxHashMap, FxHashSet};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

/// Directed graph of types. An edge `a → b` means `a` directly extends or
/// implements `b`.
#[derive(Debug, Default)]
pub struct TypeHierarchy {
    graph: DiGraph<DeclarationId, ()>,
    nodes: FxHashMap<DeclarationId, NodeIndex>,
}

impl TypeHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(&mut self, id: DeclarationId) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id);
        self.nodes.insert(id, idx);
        idx
    }

    pub fn add_supertype(&mut self, subtype: DeclarationId, supertype: DeclarationId) {
        let sub = self.add_type(subtype);
        let sup = self.add_type(supertype);
        if !self.graph.contains_edge(sub, sup) {
            self.graph.add_edge(sub, sup, ());
        }
    }

    /// Every type that extends `ty`, directly or transitively, sorted by id.
    pub fn transitive_subtypes(&self, ty: DeclarationId) -> Vec<DeclarationId> {
        let Some(&start_idx) = self.nodes.get(&ty) else {
            return Vec::new();
        };
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        let mut result = Vec::new();

        visited.insert(start_idx);
        queue.push_back(start_idx);

        while let Some(node) = queue.pop_front() {
            if node != start_idx {
                result.push(self.graph[node]);
            }
            for neighbor in self.graph.neighbors_directed(node, Direction::Incoming) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        result.sort_unstable();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> DeclarationId {
        DeclarationId(n)
    }

    #[test]
    fn transitive_subtypes_follow_chains_and_diamonds() {
        // 4 → 2 → 1, 4 → 3 → 1, 5 → 4
        let mut h = TypeHierarchy::new();
        h.add_supertype(id(2), id(1));
        h.add_supertype(id(3), id(1));
        h.add_supertype(id(4), id(2));
        h.add_supertype(id(4), id(3));
        h.add_supertype(id(5), id(4));

        assert_eq!(h.transitive_subtypes(id(1)), vec![id(2), id(3), id(4), id(5)]);
        assert_eq!(h.transitive_subtypes(id(4)), vec![id(5)]);
        assert!(h.transitive_subtypes(id(5)).is_empty());
    }

    #[test]
    fn cycles_terminate() {
        let mut h = TypeHierarchy::new();
        h.add_supertype(id(1), id(2));
        h.add_supertype(id(2), id(1));
        assert_eq!(h.transitive_subtypes(id(1)), vec![id(2)]);
    }

    #[test]
    fn unknown_type_has_no_relatives() {
        let h = TypeHierarchy::new();
        assert!(h.transitive_subtypes(id(9)).is_empty());
    }

    #[test]
    fn duplicate_edges_are_collapsed() {
        let mut h = TypeHierarchy::new();
        h.add_supertype(id(2), id(1));
        h.add_supertype(id(2), id(1));
        assert_eq!(h.graph.edge_count(), 1);
        assert_eq!(h.transitive_subtypes(id(1)), vec![id(2)]);
    }
}
