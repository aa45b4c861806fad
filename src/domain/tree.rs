use crate::domain::error::SteinerResult;
use crate::domain::graph::{Cost, CostGraph};
use crate::domain::path::MinCostPath;
use petgraph::algo::connected_components;
use petgraph::graph::NodeIndex;
use petgraph::graphmap::UnGraphMap;
use std::collections::BTreeSet;

/// A connected subgraph of the original graph, tagged with the terminal that
/// represents it in the tree pool.
///
/// Edges are stored with the smaller node first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteinerTree {
    terminal: NodeIndex,
    nodes: BTreeSet<NodeIndex>,
    edges: BTreeSet<(NodeIndex, NodeIndex)>,
}

impl SteinerTree {
    pub fn singleton(terminal: NodeIndex) -> Self {
        Self {
            terminal,
            nodes: BTreeSet::from([terminal]),
            edges: BTreeSet::new(),
        }
    }

    pub fn terminal(&self) -> NodeIndex {
        self.terminal
    }

    pub fn nodes(&self) -> &BTreeSet<NodeIndex> {
        &self.nodes
    }

    pub fn edges(&self) -> &BTreeSet<(NodeIndex, NodeIndex)> {
        &self.edges
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.nodes.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at position `index` (modulo the tree size) in ascending id order.
    ///
    /// Reserved for seeded sampling strategies; the greedy merge always
    /// connects trees through their terminals.
    pub fn pick_node(&self, index: usize) -> NodeIndex {
        self.nodes
            .iter()
            .nth(index % self.nodes.len())
            .copied()
            .unwrap_or(self.terminal)
    }

    /// Join `other` to this tree along `path`.
    ///
    /// The path's interior nodes become part of the tree, wired as a chain by
    /// the path links; the last link closes the connection into `other`.
    /// The merged tree keeps this tree's terminal.
    pub fn merge(mut self, other: SteinerTree, path: &MinCostPath) -> SteinerTree {
        self.nodes.extend(path.interior().iter().copied());
        for &(a, b) in &path.links {
            self.edges.insert(if a < b { (a, b) } else { (b, a) });
        }
        self.absorb(other)
    }

    /// Union with a tree that is already attached to this one through edges
    /// added by an earlier merge.
    pub fn absorb(mut self, other: SteinerTree) -> SteinerTree {
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
        self
    }

    /// Total cost of the tree's nodes in `graph`, each node counted once.
    pub fn cost_in(&self, graph: &CostGraph) -> SteinerResult<Cost> {
        graph.total_cost(self.nodes.iter().copied())
    }

    /// Whether the node and edge sets actually form a tree: connected, and
    /// exactly one edge fewer than nodes, with every edge inside the node set.
    pub fn is_tree(&self) -> bool {
        if self.edges.len() + 1 != self.nodes.len() {
            return false;
        }
        if !self
            .edges
            .iter()
            .all(|(a, b)| self.nodes.contains(a) && self.nodes.contains(b))
        {
            return false;
        }
        let mut map = UnGraphMap::<NodeIndex, ()>::new();
        for &node in &self.nodes {
            map.add_node(node);
        }
        for &(a, b) in &self.edges {
            map.add_edge(a, b, ());
        }
        connected_components(&map) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::SteinerError;
    use crate::domain::graph::tests::{n, square};

    fn path(nodes: &[usize], cost: Cost) -> MinCostPath {
        let nodes: Vec<NodeIndex> = nodes.iter().map(|&i| n(i)).collect();
        let links = nodes.windows(2).map(|w| (w[0], w[1])).collect();
        MinCostPath { nodes, links, cost }
    }

    #[test]
    fn test_singleton() {
        let tree = SteinerTree::singleton(n(3));
        assert_eq!(tree.terminal(), n(3));
        assert_eq!(tree.len(), 1);
        assert!(tree.edges().is_empty());
        assert!(tree.is_tree());
    }

    #[test]
    fn test_merge_along_path() {
        let a = SteinerTree::singleton(n(0));
        let c = SteinerTree::singleton(n(2));
        let merged = a.merge(c, &path(&[0, 3, 2], 2));
        assert_eq!(merged.terminal(), n(0));
        assert_eq!(
            merged.nodes().iter().copied().collect::<Vec<_>>(),
            vec![n(0), n(2), n(3)]
        );
        assert!(merged.edges().contains(&(n(0), n(3))));
        assert!(merged.edges().contains(&(n(2), n(3))));
        assert!(merged.is_tree());
    }

    #[test]
    fn test_merge_adjacent_trees_adds_closing_edge_only() {
        let left =
            SteinerTree::singleton(n(0)).merge(SteinerTree::singleton(n(1)), &path(&[0, 1], 0));
        let right =
            SteinerTree::singleton(n(2)).merge(SteinerTree::singleton(n(3)), &path(&[2, 3], 0));
        let merged = left.merge(right, &path(&[1, 2], 0));
        assert_eq!(merged.len(), 4);
        assert_eq!(merged.edges().len(), 3);
        assert!(merged.is_tree());
    }

    #[test]
    fn test_cost_in_counts_each_node_once() {
        let graph = square();
        let merged =
            SteinerTree::singleton(n(0)).merge(SteinerTree::singleton(n(2)), &path(&[0, 3, 2], 2));
        assert_eq!(merged.cost_in(&graph), Ok(2 + 3));
    }

    #[test]
    fn test_cost_in_rejects_overflowing_sum() {
        let graph = CostGraph::with_costs(&[Cost::MAX, 1, Cost::MAX]);
        let merged =
            SteinerTree::singleton(n(0)).merge(SteinerTree::singleton(n(2)), &path(&[0, 1, 2], 1));
        assert_eq!(merged.cost_in(&graph), Err(SteinerError::CostOverflow));
    }

    #[test]
    fn test_is_tree_rejects_cycles_and_forests() {
        let mut cyclic = SteinerTree::singleton(n(0));
        cyclic.nodes.extend([n(1), n(2)]);
        cyclic.edges.extend([(n(0), n(1)), (n(1), n(2)), (n(0), n(2))]);
        assert!(!cyclic.is_tree());

        // Right edge count, but a triangle plus an isolated node.
        let mut forest = SteinerTree::singleton(n(0));
        forest.nodes.extend([n(1), n(2), n(3)]);
        forest.edges.extend([(n(0), n(1)), (n(1), n(2)), (n(0), n(2))]);
        assert!(!forest.is_tree());
    }

    #[test]
    fn test_pick_node_wraps() {
        let tree =
            SteinerTree::singleton(n(5)).merge(SteinerTree::singleton(n(1)), &path(&[5, 1], 0));
        assert_eq!(tree.pick_node(0), n(1));
        assert_eq!(tree.pick_node(1), n(5));
        assert_eq!(tree.pick_node(2), n(1));
    }
}
