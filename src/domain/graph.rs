use crate::domain::error::{SteinerError, SteinerResult};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashSet;

/// Node cost. Costs are nonnegative by construction.
pub type Cost = u64;

/// An edge between two contraction classes, as seen after contraction.
///
/// `ends` holds the two class representatives (smaller index first) and
/// `witness` the first original edge found between them, oriented the same
/// way: `witness.0` belongs to the class of `ends.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotientEdge {
    pub ends: (NodeIndex, NodeIndex),
    pub witness: (NodeIndex, NodeIndex),
}

impl QuotientEdge {
    pub fn touches(&self, node: NodeIndex) -> bool {
        self.ends.0 == node || self.ends.1 == node
    }

    /// The end shared with `other`, if the two edges are adjacent.
    pub fn shared_end(&self, other: &QuotientEdge) -> Option<NodeIndex> {
        if other.touches(self.ends.0) {
            Some(self.ends.0)
        } else if other.touches(self.ends.1) {
            Some(self.ends.1)
        } else {
            None
        }
    }
}

/// Undirected graph with a cost per node and support for node contraction.
///
/// The edge structure is never mutated after construction. Contraction is a
/// remapping table: every node points at the representative of its class, and
/// the representative's weight in the underlying petgraph graph holds the cost
/// of the whole class. Queries that take a node accept any member of a class.
#[derive(Debug, Clone)]
pub struct CostGraph {
    graph: UnGraph<Cost, ()>,
    representative: Vec<NodeIndex>,
    members: Vec<Vec<NodeIndex>>,
}

impl CostGraph {
    /// Create a graph with one node per entry of `costs` and no edges.
    pub fn with_costs(costs: &[Cost]) -> Self {
        let mut graph = UnGraph::with_capacity(costs.len(), 0);
        for &cost in costs {
            graph.add_node(cost);
        }
        let representative: Vec<NodeIndex> = graph.node_indices().collect();
        let members = representative.iter().map(|&node| vec![node]).collect();
        Self {
            graph,
            representative,
            members,
        }
    }

    /// Add an undirected edge. Self-loops and duplicate edges are ignored;
    /// returns whether an edge was added.
    pub fn add_edge(&mut self, a: NodeIndex, b: NodeIndex) -> bool {
        if a == b || self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        node.index() < self.graph.node_count()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Original edges, each reported once.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target()))
    }

    /// Representative of the contraction class `node` belongs to.
    pub fn representative(&self, node: NodeIndex) -> NodeIndex {
        self.representative[node.index()]
    }

    /// All original nodes contracted into the class of `node`.
    pub fn members(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.members[self.representative(node).index()]
    }

    /// Number of classes left after contraction.
    pub fn class_count(&self) -> usize {
        self.members.iter().filter(|class| !class.is_empty()).count()
    }

    /// Cost of the class `node` belongs to.
    pub fn cost(&self, node: NodeIndex) -> Cost {
        self.graph[self.representative(node)]
    }

    /// Sum of the class costs of `nodes`, or `CostOverflow` when it does not
    /// fit in [`Cost`].
    pub fn total_cost<I>(&self, nodes: I) -> SteinerResult<Cost>
    where
        I: IntoIterator<Item = NodeIndex>,
    {
        nodes.into_iter().try_fold(0, |sum: Cost, node| {
            sum.checked_add(self.cost(node))
                .ok_or(SteinerError::CostOverflow)
        })
    }

    pub fn set_cost(&mut self, node: NodeIndex, cost: Cost) {
        let root = self.representative(node);
        self.graph[root] = cost;
    }

    /// Merge the class of `v` into the class of `u`.
    ///
    /// Edges of `v` become edges of the merged class; edges that end up inside
    /// the class disappear from every contracted view and parallel edges
    /// collapse into one. The merged class keeps the cost of `u`. Returns the
    /// new representative, which is not necessarily `u`: the smaller class is
    /// the one relabelled.
    pub fn contract(&mut self, u: NodeIndex, v: NodeIndex) -> NodeIndex {
        let keep = self.representative(u);
        let gone = self.representative(v);
        if keep == gone {
            return keep;
        }
        let cost = self.graph[keep];
        let (root, absorbed) =
            if self.members[keep.index()].len() >= self.members[gone.index()].len() {
                (keep, gone)
            } else {
                (gone, keep)
            };
        let moved = std::mem::take(&mut self.members[absorbed.index()]);
        for &node in &moved {
            self.representative[node.index()] = root;
        }
        self.members[root.index()].extend(moved);
        self.graph[root] = cost;
        root
    }

    /// Representatives of the classes adjacent to the class of `node`.
    pub fn neighbors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let root = self.representative(node);
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for &member in self.members(root) {
            for neighbor in self.graph.neighbors(member) {
                let other = self.representative(neighbor);
                if other != root && seen.insert(other) {
                    out.push(other);
                }
            }
        }
        out.sort_unstable();
        out
    }

    /// The contracted edge set, in order of first discovery along the
    /// original edge list.
    pub fn quotient_edges(&self) -> Vec<QuotientEdge> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (a, b) in self.edges() {
            let (ra, rb) = (self.representative(a), self.representative(b));
            if ra == rb {
                continue;
            }
            let edge = if ra < rb {
                QuotientEdge {
                    ends: (ra, rb),
                    witness: (a, b),
                }
            } else {
                QuotientEdge {
                    ends: (rb, ra),
                    witness: (b, a),
                }
            };
            if seen.insert(edge.ends) {
                out.push(edge);
            }
        }
        out
    }
}
