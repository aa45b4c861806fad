//! Node-weighted minimum-cost paths.
//!
//! A path between `s` and `t` is charged the cost of every node strictly
//! between them. The search runs on the edge graph of the (contracted) graph:
//! every edge becomes a node, and two such nodes are joined with the cost of
//! the node their edges share, so walking across that junction pays for the
//! node exactly once. A synthetic source is joined with weight 0 to every
//! edge leaving `s`, and a synthetic target to every edge entering `t`.

use crate::domain::error::{SteinerError, SteinerResult};
use crate::domain::graph::{Cost, CostGraph, QuotientEdge};
use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;
use std::num::Saturating;
use tracing::trace;

/// Result of a minimum-cost path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinCostPath {
    /// Simple path from the requested source to the requested target.
    /// Interior nodes are class representatives of the queried graph.
    pub nodes: Vec<NodeIndex>,
    /// One original edge per consecutive pair of `nodes`, oriented along the
    /// path. Differs from the pair itself only where an end is a contracted
    /// class.
    pub links: Vec<(NodeIndex, NodeIndex)>,
    /// Sum of the costs of the interior nodes.
    pub cost: Cost,
}

impl MinCostPath {
    fn trivial(node: NodeIndex) -> Self {
        Self {
            nodes: vec![node],
            links: Vec::new(),
            cost: 0,
        }
    }

    pub fn source(&self) -> NodeIndex {
        self.nodes[0]
    }

    pub fn target(&self) -> NodeIndex {
        self.nodes[self.nodes.len() - 1]
    }

    /// Nodes strictly between source and target.
    pub fn interior(&self) -> &[NodeIndex] {
        if self.nodes.len() <= 2 {
            &[]
        } else {
            &self.nodes[1..self.nodes.len() - 1]
        }
    }
}

/// Node of the auxiliary edge graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxNode {
    Source,
    Target,
    /// Index into [`EdgeGraph::links`].
    Link(usize),
}

/// Edge-weighted auxiliary graph for one source/target query.
///
/// Auxiliary node `i` (for `i < links.len()`) stands for `links[i]`.
pub struct EdgeGraph {
    pub graph: UnGraph<AuxNode, Cost>,
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub links: Vec<QuotientEdge>,
    from: NodeIndex,
    to: NodeIndex,
}

impl EdgeGraph {
    /// Build the edge graph of `graph` for a query from `source` to `target`.
    ///
    /// Junctions at the source or target class are left out: a path never
    /// passes through its own endpoints, and the synthetic endpoints already
    /// connect every edge incident to them.
    pub fn build(graph: &CostGraph, source: NodeIndex, target: NodeIndex) -> Self {
        let from = graph.representative(source);
        let to = graph.representative(target);
        let links = graph.quotient_edges();

        let mut incident: Vec<Vec<usize>> = vec![Vec::new(); graph.node_count()];
        for (i, link) in links.iter().enumerate() {
            incident[link.ends.0.index()].push(i);
            incident[link.ends.1.index()].push(i);
        }

        let mut aux = UnGraph::with_capacity(links.len() + 2, links.len());
        for i in 0..links.len() {
            aux.add_node(AuxNode::Link(i));
        }
        let source_id = aux.add_node(AuxNode::Source);
        let target_id = aux.add_node(AuxNode::Target);

        for (node, around) in incident.iter().enumerate() {
            let node = NodeIndex::new(node);
            if node == from {
                for &i in around {
                    aux.add_edge(source_id, NodeIndex::new(i), 0);
                }
            } else if node == to {
                for &i in around {
                    aux.add_edge(NodeIndex::new(i), target_id, 0);
                }
            } else {
                let cost = graph.cost(node);
                for (k, &a) in around.iter().enumerate() {
                    for &b in &around[k + 1..] {
                        aux.add_edge(NodeIndex::new(a), NodeIndex::new(b), cost);
                    }
                }
            }
        }

        Self {
            graph: aux,
            source: source_id,
            target: target_id,
            links,
            from,
            to,
        }
    }

    /// Translate an auxiliary route (synthetic source to synthetic target)
    /// into the sequence of classes it walks through.
    ///
    /// Consecutive links share exactly one node; that node is where the walk
    /// passes. The result can revisit a node when zero-cost junctions tie.
    fn walk(&self, route: &[NodeIndex]) -> Vec<NodeIndex> {
        let used: Vec<&QuotientEdge> = route
            .iter()
            .filter_map(|&id| match self.graph[id] {
                AuxNode::Link(i) => Some(&self.links[i]),
                AuxNode::Source | AuxNode::Target => None,
            })
            .collect();

        let mut walk = vec![self.from];
        for pair in used.windows(2) {
            if let Some(shared) = pair[0].shared_end(pair[1]) {
                if walk.last() != Some(&shared) {
                    walk.push(shared);
                }
            }
        }
        walk.push(self.to);
        walk
    }

    /// The original edge joining two adjacent classes, oriented from `a`.
    fn link_between(&self, a: NodeIndex, b: NodeIndex) -> Option<(NodeIndex, NodeIndex)> {
        let key = if a < b { (a, b) } else { (b, a) };
        self.links
            .iter()
            .find(|link| link.ends == key)
            .map(|link| {
                if a < b {
                    link.witness
                } else {
                    (link.witness.1, link.witness.0)
                }
            })
    }
}

/// Drop every cycle from a walk, keeping the first visit of each node.
fn erase_loops(walk: Vec<NodeIndex>) -> Vec<NodeIndex> {
    let mut path: Vec<NodeIndex> = Vec::with_capacity(walk.len());
    let mut position: HashMap<NodeIndex, usize> = HashMap::new();
    for node in walk {
        if let Some(&at) = position.get(&node) {
            for dropped in path.drain(at + 1..) {
                position.remove(&dropped);
            }
        } else {
            position.insert(node, path.len());
            path.push(node);
        }
    }
    path
}

/// Find the path from `source` to `target` minimizing the summed cost of the
/// nodes strictly between them.
///
/// Contracted classes count as single nodes. When both nodes already belong
/// to the same class the path is the single node `source` with cost 0.
pub fn find_min_cost_path(
    graph: &CostGraph,
    source: NodeIndex,
    target: NodeIndex,
) -> SteinerResult<MinCostPath> {
    for node in [source, target] {
        if !graph.contains(node) {
            return Err(SteinerError::UnknownNode(node.index()));
        }
    }
    if graph.representative(source) == graph.representative(target) {
        return Ok(MinCostPath::trivial(source));
    }
    let no_path = || SteinerError::NoPath {
        from: source.index(),
        to: target.index(),
    };

    let edge_graph = EdgeGraph::build(graph, source, target);
    let goal = edge_graph.target;
    let (_, route) = astar(
        &edge_graph.graph,
        edge_graph.source,
        |node| node == goal,
        |edge| Saturating(*edge.weight()),
        |_| Saturating(0),
    )
    .ok_or_else(no_path)?;

    let mut nodes = erase_loops(edge_graph.walk(&route));
    let links = nodes
        .windows(2)
        .map(|pair| edge_graph.link_between(pair[0], pair[1]))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(no_path)?;

    let last = nodes.len() - 1;
    nodes[0] = source;
    nodes[last] = target;
    let cost = graph.total_cost(nodes[1..last].iter().copied())?;

    trace!(
        source = source.index(),
        target = target.index(),
        hops = links.len(),
        cost,
        "min-cost path"
    );
    Ok(MinCostPath { nodes, links, cost })
}
