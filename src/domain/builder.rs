use crate::domain::error::{SteinerError, SteinerResult};
use crate::domain::graph::{Cost, CostGraph};
use crate::domain::instance::Instance;
use petgraph::graph::NodeIndex;

/// Build the cost graph for `node_count` nodes from an adjacency list and
/// per-node costs.
///
/// Self-loops and repeated edges are dropped.
pub fn build_graph(
    node_count: usize,
    adjacency: &[(usize, usize)],
    node_costs: &[Cost],
) -> SteinerResult<CostGraph> {
    if node_costs.len() != node_count {
        return Err(SteinerError::InvalidGraph(format!(
            "expected {} node costs, got {}",
            node_count,
            node_costs.len()
        )));
    }

    let mut graph = CostGraph::with_costs(node_costs);
    for &(a, b) in adjacency {
        if a >= node_count || b >= node_count {
            return Err(SteinerError::InvalidGraph(format!(
                "edge {a} - {b} references a node outside 0..{node_count}"
            )));
        }
        graph.add_edge(NodeIndex::new(a), NodeIndex::new(b));
    }
    Ok(graph)
}

/// Graph of an instance, costs taken from its parcels.
pub fn graph_for_instance(instance: &Instance) -> SteinerResult<CostGraph> {
    build_graph(instance.node_count, &instance.edges, &instance.costs)
}
