use crate::domain::graph::Cost;
use petgraph::graph::NodeIndex;

/// A wildlife corridor design instance: a grid of land parcels with a cost
/// and profit each, some of them already protected reserves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instance {
    pub node_count: usize,
    /// Reserve flag per node.
    pub reserves: Vec<bool>,
    pub profits: Vec<u64>,
    pub costs: Vec<Cost>,
    /// Undirected adjacency, 0-based node ids.
    pub edges: Vec<(usize, usize)>,
    /// Budget already recorded in the instance, if any.
    pub budget: Option<Cost>,
}

impl Instance {
    /// Reserve nodes in ascending id order. These are the terminals that the
    /// corridor has to connect.
    pub fn terminals(&self) -> Vec<NodeIndex> {
        self.reserves
            .iter()
            .enumerate()
            .filter(|&(_, &reserve)| reserve)
            .map(|(id, _)| NodeIndex::new(id))
            .collect()
    }

    pub fn reserve_count(&self) -> usize {
        self.reserves.iter().filter(|&&reserve| reserve).count()
    }
}
