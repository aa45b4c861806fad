//! Graph and instance fixtures for integration tests.
#![allow(dead_code)]

use corridor_budget::domain::builder::build_graph;
use corridor_budget::domain::graph::{Cost, CostGraph};
use corridor_budget::domain::instance::Instance;
use petgraph::graph::NodeIndex;

pub fn n(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

pub fn nodes(indices: &[usize]) -> Vec<NodeIndex> {
    indices.iter().map(|&i| n(i)).collect()
}

/// ```text
/// A(0) --- B(5)
///  |        |
/// D(2) --- C(3)
/// ```
pub fn square() -> CostGraph {
    build_graph(4, &[(0, 1), (1, 2), (2, 3), (3, 0)], &[0, 5, 3, 2]).unwrap()
}

/// `square()` plus E(1) attached to D.
pub fn square_with_tail() -> CostGraph {
    build_graph(
        5,
        &[(0, 1), (1, 2), (2, 3), (3, 0), (3, 4)],
        &[0, 5, 3, 2, 1],
    )
    .unwrap()
}

/// `width` x `height` 4-neighbour grid, node `(x, y)` has id `y * width + x`.
pub fn grid(width: usize, height: usize, costs: &[Cost]) -> CostGraph {
    let mut edges = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let id = y * width + x;
            if x + 1 < width {
                edges.push((id, id + 1));
            }
            if y + 1 < height {
                edges.push((id, id + width));
            }
        }
    }
    build_graph(width * height, &edges, costs).unwrap()
}

/// Deterministic pseudo-random costs in `1..=9`.
pub fn scattered_costs(count: usize, salt: u64) -> Vec<Cost> {
    (0..count as u64)
        .map(|i| (i.wrapping_mul(2654435761).wrapping_add(salt * 97) >> 3) % 9 + 1)
        .collect()
}

pub const SQUARE_WITH_TAIL_COR: &str = "\
c square with a tail, reserves A, B and E
p 5 3
n 0 1 4 0
n 1 1 2 5
n 2 0 1 3
n 3 0 0 2
n 4 1 7 1
e 0 1
e 1 2
e 2 3
e 3 0
e 3 4
";

pub fn square_with_tail_instance() -> Instance {
    Instance {
        node_count: 5,
        reserves: vec![true, true, false, false, true],
        profits: vec![4, 2, 1, 0, 7],
        costs: vec![0, 5, 3, 2, 1],
        edges: vec![(0, 1), (1, 2), (2, 3), (3, 0), (3, 4)],
        budget: None,
    }
}
