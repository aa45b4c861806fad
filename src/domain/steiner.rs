//! Greedy node-weighted Steiner tree approximation.
//!
//! Heuristic from Klein & Ravi, "A nearly best-possible approximation
//! algorithm for node-weighted Steiner trees" (J. Algorithms 19, 1995):
//!
//! 1. Start with one single-node tree per terminal.
//! 2. While more than two trees remain, find the pair of trees joined by the
//!    cheapest node-weighted path, connect them along it and replace both by
//!    the merged tree.
//! 3. Connect the last two trees.
//!
//! Paths are searched on a working copy of the graph in which terminals cost
//! nothing and every tree is contracted into a single zero-cost node, so a
//! node is paid for at most once no matter how many later paths cross it.

use crate::domain::error::{SteinerError, SteinerResult};
use crate::domain::graph::{Cost, CostGraph};
use crate::domain::path::{MinCostPath, find_min_cost_path};
use crate::domain::tree::SteinerTree;
use petgraph::graph::NodeIndex;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 11;

/// Shared flag to stop a running computation between merge rounds.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone)]
pub struct SteinerOptions {
    /// Reserved for randomized tie-breaking. The greedy merge is
    /// deterministic and does not read it.
    pub seed: u64,
    /// Evaluate the pairwise paths of a round on the rayon thread pool.
    pub parallel: bool,
    pub cancel: Option<CancelToken>,
}

impl Default for SteinerOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            parallel: true,
            cancel: None,
        }
    }
}

/// Cheapest connection found between two trees of the pool.
#[derive(Debug, Clone)]
pub struct PairCandidate {
    /// Pool position of the first tree (always smaller than `second`).
    pub first: usize,
    pub second: usize,
    pub path: MinCostPath,
}

impl PairCandidate {
    pub fn cost(&self) -> Cost {
        self.path.cost
    }
}

/// Decides between two candidates of equal cost.
pub trait TieBreaker: Send + Sync {
    /// Whether `challenger` should replace `incumbent`. Only called when both
    /// have the same cost; candidates arrive in pair enumeration order.
    fn prefers(&self, incumbent: &PairCandidate, challenger: &PairCandidate) -> bool;
}

/// Keeps the first minimum in pair enumeration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMinimum;

impl TieBreaker for FirstMinimum {
    fn prefers(&self, _incumbent: &PairCandidate, _challenger: &PairCandidate) -> bool {
        false
    }
}

/// Approximate Steiner tree and its cost over the original node costs.
#[derive(Debug, Clone)]
pub struct SteinerOutcome {
    pub tree: SteinerTree,
    pub cost: Cost,
    /// Number of merges performed (terminals - 1).
    pub rounds: usize,
}

pub struct SteinerSolver {
    options: SteinerOptions,
    tie_breaker: Box<dyn TieBreaker>,
}

impl Default for SteinerSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SteinerSolver {
    pub fn new() -> Self {
        Self::with_options(SteinerOptions::default())
    }

    pub fn with_options(options: SteinerOptions) -> Self {
        Self {
            options,
            tie_breaker: Box::new(FirstMinimum),
        }
    }

    pub fn with_tie_breaker(mut self, tie_breaker: Box<dyn TieBreaker>) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    pub fn options(&self) -> &SteinerOptions {
        &self.options
    }

    /// Connect all `terminals` of `graph` with an approximate minimum
    /// node-weighted Steiner tree.
    ///
    /// Duplicate terminals are ignored. Fails without computing anything when
    /// fewer than two distinct terminals are given or one is not in the graph,
    /// and fails as a whole when any two terminals are disconnected.
    pub fn solve(
        &self,
        graph: &CostGraph,
        terminals: &[NodeIndex],
    ) -> SteinerResult<SteinerOutcome> {
        let terminals = distinct_terminals(graph, terminals)?;
        debug!(
            seed = self.options.seed,
            terminals = terminals.len(),
            parallel = self.options.parallel,
            "starting greedy merge"
        );

        let mut working = graph.clone();
        for &terminal in &terminals {
            working.set_cost(terminal, 0);
        }
        let mut pool: Vec<SteinerTree> = terminals
            .iter()
            .map(|&terminal| SteinerTree::singleton(terminal))
            .collect();

        let mut rounds = 0;
        while pool.len() > 1 {
            self.check_cancelled(rounds)?;
            let best = self.closest_pair(&working, &pool)?;
            debug!(
                round = rounds + 1,
                pool = pool.len(),
                first = pool[best.first].terminal().index(),
                second = pool[best.second].terminal().index(),
                cost = best.cost(),
                "merging closest trees"
            );
            rounds += merge_into_pool(&mut pool, &mut working, best);
        }

        let tree = pool.pop().ok_or_else(|| {
            SteinerError::InvalidTerminalSet("tree pool ended up empty".into())
        })?;
        let cost = tree.cost_in(graph)?;
        info!(
            cost,
            nodes = tree.len(),
            rounds,
            "calculated approximate minimal node-weighted Steiner tree"
        );
        Ok(SteinerOutcome { tree, cost, rounds })
    }

    fn check_cancelled(&self, rounds: usize) -> SteinerResult<()> {
        match &self.options.cancel {
            Some(token) if token.is_cancelled() => Err(SteinerError::Cancelled { rounds }),
            _ => Ok(()),
        }
    }

    /// Cheapest path over all unordered pairs of the pool.
    ///
    /// Paths are computed independently against the same snapshot of the
    /// working graph, collected in pair order and then reduced sequentially,
    /// so the parallel and serial runs select the same pair.
    fn closest_pair(
        &self,
        working: &CostGraph,
        pool: &[SteinerTree],
    ) -> SteinerResult<PairCandidate> {
        let pairs: Vec<(usize, usize)> = (0..pool.len())
            .flat_map(|i| (i + 1..pool.len()).map(move |j| (i, j)))
            .collect();
        let connect = |&(first, second): &(usize, usize)| {
            find_min_cost_path(working, pool[first].terminal(), pool[second].terminal())
                .map(|path| PairCandidate {
                    first,
                    second,
                    path,
                })
        };
        let candidates: Vec<PairCandidate> = if self.options.parallel {
            pairs.par_iter().map(connect).collect::<SteinerResult<_>>()?
        } else {
            pairs.iter().map(connect).collect::<SteinerResult<_>>()?
        };

        let mut best: Option<PairCandidate> = None;
        for candidate in candidates {
            let replace = match &best {
                None => true,
                Some(incumbent) => {
                    candidate.cost() < incumbent.cost()
                        || (candidate.cost() == incumbent.cost()
                            && self.tie_breaker.prefers(incumbent, &candidate))
                }
            };
            if replace {
                best = Some(candidate);
            }
        }
        best.ok_or_else(|| {
            SteinerError::InvalidTerminalSet("fewer than two trees to merge".into())
        })
    }
}

/// Replace the two trees of `best` by their union and contract everything
/// the union newly covers into the first tree's node of the working graph.
///
/// A path may cross the class of a third tree at no cost. That tree is
/// swallowed by the contraction, so it is absorbed into the union as well and
/// pool trees stay disjoint. Returns the number of trees merged away.
fn merge_into_pool(
    pool: &mut Vec<SteinerTree>,
    working: &mut CostGraph,
    best: PairCandidate,
) -> usize {
    let PairCandidate {
        first,
        second,
        path,
    } = best;
    let second_tree = pool.remove(second);
    let first_tree = pool.remove(first);

    let anchor = first_tree.terminal();
    for &node in path.interior() {
        working.contract(anchor, node);
    }
    working.contract(anchor, second_tree.terminal());

    let mut merged = first_tree.merge(second_tree, &path);
    let mut merges = 1;
    let class = working.representative(anchor);
    let mut i = 0;
    while i < pool.len() {
        if working.representative(pool[i].terminal()) == class {
            merged = merged.absorb(pool.remove(i));
            merges += 1;
        } else {
            i += 1;
        }
    }
    pool.push(merged);
    merges
}

fn distinct_terminals(
    graph: &CostGraph,
    terminals: &[NodeIndex],
) -> SteinerResult<Vec<NodeIndex>> {
    let mut seen = HashSet::new();
    let mut distinct = Vec::with_capacity(terminals.len());
    for &terminal in terminals {
        if !graph.contains(terminal) {
            return Err(SteinerError::InvalidTerminalSet(format!(
                "terminal {} is not a node of the graph",
                terminal.index()
            )));
        }
        if seen.insert(terminal) {
            distinct.push(terminal);
        }
    }
    if distinct.len() < 2 {
        return Err(SteinerError::InvalidTerminalSet(format!(
            "at least 2 distinct terminals are required, got {}",
            distinct.len()
        )));
    }
    Ok(distinct)
}

/// Approximate the minimum node-weighted Steiner tree connecting `terminals`.
///
/// `seed` is carried into [`SteinerOptions::seed`] and currently has no
/// effect on the result.
pub fn approximate_steiner_tree(
    graph: &CostGraph,
    terminals: &[NodeIndex],
    seed: u64,
) -> SteinerResult<SteinerOutcome> {
    SteinerSolver::with_options(SteinerOptions {
        seed,
        ..SteinerOptions::default()
    })
    .solve(graph, terminals)
}
