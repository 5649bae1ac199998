//! Simple-cycle enumeration over the injection graph.
//!
//! Strongly connected components come from `tarjan_scc`; inside each
//! non-trivial SCC a bounded DFS enumerates distinct simple cycles.
//! Every cycle is emitted rotated so its lexicographically smallest
//! class leads, with the closing class repeated (`[A, B, A]`).

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;
use tracing::warn;

use crate::features::beans::InjectionPoint;

/// Node-expansion budget per SCC. Exhausting it stops enumeration for
/// that SCC with the cycles found so far; it never panics.
pub(crate) const MAX_CYCLE_EXPLORATIONS: usize = 10_000;

/// Find every distinct simple cycle in the injection edge set,
/// self-loops included, sorted lexicographically by path.
pub fn find_cycles(points: &[InjectionPoint]) -> Vec<Vec<String>> {
    let mut nodes: BTreeSet<&str> = BTreeSet::new();
    let mut edges: BTreeSet<(&str, &str)> = BTreeSet::new();
    for point in points {
        nodes.insert(&point.source_class);
        nodes.insert(&point.target_class);
        edges.insert((&point.source_class, &point.target_class));
    }

    // Sorted insertion keeps node indices, and with them every
    // downstream traversal order, deterministic.
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut index: FxHashMap<&str, NodeIndex> = FxHashMap::default();
    for name in &nodes {
        index.insert(name, graph.add_node(name));
    }
    for (source, target) in &edges {
        graph.add_edge(index[source], index[target], ());
    }

    let mut cycles: Vec<Vec<String>> = Vec::new();

    // Self-loops are length-1 cycles regardless of the surrounding SCC
    for node in graph.node_indices() {
        if graph.find_edge(node, node).is_some() {
            let name = graph[node].to_string();
            cycles.push(vec![name.clone(), name]);
        }
    }

    for scc in tarjan_scc(&graph) {
        if scc.len() < 2 {
            continue;
        }
        enumerate_scc_cycles(&graph, &scc, &mut cycles);
    }

    cycles.sort();
    cycles.dedup();
    cycles
}

/// Enumerate simple cycles of length >= 2 inside one SCC.
///
/// Each start node only explores nodes that sort at or after it, so a
/// cycle is discovered exactly once, from its smallest member.
fn enumerate_scc_cycles(
    graph: &DiGraph<&str, ()>,
    scc: &[NodeIndex],
    cycles: &mut Vec<Vec<String>>,
) {
    let mut starts: Vec<NodeIndex> = scc.to_vec();
    starts.sort_by_key(|&n| graph[n]);
    // A simple cycle cannot visit more nodes than the SCC holds
    let depth_cap = scc.len();
    let mut budget = MAX_CYCLE_EXPLORATIONS;

    for (i, &start) in starts.iter().enumerate() {
        let allowed: FxHashSet<NodeIndex> = starts[i..].iter().copied().collect();
        let mut path = vec![start];
        let mut on_stack: FxHashSet<NodeIndex> = FxHashSet::default();
        on_stack.insert(start);
        dfs(
            graph, start, start, &allowed, depth_cap, &mut budget, &mut path, &mut on_stack,
            cycles,
        );
        if budget == 0 {
            warn!(
                scc_size = scc.len(),
                "cycle exploration budget exhausted; reporting cycles found so far"
            );
            return;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn dfs(
    graph: &DiGraph<&str, ()>,
    start: NodeIndex,
    current: NodeIndex,
    allowed: &FxHashSet<NodeIndex>,
    depth_cap: usize,
    budget: &mut usize,
    path: &mut Vec<NodeIndex>,
    on_stack: &mut FxHashSet<NodeIndex>,
    cycles: &mut Vec<Vec<String>>,
) {
    if *budget == 0 {
        return;
    }
    *budget -= 1;

    let mut neighbors: Vec<NodeIndex> = graph.neighbors(current).collect();
    neighbors.sort_by_key(|&n| graph[n]);

    for next in neighbors {
        if next == start && path.len() > 1 {
            let mut cycle: Vec<String> = path.iter().map(|&n| graph[n].to_string()).collect();
            cycle.push(graph[start].to_string());
            cycles.push(cycle);
            continue;
        }
        if !allowed.contains(&next) || on_stack.contains(&next) || path.len() >= depth_cap {
            continue;
        }
        path.push(next);
        on_stack.insert(next);
        dfs(
            graph, start, next, allowed, depth_cap, budget, path, on_stack, cycles,
        );
        on_stack.remove(&next);
        path.pop();
        if *budget == 0 {
            return;
        }
    }
}
