//! Breadth-first distances and depth-first orderings.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::{graph::FlowGraph, Error, Result};

/// Computes the shortest hop distance from `entry` to every reachable node.
///
/// Standard breadth-first expansion with a FIFO frontier; each edge counts
/// one hop. Nodes unreachable from `entry` are absent from the result.
///
/// # Errors
///
/// Returns [`Error::UnknownEntryNode`] if `entry` is not a node of the graph.
pub fn path_lengths<G: FlowGraph + ?Sized>(
    graph: &G,
    entry: &str,
) -> Result<HashMap<String, usize>> {
    if !graph.contains_node(entry) {
        return Err(Error::UnknownEntryNode(entry.to_string()));
    }

    let mut distances: HashMap<String, usize> = HashMap::new();
    distances.insert(entry.to_string(), 0);
    let mut frontier: VecDeque<String> = VecDeque::new();
    frontier.push_back(entry.to_string());

    while let Some(node) = frontier.pop_front() {
        let here = distances.get(&node).copied().unwrap_or(0);
        for succ in graph.successor_names(&node) {
            if !distances.contains_key(succ) {
                distances.insert(succ.clone(), here + 1);
                frontier.push_back(succ.clone());
            }
        }
    }

    Ok(distances)
}

/// Computes the depth-first postorder of nodes reachable from `entry`.
///
/// A node is appended only after all of its unvisited successors have been
/// fully explored, successors taken in list order. Revisits are suppressed
/// with a visited set.
///
/// # Errors
///
/// Returns [`Error::UnknownEntryNode`] if `entry` is not a node of the graph.
#[allow(clippy::items_after_statements)]
pub fn postorder<G: FlowGraph + ?Sized>(graph: &G, entry: &str) -> Result<Vec<String>> {
    if !graph.contains_node(entry) {
        return Err(Error::UnknownEntryNode(entry.to_string()));
    }

    let mut visited: HashSet<String> = HashSet::new();
    let mut result: Vec<String> = Vec::new();

    // Iterative postorder using explicit stack with state
    #[derive(Clone, Copy)]
    enum State {
        Enter,
        Exit,
    }

    let mut stack = vec![(entry.to_string(), State::Enter)];

    while let Some((node, state)) = stack.pop() {
        match state {
            State::Enter => {
                if !visited.insert(node.clone()) {
                    continue;
                }

                // Push exit state for this node (processed after children)
                stack.push((node.clone(), State::Exit));

                // Push children in reverse order so they're processed in order
                let successors = graph.successor_names(&node);
                for succ in successors.iter().rev() {
                    if !visited.contains(succ) {
                        stack.push((succ.clone(), State::Enter));
                    }
                }
            }
            State::Exit => {
                result.push(node);
            }
        }
    }

    Ok(result)
}

/// Computes the reverse postorder of nodes reachable from `entry`.
///
/// Reverse postorder (RPO) visits a node before any of its successors on a
/// DAG, which makes it the preferred iteration order for forward dataflow.
///
/// # Errors
///
/// Returns [`Error::UnknownEntryNode`] if `entry` is not a node of the graph.
pub fn reverse_postorder<G: FlowGraph + ?Sized>(graph: &G, entry: &str) -> Result<Vec<String>> {
    let mut result = postorder(graph, entry)?;
    result.reverse();
    Ok(result)
}
