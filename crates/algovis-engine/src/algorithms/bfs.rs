//! Breadth-first graph traversal.

use std::collections::{HashSet, VecDeque};

use algovis_structures::{Graph, NodeId};

use crate::runner::{StepCtx, StepResult};

/// Walk the graph breadth-first from `start`.
///
/// The frontier is seeded with the start node, which counts as visited at
/// seed time; every later node is marked visited when discovered, so a
/// node is never enqueued twice. Discovery order is the edge-list order
/// supplied by the caller.
pub(crate) async fn bfs(ctx: &StepCtx, graph: &Graph, start: NodeId) -> StepResult {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut frontier: VecDeque<NodeId> = VecDeque::new();
    visited.insert(start);
    frontier.push_back(start);

    ctx.step(
        &format!("BFS started from node {}", label(graph, start)),
        |state| {
            state.visited = HashSet::new();
            state.current = None;
        },
    );

    while let Some(node) = frontier.pop_front() {
        ctx.step(&format!("Visiting node {}", label(graph, node)), |state| {
            state.current = Some(node);
        });
        ctx.pause().await?;

        // Publish the visited set as of this dequeue
        let seen = visited.clone();
        ctx.touch(|state| state.visited = seen);

        for neighbor in graph.neighbors(node) {
            if visited.insert(neighbor) {
                frontier.push_back(neighbor);
                ctx.note(&format!("Enqueued node {}", label(graph, neighbor)));
            }
        }

        ctx.pause_half().await?;
    }

    ctx.step("BFS traversal complete", |state| state.current = None);
    Ok(())
}

fn label(graph: &Graph, id: NodeId) -> String {
    graph
        .node(id)
        .map_or_else(|| id.0.to_string(), |node| node.label.clone())
}
