use crate::ir::Axis;

use super::graph::VisibilityGraph;
use super::queue::MinQueue;

/// Extra cost for turning onto an edge of `weight`. Grows with the edge so
/// short jogs stay affordable while long detours after a turn do not.
pub(crate) fn bend_penalty(weight: f32) -> f32 {
    (weight + 1.0) * (weight + 1.0)
}

#[derive(Debug, Clone, Copy)]
struct NodeState {
    dist: f32,
    prev: Option<usize>,
    dir: Option<Axis>,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            dist: f32::INFINITY,
            prev: None,
            dir: None,
        }
    }
}

/// Dijkstra from `start` to `goal` with a penalty on direction changes.
/// Returns node indices from `start` to `goal`, or `None` when `goal` is unreachable.
pub(crate) fn shortest_path(
    graph: &VisibilityGraph,
    start: usize,
    goal: usize,
    penalize_bends: bool,
) -> Option<Vec<usize>> {
    if start >= graph.len() || goal >= graph.len() {
        return None;
    }
    let mut state = vec![NodeState::default(); graph.len()];
    let mut queue = MinQueue::with_capacity(graph.len());
    state[start].dist = 0.0;
    queue.push(start, 0.0);

    while let Some((current, dist)) = queue.pop() {
        if current == goal {
            break;
        }
        if dist > state[current].dist {
            continue;
        }
        let incoming = state[current].dir;
        for edge in &graph.adjacency[current] {
            let mut cost = edge.weight;
            if penalize_bends && incoming.is_some_and(|dir| dir != edge.axis) {
                cost += bend_penalty(edge.weight);
            }
            let next = dist + cost;
            let neighbor = &mut state[edge.to];
            if next < neighbor.dist {
                neighbor.dist = next;
                neighbor.prev = Some(current);
                neighbor.dir = Some(edge.axis);
                queue.push(edge.to, next);
            }
        }
    }

    if !state[goal].dist.is_finite() {
        return None;
    }
    let mut path = vec![goal];
    let mut cursor = goal;
    while let Some(prev) = state[cursor].prev {
        path.push(prev);
        cursor = prev;
        if path.len() > graph.len() {
            return None;
        }
    }
    if cursor != start {
        return None;
    }
    path.reverse();
    Some(path)
}
