//! Color-filtered shortest path and minimum spanning tree
//!
//! [`PathFinder`] is the win-detection oracle: a single-source
//! shortest-path search that only expands vertices matching the
//! source's color and stops as soon as the target is popped. It is
//! called once per rollout, millions of times per game, so all scratch
//! state lives in the finder and is reused across calls.

use crate::graph::{EdgeId, Graph, VertexId};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

const NO_PREV: usize = usize::MAX;

/// Frontier entry ordered by smallest tentative distance first
#[derive(Clone, Copy, Debug)]
struct Frontier {
    dist: f32,
    vertex: VertexId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // reversed: BinaryHeap is a max-heap, we want the nearest vertex
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

// ============================================================================
// PATH FINDER (win-detection oracle)
// ============================================================================

/// Reusable Dijkstra state with color filtering and early exit
#[derive(Clone, Debug, Default)]
pub struct PathFinder {
    dist: Vec<f32>,
    prev: Vec<usize>,
    visited: Vec<bool>,
    heap: BinaryHeap<Frontier>,
    path: Vec<VertexId>,
    distance: f32,
    reached: bool,
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last search reached its target
    pub fn reached(&self) -> bool {
        self.reached
    }

    /// The last found path in source -> target order; empty if the
    /// target was not reached.
    pub fn path(&self) -> &[VertexId] {
        &self.path
    }

    /// Total weight of the last found path; 0.0 if not reached
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Shortest-path reachability between `source` and `target`,
    /// restricted to vertices of the source's color.
    ///
    /// A color mismatch between source and target is a normal negative
    /// answer, reported without searching: it is what keeps the two
    /// win conditions on one graph from interfering. Each call fully
    /// resets the scratch state from any prior search.
    pub fn reachable(&mut self, graph: &Graph, source: VertexId, target: VertexId) -> bool {
        self.reset(graph.vertex_count());

        let color = graph.vertex(source).color;
        if color != graph.vertex(target).color {
            return false;
        }

        self.dist[source] = 0.0;
        self.heap.push(Frontier {
            dist: 0.0,
            vertex: source,
        });

        while let Some(Frontier { vertex: u, .. }) = self.heap.pop() {
            if self.visited[u] {
                continue; // stale heap entry
            }
            self.visited[u] = true;

            if u == target {
                self.reached = true;
                self.distance = self.dist[u];
                self.rebuild_path(target);
                return true;
            }

            for &edge_id in graph.vertex(u).edges() {
                let edge = graph.edge(edge_id);
                let v = edge.other(u);
                if graph.vertex(v).color != color || self.visited[v] {
                    continue;
                }
                let alt = self.dist[u] + edge.weight;
                if alt < self.dist[v] {
                    self.dist[v] = alt;
                    self.prev[v] = u;
                    self.heap.push(Frontier {
                        dist: alt,
                        vertex: v,
                    });
                }
            }
        }

        false
    }

    fn reset(&mut self, vertex_count: usize) {
        self.reached = false;
        self.distance = 0.0;
        self.path.clear();
        self.heap.clear();

        self.dist.clear();
        self.dist.resize(vertex_count, f32::INFINITY);
        self.prev.clear();
        self.prev.resize(vertex_count, NO_PREV);
        self.visited.clear();
        self.visited.resize(vertex_count, false);
    }

    fn rebuild_path(&mut self, target: VertexId) {
        let mut v = target;
        self.path.push(v);
        while self.prev[v] != NO_PREV {
            v = self.prev[v];
            self.path.push(v);
        }
        self.path.reverse();
    }
}

// ============================================================================
// MINIMUM SPANNING TREE
// ============================================================================

/// Kruskal result: chosen edge ids and their total weight
#[derive(Clone, Debug, Serialize)]
pub struct SpanningTree {
    pub edges: Vec<EdgeId>,
    pub total_weight: f32,
}

/// Kruskal's algorithm over the whole graph, ignoring colors.
///
/// Uses the simple label-merge union: every vertex carries a component
/// label and accepting an edge relabels one component. Quadratic in
/// the worst case, which is fine for a library capability that never
/// runs inside the game loop.
pub fn minimum_spanning_tree(graph: &Graph) -> SpanningTree {
    let mut tree = SpanningTree {
        edges: Vec::new(),
        total_weight: 0.0,
    };

    let mut order: Vec<EdgeId> = (0..graph.edge_count()).collect();
    order.sort_by(|&a, &b| graph.edge(a).weight.total_cmp(&graph.edge(b).weight));

    let mut labels: Vec<usize> = (0..graph.vertex_count()).collect();
    for edge_id in order {
        let edge = graph.edge(edge_id);
        let (from_label, to_label) = (labels[edge.from()], labels[edge.to()]);
        if from_label != to_label {
            tree.edges.push(edge_id);
            tree.total_weight += edge.weight;
            for label in &mut labels {
                if *label == to_label {
                    *label = from_label;
                }
            }
        }
    }

    tree
}

// ============================================================================
// TESTS
// ============================================================================
