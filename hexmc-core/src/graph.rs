//! Weighted undirected graph with dense vertex/edge ids
//!
//! Vertices and edges live in arenas indexed by their ids, so lookups
//! never chase references. Only a vertex's color is mutable after
//! creation; the adjacency structure is append-only apart from
//! [`Graph::remove_edge`], which is a library capability the game
//! itself never uses.

use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Dense vertex identifier (index into the vertex arena)
pub type VertexId = usize;

/// Dense edge identifier (index into the edge arena)
pub type EdgeId = usize;

/// Vertex color tag
///
/// `Red` owns the left-right win condition, `Blue` the top-bottom one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[default]
    Empty,
    Red,
    Blue,
}

impl Color {
    /// The other player's color. Must not be called on `Empty`.
    pub fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
            Color::Empty => panic!("Empty has no opponent"),
        }
    }
}

/// Errors from the text-format graph loader
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("failed to read graph file: {0}")]
    Io(#[from] std::io::Error),

    #[error("graph description line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

// ============================================================================
// VERTEX & EDGE
// ============================================================================

/// A graph vertex: immutable id, mutable color, incident edge set
#[derive(Clone, Debug)]
pub struct Vertex {
    id: VertexId,
    pub color: Color,
    edges: FxHashSet<EdgeId>,
}

impl Vertex {
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Ids of the edges incident to this vertex
    pub fn edges(&self) -> &FxHashSet<EdgeId> {
        &self.edges
    }
}

/// An undirected weighted edge
///
/// Endpoints are stored in canonical order (`from < to`), so edge
/// identity depends only on the unordered endpoint pair.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    id: EdgeId,
    from: VertexId,
    to: VertexId,
    pub weight: f32,
}

impl Edge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> VertexId {
        self.from
    }

    pub fn to(&self) -> VertexId {
        self.to
    }

    /// The endpoint that is not `v`. `v` must be one of the endpoints.
    pub fn other(&self, v: VertexId) -> VertexId {
        if v == self.from {
            self.to
        } else {
            self.from
        }
    }

    fn joins(&self, u: VertexId, v: VertexId) -> bool {
        let (lo, hi) = if u < v { (u, v) } else { (v, u) };
        self.from == lo && self.to == hi
    }
}

// ============================================================================
// GRAPH
// ============================================================================

/// Arena-backed undirected graph
#[derive(Clone, Debug, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Lookup by dense id. Out-of-range ids are caller bugs and panic.
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id]
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }

    /// Append a vertex with the given initial color and return its id
    pub fn add_vertex(&mut self, color: Color) -> VertexId {
        let id = self.vertices.len();
        self.vertices.push(Vertex {
            id,
            color,
            edges: FxHashSet::default(),
        });
        id
    }

    /// Add an edge between `u` and `v`, or update its weight if the
    /// pair is already connected. Self-loops are not guarded; callers
    /// must pass distinct vertices.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, weight: f32) {
        assert!(u < self.vertices.len() && v < self.vertices.len());

        // The incident set of one endpoint is enough to find a duplicate.
        let existing = self.vertices[u]
            .edges
            .iter()
            .copied()
            .find(|&e| self.edges[e].joins(u, v));

        match existing {
            Some(e) => self.edges[e].weight = weight,
            None => {
                let (lo, hi) = if u < v { (u, v) } else { (v, u) };
                let id = self.edges.len();
                self.edges.push(Edge {
                    id,
                    from: lo,
                    to: hi,
                    weight,
                });
                self.vertices[u].edges.insert(id);
                self.vertices[v].edges.insert(id);
            }
        }
    }

    /// Remove the edge between `u` and `v`; no-op if absent.
    ///
    /// Removal shifts the ids of every later edge, so all incident
    /// sets are rebuilt from the edge list. Cost is proportional to
    /// the edge count, which is fine: gameplay never removes edges.
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) {
        assert!(u < self.vertices.len() && v < self.vertices.len());

        let Some(pos) = self.edges.iter().position(|e| e.joins(u, v)) else {
            return;
        };
        self.edges.remove(pos);

        for (id, edge) in self.edges.iter_mut().enumerate() {
            edge.id = id;
        }
        for vertex in &mut self.vertices {
            vertex.edges.clear();
        }
        for edge in &self.edges {
            self.vertices[edge.from].edges.insert(edge.id);
            self.vertices[edge.to].edges.insert(edge.id);
        }
    }

    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Build a random graph: `vertex_count` vertices, each pair joined
    /// with probability `density`, weights uniform in 1.0..10.0.
    pub fn random<R: Rng>(vertex_count: usize, density: f32, rng: &mut R) -> Self {
        let mut graph = Graph::new();
        for _ in 0..vertex_count {
            graph.add_vertex(Color::Empty);
        }
        for u in 0..vertex_count {
            for v in (u + 1)..vertex_count {
                if rng.gen::<f32>() <= density {
                    graph.add_edge(u, v, rng.gen_range(1.0..10.0));
                }
            }
        }
        graph
    }

    /// Parse the positional text format: first line is the vertex
    /// count, every further line is a `<from> <to> <weight>` triple.
    pub fn from_text(text: &str) -> Result<Self, GraphError> {
        let mut graph = Graph::new();
        let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

        let Some((_, first)) = lines.next() else {
            return Err(GraphError::Malformed {
                line: 1,
                reason: "missing vertex count".to_string(),
            });
        };
        let vertex_count: usize =
            first.trim().parse().map_err(|_| GraphError::Malformed {
                line: 1,
                reason: format!("invalid vertex count {:?}", first.trim()),
            })?;
        for _ in 0..vertex_count {
            graph.add_vertex(Color::Empty);
        }

        for (idx, line) in lines {
            let malformed = |reason: String| GraphError::Malformed {
                line: idx + 1,
                reason,
            };

            let mut fields = line.split_whitespace();
            let mut next_id = |name: &str| -> Result<usize, GraphError> {
                fields
                    .next()
                    .ok_or_else(|| malformed(format!("missing {name}")))?
                    .parse::<usize>()
                    .map_err(|_| malformed(format!("invalid {name}")))
            };
            let from = next_id("from vertex")?;
            let to = next_id("to vertex")?;
            let weight = fields
                .next()
                .ok_or_else(|| malformed("missing weight".to_string()))?
                .parse::<f32>()
                .map_err(|_| malformed("invalid weight".to_string()))?;

            if from >= vertex_count || to >= vertex_count {
                return Err(malformed(format!("edge {from} {to} out of range")));
            }
            graph.add_edge(from, to, weight);
        }

        Ok(graph)
    }

    /// Load the text format from a file
    pub fn from_file(path: &Path) -> Result<Self, GraphError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_text(&text)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn triangle() -> Graph {
        let mut g = Graph::new();
        for _ in 0..3 {
            g.add_vertex(Color::Empty);
        }
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 2, 2.0);
        g.add_edge(0, 2, 3.0);
        g
    }

    #[test]
    fn test_add_vertex_dense_ids() {
        let mut g = Graph::new();
        assert_eq!(g.add_vertex(Color::Empty), 0);
        assert_eq!(g.add_vertex(Color::Red), 1);
        assert_eq!(g.add_vertex(Color::Blue), 2);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.vertex(1).color, Color::Red);
    }

    #[test]
    fn test_add_edge_canonical_order() {
        let mut g = Graph::new();
        g.add_vertex(Color::Empty);
        g.add_vertex(Color::Empty);
        g.add_edge(1, 0, 4.0);
        let e = g.edge(0);
        assert_eq!(e.from(), 0);
        assert_eq!(e.to(), 1);
        assert_eq!(e.other(0), 1);
        assert_eq!(e.other(1), 0);
    }

    #[test]
    fn test_add_edge_overwrites_weight() {
        let mut g = Graph::new();
        g.add_vertex(Color::Empty);
        g.add_vertex(Color::Empty);
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 0, 7.5);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge(0).weight, 7.5);
        assert_eq!(g.vertex(0).edges().len(), 1);
        assert_eq!(g.vertex(1).edges().len(), 1);
    }

    #[test]
    fn test_remove_edge_restores_incident_sets() {
        let mut g = triangle();
        let before_0: Vec<_> = {
            let mut v: Vec<_> = g.vertex(0).edges().iter().copied().collect();
            v.sort();
            v
        };

        g.add_edge(0, 1, 9.0); // overwrite, not a new edge
        g.remove_edge(1, 2);
        assert_eq!(g.edge_count(), 2);

        // ids are re-densified and every incident set matches the edge list
        for e in g.edges() {
            assert!(g.vertex(e.from()).edges().contains(&e.id()));
            assert!(g.vertex(e.to()).edges().contains(&e.id()));
        }
        let mut after_0: Vec<_> = g.vertex(0).edges().iter().copied().collect();
        after_0.sort();
        assert_eq!(after_0.len(), before_0.len());
        assert!(!g.vertex(1).edges().iter().any(|&e| g.edge(e).joins(1, 2)));
    }

    #[test]
    fn test_remove_absent_edge_is_noop() {
        let mut g = triangle();
        g.remove_edge(0, 1);
        g.remove_edge(0, 1);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_from_text() {
        let g = Graph::from_text("3\n0 1 5\n1 2 3\n0 2 9").unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.edge(0).weight, 5.0);
        assert_eq!(g.edge(1).weight, 3.0);
        assert_eq!(g.edge(2).weight, 9.0);
    }

    #[test]
    fn test_from_text_rejects_short_line() {
        let err = Graph::from_text("2\n0 1").unwrap_err();
        assert!(matches!(err, GraphError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_from_text_rejects_garbage_count() {
        assert!(Graph::from_text("x\n").is_err());
        assert!(Graph::from_text("").is_err());
    }

    #[test]
    fn test_random_graph_density_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let none = Graph::random(10, 0.0, &mut rng);
        assert_eq!(none.edge_count(), 0);
        let full = Graph::random(10, 1.0, &mut rng);
        assert_eq!(full.edge_count(), 10 * 9 / 2);
        for e in full.edges() {
            assert!(e.weight >= 1.0 && e.weight < 10.0);
        }
    }
}
