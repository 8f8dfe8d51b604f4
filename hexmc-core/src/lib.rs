//! HEXMC Core - Hex board model and win detection
//!
//! This crate provides the game-independent machinery for Hex:
//! - Weighted graph arena with dense vertex/edge ids
//! - Color-filtered shortest-path oracle (the win check)
//! - Kruskal minimum spanning tree (library capability)
//! - Board topology builder and coordinate mapping

pub mod board;
pub mod graph;
pub mod path;

// Re-exports for convenient access
pub use board::Board;
pub use graph::{Color, Edge, EdgeId, Graph, GraphError, Vertex, VertexId};
pub use path::{minimum_spanning_tree, PathFinder, SpanningTree};
