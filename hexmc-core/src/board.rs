//! Hex board topology as a graph
//!
//! An N x N grid of vertices laid out row-major plus four virtual
//! boundary vertices. Red owns LEFT/RIGHT, Blue owns TOP/BOTTOM; a
//! player has won when their boundary pair is connected through stones
//! of their color. The boundary vertices are colored at construction
//! and never change, and they are never legal move targets.

use crate::graph::{Color, Graph, VertexId};
use crate::path::PathFinder;

/// The hex board: grid graph, boundary vertices, unoccupied list
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    graph: Graph,
    left: VertexId,
    right: VertexId,
    top: VertexId,
    bottom: VertexId,
    unoccupied: Vec<VertexId>,
}

impl Board {
    /// Build an N x N board. `size` must be at least 2.
    pub fn new(size: usize) -> Self {
        assert!(size >= 2, "board size must be at least 2");

        let mut graph = Graph::new();
        let mut unoccupied = Vec::with_capacity(size * size);
        for _ in 0..size * size {
            unoccupied.push(graph.add_vertex(Color::Empty));
        }

        // Hex adjacency: east, south and south-west cover all six
        // neighbor directions once edges are undirected.
        for row in 0..size {
            for col in 0..size {
                let from = row * size + col;
                if col + 1 < size {
                    graph.add_edge(from, from + 1, 1.0);
                }
                if row + 1 < size {
                    graph.add_edge(from, from + size, 1.0);
                    if col > 0 {
                        graph.add_edge(from, from + size - 1, 1.0);
                    }
                }
            }
        }

        // Boundary vertices, allocated after the grid in fixed order.
        let left = graph.add_vertex(Color::Red);
        let right = graph.add_vertex(Color::Red);
        let top = graph.add_vertex(Color::Blue);
        let bottom = graph.add_vertex(Color::Blue);
        for i in 0..size {
            graph.add_edge(left, i * size, 1.0);
            graph.add_edge(right, i * size + size - 1, 1.0);
            graph.add_edge(top, i, 1.0);
            graph.add_edge(bottom, (size - 1) * size + i, 1.0);
        }

        Self {
            size,
            graph,
            left,
            right,
            top,
            bottom,
            unoccupied,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Grid vertex id at (row, col), both zero-based
    pub fn index(&self, row: usize, col: usize) -> VertexId {
        debug_assert!(row < self.size && col < self.size);
        row * self.size + col
    }

    /// The boundary pair whose connection means `color` has won
    pub fn boundary_pair(&self, color: Color) -> (VertexId, VertexId) {
        match color {
            Color::Red => (self.left, self.right),
            Color::Blue => (self.top, self.bottom),
            Color::Empty => panic!("Empty has no boundary pair"),
        }
    }

    pub fn color(&self, id: VertexId) -> Color {
        self.graph.vertex(id).color
    }

    /// Overlay a color for simulation. Does not touch the unoccupied
    /// list; rollouts must revert every vertex they color.
    pub fn set_color(&mut self, id: VertexId, color: Color) {
        debug_assert!(id < self.size * self.size, "boundary vertices are fixed");
        self.graph.vertex_mut(id).color = color;
    }

    /// Commit a real move: color the vertex and drop it from the
    /// unoccupied list. The vertex must be an empty grid vertex.
    pub fn occupy(&mut self, id: VertexId, color: Color) {
        assert!(id < self.size * self.size, "not a grid vertex");
        assert_eq!(self.graph.vertex(id).color, Color::Empty, "already occupied");
        self.graph.vertex_mut(id).color = color;

        let pos = self
            .unoccupied
            .iter()
            .position(|&v| v == id)
            .expect("occupied vertex missing from unoccupied list");
        self.unoccupied.remove(pos);
    }

    /// Currently unoccupied grid vertices, in discovery order
    pub fn unoccupied(&self) -> &[VertexId] {
        &self.unoccupied
    }

    pub fn is_full(&self) -> bool {
        self.unoccupied.is_empty()
    }

    /// Winner check: is `color`'s boundary pair connected?
    ///
    /// On success the finder retains the connecting path, which the
    /// renderer uses to highlight the winning chain.
    pub fn has_connection(&self, finder: &mut PathFinder, color: Color) -> bool {
        let (source, target) = self.boundary_pair(color);
        finder.reachable(&self.graph, source, target)
    }

    // ========================================================================
    // COORDINATES
    // ========================================================================

    /// Parse a human coordinate such as `D7`, `d7` or `7d`. The column
    /// letter may come first or last; rows are 1-based.
    pub fn parse_coord(&self, input: &str) -> Option<VertexId> {
        let s = input.trim();
        if s.len() < 2 || !s.is_ascii() {
            return None;
        }

        let first = s.chars().next()?;
        let last = s.chars().last()?;

        let (col, digits) = if first.is_ascii_alphabetic() {
            (letter_to_col(first)?, &s[1..])
        } else if last.is_ascii_alphabetic() {
            (letter_to_col(last)?, &s[..s.len() - 1])
        } else {
            return None;
        };
        if col >= self.size {
            return None;
        }

        let row = digits.parse::<usize>().ok()?.checked_sub(1)?;
        if row >= self.size {
            return None;
        }

        Some(self.index(row, col))
    }

    /// Render a grid vertex id as a coordinate string, e.g. `D7`
    pub fn coord_string(&self, id: VertexId) -> String {
        assert!(id < self.size * self.size, "not a grid vertex");
        let col = (b'A' + (id % self.size) as u8) as char;
        let row = id / self.size + 1;
        format!("{col}{row}")
    }
}

fn letter_to_col(c: char) -> Option<usize> {
    let c = c.to_ascii_uppercase();
    c.is_ascii_uppercase().then(|| (c as u8 - b'A') as usize)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_exists(board: &Board, u: VertexId, v: VertexId) -> bool {
        board
            .graph()
            .vertex(u)
            .edges()
            .iter()
            .any(|&e| board.graph().edge(e).other(u) == v)
    }

    #[test]
    fn test_two_by_two_topology() {
        let board = Board::new(2);
        assert_eq!(board.graph().vertex_count(), 8);

        // exact grid adjacency
        assert!(edge_exists(&board, 0, 1)); // east
        assert!(edge_exists(&board, 0, 2)); // south
        assert!(edge_exists(&board, 1, 2)); // south-west
        assert!(edge_exists(&board, 1, 3)); // south
        assert!(edge_exists(&board, 2, 3)); // east
        assert!(!edge_exists(&board, 0, 3));

        // boundary vertices in fixed order with fixed colors
        let (left, right) = board.boundary_pair(Color::Red);
        let (top, bottom) = board.boundary_pair(Color::Blue);
        assert_eq!((left, right, top, bottom), (4, 5, 6, 7));
        assert_eq!(board.color(left), Color::Red);
        assert_eq!(board.color(bottom), Color::Blue);
        assert!(edge_exists(&board, left, 0));
        assert!(edge_exists(&board, left, 2));
        assert!(edge_exists(&board, right, 1));
        assert!(edge_exists(&board, top, 0));
        assert!(edge_exists(&board, top, 1));
        assert!(edge_exists(&board, bottom, 2));
    }

    #[test]
    fn test_two_by_two_win_detection() {
        let mut board = Board::new(2);
        let mut finder = PathFinder::new();

        // column 0 alone leaves the right edge untouched
        board.occupy(0, Color::Red);
        board.occupy(2, Color::Red);
        assert!(!board.has_connection(&mut finder, Color::Red));

        // vertex 3 sits in column 1 and closes the chain
        board.occupy(3, Color::Red);
        assert!(board.has_connection(&mut finder, Color::Red));
        assert!(!board.has_connection(&mut finder, Color::Blue));
    }

    #[test]
    fn test_win_requires_complete_chain() {
        let mut board = Board::new(3);
        let mut finder = PathFinder::new();

        board.occupy(board.index(1, 0), Color::Red);
        board.occupy(board.index(1, 1), Color::Red);
        assert!(!board.has_connection(&mut finder, Color::Red));

        board.occupy(board.index(1, 2), Color::Red);
        assert!(board.has_connection(&mut finder, Color::Red));
        // path runs left boundary -> row 1 -> right boundary
        assert_eq!(finder.path().len(), 5);
    }

    #[test]
    fn test_occupy_updates_unoccupied_list() {
        let mut board = Board::new(3);
        assert_eq!(board.unoccupied().len(), 9);
        board.occupy(4, Color::Blue);
        assert_eq!(board.unoccupied().len(), 8);
        assert!(!board.unoccupied().contains(&4));
        assert!(!board.is_full());
    }

    #[test]
    #[should_panic(expected = "already occupied")]
    fn test_occupy_twice_panics() {
        let mut board = Board::new(3);
        board.occupy(4, Color::Blue);
        board.occupy(4, Color::Red);
    }

    #[test]
    fn test_coordinate_round_trip() {
        let board = Board::new(11);
        let id = board.index(6, 3); // D7
        assert_eq!(board.coord_string(id), "D7");
        assert_eq!(board.parse_coord("D7"), Some(id));
        assert_eq!(board.parse_coord("d7"), Some(id));
        assert_eq!(board.parse_coord("7d"), Some(id));
    }

    #[test]
    fn test_parse_coord_rejects_garbage() {
        let board = Board::new(7);
        assert_eq!(board.parse_coord(""), None);
        assert_eq!(board.parse_coord("A"), None);
        assert_eq!(board.parse_coord("A0"), None);
        assert_eq!(board.parse_coord("A8"), None); // row out of range
        assert_eq!(board.parse_coord("H1"), None); // column out of range
        assert_eq!(board.parse_coord("12"), None);
        assert_eq!(board.parse_coord("AA"), None);
    }

    #[test]
    fn test_full_board_has_exactly_one_winner() {
        // checkerboard-ish fill of a 3x3: Hex cannot draw, so exactly
        // one boundary pair must connect.
        let mut board = Board::new(3);
        let ids: Vec<VertexId> = board.unoccupied().to_vec();
        let mut color = Color::Blue;
        for id in ids {
            board.occupy(id, color);
            color = color.opponent();
        }
        assert!(board.is_full());

        let mut finder = PathFinder::new();
        let red = board.has_connection(&mut finder, Color::Red);
        let blue = board.has_connection(&mut finder, Color::Blue);
        assert!(red != blue, "exactly one player must win");
    }
}
