//! Breadth-first canal search from the start tile to the goal tile
//!
//! Two orthogonally adjacent cells are linked when both are occupied and each
//! tile is open on the side facing the other. Neighbours are expanded in
//! `Side::ALL` order so identical boards always yield identical paths.

use crate::algorithm::adjacency::{AdjacencyResolver, EffectiveEdges};
use crate::algorithm::bitset::CellBitset;
use crate::spatial::board::BoardState;
use crate::spatial::grid::{GridCell, Side};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Outcome of one connectivity query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectivityReport {
    /// Whether the goal is reachable from the start
    pub connected: bool,
    /// Cells from start to goal inclusive, empty when not connected
    pub path: Vec<GridCell>,
    /// Number of cells dequeued before the search stopped
    pub explored: usize,
    /// Board revision the report was computed at
    pub revision: u64,
}

impl ConnectivityReport {
    /// Check whether the board has not been mutated since this report
    pub const fn is_current(&self, board: &BoardState) -> bool {
        self.revision == board.revision()
    }
}

/// Reusable breadth-first search state
///
/// Holds scratch buffers between queries; no result is ever cached.
#[derive(Debug, Clone)]
pub struct ConnectivityEngine {
    visited: CellBitset,
    parents: Vec<Option<usize>>,
    queue: VecDeque<GridCell>,
    /// Cells in the order they were dequeued
    order: Vec<GridCell>,
}

impl Default for ConnectivityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityEngine {
    /// Create an engine with empty scratch buffers
    pub fn new() -> Self {
        Self {
            visited: CellBitset::new(0),
            parents: Vec::new(),
            queue: VecDeque::new(),
            order: Vec::new(),
        }
    }

    /// Determine whether a canal path links start to goal
    ///
    /// Never fails. Boards without a path report `connected: false`.
    pub fn is_connected(&mut self, board: &BoardState) -> ConnectivityReport {
        let goal = board.goal_cell();
        let (reached_goal, explored) = self.search(board, Some(goal));

        let path = if reached_goal {
            self.trace_path(board, goal)
        } else {
            Vec::new()
        };

        debug!(
            connected = reached_goal,
            explored,
            path_len = path.len(),
            revision = board.revision(),
            "connectivity search finished"
        );

        ConnectivityReport {
            connected: reached_goal,
            path,
            explored,
            revision: board.revision(),
        }
    }

    /// Every cell reachable from the start, in breadth-first order
    pub fn reachable(&mut self, board: &BoardState) -> Vec<GridCell> {
        let (_, explored) = self.search(board, None);
        debug!(explored, revision = board.revision(), "reachability search finished");
        self.order.clone()
    }

    /// Run the search, stopping early when `target` is dequeued
    ///
    /// Returns whether the target was reached and how many cells were dequeued.
    fn search(&mut self, board: &BoardState, target: Option<GridCell>) -> (bool, usize) {
        let grid = board.grid();
        let resolver = AdjacencyResolver::new(board.catalog());

        self.visited.reset(grid.cell_count());
        self.parents.clear();
        self.parents.resize(grid.cell_count(), None);
        self.queue.clear();
        self.order.clear();

        let start = board.start_cell();
        let Some(start_index) = grid.index_of(start) else {
            return (false, 0);
        };
        if board.at(start).is_none() {
            return (false, 0);
        }

        self.visited.insert(start_index);
        self.queue.push_back(start);
        let mut explored = 0;

        while let Some(cell) = self.queue.pop_front() {
            explored += 1;
            self.order.push(cell);
            if Some(cell) == target {
                return (true, explored);
            }

            let Some(edges) = Self::edges_at(&resolver, board, cell) else {
                continue;
            };
            let Some(cell_index) = grid.index_of(cell) else {
                continue;
            };

            for side in Side::ALL {
                if !edges.is_open(side) {
                    continue;
                }

                let Some(next) = cell.neighbor(side) else {
                    continue;
                };
                let Some(next_index) = grid.index_of(next) else {
                    continue;
                };
                if self.visited.contains(next_index) {
                    continue;
                }

                let faces_back = Self::edges_at(&resolver, board, next)
                    .is_some_and(|next_edges| next_edges.is_open(side.opposite()));
                if !faces_back {
                    continue;
                }

                self.visited.insert(next_index);
                if let Some(parent) = self.parents.get_mut(next_index) {
                    *parent = Some(cell_index);
                }
                self.queue.push_back(next);
            }
        }

        (false, explored)
    }

    fn edges_at(
        resolver: &AdjacencyResolver<'_>,
        board: &BoardState,
        cell: GridCell,
    ) -> Option<EffectiveEdges> {
        let tile = board.at(cell)?;
        match resolver.effective_edges(tile) {
            Ok(edges) => Some(edges),
            Err(error) => {
                warn!(%cell, %error, "treating unresolvable tile as closed");
                None
            }
        }
    }

    fn trace_path(&self, board: &BoardState, goal: GridCell) -> Vec<GridCell> {
        let grid = board.grid();
        let mut path = Vec::new();
        let mut current = grid.index_of(goal);

        while let Some(index) = current {
            if let Some(cell) = grid.cell_at(index) {
                path.push(cell);
            }
            current = self.parents.get(index).copied().flatten();
        }

        path.reverse();
        path
    }
}

/// Run a one-off connectivity query with fresh scratch buffers
pub fn is_connected(board: &BoardState) -> ConnectivityReport {
    ConnectivityEngine::new().is_connected(board)
}
