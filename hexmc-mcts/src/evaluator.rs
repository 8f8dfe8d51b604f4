//! All-moves-as-first rollout evaluator
//!
//! ## Architecture
//! - Level 1: choose_best_move() - candidate ranking
//! - Level 2: evaluate_move() - win rate over N trials
//! - Level 3: run_trial() - one random completion, mutate then revert

use hexmc_core::{Board, Color, PathFinder, VertexId};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Monte-Carlo move evaluator with its own seedable RNG
pub struct MonteCarloAi {
    trials: usize,
    rng: ChaCha8Rng,
    finder: PathFinder,
}

impl MonteCarloAi {
    /// Evaluator seeded from OS entropy
    pub fn new(trials: usize) -> Self {
        Self {
            trials,
            rng: ChaCha8Rng::from_entropy(),
            finder: PathFinder::new(),
        }
    }

    /// Deterministic evaluator for tests and reproducible games
    pub fn with_seed(trials: usize, seed: u64) -> Self {
        Self {
            trials,
            rng: ChaCha8Rng::seed_from_u64(seed),
            finder: PathFinder::new(),
        }
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Estimate the win rate of placing `active`'s stone on
    /// `candidate`, over this evaluator's trial count.
    ///
    /// Every trial colors the whole remaining board (strict turn
    /// alternation starting with the opponent), queries the oracle for
    /// `active`'s boundary pair, then reverts every touched vertex.
    /// The board is bit-for-bit unchanged when this returns.
    /// `candidate` must be an unoccupied grid vertex.
    pub fn evaluate_move(&mut self, board: &mut Board, candidate: VertexId, active: Color) -> f32 {
        debug_assert!(board.unoccupied().contains(&candidate));
        if self.trials == 0 {
            return 0.0;
        }

        // the candidate is tentatively taken, so it never enters the pool
        let mut pool: Vec<VertexId> = board
            .unoccupied()
            .iter()
            .copied()
            .filter(|&id| id != candidate)
            .collect();

        let mut wins = 0usize;
        for _ in 0..self.trials {
            if run_trial(
                board,
                &mut self.finder,
                &mut self.rng,
                candidate,
                &mut pool,
                active,
            ) {
                wins += 1;
            }
        }

        wins as f32 / self.trials as f32
    }

    /// Pick the best move for `active` among all unoccupied vertices.
    ///
    /// Ties break to the first candidate in unoccupied-list order, so
    /// results are reproducible for a fixed seed. The board must not
    /// be full.
    pub fn choose_best_move(&mut self, board: &mut Board, active: Color) -> VertexId {
        let candidates: Vec<VertexId> = board.unoccupied().to_vec();
        assert!(!candidates.is_empty(), "no legal move on a full board");

        let mut best = candidates[0];
        let mut best_rate = -1.0f32;
        for candidate in candidates {
            let rate = self.evaluate_move(board, candidate, active);
            if rate > best_rate {
                best_rate = rate;
                best = candidate;
            }
        }

        debug!(vertex = best, rate = best_rate, "chose move");
        best
    }

    /// Parallel variant: candidates are sharded across rayon workers,
    /// each on its own board clone with a seed derived from this
    /// evaluator's RNG. Tie-break is still first-in-order.
    #[cfg(feature = "parallel")]
    pub fn choose_best_move_parallel(&mut self, board: &Board, active: Color) -> VertexId {
        use rayon::prelude::*;

        let candidates: Vec<VertexId> = board.unoccupied().to_vec();
        assert!(!candidates.is_empty(), "no legal move on a full board");

        let trials = self.trials;
        let base_seed: u64 = self.rng.gen();
        let rates: Vec<f32> = candidates
            .par_iter()
            .enumerate()
            .map(|(i, &candidate)| {
                let mut local = board.clone();
                let mut ai = MonteCarloAi::with_seed(trials, base_seed.wrapping_add(i as u64));
                ai.evaluate_move(&mut local, candidate, active)
            })
            .collect();

        let mut best = 0;
        for (i, &rate) in rates.iter().enumerate() {
            if rate > rates[best] {
                best = i;
            }
        }

        debug!(vertex = candidates[best], rate = rates[best], "chose move (parallel)");
        candidates[best]
    }
}

/// One rollout. Colors the candidate and the whole pool, asks the
/// oracle whether `active` connected, then restores every vertex it
/// touched. Single exit so the revert cannot be skipped.
fn run_trial(
    board: &mut Board,
    finder: &mut PathFinder,
    rng: &mut ChaCha8Rng,
    candidate: VertexId,
    pool: &mut [VertexId],
    active: Color,
) -> bool {
    board.set_color(candidate, active);

    pool.shuffle(rng);
    let mut turn = active.opponent();
    for &id in pool.iter() {
        board.set_color(id, turn);
        turn = turn.opponent();
    }

    let won = board.has_connection(finder, active);

    board.set_color(candidate, Color::Empty);
    for &id in pool.iter() {
        board.set_color(id, Color::Empty);
    }

    won
}

// ============================================================================
// TESTS
// ============================================================================
