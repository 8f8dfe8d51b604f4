//! HEXMC MCTS - Monte-Carlo move evaluation
//!
//! Ranks candidate moves by exhaustive random rollouts: every trial
//! fills the remaining board uniformly at random and asks the
//! connectivity oracle who connected. Hex cannot draw, so a finished
//! board always has exactly one winner and the win rate is a sound
//! (if noisy) proxy for move quality.

pub mod evaluator;

pub use evaluator::MonteCarloAi;
