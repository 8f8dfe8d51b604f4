//! Play command - interactive Hex against the Monte-Carlo AI
//!
//! ## Architecture
//! - Level 1: run() - turn loop
//! - Level 2: human_move(), ai_move()
//! - Level 3: render_board(), stone rendering helpers
//!
//! Blue (`o`) connects top to bottom and always moves first; Red (`x`)
//! connects left to right.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use rustc_hash::FxHashSet;
use tracing::info;

use hexmc_core::{Board, Color, PathFinder, VertexId};
use hexmc_mcts::MonteCarloAi;

#[derive(Args)]
pub struct PlayArgs {
    /// Board side length
    #[arg(long, default_value = "11", value_parser = parse_size)]
    pub size: usize,

    /// Rollout trials per candidate move
    #[arg(long, default_value = "5000")]
    pub trials: usize,

    /// Seed for a reproducible AI
    #[arg(long)]
    pub seed: Option<u64>,

    /// Which stone the human plays (o moves first)
    #[arg(long, value_enum, default_value = "o")]
    pub play_as: Side,
}

/// Human-visible stone choice
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Side {
    /// Red, connects left to right
    X,
    /// Blue, connects top to bottom, moves first
    O,
}

fn parse_size(s: &str) -> std::result::Result<usize, String> {
    let n: usize = s.parse().map_err(|_| "not a number".to_string())?;
    if [7, 11, 13, 19].contains(&n) {
        Ok(n)
    } else {
        Err("board size must be one of 7, 11, 13, 19".to_string())
    }
}

// ============================================================================
// TURN LOOP (Level 1)
// ============================================================================

pub fn run(args: &PlayArgs) -> Result<()> {
    let mut board = Board::new(args.size);
    let mut finder = PathFinder::new();
    let mut ai = match args.seed {
        Some(seed) => MonteCarloAi::with_seed(args.trials, seed),
        None => MonteCarloAi::new(args.trials),
    };

    let human = match args.play_as {
        Side::X => Color::Red,
        Side::O => Color::Blue,
    };

    // blue always opens
    let mut active = Color::Blue;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        if active == human {
            render_board(&board, &[]);
            let id = human_move(&mut input, &board, human)?;
            board.occupy(id, human);
        } else {
            let id = ai_move(&mut ai, &mut board, active);
            board.occupy(id, active);
        }

        if board.has_connection(&mut finder, active) {
            break;
        }
        active = active.opponent();
    }

    render_board(&board, finder.path());
    println!(
        "Player {} won the game!",
        stone_char(active).to_ascii_uppercase()
    );
    Ok(())
}

// ============================================================================
// MOVES (Level 2)
// ============================================================================

fn human_move(input: &mut impl BufRead, board: &Board, human: Color) -> Result<VertexId> {
    loop {
        print!(
            "Human Player {} move: ",
            stone_char(human).to_ascii_uppercase()
        );
        io::stdout().flush().context("flushing prompt")?;

        let mut line = String::new();
        if input.read_line(&mut line).context("reading move")? == 0 {
            bail!("input closed before the game finished");
        }

        match board.parse_coord(&line) {
            Some(id) if board.color(id) == Color::Empty => return Ok(id),
            Some(_) => println!("Selected place is already occupied!"),
            None => println!("Invalid input!"),
        }
    }
}

fn ai_move(ai: &mut MonteCarloAi, board: &mut Board, active: Color) -> VertexId {
    println!("\nThinking...");
    let start = Instant::now();
    let id = ai.choose_best_move(board, active);
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        trials = ai.trials(),
        "ai evaluated all candidates"
    );
    println!(
        "AI Player {} move: {}",
        stone_char(active).to_ascii_uppercase(),
        board.coord_string(id)
    );
    id
}

// ============================================================================
// RENDERING (Level 3)
// ============================================================================

fn stone_char(color: Color) -> char {
    match color {
        Color::Empty => '.',
        Color::Blue => 'o',
        Color::Red => 'x',
    }
}

/// Draw the slanted board. Vertices on `winning_path` are capitalized
/// so a finished game shows the connecting chain.
fn render_board(board: &Board, winning_path: &[VertexId]) {
    let n = board.size();
    let on_path: FxHashSet<VertexId> = winning_path.iter().copied().collect();

    let letters: String = (0..n)
        .map(|c| (b'A' + c as u8) as char)
        .map(|c| format!("{c}   "))
        .collect::<String>()
        .trim_end()
        .to_string();
    let blue_row: String = vec!["O"; n - 1].join("   ");
    let ruler = "-".repeat(4 * n - 2);

    println!();
    println!("          {blue_row}");
    println!("        {letters}");
    println!("        {ruler}");

    let mut indent = String::new();
    for row in 0..n {
        let cells: String = (0..n)
            .map(|col| {
                let id = board.index(row, col);
                let c = stone_char(board.color(id));
                if on_path.contains(&id) {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .map(|c| format!("{c}   "))
            .collect::<String>()
            .trim_end()
            .to_string();

        println!("{indent}{:>5} \\ {cells}\\ {}", row + 1, row + 1);
        if row != n - 1 {
            println!("{indent}   X{}X", " ".repeat(4 * n + 3));
        }
        indent.push_str("  ");
    }

    println!("{indent}      {ruler}");
    println!("{indent}        {letters}");
    println!("{indent}          {blue_row}");
    println!();
}
