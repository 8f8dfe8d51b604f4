//! Generic graph utilities over the positional text format
//!
//! These commands exercise the graph engine outside of Hex: load a
//! file whose first line is the vertex count and whose remaining lines
//! are `<from> <to> <weight>` triples, then run the shortest-path
//! oracle or Kruskal over it. Loaded vertices are uncolored, which the
//! oracle treats as one uniform color.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use hexmc_core::{minimum_spanning_tree, Graph, PathFinder};

#[derive(Args)]
pub struct PathArgs {
    /// Graph description file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Source vertex id
    #[arg(long)]
    pub from: usize,

    /// Target vertex id
    #[arg(long)]
    pub to: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct MstArgs {
    /// Graph description file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PathReport {
    reached: bool,
    distance: f32,
    path: Vec<usize>,
}

#[derive(Serialize)]
struct MstReport {
    edges: Vec<MstEdge>,
    total_weight: f32,
}

#[derive(Serialize)]
struct MstEdge {
    from: usize,
    to: usize,
    weight: f32,
}

fn load(file: &PathBuf) -> Result<Graph> {
    Graph::from_file(file).with_context(|| format!("loading {}", file.display()))
}

pub fn run_path(args: &PathArgs) -> Result<()> {
    let graph = load(&args.file)?;
    if args.from >= graph.vertex_count() || args.to >= graph.vertex_count() {
        bail!(
            "vertex ids must be below {} (got {} and {})",
            graph.vertex_count(),
            args.from,
            args.to
        );
    }

    let mut finder = PathFinder::new();
    let reached = finder.reachable(&graph, args.from, args.to);

    if args.json {
        let report = PathReport {
            reached,
            distance: finder.distance(),
            path: finder.path().to_vec(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if reached {
        let hops: Vec<String> = finder.path().iter().map(|v| v.to_string()).collect();
        println!("{} (distance {})", hops.join(" -> "), finder.distance());
    } else {
        println!("no path from {} to {}", args.from, args.to);
    }
    Ok(())
}

pub fn run_mst(args: &MstArgs) -> Result<()> {
    let graph = load(&args.file)?;
    let tree = minimum_spanning_tree(&graph);

    if args.json {
        let report = MstReport {
            edges: tree
                .edges
                .iter()
                .map(|&id| {
                    let e = graph.edge(id);
                    MstEdge {
                        from: e.from(),
                        to: e.to(),
                        weight: e.weight,
                    }
                })
                .collect(),
            total_weight: tree.total_weight,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for &id in &tree.edges {
            let e = graph.edge(id);
            println!("{} - {}  (weight {})", e.from(), e.to(), e.weight);
        }
        println!("total weight: {}", tree.total_weight);
    }
    Ok(())
}
