//! Perft command-line driver.
//!
//! Usage:
//!   rookery-perft perft 5
//!   rookery-perft perft 4 --fen "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1" --parallel
//!   rookery-perft divide 3 --moves e2e4 e7e5

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use rookery_perft::{divide, PerftOptions};

#[derive(Parser)]
#[command(name = "rookery-perft")]
#[command(about = "Count move paths to verify legal move generation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count leaf positions at a fixed depth
    Perft {
        /// Plies to search below the root
        depth: u32,

        #[command(flatten)]
        root: RootArgs,

        /// Split root moves across worker threads
        #[arg(short, long)]
        parallel: bool,
    },

    /// Print the node count below each root move
    Divide {
        /// Plies to search below the root
        depth: u32,

        #[command(flatten)]
        root: RootArgs,
    },
}

#[derive(Args)]
struct RootArgs {
    /// Root position as FEN (defaults to the starting position)
    #[arg(short, long)]
    fen: Option<String>,

    /// Moves in long algebraic notation to play before counting
    #[arg(short, long, num_args = 1..)]
    moves: Vec<String>,
}

impl RootArgs {
    fn into_options(self, depth: u32) -> PerftOptions {
        PerftOptions {
            depth,
            fen: self.fen,
            moves: self.moves,
            parallel: false,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Perft {
            depth,
            root,
            parallel,
        } => {
            let options = root.into_options(depth).parallel(parallel);
            let report = rookery_perft::run(&options).context("Failed to set up root position")?;
            println!("{}", report.nodes);
        }
        Commands::Divide { depth, root } => {
            let options = root.into_options(depth);
            let mut position = options
                .position()
                .context("Failed to set up root position")?;

            let start = Instant::now();
            let counts = divide(&mut position, depth);
            let total: u64 = counts.iter().map(|(_, nodes)| nodes).sum();

            for (mv, nodes) in &counts {
                println!("{mv}: {nodes}");
            }
            println!();
            println!("Moves: {}", counts.len());
            println!("Nodes: {total}");
            log::info!(
                "divide depth {depth} finished in {:.3}s",
                start.elapsed().as_secs_f64()
            );
        }
    }

    Ok(())
}
