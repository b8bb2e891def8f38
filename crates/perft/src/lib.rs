//! Perft - exhaustive move-path counting over rookery-chess
//!
//! [`perft`] walks the legal move tree to a fixed depth with make/unmake on
//! one position. [`divide`] reports the count below each root move, and
//! [`perft_parallel`] splits the root moves over rayon workers, each owning
//! a cloned position.

pub mod options;

use std::fmt;
use std::time::{Duration, Instant};

use log::{info, trace};
use rayon::prelude::*;
use rookery_chess::{Move, Position};

pub use options::PerftOptions;

/// Counts leaf positions `depth` plies below `position`.
///
/// Depth 0 counts the root itself. At depth 1 the legal move count is
/// returned without playing the moves.
pub fn perft(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.generate_legal();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in &moves {
        position.make_move(mv);
        nodes += perft(position, depth - 1);
        position.unmake_move(mv);
    }
    nodes
}

/// Per-root-move perft counts, sorted by move text.
///
/// Returns an empty list at depth 0, since there are no root moves to split.
pub fn divide(position: &mut Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut counts: Vec<(Move, u64)> = position
        .generate_legal()
        .iter()
        .map(|mv| {
            position.make_move(mv);
            let nodes = perft(position, depth - 1);
            position.unmake_move(mv);
            trace!("{mv}: {nodes}");
            (mv, nodes)
        })
        .collect();

    counts.sort_by_cached_key(|(mv, _)| mv.to_string());
    counts
}

/// Same count as [`perft`], with the root moves spread over the rayon pool.
pub fn perft_parallel(position: &Position, depth: u32) -> u64 {
    let mut root = position.clone();
    if depth <= 1 {
        return perft(&mut root, depth);
    }

    let moves: Vec<Move> = root.generate_legal().iter().collect();
    moves
        .par_iter()
        .map(|&mv| {
            let mut child = position.clone();
            child.make_move(mv);
            perft(&mut child, depth - 1)
        })
        .sum()
}

/// Outcome of a timed perft run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PerftReport {
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
}

impl PerftReport {
    /// Throughput of the run. Zero when no measurable time elapsed.
    pub fn nodes_per_second(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.nodes as f64 / secs) as u64
        } else {
            0
        }
    }
}

impl fmt::Display for PerftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "depth {}: {} nodes in {:.3}s ({} nps)",
            self.depth,
            self.nodes,
            self.elapsed.as_secs_f64(),
            self.nodes_per_second()
        )
    }
}

/// Resolves the root position from `options` and times a perft count.
pub fn run(options: &PerftOptions) -> rookery_core::Result<PerftReport> {
    let mut position = options.position()?;

    let start = Instant::now();
    let nodes = if options.parallel {
        perft_parallel(&position, options.depth)
    } else {
        perft(&mut position, options.depth)
    };
    let report = PerftReport {
        depth: options.depth,
        nodes,
        elapsed: start.elapsed(),
    };

    info!("{report}");
    Ok(report)
}
