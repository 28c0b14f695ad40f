//! File output: strategy/exploitability CSVs and human-readable reports.
//!
//! Grounded in the teacher's `PreflopSolution::save` (plain
//! `std::fs::write`, `SolverError::Io` wrapping the underlying
//! `std::io::Error`) and its `colored`-driven CLI feedback.

use std::path::Path;

use colored::Colorize;

use crate::error::{SolverError, SolverResult};
use crate::leduc::{hash_to_string, node_info::NodeInfo};
use crate::node::LEDUC_NODES;
use crate::types::Action;

fn warn_if_exists(path: &Path) {
    if path.exists() {
        println!("{} {} already exists, overwriting", "warning:".yellow().bold(), path.display());
    }
}

fn write_file(path: &Path, contents: &str) -> SolverResult<()> {
    warn_if_exists(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| SolverError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }
    std::fs::write(path, contents).map_err(|source| SolverError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// `iteration,exploitability_mbb` rows, one per sample point.
pub fn write_exploitability_csv(path: &Path, samples: &[(u64, f64)]) -> SolverResult<()> {
    let mut out = String::from("iteration,exploitability_mbb\n");
    for (iteration, mbb) in samples {
        out.push_str(&format!("{iteration},{mbb:.6}\n"));
    }
    write_file(path, &out)
}

/// `hash,check,bet,raise` rows for all 528 Leduc info sets. Illegal
/// actions at a hash are written as `0.000000`.
pub fn write_leduc_strategy_csv(path: &Path, strategies: &[[f64; 3]]) -> SolverResult<()> {
    assert_eq!(strategies.len(), LEDUC_NODES);
    let mut out = String::from("hash,check,bet,raise\n");
    for (hash, strat) in strategies.iter().enumerate() {
        out.push_str(&format!("{},{:.6},{:.6},{:.6}\n", hash, strat[0], strat[1], strat[2]));
    }
    write_file(path, &out)
}

/// Human-readable `key -> c:p, b:p, r:p` lines, one per info set, using
/// only the legal actions at that hash.
pub fn write_leduc_strategy_report(path: &Path, strategies: &[[f64; 3]]) -> SolverResult<()> {
    assert_eq!(strategies.len(), LEDUC_NODES);
    let mut out = String::from("Leduc Hold'em CFR+ strategy\n");
    out.push_str(&"=".repeat(40));
    out.push('\n');
    for hash in 0..LEDUC_NODES {
        let info = NodeInfo::decode(hash as u16);
        let legal = info.moves();
        let strat = strategies[hash];
        let parts: Vec<String> = legal.iter().map(|a| format!("{}:{:.2}", a.to_char(), strat[a.index()])).collect();
        out.push_str(&format!("({}) {:20} -> {}\n", info.stm(), hash_to_string(hash as u16), parts.join(", ")));
    }
    write_file(path, &out)
}

/// Best-response report: EV/exploitability header followed by the same
/// per-node layout as [`write_leduc_strategy_report`].
pub fn write_best_response_report(
    path: &Path,
    ev_player0: f64,
    ev_player1: f64,
    br_strategy: &[[f64; 3]],
) -> SolverResult<()> {
    let mut out = String::new();
    out.push_str("Leduc Hold'em best response\n");
    out.push_str(&"=".repeat(40));
    out.push('\n');
    out.push_str(&format!("player 0 best-response EV: {ev_player0:.6} bb\n"));
    out.push_str(&format!("player 1 best-response EV: {ev_player1:.6} bb\n"));
    out.push_str(&format!("exploitability: {:.6} bb\n\n", (ev_player0 + ev_player1) / 2.0));
    for hash in 0..LEDUC_NODES {
        let info = NodeInfo::decode(hash as u16);
        let legal = info.moves();
        let strat = br_strategy[hash];
        let parts: Vec<String> = legal
            .iter()
            .map(|a: &Action| format!("{}:{:.2}", a.to_char(), strat[a.index()]))
            .collect();
        out.push_str(&format!("({}) {:20} -> {}\n", info.stm(), hash_to_string(hash as u16), parts.join(", ")));
    }
    write_file(path, &out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("leduc_cfr_test_{name}_{}", std::process::id()))
    }

    #[test]
    fn exploitability_csv_has_expected_header_and_rows() {
        let path = scratch_path("exploit.csv");
        write_exploitability_csv(&path, &[(0, 500.0), (1000, 12.5)]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("iteration,exploitability_mbb\n"));
        assert!(contents.contains("1000,12.500000\n"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn strategy_csv_round_trips_every_hash() {
        let path = scratch_path("strategy.csv");
        let strategies = vec![[0.5, 0.25, 0.25]; LEDUC_NODES];
        write_leduc_strategy_csv(&path, &strategies).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), LEDUC_NODES + 1);
        std::fs::remove_file(&path).ok();
    }
}
