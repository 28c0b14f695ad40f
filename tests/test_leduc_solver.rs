//! End-to-end tests for the Leduc CFR+ solver.
//!
//! Validates exploitability convergence, strategy validity across the
//! whole 528-node tree, best-response consistency, and the node-hash
//! pretty-printer's bit-exactness.

use leduc_cfr::leduc::{hash_to_string, BestResponse, LeducSolver, NodeInfo};
use leduc_cfr::node::LEDUC_NODES;

// ---------------------------------------------------------------------------
// Exploitability convergence
// ---------------------------------------------------------------------------

#[test]
fn exploitability_decreases_with_iterations() {
    let mut low = LeducSolver::new();
    low.train(200);
    let mut high = LeducSolver::new();
    high.train(5000);

    let mut br = BestResponse::new();

    br.load_strategy(low.get_all_strategies());
    let exploit_low = br.compute(0) + br.compute(1);

    br.load_strategy(high.get_all_strategies());
    let exploit_high = br.compute(0) + br.compute(1);

    assert!(
        exploit_high < exploit_low,
        "exploitability should shrink with more iterations: low={exploit_low}, high={exploit_high}"
    );
}

#[test]
fn training_is_deterministic_across_runs() {
    let mut a = LeducSolver::new();
    a.train(500);
    let mut b = LeducSolver::new();
    b.train(500);

    for hash in 0..LEDUC_NODES as u16 {
        assert_eq!(a.stored_strategy(hash), b.stored_strategy(hash), "hash {hash} diverged");
    }
}

// ---------------------------------------------------------------------------
// Strategy validity
// ---------------------------------------------------------------------------

#[test]
fn every_node_has_a_well_formed_average_strategy() {
    let mut solver = LeducSolver::new();
    solver.train(1000);
    for hash in 0..LEDUC_NODES as u16 {
        let info = NodeInfo::decode(hash);
        let legal = info.moves();
        let strat = solver.stored_strategy(hash);
        let sum: f64 = legal.iter().map(|a| strat[a.index()]).sum();
        assert!((sum - 1.0).abs() < 1e-9, "hash {hash}: {strat:?}");
        for a in 0..3 {
            if !legal.iter().any(|m| m.index() == a) {
                assert_eq!(strat[a], 0.0, "hash {hash} action {a} should be illegal-zero");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Best response self-consistency
// ---------------------------------------------------------------------------

#[test]
fn best_response_ev_is_stable_when_recomputed() {
    let mut solver = LeducSolver::new();
    solver.train(2000);
    let sigma = solver.get_all_strategies();

    let mut br1 = BestResponse::new();
    br1.load_strategy(sigma.clone());
    let ev1 = br1.compute(0);

    let mut br2 = BestResponse::new();
    br2.load_strategy(sigma);
    let ev2 = br2.compute(0);

    assert!((ev1 - ev2).abs() < 1e-9);
}

#[test]
fn a_trained_strategy_is_harder_to_exploit_than_uniform() {
    let uniform: Vec<[f64; 3]> = (0..LEDUC_NODES)
        .map(|hash| {
            let legal = NodeInfo::decode(hash as u16).moves();
            let p = 1.0 / legal.len() as f64;
            let mut row = [0.0; 3];
            for a in legal {
                row[a.index()] = p;
            }
            row
        })
        .collect();

    let mut br = BestResponse::new();
    br.load_strategy(uniform);
    let uniform_exploit = br.compute(0) + br.compute(1);

    let mut solver = LeducSolver::new();
    solver.train(3000);
    br.load_strategy(solver.get_all_strategies());
    let trained_exploit = br.compute(0) + br.compute(1);

    assert!(trained_exploit < uniform_exploit);
}

// ---------------------------------------------------------------------------
// Node hash pretty-printer
// ---------------------------------------------------------------------------

#[test]
fn pretty_printer_covers_every_hash_without_panicking() {
    for hash in 0..LEDUC_NODES as u16 {
        let label = hash_to_string(hash);
        assert!(!label.is_empty());
    }
}

#[test]
fn round1_and_round2_labels_use_the_documented_separators() {
    assert!(!hash_to_string(0).contains('|'));
    assert!(hash_to_string(24).contains('|'));
    assert!(hash_to_string(24).contains('/'));
}
