//! End-to-end tests for the Kuhn vanilla-CFR solver, checked against the
//! game's known closed-form equilibrium.

use leduc_cfr::kuhn::KuhnSolver;

#[test]
fn jack_folds_to_a_bet_almost_always() {
    let mut solver = KuhnSolver::new();
    solver.train(30_000);
    let strat = solver.stored_strategy("Jcb").expect("node visited during training");
    assert!((strat[0] - 1.0).abs() < 1e-2, "Jack should fold to a bet, got {strat:?}");
}

#[test]
fn king_opens_with_a_genuinely_mixed_strategy() {
    let mut solver = KuhnSolver::new();
    solver.train(30_000);
    let strat = solver.stored_strategy("K").expect("node visited during training");
    assert!(strat[1] > 0.3 && strat[1] < 0.7, "got {strat:?}");
}

#[test]
fn queen_facing_a_bet_mixes_near_the_known_indifference_point() {
    let mut solver = KuhnSolver::new();
    solver.train(30_000);
    // Queen with a showdown value strictly between Jack and King should
    // neither always call nor always fold when facing a bet.
    let strat = solver.stored_strategy("Qcb").expect("node visited during training");
    assert!(strat[1] > 0.0 && strat[1] < 1.0, "got {strat:?}");
}

#[test]
fn every_visited_node_has_a_normalized_strategy() {
    let mut solver = KuhnSolver::new();
    solver.train(5_000);
    for (key, strat) in solver.print_all() {
        let sum: f64 = strat.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "{key}: {strat:?}");
    }
}

#[test]
fn training_is_deterministic_across_runs() {
    let mut a = KuhnSolver::new();
    a.train(2_000);
    let mut b = KuhnSolver::new();
    b.train(2_000);
    assert_eq!(a.print_all(), b.print_all());
}
