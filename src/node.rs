//! Regret-matching accumulators.
//!
//! `Node` is the Kuhn-style accumulator: vanilla CFR, regrets updated
//! in place every visit (`original_source/src/pysrc/Node.py`).
//!
//! `LeducArena` is the CFR+ accumulator for the 528-entry Leduc tree:
//! regrets are never mutated during a traversal. Every `cfr()` call
//! writes into a pending delta buffer, and a half-iteration's worth of
//! deltas is applied and floored at zero exactly once, in
//! `LeducArena::flush_regrets()`.

use serde::{Deserialize, Serialize};

pub const LEDUC_NODES: usize = 528;
const ACTIONS: usize = 3;

/// Vanilla-CFR accumulator, used for Kuhn's two-action info sets.
#[derive(Debug, Clone)]
pub struct Node {
    pub regrets: Vec<f64>,
    pub strategy: Vec<f64>,
}

impl Node {
    pub fn new(num_actions: usize) -> Self {
        Node {
            regrets: vec![0.0; num_actions],
            strategy: vec![0.0; num_actions],
        }
    }

    /// Regret-matching strategy: proportional to positive regret, uniform
    /// fallback. Accumulates into the average-strategy buffer weighted by
    /// `reach_own` (the acting player's own reach probability).
    pub fn current_strategy(&mut self, reach_own: f64) -> Vec<f64> {
        let strat = self.current_strategy_no_accumulate();
        for (i, &p) in strat.iter().enumerate() {
            self.strategy[i] += reach_own * p;
        }
        strat
    }

    /// Same regret-matching computation, without touching the average
    /// strategy accumulator (used when the opponent is not being updated
    /// this half-iteration).
    pub fn current_strategy_no_accumulate(&self) -> Vec<f64> {
        let positive_sum: f64 = self.regrets.iter().map(|&r| r.max(0.0)).sum();
        let n = self.regrets.len();
        if positive_sum > 0.0 {
            self.regrets.iter().map(|&r| r.max(0.0) / positive_sum).collect()
        } else {
            vec![1.0 / n as f64; n]
        }
    }

    /// Normalized average strategy, uniform fallback if never accumulated.
    pub fn stored_strategy(&self) -> Vec<f64> {
        let total: f64 = self.strategy.iter().sum();
        let n = self.strategy.len();
        if total > 0.0 {
            self.strategy.iter().map(|&s| s / total).collect()
        } else {
            vec![1.0 / n as f64; n]
        }
    }

    /// Vanilla (unfloored) regret update, weighted by the opponent's reach.
    pub fn add_regret(&mut self, action: usize, regret: f64, reach_opp: f64) {
        self.regrets[action] += regret * reach_opp;
    }
}

/// Fixed 528-entry arena for Leduc, one `[f64; 3]` regret/strategy/delta
/// row per hash. Illegal actions at a given hash are always zero and are
/// simply never touched by the solver (their NodeInfo::moves() mask never
/// selects them).
#[derive(Serialize, Deserialize, Clone)]
pub struct LeducArena {
    regrets: Vec<[f64; ACTIONS]>,
    strategy: Vec<[f64; ACTIONS]>,
    pending: Vec<[f64; ACTIONS]>,
}

impl LeducArena {
    pub fn new() -> Self {
        LeducArena {
            regrets: vec![[0.0; ACTIONS]; LEDUC_NODES],
            strategy: vec![[0.0; ACTIONS]; LEDUC_NODES],
            pending: vec![[0.0; ACTIONS]; LEDUC_NODES],
        }
    }

    /// Regret-matching strategy at `hash`, restricted to `legal` actions.
    /// Accumulates into the average-strategy buffer weighted by
    /// `reach_own`.
    pub fn current_strategy(&mut self, hash: usize, reach_own: f64, legal: &[usize]) -> [f64; ACTIONS] {
        let strat = self.current_strategy_no_accumulate(hash, legal);
        for &a in legal {
            self.strategy[hash][a] += reach_own * strat[a];
        }
        strat
    }

    pub fn current_strategy_no_accumulate(&self, hash: usize, legal: &[usize]) -> [f64; ACTIONS] {
        let regrets = &self.regrets[hash];
        let positive_sum: f64 = legal.iter().map(|&a| regrets[a].max(0.0)).sum();
        let mut out = [0.0; ACTIONS];
        if positive_sum > 0.0 {
            for &a in legal {
                out[a] = regrets[a].max(0.0) / positive_sum;
            }
        } else {
            let uniform = 1.0 / legal.len() as f64;
            for &a in legal {
                out[a] = uniform;
            }
        }
        out
    }

    /// Normalized average strategy at `hash`, restricted to `legal`.
    pub fn stored_strategy(&self, hash: usize, legal: &[usize]) -> [f64; ACTIONS] {
        let strategy = &self.strategy[hash];
        let total: f64 = legal.iter().map(|&a| strategy[a]).sum();
        let mut out = [0.0; ACTIONS];
        if total > 0.0 {
            for &a in legal {
                out[a] = strategy[a] / total;
            }
        } else {
            let uniform = 1.0 / legal.len() as f64;
            for &a in legal {
                out[a] = uniform;
            }
        }
        out
    }

    /// Queue a regret contribution for `hash`/`action`. Not applied until
    /// `flush_regrets()`.
    pub fn add_delta(&mut self, hash: usize, action: usize, delta: f64) {
        self.pending[hash][action] += delta;
    }

    /// Apply every queued delta into `regrets`, flooring at zero (CFR+),
    /// then clear the pending buffer.
    pub fn flush_regrets(&mut self) {
        for hash in 0..LEDUC_NODES {
            for a in 0..ACTIONS {
                if self.pending[hash][a] != 0.0 {
                    self.regrets[hash][a] = (self.regrets[hash][a] + self.pending[hash][a]).max(0.0);
                    self.pending[hash][a] = 0.0;
                }
            }
        }
    }

    pub fn all_average_strategies(&self, legal_of: impl Fn(usize) -> Vec<usize>) -> Vec<[f64; ACTIONS]> {
        (0..LEDUC_NODES)
            .map(|hash| self.stored_strategy(hash, &legal_of(hash)))
            .collect()
    }
}

impl Default for LeducArena {
    fn default() -> Self {
        Self::new()
    }
}
