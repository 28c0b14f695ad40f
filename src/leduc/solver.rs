//! CFR+ training loop for Leduc Hold'em.
//!
//! Mirrors `original_source/demos/leduc/src/pysrc/Leduc.py::train`: one
//! iteration is two alternating half-iterations (player 0's regrets
//! updated, then player 1's), each flushed through
//! `LeducArena::flush_regrets()` before the next half begins. The average
//! strategy accumulates at every node (own reach-weighted) during Half A
//! only, so each info set's running average is touched exactly once per
//! iteration regardless of which player owns it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SolverError, SolverResult};
use crate::leduc::node_info::NodeInfo;
use crate::node::LeducArena;
use crate::types::{dealing_weight, Action, Rank};

/// On-disk snapshot of solver progress, grounded in the teacher's
/// `PreflopSolution::save`/`load` JSON cache convention.
#[derive(Serialize, Deserialize)]
pub struct Snapshot {
    iteration: u64,
    arena: LeducArena,
}

/// Iteration after which linear strategy weighting kicks in for the
/// regret delta (never applied to strategy accumulation).
const LINEAR_WARMUP: u64 = 500;

pub struct LeducSolver {
    arena: LeducArena,
    iteration: u64,
}

impl LeducSolver {
    pub fn new() -> Self {
        LeducSolver {
            arena: LeducArena::new(),
            iteration: 0,
        }
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Run `n` full iterations (each a player-0 half then a player-1 half).
    pub fn train(&mut self, n: u64) {
        for _ in 0..n {
            self.iteration += 1;

            for &p0 in &Rank::ALL {
                for &p1 in &Rank::ALL {
                    for &board in &Rank::ALL {
                        if p0 == p1 && p1 == board {
                            continue;
                        }
                        let weight = dealing_weight(p0, p1, board);
                        self.cfr([p0, p1, board], 0, p0.index() as usize * 8, [weight, weight], 0, true);
                    }
                }
            }
            self.arena.flush_regrets();

            for &p0 in &Rank::ALL {
                for &p1 in &Rank::ALL {
                    for &board in &Rank::ALL {
                        if p0 == p1 && p1 == board {
                            continue;
                        }
                        let weight = dealing_weight(p0, p1, board);
                        self.cfr([p0, p1, board], 0, p0.index() as usize * 8, [weight, weight], 1, false);
                    }
                }
            }
            self.arena.flush_regrets();
        }
    }

    /// `cards = [p0_card, p1_card, board_card]`. `depth` is unused
    /// bookkeeping kept for clarity at call sites; real recursion depth is
    /// bounded by the tree itself. `player_to_update` is the player whose
    /// regrets receive this half-iteration's deltas; the other player's
    /// nodes are still traversed (needed to compute utilities) but not
    /// updated.
    fn cfr(
        &mut self,
        cards: [Rank; 3],
        _depth: u32,
        hash: usize,
        reach: [f64; 2],
        player_to_update: usize,
        accumulate_strategy: bool,
    ) -> f64 {
        let info = NodeInfo::decode(hash as u16);
        let stm = info.stm() as usize;
        let legal = info.moves();
        let legal_idx: Vec<usize> = legal.iter().map(|a| a.index()).collect();
        let opp_card = cards[1 - stm];

        let is_updating_player = stm == player_to_update;
        let strat = if accumulate_strategy {
            self.arena.current_strategy(hash, reach[stm], &legal_idx)
        } else {
            self.arena.current_strategy_no_accumulate(hash, &legal_idx)
        };

        let mut action_util = [0.0; 3];
        for &action in &legal {
            let a = action.index();
            if info.ends_hand(action) {
                action_util[a] = info.payout(action, opp_card);
            } else {
                let next_stm = info.next_stm(action) as usize;
                let next_card = cards[next_stm];
                let next_hash = info.next_hash(action, cards[2], next_card) as usize;
                let mut next_reach = reach;
                next_reach[stm] *= strat[a];
                let child = self.cfr(cards, _depth + 1, next_hash, next_reach, player_to_update, accumulate_strategy);
                action_util[a] = if next_stm != stm { -child } else { child };
            }
        }

        let node_util: f64 = legal.iter().map(|a| strat[a.index()] * action_util[a.index()]).sum();

        if is_updating_player {
            let linear_weight = self.iteration.saturating_sub(LINEAR_WARMUP) as f64;
            let weight = if linear_weight > 0.0 { linear_weight } else { 1.0 };
            for &action in &legal {
                let a = action.index();
                let regret = (action_util[a] - node_util) * reach[1 - stm] * weight;
                self.arena.add_delta(hash, a, regret);
            }
        }

        node_util
    }

    pub fn flush_regrets(&mut self) {
        self.arena.flush_regrets();
    }

    pub fn get_all_strategies(&self) -> Vec<[f64; 3]> {
        self.arena.all_average_strategies(|hash| {
            NodeInfo::decode(hash as u16).moves().iter().map(|a| a.index()).collect()
        })
    }

    pub fn stored_strategy(&self, hash: u16) -> [f64; 3] {
        let legal: Vec<usize> = NodeInfo::decode(hash).moves().iter().map(|a| a.index()).collect();
        self.arena.stored_strategy(hash as usize, &legal)
    }

    /// Persist training progress so a later run can resume with `load`.
    pub fn save(&self, path: &Path) -> SolverResult<()> {
        let snapshot = Snapshot {
            iteration: self.iteration,
            arena: self.arena.clone(),
        };
        let json = serde_json::to_string(&snapshot)?;
        std::fs::write(path, json).map_err(|source| SolverError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> SolverResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|_| SolverError::StrategyFileNotFound(path.display().to_string()))?;
        let snapshot: Snapshot = serde_json::from_str(&json)?;
        Ok(LeducSolver {
            arena: snapshot.arena,
            iteration: snapshot.iteration,
        })
    }
}

impl Default for LeducSolver {
    fn default() -> Self {
        Self::new()
    }
}
