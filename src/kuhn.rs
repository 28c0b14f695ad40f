//! Kuhn poker: vanilla CFR over a `HashMap<String, Node>`, grounded in
//! `original_source/src/pysrc/Kuhn.py`. Unlike Leduc's arena, regrets are
//! updated in place on every visit, never floored, never linearly weighted.

use std::collections::HashMap;

use crate::node::Node;
use crate::types::{Action, Rank};

const TAILS: [&str; 8] = ["", "c", "b", "cc", "cb", "bb", "cbb", "cbc"];

pub struct KuhnSolver {
    nodes: HashMap<String, Node>,
    iteration: u64,
}

impl KuhnSolver {
    pub fn new() -> Self {
        KuhnSolver {
            nodes: HashMap::new(),
            iteration: 0,
        }
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// One full iteration: every ordered pair of distinct cards dealt to
    /// (player 0, player 1).
    pub fn train(&mut self, n: u64) {
        for _ in 0..n {
            self.iteration += 1;
            for &p0 in &Rank::ALL {
                for &p1 in &Rank::ALL {
                    if p0 == p1 {
                        continue;
                    }
                    self.cfr([p0, p1], "", [1.0, 1.0]);
                }
            }
        }
    }

    fn cfr(&mut self, cards: [Rank; 2], history: &str, prob: [f64; 2]) -> f64 {
        let game_len = history.len();
        let stm = game_len % 2;

        if game_len > 1 {
            let showdown_win = cards[stm] > cards[1 - stm];
            let bytes = history.as_bytes();
            if bytes[bytes.len() - 1] == b'c' {
                if bytes[bytes.len() - 2] == b'c' {
                    return if showdown_win { 1.0 } else { -1.0 };
                }
                return 1.0;
            }
            if &history[history.len() - 2..] == "bb" {
                return if showdown_win { 2.0 } else { -2.0 };
            }
        }

        let node_key = format!("{}{}", cards[stm].to_char(), history);
        let node = self.nodes.entry(node_key.clone()).or_insert_with(|| Node::new(2));
        let node_strat = node.current_strategy(prob[stm]);

        let mut node_util = 0.0;
        let mut action_util = [0.0; 2];
        for (i, &action) in [Action::Check, Action::Bet].iter().enumerate() {
            let mut next_prob = prob;
            next_prob[stm] *= node_strat[i];
            let next_hist = format!("{}{}", history, action.to_char());
            action_util[i] = -self.cfr(cards, &next_hist, next_prob);
            node_util += node_strat[i] * action_util[i];
        }

        let node = self.nodes.get_mut(&node_key).unwrap();
        for j in 0..2 {
            let regret = action_util[j] - node_util;
            node.add_regret(j, regret, prob[1 - stm]);
        }

        node_util
    }

    /// `(key, stored_strategy)` for every info set reached during training,
    /// in the canonical `card x tail` enumeration order.
    pub fn print_all(&self) -> Vec<(String, Vec<f64>)> {
        let mut out = Vec::new();
        for &card in &Rank::ALL {
            for tail in TAILS {
                let key = format!("{}{}", card.to_char(), tail);
                if let Some(node) = self.nodes.get(&key) {
                    out.push((key, node.stored_strategy()));
                }
            }
        }
        out
    }

    pub fn stored_strategy(&self, key: &str) -> Option<Vec<f64>> {
        self.nodes.get(key).map(|n| n.stored_strategy())
    }
}

impl Default for KuhnSolver {
    fn default() -> Self {
        Self::new()
    }
}
