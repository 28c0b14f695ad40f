//! Pure decoder over the 10-bit Leduc node hash.
//!
//! `NodeInfo` never allocates and never fails: every `hash in 0..528` is a
//! valid information set, and every method is a closed-form function of
//! the decoded fields. See `SPEC_FULL.md` for the bit layout derivation.

use crate::types::{showdown, Action, Rank};

pub const NUM_NODES: usize = 528;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInfo {
    hash: u16,
    round: u8,
    private_card: Rank,
    board_card: Option<Rank>,
    /// Current round's sequence field (round 1: the hash's own `seq`;
    /// round 2: `r2_seq`).
    seq: u8,
    /// Only meaningful in round 2: `r1_info`, from which `r1_seq =
    /// r1_info + 1` and `r1_raises = r1_seq % 4`.
    r1_info: u8,
}

impl NodeInfo {
    pub fn decode(hash: u16) -> NodeInfo {
        assert!((hash as usize) < NUM_NODES, "hash out of range: {hash}");
        if hash < 24 {
            NodeInfo {
                hash,
                round: 1,
                private_card: Rank::from_index((hash / 8) as u8),
                board_card: None,
                seq: (hash % 8) as u8,
                r1_info: 0,
            }
        } else {
            let h = hash - 24;
            let board_card = Rank::from_index((h / 168) as u8);
            let r2_seq = ((h / 21) % 8) as u8;
            let private_card = Rank::from_index(((h % 21) / 7) as u8);
            let r1_info = (h % 7) as u8;
            NodeInfo {
                hash,
                round: 2,
                private_card,
                board_card: Some(board_card),
                seq: r2_seq,
                r1_info,
            }
        }
    }

    pub fn hash(self) -> u16 {
        self.hash
    }

    fn raises(self) -> u8 {
        self.seq % 4
    }

    fn r1_raises(self) -> u8 {
        // r1_seq = r1_info + 1
        (self.r1_info + 1) % 4
    }

    pub fn stm(self) -> u8 {
        ((self.seq % 2) + (self.seq / 4)) % 2
    }

    pub fn moves(self) -> Vec<Action> {
        match self.raises() {
            0 => vec![Action::Check, Action::Raise],
            3 => vec![Action::Check, Action::Bet],
            _ => vec![Action::Check, Action::Bet, Action::Raise],
        }
    }

    /// True if `round` is 1 and this action hands the hand off to round 2
    /// (rather than just ending the current street's betting).
    fn is_round_transition(self, action: Action) -> bool {
        self.round == 1
            && match action {
                Action::Check => self.seq == 4,
                Action::Bet => true,
                Action::Raise => false,
            }
    }

    pub fn ends_hand(self, action: Action) -> bool {
        let raises = self.raises();
        match action {
            Action::Check => raises > 0 || (self.round == 2 && self.seq == 4),
            Action::Bet => self.round == 2,
            Action::Raise => false,
        }
    }

    /// Payout from the perspective of the player who just acted (the
    /// side-to-move at this node, before the terminal action). Requires
    /// `ends_hand(action)`.
    pub fn payout(self, action: Action, opp_card: Rank) -> f64 {
        debug_assert!(self.ends_hand(action));
        match self.round {
            1 => 1.0 - 2.0 * self.raises() as f64,
            _ => {
                let r1_raises = self.r1_raises() as f64;
                let r2_raises = self.raises() as f64;
                let is_fold = matches!(action, Action::Check) && self.raises() > 0;
                if is_fold {
                    3.0 - 2.0 * r1_raises - 4.0 * r2_raises
                } else {
                    let committed = 1.0 + 2.0 * r1_raises + 4.0 * r2_raises;
                    let board = self.board_card.expect("round 2 always has a board card");
                    let result = showdown(self.private_card, opp_card, board) as u8 as f64;
                    (result - 1.0) * committed
                }
            }
        }
    }

    pub fn next_stm(self, action: Action) -> u8 {
        if self.is_round_transition(action) {
            0
        } else {
            1 - self.stm()
        }
    }

    /// `board_card` is only consulted at the round1->round2 transition;
    /// `next_player_card` is the private card of whoever is to move at the
    /// child node (`cards[next_stm(action)]`).
    pub fn next_hash(self, action: Action, board_card: Rank, next_player_card: Rank) -> u16 {
        debug_assert!(!self.ends_hand(action));
        if self.round == 1 {
            if self.is_round_transition(action) {
                let r1_seq = self.seq;
                let r1_info = r1_seq - 1;
                let h = board_card.index() as u16 * 168 + next_player_card.index() as u16 * 7 + r1_info as u16;
                24 + h
            } else {
                let next_seq = match action {
                    Action::Check => self.seq + 4,
                    Action::Raise => self.seq + 1,
                    Action::Bet => unreachable!("round-1 Bet always transitions rounds"),
                };
                next_player_card.index() as u16 * 8 + next_seq as u16
            }
        } else {
            let next_r2_seq = match action {
                Action::Check => self.seq + 4,
                Action::Raise => self.seq + 1,
                Action::Bet => unreachable!("round-2 Bet always ends the hand"),
            };
            let board = self.board_card.expect("round 2 always has a board card");
            let h = board.index() as u16 * 168
                + next_r2_seq as u16 * 21
                + next_player_card.index() as u16 * 7
                + self.r1_info as u16;
            24 + h
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_hash_zero() {
        let n = NodeInfo::decode(0);
        assert_eq!(n.stm(), 0);
        assert_eq!(n.moves(), vec![Action::Check, Action::Raise]);
    }

    #[test]
    fn round2_root_hash_24() {
        let n = NodeInfo::decode(24);
        assert_eq!(n.stm(), 0);
        assert_eq!(n.moves(), vec![Action::Check, Action::Raise]);
    }

    #[test]
    fn round1_fold_payout() {
        // hash 1 = private Jack, seq 1 (one raise) -> fold payout = 1 - 2*1 = -1
        let n = NodeInfo::decode(1);
        assert!(n.ends_hand(Action::Check));
        assert_eq!(n.payout(Action::Check, Rank::King), -1.0);
    }

    #[test]
    fn round1_bet_never_terminal() {
        let n = NodeInfo::decode(1); // raises=1, Bet legal (call)
        assert!(!n.ends_hand(Action::Bet));
    }

    #[test]
    fn round1_raise_cap_moves() {
        let n = NodeInfo::decode(3); // seq=3, raises=3
        assert_eq!(n.moves(), vec![Action::Check, Action::Bet]);
        assert!(n.ends_hand(Action::Check)); // fold
        assert!(n.ends_hand(Action::Bet)); // round1 bet call -> still transitions, not terminal
    }

    #[test]
    fn round1_to_round2_transition_next_stm_zero() {
        let n = NodeInfo::decode(1); // seq1, stm=1, Bet ends round (call)
        assert!(!n.ends_hand(Action::Bet));
        assert_eq!(n.next_stm(Action::Bet), 0);
    }

    #[test]
    fn round2_showdown_check_check() {
        // J vs K, board Q, one round-1 raise (r1_seq=1 -> r1_info=0), round2
        // check-check (seq starts 0 -> Check -> seq4 -> Check ends hand).
        let root_hash = 24 + (1u16 /*board Q*/) * 168 + 0 * 7 + 0;
        let n = NodeInfo::decode(root_hash);
        assert_eq!(n.stm(), 0);
        let next_hash = n.next_hash(Action::Check, Rank::Queen, Rank::King);
        let n2 = NodeInfo::decode(next_hash);
        assert_eq!(n2.stm(), 1);
        assert!(n2.ends_hand(Action::Check));
        let payout = n2.payout(Action::Check, Rank::Jack);
        // stm at n2 is the player holding King (the embedded private card);
        // King beats Jack on a Queen board, committed 3 each -> +3
        assert_eq!(payout, 3.0);
    }

    #[test]
    fn round2_fold_payout() {
        let root_hash = 24 + 2u16 * 168 + 0 * 7 + 0; // board King, r1_info 0 (r1_raises=1)
        let n = NodeInfo::decode(root_hash);
        // Raise then fold: Raise -> seq1, then Check (fold, raises=1>0)
        let after_raise = n.next_hash(Action::Raise, Rank::King, Rank::Jack);
        let n2 = NodeInfo::decode(after_raise);
        assert!(n2.ends_hand(Action::Check));
        let payout = n2.payout(Action::Check, Rank::Queen);
        // r1_raises=1, r2_raises=1 -> 3 - 2*1 - 4*1 = -3
        assert_eq!(payout, -3.0);
    }

    #[test]
    fn every_hash_decodes_and_has_nonempty_moves() {
        for h in 0..NUM_NODES as u16 {
            let n = NodeInfo::decode(h);
            assert!(!n.moves().is_empty());
            assert!(n.stm() == 0 || n.stm() == 1);
        }
    }
}
