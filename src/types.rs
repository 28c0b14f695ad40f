//! Core game primitives shared by the Kuhn and Leduc variants.

use std::fmt;

/// A card rank. Leduc and Kuhn both use a 3-rank deck (two suits per rank
/// in Leduc; single-suit in Kuhn, where suit never matters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Jack = 0,
    Queen = 1,
    King = 2,
}

impl Rank {
    pub const ALL: [Rank; 3] = [Rank::Jack, Rank::Queen, Rank::King];

    pub fn from_index(i: u8) -> Rank {
        match i {
            0 => Rank::Jack,
            1 => Rank::Queen,
            2 => Rank::King,
            _ => panic!("rank index out of range: {i}"),
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A single betting action. `Check` doubles as fold when facing a raise;
/// `Bet` doubles as call when facing a raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    Check = 0,
    Bet = 1,
    Raise = 2,
}

impl Action {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn to_char(self) -> char {
        match self {
            Action::Check => 'c',
            Action::Bet => 'b',
            Action::Raise => 'r',
        }
    }
}

/// Showdown outcome from the perspective of the player being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Outcome {
    Loss = 0,
    Push = 1,
    Win = 2,
}

/// `strength(h, board) = rank(h) + rank(board) + 4*[rank(h) == rank(board)]`
fn strength(hole: Rank, board: Rank) -> u8 {
    hole.index() + board.index() + if hole == board { 4 } else { 0 }
}

/// Showdown result comparing `my_card` against `opp_card` on `board`.
pub fn showdown(my_card: Rank, opp_card: Rank, board: Rank) -> Outcome {
    let mine = strength(my_card, board);
    let theirs = strength(opp_card, board);
    match mine.cmp(&theirs) {
        std::cmp::Ordering::Less => Outcome::Loss,
        std::cmp::Ordering::Equal => Outcome::Push,
        std::cmp::Ordering::Greater => Outcome::Win,
    }
}

/// Combinatorial dealing weight: 4 if any two of the three dealt ranks
/// match (since each rank has exactly two suits), else 8.
pub fn dealing_weight(p0: Rank, p1: Rank, board: Rank) -> f64 {
    if p0 == p1 || p0 == board || p1 == board {
        4.0
    } else {
        8.0
    }
}
