//! Human-readable node labels, e.g. `"J:cr"` or `"Q|K:rbc/r"`.
//!
//! Ported bit-for-bit from `hash_to_string` in the original Python
//! reference (`Leduc.py`), including its round-1-history reconstruction
//! quirk: a round that closed on a raise is rendered with a trailing `b`
//! (call), a round that closed on back-to-back checks with a trailing `c`.

const RANK_NAMES: [char; 3] = ['J', 'Q', 'K'];

pub fn hash_to_string(hash: u16) -> String {
    if hash < 24 {
        let private_card = hash / 8;
        let mut seq = hash % 8;
        let mut history = String::new();
        if seq >= 4 {
            history.push('c');
            seq -= 4;
        }
        for _ in 0..seq {
            history.push('r');
        }
        format!("{}:{}", RANK_NAMES[private_card as usize], history)
    } else {
        let h = hash - 24;
        let private_card = (h % 21) / 7;
        let shared_card = h / 168;
        let mut r2_seq = (h / 21) % 8;
        let r1_seq = (h % 21) % 7 + 1;

        let mut r1_history = String::new();
        let mut r1_s = r1_seq;
        if r1_s >= 4 {
            r1_history.push('c');
            r1_s -= 4;
        }
        for _ in 0..(r1_s % 4) {
            r1_history.push('r');
        }
        if r1_s > 0 {
            r1_history.push('b');
        } else {
            r1_history.push('c');
        }

        let mut r2_history = String::new();
        if r2_seq >= 4 {
            r2_history.push('c');
            r2_seq -= 4;
        }
        for _ in 0..r2_seq {
            r2_history.push('r');
        }

        format!(
            "{}|{}:{}/{}",
            RANK_NAMES[private_card as usize], RANK_NAMES[shared_card as usize], r1_history, r2_history
        )
    }
}
