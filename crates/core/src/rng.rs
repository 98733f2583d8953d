//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomizer: each bag holds one of each piece kind,
//! shuffled uniformly. Draws empty the bag, and an empty bag is refilled and
//! reshuffled on the next draw. Any 14 draws starting from an empty bag
//! therefore contain every kind exactly twice.
//!
//! Also provides a small seedable LCG so games are reproducible.

use crate::piece::Piece;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG cycle with short
    /// periods (bit 0 simply alternates).
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct Bag {
    /// Current bag of pieces
    kinds: [PieceKind; 7],
    /// Index of the next undrawn kind; `7` means empty
    index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl Bag {
    /// Create an empty bag; the first draw fills it
    pub fn new(seed: u32) -> Self {
        Self {
            kinds: PieceKind::ALL,
            index: PieceKind::ALL.len(),
            rng: SimpleRng::new(seed),
        }
    }

    /// Reload all seven kinds and shuffle them
    pub fn refill(&mut self) {
        self.kinds = PieceKind::ALL;
        self.rng.shuffle(&mut self.kinds);
        self.index = 0;
    }

    /// Drop whatever is left; the next draw starts a fresh bag
    pub fn empty(&mut self) {
        self.index = self.kinds.len();
    }

    /// Kinds left before the next refill
    pub fn remaining(&self) -> usize {
        self.kinds.len() - self.index
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Peek at the next kind, if the bag is not empty
    pub fn peek(&self) -> Option<PieceKind> {
        self.kinds.get(self.index).copied()
    }

    /// Draw the next kind, refilling first if the bag is empty
    pub fn draw_kind(&mut self) -> PieceKind {
        if self.is_empty() {
            self.refill();
        }
        let kind = self.kinds[self.index];
        self.index += 1;
        kind
    }

    /// Draw a fresh piece at the spawn origin of a grid of `grid_width`
    pub fn draw(&mut self, grid_width: u8) -> Piece {
        Piece::spawn(self.draw_kind(), grid_width)
    }

    /// Current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..20 {
            for _ in 0..50 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_next_range_low_values_do_not_alternate() {
        let mut rng = SimpleRng::new(99);
        let draws: Vec<u32> = (0..32).map(|_| rng.next_range(2)).collect();
        let alternating = draws.windows(2).all(|w| w[0] != w[1]);
        assert!(!alternating);
    }

    #[test]
    fn test_bag_starts_empty() {
        let bag = Bag::new(1);
        assert!(bag.is_empty());
        assert_eq!(bag.peek(), None);
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = Bag::new(1);
        let mut drawn: Vec<PieceKind> = (0..7).map(|_| bag.draw_kind()).collect();
        drawn.sort_by_key(|k| k.index());
        assert_eq!(drawn, PieceKind::ALL.to_vec());
        assert!(bag.is_empty());
    }

    #[test]
    fn test_bag_peek_matches_draw() {
        let mut bag = Bag::new(3);
        bag.draw_kind();
        let peeked = bag.peek().unwrap();
        assert_eq!(bag.draw_kind(), peeked);
    }

    #[test]
    fn test_bag_empty_forces_new_bag() {
        let mut bag = Bag::new(5);
        bag.draw_kind();
        bag.empty();
        assert!(bag.is_empty());
        bag.draw_kind();
        assert_eq!(bag.remaining(), 6);
    }

    #[test]
    fn test_bag_draw_spawns_piece() {
        let mut bag = Bag::new(11);
        let piece = bag.draw(10);
        assert_eq!((piece.x, piece.y), (3, 0));
        assert_eq!(piece.color, piece.kind.color());
    }
}
