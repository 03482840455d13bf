//! RNG module - seeded piece selection
//!
//! Two rules are available:
//! - [`PieceRule::Uniform`]: each draw picks any of the 7 kinds with equal odds
//! - [`PieceRule::Bag`]: the 7-bag; every kind once per shuffled bag
//!
//! Both run on a small LCG so a seed reproduces the whole piece sequence.

use log::trace;

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
        // LCG formula: (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits cycle quickly; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// How the next piece kind is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PieceRule {
    #[default]
    Uniform,
    Bag,
}

/// Seeded source of piece kinds
#[derive(Debug, Clone)]
pub struct PiecePicker {
    rule: PieceRule,
    rng: SimpleRng,
    seed: u32,
    bag: Vec<PieceKind>,
    bag_index: usize,
}

impl PiecePicker {
    pub fn new(seed: u32, rule: PieceRule) -> Self {
        Self {
            rule,
            rng: SimpleRng::new(seed),
            seed,
            bag: Vec::with_capacity(7),
            bag_index: 0,
        }
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        match self.rule {
            PieceRule::Uniform => {
                let i = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
                PieceKind::ALL[i]
            }
            PieceRule::Bag => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let piece = self.bag[self.bag_index];
                self.bag_index += 1;
                piece
            }
        }
    }

    fn refill_bag(&mut self) {
        self.bag.clear();
        self.bag.extend_from_slice(&PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
        trace!("new bag {:?}", self.bag);
    }

    pub fn rule(&self) -> PieceRule {
        self.rule
    }

    /// Seed this picker was created with (used to replay a game)
    pub fn seed(&self) -> u32 {
        self.seed
    }
}
