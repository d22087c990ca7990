//! RNG module - uniform random piece generation
//!
//! Every draw picks one of the seven kinds with equal probability; there is
//! no bag or history. A small LCG keeps sequences reproducible from a seed,
//! which is what tests and replays rely on.

use crate::pieces::Shape;
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
        // LCG formula: (a * state + c) mod m
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits: the low bits of a power-of-two LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform piece generator.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
    seed: u32,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Next kind, uniformly among the seven.
    pub fn next_kind(&mut self) -> PieceKind {
        let i = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[i]
    }

    /// Next piece as a fresh, independently owned matrix.
    pub fn next_shape(&mut self) -> Shape {
        Shape::new(self.next_kind())
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
