//! Seeded pseudo-random source shared by every randomized decision.
//!
//! A 32-bit linear congruential generator with the classic Numerical Recipes
//! constants. The float mapping divides the updated state by 2^32 in double
//! precision; every platform computes the same IEEE-754 result, which is what
//! makes whole-dataset byte reproducibility possible.

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// 32-bit LCG. The scalar state is the only mutable piece, so the draw
/// sequence is a pure function of the seed and the draw index.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Seed the generator; the input is masked to 32 bits.
    pub fn new(seed: u64) -> Self {
        Self { state: seed as u32 }
    }

    /// Advance the state and return a draw in `[0, 1)`.
    pub fn draw(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        f64::from(self.state) / TWO_POW_32
    }

    /// Uniform integer in `[0, n)` via `floor(draw() * n)`.
    pub fn rand_int(&mut self, n: usize) -> usize {
        (self.draw() * n as f64) as usize
    }

    /// Binary choice: true when the next draw falls below one half.
    pub fn coin(&mut self) -> bool {
        self.draw() < 0.5
    }

    /// Fisher-Yates shuffle walking from the high index downward.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rand_int(i + 1);
            items.swap(i, j);
        }
    }
}
