//! Deterministic RNG for forcing specific roll outcomes.

use std::collections::VecDeque;

use rand::RngCore;

/// Value returned once the script runs dry: misses every roll in the game.
const EXHAUSTED_DRAW: f64 = 0.999_999;

/// An RNG that hands out a fixed sequence of uniform `[0, 1)` draws.
///
/// Each call to `rng.gen::<f64>()` consumes exactly one scripted value. Only
/// float draws are supported; every roll in this crate uses one.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    draws: VecDeque<f64>,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    pub fn push(&mut self, draw: f64) {
        self.draws.push_back(draw);
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    /// Inverse of rand's `Standard` f64 sampling, which keeps the top 53 bits.
    fn encode(draw: f64) -> u64 {
        let scaled = (draw.clamp(0.0, EXHAUSTED_DRAW) * (1u64 << 53) as f64) as u64;
        scaled << 11
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let draw = self.draws.pop_front().unwrap_or(EXHAUSTED_DRAW);
        Self::encode(draw)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
