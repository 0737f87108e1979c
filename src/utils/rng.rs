//! # Deterministic Random Stream
//!
//! A Mulberry32 generator over a single 32-bit state word.
//!
//! Every procedural step in Liminal (maze carving, rooms, lights, placement,
//! hound tie-breaks, light flicker) pulls from one `MazeRng` that is threaded
//! through by `&mut`. The stream is bit-for-bit identical on every platform,
//! so a seed fully determines a world.
//!
//! Draw order of the helpers is part of the contract:
//!
//! - [`MazeRng::int_in_range`] consumes exactly one draw.
//! - [`MazeRng::shuffle`] is Fisher-Yates from the back: for `i` in
//!   `len-1 ..= 1` it draws once and swaps `i` with `floor(draw * (i + 1))`,
//!   so a slice of length `n` consumes `n - 1` draws.
//! - [`MazeRng::pick_index`] and [`MazeRng::take_from`] consume one draw,
//!   or none when the collection is empty.

use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

const GOLDEN_GAMMA: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Seeded Mulberry32 stream.
///
/// # Examples
///
/// ```
/// use liminal::MazeRng;
///
/// let mut a = MazeRng::new(7);
/// let mut b = MazeRng::new(7);
/// assert_eq!(a.next_f64(), b.next_f64());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeRng {
    state: u32,
}

impl MazeRng {
    /// Creates a stream from a seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state, enough to resume the stream.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns the raw 32-bit output.
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.step() as f64 / TWO_POW_32
    }

    /// Uniform integer in `min..=max`. Always consumes one draw.
    pub fn int_in_range(&mut self, min: i32, max: i32) -> i32 {
        let span = (max - min + 1).max(1);
        min + (self.next_f64() * span as f64).floor() as i32
    }

    /// Returns true with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index into a collection of `len` elements.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let idx = (self.next_f64() * len as f64).floor() as usize;
        Some(idx.min(len - 1))
    }

    /// Picks an element with replacement.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.pick_index(items.len()).map(|idx| &items[idx])
    }

    /// Removes and returns a uniformly chosen element (sampling without
    /// replacement). Remaining elements keep their relative order.
    pub fn take_from<T>(&mut self, pool: &mut Vec<T>) -> Option<T> {
        self.pick_index(pool.len()).map(|idx| pool.remove(idx))
    }

    /// In-place Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = (self.next_f64() * (i + 1) as f64).floor() as usize;
            items.swap(i, j.min(i));
        }
    }
}

impl RngCore for MazeRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.step() as u64;
        let hi = self.step() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for MazeRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}
