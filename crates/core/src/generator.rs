//! Generator module - sources of new tile values
//!
//! The board asks its generator for one value per cell at construction and one
//! value per cell left empty after gravity. Generators are infallible and are
//! queried an unbounded number of times.
//!
//! Provided implementations:
//! - any `FnMut() -> T` closure
//! - [`TileBag`]: shuffled bag of values, refilled when drained
//! - [`Cycle`]: repeats a fixed sequence (deterministic boards for tests)
//!
//! Also provides a simple LCG for deterministic shuffling.

use serde::{Deserialize, Serialize};

/// Source of the next tile value.
pub trait Generator<T> {
    fn next_value(&mut self) -> T;
}

impl<T, F> Generator<T> for F
where
    F: FnMut() -> T,
{
    fn next_value(&mut self) -> T {
        self()
    }
}

/// Seeded LCG behind [`TileBag`] shuffles.
///
/// The low bits of a power-of-two LCG have short periods (bit 0 just
/// alternates), so ranges are taken from the high bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Seed 0 is mapped to 1.
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Uniform-ish value in `0..bound`; `bound` must be non-zero.
    pub fn below(&mut self, bound: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(bound)) >> 32) as u32
    }

    /// Fisher-Yates, last slot first.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for last in (1..items.len()).rev() {
            let pick = self.below(last as u32 + 1) as usize;
            items.swap(last, pick);
        }
    }
}

/// Bag generator: every value of the palette appears once per bag, in
/// shuffled order. A drained bag is reshuffled from the RNG.
///
/// The whole bag (current order, draw position and RNG) serializes, so a
/// restored bag continues the exact refill sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileBag<T> {
    palette: Vec<T>,
    bag: Vec<T>,
    next: usize,
    rng: SimpleRng,
}

impl<T: Clone> TileBag<T> {
    /// Create a bag over `palette`; `None` when the palette is empty.
    pub fn new(palette: impl Into<Vec<T>>, seed: u32) -> Option<Self> {
        let palette = palette.into();
        if palette.is_empty() {
            return None;
        }
        let mut bag = Self {
            bag: Vec::with_capacity(palette.len()),
            palette,
            next: 0,
            rng: SimpleRng::new(seed),
        };
        bag.reshuffle();
        Some(bag)
    }

    fn reshuffle(&mut self) {
        self.bag.clone_from(&self.palette);
        self.rng.shuffle(&mut self.bag);
        self.next = 0;
    }

    pub fn draw(&mut self) -> T {
        if self.next >= self.bag.len() {
            self.reshuffle();
        }

        let value = self.bag[self.next].clone();
        self.next += 1;
        value
    }

    /// Values this bag deals. Empty only for a bag restored from bad data.
    pub fn palette(&self) -> &[T] {
        &self.palette
    }
}

impl<T: Clone> Generator<T> for TileBag<T> {
    fn next_value(&mut self) -> T {
        self.draw()
    }
}

/// Repeats `values` forever, starting from the first.
#[derive(Debug, Clone)]
pub struct Cycle<T> {
    values: Vec<T>,
    index: usize,
}

impl<T: Clone> Cycle<T> {
    /// `None` when `values` is empty.
    pub fn new(values: impl Into<Vec<T>>) -> Option<Self> {
        let values = values.into();
        if values.is_empty() {
            return None;
        }
        Some(Self { values, index: 0 })
    }
}

impl<T: Clone> Generator<T> for Cycle<T> {
    fn next_value(&mut self) -> T {
        let value = self.values[self.index].clone();
        self.index = (self.index + 1) % self.values.len();
        value
    }
}
