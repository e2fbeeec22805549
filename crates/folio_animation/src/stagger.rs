//! Stagger offsets for sequenced entrances
//!
//! A stagger turns an element's position within a bound set into a start
//! delay. Positions are always relative to the set currently being bound, so
//! binding a new set restarts numbering from zero.

/// How a position maps onto a stagger step count
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaggerIndex {
    /// Step `i` for the element at position `i`
    #[default]
    Linear,
    /// Step `i mod n`; a grid with `n` columns staggers across each row
    Cyclic(usize),
    /// Every element starts immediately
    None,
}

impl StaggerIndex {
    /// Step count for the element at `index`
    pub fn step(&self, index: usize) -> usize {
        match *self {
            StaggerIndex::Linear => index,
            StaggerIndex::Cyclic(0) => index,
            StaggerIndex::Cyclic(n) => index % n,
            StaggerIndex::None => 0,
        }
    }
}

/// Configuration for stagger animations
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaggerConfig {
    /// Delay between consecutive steps (ms)
    pub delay_ms: f32,
    /// Position-to-step mapping
    pub index: StaggerIndex,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl StaggerConfig {
    /// Create a linear stagger with `delay_ms` between items
    pub fn new(delay_ms: f32) -> Self {
        Self {
            delay_ms,
            index: StaggerIndex::Linear,
        }
    }

    /// No stagger: every element starts together
    pub fn none() -> Self {
        Self {
            index: StaggerIndex::None,
            ..Self::new(0.0)
        }
    }

    /// Use a different position-to-step mapping
    pub fn index(mut self, index: StaggerIndex) -> Self {
        self.index = index;
        self
    }

    /// Delay for the element at position `index`
    pub fn delay_for_index(&self, index: usize) -> f32 {
        self.delay_ms * self.index.step(index) as f32
    }
}
