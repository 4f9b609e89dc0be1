//! RNG module - bag randomizer with level-gated shapes and special pieces
//!
//! The bag holds one entry per currently unlocked shape, shuffled. Draws
//! come off the bag until it is empty, then it is refilled from the unlocked
//! set, so every unlocked shape appears once per bag cycle. Shapes unlock as
//! the level rises and are never locked again.
//!
//! Independently, a counter of pieces locked since the last special piece
//! is kept; once it reaches a randomized threshold the next generated piece
//! is flagged special.
//!
//! Also provides a simple LCG for deterministic play.

use std::sync::Arc;

use crate::config::{PitConfig, SpecialGeometry};
use crate::error::CatalogError;
use crate::pieces::{Shape, ShapeCatalog};
use crate::polycube::Polycube;

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
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // High bits of an LCG are far better distributed than the low ones
        (self.next_u32() >> 8) % max
    }

    /// Generate random value in range [min, max]
    pub fn next_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        min + self.next_range(max - min + 1)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Bag-based piece generator
#[derive(Debug, Clone)]
pub struct PieceSource {
    catalog: ShapeCatalog,
    /// Regular shapes unlocked so far, in catalog order
    unlocked: Vec<Arc<Shape>>,
    /// Remaining draws of the current bag (drawn from the back)
    bag: Vec<Arc<Shape>>,
    level: u32,
    seed: u32,
    rng: SimpleRng,
    special_geometry: SpecialGeometry,
    special_min_interval: u32,
    special_max_interval: u32,
    /// Pieces locked since the last special piece was generated
    blocks_since_special: u32,
    special_threshold: u32,
}

impl PieceSource {
    /// Create a source for `catalog` at level 1
    ///
    /// Fails if the catalog cannot supply what `config` asks for.
    pub fn new(catalog: ShapeCatalog, config: &PitConfig, seed: u32) -> Result<Self, CatalogError> {
        if catalog.unlocked_at(1).next().is_none() {
            return Err(CatalogError::NothingUnlocked);
        }
        if config.special_geometry == SpecialGeometry::Fixed && catalog.special_shape().is_none() {
            return Err(CatalogError::MissingSpecialShape);
        }

        let mut source = Self {
            catalog,
            unlocked: Vec::new(),
            bag: Vec::new(),
            level: 1,
            seed,
            rng: SimpleRng::new(seed),
            special_geometry: config.special_geometry,
            special_min_interval: config.special_min_interval,
            special_max_interval: config.special_max_interval,
            blocks_since_special: 0,
            special_threshold: 0,
        };
        source.reset();
        Ok(source)
    }

    /// Back to construction-time state (same seed, level 1, empty bag)
    pub fn reset(&mut self) {
        self.rng = SimpleRng::new(self.seed);
        self.level = 1;
        self.unlocked = self.catalog.unlocked_at(1).cloned().collect();
        self.bag.clear();
        self.blocks_since_special = 0;
        self.special_threshold = self.roll_special_threshold();
    }

    fn roll_special_threshold(&mut self) -> u32 {
        self.rng
            .next_inclusive(self.special_min_interval, self.special_max_interval)
    }

    /// Unlock every shape whose threshold `new_level` reaches
    ///
    /// Lower levels are ignored; unlocked shapes are never removed.
    pub fn advance_level(&mut self, new_level: u32) {
        if new_level <= self.level {
            return;
        }
        self.level = new_level;
        for shape in self.catalog.unlocked_at(new_level) {
            if !self.unlocked.iter().any(|s| Arc::ptr_eq(s, shape)) {
                tracing::info!(shape = shape.name(), level = new_level, "shape unlocked");
                self.unlocked.push(Arc::clone(shape));
            }
        }
    }

    /// Generate a new shuffled bag from the unlocked set
    fn refill_bag(&mut self) {
        self.bag = self.unlocked.clone();
        self.rng.shuffle(&mut self.bag);
    }

    fn draw_shape(&mut self) -> Arc<Shape> {
        if self.bag.is_empty() {
            self.refill_bag();
        }
        match self.bag.pop() {
            Some(shape) => shape,
            // The unlocked set is never empty (checked in `new`)
            None => Arc::clone(&self.unlocked[0]),
        }
    }

    /// Generate the next piece
    ///
    /// When the special counter has reached its threshold, this piece is the
    /// special one and the counter starts over.
    pub fn next_piece(&mut self) -> Polycube {
        if self.blocks_since_special >= self.special_threshold {
            self.blocks_since_special = 0;
            self.special_threshold = self.roll_special_threshold();
            let piece = match (self.special_geometry, self.catalog.special_shape()) {
                (SpecialGeometry::Fixed, Some(shape)) => Polycube::new(Arc::clone(shape)),
                _ => Polycube::new(self.draw_shape()).into_special(),
            };
            tracing::debug!(shape = piece.name(), "special piece generated");
            return piece;
        }

        Polycube::new(self.draw_shape())
    }

    /// Record that a piece locked; special pieces do not count
    pub fn note_locked(&mut self, was_special: bool) {
        if !was_special {
            self.blocks_since_special = self.blocks_since_special.saturating_add(1);
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn blocks_since_special(&self) -> u32 {
        self.blocks_since_special
    }

    pub fn special_threshold(&self) -> u32 {
        self.special_threshold
    }

    /// Names of the unlocked regular shapes
    pub fn unlocked_names(&self) -> impl Iterator<Item = &str> {
        self.unlocked.iter().map(|s| s.name())
    }

    /// Shapes left in the current bag
    #[cfg(test)]
    pub fn current_bag(&self) -> &[Arc<Shape>] {
        &self.bag
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}
