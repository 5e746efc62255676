//! RNG module - injectable random sources for piece selection
//!
//! The engine only asks for a uniform index below a bound. Sources:
//! - [`SimpleRng`]: seeded LCG, reproducible sequences for a given seed
//! - [`ThreadRandom`]: the `rand` thread-local generator
//! - [`ScriptedSource`]: replays a fixed list of kinds (tests, demos)

use rand::Rng;

use crate::types::PieceKind;

/// Source of uniform random indices.
pub trait RandomSource {
    /// Return a value in `[0, bound)`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// Select a piece kind uniformly from the seven canonical shapes
pub fn pick_kind<R: RandomSource + ?Sized>(rng: &mut R) -> PieceKind {
    PieceKind::ALL[rng.next_index(PieceKind::ALL.len()) % PieceKind::ALL.len()]
}

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
}

impl RandomSource for SimpleRng {
    fn next_index(&mut self, bound: usize) -> usize {
        // Low LCG bits have short periods
        ((self.next_u32() >> 16) as usize) % bound
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Uniform selection through `rand`'s thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        rand::rng().random_range(0..bound)
    }
}

/// Replays a fixed cycle of piece kinds.
///
/// Only meaningful when paired with [`pick_kind`]: it answers with the index
/// of the next scripted kind in [`PieceKind::ALL`].
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl ScriptedSource {
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let kinds: Vec<PieceKind> = kinds.into_iter().collect();
        assert!(!kinds.is_empty(), "scripted source needs at least one kind");
        Self { kinds, next: 0 }
    }

    /// Number of values handed out so far
    pub fn draws(&self) -> usize {
        self.next
    }
}

impl RandomSource for ScriptedSource {
    fn next_index(&mut self, bound: usize) -> usize {
        let kind = self.kinds[self.next % self.kinds.len()];
        self.next += 1;
        kind.index() % bound
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
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_simple_rng_covers_every_kind() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[pick_kind(&mut rng).index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "seen: {:?}", seen);
    }

    #[test]
    fn test_thread_random_in_range() {
        let mut rng = ThreadRandom;
        for _ in 0..200 {
            assert!(rng.next_index(7) < 7);
        }
    }

    #[test]
    fn test_scripted_source_cycles() {
        let mut rng = ScriptedSource::new([PieceKind::S, PieceKind::I]);
        assert_eq!(pick_kind(&mut rng), PieceKind::S);
        assert_eq!(pick_kind(&mut rng), PieceKind::I);
        assert_eq!(pick_kind(&mut rng), PieceKind::S);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_boxed_source() {
        let mut rng: Box<dyn RandomSource> = Box::new(ScriptedSource::new([PieceKind::J]));
        assert_eq!(pick_kind(&mut rng), PieceKind::J);
    }
}
