// Bounded random sequences and uniform choice, usable with any
// `RandomSource` and no engine. The engine's array policies sit on top.

use crate::rng::RandomSource;

/// Hard ceiling on generated sequence lengths.
pub const MAX_SEQUENCE_LEN: usize = 1000;
/// Length range used when the caller supplies no options.
pub const DEFAULT_LEN_MIN: usize = 3;
pub const DEFAULT_LEN_MAX: usize = 8;

/// Inclusive length bounds for generated sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayOptions {
    pub min: usize,
    pub max: usize,
}

impl Default for ArrayOptions {
    fn default() -> Self {
        ArrayOptions { min: DEFAULT_LEN_MIN, max: DEFAULT_LEN_MAX }
    }
}

impl ArrayOptions {
    pub fn new(min: usize, max: usize) -> Self {
        ArrayOptions { min, max }
    }

    /// Effective bounds: `max` capped at [`MAX_SEQUENCE_LEN`], then `min`
    /// lowered to `max` if the pair is inverted. The result always satisfies
    /// `min <= max <= MAX_SEQUENCE_LEN`.
    pub(crate) fn clamped(self) -> (usize, usize) {
        let max = self.max.min(MAX_SEQUENCE_LEN);
        let min = self.min.min(max);
        (min, max)
    }
}

/// Sample a length within `options`, then invoke `generate` that many times.
pub fn array_of<R, T, F>(rng: &mut R, mut generate: F, options: ArrayOptions) -> Vec<T>
where
    R: RandomSource,
    F: FnMut() -> T,
{
    let (min, max) = options.clamped();
    let len = rng.uniform_int(min as i64, max as i64) as usize;
    (0..len).map(|_| generate()).collect()
}

/// Uniform choice from `values`; `None` when empty.
pub fn one_of<'a, R, T>(rng: &mut R, values: &'a [T]) -> Option<&'a T>
where
    R: RandomSource,
{
    rng.choice(values)
}
