// Randomness capability for the engine. Everything the generator draws goes
// through this trait, so a seeded `StdRng` makes whole fixtures reproducible.

use fake::Fake;
use fake::faker::lorem::en::Word;
use rand::Rng;
use uuid::Uuid;

/// Uniform randomness plus the two string primitives generation needs.
///
/// Implemented for every `rand::Rng`, which covers `StdRng`, `ThreadRng` and
/// seeded test generators alike.
pub trait RandomSource {
    /// Uniform integer with inclusive bounds. Callers keep `min <= max`.
    fn uniform_int(&mut self, min: i64, max: i64) -> i64;

    /// Uniform float in `[min, max)`. Callers keep `min < max`.
    fn uniform_float(&mut self, min: f64, max: f64) -> f64;

    fn uniform_bool(&mut self) -> bool;

    /// One short lowercase lorem word.
    fn short_word(&mut self) -> String;

    /// Canonical lowercase 8-4-4-4-12 UUID string, drawn from this source so
    /// seeded runs reproduce their identifiers.
    fn uuid_hyphenated(&mut self) -> String;

    /// Uniform choice from a slice; `None` when the slice is empty.
    fn choice<'a, T>(&mut self, values: &'a [T]) -> Option<&'a T> {
        if values.is_empty() {
            return None;
        }
        let index = self.uniform_int(0, values.len() as i64 - 1) as usize;
        values.get(index)
    }
}

impl<R: Rng> RandomSource for R {
    fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        self.gen_range(min..=max)
    }

    fn uniform_float(&mut self, min: f64, max: f64) -> f64 {
        self.gen_range(min..max)
    }

    fn uniform_bool(&mut self) -> bool {
        self.gen_bool(0.5)
    }

    fn short_word(&mut self) -> String {
        Word().fake_with_rng::<String, _>(self)
    }

    fn uuid_hyphenated(&mut self) -> String {
        // Random bytes with the version-4 and RFC 4122 variant bits forced,
        // instead of Uuid::new_v4, so the bytes come from *this* source.
        let mut bytes = [0u8; 16];
        self.fill(&mut bytes);
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;
        Uuid::from_bytes(bytes).hyphenated().to_string()
    }
}
