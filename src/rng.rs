//! Injectable randomness for particle layout and loading jitter.

/// Source of uniform floats in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform float in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }
}

/// 32-bit linear congruential generator (Numerical Recipes constants).
/// Not crypto secure; plenty for decoration.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        // fold the high half in so 64-bit seeds aren't truncated away
        Self { state: (seed ^ (seed >> 32)) as u32 }
    }

    /// Seed from the platform RNG (`rng` feature) or the page clock.
    pub fn from_entropy() -> Self {
        #[cfg(feature = "rng")]
        {
            let mut buf = [0u8; 8];
            if getrandom::getrandom(&mut buf).is_ok() {
                return Self::new(u64::from_le_bytes(buf));
            }
        }
        Self::new(crate::dom::now_ms().to_bits())
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RandomSource for Lcg {
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }
}
