//! Seeded pseudo-random number generator
//!
//! The opponent draws from this so a match can be replayed from its seed.
//! xorshift64* underneath.

/// Seeded random number generator
///
/// Deterministic: same seed = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 64-bit seed
    pub fn new(seed: u64) -> Self {
        // xorshift must never hold a zero state
        let state = (seed ^ 0x9e3779b97f4a7c15).max(1);

        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }
        rng
    }

    /// Seed from the platform's entropy source
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// Seed from the browser's `Math.random`
    #[cfg(target_arch = "wasm32")]
    pub fn from_entropy() -> Self {
        #[cfg(feature = "wasm")]
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        #[cfg(not(feature = "wasm"))]
        let seed = 0x2545f4914f6cdd1d;
        Self::new(seed)
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Generate next u32
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a value 0-99 (for percentage checks)
    pub fn next_percent(&mut self) -> u8 {
        self.next_range(100) as u8
    }

    /// Generate a value in range [0, max), without modulo bias
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // draws at or above the last whole multiple of `max` are redrawn
        let zone = u32::MAX - u32::MAX % max;
        loop {
            let v = self.next_u32();
            if v < zone {
                return v % max;
            }
        }
    }
}
