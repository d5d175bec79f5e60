// Generator Configuration
// Tunables for prime search and key generation

/// Default number of Miller-Rabin rounds applied to every scanned candidate
pub const DEFAULT_ROUNDS: u32 = 100;

/// Largest bit length the exhaustive prime scan accepts
pub const DEFAULT_MAX_BITS: u32 = 20;

/// Cap for every randomized rejection loop
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Configuration for prime search and RSA key generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub rounds: u32,
    pub max_bits: u32,
    pub max_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            max_bits: DEFAULT_MAX_BITS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GeneratorConfig {
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// The scan costs `O(2^bits)` primality tests, so this is a hard ceiling.
    /// Values above 32 are clamped since `p * q` must fit in 64 bits.
    pub fn with_max_bits(mut self, max_bits: u32) -> Self {
        self.max_bits = max_bits.min(32);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.rounds, 100);
        assert_eq!(config.max_bits, 20);
        assert_eq!(config.max_attempts, 10_000);
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::default()
            .with_rounds(5)
            .with_max_bits(64)
            .with_max_attempts(0);
        assert_eq!(config.rounds, 5);
        assert_eq!(config.max_bits, 32);
        assert_eq!(config.max_attempts, 1);
    }
}
