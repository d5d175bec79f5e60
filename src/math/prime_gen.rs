// Prime Search
// Exhaustive scan of a fixed-width range, filtered by Miller-Rabin

use log::{debug, warn};
use rand::{thread_rng, Rng};

use super::primality::miller_rabin;
use crate::error::{CryptoError, Result};
use crate::util::config::GeneratorConfig;

/// All primes in [2^(bits-1), 2^bits - 1], ascending
///
/// Every value in the range is tested, so the cost is `O(2^bits)` primality
/// tests; `bits` above the configured ceiling is rejected.
pub fn find_primes_with_bit_length(bits: u32) -> Result<Vec<u64>> {
    PrimeGenerator::new(GeneratorConfig::default(), thread_rng()).find_primes(bits)
}

/// Prime search bound to a configuration and a witness source
pub struct PrimeGenerator<R: Rng> {
    config: GeneratorConfig,
    rng: R,
}

impl<R: Rng> PrimeGenerator<R> {
    pub fn new(config: GeneratorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Exhaustive scan with `config.rounds` Miller-Rabin rounds per candidate
    pub fn find_primes(&mut self, bits: u32) -> Result<Vec<u64>> {
        if bits == 0 {
            return Err(CryptoError::Domain("bit length must be at least 1".to_string()));
        }
        if bits > self.config.max_bits {
            return Err(CryptoError::Domain(format!(
                "bit length {} exceeds the scan ceiling of {}",
                bits, self.config.max_bits
            )));
        }

        let start = 1u64 << (bits - 1);
        let end = (1u64 << bits) - 1;
        let rounds = self.config.rounds;
        let rng = &mut self.rng;

        let primes: Vec<u64> = (start..=end)
            .filter(|&candidate| miller_rabin(candidate, rounds, &mut *rng))
            .collect();

        debug!("{} primes with {} bits", primes.len(), bits);
        Ok(primes)
    }

    /// Uniform draw from the primes of the given bit length
    pub fn pick_prime(&mut self, bits: u32) -> Result<u64> {
        let primes = self.find_primes(bits)?;
        self.pick_from(&primes)
    }

    /// Uniform draw from a previously scanned candidate set
    pub fn pick_from(&mut self, primes: &[u64]) -> Result<u64> {
        if primes.is_empty() {
            warn!("empty prime candidate set");
            return Err(CryptoError::Domain("no prime candidates to choose from".to_string()));
        }
        Ok(primes[self.rng.gen_range(0..primes.len())])
    }

    pub(crate) fn rng(&mut self) -> &mut R {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator() -> PrimeGenerator<StdRng> {
        PrimeGenerator::new(GeneratorConfig::default(), StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_six_bit_primes() {
        let primes = find_primes_with_bit_length(6).unwrap();
        assert_eq!(primes, vec![37, 41, 43, 47, 53, 59, 61]);
    }

    #[test]
    fn test_small_widths() {
        let mut search = generator();
        assert!(search.find_primes(1).unwrap().is_empty());
        assert_eq!(search.find_primes(2).unwrap(), vec![2, 3]);
        assert_eq!(search.find_primes(3).unwrap(), vec![5, 7]);
        assert_eq!(search.find_primes(4).unwrap(), vec![11, 13]);
    }

    #[test]
    fn test_eight_bit_count() {
        // 23 primes between 128 and 255
        let primes = generator().find_primes(8).unwrap();
        assert_eq!(primes.len(), 23);
        assert_eq!(primes.first(), Some(&131));
        assert_eq!(primes.last(), Some(&251));
        assert!(primes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_bit_length_bounds() {
        let mut search = generator();
        assert!(matches!(search.find_primes(0), Err(CryptoError::Domain(_))));
        assert!(matches!(search.find_primes(21), Err(CryptoError::Domain(_))));

        let mut narrow = PrimeGenerator::new(
            GeneratorConfig::default().with_max_bits(4),
            StdRng::seed_from_u64(1),
        );
        assert!(narrow.find_primes(4).is_ok());
        assert!(narrow.find_primes(5).is_err());
    }

    #[test]
    fn test_pick_prime() {
        let mut search = generator();
        for _ in 0..20 {
            let p = search.pick_prime(6).unwrap();
            assert!([37, 41, 43, 47, 53, 59, 61].contains(&p));
        }
        assert!(matches!(search.pick_prime(1), Err(CryptoError::Domain(_))));
        assert!(search.pick_from(&[]).is_err());
    }
}
