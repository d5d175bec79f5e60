// RSA Key Generation
// Builds an RSA key pair over 64-bit integers with CRT parameters

use log::{debug, trace, warn};
use rand::{thread_rng, Rng};

use crate::error::{CryptoError, Result};
use crate::math::modular::{gcd, lcm, mod_inverse};
use crate::math::primality::baillie_psw;
use crate::math::prime_gen::PrimeGenerator;
use crate::util::config::GeneratorConfig;

/// RSA Public Key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub e: u64, // Public exponent
    pub n: u64, // Modulus
}

/// RSA Private Key (exponent view)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub d: u64, // Private exponent
    pub n: u64, // Modulus (same as public)
}

impl From<(u64, u64)> for RsaPublicKey {
    fn from((e, n): (u64, u64)) -> Self {
        Self { e, n }
    }
}

impl RsaPublicKey {
    /// Number of significant bits in the modulus
    pub fn bit_length(&self) -> u32 {
        u64::BITS - self.n.leading_zeros()
    }
}

/// Smallest modulus that encrypts every byte value without reduction
pub const MIN_MODULUS: u64 = 256;

/// RSA Key Pair
///
/// Owns the primes and every derived parameter. Nothing is mutable after
/// construction; the rest of the crate reads the fields directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    pub(crate) p: u64,
    pub(crate) q: u64,
    pub(crate) n: u64,
    pub(crate) e: u64,
    pub(crate) d: u64,
    // Pre-computed values for faster decryption
    pub(crate) dp: u64,   // d mod (p-1)
    pub(crate) dq: u64,   // d mod (q-1)
    pub(crate) qinv: u64, // q^(-1) mod p
    bit_length: u32,
}

/// Carmichael function λ(pq) = lcm(p-1, q-1)
fn carmichael(p: u64, q: u64) -> Result<u64> {
    lcm(p - 1, q - 1)
        .ok_or_else(|| CryptoError::Overflow(format!("lcm({}, {}) exceeds 64 bits", p - 1, q - 1)))
}

/// Uniform draw from `candidates` that also passes Baillie-PSW and differs
/// from `exclude`
fn draw_prime<R: Rng>(
    search: &mut PrimeGenerator<R>,
    candidates: &[u64],
    exclude: Option<u64>,
) -> Result<u64> {
    let max_attempts = search.config().max_attempts;
    for _ in 0..max_attempts {
        let candidate = search.pick_from(candidates)?;
        if Some(candidate) == exclude {
            trace!("redrawing duplicate prime {}", candidate);
            continue;
        }
        if baillie_psw(candidate) {
            return Ok(candidate);
        }
        trace!("{} failed the Baillie-PSW check", candidate);
    }

    warn!("no usable prime after {} draws", max_attempts);
    Err(CryptoError::Generation(format!(
        "no usable prime after {} draws",
        max_attempts
    )))
}

/// Rejection-sample e in [2, λ-1] until gcd(e, λ) = 1
fn choose_exponent<R: Rng + ?Sized>(rng: &mut R, lambda: u64, max_attempts: u32) -> Result<u64> {
    for _ in 0..max_attempts {
        let e = rng.gen_range(2..lambda);
        if gcd(e, lambda) == 1 {
            return Ok(e);
        }
    }

    warn!("no public exponent coprime to {} after {} draws", lambda, max_attempts);
    Err(CryptoError::Generation(format!(
        "no public exponent coprime to {} after {} draws",
        lambda, max_attempts
    )))
}

impl RsaKeyPair {
    /// Generate a key pair whose modulus has about `bit_length` bits,
    /// using the default configuration and a thread-local generator
    pub fn generate(bit_length: u32) -> Result<Self> {
        Self::generate_with(bit_length, &GeneratorConfig::default(), &mut thread_rng())
    }

    /// Generate a key pair with an explicit configuration and randomness source
    ///
    /// p and q are drawn from the exhaustive scan at `bit_length / 2` bits,
    /// so the scan ceiling in `config` bounds the key size.
    pub fn generate_with<R: Rng + ?Sized>(
        bit_length: u32,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let half_bits = bit_length / 2;
        debug!("generating {}-bit key from {}-bit primes", bit_length, half_bits);

        let mut search = PrimeGenerator::new(config.clone(), &mut *rng);
        let candidates = search.find_primes(half_bits)?;
        if candidates.len() < 2 {
            return Err(CryptoError::Domain(format!(
                "{} primes with {} bits, need at least two distinct",
                candidates.len(),
                half_bits
            )));
        }

        // Step 1: two distinct primes
        let p = draw_prime(&mut search, &candidates, None)?;
        let q = draw_prime(&mut search, &candidates, Some(p))?;

        // Step 2: λ = lcm(p-1, q-1)
        let lambda = carmichael(p, q)?;
        if lambda < 3 {
            return Err(CryptoError::Domain(format!(
                "λ = {} leaves no public exponent for p = {}, q = {}",
                lambda, p, q
            )));
        }

        // Step 3: random e coprime to λ
        let e = choose_exponent(search.rng(), lambda, config.max_attempts)?;
        debug!("p = {}, q = {}, λ = {}, e = {}", p, q, lambda, e);

        Self::assemble(p, q, e, bit_length)
    }

    /// Build a key pair from fixed primes and public exponent
    pub fn from_primes(p: u64, q: u64, e: u64) -> Result<Self> {
        if p == q {
            return Err(CryptoError::Domain("p and q must differ".to_string()));
        }
        for prime in [p, q] {
            if prime % 2 == 0 || !baillie_psw(prime) {
                return Err(CryptoError::Domain(format!("{} is not an odd prime", prime)));
            }
        }

        let n = p
            .checked_mul(q)
            .ok_or_else(|| CryptoError::Overflow(format!("{} * {} exceeds 64 bits", p, q)))?;
        Self::assemble(p, q, e, RsaPublicKey { e, n }.bit_length())
    }

    /// Derive n, d and the CRT parameters
    fn assemble(p: u64, q: u64, e: u64, bit_length: u32) -> Result<Self> {
        let n = p
            .checked_mul(q)
            .ok_or_else(|| CryptoError::Overflow(format!("{} * {} exceeds 64 bits", p, q)))?;
        if n < MIN_MODULUS {
            return Err(CryptoError::Domain(format!(
                "modulus {} cannot hold a byte, need at least {}",
                n, MIN_MODULUS
            )));
        }
        let lambda = carmichael(p, q)?;

        if e < 2 || e >= lambda || gcd(e, lambda) != 1 {
            return Err(CryptoError::Domain(format!(
                "e = {} is not a unit in [2, {})",
                e, lambda
            )));
        }

        // d = e^(-1) mod λ
        let d = mod_inverse(e, lambda)
            .ok_or_else(|| CryptoError::Domain("failed to compute e^(-1) mod λ".to_string()))?;

        // CRT parameters
        let dp = d % (p - 1);
        let dq = d % (q - 1);
        let qinv = mod_inverse(q, p)
            .ok_or_else(|| CryptoError::Domain("failed to compute q^(-1) mod p".to_string()))?;

        Ok(Self {
            p,
            q,
            n,
            e,
            d,
            dp,
            dq,
            qinv,
            bit_length,
        })
    }

    /// (e, n)
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey { e: self.e, n: self.n }
    }

    /// (d, n)
    pub fn private_key(&self) -> RsaPrivateKey {
        RsaPrivateKey { d: self.d, n: self.n }
    }

    pub fn modulus(&self) -> u64 {
        self.n
    }

    /// Requested modulus size
    pub fn bit_length(&self) -> u32 {
        self.bit_length
    }

    /// λ(n) = lcm(p-1, q-1)
    pub fn carmichael(&self) -> u64 {
        // Validated at construction
        carmichael(self.p, self.q).unwrap_or(0)
    }
}
