// Modular Arithmetic
// Fixed-width u64 operations with u128 intermediates

use num_integer::Integer;

use crate::error::{CryptoError, Result};

/// (a * b) mod m without wrapping at 64 bits
#[inline]
pub fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

/// (a + b) mod m for a, b already reduced
#[inline]
pub fn add_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 + b as u128) % m as u128) as u64
}

/// (a - b) mod m for a, b already reduced
#[inline]
pub fn sub_mod(a: u64, b: u64, m: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        m - (b - a)
    }
}

/// Modular exponentiation: base^exponent mod modulus
/// Uses right-to-left square-and-multiply
pub fn mod_pow(base: u64, exponent: u64, modulus: u64) -> Result<u64> {
    if modulus == 0 {
        return Err(CryptoError::Domain("modulus must be non-zero".to_string()));
    }
    if modulus == 1 {
        return Ok(0);
    }

    let mut result = 1u64;
    let mut base = base % modulus;
    let mut exp = exponent;

    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        base = mul_mod(base, base, modulus);
        exp >>= 1;
    }

    Ok(result)
}

/// Exponentiation for call sites that already guarantee `modulus > 0`
#[inline]
pub(crate) fn pow_mod_unchecked(base: u64, exponent: u64, modulus: u64) -> u64 {
    debug_assert!(modulus > 0);
    mod_pow(base, exponent, modulus).unwrap_or(0)
}

/// Greatest common divisor
pub fn gcd(a: u64, b: u64) -> u64 {
    a.gcd(&b)
}

/// Least common multiple, `None` if it does not fit in 64 bits
pub fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd(a, b)
pub fn extended_gcd(a: u64, b: u64) -> (u64, i128, i128) {
    let (mut old_r, mut r) = (a as i128, b as i128);
    let (mut old_x, mut x) = (1i128, 0i128);
    let (mut old_y, mut y) = (0i128, 1i128);

    while r != 0 {
        let quotient = old_r / r;
        (old_r, r) = (r, old_r - quotient * r);
        (old_x, x) = (x, old_x - quotient * x);
        (old_y, y) = (y, old_y - quotient * y);
    }

    (old_r as u64, old_x, old_y)
}

/// Compute modular inverse: a^(-1) mod m
/// Returns None if the inverse doesn't exist
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    if m == 0 {
        return None;
    }
    if m == 1 {
        return Some(0);
    }

    let (g, x, _) = extended_gcd(a % m, m);
    if g != 1 {
        return None;
    }

    Some(x.rem_euclid(m as i128) as u64)
}
