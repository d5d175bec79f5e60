// Primality Testing
// Miller-Rabin, Jacobi symbol, strong Lucas and Baillie-PSW

use log::trace;
use rand::{thread_rng, Rng};

use super::modular::{add_mod, mul_mod, pow_mod_unchecked, sub_mod};

/// Write n-1 as d * 2^s with d odd
fn split_power_of_two(m: u64) -> (u64, u32) {
    let s = m.trailing_zeros();
    (m >> s, s)
}

/// One strong-probable-prime round for witness `a`
/// `n - 1 = d * 2^s`, n odd and > 3
fn strong_probable_prime(n: u64, a: u64, d: u64, s: u32) -> bool {
    let mut x = pow_mod_unchecked(a, d, n);
    if x == 1 || x == n - 1 {
        return true;
    }

    for _ in 1..s {
        x = mul_mod(x, x, n);
        if x == n - 1 {
            return true;
        }
        if x == 1 {
            return false;
        }
    }

    false
}

/// Miller-Rabin primality test with `k` random witnesses drawn from `rng`
/// Returns true if n is probably prime
pub fn miller_rabin<R: Rng + ?Sized>(n: u64, k: u32, rng: &mut R) -> bool {
    if n <= 1 || n == 4 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let (d, s) = split_power_of_two(n - 1);

    for _ in 0..k {
        // Pick random witness a in [2, n-2]
        let a = rng.gen_range(2..=n - 2);
        if !strong_probable_prime(n, a, d, s) {
            trace!("{} rejected by witness {}", n, a);
            return false;
        }
    }

    // Probably prime
    true
}

/// Miller-Rabin with a fresh thread-local witness source
pub fn miller_rabin_test(n: u64, k: u32) -> bool {
    miller_rabin(n, k, &mut thread_rng())
}

/// Jacobi symbol (a/n)
/// Returns 0 when n is not a positive odd integer
pub fn jacobi_symbol(a: i64, n: i64) -> i32 {
    if n <= 0 {
        return 0;
    }
    jacobi(a, n as u64)
}

/// Jacobi symbol over the full unsigned range of n
fn jacobi(a: i64, mut n: u64) -> i32 {
    if n % 2 == 0 {
        return 0;
    }

    let mut result = 1;
    if a < 0 && n % 4 == 3 {
        // (-1/n) = -1 exactly when n ≡ 3 (mod 4)
        result = -result;
    }
    let mut a = a.unsigned_abs() % n;

    while a != 0 {
        while a % 2 == 0 {
            a /= 2;
            if n % 8 == 3 || n % 8 == 5 {
                result = -result;
            }
        }
        std::mem::swap(&mut a, &mut n);
        if a % 4 == 3 && n % 4 == 3 {
            result = -result;
        }
        a %= n;
    }

    if n == 1 {
        result
    } else {
        0
    }
}

/// Signed value reduced into [0, n)
fn residue(x: i64, n: u64) -> u64 {
    (x as i128).rem_euclid(n as i128) as u64
}

/// x / 2 mod n for odd n
fn half_mod(x: u64, n: u64) -> u64 {
    if x % 2 == 0 {
        x / 2
    } else {
        ((x as u128 + n as u128) / 2) as u64
    }
}

/// Strong Lucas probable-prime test with parameters (D, P, Q), D = P^2 - 4Q
///
/// With n + 1 = d * 2^s, n passes when U_d ≡ 0, or V_(d*2^r) ≡ 0 for some
/// 0 <= r < s. Terms are built with a binary ladder over the bits of d.
pub fn lucas_probable_prime(n: u64, d: i64, p: i64, q: i64) -> bool {
    if n < 2 || n % 2 == 0 {
        return n == 2;
    }

    let Some(n_plus_one) = n.checked_add(1) else {
        return false;
    };
    let (delta, s) = split_power_of_two(n_plus_one);
    let d_res = residue(d, n);
    let p_res = residue(p, n);
    let q_res = residue(q, n);

    // k = 1: U_1 = 1, V_1 = P, Q^1
    let mut u = 1 % n;
    let mut v = p_res;
    let mut qk = q_res;

    for bit in (0..delta.ilog2()).rev() {
        // k -> 2k
        u = mul_mod(u, v, n);
        v = sub_mod(mul_mod(v, v, n), add_mod(qk, qk, n), n);
        qk = mul_mod(qk, qk, n);

        if (delta >> bit) & 1 == 1 {
            // 2k -> 2k + 1
            let next_u = half_mod(add_mod(mul_mod(p_res, u, n), v, n), n);
            let next_v = half_mod(add_mod(mul_mod(d_res, u, n), mul_mod(p_res, v, n), n), n);
            u = next_u;
            v = next_v;
            qk = mul_mod(qk, q_res, n);
        }
    }

    if u == 0 || v == 0 {
        return true;
    }

    for _ in 1..s {
        v = sub_mod(mul_mod(v, v, n), add_mod(qk, qk, n), n);
        if v == 0 {
            return true;
        }
        qk = mul_mod(qk, qk, n);
    }

    false
}

fn is_perfect_square(n: u64) -> bool {
    let root = (n as f64).sqrt() as u64;
    // Float root can be off by one near 2^64
    (root.saturating_sub(1)..=root + 1).any(|r| r.checked_mul(r) == Some(n))
}

/// Selfridge parameter search: first D in 5, -7, 9, -11, ... with (D/n) = -1
/// Returns None when some D exposes a factor of n
fn select_lucas_d(n: u64) -> Option<i64> {
    let mut d: i64 = 5;
    loop {
        match jacobi(d, n) {
            -1 => return Some(d),
            0 if d.unsigned_abs() != n => return None,
            _ => {}
        }
        d = if d > 0 { -(d + 2) } else { -(d - 2) };
    }
}

/// Baillie-PSW test: base-2 strong probable prime plus strong Lucas
pub fn baillie_psw(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let (d, s) = split_power_of_two(n - 1);
    if !strong_probable_prime(n, 2, d, s) {
        return false;
    }

    // No D with (D/n) = -1 exists for squares, the search would not end
    if is_perfect_square(n) {
        return false;
    }

    match select_lucas_d(n) {
        Some(d) => lucas_probable_prime(n, d, 1, (1 - d) / 4),
        None => false,
    }
}
