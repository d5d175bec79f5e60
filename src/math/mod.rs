// Number Theory Module
// Modular arithmetic, primality tests and prime search

pub mod modular;
pub mod primality;
pub mod prime_gen;

pub use modular::{extended_gcd, gcd, lcm, mod_inverse, mod_pow, mul_mod};
pub use primality::{
    baillie_psw, jacobi_symbol, lucas_probable_prime, miller_rabin, miller_rabin_test,
};
pub use prime_gen::{find_primes_with_bit_length, PrimeGenerator};
