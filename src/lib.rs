//! Number-theoretic primitives and textbook RSA over 64-bit integers.
//!
//! - [`math`]: modular exponentiation, Miller-Rabin, Jacobi symbol, strong
//!   Lucas and Baillie-PSW tests, exhaustive prime search by bit length
//! - [`rsa`]: key generation with CRT parameters, byte-wise encryption,
//!   CRT decryption, digest-then-exponentiate signatures
//! - [`util`]: generator configuration and radix formatting
//!
//! Nothing here is constant-time, and the 64-bit width keeps every key far
//! below a secure size.

pub mod error;
pub mod math;
pub mod rsa;
pub mod util;

pub use error::{CryptoError, Result};
pub use rsa::{RsaKeyPair, RsaPrivateKey, RsaPublicKey};
pub use util::GeneratorConfig;
