// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod decrypt;
pub mod encrypt;
pub mod hash;
pub mod keygen;
pub mod signature;

pub use decrypt::{decrypt_bytes, decrypt_to_string};
pub use encrypt::{encrypt_bytes, encrypt_string, BLOCK_HEX_LEN};
pub use hash::{digest, hash_message, Digest};
pub use keygen::{RsaKeyPair, RsaPrivateKey, RsaPublicKey};
pub use signature::{sign, verify};
