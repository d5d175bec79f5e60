// RSA Signatures
// Hash-then-exponentiate over the truncated message digest

use log::debug;

use super::encrypt::{encode_block, BLOCK_HEX_LEN};
use super::hash::hash_message;
use super::keygen::{RsaKeyPair, RsaPublicKey};
use crate::error::Result;
use crate::math::modular::{mod_pow, pow_mod_unchecked};

/// Parse a single fixed-width hex block
fn parse_signature(signature: &str) -> Option<u64> {
    if signature.len() != BLOCK_HEX_LEN {
        return None;
    }
    let bytes: [u8; 8] = hex::decode(signature).ok()?.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}

/// Sign `message` with the private exponent
/// The truncated digest is reduced mod n before exponentiation
pub fn sign(message: &[u8], key: &RsaKeyPair) -> Result<String> {
    let digest = hash_message(message) % key.n;
    let signature = mod_pow(digest, key.d, key.n)?;
    Ok(encode_block(signature))
}

/// Check `signature` over `message` against the signer's public key
pub fn verify(message: &[u8], signature: &str, public_key: &RsaPublicKey) -> bool {
    if public_key.n == 0 {
        return false;
    }

    let Some(sig) = parse_signature(signature) else {
        debug!("malformed signature {:?}", signature);
        return false;
    };
    if sig >= public_key.n {
        return false;
    }

    let recovered = pow_mod_unchecked(sig, public_key.e, public_key.n);
    recovered == hash_message(message) % public_key.n
}

impl RsaKeyPair {
    pub fn sign(&self, message: &str) -> Result<String> {
        sign(message.as_bytes(), self)
    }

    /// Verify a signature made by the owner of `public_key`
    pub fn verify(&self, message: &str, signature: &str, public_key: &RsaPublicKey) -> bool {
        verify(message.as_bytes(), signature, public_key)
    }
}
