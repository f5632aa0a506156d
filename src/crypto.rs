//! Passphrase to key derivation

use crate::keysafe::{CipherAlgorithm, KeySafeRecord, AES_KEY_SIZE};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::fmt;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

type HmacSha1 = Hmac<Sha1>;

const SHA1_OUTPUT_SIZE: usize = 20;

#[derive(Debug, Error)]
/// Errors encountered turning a passphrase into a key
pub enum KeyGenerationError {
    /// The key-safe declares a cipher whose key size is unknown
    #[error("Unsupported key-safe cipher: {0}")]
    UnsupportedCipher(String),
    /// The key derivation function rejected its input
    #[error("Could not generate key: {0}")]
    KeyGeneration(String),
}

/// Key derived from one candidate passphrase
///
/// 32 bytes for AES-256, 64 bytes for XTS-AES-256. Wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop, PartialEq, Eq)]
pub struct DerivedKey(Vec<u8>);

impl DerivedKey {
    /// Full derived key
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the derived key in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key is empty, never true for keys from [`derive_key`]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// AES-256 key used to decrypt the key-safe dictionary
    ///
    /// The first half of an XTS key, see [`crate::verify`].
    pub(crate) fn cipher_key(&self) -> &[u8] {
        &self.0[..usize::min(AES_KEY_SIZE, self.0.len())]
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivedKey([REDACTED; {}])", self.0.len())
    }
}

/// PBKDF2 (RFC 8018) with HMAC-SHA1 as pseudorandom function
///
/// Fills `output` completely, producing as many SHA-1 sized blocks as needed.
pub fn pbkdf2_hmac_sha1(
    password: &[u8],
    salt: &[u8],
    rounds: u32,
    output: &mut [u8],
) -> Result<(), KeyGenerationError> {
    let prf = HmacSha1::new_from_slice(password)
        .map_err(|e| KeyGenerationError::KeyGeneration(e.to_string()))?;

    for (block_idx, chunk) in (1u32..).zip(output.chunks_mut(SHA1_OUTPUT_SIZE)) {
        let mut mac = prf.clone();
        mac.update(salt);
        mac.update(&block_idx.to_be_bytes());
        let mut u = mac.finalize().into_bytes();
        let mut block = u.clone();

        for _ in 1..rounds {
            let mut mac = prf.clone();
            mac.update(&u);
            u = mac.finalize().into_bytes();
            for (b, x) in block.iter_mut().zip(u.iter()) {
                *b ^= x;
            }
        }

        chunk.copy_from_slice(&block[..chunk.len()]);
    }
    Ok(())
}

/// Key size required by a key-safe cipher
pub fn key_size(cipher: &CipherAlgorithm) -> Result<usize, KeyGenerationError> {
    cipher
        .key_size()
        .ok_or_else(|| KeyGenerationError::UnsupportedCipher(cipher.to_string()))
}

pub(crate) fn derive_key_sized(
    record: &KeySafeRecord,
    passphrase: &str,
    key_size: usize,
) -> Result<DerivedKey, KeyGenerationError> {
    let mut key = vec![0u8; key_size];
    pbkdf2_hmac_sha1(passphrase.as_bytes(), record.salt(), record.rounds(), &mut key)?;
    Ok(DerivedKey(key))
}

/// Derive the key a passphrase would produce for this key-safe
///
/// The declared `pass2key` algorithm is ignored, VMware only uses
/// PBKDF2-HMAC-SHA-1.
pub fn derive_key(
    record: &KeySafeRecord,
    passphrase: &str,
) -> Result<DerivedKey, KeyGenerationError> {
    let key_size = key_size(record.cipher())?;
    derive_key_sized(record, passphrase, key_size)
}
