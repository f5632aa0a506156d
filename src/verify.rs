//! Checking a derived key against the key-safe's encrypted dictionary
//!
//! The key-safe stores an encrypted key dictionary (`type=key:cipher=...:key=...`).
//! A candidate key is accepted when decrypting that dictionary yields one of
//! the known markers.
//!
//! Two shortcuts are taken, matching how the format has been cracked in practice:
//!
//! * The dictionary is always decrypted with AES-256-CBC using the first 32
//!   bytes of the derived key, even when the key-safe declares XTS-AES-256.
//!   This is not XTS decryption, it only works because the marker is
//!   recoverable that way.
//! * The 20 byte trailer after the ciphertext is never checked, a key is
//!   accepted on the plaintext marker alone.

use crate::crypto::DerivedKey;
use crate::keysafe::KeySafeRecord;
use crate::utils;
use aes::Aes256;
use cipher::block_padding::NoPadding;
use cipher::{BlockDecryptMut, KeyIvInit};
use thiserror::Error;

type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Marker found in a dictionary protected with AES-256
pub const AES_256_MARKER: &str = "type=key:cipher=AES-256:key=";
/// Marker found in a dictionary protected with XTS-AES-256
pub const XTS_AES_256_MARKER: &str = "type=key:cipher=XTS-AES-256:key=";

#[derive(Debug, Error, PartialEq, Eq)]
/// Reasons the dictionary could not be decrypted with a key
pub enum DecryptError {
    /// Key or IV have the wrong size for AES-256-CBC
    #[error("Invalid key or IV length for AES-256-CBC")]
    InvalidLength,
    /// The ciphertext is not a whole number of AES blocks
    #[error("Ciphertext of {0} bytes is not a multiple of the AES block size")]
    Misaligned(usize),
}

/// Decrypt the key-safe's embedded dictionary with a derived key
///
/// No padding is removed, the plaintext has the ciphertext's length.
pub fn decrypt_dictionary(
    record: &KeySafeRecord,
    key: &DerivedKey,
) -> Result<Vec<u8>, DecryptError> {
    let mut buffer = record.ciphertext().to_vec();
    let decryptor = Aes256CbcDec::new_from_slices(key.cipher_key(), record.iv())
        .map_err(|_| DecryptError::InvalidLength)?;
    let len = decryptor
        .decrypt_padded_mut::<NoPadding>(&mut buffer)
        .map_err(|_| DecryptError::Misaligned(record.ciphertext().len()))?
        .len();
    buffer.truncate(len);
    Ok(buffer)
}

/// Whether decrypted dictionary text carries one of the key markers
pub fn contains_marker(plaintext: &str) -> bool {
    plaintext.contains(AES_256_MARKER) || plaintext.contains(XTS_AES_256_MARKER)
}

/// Check whether a derived key unlocks the key-safe
///
/// A dictionary that cannot be decrypted counts as a mismatch. Bytes outside
/// ASCII are dropped before looking for the marker.
pub fn verify(record: &KeySafeRecord, key: &DerivedKey) -> bool {
    match decrypt_dictionary(record, key) {
        Ok(plaintext) => contains_marker(&utils::ascii_lossy(&plaintext)),
        Err(e) => {
            tracing::trace!(error = %e, "treating undecryptable dictionary as mismatch");
            false
        }
    }
}
