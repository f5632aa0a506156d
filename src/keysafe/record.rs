use super::fields::{CipherAlgorithm, AES_IV_SIZE, TRAILER_SIZE};
use crate::utils;
use std::fmt;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
/// Textual shape of a key-safe descriptor
///
/// Successive releases wrapped the same descriptor fields differently.
pub enum KeySafeFormat {
    /// `vmware:key/list/(pair/(phrase/...))`, current releases
    VendorList,
    /// `key/list/(pair/(phrase/...))` without the vendor scheme
    List,
    /// `...phrase/...)` with no list wrapper, oldest releases
    Bare,
}

impl KeySafeFormat {
    /// Every shape, in the order they are tried when parsing
    pub const ALL: [KeySafeFormat; 3] = [
        KeySafeFormat::VendorList,
        KeySafeFormat::List,
        KeySafeFormat::Bare,
    ];
}

impl fmt::Display for KeySafeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeySafeFormat::VendorList => "vmware key list",
            KeySafeFormat::List => "key list",
            KeySafeFormat::Bare => "bare phrase",
        };
        f.write_str(name)
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
/// Parsed `encryption.keySafe` descriptor
///
/// Describes how a passphrase is turned into the key protecting the
/// embedded key dictionary. Obtained from [`crate::open`] or
/// [`crate::keysafe::parse_line`].
pub struct KeySafeRecord {
    pub(crate) format: KeySafeFormat,
    pub(crate) identifier: Vec<u8>,
    pub(crate) hash_algorithm: String,
    pub(crate) cipher: CipherAlgorithm,
    pub(crate) rounds: u32,
    pub(crate) salt: Vec<u8>,
    pub(crate) config_hash: String,
    pub(crate) encrypted_blob: Vec<u8>,
}

impl KeySafeRecord {
    /// Descriptor shape the record was parsed from
    pub fn format(&self) -> KeySafeFormat {
        self.format
    }

    /// Raw identifier bytes
    pub fn identifier(&self) -> &[u8] {
        &self.identifier
    }

    /// Identifier as lowercase hex, as shown to users
    pub fn identifier_hex(&self) -> String {
        utils::to_hex_string(&self.identifier)
    }

    /// Declared password hashing scheme, e.g. `PBKDF2-HMAC-SHA-1`
    ///
    /// Informational only, derivation always uses PBKDF2-HMAC-SHA1.
    pub fn hash_algorithm(&self) -> &str {
        &self.hash_algorithm
    }

    /// Declared cipher
    pub fn cipher(&self) -> &CipherAlgorithm {
        &self.cipher
    }

    /// PBKDF2 iteration count
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// PBKDF2 salt
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Salt as lowercase hex
    pub fn salt_hex(&self) -> String {
        utils::to_hex_string(&self.salt)
    }

    /// Config hash tag, not used for cracking
    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    /// Full encrypted blob, `IV || ciphertext || trailer`
    pub fn encrypted_blob(&self) -> &[u8] {
        &self.encrypted_blob
    }

    /// IV used to decrypt the embedded dictionary
    pub fn iv(&self) -> &[u8] {
        &self.encrypted_blob[..AES_IV_SIZE]
    }

    /// Encrypted dictionary without IV and trailer
    pub fn ciphertext(&self) -> &[u8] {
        &self.encrypted_blob[AES_IV_SIZE..self.encrypted_blob.len() - TRAILER_SIZE]
    }

    /// Trailing 20 bytes of the blob
    ///
    /// Present for integrity checking but never verified here.
    pub fn trailer(&self) -> &[u8] {
        &self.encrypted_blob[self.encrypted_blob.len() - TRAILER_SIZE..]
    }
}
