use std::fmt;

/// Marker token identifying the key-safe line of a configuration file
pub const KEYSAFE_MARKER: &str = "encryption.keySafe";

/// Length of the decoded key-safe identifier
pub const IDENTIFIER_SIZE: usize = 8;
/// Length of the decoded PBKDF2 salt
pub const SALT_SIZE: usize = 16;
/// Length of the IV at the start of the encrypted blob
pub const AES_IV_SIZE: usize = 16;
/// AES-256 key size in bytes
pub const AES_KEY_SIZE: usize = 32;
/// XTS-AES-256 uses two AES-256 keys
pub const XTS_KEY_SIZE: usize = AES_KEY_SIZE * 2;
/// Length of the (unchecked) SHA-1 sized trailer at the end of the blob
pub const TRAILER_SIZE: usize = 20;

const AES_256_TAG: &str = "AES-256";
const XTS_AES_256_TAG: &str = "XTS-AES-256";

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
/// Descriptor field that failed to decode or validate
pub enum KeySafeField {
    /// Opaque identifier of the key-safe entry
    Identifier,
    /// PBKDF2 iteration count
    Rounds,
    /// PBKDF2 salt
    Salt,
    /// Encrypted key dictionary
    Blob,
}

impl fmt::Display for KeySafeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeySafeField::Identifier => "identifier",
            KeySafeField::Rounds => "rounds",
            KeySafeField::Salt => "salt",
            KeySafeField::Blob => "encrypted dictionary",
        };
        f.write_str(name)
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
/// Cipher declared by the key-safe descriptor
pub enum CipherAlgorithm {
    /// AES 256, 32 byte keys
    Aes256,
    /// XTS-AES 256, 64 byte keys
    XtsAes256,
    /// Cipher unknown to this library, kept verbatim
    Unknown(String),
}

const CIPHER_TABLE: [(&str, CipherAlgorithm); 2] = [
    (AES_256_TAG, CipherAlgorithm::Aes256),
    (XTS_AES_256_TAG, CipherAlgorithm::XtsAes256),
];

impl CipherAlgorithm {
    /// Size of the key the descriptor's cipher expects, if supported
    pub fn key_size(&self) -> Option<usize> {
        match self {
            CipherAlgorithm::Aes256 => Some(AES_KEY_SIZE),
            CipherAlgorithm::XtsAes256 => Some(XTS_KEY_SIZE),
            CipherAlgorithm::Unknown(_) => None,
        }
    }

    /// Tag as written in the descriptor
    pub fn as_str(&self) -> &str {
        match self {
            CipherAlgorithm::Aes256 => AES_256_TAG,
            CipherAlgorithm::XtsAes256 => XTS_AES_256_TAG,
            CipherAlgorithm::Unknown(tag) => tag,
        }
    }
}

impl From<&str> for CipherAlgorithm {
    fn from(tag: &str) -> CipherAlgorithm {
        CIPHER_TABLE
            .iter()
            .find(|(known, _)| *known == tag)
            .map(|(_, cipher)| cipher.clone())
            .unwrap_or_else(|| CipherAlgorithm::Unknown(tag.to_string()))
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
