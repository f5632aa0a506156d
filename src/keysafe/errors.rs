use super::fields::KeySafeField;
use thiserror::Error;

#[derive(Error, Debug)]
/// Errors encountered locating the key-safe in a configuration file
pub enum OpenError {
    /// No line carries the `encryption.keySafe` marker
    #[error("Invalid VMX file or VMX file is not encrypted - no encryption.keySafe entry")]
    MissingMarker,
    /// The key-safe line could not be parsed
    #[error("Invalid key-safe - {0}")]
    InvalidKeySafe(#[from] ParseError),
    /// Error encountered reading the configuration file
    #[error("IO error reading file - {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors encountered decoding a key-safe line
pub enum ParseError {
    /// The line matches none of the known descriptor shapes
    #[error("Unsupported encryption.keySafe line format:\n{0}")]
    UnrecognizedFormat(String),
    /// A field was captured but could not be decoded
    #[error("Malformed {0} field - {1}")]
    MalformedField(KeySafeField, String),
}
