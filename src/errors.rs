//! Error types for vmx-rs

pub use crate::crack::CrackError;
pub use crate::crypto::KeyGenerationError;
pub use crate::keysafe::errors::{OpenError, ParseError};
pub use crate::verify::DecryptError;
pub use crate::wordlist::WordlistError;
use thiserror::Error;

#[derive(Error, Debug)]
/// Wrapper error type for this library
pub enum Error {
    /// Failed to read the key-safe from a configuration file
    #[error("Could not read key-safe: {0}")]
    Open(#[from] OpenError),
    /// The key-safe cannot be attacked
    #[error("Could not derive keys: {0}")]
    KeyGen(#[from] KeyGenerationError),
    /// The dictionary could not be opened
    #[error("{0}")]
    Wordlist(#[from] WordlistError),
    /// The attack was aborted
    #[error("Dictionary attack failed: {0}")]
    Crack(#[from] CrackError),
}
