//! `encryption.keySafe` descriptors and their textual encoding

pub(crate) mod errors;
mod fields;
mod parse;
mod read;
mod record;

pub use errors::{OpenError, ParseError};
pub use fields::{
    CipherAlgorithm, KeySafeField, AES_IV_SIZE, AES_KEY_SIZE, IDENTIFIER_SIZE, KEYSAFE_MARKER,
    SALT_SIZE, TRAILER_SIZE, XTS_KEY_SIZE,
};
pub use parse::parse_line;
pub use read::{find_keysafe_line, from_reader, open};
pub use record::{KeySafeFormat, KeySafeRecord};
