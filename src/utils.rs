//! Utilities to help working with key-safe data

use std::fmt::Write;

/// Convert a byte array to a lowercase hex string
/// e.g. [0xf2, 0x02, 0x12] => "f20212"
pub(crate) fn to_hex_string(data: &[u8]) -> String {
    let mut output = String::with_capacity(data.len() * 2);

    for byte in data {
        // Writing to a String cannot fail
        let _ = write!(output, "{:02x}", byte);
    }

    output
}

/// Keep only the ASCII bytes of `data`
pub(crate) fn ascii_lossy(data: &[u8]) -> String {
    data.iter()
        .filter(|b| b.is_ascii())
        .map(|&b| char::from(b))
        .collect()
}

/// Decode UTF-8, silently dropping invalid sequences instead of replacing them
pub(crate) fn utf8_dropping_invalid(data: &[u8]) -> String {
    let mut output = String::with_capacity(data.len());
    for chunk in data.utf8_chunks() {
        output.push_str(chunk.valid());
    }
    output
}
