use super::errors::OpenError;
use super::fields::KEYSAFE_MARKER;
use super::parse::parse_line;
use super::record::KeySafeRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Find the first line carrying the `encryption.keySafe` marker
///
/// Bytes that are not valid UTF-8 are replaced, the configuration file
/// itself is plain text but may contain arbitrary display names.
pub fn find_keysafe_line<R: BufRead>(mut input: R) -> Result<String, OpenError> {
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        if input.read_until(b'\n', &mut buffer)? == 0 {
            return Err(OpenError::MissingMarker);
        }
        let line = String::from_utf8_lossy(&buffer);
        if line.contains(KEYSAFE_MARKER) {
            return Ok(line.into_owned());
        }
    }
}

/// Read the key-safe of a configuration file from an input stream
pub fn from_reader<R: Read>(input: R) -> Result<KeySafeRecord, OpenError> {
    let line = find_keysafe_line(BufReader::new(input))?;
    Ok(parse_line(&line)?)
}

/// Read the key-safe of the configuration file at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<KeySafeRecord, OpenError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading key-safe");
    let file = File::open(path)?;
    from_reader(file)
}
