//! Dictionary of candidate passphrases, one per line

use crate::utils;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors encountered opening a dictionary
pub enum WordlistError {
    /// The dictionary file could not be opened
    #[error("Could not open dictionary {}: {source}", path.display())]
    Unavailable {
        /// Path of the dictionary
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },
}

/// Candidate passphrases read lazily from a dictionary
///
/// Yields one candidate per line in file order. Lines end at `\n`, `\r\n` or
/// a lone `\r`. The line ending is removed, everything else including
/// surrounding whitespace is kept. Invalid UTF-8 sequences are dropped from
/// the candidate.
///
/// The underlying reader is released when the wordlist is dropped.
#[derive(Debug)]
pub struct Wordlist<R> {
    inner: R,
    buffer: Vec<u8>,
    /// Last line ended in `\r`, a `\n` right after it belongs to that line
    skip_lf: bool,
}

impl Wordlist<BufReader<File>> {
    /// Open the dictionary at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, WordlistError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| WordlistError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened dictionary");
        Ok(Wordlist::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Wordlist<R> {
    /// Read candidates from any buffered reader
    pub fn new(inner: R) -> Self {
        Wordlist {
            inner,
            buffer: Vec::new(),
            skip_lf: false,
        }
    }

    /// Read the next line into `buffer` without its ending
    ///
    /// Returns `false` once the reader is exhausted.
    fn read_line(&mut self) -> io::Result<bool> {
        self.buffer.clear();
        loop {
            let available = match self.inner.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(!self.buffer.is_empty());
            }
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.inner.consume(1);
                    continue;
                }
            }
            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    self.skip_lf = available[end] == b'\r';
                    self.buffer.extend_from_slice(&available[..end]);
                    self.inner.consume(end + 1);
                    return Ok(true);
                }
                None => {
                    let len = available.len();
                    self.buffer.extend_from_slice(available);
                    self.inner.consume(len);
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for Wordlist<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_line() {
            Ok(false) => None,
            Ok(true) => Some(Ok(utils::utf8_dropping_invalid(&self.buffer))),
            Err(e) => Some(Err(e)),
        }
    }
}
