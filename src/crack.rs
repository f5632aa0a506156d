//! Dictionary attack against a key-safe

use crate::crypto::{self, KeyGenerationError};
use crate::keysafe::KeySafeRecord;
use crate::verify;
use std::io;
use thiserror::Error;

/// Number of candidates between two progress reports unless configured
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1000;

#[derive(Debug, Error)]
/// Errors that abort a dictionary attack
pub enum CrackError {
    /// Reading the next candidate failed
    #[error("Error reading dictionary - {0}")]
    Io(#[from] io::Error),
    /// No key can be derived for this key-safe
    #[error("Key generation failed - {0}")]
    KeyGen(#[from] KeyGenerationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Progress report passed to the caller during an attack
pub struct Progress {
    /// Candidates tested so far
    pub tested: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of a finished attack
pub enum Outcome {
    /// A candidate unlocked the key-safe
    Found {
        /// The candidate, exactly as read from the dictionary
        passphrase: String,
        /// Candidates tested, including the matching one
        tested: u64,
    },
    /// Every candidate was tested without a match
    Exhausted {
        /// Candidates tested
        tested: u64,
    },
}

impl Outcome {
    /// The recovered passphrase, if any
    pub fn passphrase(&self) -> Option<&str> {
        match self {
            Outcome::Found { passphrase, .. } => Some(passphrase),
            Outcome::Exhausted { .. } => None,
        }
    }

    /// Number of candidates that were tested
    pub fn tested(&self) -> u64 {
        match self {
            Outcome::Found { tested, .. } | Outcome::Exhausted { tested } => *tested,
        }
    }
}

/// Runs candidates against a single key-safe
///
/// Candidates are tried in the order given and the attack stops at the first
/// match, later candidates are never pulled from the source.
///
/// ```no_run
/// # fn main() -> Result<(), vmx_rs::Error> {
/// use vmx_rs::crack::Cracker;
/// use vmx_rs::Wordlist;
///
/// let record = vmx_rs::open("encrypted.vmx")?;
/// let cracker = Cracker::new(&record)?.with_progress_interval(500);
/// let outcome = cracker.crack(Wordlist::open("words.txt")?, |p| {
///     eprintln!("tested {} passwords...", p.tested)
/// })?;
/// if let Some(passphrase) = outcome.passphrase() {
///     println!("password found = {}", passphrase);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Cracker<'a> {
    record: &'a KeySafeRecord,
    key_size: usize,
    progress_interval: u64,
}

impl<'a> Cracker<'a> {
    /// Prepare an attack, failing if the key-safe cipher is unsupported
    pub fn new(record: &'a KeySafeRecord) -> Result<Cracker<'a>, KeyGenerationError> {
        let key_size = crypto::key_size(record.cipher())?;
        Ok(Cracker {
            record,
            key_size,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        })
    }

    /// Report progress every `interval` candidates, `0` disables reports
    pub fn with_progress_interval(mut self, interval: u64) -> Cracker<'a> {
        self.progress_interval = interval;
        self
    }

    /// Key-safe under attack
    pub fn record(&self) -> &KeySafeRecord {
        self.record
    }

    /// Test a single candidate
    pub fn try_candidate(&self, candidate: &str) -> Result<bool, KeyGenerationError> {
        let key = crypto::derive_key_sized(self.record, candidate, self.key_size)?;
        Ok(verify::verify(self.record, &key))
    }

    /// Test candidates until one matches or the source runs dry
    pub fn crack<I, F>(&self, candidates: I, mut on_progress: F) -> Result<Outcome, CrackError>
    where
        I: IntoIterator<Item = io::Result<String>>,
        F: FnMut(Progress),
    {
        tracing::debug!(
            cipher = %self.record.cipher(),
            rounds = self.record.rounds(),
            "starting dictionary attack"
        );
        let mut tested = 0u64;
        for candidate in candidates {
            let candidate = candidate?;
            let matched = self.try_candidate(&candidate)?;
            tested += 1;
            if matched {
                tracing::info!(tested, "passphrase found");
                return Ok(Outcome::Found {
                    passphrase: candidate,
                    tested,
                });
            }
            if self.progress_interval > 0 && tested % self.progress_interval == 0 {
                on_progress(Progress { tested });
            }
        }
        tracing::debug!(tested, "dictionary exhausted");
        Ok(Outcome::Exhausted { tested })
    }
}
