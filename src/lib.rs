#![deny(missing_docs)]

//! Module to read VMware VMX key-safes and recover their passphrase.
//!
//! An encrypted virtual machine keeps an `encryption.keySafe` entry in its
//! otherwise plain text `.vmx` file. It describes how the user's passphrase
//! is stretched into a key, and holds a small dictionary encrypted with that
//! key. This crate parses the entry and runs dictionary attacks against it.
//!
//! The main types in this crate are:
//!
//! * [`KeySafeRecord`] which represents a parsed key-safe
//! * [`Cracker`] which tests candidate passphrases against a key-safe
//!
//! # Reading a key-safe
//!
//! Key-safes can be read with the [`vmx_rs::open`] function. All three
//! descriptor shapes written by VMware releases are accepted.
//!
//! ```no_run
//! # fn main() -> Result<(), vmx_rs::Error> {
//! let record = vmx_rs::open("./Windows 10.vmx")?;
//! println!("ID = {}", record.identifier_hex());
//! println!("Cipher = {}", record.cipher());
//! println!("Rounds = {}", record.rounds());
//! # Ok(())
//! # }
//! ```
//!
//! # Testing a single passphrase
//!
//! ```no_run
//! # fn main() -> Result<(), vmx_rs::Error> {
//! # let record = vmx_rs::open("./Windows 10.vmx")?;
//! let key = vmx_rs::crypto::derive_key(&record, "hunter2")?;
//! if vmx_rs::verify::verify(&record, &key) {
//!     println!("unlocked");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Running a dictionary attack
//!
//! [`vmx_rs::crack_files`] reads the key-safe and a dictionary file and tries
//! every line in order. Use [`Cracker`] directly for other candidate sources.
//!
//! ```no_run
//! # fn main() -> Result<(), vmx_rs::Error> {
//! let outcome = vmx_rs::crack_files("./Windows 10.vmx", "./rockyou.txt", 1000, |p| {
//!     eprintln!("tested {} passwords...", p.tested)
//! })?;
//! match outcome.passphrase() {
//!     Some(pw) => println!("password found = {}", pw),
//!     None => println!("password not found"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`Cracker`]: crate::Cracker
//! [`KeySafeRecord`]: crate::KeySafeRecord
//! [`vmx_rs::open`]: crate::open
//! [`vmx_rs::crack_files`]: crate::crack_files

pub mod crack;
pub mod crypto;
pub mod errors;
pub mod keysafe;
pub mod telemetry;
mod utils;
pub mod verify;
pub mod wordlist;

pub use crack::{Cracker, Outcome, Progress};
pub use errors::Error;
pub use keysafe::{from_reader, open, KeySafeRecord};
pub use wordlist::Wordlist;

use std::path::Path;

/// Run a dictionary attack against the key-safe of a configuration file
///
/// The key-safe is read and checked for a supported cipher before the
/// dictionary is opened. `on_progress` is called every `progress_interval`
/// candidates.
pub fn crack_files<P, Q, F>(
    config: P,
    dictionary: Q,
    progress_interval: u64,
    on_progress: F,
) -> Result<Outcome, Error>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(Progress),
{
    let record = open(config)?;
    let cracker = Cracker::new(&record)?.with_progress_interval(progress_interval);
    let wordlist = Wordlist::open(dictionary)?;
    Ok(cracker.crack(wordlist, on_progress)?)
}
