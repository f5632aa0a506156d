//! Recovers the passphrase of an encrypted VMware virtual machine
//!
//! Runs a dictionary attack against the `encryption.keySafe` entry of a
//! `.vmx` file. Exits successfully only when the passphrase was found.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use vmx_rs::crack::{Cracker, DEFAULT_PROGRESS_INTERVAL};
use vmx_rs::{Error, KeySafeRecord, Outcome, Wordlist};

#[derive(Debug, Parser)]
#[command(name = "vmx-crack")]
#[command(
    version,
    about = "Dictionary attack against the password of an encrypted VMware VMX file."
)]
struct Cli {
    /// Path to the .vmx file
    #[arg(short = 'v', long = "vmx", value_name = "PATH", env = "VMX_CRACK_VMX")]
    vmx: PathBuf,

    /// Path to the password dictionary, one password per line
    #[arg(short = 'd', long = "dict", value_name = "PATH", env = "VMX_CRACK_DICT")]
    dict: PathBuf,

    /// Report every tested password and enable debug logging
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// Report progress after this many passwords
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    progress_every: u64,
}

fn print_banner() {
    println!("\n==================================================");
    println!("  VMX Password Cracker - all VMware VMX versions");
    println!("  Version: {}", env!("CARGO_PKG_VERSION"));
    println!("==================================================");
}

fn print_keysafe(record: &KeySafeRecord) {
    println!("\n[*] KeySafe information...");
    println!("\tID = {}", record.identifier_hex());
    println!("\tHash = {}", record.hash_algorithm());
    println!("\tAlgorithm = {}", record.cipher());
    println!("\tHash Rounds = {}", record.rounds());
    println!("\tSalt = {}", record.salt_hex());
    println!("\tConfig Hash = {}", record.config_hash());
}

fn run(args: &Cli) -> Result<Outcome, Error> {
    let record = vmx_rs::open(&args.vmx)?;
    print_keysafe(&record);

    let interval = if args.verbose { 1 } else { args.progress_every };
    let cracker = Cracker::new(&record)?.with_progress_interval(interval);
    let wordlist = Wordlist::open(&args.dict)?;

    println!("\n[*] Starting dictionary attack...");
    let outcome = cracker.crack(wordlist, |progress| {
        println!("\ttested {} passwords...", progress.tested)
    })?;
    Ok(outcome)
}

fn main() -> ExitCode {
    let args = Cli::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    if let Err(e) = vmx_rs::telemetry::init(level) {
        eprintln!("[-] Could not set up logging: {}", e);
    }

    print_banner();
    println!("\n[*] VMX file: {}", args.vmx.display());
    println!("[*] Dictionary: {}", args.dict.display());

    match run(&args) {
        Ok(Outcome::Found { passphrase, tested }) => {
            println!("\n[+] Password found after {} attempts", tested);
            println!("[+] VMX password: {}", passphrase);
            ExitCode::SUCCESS
        }
        Ok(Outcome::Exhausted { tested }) => {
            println!(
                "\n[-] Password not found in {} attempts. Try another dictionary.",
                tested
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("\n[-] Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
