//! Prints the parsed key-safe of a VMX file
//!
//! Primarily for investigating the key-safe format.

use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: vmx-dump-keysafe <path to vmx file>");
        return ExitCode::FAILURE;
    }
    if let Err(e) = vmx_rs::telemetry::init("warn") {
        eprintln!("Could not set up logging: {}", e);
    }

    let record = match vmx_rs::open(&args[1]) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("Could not read key-safe: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Format: {}", record.format());
    println!("ID: {}", record.identifier_hex());
    println!("Hash: {}", record.hash_algorithm());
    match record.cipher().key_size() {
        Some(size) => println!("Cipher: {} ({} byte key)", record.cipher(), size),
        None => println!("Cipher: {} (unsupported)", record.cipher()),
    }
    println!("Rounds: {}", record.rounds());
    println!("Salt: {}", record.salt_hex());
    println!("Config Hash: {}", record.config_hash());
    println!("Encrypted dictionary: {} bytes", record.encrypted_blob().len());
    println!("\tIV: {:?}", record.iv());
    println!("\tCiphertext: {} bytes", record.ciphertext().len());
    println!("\tTrailer: {:?}", record.trailer());
    ExitCode::SUCCESS
}
