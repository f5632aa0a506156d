#![allow(dead_code)]

use aes::Aes256;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cipher::block_padding::NoPadding;
use cipher::{BlockEncryptMut, KeyIvInit};
use std::fs;
use std::path::{Path, PathBuf};

pub const IDENTIFIER: [u8; 8] = [0xfb, 0xff, 0xbf, 0x58, 0xbc, 0x56, 0xf3, 0x18];
pub const IDENTIFIER_HEX: &str = "fbffbf58bc56f318";
pub const SALT: [u8; 16] = [
    0xfb, 0xfe, 0x3e, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc,
];
pub const SALT_HEX: &str = "fbfe3e00112233445566778899aabbcc";
pub const IV: [u8; 16] = [
    0x10, 0x32, 0x54, 0x76, 0x98, 0xba, 0xdc, 0xfe, 0xef, 0xcd, 0xab, 0x89, 0x67, 0x45, 0x23, 0x01,
];
pub const ROUNDS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    VendorList,
    List,
    Bare,
}

/// Percent-encode the characters VMware escapes inside the key-safe
fn quote(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('=', "%3d")
        .replace('/', "%2f")
        .replace('+', "%2b")
}

fn key_size(cipher: &str) -> usize {
    if cipher == "XTS-AES-256" {
        64
    } else {
        32
    }
}

/// Build `IV || AES-256-CBC(dictionary) || trailer` locked with `passphrase`
pub fn encrypted_blob(passphrase: &str, cipher: &str, rounds: u32) -> Vec<u8> {
    let mut key = vec![0u8; key_size(cipher)];
    vmx_rs::crypto::pbkdf2_hmac_sha1(passphrase.as_bytes(), &SALT, rounds, &mut key).unwrap();

    let dictionary = format!(
        "type=key:cipher={}:key=iVBy1Rf6LUX4dd%2bLFhbQ0g7oNOafZwbyyNXIOOWL%2fnY%3d",
        cipher
    );
    let mut data = dictionary.into_bytes();
    let pad = 16 - data.len() % 16;
    data.extend(std::iter::repeat(pad as u8).take(pad));
    let len = data.len();
    cbc::Encryptor::<Aes256>::new_from_slices(&key[..32], &IV)
        .unwrap()
        .encrypt_padded_mut::<NoPadding>(&mut data, len)
        .unwrap();

    let mut blob = IV.to_vec();
    blob.extend_from_slice(&data);
    blob.extend_from_slice(&[0x5a; 20]);
    blob
}

/// Encoded `encryption.keySafe` line as written to a .vmx file
pub fn keysafe_line(shape: Shape, cipher: &str, rounds: u32, blob: &[u8]) -> String {
    let identifier = quote(&quote(&STANDARD.encode(IDENTIFIER)));
    let salt = quote(&quote(&STANDARD.encode(SALT)));
    let blob = quote(&STANDARD.encode(blob));
    let body = format!(
        "phrase/{}/pass2key%3dPBKDF2-HMAC-SHA-1%3acipher%3d{}%3arounds%3d{}%3asalt%3d{},HMAC-SHA-1,{}",
        identifier, cipher, rounds, salt, blob
    );
    let descriptor = match shape {
        Shape::VendorList => format!("vmware:key/list/(pair/({}))", body),
        Shape::List => format!("key/list/(pair/({}))", body),
        Shape::Bare => format!("{})", body),
    };
    format!("encryption.keySafe = \"{}\"\n", descriptor)
}

/// Line for a key-safe locked with `passphrase` using the default parameters
pub fn locked_line(shape: Shape, cipher: &str, passphrase: &str) -> String {
    keysafe_line(shape, cipher, ROUNDS, &encrypted_blob(passphrase, cipher, ROUNDS))
}

pub fn vmx_contents(keysafe_line: &str) -> String {
    format!(
        ".encoding = \"UTF-8\"\nconfig.version = \"8\"\nvirtualHW.version = \"19\"\ndisplayName = \"Fixture VM\"\n{}encryption.data = \"AAAA\"\n",
        keysafe_line
    )
}

pub fn write_vmx(dir: &Path, keysafe_line: &str) -> PathBuf {
    let path = dir.join("fixture.vmx");
    fs::write(&path, vmx_contents(keysafe_line)).unwrap();
    path
}

pub fn write_dictionary(dir: &Path, words: &[&str]) -> PathBuf {
    let path = dir.join("words.txt");
    let mut contents = words.join("\n");
    contents.push('\n');
    fs::write(&path, contents).unwrap();
    path
}
