mod common;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use common::Shape;
use vmx_rs::keysafe::{self, CipherAlgorithm, KeySafeField, KeySafeFormat, OpenError, ParseError};

fn check_fields(shape: Shape, expected_format: KeySafeFormat) {
    let blob = common::encrypted_blob("hunter2", "AES-256", 1000);
    let line = common::keysafe_line(shape, "AES-256", 1000, &blob);

    let record = keysafe::parse_line(&line).unwrap();

    assert_eq!(record.format(), expected_format);
    assert_eq!(record.identifier_hex(), common::IDENTIFIER_HEX);
    assert_eq!(record.hash_algorithm(), "PBKDF2-HMAC-SHA-1");
    assert_eq!(record.cipher(), &CipherAlgorithm::Aes256);
    assert_eq!(record.rounds(), 1000);
    assert_eq!(record.salt_hex(), common::SALT_HEX);
    assert_eq!(record.config_hash(), "HMAC-SHA-1");
    assert_eq!(
        STANDARD.encode(record.encrypted_blob()),
        STANDARD.encode(&blob)
    );
    assert_eq!(record.iv(), &common::IV[..]);
    assert_eq!(record.trailer(), &[0x5a; 20][..]);
    assert_eq!(record.ciphertext().len() % 16, 0);
}

#[test]
fn identifier_needs_second_unescape() {
    let line = common::locked_line(Shape::List, "AES-256", "hunter2");
    assert!(line.contains("/%252b%252f%252b%252fWLxW8xg%253d/"));

    let record = keysafe::parse_line(&line).unwrap();
    assert_eq!(record.identifier(), &common::IDENTIFIER[..]);
}

#[test]
fn vendor_list_shape() {
    check_fields(Shape::VendorList, KeySafeFormat::VendorList);
}

#[test]
fn list_shape() {
    check_fields(Shape::List, KeySafeFormat::List);
}

#[test]
fn bare_shape() {
    check_fields(Shape::Bare, KeySafeFormat::Bare);
}

#[test]
fn xts_cipher() {
    let line = common::locked_line(Shape::VendorList, "XTS-AES-256", "pw");
    let record = keysafe::parse_line(&line).unwrap();
    assert_eq!(record.cipher(), &CipherAlgorithm::XtsAes256);
    assert_eq!(record.cipher().key_size(), Some(64));
}

#[test]
fn shapes_are_tried_newest_first() {
    // A vendor list is also a valid list and a valid bare phrase
    let line = common::locked_line(Shape::VendorList, "AES-256", "pw");
    assert_eq!(
        keysafe::parse_line(&line).unwrap().format(),
        KeySafeFormat::VendorList
    );
    assert_eq!(KeySafeFormat::ALL[0], KeySafeFormat::VendorList);
    assert_eq!(KeySafeFormat::ALL[2], KeySafeFormat::Bare);
}

#[test]
fn unsupported_cipher_parses() {
    let blob = common::encrypted_blob("pw", "AES-256", 10);
    let line = common::keysafe_line(Shape::VendorList, "AES-128", 10, &blob);
    let record = keysafe::parse_line(&line).unwrap();
    assert_eq!(
        record.cipher(),
        &CipherAlgorithm::Unknown("AES-128".to_string())
    );
}

#[test]
fn truncated_pass2key_segment() {
    let line = common::locked_line(Shape::VendorList, "AES-256", "pw");
    let cut = line.find("pass2key").unwrap() + "pass2key%3dPBKD".len();
    let result = keysafe::parse_line(&line[..cut]);
    assert!(matches!(result, Err(ParseError::UnrecognizedFormat(_))));
}

#[test]
fn garbled_pass2key_segment() {
    let line = common::locked_line(Shape::VendorList, "AES-256", "pw")
        .replace("%3acipher%3d", "%3bcypher%3d");
    let result = keysafe::parse_line(&line);
    match result {
        Err(ParseError::UnrecognizedFormat(decoded)) => {
            assert!(decoded.contains(";cypher="));
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn garbled_rounds() {
    let line = common::locked_line(Shape::List, "AES-256", "pw")
        .replace("rounds%3d1000", "rounds%3d1O00");
    assert!(matches!(
        keysafe::parse_line(&line),
        Err(ParseError::MalformedField(KeySafeField::Rounds, _))
    ));
}

#[test]
fn garbled_blob() {
    let line = common::locked_line(Shape::VendorList, "AES-256", "pw");
    let start = line.find("HMAC-SHA-1,").unwrap() + "HMAC-SHA-1,".len();
    let line = format!("{}*not base64*))\"\n", &line[..start]);
    assert!(matches!(
        keysafe::parse_line(&line),
        Err(ParseError::MalformedField(KeySafeField::Blob, _))
    ));
}

#[test]
fn read_from_vmx_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_vmx(
        dir.path(),
        &common::locked_line(Shape::VendorList, "AES-256", "pw"),
    );
    let record = vmx_rs::open(&path).unwrap();
    assert_eq!(record.identifier_hex(), common::IDENTIFIER_HEX);
    assert_eq!(record.rounds(), common::ROUNDS);
}

#[test]
fn unencrypted_vmx_file() {
    let contents = common::vmx_contents("");
    assert!(matches!(
        vmx_rs::from_reader(contents.as_bytes()),
        Err(OpenError::MissingMarker)
    ));
}

#[test]
fn missing_vmx_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        vmx_rs::open(dir.path().join("nope.vmx")),
        Err(OpenError::Io(_))
    ));
}
