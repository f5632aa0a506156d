use super::errors::ParseError;
use super::fields::{
    CipherAlgorithm, KeySafeField, AES_IV_SIZE, IDENTIFIER_SIZE, SALT_SIZE, TRAILER_SIZE,
};
use super::record::{KeySafeFormat, KeySafeRecord};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

type Result<T> = std::result::Result<T, ParseError>;

const PHRASE_TAG: &str = "phrase/";
const VENDOR_LIST_PREFIX: &str = "vmware:key/list/(pair/(phrase/";
const LIST_PREFIX: &str = "key/list/(pair/(phrase/";

/// Standard alphabet, but accepting what VMware writes: missing padding and
/// non-zero trailing bits both occur in the wild.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Still encoded fields of a descriptor
#[derive(Debug, PartialEq, Eq)]
struct RawFields<'a> {
    identifier: &'a str,
    hash_algorithm: &'a str,
    cipher: &'a str,
    rounds: &'a str,
    salt: &'a str,
    config_hash: &'a str,
    blob: &'a str,
}

fn take_until<'a>(input: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    let idx = input.find(delimiter)?;
    Some((&input[..idx], &input[idx + delimiter.len()..]))
}

/// Split the text following `phrase/` into its seven fields.
///
/// Each field runs up to the first occurrence of the delimiter after it, the
/// blob ends at the first `)`. Returns the text after that parenthesis.
fn split_body(body: &str) -> Option<(RawFields<'_>, &str)> {
    let (identifier, rest) = take_until(body, "/pass2key=")?;
    let (hash_algorithm, rest) = take_until(rest, ":cipher=")?;
    let (cipher, rest) = take_until(rest, ":rounds=")?;
    let (rounds, rest) = take_until(rest, ":salt=")?;
    let (salt, rest) = take_until(rest, ",")?;
    let (config_hash, rest) = take_until(rest, ",")?;
    let (blob, rest) = take_until(rest, ")")?;
    let fields = RawFields {
        identifier,
        hash_algorithm,
        cipher,
        rounds,
        salt,
        config_hash,
        blob,
    };
    Some((fields, rest))
}

fn match_wrapped<'a>(line: &'a str, prefix: &str) -> Option<RawFields<'a>> {
    let (_, body) = take_until(line, prefix)?;
    let (fields, rest) = split_body(body)?;
    // The list and the pair both need closing
    if rest.starts_with(')') {
        Some(fields)
    } else {
        None
    }
}

fn match_bare(line: &str) -> Option<RawFields<'_>> {
    line.rmatch_indices(PHRASE_TAG)
        .filter(|(idx, _)| *idx > 0)
        .find_map(|(idx, _)| split_body(&line[idx + PHRASE_TAG.len()..]))
        .map(|(fields, _)| fields)
}

impl KeySafeFormat {
    fn match_line(self, line: &str) -> Option<RawFields<'_>> {
        match self {
            KeySafeFormat::VendorList => match_wrapped(line, VENDOR_LIST_PREFIX),
            KeySafeFormat::List => match_wrapped(line, LIST_PREFIX),
            KeySafeFormat::Bare => match_bare(line),
        }
    }
}

fn unquote(value: &str) -> Cow<'_, str> {
    percent_decode_str(value).decode_utf8_lossy()
}

fn decode_base64(field: KeySafeField, value: &str) -> Result<Vec<u8>> {
    LENIENT_BASE64
        .decode(value)
        .map_err(|e| ParseError::MalformedField(field, e.to_string()))
}

fn check_len(field: KeySafeField, value: Vec<u8>, expected: usize) -> Result<Vec<u8>> {
    if value.len() == expected {
        Ok(value)
    } else {
        Err(ParseError::MalformedField(
            field,
            format!("expected {} bytes, found {}", expected, value.len()),
        ))
    }
}

fn parse_rounds(value: &str) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(0) => Err(ParseError::MalformedField(
            KeySafeField::Rounds,
            "round count must be positive".to_string(),
        )),
        Ok(rounds) => Ok(rounds),
        Err(e) => Err(ParseError::MalformedField(
            KeySafeField::Rounds,
            format!("{:?} is not a round count - {}", value, e),
        )),
    }
}

impl<'a> RawFields<'a> {
    fn decode(self, format: KeySafeFormat) -> Result<KeySafeRecord> {
        let identifier = decode_base64(KeySafeField::Identifier, &unquote(self.identifier))?;
        let identifier = check_len(KeySafeField::Identifier, identifier, IDENTIFIER_SIZE)?;
        let rounds = parse_rounds(self.rounds)?;
        let salt = decode_base64(KeySafeField::Salt, &unquote(self.salt))?;
        let salt = check_len(KeySafeField::Salt, salt, SALT_SIZE)?;
        let encrypted_blob = decode_base64(KeySafeField::Blob, self.blob)?;
        if encrypted_blob.len() < AES_IV_SIZE + TRAILER_SIZE {
            return Err(ParseError::MalformedField(
                KeySafeField::Blob,
                format!(
                    "{} bytes is too short for an IV and trailer",
                    encrypted_blob.len()
                ),
            ));
        }

        Ok(KeySafeRecord {
            format,
            identifier,
            hash_algorithm: self.hash_algorithm.to_string(),
            cipher: CipherAlgorithm::from(self.cipher),
            rounds,
            salt,
            config_hash: self.config_hash.to_string(),
            encrypted_blob,
        })
    }
}

/// Parse the raw `encryption.keySafe` line of a configuration file
///
/// The line is percent-decoded and then matched against each
/// [`KeySafeFormat`] in the order of [`KeySafeFormat::ALL`]. The first
/// shape that matches is used, even if a later one would also match.
///
/// An unsupported cipher is not an error here, it is only rejected when a
/// key has to be derived.
pub fn parse_line(line: &str) -> Result<KeySafeRecord> {
    let decoded = unquote(line);
    for format in KeySafeFormat::ALL.iter().copied() {
        if let Some(fields) = format.match_line(&decoded) {
            tracing::debug!(%format, "matched key-safe descriptor shape");
            return fields.decode(format);
        }
    }
    Err(ParseError::UnrecognizedFormat(decoded.into_owned()))
}
