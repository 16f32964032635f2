//! Ed25519 keypair inspection.
//!
//! Solana keypair files hold 64 bytes: the 32-byte secret seed followed by
//! the 32-byte public key, written as a JSON array of integers. This module
//! validates such an array and derives the printable forms of the key:
//! the base58 public key and the hex encoding of the full keypair.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use ed25519_dalek::{KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SigningKey};
use serde::Serialize;
use thiserror::Error;

/// Errors while reading or validating keypair bytes.
#[derive(Error, Debug)]
pub enum KeypairError {
    #[error("keypair must be 64 bytes, got {0}")]
    InvalidLength(usize),

    #[error("invalid byte value '{0}': expected an integer from 0 to 255")]
    InvalidByte(String),

    #[error("failed to parse keypair JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("public key does not match the secret key: {0}")]
    Mismatch(ed25519_dalek::SignatureError),

    #[error("failed to read keypair file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read keypair from stdin: {0}")]
    ReadStdin(std::io::Error),
}

/// Where keypair bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeypairSource {
    /// A Solana CLI keypair file.
    File(PathBuf),
    /// Bytes given inline, as a JSON array or comma-separated list.
    Inline(String),
    /// Bytes piped on stdin.
    Stdin,
}

impl KeypairSource {
    /// Read and parse the raw bytes from this source.
    pub fn load(&self) -> Result<Vec<u8>, KeypairError> {
        match self {
            KeypairSource::File(path) => read_keypair_file(path),
            KeypairSource::Inline(text) => parse_keypair(text),
            KeypairSource::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(KeypairError::ReadStdin)?;
                parse_keypair(&text)
            }
        }
    }
}

/// Printable forms of a validated keypair.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct DerivedKeypair {
    /// Base58 public key, as shown by Solana tooling.
    pub public_key: String,
    pub public_key_bytes: [u8; PUBLIC_KEY_LENGTH],
    /// Hex encoding of all 64 keypair bytes.
    pub secret_hex: String,
}

impl fmt::Debug for DerivedKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKeypair")
            .field("public_key", &self.public_key)
            .field("secret_hex", &"[REDACTED]")
            .finish()
    }
}

/// Validate 64 keypair bytes and derive their printable forms.
pub fn derive_keypair(bytes: &[u8]) -> Result<DerivedKeypair, KeypairError> {
    let keypair: &[u8; KEYPAIR_LENGTH] = bytes
        .try_into()
        .map_err(|_| KeypairError::InvalidLength(bytes.len()))?;

    let signing_key = SigningKey::from_keypair_bytes(keypair).map_err(KeypairError::Mismatch)?;
    let public_key_bytes = signing_key.verifying_key().to_bytes();

    tracing::debug!("keypair public half verified against secret seed");

    Ok(DerivedKeypair {
        public_key: bs58::encode(public_key_bytes).into_string(),
        public_key_bytes,
        secret_hex: hex::encode(keypair),
    })
}

/// Parse keypair text, accepting either a JSON array or a bare list.
pub fn parse_keypair(text: &str) -> Result<Vec<u8>, KeypairError> {
    if text.trim_start().starts_with('[') {
        parse_keypair_json(text)
    } else {
        parse_keypair_list(text)
    }
}

/// Parse the Solana CLI keypair file format (`[12, 34, ...]`).
pub fn parse_keypair_json(text: &str) -> Result<Vec<u8>, KeypairError> {
    Ok(serde_json::from_str::<Vec<u8>>(text.trim())?)
}

/// Parse byte values separated by commas and/or whitespace.
pub fn parse_keypair_list(text: &str) -> Result<Vec<u8>, KeypairError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u8>()
                .map_err(|_| KeypairError::InvalidByte(token.to_string()))
        })
        .collect()
}

/// Read a Solana CLI keypair file.
pub fn read_keypair_file(path: &Path) -> Result<Vec<u8>, KeypairError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeypairError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_keypair_json(&content)
}
