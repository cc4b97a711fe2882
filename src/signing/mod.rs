//! Ed25519 key handling and request signatures.
//!
//! Public keys and signatures travel as standard base64; secret keys are
//! stored as 32-byte hex, the same layout `ledger keygen` writes to disk.

mod canonical;

pub use canonical::CanonicalMessage;

use base64::{engine::general_purpose, Engine as _};
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::error::KeyError;

const SECRET_KEY_LEN: usize = 32;
const PUBLIC_KEY_LEN: usize = 32;

/// Device key pair used to sign ledger requests.
#[derive(Clone)]
pub struct KeyPair {
    signing: SigningKey,
}

impl KeyPair {
    /// Generate a fresh key pair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing: SigningKey::generate(&mut OsRng),
        }
    }

    pub fn from_secret_bytes(bytes: &[u8; SECRET_KEY_LEN]) -> Self {
        Self {
            signing: SigningKey::from_bytes(bytes),
        }
    }

    /// Parse a 64-character hex secret key. Surrounding whitespace is ignored.
    pub fn from_secret_hex(secret_hex: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(secret_hex.trim())?;
        let arr: [u8; SECRET_KEY_LEN] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| KeyError::Length {
                    expected: SECRET_KEY_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self::from_secret_bytes(&arr))
    }

    pub fn secret_hex(&self) -> String {
        hex::encode(self.signing.to_bytes())
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing.verifying_key()
    }

    /// The public key as sent in `owner`/`creator`/`sender` fields.
    pub fn public_key_base64(&self) -> String {
        general_purpose::STANDARD.encode(self.verifying_key().as_bytes())
    }

    /// Short, log-safe identifier: first 8 bytes of SHA-256 over the public key.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.verifying_key().as_bytes());
        hex::encode(&digest[..8])
    }

    /// Sign `message` and return the base64 signature.
    pub fn sign(&self, message: &str) -> String {
        let signature = self.signing.sign(message.as_bytes());
        general_purpose::STANDARD.encode(signature.to_bytes())
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("fingerprint", &self.fingerprint())
            .finish_non_exhaustive()
    }
}

/// Sign a canonical message with `key_pair`.
pub fn sign(key_pair: &KeyPair, message: &CanonicalMessage) -> String {
    key_pair.sign(message.as_str())
}

/// Check a base64 signature against a base64 public key.
pub fn verify(public_key_base64: &str, message: &str, signature_base64: &str) -> Result<(), KeyError> {
    let key_bytes = general_purpose::STANDARD.decode(public_key_base64)?;
    let key_arr: [u8; PUBLIC_KEY_LEN] =
        key_bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::Length {
                expected: PUBLIC_KEY_LEN,
                actual: key_bytes.len(),
            })?;
    let key = VerifyingKey::from_bytes(&key_arr).map_err(|_| KeyError::PublicKey)?;

    let sig_bytes = general_purpose::STANDARD.decode(signature_base64)?;
    let signature = Signature::from_slice(&sig_bytes).map_err(|_| KeyError::Signature)?;
    key.verify_strict(message.as_bytes(), &signature)
        .map_err(|_| KeyError::Signature)
}
