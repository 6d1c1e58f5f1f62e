//! The signer capability.
//!
//! The signing protocol never touches key material. It hands a message to
//! a [`Signer`] and gets raw signature bytes back. Where the key lives
//! (memory, a hardware wallet, a remote KMS) is the implementor's business.
//!
//! [`InMemorySigner`] is the software implementation shipped with the SDK:
//! an ECDSA secp256k1 key that hashes with the account key's registered
//! hash algorithm and returns the 64-byte `r || s` encoding the chain
//! expects.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::hash::{sha2_256, sha3_256};

/// Errors raised by a signer.
///
/// Key bytes never appear in these messages.
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("invalid private key bytes")]
    InvalidPrivateKey,

    #[error("invalid public key bytes")]
    InvalidPublicKey,

    #[error("invalid signature bytes")]
    InvalidSignature,

    #[error("signing failed: {0}")]
    Failed(String),
}

// ---------------------------------------------------------------------------
// Algorithms
// ---------------------------------------------------------------------------

/// Hash algorithm an account key is registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[serde(rename = "SHA2_256")]
    Sha2_256,
    #[serde(rename = "SHA3_256")]
    Sha3_256,
}

impl HashAlgorithm {
    /// Numeric code used on chain.
    pub fn code(self) -> u32 {
        match self {
            HashAlgorithm::Sha2_256 => 1,
            HashAlgorithm::Sha3_256 => 3,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(HashAlgorithm::Sha2_256),
            3 => Some(HashAlgorithm::Sha3_256),
            _ => None,
        }
    }

    pub fn digest(self, message: &[u8]) -> [u8; 32] {
        match self {
            HashAlgorithm::Sha2_256 => sha2_256(message),
            HashAlgorithm::Sha3_256 => sha3_256(message),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha2_256 => write!(f, "SHA2_256"),
            HashAlgorithm::Sha3_256 => write!(f, "SHA3_256"),
        }
    }
}

/// Signature algorithm an account key is registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignAlgorithm {
    #[serde(rename = "ECDSA_P256")]
    EcdsaP256,
    #[serde(rename = "ECDSA_secp256k1")]
    EcdsaSecp256k1,
}

impl SignAlgorithm {
    pub fn code(self) -> u32 {
        match self {
            SignAlgorithm::EcdsaP256 => 2,
            SignAlgorithm::EcdsaSecp256k1 => 3,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            2 => Some(SignAlgorithm::EcdsaP256),
            3 => Some(SignAlgorithm::EcdsaSecp256k1),
            _ => None,
        }
    }
}

impl fmt::Display for SignAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignAlgorithm::EcdsaP256 => write!(f, "ECDSA_P256"),
            SignAlgorithm::EcdsaSecp256k1 => write!(f, "ECDSA_secp256k1"),
        }
    }
}

// ---------------------------------------------------------------------------
// Signer
// ---------------------------------------------------------------------------

/// Produces signature bytes for a message.
///
/// Called synchronously by the signing protocol. Implementations may block
/// (hardware round-trips, remote calls); no timeout is imposed here.
pub trait Signer {
    /// The hash algorithm registered for the key this signer uses.
    fn hash_algorithm(&self) -> HashAlgorithm;

    /// Hashes `message` with [`Signer::hash_algorithm`] and signs the digest.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError>;
}

/// A secp256k1 private key held in process memory.
///
/// Does not implement `Debug` with key contents, nor `Serialize`.
/// Exporting the key is an explicit [`InMemorySigner::secret_key_bytes`] call.
pub struct InMemorySigner {
    key: SigningKey,
    hash: HashAlgorithm,
}

impl InMemorySigner {
    /// A fresh key from the OS RNG.
    pub fn generate(hash: HashAlgorithm) -> Self {
        Self {
            key: SigningKey::random(&mut OsRng),
            hash,
        }
    }

    /// Loads a 32-byte secret scalar.
    pub fn from_bytes(secret: &[u8], hash: HashAlgorithm) -> Result<Self, SignerError> {
        let key = SigningKey::from_slice(secret).map_err(|_| SignerError::InvalidPrivateKey)?;
        Ok(Self { key, hash })
    }

    /// Loads a hex-encoded secret scalar, with or without `0x`.
    pub fn from_hex(secret_hex: &str, hash: HashAlgorithm) -> Result<Self, SignerError> {
        let digits = secret_hex.trim().trim_start_matches("0x");
        let bytes = hex::decode(digits).map_err(|_| SignerError::InvalidPrivateKey)?;
        Self::from_bytes(&bytes, hash)
    }

    pub fn sign_algorithm(&self) -> SignAlgorithm {
        SignAlgorithm::EcdsaSecp256k1
    }

    /// The 64-byte `X || Y` public key, the form account keys are
    /// registered with.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        let point = self.key.verifying_key().to_encoded_point(false);
        point.as_bytes()[1..].to_vec()
    }

    /// Raw secret scalar. Handle with care.
    pub fn secret_key_bytes(&self) -> Vec<u8> {
        self.key.to_bytes().to_vec()
    }
}

impl fmt::Debug for InMemorySigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemorySigner")
            .field("public_key", &hex::encode(self.public_key_bytes()))
            .field("hash", &self.hash)
            .finish()
    }
}

impl Signer for InMemorySigner {
    fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        let digest = self.hash.digest(message);
        let signature: Signature = self
            .key
            .sign_prehash(&digest)
            .map_err(|e| SignerError::Failed(e.to_string()))?;
        Ok(signature.to_bytes().to_vec())
    }
}

/// Checks a 64-byte `r || s` secp256k1 signature against a 64-byte
/// `X || Y` public key.
pub fn verify_secp256k1(
    public_key: &[u8],
    message: &[u8],
    signature: &[u8],
    hash: HashAlgorithm,
) -> Result<bool, SignerError> {
    let mut sec1 = Vec::with_capacity(65);
    sec1.push(0x04);
    sec1.extend_from_slice(public_key);
    let key = VerifyingKey::from_sec1_bytes(&sec1).map_err(|_| SignerError::InvalidPublicKey)?;
    let signature = Signature::from_slice(signature).map_err(|_| SignerError::InvalidSignature)?;
    Ok(key
        .verify_prehash(&hash.digest(message), &signature)
        .is_ok())
}
