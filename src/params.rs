//! Algorithm identifiers and default KEK parameters
//!
//! The KDF parameter block is the 4-byte structure OpenPGP attaches to an
//! ECDH key: `03 01 hash_id cipher_id` (RFC 6637). Algorithm ids are the
//! RFC 4880 registry values.

use crate::error::{Error, Result};

/// Digest algorithms usable for KEK derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// SHA-256, id 8
    Sha256,
    /// SHA-384, id 9
    Sha384,
    /// SHA-512, id 10
    Sha512,
}

impl HashAlgorithm {
    /// RFC 4880 digest algorithm id.
    pub fn id(self) -> u8 {
        match self {
            HashAlgorithm::Sha256 => 8,
            HashAlgorithm::Sha384 => 9,
            HashAlgorithm::Sha512 => 10,
        }
    }

    /// Look up a supported algorithm by its registry id.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            8 => Some(HashAlgorithm::Sha256),
            9 => Some(HashAlgorithm::Sha384),
            10 => Some(HashAlgorithm::Sha512),
            _ => None,
        }
    }

    /// Digest output size in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

/// Ciphers usable for key wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherAlgorithm {
    /// AES with a 128-bit key, id 7
    Aes128,
    /// AES with a 192-bit key, id 8
    Aes192,
    /// AES with a 256-bit key, id 9
    Aes256,
}

impl CipherAlgorithm {
    /// RFC 4880 symmetric algorithm id.
    pub fn id(self) -> u8 {
        match self {
            CipherAlgorithm::Aes128 => 7,
            CipherAlgorithm::Aes192 => 8,
            CipherAlgorithm::Aes256 => 9,
        }
    }

    /// Look up a supported cipher by its registry id.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            7 => Some(CipherAlgorithm::Aes128),
            8 => Some(CipherAlgorithm::Aes192),
            9 => Some(CipherAlgorithm::Aes256),
            _ => None,
        }
    }

    /// Key length in bytes.
    pub fn key_len(self) -> usize {
        match self {
            CipherAlgorithm::Aes128 => 16,
            CipherAlgorithm::Aes192 => 24,
            CipherAlgorithm::Aes256 => 32,
        }
    }
}

/// Number of wire bytes following the length octet.
const KDF_PARAMS_LEN: u8 = 3;

/// Version byte for the KDF+AESWRAP scheme.
const KDF_PARAMS_VERSION: u8 = 1;

/// The KDF algorithm choice attached to an ECDH public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// KEK digest algorithm.
    pub hash: HashAlgorithm,
    /// KEK wrap cipher.
    pub cipher: CipherAlgorithm,
}

impl KdfParams {
    /// Parse and validate the 4-byte wire block `03 01 hash cipher`.
    ///
    /// The stored block is revalidated on every use; a key that carries
    /// anything else is rejected before any derivation happens.
    pub fn from_wire(block: &[u8]) -> Result<Self> {
        if block.len() != 4 || block[0] != KDF_PARAMS_LEN || block[1] != KDF_PARAMS_VERSION {
            return Err(Error::BadPublicKey {
                context: "malformed KDF parameter block",
            });
        }
        let hash = HashAlgorithm::from_id(block[2]).ok_or(Error::BadPublicKey {
            context: "unsupported KDF hash algorithm",
        })?;
        let cipher = CipherAlgorithm::from_id(block[3]).ok_or(Error::BadPublicKey {
            context: "unsupported KEK cipher algorithm",
        })?;
        Ok(Self { hash, cipher })
    }

    /// Serialize to the 4-byte wire block.
    pub fn to_wire(self) -> [u8; 4] {
        [
            KDF_PARAMS_LEN,
            KDF_PARAMS_VERSION,
            self.hash.id(),
            self.cipher.id(),
        ]
    }
}

/// Default KEK parameters, sorted by ascending field size.
///
/// 528 is 521 rounded up to the octet boundary.
const KEK_PARAMS_TABLE: [(u32, HashAlgorithm, CipherAlgorithm); 3] = [
    (256, HashAlgorithm::Sha256, CipherAlgorithm::Aes128),
    (384, HashAlgorithm::Sha384, CipherAlgorithm::Aes256),
    (528, HashAlgorithm::Sha512, CipherAlgorithm::Aes256),
];

/// Pick the default KDF parameters for a curve of `field_bits` bits.
///
/// The first table entry at least as strong as the request wins; requests
/// beyond the table saturate at the strongest entry. Interoperability, not
/// performance, is what matters here.
pub fn default_kek_params(field_bits: u32) -> KdfParams {
    for &(qbits, hash, cipher) in &KEK_PARAMS_TABLE {
        if qbits >= field_bits {
            return KdfParams { hash, cipher };
        }
    }
    let (_, hash, cipher) = KEK_PARAMS_TABLE[KEK_PARAMS_TABLE.len() - 1];
    KdfParams { hash, cipher }
}
