//! OpenPGP-style ECDH public-key encryption of symmetric session keys.
//!
//! This crate implements the hybrid construction used by OpenPGP's ECDH
//! mechanism (RFC 6637, following FIPS SP 800-56A): an ephemeral
//! Diffie-Hellman agreement yields a shared point whose x coordinate is fed
//! through a one-round concatenation KDF to derive a key-encryption key
//! (KEK); the KEK then wraps the actual session key with RFC 3394 AES key
//! wrap.
//!
//! Elliptic-curve arithmetic is delegated through the [`EcEngine`] trait.
//! A backend for the NIST P-256/P-384/P-521 curves ships behind the default
//! `nist-curves` feature as [`NistEngine`].
//!
//! # Example
//!
//! ```
//! use openpgp_ecdh::{default_kek_params, ecdh, CurveParameters, EcEngine};
//! use openpgp_ecdh::{EcdhPublicKey, Mpi, NistEngine};
//! use rand::rngs::OsRng;
//!
//! # fn main() -> openpgp_ecdh::Result<()> {
//! let engine = NistEngine;
//! let curve = CurveParameters::nist_p256();
//!
//! // Recipient key material (normally parsed from a certificate).
//! let recipient_scalar = [0x42u8; 32];
//! let recipient_point = engine.base_mult(&curve, &recipient_scalar)?;
//! let recipient = EcdhPublicKey {
//!     curve: curve.clone(),
//!     point: recipient_point,
//!     kdf_params: default_kek_params(curve.field_bits()).to_wire().to_vec(),
//! };
//! let fingerprint = [0xAA; 20];
//!
//! // Sender wraps a 16-byte session key.
//! let session_key = Mpi::from_bytes(&[0x07; 16]);
//! let ciphertext = ecdh::encrypt(&engine, &mut OsRng, &recipient, &fingerprint, &session_key)?;
//!
//! // Recipient recomputes the shared point and unwraps.
//! let shared = engine.scalar_mult(&curve, &recipient_scalar, &ciphertext.ephemeral_point)?;
//! let recovered = ecdh::decrypt(&shared, &fingerprint, Some(&ciphertext.wrapped_key), &recipient)?;
//! assert_eq!(recovered, session_key);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ecdh;
pub mod error;
pub mod kdf;
pub mod mpi;
pub mod params;
pub mod wrap;

#[cfg(feature = "nist-curves")]
pub mod engines;

pub use ecdh::{CurveParameters, EcEngine, EcdhCiphertext, EcdhPublicKey, Fingerprint};
pub use error::{Error, Result};
pub use mpi::Mpi;
pub use params::{default_kek_params, CipherAlgorithm, HashAlgorithm, KdfParams};

#[cfg(feature = "nist-curves")]
pub use engines::NistEngine;
