//! ECDH session-key encryption and decryption
//!
//! The two public operations compose the whole pipeline: ephemeral key
//! generation and point arithmetic (through [`EcEngine`]), shared-secret
//! normalization, KDF context construction, KEK derivation and the final
//! key wrap. Decryption takes the already-computed shared point, since
//! multiplying the recipient's secret scalar into the sender's ephemeral
//! point is the key store's business, not ours.

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::kdf;
use crate::mpi::Mpi;
use crate::params::{CipherAlgorithm, KdfParams};
use crate::wrap;

/// Recipient key fingerprint bound into the KDF context.
pub type Fingerprint = [u8; 20];

/// RFC 6637 OID body for NIST P-256.
pub const OID_NIST_P256: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07];

/// RFC 6637 OID body for NIST P-384.
pub const OID_NIST_P384: &[u8] = &[0x2b, 0x81, 0x04, 0x00, 0x22];

/// RFC 6637 OID body for NIST P-521.
pub const OID_NIST_P521: &[u8] = &[0x2b, 0x81, 0x04, 0x00, 0x23];

/// Identity of the curve a key lives on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveParameters {
    oid: Vec<u8>,
    field_bits: u32,
}

impl CurveParameters {
    /// Build curve parameters from an OID body and the field size in bits.
    pub fn new(oid: &[u8], field_bits: u32) -> Self {
        Self {
            oid: oid.to_vec(),
            field_bits,
        }
    }

    /// NIST P-256.
    pub fn nist_p256() -> Self {
        Self::new(OID_NIST_P256, 256)
    }

    /// NIST P-384.
    pub fn nist_p384() -> Self {
        Self::new(OID_NIST_P384, 384)
    }

    /// NIST P-521.
    pub fn nist_p521() -> Self {
        Self::new(OID_NIST_P521, 521)
    }

    /// The curve's OID body as it appears on the wire.
    pub fn oid(&self) -> &[u8] {
        &self.oid
    }

    /// Field size in bits.
    pub fn field_bits(&self) -> u32 {
        self.field_bits
    }

    /// Field size rounded up to the octet boundary.
    pub fn field_bytes(&self) -> usize {
        (self.field_bits as usize + 7) / 8
    }
}

/// Elliptic-curve arithmetic the orchestrator delegates to.
///
/// Scalars are big-endian and exactly `curve.field_bytes()` octets long;
/// points travel as SEC1 uncompressed encodings carried in [`Mpi`] values,
/// which is what gives the shared-secret normalizer its leading format
/// octet to strip.
pub trait EcEngine {
    /// Multiply the curve generator by `scalar`.
    fn base_mult(&self, curve: &CurveParameters, scalar: &[u8]) -> Result<Mpi>;

    /// Multiply `point` by `scalar`.
    fn scalar_mult(&self, curve: &CurveParameters, scalar: &[u8], point: &Mpi) -> Result<Mpi>;
}

/// An ECDH public key as stored with a certificate: curve identity, public
/// point and the key's KDF parameter block (kept in wire form and
/// revalidated on every use).
#[derive(Debug, Clone)]
pub struct EcdhPublicKey {
    /// Curve the key lives on.
    pub curve: CurveParameters,
    /// Public point, SEC1 uncompressed.
    pub point: Mpi,
    /// Stored KDF parameter block, normally 4 bytes `03 01 hash cipher`.
    pub kdf_params: Vec<u8>,
}

/// Output of [`encrypt`]: the sender's ephemeral public point and the
/// wrapped session key. Both become part of the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcdhCiphertext {
    /// Ephemeral public point, SEC1 uncompressed.
    pub ephemeral_point: Mpi,
    /// Wrapped session key, framed as `[len] ‖ wrap output`.
    pub wrapped_key: Mpi,
}

/// Generate a fresh key-agreement scalar of `field_bits - 1` random bits.
///
/// One bit short of the field keeps the value clear of the group order
/// without rejection sampling. The buffer is field-sized and wiped on
/// drop.
fn generate_ephemeral_scalar<R: CryptoRng + RngCore>(
    rng: &mut R,
    curve: &CurveParameters,
) -> Zeroizing<Vec<u8>> {
    let nbytes = curve.field_bytes();
    let mut scalar = Zeroizing::new(vec![0u8; nbytes]);
    rng.fill_bytes(&mut scalar);

    let keep_bits = curve.field_bits() as usize - 1;
    let excess = nbytes * 8 - keep_bits;
    for b in scalar.iter_mut().take(excess / 8) {
        *b = 0;
    }
    if excess % 8 != 0 {
        scalar[excess / 8] &= 0xff >> (excess % 8);
    }
    scalar
}

/// Validate the key's KDF block, normalize the shared point and derive
/// the KEK. Common to both directions.
fn derive_wrap_key(
    shared: &Mpi,
    key: &EcdhPublicKey,
    fingerprint: &Fingerprint,
) -> Result<(Zeroizing<Vec<u8>>, CipherAlgorithm)> {
    let params = KdfParams::from_wire(&key.kdf_params)?;
    let secret_x = kdf::normalize_shared_point(shared, key.curve.field_bytes())?;
    let context = kdf::build_kdf_context(&key.curve, params, fingerprint)?;
    let kek = kdf::derive_kek(params.hash, &secret_x, &context, params.cipher.key_len());
    Ok((kek, params.cipher))
}

/// Encrypt a session key to `recipient`.
///
/// Generates an ephemeral keypair, derives the shared point against the
/// recipient's public point, runs the KDF with the recipient's stored
/// parameters and wraps `session_key`. The ephemeral scalar and every
/// intermediate secret are wiped before returning, on success and on
/// error alike.
pub fn encrypt<E: EcEngine, R: CryptoRng + RngCore>(
    engine: &E,
    rng: &mut R,
    recipient: &EcdhPublicKey,
    fingerprint: &Fingerprint,
    session_key: &Mpi,
) -> Result<EcdhCiphertext> {
    // Reject a bad parameter block before any curve work.
    KdfParams::from_wire(&recipient.kdf_params)?;

    let scalar = generate_ephemeral_scalar(rng, &recipient.curve);
    let ephemeral_point = engine.base_mult(&recipient.curve, &scalar)?;
    let shared = engine.scalar_mult(&recipient.curve, &scalar, &recipient.point)?;
    drop(scalar);

    let (kek, cipher) = derive_wrap_key(&shared, recipient, fingerprint)?;
    let wrapped_key = wrap::wrap_session_key(&kek, cipher, session_key)?;

    Ok(EcdhCiphertext {
        ephemeral_point,
        wrapped_key,
    })
}

/// Decrypt a wrapped session key.
///
/// `shared_point` is the recipient's secret scalar multiplied into the
/// sender's ephemeral point, computed by the caller. `key` supplies the
/// curve identity and KDF parameter block of the recipient key, which must
/// match what the sender used, as must `fingerprint`; a mismatch anywhere
/// yields a different KEK and the unwrap integrity check fails.
pub fn decrypt(
    shared_point: &Mpi,
    fingerprint: &Fingerprint,
    wrapped_key: Option<&Mpi>,
    key: &EcdhPublicKey,
) -> Result<Mpi> {
    let wrapped = wrapped_key.ok_or(Error::BadMpi {
        context: "missing wrapped session key",
    })?;
    let (kek, cipher) = derive_wrap_key(shared_point, key, fingerprint)?;
    wrap::unwrap_session_key(&kek, cipher, wrapped)
}
