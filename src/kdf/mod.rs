//! KEK derivation
//!
//! Three steps sit between the raw ECDH shared point and the wrap cipher:
//! normalization of the shared point into a field-sized secret, the
//! serialized "OtherInfo" context binding curve, algorithm choice and
//! recipient identity, and the one-round SP 800-56A concatenation KDF.
//!
//! Encrypt and decrypt rebuild the context independently; any divergence
//! in their inputs yields a different KEK and the unwrap integrity check
//! fails downstream.

use sha2::{Digest, Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::ecdh::{CurveParameters, Fingerprint};
use crate::error::{Error, Result};
use crate::mpi::Mpi;
use crate::params::{HashAlgorithm, KdfParams};

/// Fixed sender tag in the OtherInfo buffer, exactly these 20 octets.
const ANONYMOUS_SENDER: &[u8; 20] = b"Anonymous Sender    ";

/// OpenPGP public-key algorithm id for ECDH.
const PUBKEY_ALGO_ECDH: u8 = 18;

/// Cap on the serialized OtherInfo buffer.
const MAX_CONTEXT_SIZE: usize = 256;

/// KDF counter for the single derivation round. One round covers every
/// supported hash/cipher pairing, since no KEK is longer than one digest.
const KDF_COUNTER_ONE: [u8; 4] = [0, 0, 0, 1];

/// Extract the x coordinate of a shared point as a field-sized secret.
///
/// The raw point encoding carries one leading format octet ahead of the
/// x coordinate, so it must be strictly longer than the field; the x
/// coordinate is the next `field_bytes` octets.
pub fn normalize_shared_point(shared: &Mpi, field_bytes: usize) -> Result<Zeroizing<Vec<u8>>> {
    let raw = shared.as_bytes();
    if raw.len() <= field_bytes {
        return Err(Error::MalformedPoint {
            context: "shared point encoding no longer than the field size",
        });
    }
    let mut x = Zeroizing::new(vec![0u8; field_bytes]);
    x.copy_from_slice(&raw[1..1 + field_bytes]);
    Ok(x)
}

/// Serialize the KDF context ("OtherInfo").
///
/// Layout: `len(oid) ‖ oid ‖ 18 ‖ len(block) ‖ block ‖
/// "Anonymous Sender    " ‖ fingerprint`. Both sides of a message must
/// feed identical inputs here; the buffer never leaves the process.
pub fn build_kdf_context(
    curve: &CurveParameters,
    params: KdfParams,
    fingerprint: &Fingerprint,
) -> Result<Vec<u8>> {
    let block = params.to_wire();
    let size = 1 + curve.oid().len() + 1 + 1 + block.len() + ANONYMOUS_SENDER.len() + fingerprint.len();
    if size > MAX_CONTEXT_SIZE || curve.oid().len() > u8::MAX as usize {
        return Err(Error::ContextTooLarge {
            size,
            max: MAX_CONTEXT_SIZE,
        });
    }

    let mut buf = Vec::with_capacity(size);
    buf.push(curve.oid().len() as u8);
    buf.extend_from_slice(curve.oid());
    buf.push(PUBKEY_ALGO_ECDH);
    buf.push(block.len() as u8);
    buf.extend_from_slice(&block);
    buf.extend_from_slice(ANONYMOUS_SENDER);
    buf.extend_from_slice(fingerprint);
    Ok(buf)
}

/// Derive the key-encryption key.
///
/// `KEK = Hash(00 00 00 01 ‖ x ‖ context)` truncated to `key_len` octets.
/// `key_len` never exceeds the digest length once the KDF parameter block
/// has been validated; hitting that case anyway is a programming error,
/// not bad input.
pub fn derive_kek(
    hash: HashAlgorithm,
    secret_x: &[u8],
    context: &[u8],
    key_len: usize,
) -> Zeroizing<Vec<u8>> {
    assert!(
        key_len <= hash.digest_len(),
        "KEK length exceeds digest output"
    );

    let digest: Zeroizing<Vec<u8>> = Zeroizing::new(match hash {
        HashAlgorithm::Sha256 => Sha256::new()
            .chain_update(KDF_COUNTER_ONE)
            .chain_update(secret_x)
            .chain_update(context)
            .finalize()
            .to_vec(),
        HashAlgorithm::Sha384 => Sha384::new()
            .chain_update(KDF_COUNTER_ONE)
            .chain_update(secret_x)
            .chain_update(context)
            .finalize()
            .to_vec(),
        HashAlgorithm::Sha512 => Sha512::new()
            .chain_update(KDF_COUNTER_ONE)
            .chain_update(secret_x)
            .chain_update(context)
            .finalize()
            .to_vec(),
    });

    let mut kek = Zeroizing::new(vec![0u8; key_len]);
    kek.copy_from_slice(&digest[..key_len]);
    kek
}
