//! End-to-end encrypt/decrypt flows over the bundled NIST engine.

#![cfg(feature = "nist-curves")]

use openpgp_ecdh::{
    default_kek_params, ecdh, CipherAlgorithm, CurveParameters, EcEngine, EcdhPublicKey, Error,
    HashAlgorithm, Mpi, NistEngine,
};
use rand::rngs::OsRng;
use rand::RngCore;

/// Recipient key material: a static scalar and the matching public key
/// carrying the curve's default KDF parameters.
fn make_recipient(curve: CurveParameters) -> (Vec<u8>, EcdhPublicKey) {
    let engine = NistEngine;
    let mut scalar = vec![0u8; curve.field_bytes()];
    OsRng.fill_bytes(&mut scalar);
    scalar[0] = 0; // stay below the group order
    scalar[1] |= 1;

    let point = engine.base_mult(&curve, &scalar).unwrap();
    let kdf_params = default_kek_params(curve.field_bits()).to_wire().to_vec();
    (
        scalar,
        EcdhPublicKey {
            curve,
            point,
            kdf_params,
        },
    )
}

fn session_key_16() -> Mpi {
    Mpi::from_bytes(&[
        0x07, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ])
}

fn round_trip_on(curve: CurveParameters, session_key: &Mpi) {
    let engine = NistEngine;
    let (scalar, recipient) = make_recipient(curve.clone());
    let fingerprint = [0x5A; 20];

    let ct = ecdh::encrypt(&engine, &mut OsRng, &recipient, &fingerprint, session_key).unwrap();

    // Ephemeral point is a fresh uncompressed SEC1 point on the wire.
    assert_eq!(ct.ephemeral_point.as_bytes()[0], 0x04);
    assert_eq!(ct.ephemeral_point.len(), 1 + 2 * curve.field_bytes());

    let shared = engine
        .scalar_mult(&curve, &scalar, &ct.ephemeral_point)
        .unwrap();
    let recovered = ecdh::decrypt(&shared, &fingerprint, Some(&ct.wrapped_key), &recipient).unwrap();
    assert_eq!(&recovered, session_key);
}

#[test]
fn p256_round_trip_has_expected_container_size() {
    let engine = NistEngine;
    let curve = CurveParameters::nist_p256();
    let (scalar, recipient) = make_recipient(curve.clone());
    let fingerprint = [0x5A; 20];

    let params = default_kek_params(curve.field_bits());
    assert_eq!(params.hash, HashAlgorithm::Sha256);
    assert_eq!(params.cipher, CipherAlgorithm::Aes128);

    let session_key = session_key_16();
    let ct = ecdh::encrypt(&engine, &mut OsRng, &recipient, &fingerprint, &session_key).unwrap();

    // 16 key bytes + 8 wrap overhead + 1 length octet.
    assert_eq!(ct.wrapped_key.len(), 25);
    assert_eq!(ct.wrapped_key.as_bytes()[0], 24);

    let shared = engine
        .scalar_mult(&curve, &scalar, &ct.ephemeral_point)
        .unwrap();
    let recovered = ecdh::decrypt(&shared, &fingerprint, Some(&ct.wrapped_key), &recipient).unwrap();
    assert_eq!(recovered, session_key);
}

#[test]
fn all_supported_curves_round_trip() {
    let session_key = session_key_16();
    round_trip_on(CurveParameters::nist_p256(), &session_key);
    round_trip_on(CurveParameters::nist_p384(), &session_key);
    round_trip_on(CurveParameters::nist_p521(), &session_key);
}

#[test]
fn longer_session_keys_round_trip() {
    // 24- and 32-byte frames, the other two AES session-key sizes.
    let mut frame24 = vec![0x08];
    frame24.extend_from_slice(&[0x33; 23]);
    round_trip_on(CurveParameters::nist_p256(), &Mpi::from_bytes(&frame24));

    let mut frame32 = vec![0x09];
    frame32.extend_from_slice(&[0x44; 31]);
    round_trip_on(CurveParameters::nist_p384(), &Mpi::from_bytes(&frame32));
}

#[test]
fn ephemeral_keys_never_repeat() {
    let engine = NistEngine;
    let (_, recipient) = make_recipient(CurveParameters::nist_p256());
    let fingerprint = [0x5A; 20];
    let session_key = session_key_16();

    let ct1 = ecdh::encrypt(&engine, &mut OsRng, &recipient, &fingerprint, &session_key).unwrap();
    let ct2 = ecdh::encrypt(&engine, &mut OsRng, &recipient, &fingerprint, &session_key).unwrap();
    assert_ne!(ct1.ephemeral_point, ct2.ephemeral_point);
    assert_ne!(ct1.wrapped_key, ct2.wrapped_key);
}

#[test]
fn wrong_fingerprint_is_caught_by_the_unwrap() {
    let engine = NistEngine;
    let curve = CurveParameters::nist_p256();
    let (scalar, recipient) = make_recipient(curve.clone());
    let session_key = session_key_16();

    let ct = ecdh::encrypt(&engine, &mut OsRng, &recipient, &[0x5A; 20], &session_key).unwrap();
    let shared = engine
        .scalar_mult(&curve, &scalar, &ct.ephemeral_point)
        .unwrap();

    let err = ecdh::decrypt(&shared, &[0x5B; 20], Some(&ct.wrapped_key), &recipient).unwrap_err();
    assert!(matches!(err, Error::Cipher { .. }));
}

#[test]
fn tampered_wrapped_key_is_caught() {
    let engine = NistEngine;
    let curve = CurveParameters::nist_p256();
    let (scalar, recipient) = make_recipient(curve.clone());
    let fingerprint = [0x5A; 20];
    let session_key = session_key_16();

    let ct = ecdh::encrypt(&engine, &mut OsRng, &recipient, &fingerprint, &session_key).unwrap();
    let shared = engine
        .scalar_mult(&curve, &scalar, &ct.ephemeral_point)
        .unwrap();

    let mut bytes = ct.wrapped_key.as_bytes().to_vec();
    bytes[10] ^= 0x80;
    let tampered = Mpi::from_bytes(&bytes);
    let err = ecdh::decrypt(&shared, &fingerprint, Some(&tampered), &recipient).unwrap_err();
    assert!(matches!(err, Error::Cipher { .. }));
}
