//! Built-in elliptic-curve backend
//!
//! [`NistEngine`] implements [`EcEngine`] for the three curves the default
//! KEK parameter table covers, on top of the pure-Rust `p256`/`p384`/`p521`
//! crates. Points are validated on the way in: wrong encodings, off-curve
//! coordinates and the identity are all rejected before any arithmetic.

use crate::ecdh::{CurveParameters, EcEngine, OID_NIST_P256, OID_NIST_P384, OID_NIST_P521};
use crate::error::{Error, Result};
use crate::mpi::Mpi;

/// NIST P-256/P-384/P-521 engine. Curve dispatch is by OID.
#[derive(Debug, Default, Clone, Copy)]
pub struct NistEngine;

macro_rules! curve_backend {
    ($backend:ident, $curve:ident) => {
        mod $backend {
            use super::*;
            use $curve::elliptic_curve::group::Group;
            use $curve::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
            use $curve::{AffinePoint, EncodedPoint, ProjectivePoint, Scalar, SecretKey};

            pub(super) fn base_mult(scalar: &[u8]) -> Result<Mpi> {
                let k = decode_scalar(scalar)?;
                encode_point(ProjectivePoint::generator() * k)
            }

            pub(super) fn scalar_mult(scalar: &[u8], point: &Mpi) -> Result<Mpi> {
                let k = decode_scalar(scalar)?;
                let p = decode_point(point)?;
                encode_point(ProjectivePoint::from(p) * k)
            }

            fn decode_scalar(scalar: &[u8]) -> Result<Scalar> {
                let sk = SecretKey::from_slice(scalar).map_err(|_| Error::BadMpi {
                    context: "scalar out of range for the curve",
                })?;
                Ok(*sk.to_nonzero_scalar())
            }

            fn decode_point(point: &Mpi) -> Result<AffinePoint> {
                let encoded =
                    EncodedPoint::from_bytes(point.as_bytes()).map_err(|_| Error::MalformedPoint {
                        context: "point is not a valid SEC1 encoding for the curve",
                    })?;
                if encoded.is_identity() {
                    return Err(Error::BadPublicKey {
                        context: "point is the identity",
                    });
                }
                Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded)).ok_or(
                    Error::BadPublicKey {
                        context: "point is not on the curve",
                    },
                )
            }

            fn encode_point(point: ProjectivePoint) -> Result<Mpi> {
                if bool::from(point.is_identity()) {
                    return Err(Error::BadPublicKey {
                        context: "operation produced the identity point",
                    });
                }
                Ok(Mpi::from_bytes(
                    point.to_affine().to_encoded_point(false).as_bytes(),
                ))
            }
        }
    };
}

curve_backend!(nist_p256, p256);
curve_backend!(nist_p384, p384);
curve_backend!(nist_p521, p521);

impl EcEngine for NistEngine {
    fn base_mult(&self, curve: &CurveParameters, scalar: &[u8]) -> Result<Mpi> {
        match curve.oid() {
            oid if oid == OID_NIST_P256 => nist_p256::base_mult(scalar),
            oid if oid == OID_NIST_P384 => nist_p384::base_mult(scalar),
            oid if oid == OID_NIST_P521 => nist_p521::base_mult(scalar),
            _ => Err(Error::BadPublicKey {
                context: "no backend for this curve",
            }),
        }
    }

    fn scalar_mult(&self, curve: &CurveParameters, scalar: &[u8], point: &Mpi) -> Result<Mpi> {
        match curve.oid() {
            oid if oid == OID_NIST_P256 => nist_p256::scalar_mult(scalar, point),
            oid if oid == OID_NIST_P384 => nist_p384::scalar_mult(scalar, point),
            oid if oid == OID_NIST_P521 => nist_p521::scalar_mult(scalar, point),
            _ => Err(Error::BadPublicKey {
                context: "no backend for this curve",
            }),
        }
    }
}
