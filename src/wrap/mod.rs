//! Session-key wrapping
//!
//! The derived KEK keys an RFC 3394 AES key wrap: deterministic, no IV,
//! whole 8-octet blocks only, and 8 octets of integrity overhead. On the
//! wire the wrapped key is framed as a one-octet length prefix followed by
//! the wrap output, the whole thing carried as an MPI.

use aes::{Aes128, Aes192, Aes256};
use aes_kw::Kek;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};
use crate::mpi::Mpi;
use crate::params::CipherAlgorithm;

/// Integrity overhead the wrap cipher adds.
const WRAP_OVERHEAD: usize = 8;

/// Block granularity the wrap cipher requires of its input.
const WRAP_BLOCK: usize = 8;

fn wrap_raw(kek: &[u8], cipher: CipherAlgorithm, data: &[u8], out: &mut [u8]) -> Result<()> {
    let res = match cipher {
        CipherAlgorithm::Aes128 => {
            let mut key = [0u8; 16];
            key.copy_from_slice(kek);
            let res = Kek::<Aes128>::from(key).wrap(data, out);
            key.zeroize();
            res
        }
        CipherAlgorithm::Aes192 => {
            let mut key = [0u8; 24];
            key.copy_from_slice(kek);
            let res = Kek::<Aes192>::from(key).wrap(data, out);
            key.zeroize();
            res
        }
        CipherAlgorithm::Aes256 => {
            let mut key = [0u8; 32];
            key.copy_from_slice(kek);
            let res = Kek::<Aes256>::from(key).wrap(data, out);
            key.zeroize();
            res
        }
    };
    res.map_err(|_| Error::Cipher {
        context: "key wrap rejected the input",
    })
}

fn unwrap_raw(kek: &[u8], cipher: CipherAlgorithm, data: &[u8], out: &mut [u8]) -> Result<()> {
    let res = match cipher {
        CipherAlgorithm::Aes128 => {
            let mut key = [0u8; 16];
            key.copy_from_slice(kek);
            let res = Kek::<Aes128>::from(key).unwrap(data, out);
            key.zeroize();
            res
        }
        CipherAlgorithm::Aes192 => {
            let mut key = [0u8; 24];
            key.copy_from_slice(kek);
            let res = Kek::<Aes192>::from(key).unwrap(data, out);
            key.zeroize();
            res
        }
        CipherAlgorithm::Aes256 => {
            let mut key = [0u8; 32];
            key.copy_from_slice(kek);
            let res = Kek::<Aes256>::from(key).unwrap(data, out);
            key.zeroize();
            res
        }
    };
    res.map_err(|_| Error::Cipher {
        context: "key unwrap failed its integrity check",
    })
}

/// Wrap a session key under the derived KEK.
///
/// The plaintext is the session key's big-endian encoding, which must be
/// a non-empty multiple of 8 octets (the caller's checksum-and-padding
/// frame guarantees this for OpenPGP session keys). The result is
/// `[len + 8] ‖ wrap(plaintext)` re-encoded as an MPI.
pub fn wrap_session_key(kek: &[u8], cipher: CipherAlgorithm, session_key: &Mpi) -> Result<Mpi> {
    if kek.len() != cipher.key_len() {
        return Err(Error::Cipher {
            context: "KEK length does not match the wrap cipher",
        });
    }

    let data = session_key.as_bytes();
    if data.is_empty() || data.len() % WRAP_BLOCK != 0 {
        return Err(Error::Cipher {
            context: "wrap input is not a whole number of 8-octet blocks",
        });
    }
    if data.len() + WRAP_OVERHEAD > u8::MAX as usize {
        return Err(Error::InconsistentSize {
            context: "wrapped key would not fit the one-octet length prefix",
        });
    }

    let mut frame = Zeroizing::new(vec![0u8; 1 + data.len() + WRAP_OVERHEAD]);
    frame[0] = (data.len() + WRAP_OVERHEAD) as u8;
    wrap_raw(kek, cipher, data, &mut frame[1..])?;
    Ok(Mpi::from_bytes(&frame))
}

/// Unwrap a container produced by [`wrap_session_key`].
///
/// The container is self-describing: its first octet must announce the
/// remaining length exactly. The returned value is the caller's original
/// session-key frame; validating any trailing padding octets (the
/// padding-count rule of the OpenPGP frame) is the caller's
/// responsibility, as it is in the packet layer this serves.
pub fn unwrap_session_key(kek: &[u8], cipher: CipherAlgorithm, wrapped: &Mpi) -> Result<Mpi> {
    if kek.len() != cipher.key_len() {
        return Err(Error::Cipher {
            context: "KEK length does not match the wrap cipher",
        });
    }

    let buf = wrapped.as_bytes();
    let total = buf.len();
    if total % WRAP_BLOCK != 1 || total < 1 + 2 * WRAP_BLOCK {
        return Err(Error::InconsistentSize {
            context: "wrapped container is not one length octet plus whole blocks",
        });
    }
    if buf[0] as usize != total - 1 {
        return Err(Error::InconsistentSize {
            context: "length prefix does not match the container size",
        });
    }

    let mut out = Zeroizing::new(vec![0u8; total - 1 - WRAP_OVERHEAD]);
    unwrap_raw(kek, cipher, &buf[1..], &mut out)?;
    Ok(Mpi::from_bytes(&out))
}
