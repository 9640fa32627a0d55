//! Opaque multi-precision integer carrier
//!
//! The wire values this crate moves around (curve points, wrapped session
//! keys, the session key itself) are size+bytes big-endian integers. Only
//! the container is provided here; no arithmetic is performed on the
//! values.

use core::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Unsigned big-endian integer value, stored without leading zero octets.
///
/// Values may carry secret material (the session key travels as one), so
/// the backing buffer is wiped on drop and equality is constant-time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Mpi {
    bytes: Vec<u8>,
}

impl Mpi {
    /// Build a value from big-endian bytes, stripping leading zero octets.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        Self {
            bytes: bytes[start..].to_vec(),
        }
    }

    /// Number of octets in the shortest big-endian encoding.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the value is zero.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bit length of the value.
    pub fn nbits(&self) -> usize {
        match self.bytes.first() {
            Some(&b) => (self.bytes.len() - 1) * 8 + (8 - b.leading_zeros() as usize),
            None => 0,
        }
    }

    /// The shortest big-endian encoding of the value.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq for Mpi {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.bytes.ct_eq(&other.bytes))
    }
}

impl Eq for Mpi {}

impl fmt::Debug for Mpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mpi(<{} bits>)", self.nbits())
    }
}
