//! Error handling for ECDH session-key operations

use core::fmt;

/// Error type for ECDH key derivation and wrapping
///
/// All variants describe bad input or a failed primitive; internal
/// invariant violations (states unreachable after validation) abort via
/// assertion instead of surfacing here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The recipient key carries a malformed or unsupported KDF
    /// parameter block
    BadPublicKey {
        /// What was wrong with the key
        context: &'static str,
    },

    /// A point encoding was shorter than the curve requires or not a
    /// valid curve point
    MalformedPoint {
        /// Which decoding step rejected the point
        context: &'static str,
    },

    /// The serialized KDF context outgrew its fixed bound
    ContextTooLarge {
        /// Size the context would have needed
        size: usize,
        /// The enforced cap
        max: usize,
    },

    /// A wrapped container's self-describing length did not match its
    /// actual size
    InconsistentSize {
        /// Which size check failed
        context: &'static str,
    },

    /// An integer value was malformed or absent where one is required
    BadMpi {
        /// Which value was rejected
        context: &'static str,
    },

    /// The wrap cipher rejected its input or its integrity check failed
    Cipher {
        /// Which cipher step failed
        context: &'static str,
    },

    /// The digest engine failed
    Digest {
        /// Which digest step failed
        context: &'static str,
    },
}

/// Result type for ECDH session-key operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadPublicKey { context } => {
                write!(f, "bad public key: {}", context)
            }
            Error::MalformedPoint { context } => {
                write!(f, "malformed point: {}", context)
            }
            Error::ContextTooLarge { size, max } => {
                write!(f, "KDF context of {} bytes exceeds the {} byte bound", size, max)
            }
            Error::InconsistentSize { context } => {
                write!(f, "inconsistent size: {}", context)
            }
            Error::BadMpi { context } => {
                write!(f, "bad MPI: {}", context)
            }
            Error::Cipher { context } => {
                write!(f, "cipher failure: {}", context)
            }
            Error::Digest { context } => {
                write!(f, "digest failure: {}", context)
            }
        }
    }
}

impl std::error::Error for Error {}
