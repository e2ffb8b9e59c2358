//! Error handling for Round2 KEM operations

#[cfg(feature = "std")]
use alloc::string::ToString;

use core::fmt;
use round2_api::error::Error as CoreError;

/// Error type for KEM operations
#[derive(Debug)]
pub enum Error {
    /// Parameter set failed validation
    Parameter {
        context: &'static str,
        reason: &'static str,
    },

    /// A buffer could not be reserved
    Allocation {
        context: &'static str,
        requested: usize,
    },

    /// Input of the wrong length
    Length {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid key format
    InvalidKey {
        key_type: &'static str,
        reason: &'static str,
    },

    /// Invalid ciphertext format
    InvalidCiphertext {
        algorithm: &'static str,
        reason: &'static str,
    },

    /// Serialization/deserialization errors
    Serialization {
        context: &'static str,
        details: &'static str,
    },

    /// Sampling or key derivation could not produce output
    Derivation {
        context: &'static str,
        details: &'static str,
    },

    /// The system randomness source is unavailable
    Randomness {
        context: &'static str,
        details: &'static str,
    },

    /// I/O error (only when std is available)
    #[cfg(feature = "std")]
    Io(std::io::Error),
}

// Implement Clone manually since std::io::Error doesn't implement Clone
impl Clone for Error {
    fn clone(&self) -> Self {
        match self {
            Error::Parameter { context, reason } => Error::Parameter {
                context: *context,
                reason: *reason,
            },
            Error::Allocation { context, requested } => Error::Allocation {
                context: *context,
                requested: *requested,
            },
            Error::Length { context, expected, actual } => Error::Length {
                context: *context,
                expected: *expected,
                actual: *actual,
            },
            Error::InvalidKey { key_type, reason } => Error::InvalidKey {
                key_type: *key_type,
                reason: *reason,
            },
            Error::InvalidCiphertext { algorithm, reason } => Error::InvalidCiphertext {
                algorithm: *algorithm,
                reason: *reason,
            },
            Error::Serialization { context, details } => Error::Serialization {
                context: *context,
                details: *details,
            },
            Error::Derivation { context, details } => Error::Derivation {
                context: *context,
                details: *details,
            },
            Error::Randomness { context, details } => Error::Randomness {
                context: *context,
                details: *details,
            },
            #[cfg(feature = "std")]
            Error::Io(e) => Error::Io(std::io::Error::new(e.kind(), e.to_string())),
        }
    }
}

/// Result type for KEM operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { context, reason } => {
                write!(f, "Invalid parameters in {}: {}", context, reason)
            }
            Error::Allocation { context, requested } => {
                write!(f, "Allocation of {} elements failed in {}", requested, context)
            }
            Error::Length { context, expected, actual } => {
                write!(f, "{}: invalid length (expected {}, got {})", context, expected, actual)
            }
            Error::InvalidKey { key_type, reason } => {
                write!(f, "Invalid {} key: {}", key_type, reason)
            }
            Error::InvalidCiphertext { algorithm, reason } => {
                write!(f, "Invalid {} ciphertext: {}", algorithm, reason)
            }
            Error::Serialization { context, details } => {
                write!(f, "Serialization error in {}: {}", context, details)
            }
            Error::Derivation { context, details } => {
                write!(f, "Derivation error in {}: {}", context, details)
            }
            Error::Randomness { context, details } => {
                write!(f, "Randomness unavailable in {}: {}", context, details)
            }
            #[cfg(feature = "std")]
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

// Standard error trait
#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

// From std::io::Error to Error (when std is available)
#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

// From Error to CoreError
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parameter { context, reason } => CoreError::InvalidParameter {
                context,
                #[cfg(feature = "std")]
                message: reason.to_string(),
            },
            Error::Allocation { context, requested } => {
                CoreError::AllocationFailure { context, requested }
            }
            Error::Length { context, expected, actual } => CoreError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::InvalidKey { key_type, reason } => CoreError::InvalidKey {
                context: key_type,
                #[cfg(feature = "std")]
                message: reason.to_string(),
            },
            Error::InvalidCiphertext { algorithm, reason } => CoreError::InvalidCiphertext {
                context: algorithm,
                #[cfg(feature = "std")]
                message: reason.to_string(),
            },
            Error::Serialization { context, details } => CoreError::SerializationError {
                context,
                #[cfg(feature = "std")]
                message: details.to_string(),
            },
            Error::Derivation { context, details } => CoreError::Other {
                context,
                #[cfg(feature = "std")]
                message: details.to_string(),
            },
            Error::Randomness { context, details } => CoreError::RandomGenerationError {
                context,
                #[cfg(feature = "std")]
                message: details.to_string(),
            },
            #[cfg(feature = "std")]
            Error::Io(e) => CoreError::RandomGenerationError {
                context: "system randomness",
                message: e.to_string(),
            },
        }
    }
}

// Include validation submodule
pub mod validate;
