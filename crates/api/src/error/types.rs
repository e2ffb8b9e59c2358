//! Error type definitions for Round2 operations

/// Primary error type for Round2 operations
///
/// Every variant carries a static context string naming the operation that
/// failed. With `std` enabled, most variants also carry a free-form message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter set or argument rejected during validation
    InvalidParameter {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// A buffer could not be reserved
    AllocationFailure {
        context: &'static str,
        requested: usize,
    },

    /// Decryption or authentication failed
    DecryptionFailed {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// The system randomness source could not be used
    RandomGenerationError {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Invalid length error with context
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid key error
    InvalidKey {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Invalid ciphertext error
    InvalidCiphertext {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Serialization error
    SerializationError {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Other error
    Other {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },
}

/// Result type for Round2 operations
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(feature = "std")]
fn write_with_message(
    f: &mut core::fmt::Formatter<'_>,
    kind: &str,
    context: &str,
    message: &str,
) -> core::fmt::Result {
    if message.is_empty() {
        write!(f, "{}: {}", kind, context)
    } else {
        write!(f, "{}: {}: {}", kind, context, message)
    }
}

impl core::fmt::Display for Error {
    #[cfg(feature = "std")]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidParameter { context, message } => {
                write_with_message(f, "Invalid parameter", context, message)
            }
            Self::AllocationFailure { context, requested } => {
                write!(f, "Allocation failure: {} ({} elements)", context, requested)
            }
            Self::DecryptionFailed { context, message } => {
                write_with_message(f, "Decryption failed", context, message)
            }
            Self::RandomGenerationError { context, message } => {
                write_with_message(f, "Random generation error", context, message)
            }
            Self::InvalidLength { context, expected, actual } => {
                write!(f, "{}: invalid length (expected {}, got {})", context, expected, actual)
            }
            Self::InvalidKey { context, message } => {
                write_with_message(f, "Invalid key", context, message)
            }
            Self::InvalidCiphertext { context, message } => {
                write_with_message(f, "Invalid ciphertext", context, message)
            }
            Self::SerializationError { context, message } => {
                write_with_message(f, "Serialization error", context, message)
            }
            Self::Other { context, message } => write_with_message(f, "Error", context, message),
        }
    }

    #[cfg(not(feature = "std"))]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidParameter { context } => write!(f, "Invalid parameter: {}", context),
            Self::AllocationFailure { context, requested } => {
                write!(f, "Allocation failure: {} ({} elements)", context, requested)
            }
            Self::DecryptionFailed { context } => write!(f, "Decryption failed: {}", context),
            Self::RandomGenerationError { context } => {
                write!(f, "Random generation error: {}", context)
            }
            Self::InvalidLength { context, expected, actual } => {
                write!(f, "{}: invalid length (expected {}, got {})", context, expected, actual)
            }
            Self::InvalidKey { context } => write!(f, "Invalid key: {}", context),
            Self::InvalidCiphertext { context } => write!(f, "Invalid ciphertext: {}", context),
            Self::SerializationError { context } => write!(f, "Serialization error: {}", context),
            Self::Other { context } => write!(f, "Error: {}", context),
        }
    }
}
