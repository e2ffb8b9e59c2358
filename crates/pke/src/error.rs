//! Error handling for PKE operations.

use core::fmt;

#[cfg(feature = "std")]
use alloc::string::ToString;

use round2_api::error::Error as CoreError;
use round2_kem::error::Error as KemError;

/// Error type for PKE operations.
#[derive(Debug, Clone)]
pub enum Error {
    Api(CoreError),
    InvalidCiphertextFormat(&'static str),
    EncryptionFailed(&'static str),
    DecryptionFailed(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Api(e) => write!(f, "PKE API error: {}", e),
            Error::InvalidCiphertextFormat(reason) => {
                write!(f, "Invalid PKE ciphertext format: {}", reason)
            }
            Error::EncryptionFailed(reason) => write!(f, "PKE encryption failed: {}", reason),
            Error::DecryptionFailed(reason) => write!(f, "PKE decryption failed: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        Error::Api(err)
    }
}

impl From<KemError> for Error {
    fn from(err: KemError) -> Self {
        Error::Api(err.into())
    }
}

// Conversion from PKE Error to API Error
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Api(e) => e,
            Error::InvalidCiphertextFormat(reason) => CoreError::InvalidCiphertext {
                context: "Round2 PKE",
                #[cfg(feature = "std")]
                message: reason.to_string(),
            },
            Error::EncryptionFailed(reason) => CoreError::Other {
                context: "Round2 PKE encryption",
                #[cfg(feature = "std")]
                message: reason.to_string(),
            },
            Error::DecryptionFailed(reason) => CoreError::DecryptionFailed {
                context: "Round2 PKE decryption",
                #[cfg(feature = "std")]
                message: reason.to_string(),
            },
        }
    }
}

/// Result type for PKE operations.
pub type Result<T> = core::result::Result<T, Error>;
