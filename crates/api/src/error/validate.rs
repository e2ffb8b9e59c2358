//! Validation helpers shared by the Round2 crates

use super::types::{Error, Result};

/// Fail with `InvalidParameter` unless `condition` holds
pub fn parameter(condition: bool, context: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::InvalidParameter {
            context,
            #[cfg(feature = "std")]
            message: reason.into(),
        });
    }
    #[cfg(not(feature = "std"))]
    let _ = reason;
    Ok(())
}

/// Fail with `InvalidLength` unless `actual == expected`
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::InvalidLength {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}
