//! System randomness.
//!
//! `SystemRandom` is a handle to the process-wide OS entropy source. On Unix
//! the source is `/dev/urandom`, opened lazily on first use and shared by
//! every handle afterwards; elsewhere it delegates to `rand::rngs::OsRng`.
//! All operations accept any `RngCore + CryptoRng`, so this type is only one
//! possible source; tests use seeded ChaCha generators instead.

use rand::{CryptoRng, RngCore};

use crate::error::Result;

/// Largest single read from the entropy source.
pub const MAX_READ_CHUNK: usize = 1 << 20;

/// Attempts to open the entropy source before giving up.
pub const OPEN_ATTEMPTS: usize = 8;

/// Handle to the process-wide OS randomness source.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRandom {
    _private: (),
}

#[cfg(unix)]
mod source {
    use std::fs::File;
    use std::io::{ErrorKind, Read};
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    use super::{MAX_READ_CHUNK, OPEN_ATTEMPTS};
    use crate::error::{Error, Result};

    const URANDOM: &str = "/dev/urandom";

    static HANDLE: Mutex<Option<Arc<File>>> = Mutex::new(None);

    /// Open `path`, retrying transient failures up to `attempts` times.
    pub(super) fn open_with_retries(path: &Path, attempts: usize) -> Result<File> {
        for attempt in 0..attempts {
            match File::open(path) {
                Ok(file) => return Ok(file),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) if attempt + 1 < attempts => {
                    thread::sleep(Duration::from_millis(1 << attempt.min(6)));
                }
                Err(_) => break,
            }
        }
        Err(Error::Randomness {
            context: "SystemRandom",
            details: "could not open the entropy source",
        })
    }

    fn handle() -> Result<Arc<File>> {
        let mut guard = HANDLE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(file) = guard.as_ref() {
            return Ok(Arc::clone(file));
        }
        let file = Arc::new(open_with_retries(Path::new(URANDOM), OPEN_ATTEMPTS)?);
        *guard = Some(Arc::clone(&file));
        Ok(file)
    }

    pub(super) fn fill(dest: &mut [u8]) -> Result<()> {
        let file = handle()?;
        for chunk in dest.chunks_mut(MAX_READ_CHUNK) {
            read_full(&file, chunk)?;
        }
        Ok(())
    }

    fn read_full(mut reader: &File, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(Error::Randomness {
                        context: "SystemRandom",
                        details: "entropy source closed",
                    })
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
        Ok(())
    }
}

#[cfg(not(unix))]
mod source {
    use rand::rngs::OsRng;
    use rand::RngCore;

    use super::MAX_READ_CHUNK;
    use crate::error::{Error, Result};

    pub(super) fn fill(dest: &mut [u8]) -> Result<()> {
        for chunk in dest.chunks_mut(MAX_READ_CHUNK) {
            OsRng.try_fill_bytes(chunk).map_err(|_| Error::Randomness {
                context: "SystemRandom",
                details: "OsRng failed",
            })?;
        }
        Ok(())
    }
}

impl SystemRandom {
    /// The process-wide randomness source.
    pub fn global() -> Self {
        Self { _private: () }
    }

    /// Fill `dest` entirely with OS randomness.
    pub fn try_fill(&self, dest: &mut [u8]) -> Result<()> {
        source::fill(dest)
    }
}

impl RngCore for SystemRandom {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    /// # Panics
    ///
    /// Panics if the OS randomness source fails, like `rand::rngs::OsRng`.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.try_fill(dest) {
            panic!("SystemRandom: {}", e);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
        self.try_fill(dest).map_err(rand::Error::new)
    }
}

impl CryptoRng for SystemRandom {}
