//! Lock-protected output destination shared by every logger of a hub

use parking_lot::Mutex;
use std::io::{self, Write};

/// Destination type accepted by [`SharedSink::set_output`]
pub type BoxedWriter = Box<dyn Write + Send>;

/// Serializes writes of whole records into one destination
///
/// Each [`write`](SharedSink::write) holds the lock for the complete
/// `write_all` + `flush`, so records from concurrent callers never
/// interleave. Swapping the destination takes the same lock: a write is
/// entirely on the old destination or entirely on the new one.
pub struct SharedSink {
    writer: Mutex<BoxedWriter>,
}

impl SharedSink {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::from_boxed(Box::new(writer))
    }

    pub fn from_boxed(writer: BoxedWriter) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Sink writing to the process's standard error
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Write `bytes` as one contiguous block
    ///
    /// Returns the number of bytes written, which is always `bytes.len()`
    /// on success. Once the bytes are accepted the record counts as written;
    /// a failing flush is only reported on stderr.
    pub fn write(&self, bytes: &[u8]) -> io::Result<usize> {
        let mut writer = self.writer.lock();
        writer.write_all(bytes)?;
        if let Err(e) = writer.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush output after write: {}", e);
        }
        Ok(bytes.len())
    }

    /// Replace the destination, returning the previous one
    ///
    /// The previous destination is flushed before it is handed back.
    pub fn set_output(&self, writer: BoxedWriter) -> BoxedWriter {
        let mut previous = std::mem::replace(&mut *self.writer.lock(), writer);
        if let Err(e) = previous.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush replaced output: {}", e);
        }
        previous
    }

    pub fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }
}

impl Default for SharedSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl std::fmt::Debug for SharedSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSink").finish_non_exhaustive()
    }
}
