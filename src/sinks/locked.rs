//! Thread-safe wrapper for writers that are not safe to share

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Shares one writer between threads behind a mutex
///
/// Clones refer to the same writer, so one clone can be installed as the
/// logger output while another reads back what was written.
///
/// # Example
///
/// ```
/// use rust_context_logger::sinks::LockedWriter;
/// use std::io::Write;
///
/// let buffer = LockedWriter::new(Vec::new());
/// let mut handle = buffer.clone();
/// handle.write_all(b"line\n").unwrap();
/// assert_eq!(buffer.contents(), "line\n");
/// ```
#[derive(Debug, Default)]
pub struct LockedWriter<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> Clone for LockedWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W> LockedWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Run `f` with exclusive access to the wrapped writer
    pub fn with_inner<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl LockedWriter<Vec<u8>> {
    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    /// Written content split into lines, without terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    /// Take the written bytes, leaving the buffer empty
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.inner.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl<W: Write> Write for LockedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.lock().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let buffer = LockedWriter::new(Vec::new());
        let mut writer = buffer.clone();

        writer.write_all(b"a\nb\n").unwrap();
        assert_eq!(buffer.lines(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_take_empties() {
        let buffer = LockedWriter::new(Vec::new());
        buffer.clone().write_all(b"data").unwrap();

        assert_eq!(buffer.take(), b"data".to_vec());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_with_inner() {
        let buffer = LockedWriter::new(Vec::<u8>::new());
        buffer.with_inner(|v| v.extend_from_slice(b"xyz"));
        assert_eq!(buffer.with_inner(|v| v.len()), 3);
    }

    #[test]
    fn test_concurrent_write_all_stays_contiguous() {
        let buffer = LockedWriter::new(Vec::new());

        std::thread::scope(|s| {
            for t in 0..4_u8 {
                let mut writer = buffer.clone();
                s.spawn(move || {
                    let chunk = vec![b'a' + t; 256];
                    for _ in 0..50 {
                        writer.write_all(&chunk).unwrap();
                    }
                });
            }
        });

        let bytes = buffer.take();
        assert_eq!(bytes.len(), 4 * 50 * 256);
        for chunk in bytes.chunks(256) {
            assert!(chunk.iter().all(|b| *b == chunk[0]));
        }
    }
}
