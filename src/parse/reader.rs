use std::borrow::Cow;
use std::io::Error as IoError;

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
use std::io::Read;

#[cfg(feature = "async_tokio")]
use tokio::io::{AsyncRead, AsyncReadExt};

#[cfg(feature = "async_std")]
use async_std::io::{Read, ReadExt};

/// Drains a source into a byte buffer before the line parser runs.
pub(crate) struct FileReader<R> {
    buf: Vec<u8>,
    inner: R,
}

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
impl<R: Read> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: src,
            buf: Vec::with_capacity(4096),
        }
    }

    pub(crate) fn read_all(&mut self) -> Result<usize, IoError> {
        self.inner.read_to_end(&mut self.buf)
    }
}

#[cfg(feature = "async_tokio")]
impl<R: AsyncRead + Unpin> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: src,
            buf: Vec::with_capacity(4096),
        }
    }

    pub(crate) async fn read_all(&mut self) -> Result<usize, IoError> {
        self.inner.read_to_end(&mut self.buf).await
    }
}

#[cfg(feature = "async_std")]
impl<R: Read + Unpin> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: src,
            buf: Vec::with_capacity(4096),
        }
    }

    pub(crate) async fn read_all(&mut self) -> Result<usize, IoError> {
        self.inner.read_to_end(&mut self.buf).await
    }
}

impl<R> FileReader<R> {
    /// The content read so far with invalid UTF-8 replaced.
    pub(crate) fn content(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buf)
    }
}
