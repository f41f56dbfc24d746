// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Read and write handles bound to one backend object.

use crate::backend::{ObjectBackend, ObjectReader};
use crate::error::{Error, Result};
use crate::synth::DirEntry;
use bytes::Bytes;
use futures::future::BoxFuture;
use pin_project::pin_project;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

/// An open object, read front to back.
#[pin_project]
pub struct FileReader {
    key: String,
    #[pin]
    inner: ObjectReader,
}

impl FileReader {
    pub(crate) fn new(key: String, inner: ObjectReader) -> Self {
        Self { key, inner }
    }

    /// Backend key this handle reads from.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Directory reads are not available on an open file.
    pub fn read_dir(&mut self, _n: usize) -> Result<Vec<DirEntry>> {
        Err(Error::Unsupported("read_dir on an open file"))
    }

    /// Release the backend stream.
    pub fn close(self) -> Result<()> {
        diagnostics::debug!("closed reader for {key}", key: self.key);
        Ok(())
    }
}

impl std::fmt::Debug for FileReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileReader").field("key", &self.key).finish()
    }
}

impl AsyncRead for FileReader {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        self.project().inner.poll_read(cx, buf)
    }
}

enum WriteState {
    Buffering(Vec<u8>),
    Committing(BoxFuture<'static, object_store::Result<()>>),
    Closed,
}

/// A fresh object being written.
///
/// Bytes are held locally and stored with a single put when the writer is
/// closed, through [`FileWriter::close`] or `AsyncWriteExt::shutdown`. Until
/// then readers still see the previous object, if any. Dropping the writer
/// without closing it discards everything written.
pub struct FileWriter {
    key: String,
    backend: Arc<dyn ObjectBackend>,
    state: WriteState,
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("key", &self.key)
            .field("pending", &self.pending())
            .finish()
    }
}

impl FileWriter {
    pub(crate) fn new(key: String, backend: Arc<dyn ObjectBackend>) -> Self {
        Self {
            key,
            backend,
            state: WriteState::Buffering(Vec::new()),
        }
    }

    /// Backend key this handle writes to.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of bytes written and not yet stored.
    #[must_use]
    pub fn pending(&self) -> usize {
        match &self.state {
            WriteState::Buffering(buffer) => buffer.len(),
            WriteState::Committing(_) | WriteState::Closed => 0,
        }
    }

    /// Store the written bytes, replacing the object.
    ///
    /// Backend failures are returned as [`Error::Backend`], and the object
    /// previously stored under the key is left as it was.
    pub async fn close(mut self) -> Result<()> {
        let put = match std::mem::replace(&mut self.state, WriteState::Closed) {
            WriteState::Buffering(buffer) => self.put_future(buffer),
            WriteState::Committing(put) => put,
            WriteState::Closed => return Ok(()),
        };
        put.await?;
        diagnostics::debug!("closed writer for {key}", key: self.key);
        Ok(())
    }

    fn put_future(&self, buffer: Vec<u8>) -> BoxFuture<'static, object_store::Result<()>> {
        let backend = self.backend.clone();
        let key = self.key.clone();
        Box::pin(async move { backend.put_object(&key, Bytes::from(buffer)).await })
    }
}

impl AsyncWrite for FileWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match &mut self.get_mut().state {
            WriteState::Buffering(buffer) => {
                buffer.extend_from_slice(buf);
                Poll::Ready(Ok(buf.len()))
            }
            WriteState::Committing(_) | WriteState::Closed => Poll::Ready(Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "write after close",
            ))),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        loop {
            match &mut this.state {
                WriteState::Buffering(buffer) => {
                    let buffer = std::mem::take(buffer);
                    this.state = WriteState::Committing(this.put_future(buffer));
                }
                WriteState::Committing(put) => {
                    let result = ready!(put.as_mut().poll(cx));
                    this.state = WriteState::Closed;
                    return Poll::Ready(result.map_err(io::Error::other));
                }
                WriteState::Closed => return Poll::Ready(Ok(())),
            }
        }
    }
}

impl Drop for FileWriter {
    fn drop(&mut self) {
        if let WriteState::Buffering(buffer) = &self.state {
            diagnostics::warn!(
                "writer for {key} dropped without close, discarding {size} bytes",
                key: self.key,
                size: buffer.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ObjectStoreBackend;
    use crate::testing::MemoryBackend;
    use object_store::memory::InMemory;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn store() -> Arc<dyn ObjectBackend> {
        Arc::new(ObjectStoreBackend::new(Arc::new(InMemory::new())))
    }

    async fn read(backend: &Arc<dyn ObjectBackend>, key: &str) -> object_store::Result<Vec<u8>> {
        let mut reader = backend.get_object(key).await?;
        let mut content = Vec::new();
        _ = reader.read_to_end(&mut content).await.map_err(|e| object_store::Error::Generic {
            store: "test",
            source: Box::new(e),
        })?;
        Ok(content)
    }

    #[tokio::test]
    async fn test_nothing_visible_until_shutdown() {
        let backend = store();
        let mut writer = FileWriter::new("a.txt".to_string(), backend.clone());
        writer.write_all(b"partial").await.unwrap();
        writer.flush().await.unwrap();
        assert_eq!(writer.pending(), 7);
        assert!(matches!(
            read(&backend, "a.txt").await,
            Err(object_store::Error::NotFound { .. })
        ));

        writer.shutdown().await.unwrap();
        assert_eq!(read(&backend, "a.txt").await.unwrap(), b"partial");
    }

    #[tokio::test]
    async fn test_close_stores_content() {
        let backend = store();
        let mut writer = FileWriter::new("b.txt".to_string(), backend.clone());
        writer.write_all(b"closed").await.unwrap();
        writer.close().await.unwrap();
        assert_eq!(read(&backend, "b.txt").await.unwrap(), b"closed");
    }

    #[tokio::test]
    async fn test_write_after_shutdown_fails() {
        let backend = store();
        let mut writer = FileWriter::new("c.txt".to_string(), backend);
        writer.shutdown().await.unwrap();
        let err = writer.write_all(b"late").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        // A second shutdown is a no-op.
        writer.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_drop_without_close_discards() {
        let backend = store();
        {
            let mut writer = FileWriter::new("d.txt".to_string(), backend.clone());
            writer.write_all(b"lost").await.unwrap();
        }
        assert!(matches!(
            read(&backend, "d.txt").await,
            Err(object_store::Error::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_rejected_put_surfaces_backend_error() {
        let memory = Arc::new(MemoryBackend::new());
        memory.insert("e.txt", "before");
        memory.fail_puts(true);
        let backend: Arc<dyn ObjectBackend> = memory.clone();

        let mut writer = FileWriter::new("e.txt".to_string(), backend);
        writer.write_all(b"after").await.unwrap();
        let err = writer.close().await.unwrap_err();
        assert!(matches!(err, Error::Backend(object_store::Error::Generic { .. })));
        assert_eq!(memory.get("e.txt"), Some(Bytes::from_static(b"before")));
    }

    #[tokio::test]
    async fn test_reader_read_dir_is_unsupported() {
        let backend = store();
        backend.put_object("f.txt", Bytes::from_static(b"x")).await.unwrap();
        let mut reader = FileReader::new("f.txt".to_string(), backend.get_object("f.txt").await.unwrap());
        assert!(matches!(reader.read_dir(10), Err(Error::Unsupported(_))));

        let mut content = String::new();
        _ = reader.read_to_string(&mut content).await.unwrap();
        assert_eq!(content, "x");
        assert_eq!(reader.key(), "f.txt");
        reader.close().unwrap();
    }
}
