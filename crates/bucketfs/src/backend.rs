// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Object store capability consumed by the filesystem.
//!
//! The filesystem needs three things from a store: write a whole object,
//! stream an object back, and list every key under a prefix. [`ObjectBackend`]
//! is that seam. [`ObjectStoreBackend`] implements it over any
//! [`object_store::ObjectStore`]; tests can supply their own.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use object_store::ObjectStore;
use object_store::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;

/// Reader over the bytes of a single object.
pub type ObjectReader = Pin<Box<dyn AsyncRead + Send>>;

/// Keys produced by a listing; errors may surface mid-stream.
pub type KeyStream<'a> = BoxStream<'a, object_store::Result<String>>;

#[async_trait]
pub trait ObjectBackend: Send + Sync {
    /// Replace the object at `key` with `content`.
    async fn put_object(&self, key: &str, content: Bytes) -> object_store::Result<()>;

    /// Open the object at `key` for reading.
    ///
    /// A missing object must fail with [`object_store::Error::NotFound`].
    async fn get_object(&self, key: &str) -> object_store::Result<ObjectReader>;

    /// Every key equal to `prefix` or lying under `prefix/`, in any order.
    ///
    /// Backends that match prefixes as plain strings may also return keys
    /// such as `prefixed`; callers must tolerate them.
    fn list_by_prefix<'a>(&'a self, prefix: &'a str) -> KeyStream<'a>;
}

/// [`ObjectBackend`] over an [`object_store::ObjectStore`] client.
#[derive(Debug, Clone)]
pub struct ObjectStoreBackend {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreBackend {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }
}

fn location(key: &str) -> object_store::Result<Path> {
    Path::parse(key).map_err(|source| object_store::Error::InvalidPath { source })
}

#[async_trait]
impl ObjectBackend for ObjectStoreBackend {
    async fn put_object(&self, key: &str, content: Bytes) -> object_store::Result<()> {
        let location = location(key)?;
        _ = self.store.put(&location, content.into()).await?;
        Ok(())
    }

    async fn get_object(&self, key: &str) -> object_store::Result<ObjectReader> {
        let location = location(key)?;
        let result = self.store.get(&location).await?;
        let body = result.into_stream().map_err(std::io::Error::other);
        Ok(Box::pin(StreamReader::new(body)))
    }

    fn list_by_prefix<'a>(&'a self, prefix: &'a str) -> KeyStream<'a> {
        let location = match location(prefix) {
            Ok(location) => location,
            Err(err) => return stream::once(async move { Err(err) }).boxed(),
        };

        if location.as_ref().is_empty() {
            return self
                .store
                .list(None)
                .map_ok(|meta| meta.location.to_string())
                .boxed();
        }

        // object_store lists by path segment and may leave out an object
        // stored at the prefix itself, so look for that one explicitly.
        let exact = {
            let location = location.clone();
            stream::once(async move {
                match self.store.head(&location).await {
                    Ok(meta) => Some(Ok(meta.location.to_string())),
                    Err(object_store::Error::NotFound { .. }) => None,
                    Err(err) => Some(Err(err)),
                }
            })
            .filter_map(futures::future::ready)
        };

        let exact_key = location.to_string();
        let nested = self
            .store
            .list(Some(&location))
            .map_ok(|meta| meta.location.to_string())
            .try_filter(move |key| futures::future::ready(*key != exact_key));

        exact.chain(nested).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;
    use tokio::io::AsyncReadExt;

    fn backend() -> ObjectStoreBackend {
        ObjectStoreBackend::new(Arc::new(InMemory::new()))
    }

    async fn keys(backend: &ObjectStoreBackend, prefix: &str) -> Vec<String> {
        let mut keys: Vec<String> = backend
            .list_by_prefix(prefix)
            .try_collect()
            .await
            .unwrap();
        keys.sort();
        keys
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let backend = backend();
        backend
            .put_object("root/a.txt", Bytes::from_static(b"hello"))
            .await
            .unwrap();

        let mut reader = backend.get_object("root/a.txt").await.unwrap();
        let mut content = Vec::new();
        _ = reader.read_to_end(&mut content).await.unwrap();
        assert_eq!(content, b"hello");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let backend = backend();
        let result = backend.get_object("root/missing").await;
        assert!(matches!(result, Err(object_store::Error::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_includes_exact_and_nested() {
        let backend = backend();
        for key in ["dir", "dir/a.txt", "dir/sub/c.txt", "dirt/x"] {
            backend.put_object(key, Bytes::new()).await.unwrap();
        }

        assert_eq!(keys(&backend, "dir").await, vec!["dir", "dir/a.txt", "dir/sub/c.txt"]);
        assert_eq!(keys(&backend, "dir/sub").await, vec!["dir/sub/c.txt"]);
        assert!(keys(&backend, "nothing").await.is_empty());
    }

    #[tokio::test]
    async fn test_list_root() {
        let backend = backend();
        for key in ["a", "b/c"] {
            backend.put_object(key, Bytes::new()).await.unwrap();
        }
        assert_eq!(keys(&backend, "").await, vec!["a", "b/c"]);
    }

    #[tokio::test]
    async fn test_invalid_key_is_rejected() {
        let backend = backend();
        let result = backend.put_object("a/../b", Bytes::new()).await;
        assert!(matches!(result, Err(object_store::Error::InvalidPath { .. })));
    }
}
