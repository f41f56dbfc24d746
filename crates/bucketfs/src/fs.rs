// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::backend::{ObjectBackend, ObjectStoreBackend};
use crate::config::StoreConfig;
use crate::error::{Error, Result, map_backend_error};
use crate::file::{FileReader, FileWriter};
use crate::path::resolve;
use crate::synth::{DirEntry, Listing, synthesize};
use async_trait::async_trait;
use futures::TryStreamExt;
use object_store::ObjectStore;
use std::sync::Arc;

/// Hierarchical file operations on paths relative to a filesystem's root.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Start a new file at `name`, replacing any existing one when closed.
    async fn create(&self, name: &str) -> Result<FileWriter>;

    /// Start a writer at `name` that already holds the file's current content.
    async fn append(&self, name: &str) -> Result<FileWriter>;

    async fn open(&self, name: &str) -> Result<FileReader>;

    /// Immediate children of `dir`, sorted by name.
    async fn read_dir(&self, dir: &str) -> Result<Vec<DirEntry>>;
}

/// A [`FileSystem`] over a flat object store, scoped to a root prefix.
///
/// No state is kept between calls apart from the handles returned. Concurrent
/// callers are not coordinated: two writers on one path race at the store, and
/// [`FileSystem::append`] reads then rewrites, so an update made in between is
/// lost.
#[derive(Clone)]
pub struct BucketFs {
    backend: Arc<dyn ObjectBackend>,
    root: String,
}

impl std::fmt::Debug for BucketFs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketFs").field("root", &self.root).finish()
    }
}

impl BucketFs {
    pub fn new<S: Into<String>>(backend: Arc<dyn ObjectBackend>, root: S) -> Self {
        Self {
            backend,
            root: root.into(),
        }
    }

    pub fn with_object_store<S: Into<String>>(store: Arc<dyn ObjectStore>, root: S) -> Self {
        Self::new(Arc::new(ObjectStoreBackend::new(store)), root)
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let store = config.build_object_store()?;
        Ok(Self::with_object_store(store, config.prefix.clone()))
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Backend key for a logical path.
    #[must_use]
    pub fn key(&self, name: &str) -> String {
        resolve(&self.root, name)
    }

    /// Key for a file to be written; the root directory itself cannot be one.
    fn file_key(&self, name: &str) -> Result<String> {
        let key = self.key(name);
        if key == resolve(&self.root, "") {
            return Err(Error::Unsupported("write to the root directory"));
        }
        Ok(key)
    }
}

#[async_trait]
impl FileSystem for BucketFs {
    async fn create(&self, name: &str) -> Result<FileWriter> {
        let key = self.file_key(name)?;
        diagnostics::debug!("create {name} at {key}", name: name, key: key);
        Ok(FileWriter::new(key, self.backend.clone()))
    }

    async fn append(&self, name: &str) -> Result<FileWriter> {
        _ = self.file_key(name)?;
        let existing = match self.open(name).await {
            Ok(reader) => Some(reader),
            Err(Error::NotFound(_)) => None,
            Err(err) => return Err(err),
        };

        let mut writer = self.create(name).await?;
        if let Some(mut reader) = existing {
            let copied = tokio::io::copy(&mut reader, &mut writer).await?;
            reader.close()?;
            diagnostics::debug!(
                "append {name} starts after {copied} bytes",
                name: name,
                copied: copied
            );
        }
        Ok(writer)
    }

    async fn open(&self, name: &str) -> Result<FileReader> {
        let key = self.key(name);
        diagnostics::debug!("open {name} at {key}", name: name, key: key);
        let reader = self
            .backend
            .get_object(&key)
            .await
            .map_err(|err| map_backend_error(name, err))?;
        Ok(FileReader::new(key, reader))
    }

    async fn read_dir(&self, dir: &str) -> Result<Vec<DirEntry>> {
        let prefix = self.key(dir);
        let keys: Vec<String> = self
            .backend
            .list_by_prefix(&prefix)
            .try_collect()
            .await
            .map_err(|err| map_backend_error(dir, err))?;

        match synthesize(&prefix, &keys) {
            Listing::Directory(entries) => {
                diagnostics::debug!(
                    "read_dir {dir}: {entries} entries from {keys} keys",
                    dir: dir,
                    entries: entries.len(),
                    keys: keys.len()
                );
                Ok(entries)
            }
            Listing::File => {
                diagnostics::debug!("read_dir {dir}: {prefix} is a file", dir: dir, prefix: prefix);
                Err(Error::not_found(dir))
            }
            Listing::Missing => {
                diagnostics::debug!(
                    "read_dir {dir}: nothing under {prefix}",
                    dir: dir,
                    prefix: prefix
                );
                Err(Error::not_found(dir))
            }
        }
    }
}
