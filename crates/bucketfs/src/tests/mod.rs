// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0


use crate::testing::MemoryBackend;
use crate::{BucketFs, FileSystem};
use object_store::memory::InMemory;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Filesystem rooted at `root` over object_store's in-memory store.
fn memory_fs(root: &str) -> BucketFs {
    BucketFs::with_object_store(Arc::new(InMemory::new()), root)
}

/// Filesystem over the fault-injecting backend, which is also returned.
fn faulty_fs(root: &str) -> (BucketFs, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    (BucketFs::new(backend.clone(), root), backend)
}

async fn write_file(fs: &BucketFs, name: &str, content: &[u8]) -> crate::Result<()> {
    let mut writer = fs.create(name).await?;
    writer.write_all(content).await?;
    writer.close().await
}

async fn read_file(fs: &BucketFs, name: &str) -> crate::Result<Vec<u8>> {
    let mut reader = fs.open(name).await?;
    let mut content = Vec::new();
    _ = reader.read_to_end(&mut content).await?;
    reader.close()?;
    Ok(content)
}
