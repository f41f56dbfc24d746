// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use bucketfs::FileSystem;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Stream the file at `path` to `out`.
pub async fn cat_command<F, W>(fs: &F, path: &str, out: &mut W) -> Result<u64>
where
    F: FileSystem,
    W: AsyncWrite + Unpin,
{
    let mut reader = fs.open(path).await?;
    let size = tokio::io::copy(&mut reader, out).await?;
    out.flush().await?;
    reader.close()?;

    diagnostics::debug!("cat {path}: {size} bytes", path: path, size: size);
    Ok(size)
}
