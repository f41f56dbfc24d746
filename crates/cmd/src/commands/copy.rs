// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use bucketfs::FileSystem;
use tokio::io::AsyncRead;

/// How copied bytes combine with an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// Replace the file.
    Create,
    /// Add to the end of the file.
    Append,
}

/// Copy `input` into the file at `path`, returning the bytes copied.
pub async fn copy_command<F, R>(fs: &F, path: &str, input: &mut R, mode: CopyMode) -> Result<u64>
where
    F: FileSystem,
    R: AsyncRead + Unpin,
{
    let mut writer = match mode {
        CopyMode::Create => fs.create(path).await?,
        CopyMode::Append => fs.append(path).await?,
    };
    let size = tokio::io::copy(input, &mut writer).await?;
    writer.close().await?;

    diagnostics::info!("copied {size} bytes to {path}", size: size, path: path);
    Ok(size)
}
