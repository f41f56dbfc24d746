// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use anyhow::Result;
use bucketfs::FileSystem;

/// Print the names directly inside `dir`, one per line.
pub async fn list_command<F: FileSystem, W: Write>(fs: &F, dir: &str, out: &mut W) -> Result<()> {
    diagnostics::debug!("list_command called with dir: {dir}", dir: dir);

    for entry in fs.read_dir(dir).await? {
        writeln!(out, "{}", entry.name())?;
    }
    Ok(())
}
