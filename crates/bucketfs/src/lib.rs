// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! A small hierarchical filesystem over flat object storage.
//!
//! Object stores such as GCS and S3 hold blobs under flat keys. BucketFS
//! presents them as files and directories below a root prefix:
//!
//! - **Files** are objects, addressed by `root/path`.
//! - **Directories** exist only as key prefixes. Listing `dir` collects every
//!   key under `root/dir/` and keeps the names exactly one level down.
//! - **Append** reads the existing object and rewrites it with new bytes
//!   added; it is not atomic.
//!
//! ```no_run
//! # async fn example() -> bucketfs::Result<()> {
//! use bucketfs::{BucketFs, FileSystem, StoreConfig};
//! use tokio::io::AsyncWriteExt;
//!
//! let config = StoreConfig::from_yaml_str("storage_type: gcs\nbucket: logs\nprefix: app\n")?;
//! let fs = BucketFs::from_config(&config)?;
//!
//! let mut writer = fs.append("2025/01/events.log").await?;
//! writer.write_all(b"started\n").await?;
//! writer.close().await?;
//!
//! for entry in fs.read_dir("2025/01").await? {
//!     println!("{}", entry.name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod file;
pub mod fs;
pub mod path;
pub mod synth;
pub mod testing;

pub use backend::{ObjectBackend, ObjectStoreBackend};
pub use config::{StorageType, StoreConfig};
pub use error::{Error, Result};
pub use file::{FileReader, FileWriter};
pub use fs::{BucketFs, FileSystem};
pub use synth::DirEntry;

#[cfg(test)]
mod tests;
