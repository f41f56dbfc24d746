// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Store configuration
//!
//! A YAML document selects the object store and the root prefix:
//!
//! ```yaml
//! storage_type: gcs
//! bucket: my-bucket
//! prefix: teams/ops
//! ```
//!
//! Credentials are not part of the configuration. The S3 and GCS clients read
//! them from the environment the usual way (`AWS_*`, `GOOGLE_*`).

use crate::error::{Error, Result};
use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Which object store client to construct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// Process-local, discarded on exit.
    #[default]
    Memory,
    /// A directory on the local filesystem.
    Local,
    S3,
    Gcs,
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageType::Memory => write!(f, "memory"),
            StorageType::Local => write!(f, "local"),
            StorageType::S3 => write!(f, "s3"),
            StorageType::Gcs => write!(f, "gcs"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default)]
    pub storage_type: StorageType,

    /// Bucket name (s3, gcs)
    #[serde(default)]
    pub bucket: String,

    /// Region (s3). Falls back to the environment when empty.
    #[serde(default)]
    pub region: String,

    /// Custom S3-compatible endpoint URL
    #[serde(default)]
    pub endpoint: String,

    /// Directory holding the objects (local)
    #[serde(default)]
    pub path: String,

    /// Root prefix applied to every filesystem path
    #[serde(default)]
    pub prefix: String,
}

impl StoreConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: StoreConfig = serde_yaml_ng::from_str(text)
            .map_err(|e| Error::config(format!("Invalid YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        match self.storage_type {
            StorageType::Memory => {}
            StorageType::Local => {
                if self.path.is_empty() {
                    return Err(Error::config("path field required for local storage"));
                }
            }
            StorageType::S3 | StorageType::Gcs => {
                if self.bucket.is_empty() {
                    return Err(Error::config(format!(
                        "bucket field required for {} storage",
                        self.storage_type
                    )));
                }
            }
        }
        Ok(())
    }

    /// Construct the object store client this configuration describes.
    pub fn build_object_store(&self) -> Result<Arc<dyn ObjectStore>> {
        self.validate()?;
        let store: Arc<dyn ObjectStore> = match self.storage_type {
            StorageType::Memory => Arc::new(InMemory::new()),
            StorageType::Local => {
                diagnostics::info!("local object store at {path}", path: self.path);
                Arc::new(LocalFileSystem::new_with_prefix(&self.path)?)
            }
            StorageType::S3 => {
                diagnostics::info!("s3 bucket {bucket}", bucket: self.bucket);
                let mut builder = AmazonS3Builder::from_env().with_bucket_name(&self.bucket);
                if !self.region.is_empty() {
                    builder = builder.with_region(&self.region);
                }
                if !self.endpoint.is_empty() {
                    builder = builder.with_endpoint(&self.endpoint);
                }
                Arc::new(builder.build()?)
            }
            StorageType::Gcs => {
                diagnostics::info!("gcs bucket {bucket}", bucket: self.bucket);
                Arc::new(
                    GoogleCloudStorageBuilder::from_env()
                        .with_bucket_name(&self.bucket)
                        .build()?,
                )
            }
        };
        Ok(store)
    }
}
