// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use bucketfs::{BucketFs, StoreConfig};

/// Environment variable naming the store configuration file.
pub const CONFIG_ENV: &str = "BUCKETFS_CONFIG";

/// Get the config path with an optional override, falling back to BUCKETFS_CONFIG
pub fn get_config_path_with_override(override_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path);
    }

    env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .map_err(|_| anyhow!("no store configuration: pass --config or set {}", CONFIG_ENV))
}

/// Load the configuration and open the filesystem it describes.
///
/// `prefix` replaces the configured root prefix when given.
pub fn open_filesystem(config_path: Option<PathBuf>, prefix: Option<String>) -> Result<BucketFs> {
    let path = get_config_path_with_override(config_path)?;
    let mut config = StoreConfig::from_yaml_file(&path)
        .map_err(|e| anyhow!("Failed to load {}: {}", path.display(), e))?;
    if let Some(prefix) = prefix {
        config.prefix = prefix;
    }

    diagnostics::info!(
        "opening {storage} store with prefix {prefix}",
        storage: config.storage_type.to_string(),
        prefix: config.prefix
    );
    Ok(BucketFs::from_config(&config)?)
}
