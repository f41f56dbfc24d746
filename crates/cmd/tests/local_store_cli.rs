// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use tempfile::TempDir;

use cmd::commands::{CopyMode, cat_command, copy_command, list_command};
use cmd::common::open_filesystem;

#[tokio::test]
async fn test_local_store_cli_end_to_end() {
    let temp_store = TempDir::new().expect("create temp store");
    let store_path = temp_store.path().join("objects");
    std::fs::create_dir_all(&store_path).expect("create store dir");

    let config_path = temp_store.path().join("store.yaml");
    std::fs::write(
        &config_path,
        format!("storage_type: local\npath: {}\nprefix: team\n", store_path.display()),
    )
    .expect("write config");

    let fs = open_filesystem(Some(config_path), None).expect("open filesystem");

    // bucketfs put / append
    let mut input: &[u8] = b"hello ";
    _ = copy_command(&fs, "logs/today.txt", &mut input, CopyMode::Create)
        .await
        .expect("put");
    let mut input: &[u8] = b"world";
    _ = copy_command(&fs, "logs/today.txt", &mut input, CopyMode::Append)
        .await
        .expect("append");
    let mut input: &[u8] = b"old";
    _ = copy_command(&fs, "logs/archive/2024.txt", &mut input, CopyMode::Create)
        .await
        .expect("put nested");

    // Objects land under the prefix in the store directory.
    let on_disk = std::fs::read(store_path.join("team/logs/today.txt")).expect("read object");
    assert_eq!(on_disk, b"hello world");

    // bucketfs cat
    let mut out = Vec::new();
    _ = cat_command(&fs, "logs/today.txt", &mut out).await.expect("cat");
    assert_eq!(out, b"hello world");

    // bucketfs ls: the nested archive directory is not an entry.
    let mut listed = Vec::new();
    list_command(&fs, "logs", &mut listed).await.expect("ls");
    assert_eq!(String::from_utf8(listed).expect("utf8"), "today.txt\n");

    // ls of a file fails.
    let mut listed = Vec::new();
    assert!(list_command(&fs, "logs/today.txt", &mut listed).await.is_err());
}
