// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Mapping from logical paths to backend object keys.

/// Separator between path segments in a backend key.
pub const SEPARATOR: char = '/';

/// Join `root` and a logical `path` into a backend key.
///
/// Empty segments and `.` collapse, `..` removes the previous segment but
/// never climbs out of `root`, and an empty logical path resolves to the
/// cleaned root itself. Keys never start or end with a separator.
#[must_use]
pub fn resolve(root: &str, path: &str) -> String {
    let mut segments = Vec::new();
    push_segments(&mut segments, root, 0);
    let floor = segments.len();
    push_segments(&mut segments, path, floor);
    segments.join("/")
}

fn push_segments<'a>(segments: &mut Vec<&'a str>, path: &'a str, floor: usize) {
    for part in path.split(SEPARATOR) {
        match part {
            "" | "." => {}
            ".." => {
                if segments.len() > floor {
                    _ = segments.pop();
                }
            }
            name => segments.push(name),
        }
    }
}

/// Returns the part of `key` below `prefix`, if `key` lies strictly under it.
///
/// Matching is per segment: `dir/a` is under `dir`, `dirt/a` is not. An empty
/// prefix is the root and contains every key.
#[must_use]
pub fn strip_prefix<'a>(prefix: &str, key: &'a str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(key);
    }
    key.strip_prefix(prefix)?.strip_prefix(SEPARATOR)
}
