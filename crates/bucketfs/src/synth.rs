// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Directory listings synthesized from flat object keys.
//!
//! The object store has no directories. A directory `P` exists when at least
//! one key lies under `P/`, and its entries are the key names exactly one
//! segment below it. This module holds that classification as pure functions
//! over already-collected keys so it can be exercised without a backend.

use crate::path::{SEPARATOR, strip_prefix};

/// One entry of a synthesized directory listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DirEntry {
    name: String,
    is_dir: bool,
}

impl DirEntry {
    /// An entry reported as a plain file.
    pub fn file<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    /// Name relative to the listed directory.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Always false: a one-level name is never probed for further nesting.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

/// How a listed key relates to the queried prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass<'a> {
    /// The key is the prefix itself, i.e. a file.
    Exact,
    /// A name directly below the prefix.
    Child(&'a str),
    /// Nested two or more levels below the prefix.
    Descendant,
    /// A string-prefix match that is not under the prefix segment, e.g. `dirt`
    /// for `dir`, or a bare `dir/` marker with no name.
    Unrelated,
}

impl KeyClass<'_> {
    fn is_under(&self) -> bool {
        !matches!(self, KeyClass::Unrelated)
    }
}

#[must_use]
pub fn classify<'a>(prefix: &str, key: &'a str) -> KeyClass<'a> {
    if !prefix.is_empty() && key == prefix {
        return KeyClass::Exact;
    }
    match strip_prefix(prefix, key) {
        None => KeyClass::Unrelated,
        Some("") if prefix.is_empty() => KeyClass::Unrelated,
        // `dir/` marker objects make the directory exist but name nothing.
        Some("") => KeyClass::Descendant,
        Some(name) if name.contains(SEPARATOR) => KeyClass::Descendant,
        Some(name) => KeyClass::Child(name),
    }
}

/// Outcome of synthesizing a listing for one prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// No key lies under the prefix.
    Missing,
    /// A key equals the prefix: it names a file, not a directory.
    File,
    /// Immediate children, unique and sorted by byte order.
    Directory(Vec<DirEntry>),
}

/// Build the listing of `prefix` from every key the backend returned for it.
///
/// Keys nested more than one level down are dropped without producing an
/// entry for their intermediate directory, so a directory that only holds
/// subdirectories lists as empty.
pub fn synthesize<I, S>(prefix: &str, keys: I) -> Listing
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut found = false;
    let mut names = Vec::new();

    for key in keys {
        let key = key.as_ref();
        let class = classify(prefix, key);
        found |= class.is_under();
        match class {
            KeyClass::Exact => return Listing::File,
            KeyClass::Child(name) => names.push(name.to_string()),
            KeyClass::Descendant | KeyClass::Unrelated => {}
        }
    }

    if !found {
        return Listing::Missing;
    }

    names.sort_unstable();
    names.dedup();
    Listing::Directory(names.into_iter().map(DirEntry::file).collect())
}
