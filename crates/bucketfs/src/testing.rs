// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory backend with fault injection, for tests.
//!
//! Unlike `object_store::memory::InMemory`, listing here matches prefixes as
//! plain strings the way bucket listing APIs do, so `dir` also returns `dir`
//! itself and `dirt/x`.

use crate::backend::{KeyStream, ObjectBackend, ObjectReader};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

const STORE: &str = "MemoryBackend";

#[derive(Debug)]
pub struct MemoryBackend {
    objects: Mutex<BTreeMap<String, Bytes>>,
    fail_puts: AtomicBool,
    fail_gets: AtomicBool,
    // usize::MAX means listings never fail.
    fail_list_after: AtomicUsize,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(BTreeMap::new()),
            fail_puts: AtomicBool::new(false),
            fail_gets: AtomicBool::new(false),
            fail_list_after: AtomicUsize::new(usize::MAX),
        }
    }

    fn objects(&self) -> MutexGuard<'_, BTreeMap<String, Bytes>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store an object directly, bypassing fault injection.
    pub fn insert<K: Into<String>, V: Into<Bytes>>(&self, key: K, content: V) {
        _ = self.objects().insert(key.into(), content.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.objects().get(key).cloned()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.objects().keys().cloned().collect()
    }

    /// Make every `put_object` fail with a generic backend error.
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Make every `get_object` fail with a generic backend error.
    pub fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    /// Make listings yield an error after `count` keys.
    pub fn fail_list_after(&self, count: usize) {
        self.fail_list_after.store(count, Ordering::SeqCst);
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn injected(operation: &str, key: &str) -> object_store::Error {
    object_store::Error::Generic {
        store: STORE,
        source: format!("injected {operation} failure for {key}").into(),
    }
}

#[async_trait]
impl ObjectBackend for MemoryBackend {
    async fn put_object(&self, key: &str, content: Bytes) -> object_store::Result<()> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(injected("put", key));
        }
        self.insert(key, content);
        Ok(())
    }

    async fn get_object(&self, key: &str) -> object_store::Result<ObjectReader> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(injected("get", key));
        }
        let content = self.get(key).ok_or_else(|| object_store::Error::NotFound {
            path: key.to_string(),
            source: format!("no object at {key}").into(),
        })?;
        Ok(Box::pin(Cursor::new(content)))
    }

    fn list_by_prefix<'a>(&'a self, prefix: &'a str) -> KeyStream<'a> {
        let limit = self.fail_list_after.load(Ordering::SeqCst);
        let mut items: Vec<object_store::Result<String>> = self
            .objects()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .take(limit)
            .cloned()
            .map(Ok)
            .collect();
        if limit != usize::MAX {
            items.push(Err(injected("list", prefix)));
        }
        stream::iter(items).boxed()
    }
}
