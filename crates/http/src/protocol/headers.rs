//! Request header storage.
//!
//! Header names are kept exactly as the client sent them. Lookups are case-sensitive, so
//! `Content-Length` and `content-length` are two different headers. A repeated name replaces
//! the earlier value.

use std::collections::HashMap;
use std::collections::hash_map::Iter;

/// Case-sensitive, single-valued header map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `name`, returning the value it replaced.
    pub fn insert<N, V>(&mut self, name: N, value: V) -> Option<String>
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.inner.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.inner.iter()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
