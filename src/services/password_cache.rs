//! Password cache - capability layer
//!
//! Remembers which password opened which file during the current run, and
//! produces the ordered candidate list for an open attempt. Never persisted;
//! the cache dies with the run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Per-run map of absolute source path to the password that opened it.
#[derive(Debug, Default)]
pub struct PasswordCache {
    passwords: HashMap<PathBuf, String>,
}

impl PasswordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered open candidates for `path`: no password first, then the run's
    /// default password, then whatever previously opened this exact path.
    /// The open loop walks this list and stops at the first success.
    pub fn candidates(&self, path: &Path, default_password: Option<&str>) -> Vec<Option<String>> {
        let mut list = vec![None];
        if let Some(default) = default_password {
            list.push(Some(default.to_string()));
        }
        if let Some(cached) = self.passwords.get(path) {
            list.push(Some(cached.clone()));
        }
        list
    }

    /// Records a password that just opened `path` successfully.
    pub fn store(&mut self, path: &Path, password: impl Into<String>) {
        self.passwords.insert(path.to_path_buf(), password.into());
    }
}
