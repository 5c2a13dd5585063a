// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace folder: disk-backed file mutations that broadcast watcher
//! events.

use super::watcher::FileSystemWatcher;
use super::WatcherList;
use crate::location::Uri;
use editorless_events::EventEmitter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// A subtree of the real file system owned by the simulated workspace.
///
/// The folder stores no file contents; the file system is the source of
/// truth. Mutating methods write to disk first and then fire the matching
/// event on every watcher registered in the session, simulating what a real
/// file-system watcher would report asynchronously. I/O failures propagate
/// untouched — test code treats them as fatal setup errors.
pub struct WorkspaceFolder {
    name: String,
    uri: Uri,
    watchers: WatcherList,
}

impl WorkspaceFolder {
    pub(crate) fn new(name: String, root: PathBuf, watchers: WatcherList) -> Arc<Self> {
        Arc::new(Self {
            name,
            uri: Uri::file(root),
            watchers,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Root path of the folder's subtree.
    pub fn root(&self) -> &Path {
        self.uri.path()
    }

    /// Absolute path of a file relative to the folder root.
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root().join(relative)
    }

    /// Create a file and fire one "created" event per registered watcher.
    ///
    /// Parent directories are created as needed.
    pub async fn add_file(
        &self,
        relative: impl AsRef<Path>,
        content: &str,
    ) -> Result<Uri, WorkspaceError> {
        let uri = self.write(relative.as_ref(), content).await?;
        tracing::debug!(folder = %self.name, uri = %uri, "file created");
        self.broadcast(FileSystemWatcher::on_did_create, &uri);
        Ok(uri)
    }

    /// Create a file without firing watcher events.
    ///
    /// Used to seed a workspace at setup time so that initial contents do
    /// not spuriously trigger watcher-driven re-discovery in the code under
    /// test.
    pub async fn seed_file(
        &self,
        relative: impl AsRef<Path>,
        content: &str,
    ) -> Result<Uri, WorkspaceError> {
        let uri = self.write(relative.as_ref(), content).await?;
        tracing::debug!(folder = %self.name, uri = %uri, "file seeded");
        Ok(uri)
    }

    /// Overwrite a file's content and fire one "changed" event per watcher.
    pub async fn change_file(
        &self,
        relative: impl AsRef<Path>,
        content: &str,
    ) -> Result<Uri, WorkspaceError> {
        let uri = self.write(relative.as_ref(), content).await?;
        tracing::debug!(folder = %self.name, uri = %uri, "file changed");
        self.broadcast(FileSystemWatcher::on_did_change, &uri);
        Ok(uri)
    }

    /// Delete a file and fire one "deleted" event per watcher.
    pub async fn remove_file(&self, relative: impl AsRef<Path>) -> Result<Uri, WorkspaceError> {
        let path = self.join(relative);
        tokio::fs::remove_file(&path).await?;
        let uri = Uri::file(path);
        tracing::debug!(folder = %self.name, uri = %uri, "file deleted");
        self.broadcast(FileSystemWatcher::on_did_delete, &uri);
        Ok(uri)
    }

    async fn write(&self, relative: &Path, content: &str) -> Result<Uri, WorkspaceError> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, content).await?;
        Ok(Uri::file(path))
    }

    /// Fire `channel` on every registered watcher, in registration order.
    fn broadcast<F>(&self, channel: F, uri: &Uri)
    where
        F: Fn(&FileSystemWatcher) -> &EventEmitter<Uri>,
    {
        let watchers = self.watchers.read().clone();
        for watcher in watchers {
            channel(watcher.as_ref()).fire(uri);
        }
    }
}

#[cfg(test)]
#[path = "folder_tests.rs"]
mod tests;
