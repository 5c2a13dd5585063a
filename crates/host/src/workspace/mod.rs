// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Virtual workspace folders and file-system watchers.
//!
//! A [`WorkspaceFolder`] is a capability object scoped to a root path on the
//! real file system; it stores no contents of its own. Imperative file
//! mutations through a folder write to disk and then broadcast matching
//! events to every registered [`FileSystemWatcher`] — watchers carry no
//! filtering, every mutation reaches every watcher.

mod folder;
mod watcher;

pub use folder::{WorkspaceError, WorkspaceFolder};
pub use watcher::FileSystemWatcher;

use parking_lot::RwLock;
use std::sync::Arc;

/// Session-wide watcher registry shared by every workspace folder.
pub(crate) type WatcherList = Arc<RwLock<Vec<Arc<FileSystemWatcher>>>>;
