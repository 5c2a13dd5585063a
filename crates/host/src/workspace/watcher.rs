// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File-system watcher event source.

use crate::location::Uri;
use editorless_events::EventEmitter;
use std::sync::Arc;

/// Per-subscription event source with three independent channels.
///
/// Watchers have no glob or path filtering: every workspace-folder mutation
/// in the session broadcasts to every registered watcher. There is no
/// disposal surface; a watcher lives for the session.
pub struct FileSystemWatcher {
    on_did_create: EventEmitter<Uri>,
    on_did_change: EventEmitter<Uri>,
    on_did_delete: EventEmitter<Uri>,
}

impl FileSystemWatcher {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            on_did_create: EventEmitter::new(),
            on_did_change: EventEmitter::new(),
            on_did_delete: EventEmitter::new(),
        })
    }

    /// Fired after a file is created through a workspace folder.
    pub fn on_did_create(&self) -> &EventEmitter<Uri> {
        &self.on_did_create
    }

    /// Fired after a file's content is overwritten.
    pub fn on_did_change(&self) -> &EventEmitter<Uri> {
        &self.on_did_change
    }

    /// Fired after a file is deleted.
    pub fn on_did_delete(&self) -> &EventEmitter<Uri> {
        &self.on_did_delete
    }
}
