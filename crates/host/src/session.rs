// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-test-run session facade.
//!
//! A [`Session`] owns every registry the real host would hold process-wide:
//! workspace folders, file-system watchers, and test controllers. Sessions
//! have an explicit lifecycle — created for a test run, discarded at its end
//! — so multiple isolated simulated hosts can coexist in one process.
//!
//! Extension code reaches the simulator through capability groups:
//! [`WorkspaceApi`], [`TestApi`], and [`WindowApi`]. Each is a cheap clone
//! over shared session state, so tests can hand them to the code under test
//! independently.

use crate::location::Uri;
use crate::testing::TestController;
use crate::workspace::{FileSystemWatcher, WatcherList, WorkspaceError, WorkspaceFolder};
use editorless_events::EventEmitter;
use parking_lot::{Mutex, RwLock};
use regex::Regex;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

struct SessionState {
    folders: RwLock<Vec<Arc<WorkspaceFolder>>>,
    watchers: WatcherList,
    controllers: RwLock<Vec<TestController>>,
    folders_changed: EventEmitter<Arc<WorkspaceFolder>>,
    messages: Mutex<Vec<ShownMessage>>,
    message_shown: EventEmitter<ShownMessage>,
    /// Temp roots created via [`WorkspaceApi::temp_workspace_folder`], kept
    /// alive (and cleaned up) with the session.
    temp_roots: Mutex<Vec<TempDir>>,
}

/// One simulated host instance.
pub struct Session {
    state: Arc<SessionState>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: Arc::new(SessionState {
                folders: RwLock::new(Vec::new()),
                watchers: Arc::new(RwLock::new(Vec::new())),
                controllers: RwLock::new(Vec::new()),
                folders_changed: EventEmitter::new(),
                messages: Mutex::new(Vec::new()),
                message_shown: EventEmitter::new(),
                temp_roots: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Workspace capability: folders, watchers, file search.
    pub fn workspace(&self) -> WorkspaceApi {
        WorkspaceApi {
            state: Arc::clone(&self.state),
        }
    }

    /// Test capability: controllers and expansion.
    pub fn tests(&self) -> TestApi {
        TestApi {
            state: Arc::clone(&self.state),
        }
    }

    /// Window capability: recorded user-facing messages.
    pub fn window(&self) -> WindowApi {
        WindowApi {
            state: Arc::clone(&self.state),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Workspace-facing surface of a [`Session`].
#[derive(Clone)]
pub struct WorkspaceApi {
    state: Arc<SessionState>,
}

impl WorkspaceApi {
    /// Register a workspace folder rooted at `root`.
    ///
    /// Creates the root directory, seeds `initial_files` without firing
    /// watcher events, appends the folder to the session's append-only list,
    /// then fires a single workspace-folders-changed event carrying the new
    /// folder.
    pub async fn add_workspace_folder(
        &self,
        root: impl Into<PathBuf>,
        initial_files: &[(&str, &str)],
    ) -> Result<Arc<WorkspaceFolder>, WorkspaceError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        let folder = WorkspaceFolder::new(name, root, Arc::clone(&self.state.watchers));
        for &(relative, content) in initial_files {
            folder.seed_file(relative, content).await?;
        }
        self.state.folders.write().push(Arc::clone(&folder));
        tracing::debug!(folder = %folder.name(), root = %folder.uri(), "workspace folder added");
        self.state.folders_changed.fire(&folder);
        Ok(folder)
    }

    /// Register a workspace folder named `name` under a fresh temporary
    /// directory owned by the session.
    pub async fn temp_workspace_folder(
        &self,
        name: &str,
        initial_files: &[(&str, &str)],
    ) -> Result<Arc<WorkspaceFolder>, WorkspaceError> {
        let temp = tempfile::tempdir()?;
        let root = temp.path().join(name);
        self.state.temp_roots.lock().push(temp);
        self.add_workspace_folder(root, initial_files).await
    }

    /// Register a new watcher. Every subsequent file mutation in any folder
    /// of this session broadcasts to it; there is no unregistration.
    pub fn create_file_system_watcher(&self) -> Arc<FileSystemWatcher> {
        let watcher = FileSystemWatcher::new();
        self.state.watchers.write().push(Arc::clone(&watcher));
        watcher
    }

    /// Glob across every registered folder and return the union of matches.
    ///
    /// Results come in per-folder-then-per-match order, not globally sorted;
    /// callers needing determinism must sort. No folders means no matches,
    /// not an error.
    pub fn find_files(&self, pattern: &str) -> Result<Vec<Uri>, WorkspaceError> {
        let folders = self.state.folders.read().clone();
        let mut matches = Vec::new();
        for folder in folders {
            let rooted = folder.join(pattern);
            for path in glob::glob(&rooted.to_string_lossy())?.filter_map(Result::ok) {
                matches.push(Uri::file(path));
            }
        }
        Ok(matches)
    }

    /// First registered folder whose root path is a string prefix of `uri`'s
    /// path.
    ///
    /// This is deliberately a plain prefix test, not a path-segment-aware
    /// containment check: a folder rooted at `/work/app` also claims
    /// `/work/app-extra/file.ts`. Existing suites depend on that exact
    /// behavior.
    pub fn get_workspace_folder(&self, uri: &Uri) -> Option<Arc<WorkspaceFolder>> {
        let needle = uri.path().to_string_lossy().into_owned();
        self.state
            .folders
            .read()
            .iter()
            .find(|folder| needle.starts_with(folder.root().to_string_lossy().as_ref()))
            .cloned()
    }

    /// Registered folders, in registration order.
    pub fn folders(&self) -> Vec<Arc<WorkspaceFolder>> {
        self.state.folders.read().clone()
    }

    /// Registered watchers, in registration order.
    pub fn watchers(&self) -> Vec<Arc<FileSystemWatcher>> {
        self.state.watchers.read().clone()
    }

    /// Fired once per added workspace folder, after seeding completes.
    pub fn on_did_change_workspace_folders(&self) -> &EventEmitter<Arc<WorkspaceFolder>> {
        &self.state.folders_changed
    }
}

/// Test-tree-facing surface of a [`Session`].
#[derive(Clone)]
pub struct TestApi {
    state: Arc<SessionState>,
}

impl TestApi {
    /// Create and register a test controller.
    pub fn create_test_controller(
        &self,
        id: impl Into<String>,
        label: impl Into<String>,
    ) -> TestController {
        let controller = TestController::new(id, label);
        self.state.controllers.write().push(controller.clone());
        controller
    }

    /// Registered controllers, in registration order.
    pub fn controllers(&self) -> Vec<TestController> {
        self.state.controllers.read().clone()
    }

    /// Expand the first label match across all controllers.
    ///
    /// Controllers are scanned in registration order; the scan stops after
    /// the first expansion. Returns whether anything was expanded.
    pub async fn expand_by_label(&self, pattern: &Regex) -> bool {
        let controllers = self.state.controllers.read().clone();
        for controller in controllers {
            if controller.expand_by_label(pattern).await {
                return true;
            }
        }
        false
    }
}

/// Severity of a recorded user-facing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageLevel {
    Information,
    Warning,
    Error,
}

/// A message an extension asked the host to display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShownMessage {
    pub level: MessageLevel,
    pub text: String,
}

/// Window-facing surface of a [`Session`].
///
/// Nothing is rendered; messages are recorded so tests can assert what an
/// extension would have displayed.
#[derive(Clone)]
pub struct WindowApi {
    state: Arc<SessionState>,
}

impl WindowApi {
    pub fn show_information_message(&self, text: impl Into<String>) {
        self.show(MessageLevel::Information, text.into());
    }

    pub fn show_warning_message(&self, text: impl Into<String>) {
        self.show(MessageLevel::Warning, text.into());
    }

    pub fn show_error_message(&self, text: impl Into<String>) {
        self.show(MessageLevel::Error, text.into());
    }

    fn show(&self, level: MessageLevel, text: String) {
        tracing::debug!(?level, %text, "message shown");
        let message = ShownMessage { level, text };
        self.state.messages.lock().push(message.clone());
        self.state.message_shown.fire(&message);
    }

    /// Recorded messages, oldest first.
    pub fn messages(&self) -> Vec<ShownMessage> {
        self.state.messages.lock().clone()
    }

    /// Fired once per recorded message.
    pub fn on_did_show_message(&self) -> &EventEmitter<ShownMessage> {
        &self.state.message_shown
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
