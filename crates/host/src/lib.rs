// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Host Editor Simulator
//!
//! An in-process test double for a host editor's extension-facing API.
//! Extension code runs against a [`Session`] exactly as it would against the
//! real host, enabling deterministic integration testing without an editor
//! process: test trees resolve on demand, file mutations surface as watcher
//! events, and everything an extension "displays" is recorded for assertions.
//!
//! The simulated surface is deliberately narrow: the test-tree and
//! event-notification core plus the virtual workspace it observes. There is
//! no UI, no debugger, no language server, and no persistence across runs.

pub mod location;
pub mod session;
pub mod testing;
pub mod workspace;

/// Re-exported event channel types from the `editorless-events` crate.
pub mod events {
    pub use editorless_events::{EventEmitter, Subscription};
}

pub use location::{Location, Position, Range, Uri};
pub use session::{MessageLevel, Session, ShownMessage, TestApi, WindowApi, WorkspaceApi};
pub use testing::{ResolveHandler, RunProfile, RunProfileKind, TestController, TestItem};
pub use workspace::{FileSystemWatcher, WorkspaceError, WorkspaceFolder};
