// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed publish/subscribe channels for the editorless host simulator.
//!
//! A simulated host fires many kinds of events (test-tree changes, file
//! creation, workspace-folder registration). Each kind gets its own
//! [`EventEmitter`] parameterized by the payload type; listeners observe
//! payloads by reference and nothing is ever buffered.

mod emitter;

pub use emitter::{EventEmitter, Subscription};
