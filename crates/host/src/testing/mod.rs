// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test-tree simulation.
//!
//! This module provides:
//! - [`TestItem`] - mutable tree node with stable identity and ordering
//! - [`TestController`] - root item, flattened index, run profiles, and the
//!   resolve handler used to lazily populate children
//! - [`RunProfile`] - immutable run-profile descriptor
//!
//! Every tree mutation funnels through the owning controller's single change
//! channel; there is one channel per controller, not one per node.

mod controller;
mod item;

pub use controller::{ResolveHandler, RunProfile, RunProfileKind, TestController};
pub use item::TestItem;
