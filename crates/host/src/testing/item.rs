// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mutable test-tree node.

use super::controller::ControllerCore;
use crate::location::Location;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};

/// A node in a controller's test tree.
///
/// Identity and label are fixed at creation; structure is mutated through
/// [`add`](Self::add), [`delete`](Self::delete) and
/// [`replace`](Self::replace). The child collection is ordered by insertion
/// and is the sole ownership path: the parent back-reference is weak and
/// exists only for navigation.
///
/// Duplicate identities are a documented sharp edge inherited from the host
/// API: inserting an identity that already exists under the same parent
/// silently replaces it, last write wins.
pub struct TestItem {
    id: String,
    label: String,
    location: Option<Location>,
    core: Weak<ControllerCore>,
    parent: Mutex<Weak<TestItem>>,
    children: Mutex<Vec<Arc<TestItem>>>,
}

impl TestItem {
    pub(crate) fn new(
        core: Weak<ControllerCore>,
        id: String,
        label: String,
        location: Option<Location>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id,
            label,
            location,
            core,
            parent: Mutex::new(Weak::new()),
            children: Mutex::new(Vec::new()),
        })
    }

    /// Identity, unique within the owning controller's flattened index.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// The node this item is currently attached under, if any.
    pub fn parent(&self) -> Option<Arc<TestItem>> {
        self.parent.lock().upgrade()
    }

    /// Snapshot of children in insertion order.
    pub fn children(&self) -> Vec<Arc<TestItem>> {
        self.children.lock().clone()
    }

    /// Direct child lookup by identity.
    pub fn child(&self, id: &str) -> Option<Arc<TestItem>> {
        self.children.lock().iter().find(|c| c.id == id).cloned()
    }

    /// A node is attached iff it occupies its own slot in the flattened
    /// index; the index is maintained to mirror reachability from the root.
    fn is_attached(self: &Arc<Self>, core: &ControllerCore) -> bool {
        core.lookup(&self.id).is_some_and(|n| Arc::ptr_eq(&n, self))
    }

    /// Attach `child` under this node.
    ///
    /// The child and all of its descendants are registered in the
    /// controller's flattened index. An existing child with the same identity
    /// is replaced in place (its own descendants leave the index). Fires
    /// exactly one change event naming `self`.
    pub fn add(self: &Arc<Self>, child: Arc<TestItem>) {
        *child.parent.lock() = Arc::downgrade(self);
        let replaced = {
            let mut children = self.children.lock();
            match children.iter().position(|c| c.id == child.id) {
                Some(slot) => Some(std::mem::replace(&mut children[slot], Arc::clone(&child))),
                None => {
                    children.push(Arc::clone(&child));
                    None
                }
            }
        };
        if let Some(old) = &replaced {
            if !Arc::ptr_eq(old, &child) {
                *old.parent.lock() = Weak::new();
            }
        }
        tracing::debug!(parent = %self.id, child = %child.id, "test item attached");
        if let Some(core) = self.core.upgrade() {
            // Index bookkeeping only applies when `self` is reachable from
            // the root; a detached subtree joins the index when its own root
            // is attached.
            if self.is_attached(&core) {
                if let Some(old) = &replaced {
                    if !Arc::ptr_eq(old, &child) {
                        core.purge_descendants(old);
                    }
                }
                core.register_subtree(&child);
            }
            core.fire_changed(Arc::clone(self));
        }
    }

    /// Remove the named child and purge its whole subtree from the flattened
    /// index. An unknown identity is a silent no-op and fires nothing.
    pub fn delete(self: &Arc<Self>, id: &str) {
        let removed = {
            let mut children = self.children.lock();
            children
                .iter()
                .position(|c| c.id == id)
                .map(|slot| children.remove(slot))
        };
        let Some(removed) = removed else {
            return;
        };
        *removed.parent.lock() = Weak::new();
        tracing::debug!(parent = %self.id, child = %id, "test item deleted");
        if let Some(core) = self.core.upgrade() {
            if self.is_attached(&core) {
                core.purge_subtree(&removed);
            }
            core.fire_changed(Arc::clone(self));
        }
    }

    /// Atomically swap the child set for `items`.
    ///
    /// All current children (and their subtrees) leave the flattened index,
    /// then each of `items` is inserted in order; a duplicate identity within
    /// `items` keeps the first slot with the last node winning. One logical
    /// mutation, one change event — even when `items` is empty.
    pub fn replace(self: &Arc<Self>, items: Vec<Arc<TestItem>>) {
        let old = std::mem::take(&mut *self.children.lock());
        for child in &old {
            *child.parent.lock() = Weak::new();
        }

        let mut incoming: Vec<Arc<TestItem>> = Vec::with_capacity(items.len());
        for item in items {
            match incoming.iter().position(|c| c.id == item.id) {
                Some(slot) => incoming[slot] = item,
                None => incoming.push(item),
            }
        }
        for child in &incoming {
            *child.parent.lock() = Arc::downgrade(self);
        }
        *self.children.lock() = incoming.clone();

        tracing::debug!(parent = %self.id, count = incoming.len(), "children replaced");
        if let Some(core) = self.core.upgrade() {
            if self.is_attached(&core) {
                for child in &old {
                    core.purge_subtree(child);
                }
                for child in &incoming {
                    core.register_subtree(child);
                }
            }
            core.fire_changed(Arc::clone(self));
        }
    }

    /// Invoke the controller's resolve handler with this node and await it.
    ///
    /// The handler is expected to call [`add`](Self::add) or
    /// [`replace`](Self::replace) on the node as a side effect. No handler
    /// installed is a silent no-op. Overlapping expansions of the same node
    /// are not deduplicated; idempotence is the handler's responsibility.
    pub async fn expand(self: &Arc<Self>) {
        let handler = self.core.upgrade().and_then(|core| core.resolver());
        if let Some(handler) = handler {
            handler(Some(Arc::clone(self))).await;
        }
    }

    /// Deterministic multi-line rendering of the subtree.
    ///
    /// One `- <label>` line per node, two spaces of indent per depth, and
    /// siblings ordered by identity rather than insertion order, so the same
    /// final tree renders identically no matter how asynchronous resolve
    /// handlers populated it.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        if !out.is_empty() {
            out.push('\n');
        }
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str("- ");
        out.push_str(&self.label);
        let mut children = self.children();
        children.sort_by(|a, b| a.id.cmp(&b.id));
        for child in children {
            child.render_into(out, depth + 1);
        }
    }
}

impl fmt::Display for TestItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for TestItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("children", &self.children.lock().len())
            .finish()
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
