// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test controller: flattened index, change channel, resolve handler, and
//! run-profile registry.

use super::item::TestItem;
use editorless_events::EventEmitter;
use parking_lot::Mutex;
use regex::Regex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// What a run profile would do in a real host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunProfileKind {
    Run,
    Debug,
    Coverage,
}

/// Immutable run-profile descriptor.
///
/// The simulator records metadata only; it never invokes run handlers. Test
/// code that registers a profile keeps its own handler closure and asserts
/// against the recorded label/kind/default flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunProfile {
    label: String,
    kind: RunProfileKind,
    is_default: bool,
}

impl RunProfile {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> RunProfileKind {
        self.kind
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

/// Handler invoked to lazily populate children of a test item.
///
/// Receives `Some(item)` for a specific node or `None` for top-level
/// expansion, and mutates the item's children as a side effect.
pub type ResolveHandler =
    Arc<dyn Fn(Option<Arc<TestItem>>) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// State shared between a controller handle and every item it owns.
///
/// Items hold a `Weak` back to this so that attaching a subtree can register
/// it in the flattened index and mutations can reach the change channel.
pub(crate) struct ControllerCore {
    id: String,
    label: String,
    /// Flattened index over the whole tree, in registration order.
    index: Mutex<Vec<Arc<TestItem>>>,
    changed: EventEmitter<Arc<TestItem>>,
    resolver: Mutex<Option<ResolveHandler>>,
    profiles: Mutex<Vec<RunProfile>>,
}

impl ControllerCore {
    /// Register one item. A known identity replaces the node at its existing
    /// slot (last write wins, position preserved); a new identity appends.
    fn register(&self, item: &Arc<TestItem>) {
        let mut index = self.index.lock();
        match index.iter().position(|i| i.id() == item.id()) {
            Some(slot) => index[slot] = Arc::clone(item),
            None => index.push(Arc::clone(item)),
        }
    }

    /// Register an item and all of its descendants.
    pub(crate) fn register_subtree(&self, item: &Arc<TestItem>) {
        self.register(item);
        for child in item.children() {
            self.register_subtree(&child);
        }
    }

    /// Remove an item and all of its descendants from the index.
    pub(crate) fn purge_subtree(&self, item: &Arc<TestItem>) {
        let mut ids = Vec::new();
        collect_ids(item, &mut ids);
        self.purge_ids(&ids);
    }

    /// Remove only the descendants of an item from the index.
    ///
    /// Used when `add` overwrites an existing identity in place: the shared
    /// identity keeps its index slot (taken over by the new node) while the
    /// old node's subtree becomes unreachable.
    pub(crate) fn purge_descendants(&self, item: &Arc<TestItem>) {
        let mut ids = Vec::new();
        for child in item.children() {
            collect_ids(&child, &mut ids);
        }
        self.purge_ids(&ids);
    }

    fn purge_ids(&self, ids: &[String]) {
        if ids.is_empty() {
            return;
        }
        self.index
            .lock()
            .retain(|i| !ids.iter().any(|id| id == i.id()));
    }

    /// Index lookup by identity.
    pub(crate) fn lookup(&self, id: &str) -> Option<Arc<TestItem>> {
        self.index.lock().iter().find(|i| i.id() == id).cloned()
    }

    /// Index snapshot in registration order.
    pub(crate) fn items(&self) -> Vec<Arc<TestItem>> {
        self.index.lock().clone()
    }

    pub(crate) fn resolver(&self) -> Option<ResolveHandler> {
        self.resolver.lock().clone()
    }

    /// Funnel one change event for a tree mutation under `parent`.
    pub(crate) fn fire_changed(&self, parent: Arc<TestItem>) {
        tracing::trace!(controller = %self.id, item = %parent.id(), "test item changed");
        self.changed.fire(&parent);
    }
}

fn collect_ids(item: &Arc<TestItem>, ids: &mut Vec<String>) {
    ids.push(item.id().to_string());
    for child in item.children() {
        collect_ids(&child, ids);
    }
}

/// Owner of one test tree.
///
/// Holds the root item (whose identity and label are the controller's own),
/// the flattened index spanning the whole tree, the append-only run-profile
/// list, and the current resolve handler. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct TestController {
    core: Arc<ControllerCore>,
    root: Arc<TestItem>,
}

impl TestController {
    pub(crate) fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let id = id.into();
        let label = label.into();
        let core = Arc::new(ControllerCore {
            id: id.clone(),
            label: label.clone(),
            index: Mutex::new(Vec::new()),
            changed: EventEmitter::new(),
            resolver: Mutex::new(None),
            profiles: Mutex::new(Vec::new()),
        });
        let root = TestItem::new(Arc::downgrade(&core), id, label, None);
        core.register(&root);
        Self { core, root }
    }

    pub fn id(&self) -> &str {
        &self.core.id
    }

    pub fn label(&self) -> &str {
        &self.core.label
    }

    /// The root test item. Its children are the controller's top level.
    pub fn root(&self) -> &Arc<TestItem> {
        &self.root
    }

    /// Create a detached item bound to this controller.
    ///
    /// The item joins the flattened index only once it is attached under an
    /// already-attached node.
    pub fn create_item(&self, id: impl Into<String>, label: impl Into<String>) -> Arc<TestItem> {
        TestItem::new(Arc::downgrade(&self.core), id.into(), label.into(), None)
    }

    /// Create a detached item carrying a source location.
    pub fn create_item_at(
        &self,
        id: impl Into<String>,
        label: impl Into<String>,
        location: crate::location::Location,
    ) -> Arc<TestItem> {
        TestItem::new(
            Arc::downgrade(&self.core),
            id.into(),
            label.into(),
            Some(location),
        )
    }

    /// Install the resolve handler used by [`TestItem::expand`].
    ///
    /// Replaces any previous handler.
    pub fn set_resolve_handler<F, Fut>(&self, handler: F)
    where
        F: Fn(Option<Arc<TestItem>>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let boxed: ResolveHandler = Arc::new(move |item| Box::pin(handler(item)));
        *self.core.resolver.lock() = Some(boxed);
    }

    /// Remove the resolve handler; subsequent expansions become no-ops.
    pub fn clear_resolve_handler(&self) {
        *self.core.resolver.lock() = None;
    }

    /// Expand the top level by invoking the resolve handler with the root
    /// sentinel (`None`). No handler installed is a silent no-op.
    pub async fn expand_root(&self) {
        if let Some(handler) = self.core.resolver() {
            handler(None).await;
        }
    }

    /// Expand the first item whose label matches `pattern`.
    ///
    /// Scans the flattened index in registration order and stops after one
    /// expansion, so test code can target a specific node deterministically
    /// even when labels repeat. Returns whether a match was expanded.
    pub async fn expand_by_label(&self, pattern: &Regex) -> bool {
        let target = self
            .core
            .items()
            .into_iter()
            .find(|item| pattern.is_match(item.label()));
        match target {
            Some(item) => {
                item.expand().await;
                true
            }
            None => false,
        }
    }

    /// Append a run profile. The list is append-only for the lifetime of the
    /// controller.
    pub fn create_run_profile(
        &self,
        label: impl Into<String>,
        kind: RunProfileKind,
        is_default: bool,
    ) -> RunProfile {
        let profile = RunProfile {
            label: label.into(),
            kind,
            is_default,
        };
        self.core.profiles.lock().push(profile.clone());
        profile
    }

    /// Snapshot of registered run profiles, in registration order.
    pub fn run_profiles(&self) -> Vec<RunProfile> {
        self.core.profiles.lock().clone()
    }

    /// Flattened-index lookup by identity.
    pub fn item(&self, id: &str) -> Option<Arc<TestItem>> {
        self.core.lookup(id)
    }

    /// Flattened-index snapshot in registration order.
    pub fn items(&self) -> Vec<Arc<TestItem>> {
        self.core.items()
    }

    /// Change channel shared by every item in this controller's tree.
    ///
    /// Each `add`/`delete`/`replace` fires exactly one event naming the
    /// mutated parent node.
    pub fn on_did_change_test_item(&self) -> &EventEmitter<Arc<TestItem>> {
        &self.core.changed
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
