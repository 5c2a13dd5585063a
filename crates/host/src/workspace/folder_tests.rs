// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use parking_lot::{Mutex, RwLock};
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    folder: Arc<WorkspaceFolder>,
    watchers: WatcherList,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let watchers: WatcherList = Arc::new(RwLock::new(Vec::new()));
    let folder = WorkspaceFolder::new(
        "app".to_string(),
        temp.path().join("app"),
        Arc::clone(&watchers),
    );
    Fixture {
        _temp: temp,
        folder,
        watchers,
    }
}

fn watch_created(fx: &Fixture) -> Arc<Mutex<Vec<Uri>>> {
    let watcher = FileSystemWatcher::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sub = {
        let seen = Arc::clone(&seen);
        watcher
            .on_did_create()
            .subscribe(move |uri: &Uri| seen.lock().push(uri.clone()))
    };
    // Dropping the handle does not unsubscribe; the listener stays attached.
    drop(sub);
    fx.watchers.write().push(watcher);
    seen
}

#[tokio::test]
async fn add_file_writes_to_disk_and_fires_created_per_watcher() {
    let fx = fixture();
    let first = watch_created(&fx);
    let second = watch_created(&fx);

    let uri = fx.folder.add_file("src/lib.rs", "pub fn f() {}").await.unwrap();

    assert_eq!(uri.path(), fx.folder.join("src/lib.rs").as_path());
    let on_disk = std::fs::read_to_string(uri.path()).unwrap();
    assert_eq!(on_disk, "pub fn f() {}");
    assert_eq!(*first.lock(), vec![uri.clone()]);
    assert_eq!(*second.lock(), vec![uri]);
}

#[tokio::test]
async fn seed_file_writes_without_firing_events() {
    let fx = fixture();
    let seen = watch_created(&fx);

    let uri = fx.folder.seed_file("seeded.txt", "initial").await.unwrap();

    assert!(uri.path().exists());
    assert!(seen.lock().is_empty());
}

#[tokio::test]
async fn change_file_fires_changed_unconditionally() {
    let fx = fixture();
    let watcher = FileSystemWatcher::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sub = {
        let seen = Arc::clone(&seen);
        watcher
            .on_did_change()
            .subscribe(move |uri: &Uri| seen.lock().push(uri.clone()))
    };
    fx.watchers.write().push(watcher);

    fx.folder.seed_file("a.txt", "v1").await.unwrap();
    let uri = fx.folder.change_file("a.txt", "v2").await.unwrap();

    assert_eq!(std::fs::read_to_string(uri.path()).unwrap(), "v2");
    assert_eq!(*seen.lock(), vec![uri]);
    sub.dispose();
}

#[tokio::test]
async fn remove_file_deletes_and_fires_deleted() {
    let fx = fixture();
    let watcher = FileSystemWatcher::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sub = {
        let seen = Arc::clone(&seen);
        watcher
            .on_did_delete()
            .subscribe(move |uri: &Uri| seen.lock().push(uri.clone()))
    };
    fx.watchers.write().push(watcher);

    fx.folder.seed_file("doomed.txt", "bye").await.unwrap();
    let uri = fx.folder.remove_file("doomed.txt").await.unwrap();

    assert!(!uri.path().exists());
    assert_eq!(*seen.lock(), vec![uri]);
    sub.dispose();
}

#[tokio::test]
async fn io_failure_propagates_as_workspace_error() {
    let fx = fixture();
    let result = fx.folder.remove_file("never-existed.txt").await;
    assert!(matches!(result, Err(WorkspaceError::Io(_))));
}

#[tokio::test]
async fn mutations_with_no_watchers_are_dropped() {
    let fx = fixture();
    fx.folder.add_file("quiet.txt", "x").await.unwrap();
    fx.folder.change_file("quiet.txt", "y").await.unwrap();
    fx.folder.remove_file("quiet.txt").await.unwrap();
}
