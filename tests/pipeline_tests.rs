//! Pipeline tests: drive the metadata workers directly with hand-picked paths.

use dirhash::pipeline::{
    check_for_first_error, create_pipeline_channels, path_to_entry, shutdown_pipeline_handles,
    spawn_metadata_workers, spawn_walk_thread,
};
use dirhash::{Entry, FingerprintError, FingerprintOpts};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Feed `paths` straight into a worker pool rooted at `root`; returns entries and the run's error check.
fn run_workers(
    root: &Path,
    paths: Vec<PathBuf>,
    workers: usize,
) -> (Vec<Entry>, Result<(), FingerprintError>) {
    let opts = FingerprintOpts {
        batch_size: 2,
        workers,
        ..Default::default()
    };
    let ch = create_pipeline_channels(root, &opts);
    let handles = spawn_metadata_workers(ch.path_rx, &ch.entry_tx, &ch.ctx, workers);
    drop(ch.entry_tx);

    let path_tx = ch.path_tx;
    let feeder = std::thread::spawn(move || {
        for p in paths {
            path_tx.send(p).unwrap();
        }
    });
    let entries: Vec<Entry> = ch.entry_rx.iter().collect();
    feeder.join().unwrap();
    for h in handles {
        h.join().unwrap();
    }
    let check = check_for_first_error(&ch.ctx.first_error, None);
    (entries, check)
}

#[test]
fn test_vanished_path_fails_with_stat_error() {
    let dir = TempDir::new().unwrap();
    let kept = dir.path().join("kept.txt");
    let gone = dir.path().join("gone.txt");
    fs::write(&kept, b"k").unwrap();
    fs::write(&gone, b"g").unwrap();
    // Discovered, then removed before metadata resolution.
    fs::remove_file(&gone).unwrap();

    let (entries, check) = run_workers(dir.path(), vec![kept.clone(), gone.clone()], 2);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, PathBuf::from("kept.txt"));
    match check {
        Err(FingerprintError::Stat { path, .. }) => assert_eq!(path, gone),
        other => panic!("expected stat error, got {other:?}"),
    }
}

#[test]
fn test_worker_continues_after_failure() {
    let dir = TempDir::new().unwrap();
    let mut paths = vec![dir.path().join("missing-0")];
    for i in 0..10 {
        let p = dir.path().join(format!("f{i}"));
        fs::write(&p, b"x").unwrap();
        paths.push(p);
    }
    let (entries, check) = run_workers(dir.path(), paths, 1);
    assert_eq!(entries.len(), 10);
    assert!(matches!(check, Err(FingerprintError::Stat { .. })));
}

#[test]
fn test_path_outside_root_is_relative_path_error() {
    let root = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    let stray = elsewhere.path().join("stray.txt");
    fs::write(&stray, b"s").unwrap();

    let (entries, check) = run_workers(root.path(), vec![stray.clone()], 3);
    assert!(entries.is_empty());
    match check {
        Err(FingerprintError::RelativePath { path, root: r }) => {
            assert_eq!(path, stray);
            assert_eq!(r, root.path());
        }
        other => panic!("expected relative path error, got {other:?}"),
    }
}

#[test]
fn test_only_first_of_many_errors_is_reported() {
    let dir = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = (0..20).map(|i| dir.path().join(format!("m{i}"))).collect();
    let opts = FingerprintOpts {
        batch_size: 4,
        workers: 4,
        ..Default::default()
    };
    let ch = create_pipeline_channels(dir.path(), &opts);
    let handles = spawn_metadata_workers(ch.path_rx, &ch.entry_tx, &ch.ctx, 4);
    drop(ch.entry_tx);
    for p in paths {
        ch.path_tx.send(p).unwrap();
    }
    drop(ch.path_tx);
    assert_eq!(ch.entry_rx.iter().count(), 0);
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(ch.ctx.first_error.discarded(), 19);
    assert!(ch.ctx.first_error.take().is_some());
    assert!(ch.ctx.first_error.take().is_none());
}

#[test]
fn test_path_to_entry_relative_and_dir_flag() {
    let dir = TempDir::new().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    let entry = path_to_entry(&sub, dir.path()).unwrap();
    assert_eq!(entry.path, PathBuf::from("sub"));
    assert!(entry.is_dir);
    assert!(entry.mtime_ns > 0);
}

#[test]
fn test_walk_thread_and_workers_end_to_end() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("x/y")).unwrap();
    fs::write(dir.path().join("x/y/z.txt"), b"z").unwrap();
    let root = dir.path().canonicalize().unwrap();
    let opts = FingerprintOpts {
        batch_size: 1,
        workers: 2,
        ..Default::default()
    };
    let ch = create_pipeline_channels(&root, &opts);
    let walk = spawn_walk_thread(ch.path_tx, ch.ctx.clone(), false);
    let workers = spawn_metadata_workers(ch.path_rx, &ch.entry_tx, &ch.ctx, 2);
    drop(ch.entry_tx);
    let mut paths: Vec<PathBuf> = ch.entry_rx.iter().map(|e| e.path).collect();
    paths.sort();
    assert_eq!(shutdown_pipeline_handles(walk, workers).unwrap(), 3);
    assert!(check_for_first_error(&ch.ctx.first_error, None).is_ok());
    assert_eq!(
        paths,
        vec![
            PathBuf::from("x"),
            PathBuf::from("x/y"),
            PathBuf::from("x/y/z.txt")
        ]
    );
}
