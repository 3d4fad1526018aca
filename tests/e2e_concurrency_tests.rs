//! Concurrent listing and creation through a shared library.

mod common;

use common::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_creates_and_listings() {
    let env = TestLibrary::new();
    let library = Arc::new(env.library.clone());

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let library = library.clone();
            thread::spawn(move || {
                for i in 0..10 {
                    library
                        .create_playlist(&format!("writer{}-{:02}", w, i))
                        .unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let library = library.clone();
            thread::spawn(move || {
                let mut last_len = 0;
                for _ in 0..20 {
                    let playlists = library.list_playlists().unwrap();
                    let unique: HashSet<_> = playlists.iter().map(|p| p.name.clone()).collect();
                    assert_eq!(unique.len(), playlists.len());
                    // Committed playlists never disappear
                    assert!(playlists.len() >= last_len);
                    last_len = playlists.len();
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    let playlists = library.list_playlists().unwrap();
    assert_eq!(playlists.len(), 40);
}

#[test]
fn test_racing_creates_of_same_name_succeed_once() {
    let env = TestLibrary::new();
    let library = Arc::new(env.library.clone());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let library = library.clone();
            thread::spawn(move || library.create_playlist("jazz").is_ok())
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(successes, 1);
    assert_eq!(names(&library.list_playlists().unwrap()), vec!["jazz"]);
}
