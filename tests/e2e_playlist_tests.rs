//! End-to-end tests for listing, resolving and creating playlists.

mod common;

use common::*;
use muli_playlists::{DirEntry, EntryKind, NamespacePath, PlaylistError, SongSource};
use std::fs;
use std::path::PathBuf;

#[test]
fn test_created_playlist_listed_exactly_once() {
    let env = TestLibrary::new();
    env.library.create_playlist("jazz").unwrap();
    env.library.create_playlist("blues").unwrap();

    let playlists = env.library.list_playlists().unwrap();
    assert_eq!(names(&playlists), vec!["blues", "jazz"]);
    assert_eq!(
        playlists.iter().filter(|p| p.name == "jazz").count(),
        1
    );
    assert!(playlists.iter().all(|p| p.kind == EntryKind::Directory));
}

#[test]
fn test_new_playlist_has_no_songs() {
    let env = TestLibrary::new();
    env.library.create_playlist("jazz").unwrap();
    assert!(env.library.list_playlist_songs("jazz").unwrap().is_empty());
}

#[test]
fn test_rock_scenario_listing() {
    let env = TestLibrary::with_rock_playlist();
    let songs = env.library.list_playlist_songs(ROCK_PLAYLIST).unwrap();
    assert_eq!(
        songs,
        vec![DirEntry::file(TRACK_1), DirEntry::file(TRACK_2)]
    );
}

#[test]
fn test_rock_scenario_resolution() {
    let env = TestLibrary::with_rock_playlist();

    let track1 = env
        .library
        .resolve_song_path(ROCK_PLAYLIST, TRACK_1, env.mount_root())
        .unwrap();
    assert_eq!(track1, PathBuf::from(TRACK_1_LOCATION));

    let track2 = env
        .library
        .resolve_song_path(ROCK_PLAYLIST, TRACK_2, env.mount_root())
        .unwrap();
    assert_eq!(track2, env.playlists_root.join(ROCK_PLAYLIST).join(TRACK_2));
}

#[test]
fn test_dropped_song_listed_once_and_resolvable() {
    let env = TestLibrary::new();
    env.library.create_playlist("jazz").unwrap();
    let dropped = env.drop_file("jazz", "so_what.flac");

    let songs = env.library.list_playlist_songs("jazz").unwrap();
    assert_eq!(names(&songs), vec!["so_what.flac"]);

    let source = env
        .library
        .resolve_song_source("jazz", "so_what.flac", env.mount_root())
        .unwrap();
    assert_eq!(source, SongSource::DroppedFile(dropped));
}

#[test]
fn test_store_location_takes_precedence_over_drop_file() {
    let env = TestLibrary::with_rock_playlist();
    env.drop_file(ROCK_PLAYLIST, TRACK_1);

    let songs = env.library.list_playlist_songs(ROCK_PLAYLIST).unwrap();
    assert_eq!(names(&songs), vec![TRACK_1, TRACK_2]);

    let source = env
        .library
        .resolve_song_source(ROCK_PLAYLIST, TRACK_1, env.mount_root())
        .unwrap();
    assert_eq!(
        source,
        SongSource::ExternalLocation(PathBuf::from(TRACK_1_LOCATION))
    );
}

#[test]
fn test_listing_is_idempotent() {
    let env = TestLibrary::with_rock_playlist();
    env.library.create_playlist("jazz").unwrap();
    for song in ["c.mp3", "a.mp3", "b.mp3"] {
        env.drop_file(ROCK_PLAYLIST, song);
    }

    let first_playlists = env.library.list_playlists().unwrap();
    let first_songs = env.library.list_playlist_songs(ROCK_PLAYLIST).unwrap();
    assert_eq!(env.library.list_playlists().unwrap(), first_playlists);
    assert_eq!(
        env.library.list_playlist_songs(ROCK_PLAYLIST).unwrap(),
        first_songs
    );
    assert_eq!(
        names(&first_songs),
        vec![TRACK_1, "a.mp3", "b.mp3", "c.mp3", TRACK_2]
    );
}

#[test]
fn test_missing_song_is_not_found() {
    let env = TestLibrary::new();
    env.library.create_playlist("jazz").unwrap();

    let err = env
        .library
        .resolve_song_path("jazz", "missing.mp3", env.mount_root())
        .unwrap_err();
    assert!(matches!(err, PlaylistError::SongNotFound { .. }));
}

#[test]
fn test_empty_name_rejected_before_store_access() {
    let env = TestLibrary::new();
    let err = env.library.create_playlist("").unwrap_err();
    assert!(matches!(err, PlaylistError::InvalidName(_)));
    // Nothing written, not even the Playlists namespace
    assert_eq!(
        env.library
            .store()
            .list_children(&NamespacePath::playlists())
            .unwrap(),
        None
    );
    assert!(!env.playlists_root.exists());
}

#[test]
fn test_duplicate_playlist_rejected() {
    let env = TestLibrary::new();
    env.library.create_playlist("jazz").unwrap();
    let err = env.library.create_playlist("jazz").unwrap_err();
    assert!(matches!(err, PlaylistError::PlaylistAlreadyExists(_)));
}

#[test]
fn test_failed_drop_directory_leaves_no_playlist() {
    let env = TestLibrary::new();
    fs::create_dir_all(&env.playlists_root).unwrap();
    fs::write(env.playlists_root.join("blocked"), b"file").unwrap();

    let err = env.library.create_playlist("blocked").unwrap_err();
    assert!(matches!(err, PlaylistError::PartialFailure { .. }));
    assert!(env.library.list_playlists().unwrap().is_empty());
}

#[test]
fn test_playlists_persist_across_reopen() {
    let env = TestLibrary::with_rock_playlist();
    let reopened = env.reopen();

    assert_eq!(names(&reopened.list_playlists().unwrap()), vec![ROCK_PLAYLIST]);
    assert_eq!(
        reopened
            .resolve_song_path(ROCK_PLAYLIST, TRACK_1, env.mount_root())
            .unwrap(),
        PathBuf::from(TRACK_1_LOCATION)
    );
}

#[test]
fn test_same_song_in_two_playlists_is_independent() {
    let env = TestLibrary::with_rock_playlist();
    env.library.create_playlist("favorites").unwrap();
    env.library
        .add_song("favorites", TRACK_1, "/library/best/track1.mp3")
        .unwrap();

    assert_eq!(
        env.library
            .resolve_song_path("favorites", TRACK_1, env.mount_root())
            .unwrap(),
        PathBuf::from("/library/best/track1.mp3")
    );
    assert_eq!(
        env.library
            .resolve_song_path(ROCK_PLAYLIST, TRACK_1, env.mount_root())
            .unwrap(),
        PathBuf::from(TRACK_1_LOCATION)
    );
}
