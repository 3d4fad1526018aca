//! Common test infrastructure
//!
//! Tests should only import from this module.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::TestLibrary;
//!
//! #[test]
//! fn test_list_playlists() {
//!     let env = TestLibrary::new();
//!     env.library.create_playlist("jazz").unwrap();
//!     assert_eq!(env.library.list_playlists().unwrap().len(), 1);
//! }
//! ```

mod fixtures;

pub use fixtures::*;
