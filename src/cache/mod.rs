//! Cache module for the on-disk price snapshot
//!
//! This module provides the file-backed store that decouples the single
//! periodic writer (the refresh cycle) from concurrent HTTP readers. Writes
//! are atomic at the filesystem level, so readers observe either the
//! previous or the new snapshot, never a partial one.

mod store;

pub use store::{default_path, CacheStore};
