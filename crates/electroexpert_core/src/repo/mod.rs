//! Persistence adapter over whole-collection snapshots.
//!
//! # Responsibility
//! - Load and save complete record collections addressed by a fixed key.
//! - Keep SQLite and JSON encoding details out of the stores.
//!
//! # Invariants
//! - Writes always replace the whole collection; there is no partial update.
//! - An absent or unreadable snapshot loads as an empty collection.

pub mod collection_repo;
