//! Collection stores and first-run seed data.
//!
//! # Responsibility
//! - Own the in-memory, most-recent-first record sequences.
//! - Re-persist the whole collection after every mutation.
//!
//! # Invariants
//! - A mutation either applies and persists, or leaves memory untouched.
//! - Seeding only happens when the persisted collection is empty at open.

pub mod schematic_service;
pub mod seed;
pub mod settings_service;
pub mod task_service;
