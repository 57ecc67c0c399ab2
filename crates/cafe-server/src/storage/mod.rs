//! Storage layer
//!
//! Uses SQLite (embedded) for the single cafe table.

pub mod db;

pub use db::{CafeOrder, Database, StoreError};
