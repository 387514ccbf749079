//! Persistence Layer
//!
//! SQLite storage for the catalog and user accounts

pub mod sqlite;
