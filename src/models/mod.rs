//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables.

/// Transaction ledger entry model
pub mod transaction;
