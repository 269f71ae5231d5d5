//! Utility functions for evidence handling.
//!
//! - **Hashing**: streaming SHA-256 for file integrity
//! - **Atomic writes**: temp-then-rename JSON persistence for durable records
//! - **Compression**: zip packaging of a finished workspace
//! - **Summary**: aggregation of the manifest into run totals

/// Cryptographic hash calculation utilities
pub mod hash;

/// Atomic JSON persistence for durable records
pub mod atomic;

/// Workspace archive creation
pub mod compress;

/// Run summary aggregation
pub mod summary;
