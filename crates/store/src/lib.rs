//! In-memory reference implementations of the staffcore ports
//!
//! This crate provides:
//! - MemorySignatureStore: signature rows behind a `parking_lot::RwLock`
//! - MemoryDirectory: consultant records and alignment profiles
//! - Static and failing signal providers for tests and default wiring
//!
//! Production deployments substitute database-backed implementations of the
//! same port traits; everything here exists so the engine runs and tests
//! without one.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod directory;
pub mod memory;
pub mod providers;

pub use directory::MemoryDirectory;
pub use memory::MemorySignatureStore;
pub use providers::{
    FailingRanker, FailingReranker, FailingRetrieval, StaticRanker, StaticReranker,
    StaticRetrieval,
};
