//! Identity resolution for staffcore
//!
//! This crate implements the write and read sides of identity resolution:
//! - normalize: canonicalization + SHA-256 hashing of identity fields
//! - reconcile: idempotent diff/apply of a consultant's signature set
//! - duplicates: per-consultant lookup and tenant-wide cluster discovery
//!
//! All state lives behind the `SignatureStore` and `ConsultantDirectory`
//! ports from `staffcore-core`; nothing here holds mutable state of its own.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod duplicates;
pub mod normalize;
pub mod reconcile;

pub use duplicates::DuplicateFinder;
pub use normalize::{desired_signatures, NormalizedSignature};
pub use reconcile::{ReconcileStats, SignatureReconciler};
