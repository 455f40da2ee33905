//! Klaxon Storage - Durable repository boundary
//!
//! The durable store is an external collaborator: the pipeline only knows
//! the [`AlarmRepository`] trait. Implementations own their own retry and
//! timeout policy; the trait surfaces failures as [`StorageError`] with
//! enough shape (transient I/O vs. integrity violation) for callers to
//! pick a policy.
//!
//! [`MemoryRepository`] is the in-process implementation used by the dev
//! server profile and by tests.

mod error;
mod memory;
mod repository;

pub use error::{Result, StorageError};
pub use memory::MemoryRepository;
pub use repository::AlarmRepository;
