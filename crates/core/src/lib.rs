//! `natours-core`: record model and id bookkeeping.
//!
//! This crate contains **pure domain** logic (no I/O, no locking). Storage
//! backends in `natours-infra` wrap a [`RecordTable`] and decide where the
//! records live.

pub mod entity;
pub mod error;
pub mod id;
pub mod record;
pub mod table;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::RecordId;
pub use record::{Fields, Record, shallow_merge};
pub use table::{IdCheck, RecordTable};
