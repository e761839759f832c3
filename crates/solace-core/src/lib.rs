//! solace-core
//!
//! Pure domain types shared across the Solace intake system: typed field
//! paths, the in-memory form state for one wizard instance, and date
//! normalization. No I/O — this is the shared vocabulary of the system.

pub mod dates;
pub mod error;
pub mod fields;
