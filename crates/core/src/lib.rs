//! Domain layer for the takenotes backend.
//!
//! Pure types, validation rules, and the error taxonomy shared by the
//! database and HTTP crates. Nothing in this crate performs I/O.

pub mod categories;
pub mod error;
pub mod notes;
pub mod types;
