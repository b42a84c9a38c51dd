//! Core data types shared across the crate.

pub mod bookmark;
pub mod errors;
pub mod exchange;
pub mod notify;
pub mod preferences;
