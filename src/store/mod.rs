pub mod document;
pub mod keys;

pub use document::{DocumentStore, StoreChange};
