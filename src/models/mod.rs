//! Value models stored by cache callers
//!
//! The cache itself is generic; these are the records the host puts in it.

pub mod record;

pub use record::PasteRecord;
