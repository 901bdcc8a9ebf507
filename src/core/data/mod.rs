//! Core data types for bundle tables.
//!
//! ## Module Structure
//!
//! - `message`: table and entry types (BundleTable, MessageEntry, ValueType)

pub mod message;

pub use message::{BundleTable, MessageContext, MessageEntry, MessageLocation, ValueType};
