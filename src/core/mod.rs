//! Core lookup engine.
//!
//! ## Module Structure
//!
//! - `data`: bundle tables and their entries
//! - `parsers`: JSON bundle file parsing and bundle directory scanning
//! - `loader`: per-locale table loaders (JSON files, in-memory tables)
//! - `bundle`: a bundle resolved along a locale's candidate chain
//! - `format`: positional `{n}` message formatting
//! - `resolver`: the lazily initialized, tiered resolver
//! - `context`: per-project configuration, resolver construction and checks

pub mod bundle;
pub mod context;
pub mod data;
pub mod format;
pub mod loader;
pub mod parsers;
pub mod resolver;

pub use bundle::Bundle;
pub use context::{ProjectContext, ProjectResolver};
pub use format::{MessagePattern, PatternError, Segment, format_message};
pub use loader::{BundleLoader, JsonBundleLoader, StaticBundleLoader};
pub use resolver::{Resolved, TieredResolver};
