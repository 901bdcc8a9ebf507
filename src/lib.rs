//! restext - tiered, locale-aware resource bundle lookup
//!
//! Messages are looked up by key through an ordered list of bundles: a
//! specific bundle first, then a common bundle shared across tools. Bundles
//! are loaded lazily on the first lookup, for the locale current at that
//! moment, and templates support positional `{n}` substitution.
//!
//! ```no_run
//! use restext::{core::{JsonBundleLoader, TieredResolver}, locale::Locale};
//!
//! let resolver = TieredResolver::new(
//!     Locale::from_env().unwrap_or_default(),
//!     JsonBundleLoader::new("./bundles"),
//!     "doclets.common",
//!     "doclets.html",
//! );
//! let text = resolver.resolve_formatted("doclet.Generating_0", &[&"index.html"])?;
//! # Ok::<(), restext::error::ResourceError>(())
//! ```
//!
//! ## Module Structure
//!
//! - `core`: bundle loading, locale chains, message formatting, the resolver
//! - `locale`: locale parsing and candidate chains
//! - `error`: lookup and loading errors
//! - `config`: configuration file loading
//! - `issues` / `rules`: bundle checks
//! - `cli`: command-line interface
//! - `mcp`: Model Context Protocol server
//! - `logging`: tracing subscriber setup

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod issues;
pub mod locale;
pub mod logging;
pub mod mcp;
pub mod rules;
