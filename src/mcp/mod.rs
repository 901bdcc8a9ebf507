//! Model Context Protocol (MCP) server.
//!
//! Exposes lookups and bundle checks to AI assistants over stdio.
//!
//! - `server`: Tool router and stdio entry point
//! - `types`: Tool parameters and JSON results

mod server;
pub mod types;

pub use server::{RestextMcpServer, run_server};
