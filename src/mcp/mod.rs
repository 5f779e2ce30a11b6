//! Model Context Protocol (MCP) server implementation.
//!
//! This module provides an MCP server that exposes xliffer's document
//! operations to AI assistants over stdio.
//!
//! ## Module Structure
//!
//! - `helpers`: Loading, saving and result helpers shared by the tools
//! - `server`: Main MCP server implementation
//! - `types`: MCP parameter and result types

mod helpers;
mod server;
pub mod types;

pub use server::{XlifferMcpServer, run_server};
