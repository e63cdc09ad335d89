//! Article Cart Library
//!
//! Per-user shopping carts over an external product catalog, exposed as
//! MCP (Model Context Protocol) tools and a small REST API.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod mcp;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
