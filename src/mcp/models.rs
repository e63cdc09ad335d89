//! MCP Protocol Models and Constants
//!
//! This module contains the JSON-RPC envelope, tool names and the argument
//! shapes accepted by each tool.

use crate::cart::models::LineInput;
use serde::Deserialize;
use serde_json::Value;

// =============================================================================
// MCP Constants
// =============================================================================

/// Catalog search tool
pub const SEARCH_TOOL_NAME: &str = "search_articles";
/// Adds one or more lines to a cart
pub const ADD_TOOL_NAME: &str = "add_to_cart";
/// Shows the enriched cart
pub const SHOW_CART_TOOL_NAME: &str = "show_cart";
/// Removes a single article from a cart
pub const REMOVE_TOOL_NAME: &str = "remove_from_cart";
/// Replaces the quantity of a line
pub const UPDATE_QUANTITY_TOOL_NAME: &str = "update_cart_quantity";
/// Empties a cart
pub const CLEAR_TOOL_NAME: &str = "clear_cart";
/// Submits a cart as an order
pub const SUBMIT_TOOL_NAME: &str = "submit_order";
/// Server identifier
pub const SERVER_NAME: &str = "article-cart-rust";
/// Protocol version for MCP
pub const PROTOCOL_VERSION: &str = "2024-11-05";

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (should be "2.0")
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    pub params: Option<Value>,

    /// Request identifier
    pub id: Option<Value>,
}

// =============================================================================
// Tool Arguments
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchInput {
    pub term: String,
}

#[derive(Debug, Deserialize)]
pub struct AddToCartInput {
    pub username: String,
    pub items: Vec<LineInput>,
}

/// Arguments for tools that only name a cart owner.
#[derive(Debug, Deserialize)]
pub struct UserInput {
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartInput {
    pub username: String,
    pub article_number: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityInput {
    pub username: String,
    pub article_number: String,
    pub quantity: i64,
}
