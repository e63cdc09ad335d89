//! MCP (Model Context Protocol) route handlers
//!
//! This module implements the Model Context Protocol handlers for the cart
//! service. It exports `handle_tool_call` publicly to make it accessible for tests.

use super::{helpers::*, models::*};
use crate::cart::{helpers::*, state::*};
use crate::error::ToolError;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing::{info, warn};

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_mcp).get(handle_mcp_sse))
        .route("/mcp", post(handle_mcp).get(handle_mcp_sse)) // Standard endpoint
        .route("/mcp/", post(handle_mcp).get(handle_mcp_sse)) // Trailing slash safety
}

/// Handle SSE (Server-Sent Events) handshake for GET requests
async fn handle_mcp_sse() -> impl IntoResponse {
    (
        [("content-type", "text/event-stream")],
        "event: endpoint\ndata: /mcp\n\n",
    )
}

/// Endpoint: POST /mcp
/// Handles the Model Context Protocol communication for POST requests.
async fn handle_mcp(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    // Parse JSON-RPC Request (POST)
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            warn!(error = %e.body_text(), "JSON-RPC parse error");
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, -32700, "Parse error")),
            )
                .into_response();
        }
    };

    let id = req.id.unwrap_or(Value::Null);
    let method_name = req.method.as_str();
    let params = req.params.unwrap_or(Value::Null);

    info!(method = method_name, id = %id, "MCP call");

    // Dispatch Method
    let response_body = match method_name {
        "initialize" => rpc_success(id, handle_initialize()),
        "notifications/initialized" => rpc_success(id, json!({})),
        "tools/list" => rpc_success(id, handle_tools_list()),
        "tools/call" => {
            let tool_name = params.get("name").and_then(|n| n.as_str()).unwrap_or("");
            let args = params.get("arguments").cloned().unwrap_or(Value::Null);

            match handle_tool_call(&state, tool_name, args).await {
                Ok(result) => rpc_success(id, result),
                Err(err) => {
                    warn!(tool = tool_name, error = %err, "Tool call failed");
                    rpc_error(id, -32602, err.to_string()) // Invalid params or internal error
                }
            }
        }
        "ping" => rpc_success(id, json!({})), // Optional but good for health checks
        _ => {
            warn!(method = method_name, "Unknown method");
            rpc_error(id, -32601, "Method not found")
        }
    };

    Json(response_body).into_response()
}

// =============================================================================
// MCP Method Handlers
// =============================================================================

/// Handles `initialize` request (Handshake).
fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": true }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

fn username_schema() -> Value {
    json!({ "type": "string", "minLength": 1, "description": "Cart owner" })
}

/// Handles `tools/list` request.
fn handle_tools_list() -> Value {
    json!({
        "tools": [
            {
                "name": SEARCH_TOOL_NAME,
                "title": "Search articles",
                "description": "Searches the product catalog and returns matching articles with prices.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "term": { "type": "string", "minLength": 1 }
                    },
                    "required": ["term"],
                    "additionalProperties": false
                }
            },
            {
                "name": ADD_TOOL_NAME,
                "title": "Add articles to cart",
                "description": "Adds the given articles to the user's cart. Quantities add up for articles already in the cart.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "username": username_schema(),
                        "items": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "required": ["articleNumber"],
                                "properties": {
                                    "articleNumber": { "type": "string", "minLength": 1 },
                                    "quantity": { "type": "integer", "minimum": 1, "maximum": MAX_LINE_QUANTITY, "default": 1 }
                                },
                                "additionalProperties": false
                            }
                        }
                    },
                    "required": ["username", "items"],
                    "additionalProperties": false
                }
            },
            {
                "name": SHOW_CART_TOOL_NAME,
                "title": "Show cart",
                "description": "Shows the user's cart with current descriptions and prices.",
                "inputSchema": {
                    "type": "object",
                    "properties": { "username": username_schema() },
                    "required": ["username"],
                    "additionalProperties": false
                }
            },
            {
                "name": REMOVE_TOOL_NAME,
                "title": "Remove article",
                "description": "Removes an article from the user's cart.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "username": username_schema(),
                        "articleNumber": { "type": "string", "minLength": 1 }
                    },
                    "required": ["username", "articleNumber"],
                    "additionalProperties": false
                }
            },
            {
                "name": UPDATE_QUANTITY_TOOL_NAME,
                "title": "Change quantity",
                "description": "Sets the quantity of an article in the user's cart, adding the article if needed.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "username": username_schema(),
                        "articleNumber": { "type": "string", "minLength": 1 },
                        "quantity": { "type": "integer", "minimum": 1, "maximum": MAX_LINE_QUANTITY }
                    },
                    "required": ["username", "articleNumber", "quantity"],
                    "additionalProperties": false
                }
            },
            {
                "name": CLEAR_TOOL_NAME,
                "title": "Clear cart",
                "description": "Removes every article from the user's cart.",
                "inputSchema": {
                    "type": "object",
                    "properties": { "username": username_schema() },
                    "required": ["username"],
                    "additionalProperties": false
                }
            },
            {
                "name": SUBMIT_TOOL_NAME,
                "title": "Submit order",
                "description": "Submits the user's cart as an order and empties the cart.",
                "inputSchema": {
                    "type": "object",
                    "properties": { "username": username_schema() },
                    "required": ["username"],
                    "additionalProperties": false
                }
            }
        ]
    })
}

/// Handles `tools/call` request (Business Logic).
pub async fn handle_tool_call(
    state: &AppState,
    name: &str,
    args: Value,
) -> Result<Value, ToolError> {
    match name {
        SEARCH_TOOL_NAME => handle_search_tool(state, args).await,
        ADD_TOOL_NAME => handle_add_to_cart_tool(state, args),
        SHOW_CART_TOOL_NAME => handle_show_cart_tool(state, args).await,
        REMOVE_TOOL_NAME => handle_remove_tool(state, args),
        UPDATE_QUANTITY_TOOL_NAME => handle_update_quantity_tool(state, args),
        CLEAR_TOOL_NAME => handle_clear_tool(state, args),
        SUBMIT_TOOL_NAME => handle_submit_tool(state, args),
        _ => Err(ToolError::UnknownTool(name.to_string())),
    }
}

/// Handles the search_articles tool. Catalog failures are reported to the caller.
async fn handle_search_tool(state: &AppState, args: Value) -> Result<Value, ToolError> {
    let input: SearchInput = serde_json::from_value(args)?;

    let articles: Vec<_> = state
        .catalog
        .search_catalog(&input.term)
        .await?
        .into_iter()
        .map(|details| state.images.summarize(details))
        .collect();

    let message = format!("Found {} article(s) for '{}'.", articles.len(), input.term);

    Ok(tool_result(
        message,
        json!({
            "term": input.term,
            "articles": articles
        }),
    ))
}

/// Handles the add_to_cart tool functionality
fn handle_add_to_cart_tool(state: &AppState, args: Value) -> Result<Value, ToolError> {
    let input: AddToCartInput = serde_json::from_value(args)?;
    validate_username(&input.username)?;
    let lines = validate_lines(input.items)?;

    let cart = state.carts.add_lines(&input.username, &lines);
    info!(
        username = %input.username,
        added = %format_line_summary(&lines),
        "Lines added"
    );

    let item_count = cart.item_count();
    let message = format!(
        "Cart of {} now has {} position(s), {} item(s) in total.",
        input.username,
        cart.positions.len(),
        item_count
    );

    Ok(tool_result(
        message,
        json!({
            "username": input.username,
            "positions": cart.positions,
            "itemCount": item_count
        }),
    ))
}

/// Handles the show_cart tool: stored lines merged with catalog data.
async fn handle_show_cart_tool(state: &AppState, args: Value) -> Result<Value, ToolError> {
    let input: UserInput = serde_json::from_value(args)?;
    validate_username(&input.username)?;

    let display = state
        .enrichment
        .enrich_user(&state.carts, &input.username)
        .await;

    let message = if display.positions.is_empty() {
        "Cart is empty.".to_string()
    } else {
        format!(
            "Cart of {} has {} position(s), {} item(s) in total.",
            input.username,
            display.positions.len(),
            display.total_positions
        )
    };

    Ok(tool_result(message, json!(display)))
}

fn handle_remove_tool(state: &AppState, args: Value) -> Result<Value, ToolError> {
    let input: RemoveFromCartInput = serde_json::from_value(args)?;
    validate_username(&input.username)?;
    validate_article_number(&input.article_number)?;

    let cart = state
        .carts
        .remove_line(&input.username, &input.article_number);
    info!(username = %input.username, article_number = %input.article_number, "Line removed");

    Ok(tool_result(
        format!("Removed {} from the cart.", input.article_number),
        json!({
            "username": input.username,
            "positions": cart.positions,
            "itemCount": cart.item_count()
        }),
    ))
}

fn handle_update_quantity_tool(state: &AppState, args: Value) -> Result<Value, ToolError> {
    let input: UpdateQuantityInput = serde_json::from_value(args)?;
    validate_username(&input.username)?;
    validate_article_number(&input.article_number)?;
    let quantity = validate_quantity(input.quantity)?;

    let cart = state
        .carts
        .set_line_quantity(&input.username, &input.article_number, quantity);
    info!(
        username = %input.username,
        article_number = %input.article_number,
        quantity,
        "Quantity set"
    );

    Ok(tool_result(
        format!("Set {} to {}.", input.article_number, quantity),
        json!({
            "username": input.username,
            "positions": cart.positions,
            "itemCount": cart.item_count()
        }),
    ))
}

fn handle_clear_tool(state: &AppState, args: Value) -> Result<Value, ToolError> {
    let input: UserInput = serde_json::from_value(args)?;
    validate_username(&input.username)?;

    state.carts.clear(&input.username);
    info!(username = %input.username, "Cart cleared");

    Ok(tool_result(
        "Cart cleared.",
        json!({
            "username": input.username,
            "positions": [],
            "itemCount": 0
        }),
    ))
}

/// Handles the submit_order tool functionality
fn handle_submit_tool(state: &AppState, args: Value) -> Result<Value, ToolError> {
    let input: UserInput = serde_json::from_value(args)?;
    validate_username(&input.username)?;

    let order = state.orders.submit(&input.username);

    let message = if order.lines.is_empty() {
        format!("Order {} submitted. The cart was empty.", order.order_id)
    } else {
        format!(
            "Order {} submitted: {}",
            order.order_id,
            format_line_summary(&order.lines)
        )
    };

    Ok(tool_result(
        message,
        json!({
            "username": input.username,
            "orderId": order.order_id,
            "items": order.lines
        }),
    ))
}
