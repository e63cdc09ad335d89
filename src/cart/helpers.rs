//! Shopping Cart Business Logic Helpers
//!
//! This module contains the pure line-merging rules used by the store,
//! caller-side validation, and formatting helpers.

use super::models::{Cart, CartLine, LineInput};
use crate::error::CartError;

/// Upper bound accepted for a single requested quantity.
pub const MAX_LINE_QUANTITY: i64 = 9999;

/// Adds `quantity` to the line for `article_number`, appending a new line if
/// the article is not in the cart yet.
///
/// Quantities are additive and saturate at `u32::MAX`. Existing lines keep
/// their position.
pub fn merge_line(cart: &mut Cart, article_number: &str, quantity: u32) {
    if let Some(existing) = cart
        .positions
        .iter_mut()
        .find(|l| l.article_number == article_number)
    {
        existing.quantity = existing.quantity.saturating_add(quantity);
    } else {
        cart.positions.push(CartLine::new(article_number, quantity));
    }
}

/// Folds `lines` into `cart` in order, with `merge_line` semantics for each.
pub fn merge_lines(cart: &mut Cart, lines: &[CartLine]) {
    for line in lines {
        merge_line(cart, &line.article_number, line.quantity);
    }
}

/// Produces a human-readable one-line summary for a list of cart lines.
///
/// Example output: `"2x 095210, 1x 100457"`.
pub fn format_line_summary(lines: &[CartLine]) -> String {
    lines
        .iter()
        .map(|l| format!("{}x {}", l.quantity, l.article_number))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Validation
// =============================================================================

/// Rejects empty or whitespace-only user identities.
pub fn validate_username(username: &str) -> Result<(), CartError> {
    if username.trim().is_empty() {
        return Err(CartError::Validation("username must not be empty".into()));
    }
    Ok(())
}

/// Rejects empty or whitespace-only article numbers.
pub fn validate_article_number(article_number: &str) -> Result<(), CartError> {
    if article_number.trim().is_empty() {
        return Err(CartError::Validation(
            "articleNumber must not be empty".into(),
        ));
    }
    if matches!(article_number.trim(), "." | "..") {
        return Err(CartError::Validation(format!(
            "articleNumber '{article_number}' is not a valid article number"
        )));
    }
    Ok(())
}

/// Accepts `1..=MAX_LINE_QUANTITY` and narrows it for the store.
pub fn validate_quantity(quantity: i64) -> Result<u32, CartError> {
    if quantity <= 0 {
        return Err(CartError::Validation(format!(
            "quantity must be a positive integer, got {quantity}"
        )));
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(CartError::Validation(format!(
            "quantity {quantity} exceeds maximum allowed ({MAX_LINE_QUANTITY})"
        )));
    }
    u32::try_from(quantity).map_err(|e| CartError::Validation(e.to_string()))
}

/// Validates a whole batch. Any invalid entry rejects the batch.
pub fn validate_lines(items: Vec<LineInput>) -> Result<Vec<CartLine>, CartError> {
    items
        .into_iter()
        .map(|item| {
            validate_article_number(&item.article_number)?;
            let quantity = validate_quantity(item.quantity)?;
            Ok(CartLine::new(item.article_number, quantity))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_line_is_additive() {
        let mut cart = Cart::default();
        merge_line(&mut cart, "095210", 1);
        merge_line(&mut cart, "095210", 2);

        assert_eq!(cart.positions, vec![CartLine::new("095210", 3)]);
    }

    #[test]
    fn test_merge_lines_folds_duplicates_in_order() {
        let mut cart = Cart::default();
        merge_lines(
            &mut cart,
            &[
                CartLine::new("A", 1),
                CartLine::new("B", 2),
                CartLine::new("A", 3),
            ],
        );

        assert_eq!(
            cart.positions,
            vec![CartLine::new("A", 4), CartLine::new("B", 2)]
        );
    }

    #[test]
    fn test_merge_line_saturates() {
        let mut cart = Cart {
            positions: vec![CartLine::new("A", u32::MAX - 1)],
        };
        merge_line(&mut cart, "A", 5);
        assert_eq!(cart.positions[0].quantity, u32::MAX);
    }

    #[test]
    fn test_format_line_summary() {
        let lines = vec![CartLine::new("095210", 2), CartLine::new("100457", 1)];
        assert_eq!(format_line_summary(&lines), "2x 095210, 1x 100457");
        assert_eq!(format_line_summary(&[]), "");
    }

    #[test]
    fn test_validate_quantity_bounds() {
        assert_eq!(validate_quantity(1), Ok(1));
        assert_eq!(validate_quantity(MAX_LINE_QUANTITY), Ok(9999));
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-2).is_err());
        assert!(validate_quantity(MAX_LINE_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_identifiers() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_article_number("095210").is_ok());
        assert!(validate_article_number("").is_err());
    }

    #[test]
    fn test_validate_article_number_rejects_dot_segments() {
        assert!(validate_article_number(".").is_err());
        assert!(validate_article_number("..").is_err());
        assert!(validate_article_number(" .. ").is_err());
        assert!(validate_article_number("1.5").is_ok());
    }

    #[test]
    fn test_validate_lines_rejects_whole_batch() {
        let items = vec![
            LineInput {
                article_number: "A".into(),
                quantity: 1,
            },
            LineInput {
                article_number: "B".into(),
                quantity: 0,
            },
        ];
        assert!(validate_lines(items).is_err());

        let items = vec![LineInput {
            article_number: "A".into(),
            quantity: 2,
        }];
        assert_eq!(validate_lines(items), Ok(vec![CartLine::new("A", 2)]));
    }
}
