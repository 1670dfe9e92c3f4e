//! # Validation Module
//!
//! Input validation utilities for Velora.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP layer (serde)                                           │
//! │  ├── Shape/type validation (deserialization)                           │
//! │  └── Rejects malformed JSON before handlers run                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Services (Rust)                                              │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints (hierarchy cascades)                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_ITEM_QUANTITY, MAX_NAME_LEN, MAX_ORDER_ITEMS, MAX_TITLE_LEN, MIN_PASSWORD_LEN};

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a category/subcategory/subgroup name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 50 characters
///
/// ## Example
/// ```rust
/// use velora_core::validation::validate_name;
///
/// assert!(validate_name("Footwear").is_ok());
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 100 characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates a price in cents.
pub fn validate_price_cents(price_cents: i64) -> ValidationResult<()> {
    if price_cents < 0 {
        return Err(ValidationError::Negative {
            field: "price_cents".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Order Validators
// =============================================================================

/// Validates a line item quantity.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 || quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Validates an order's line item count.
///
/// An order owns 1..N items; zero items would be a header with nothing under
/// it, which is exactly the partial state the placement transaction exists to
/// prevent.
pub fn validate_item_count(count: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::Empty {
            field: "items".to_string(),
        });
    }
    if count > MAX_ORDER_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_ORDER_ITEMS as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Admin Validators
// =============================================================================

/// Validates an admin email address.
///
/// Minimal structural check: one `@` with non-empty local part and a domain
/// containing a dot. Full RFC validation is out of scope.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected local@domain.tld".to_string(),
        });
    }

    Ok(())
}

/// Validates an admin password.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Footwear").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("  ").is_err());
        assert!(validate_name(&"x".repeat(50)).is_ok());
        assert!(validate_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Trail Runner Mk II").is_ok());
        assert!(validate_title(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(12999).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_item_count() {
        assert!(validate_item_count(1).is_ok());
        assert!(validate_item_count(0).is_err());
        assert!(validate_item_count(101).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("admin@example.com").is_ok());
        assert!(validate_email("noatsign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("admin@nodot").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
    }
}
