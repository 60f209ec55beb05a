//! # Validation Module
//!
//! Business rule checks applied at the core's input boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Backend API                                                  │
//! │  └── Shape checks on write (outside this repo)                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: input.rs (Raw* → typed records)                              │
//! │  ├── Numeric coercion (string / float / integer → Decimal)             │
//! │  └── THIS MODULE: rate ranges, names, quantities                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: totals / gst / kot                                           │
//! │  └── Checked arithmetic, never NaN                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use hotelier_core::validation::{validate_item_name, validate_order_quantity};
//!
//! assert!(validate_item_name("Masala Tea").is_ok());
//! assert!(validate_order_quantity(3, "qty").is_ok());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest item name accepted on a kitchen ticket.
pub const MAX_ITEM_NAME_LEN: usize = 200;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a GST percentage.
///
/// ## Rules
/// - Must be at least 0
/// - Must be below 100 (a 100% rate would make inclusive extraction
///   take half the gross, which no GST slab does)
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use hotelier_core::validation::validate_tax_rate_percent;
///
/// assert!(validate_tax_rate_percent(Decimal::from(18), "taxPercent").is_ok());
/// assert!(validate_tax_rate_percent(Decimal::from(100), "taxPercent").is_err());
/// ```
pub fn validate_tax_rate_percent(percent: Decimal, field: &str) -> ValidationResult<()> {
    if percent < Decimal::ZERO || percent >= Decimal::ONE_HUNDRED {
        return Err(ValidationError::PercentOutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
            value: percent.normalize().to_string(),
        });
    }

    Ok(())
}

/// Validates an order quantity and narrows it to the stored width.
///
/// ## Rules
/// - Must not be negative
/// - Zero is allowed (a line kept on the order but emptied)
/// - Must fit in `u32`
pub fn validate_order_quantity(qty: i64, field: &str) -> ValidationResult<u32> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value: qty,
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an order item name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
