//! # Error Types
//!
//! Domain-specific error types for hotelier-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  hotelier-core errors (this file)                                      │
//! │  ├── CoreError        - Input coercion, arithmetic, duplicate items    │
//! │  └── ValidationError  - Business rule violations                       │
//! │                                                                         │
//! │  hotelier-report errors (app crate)                                    │
//! │  └── ConfigError      - report.toml / environment problems             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (binary edge) → stderr     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field in the message (`roomTokens[2].amount`)
//! 3. The core never logs an error, it returns it
//! 4. A NaN or Infinity never reaches a report, it becomes `InvalidInput`

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core reporting errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A numeric field could not be turned into an exact decimal.
    ///
    /// ## When This Occurs
    /// - The API sent `"amount": "abc"` or `"amount": ""`
    /// - A float arrived as NaN or Infinity
    /// - A required number (token amount, order quantity) is missing
    /// - An accumulated total overflowed the decimal range
    ///
    /// ## User Workflow
    /// ```text
    /// Room report render
    ///      │
    ///      ▼
    /// compute_raw_booking_totals(raw)
    ///      │
    ///      ▼
    /// InvalidInput { field: "roomTokens[1].amount", reason: "not a number: \"abc\"" }
    ///      │
    ///      ▼
    /// Caller shows a placeholder instead of "NaN"
    /// ```
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// The same item name appears twice in one order snapshot and the
    /// configured duplicate policy is `Reject`.
    #[error("Duplicate item '{name}' in order snapshot")]
    DuplicateItem { name: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Arithmetic overflow while accumulating `field`.
    pub(crate) fn overflow(field: impl Into<String>) -> Self {
        CoreError::invalid_input(field, "arithmetic overflow")
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Business rule violations found at the input boundary.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Percentage is outside the half-open range `[min, max)`.
    #[error("{field} must be at least {min} and below {max}, got {value}")]
    PercentOutOfRange {
        field: String,
        min: u32,
        max: u32,
        value: String,
    },

    /// Value must not be negative.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: i64 },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
