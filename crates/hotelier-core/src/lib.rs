//! # hotelier-core: Pure Reporting Logic for Hotelier
//!
//! The arithmetic and diffing behind the hotel / restaurant report pages,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Hotelier Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Report pages / hotelier-report                  │   │
//! │  │   Booking report ─► Invoice report ─► Sales detail ─► KOT print │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ records already fetched from the API  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ hotelier-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐       │   │
//! │  │   │  input   │─►│  totals  │  │   gst    │  │   kot    │       │   │
//! │  │   │ Raw* →   │  │ Booking  │  │ SGST /   │  │ Order    │       │   │
//! │  │   │ typed    │  │ Totals   │  │ CGST     │  │ deltas   │       │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO RENDERING • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (BookingAggregate, InvoiceRecord, OrderLineItem, ...)
//! - [`money`] - Exact decimal Money type
//! - [`input`] - Loosely-typed API records and their conversion
//! - [`totals`] - Booking totals and booking report summaries
//! - [`gst`] - Inclusive GST extraction and reported SGST/CGST splits
//! - [`kot`] - Kitchen order ticket deltas
//! - [`config`] - Rounding and duplicate-name settings
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output; safe to call from anywhere
//! 2. **No I/O**: files, environment, network and formatting stay outside
//! 3. **Round Once**: full precision inside, rounded at each function's output
//! 4. **Explicit Errors**: a bad number is an `InvalidInput`, never a "NaN" on paper
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use hotelier_core::{split_gst_inclusive, Money, TaxRate};
//!
//! let rate = TaxRate::from_percent(Decimal::from(18)).unwrap();
//! let split = split_gst_inclusive(Money::from_major(1180), rate).unwrap();
//!
//! assert_eq!(split.base_amount.to_string(), "1000.00");
//! assert_eq!(split.sgst.to_string(), "90.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod gst;
pub mod input;
pub mod kot;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use hotelier_core::Money` instead of
// `use hotelier_core::money::Money`

pub use config::{DuplicatePolicy, KotConfig, ReportConfig, RoundingMode};
pub use error::{CoreError, CoreResult, ValidationError};
pub use gst::{
    split_gst_inclusive, split_gst_inclusive_with, split_gst_invoice, split_gst_invoice_with,
    split_gst_reported, split_gst_reported_with, summarize_invoice_report, GstBreakdown,
    InvoiceReportTotals,
};
pub use input::{RawBooking, RawInvoice, RawNumber, RawOrderItem, RawReportedTaxRow};
pub use kot::{diff_orders, diff_orders_with, diff_snapshots, KotSummary, OrderSnapshot};
pub use money::Money;
pub use totals::{
    compute_booking_totals, compute_booking_totals_with, compute_raw_booking_totals,
    summarize_bookings, BookingReportSummary, BookingTotals,
};
pub use types::*;
