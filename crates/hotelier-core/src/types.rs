//! # Domain Types
//!
//! Records the reporting core consumes and produces.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌─────────────────┐   ┌────────────────┐   │
//! │  │  BookingAggregate    │   │  InvoiceRecord  │   │ OrderLineItem  │   │
//! │  │  ──────────────────  │   │  ─────────────  │   │ ─────────────  │   │
//! │  │  roomTokens    [..]  │   │  totalAmount    │   │ name (key)     │   │
//! │  │  serviceTokens [..]  │   │  taxPercent     │   │ qty            │   │
//! │  │  foodTokens    [..]  │   │  payableAmount  │   └───────┬────────┘   │
//! │  │  paymentTokens [..]  │   └─────────────────┘           │ diff       │
//! │  │  advancePayment?     │                                 ▼            │
//! │  └──────────────────────┘   ┌─────────────────┐   ┌────────────────┐   │
//! │                             │ ReportedTaxRow  │   │ ChangeRecord   │   │
//! │  ┌──────────────────────┐   │  taxableAmount  │   │ name           │   │
//! │  │  TaxRate (percent)   │   │  tax (amount)   │   │ deltaLabel     │   │
//! │  │  0 <= rate < 100     │   │  payableAmount  │   │ kind           │   │
//! │  └──────────────────────┘   └─────────────────┘   └────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are built fresh per report render from data the API layer already
//! fetched, read once, and dropped. Nothing here is mutated or persisted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::validate_tax_rate_percent;

// =============================================================================
// Tax Rate
// =============================================================================

/// A combined GST rate in percent (`18` means 18%).
///
/// ## Invariant
/// `0 <= rate < 100`, checked on construction and on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, TS)]
#[ts(export)]
pub struct TaxRate(#[ts(type = "string")] Decimal);

impl TaxRate {
    /// Creates a tax rate from a percentage.
    pub fn from_percent(percent: Decimal) -> Result<Self, ValidationError> {
        validate_tax_rate_percent(percent, "taxRatePercent")?;
        Ok(TaxRate(percent))
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for TaxRate {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        TaxRate::from_percent(value)
    }
}

impl From<TaxRate> for Decimal {
    fn from(rate: TaxRate) -> Self {
        rate.0
    }
}

/// Serialized as the bare percentage, like any other decimal.
impl Serialize for TaxRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for TaxRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let percent = <Decimal as Deserialize>::deserialize(deserializer)?;
        TaxRate::from_percent(percent).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Booking
// =============================================================================

/// A billable component of a booking: a room night, a service, a food order.
///
/// `amount` is the token's pre-computed total; the aggregator never
/// re-derives line tax from `tax_rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MonetaryLineItem {
    pub amount: Money,
    #[serde(rename = "taxRatePercent", default)]
    pub tax_rate: TaxRate,
}

impl MonetaryLineItem {
    /// A line item with no tax rate attached.
    pub fn untaxed(amount: Money) -> Self {
        MonetaryLineItem {
            amount,
            tax_rate: TaxRate::zero(),
        }
    }
}

/// A payment received against a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentRecord {
    pub amount: Money,
    /// Free-form method label from the API ("cash", "upi", "card", ...).
    #[serde(default)]
    pub method: String,
    /// Informational only; totals never depend on it.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl PaymentRecord {
    /// A payment with no method or timestamp recorded.
    pub fn of(amount: Money) -> Self {
        PaymentRecord {
            amount,
            method: String::new(),
            timestamp: None,
        }
    }
}

/// Everything billed and paid on one booking.
///
/// Absent collections deserialize as empty and the advance payment as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct BookingAggregate {
    pub room_tokens: Vec<MonetaryLineItem>,
    pub service_tokens: Vec<MonetaryLineItem>,
    pub food_tokens: Vec<MonetaryLineItem>,
    pub payment_tokens: Vec<PaymentRecord>,
    /// Applied once, on top of `payment_tokens`.
    pub advance_payment: Option<PaymentRecord>,
}

// =============================================================================
// Invoices
// =============================================================================

/// An already-taxed invoice carrying one combined GST percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceRecord {
    /// Tax-inclusive gross.
    pub total_amount: Money,
    #[serde(default)]
    pub tax_percent: TaxRate,
    pub payable_amount: Money,
}

/// One row of an invoice report list, as stored by the backend.
///
/// `tax` is an amount, not a rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportedTaxRow {
    pub taxable_amount: Money,
    pub tax: Money,
    pub payable_amount: Money,
}

// =============================================================================
// Orders
// =============================================================================

/// A named quantity in an order snapshot. `name` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLineItem {
    pub name: String,
    pub qty: u32,
}

impl OrderLineItem {
    pub fn new(name: impl Into<String>, qty: u32) -> Self {
        OrderLineItem {
            name: name.into(),
            qty,
        }
    }
}

/// What happened to an item between two order snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChangeKind {
    /// Not in the previous ticket.
    New,
    /// Quantity went up or down.
    Update,
    /// Dropped from the order.
    Cancel,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::New => write!(f, "new"),
            ChangeKind::Update => write!(f, "update"),
            ChangeKind::Cancel => write!(f, "cancel"),
        }
    }
}

/// One line of a KOT delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChangeRecord {
    pub name: String,
    /// Signed textual quantity: `"+2"`, `"-1"`, `"0"`.
    pub delta_label: String,
    pub kind: ChangeKind,
}

impl ChangeRecord {
    pub fn new(name: impl Into<String>, delta_label: impl Into<String>, kind: ChangeKind) -> Self {
        ChangeRecord {
            name: name.into(),
            delta_label: delta_label.into(),
            kind,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
