//! # Input Boundary
//!
//! Loosely-typed mirrors of the API records and their conversion into the
//! strongly-typed domain records.
//!
//! The backend is a generic content API: numbers arrive as JSON integers,
//! floats or strings, optional fields come and go. Every defaulting rule lives
//! here, once.
//!
//! ## Defaulting Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field shape                          Result                            │
//! │  ───────────────────────────────────  ──────────────────────────────    │
//! │  collection absent / null             empty Vec                         │
//! │  advancePayment absent / null         None                              │
//! │  advancePayment.amount absent         0                                 │
//! │  taxRatePercent / tax absent          0                                 │
//! │  token amount / order qty absent      InvalidInput (would render NaN)   │
//! │  "12.50", 12.5, 12                    exact decimal                     │
//! │  "abc", "", NaN, Infinity             InvalidInput naming the field     │
//! │  order qty 2.5                        InvalidInput                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{
    BookingAggregate, InvoiceRecord, MonetaryLineItem, OrderLineItem, PaymentRecord,
    ReportedTaxRow, TaxRate,
};
use crate::validation::{validate_item_name, validate_order_quantity, validate_tax_rate_percent};

// =============================================================================
// Raw Number
// =============================================================================

/// A number as the API sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    /// Coerces to an exact decimal amount.
    pub fn to_money(&self, field: &str) -> CoreResult<Money> {
        match self {
            RawNumber::Integer(value) => Ok(Money::from_major(*value)),
            RawNumber::Float(value) => Money::try_from_f64(*value, field),
            RawNumber::Text(text) => Money::parse(text, field),
        }
    }

    /// Coerces to a GST percentage in `[0, 100)`.
    pub fn to_tax_rate(&self, field: &str) -> CoreResult<TaxRate> {
        let percent = self.to_money(field)?.decimal();
        validate_tax_rate_percent(percent, field)?;
        Ok(TaxRate::from_percent(percent)?)
    }

    /// Coerces to a whole number; fractional values are rejected.
    pub fn to_integer(&self, field: &str) -> CoreResult<i64> {
        if let RawNumber::Integer(value) = self {
            return Ok(*value);
        }

        let value = self.to_money(field)?.decimal();
        if !value.fract().is_zero() {
            return Err(CoreError::invalid_input(
                field,
                format!("must be a whole number, got {}", value),
            ));
        }

        value
            .to_i64()
            .ok_or_else(|| CoreError::invalid_input(field, format!("out of range: {}", value)))
    }
}

impl From<i64> for RawNumber {
    fn from(value: i64) -> Self {
        RawNumber::Integer(value)
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Float(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

fn required_money(value: &Option<RawNumber>, field: &str) -> CoreResult<Money> {
    value
        .as_ref()
        .ok_or_else(|| CoreError::invalid_input(field, "is required"))?
        .to_money(field)
}

fn optional_money(value: &Option<RawNumber>, field: &str) -> CoreResult<Money> {
    value
        .as_ref()
        .map_or(Ok(Money::ZERO), |number| number.to_money(field))
}

fn optional_rate(value: &Option<RawNumber>, field: &str) -> CoreResult<TaxRate> {
    value
        .as_ref()
        .map_or(Ok(TaxRate::zero()), |number| number.to_tax_rate(field))
}

// =============================================================================
// Booking Records
// =============================================================================

/// A room / service / food token as sent by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    #[serde(default)]
    pub amount: Option<RawNumber>,
    #[serde(default, alias = "taxPercent", alias = "tax")]
    pub tax_rate_percent: Option<RawNumber>,
}

impl RawLineItem {
    fn into_line_item(self, field: &str) -> CoreResult<MonetaryLineItem> {
        Ok(MonetaryLineItem {
            amount: required_money(&self.amount, &format!("{}.amount", field))?,
            tax_rate: optional_rate(&self.tax_rate_percent, &format!("{}.taxRatePercent", field))?,
        })
    }
}

/// A payment as sent by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPayment {
    #[serde(default)]
    pub amount: Option<RawNumber>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl RawPayment {
    fn into_payment(self, amount: Money) -> PaymentRecord {
        PaymentRecord {
            amount,
            method: self.method.unwrap_or_default(),
            timestamp: self.timestamp,
        }
    }
}

/// A booking as sent by the API; any collection may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBooking {
    pub room_tokens: Option<Vec<RawLineItem>>,
    pub service_tokens: Option<Vec<RawLineItem>>,
    pub food_tokens: Option<Vec<RawLineItem>>,
    pub payment_tokens: Option<Vec<RawPayment>>,
    pub advance_payment: Option<RawPayment>,
}

fn convert_tokens(tokens: Option<Vec<RawLineItem>>, field: &str) -> CoreResult<Vec<MonetaryLineItem>> {
    tokens
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, token)| token.into_line_item(&format!("{}[{}]", field, index)))
        .collect()
}

impl TryFrom<RawBooking> for BookingAggregate {
    type Error = CoreError;

    fn try_from(raw: RawBooking) -> Result<Self, Self::Error> {
        let payment_tokens = raw
            .payment_tokens
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, payment)| {
                let amount =
                    required_money(&payment.amount, &format!("paymentTokens[{}].amount", index))?;
                Ok(payment.into_payment(amount))
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let advance_payment = raw
            .advance_payment
            .map(|payment| {
                let amount = optional_money(&payment.amount, "advancePayment.amount")?;
                Ok::<_, CoreError>(payment.into_payment(amount))
            })
            .transpose()?;

        Ok(BookingAggregate {
            room_tokens: convert_tokens(raw.room_tokens, "roomTokens")?,
            service_tokens: convert_tokens(raw.service_tokens, "serviceTokens")?,
            food_tokens: convert_tokens(raw.food_tokens, "foodTokens")?,
            payment_tokens,
            advance_payment,
        })
    }
}

// =============================================================================
// Invoice Records
// =============================================================================

/// An invoice as sent by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInvoice {
    #[serde(default)]
    pub total_amount: Option<RawNumber>,
    #[serde(default, alias = "tax")]
    pub tax_percent: Option<RawNumber>,
    #[serde(default)]
    pub payable_amount: Option<RawNumber>,
}

impl TryFrom<RawInvoice> for InvoiceRecord {
    type Error = CoreError;

    fn try_from(raw: RawInvoice) -> Result<Self, Self::Error> {
        Ok(InvoiceRecord {
            total_amount: required_money(&raw.total_amount, "totalAmount")?,
            tax_percent: optional_rate(&raw.tax_percent, "taxPercent")?,
            payable_amount: required_money(&raw.payable_amount, "payableAmount")?,
        })
    }
}

/// An invoice report row as sent by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReportedTaxRow {
    #[serde(default)]
    pub taxable_amount: Option<RawNumber>,
    #[serde(default)]
    pub tax: Option<RawNumber>,
    #[serde(default)]
    pub payable_amount: Option<RawNumber>,
}

impl RawReportedTaxRow {
    /// Converts with field names prefixed by `field` (e.g. `rows[3]`).
    pub fn into_row(self, field: &str) -> CoreResult<ReportedTaxRow> {
        Ok(ReportedTaxRow {
            taxable_amount: required_money(&self.taxable_amount, &format!("{}.taxableAmount", field))?,
            tax: optional_money(&self.tax, &format!("{}.tax", field))?,
            payable_amount: required_money(&self.payable_amount, &format!("{}.payableAmount", field))?,
        })
    }
}

impl TryFrom<RawReportedTaxRow> for ReportedTaxRow {
    type Error = CoreError;

    fn try_from(raw: RawReportedTaxRow) -> Result<Self, Self::Error> {
        raw.into_row("row")
    }
}

/// Converts a whole invoice report list, naming rows by index on failure.
pub fn reported_rows_from_raw(rows: Vec<RawReportedTaxRow>) -> CoreResult<Vec<ReportedTaxRow>> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| row.into_row(&format!("rows[{}]", index)))
        .collect()
}

// =============================================================================
// Order Records
// =============================================================================

/// An order line as sent by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOrderItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "quantity")]
    pub qty: Option<RawNumber>,
}

impl RawOrderItem {
    /// Converts with field names prefixed by `field` (e.g. `old[0]`).
    pub fn into_item(self, field: &str) -> CoreResult<OrderLineItem> {
        let name = self.name.unwrap_or_default();
        validate_item_name(&name)?;

        let qty_field = format!("{}.qty", field);
        let qty = self
            .qty
            .as_ref()
            .ok_or_else(|| CoreError::invalid_input(&qty_field, "is required"))?
            .to_integer(&qty_field)?;
        let qty = validate_order_quantity(qty, &qty_field)?;

        Ok(OrderLineItem { name, qty })
    }
}

/// Converts an order snapshot, naming items as `label[index]` on failure.
pub fn order_items_from_raw(items: Vec<RawOrderItem>, label: &str) -> CoreResult<Vec<OrderLineItem>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| item.into_item(&format!("{}[{}]", label, index)))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_raw_number_shapes() {
        let parsed: Vec<RawNumber> = serde_json::from_str(r#"[12, 12.5, "12.50"]"#).unwrap();
        assert_eq!(parsed[0], RawNumber::Integer(12));
        assert_eq!(parsed[1], RawNumber::Float(12.5));
        assert_eq!(parsed[2], RawNumber::Text("12.50".to_string()));

        for number in &parsed[1..] {
            assert_eq!(number.to_money("amount").unwrap().decimal(), dec!(12.5));
        }
    }

    #[test]
    fn test_raw_number_rejects_garbage() {
        assert!(RawNumber::from("abc").to_money("amount").is_err());
        assert!(RawNumber::from("").to_money("amount").is_err());
        assert!(RawNumber::from("NaN").to_money("amount").is_err());
        assert!(RawNumber::from(f64::NAN).to_money("amount").is_err());
        assert!(RawNumber::from(f64::INFINITY).to_money("amount").is_err());
    }

    #[test]
    fn test_to_integer() {
        assert_eq!(RawNumber::from(3).to_integer("qty").unwrap(), 3);
        assert_eq!(RawNumber::from(3.0).to_integer("qty").unwrap(), 3);
        assert_eq!(RawNumber::from("4").to_integer("qty").unwrap(), 4);
        assert!(RawNumber::from(2.5).to_integer("qty").is_err());
    }

    #[test]
    fn test_raw_booking_defaults() {
        let raw: RawBooking = serde_json::from_str(
            r#"{"roomTokens":[{"amount":"2000","taxRatePercent":12}],"serviceTokens":null,
                "advancePayment":{"method":"cash"}}"#,
        )
        .unwrap();
        let booking = BookingAggregate::try_from(raw).unwrap();

        assert_eq!(booking.room_tokens[0].amount, Money::from_major(2000));
        assert_eq!(booking.room_tokens[0].tax_rate.percent(), dec!(12));
        assert!(booking.service_tokens.is_empty());
        assert!(booking.food_tokens.is_empty());

        let advance = booking.advance_payment.unwrap();
        assert!(advance.amount.is_zero());
        assert_eq!(advance.method, "cash");
    }

    #[test]
    fn test_raw_booking_names_bad_field() {
        let raw: RawBooking = serde_json::from_str(
            r#"{"foodTokens":[{"amount":100},{"amount":"ten"}]}"#,
        )
        .unwrap();
        let err = BookingAggregate::try_from(raw).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidInput { ref field, .. } if field == "foodTokens[1].amount")
        );
    }

    #[test]
    fn test_raw_booking_missing_token_amount() {
        let raw: RawBooking = serde_json::from_str(r#"{"paymentTokens":[{"method":"upi"}]}"#).unwrap();
        assert!(BookingAggregate::try_from(raw).is_err());
    }

    #[test]
    fn test_raw_invoice_out_of_range_rate() {
        let raw = RawInvoice {
            total_amount: Some(RawNumber::from(1180)),
            tax_percent: Some(RawNumber::from(120)),
            payable_amount: Some(RawNumber::from(1180)),
        };
        let err = InvoiceRecord::try_from(raw).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_reported_rows_default_tax() {
        let rows: Vec<RawReportedTaxRow> =
            serde_json::from_str(r#"[{"taxableAmount":1000,"payableAmount":1000}]"#).unwrap();
        let rows = reported_rows_from_raw(rows).unwrap();
        assert!(rows[0].tax.is_zero());
    }

    #[test]
    fn test_order_items_from_raw() {
        let raw: Vec<RawOrderItem> =
            serde_json::from_str(r#"[{"name":"Tea","qty":"2"},{"name":"Dal","quantity":1}]"#).unwrap();
        let items = order_items_from_raw(raw, "new").unwrap();
        assert_eq!(items, vec![OrderLineItem::new("Tea", 2), OrderLineItem::new("Dal", 1)]);
    }

    #[test]
    fn test_order_items_reject_bad_lines() {
        let missing_name: Vec<RawOrderItem> = serde_json::from_str(r#"[{"qty":1}]"#).unwrap();
        assert!(order_items_from_raw(missing_name, "old").is_err());

        let negative: Vec<RawOrderItem> = serde_json::from_str(r#"[{"name":"Tea","qty":-3}]"#).unwrap();
        assert!(matches!(
            order_items_from_raw(negative, "new"),
            Err(CoreError::Validation(ValidationError::Negative { value: -3, .. }))
        ));

        let huge: Vec<RawOrderItem> =
            serde_json::from_str(r#"[{"name":"Tea","qty":9223372036854775807}]"#).unwrap();
        assert!(matches!(
            order_items_from_raw(huge, "new"),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));

        let missing_qty: Vec<RawOrderItem> = serde_json::from_str(r#"[{"name":"Tea"}]"#).unwrap();
        let err = order_items_from_raw(missing_qty, "old").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { ref field, .. } if field == "old[0].qty"));
    }
}
