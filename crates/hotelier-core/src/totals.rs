//! # Booking Totals
//!
//! The financial side of the room booking report: what was billed, what was
//! paid, what is still due.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    compute_booking_totals                               │
//! │                                                                         │
//! │  Σ roomTokens.amount ─────┐                                            │
//! │  Σ serviceTokens.amount ──┼──► grand_total ──┐                         │
//! │  Σ foodTokens.amount ─────┘                  │                         │
//! │                                              ├──► due = grand − paid   │
//! │  Σ paymentTokens.amount ──┐                  │    (may be negative)    │
//! │  advancePayment.amount ───┴──► paid_total ───┘                         │
//! │                                                                         │
//! │  All sums unrounded ──────────► round(scale) once, per output field    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::ReportConfig;
use crate::error::{CoreError, CoreResult};
use crate::input::RawBooking;
use crate::money::Money;
use crate::types::{BookingAggregate, MonetaryLineItem};

// =============================================================================
// Output Types
// =============================================================================

/// Derived totals of one booking, rounded at the output boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookingTotals {
    pub room_total: Money,
    pub service_total: Money,
    pub food_total: Money,
    pub grand_total: Money,
    pub paid_total: Money,
    /// Negative when the guest overpaid.
    pub due_amount: Money,
}

impl BookingTotals {
    /// True when the guest paid more than was billed.
    pub fn is_overpaid(&self) -> bool {
        self.due_amount.is_negative()
    }

    fn round(&self, config: &ReportConfig) -> BookingTotals {
        let round = |money: Money| money.round(config.scale, config.rounding);
        BookingTotals {
            room_total: round(self.room_total),
            service_total: round(self.service_total),
            food_total: round(self.food_total),
            grand_total: round(self.grand_total),
            paid_total: round(self.paid_total),
            due_amount: round(self.due_amount),
        }
    }
}

/// Column sums of a multi-booking room report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookingReportSummary {
    pub booking_count: usize,
    #[serde(flatten)]
    #[ts(flatten)]
    pub totals: BookingTotals,
}

// =============================================================================
// Aggregation
// =============================================================================

fn sum_tokens(tokens: &[MonetaryLineItem], field: &str) -> CoreResult<Money> {
    Money::checked_sum(tokens.iter().map(|token| token.amount), field)
}

/// Unrounded totals; the single place the arithmetic lives.
fn accumulate(booking: &BookingAggregate) -> CoreResult<BookingTotals> {
    let room_total = sum_tokens(&booking.room_tokens, "roomTotal")?;
    let service_total = sum_tokens(&booking.service_tokens, "serviceTotal")?;
    let food_total = sum_tokens(&booking.food_tokens, "foodTotal")?;

    let grand_total = Money::checked_sum([room_total, service_total, food_total], "grandTotal")?;

    let advance = booking
        .advance_payment
        .as_ref()
        .map_or(Money::ZERO, |payment| payment.amount);
    let paid_total = Money::checked_sum(
        booking
            .payment_tokens
            .iter()
            .map(|payment| payment.amount)
            .chain(std::iter::once(advance)),
        "paidTotal",
    )?;

    let due_amount = grand_total
        .checked_sub(paid_total)
        .ok_or_else(|| CoreError::overflow("dueAmount"))?;

    Ok(BookingTotals {
        room_total,
        service_total,
        food_total,
        grand_total,
        paid_total,
        due_amount,
    })
}

/// Computes the totals of one booking with the default configuration.
///
/// ## Example
/// ```rust
/// use hotelier_core::money::Money;
/// use hotelier_core::totals::compute_booking_totals;
/// use hotelier_core::types::{BookingAggregate, MonetaryLineItem, PaymentRecord};
///
/// let booking = BookingAggregate {
///     room_tokens: vec![MonetaryLineItem::untaxed(Money::from_major(2000))],
///     service_tokens: vec![MonetaryLineItem::untaxed(Money::from_major(300))],
///     payment_tokens: vec![PaymentRecord::of(Money::from_major(1000))],
///     advance_payment: Some(PaymentRecord::of(Money::from_major(500))),
///     ..Default::default()
/// };
///
/// let totals = compute_booking_totals(&booking).unwrap();
/// assert_eq!(totals.grand_total, Money::from_major(2300));
/// assert_eq!(totals.paid_total, Money::from_major(1500));
/// assert_eq!(totals.due_amount, Money::from_major(800));
/// ```
pub fn compute_booking_totals(booking: &BookingAggregate) -> CoreResult<BookingTotals> {
    compute_booking_totals_with(booking, &ReportConfig::default())
}

/// Computes the totals of one booking, rounding with `config`.
pub fn compute_booking_totals_with(
    booking: &BookingAggregate,
    config: &ReportConfig,
) -> CoreResult<BookingTotals> {
    let totals = accumulate(booking)?.round(config);

    debug!(
        rooms = booking.room_tokens.len(),
        services = booking.service_tokens.len(),
        food = booking.food_tokens.len(),
        payments = booking.payment_tokens.len(),
        grand_total = %totals.grand_total,
        due = %totals.due_amount,
        "Booking totals computed"
    );

    Ok(totals)
}

/// Converts an API booking and computes its totals.
///
/// Non-numeric or non-finite amounts fail with [`CoreError::InvalidInput`].
pub fn compute_raw_booking_totals(
    raw: RawBooking,
    config: &ReportConfig,
) -> CoreResult<BookingTotals> {
    let booking = BookingAggregate::try_from(raw)?;
    compute_booking_totals_with(&booking, config)
}

/// Sums the columns of a room booking report.
///
/// Each booking is accumulated unrounded, so the footer equals the exact sum
/// rounded once rather than a sum of rounded rows.
pub fn summarize_bookings(
    bookings: &[BookingAggregate],
    config: &ReportConfig,
) -> CoreResult<BookingReportSummary> {
    let per_booking = bookings
        .iter()
        .map(accumulate)
        .collect::<CoreResult<Vec<_>>>()?;

    let column = |pick: fn(&BookingTotals) -> Money, field: &str| {
        Money::checked_sum(per_booking.iter().map(pick), field)
    };

    let totals = BookingTotals {
        room_total: column(|t| t.room_total, "roomTotal")?,
        service_total: column(|t| t.service_total, "serviceTotal")?,
        food_total: column(|t| t.food_total, "foodTotal")?,
        grand_total: column(|t| t.grand_total, "grandTotal")?,
        paid_total: column(|t| t.paid_total, "paidTotal")?,
        due_amount: column(|t| t.due_amount, "dueAmount")?,
    }
    .round(config);

    debug!(bookings = bookings.len(), due = %totals.due_amount, "Booking report summarized");

    Ok(BookingReportSummary {
        booking_count: bookings.len(),
        totals,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundingMode;
    use crate::types::PaymentRecord;
    use rust_decimal_macros::dec;

    fn token(amount: Money) -> MonetaryLineItem {
        MonetaryLineItem::untaxed(amount)
    }

    fn sample_booking() -> BookingAggregate {
        BookingAggregate {
            room_tokens: vec![token(Money::from_major(2000))],
            service_tokens: vec![token(Money::from_major(300))],
            food_tokens: vec![],
            payment_tokens: vec![PaymentRecord::of(Money::from_major(1000))],
            advance_payment: Some(PaymentRecord::of(Money::from_major(500))),
        }
    }

    #[test]
    fn test_example_booking() {
        let totals = compute_booking_totals(&sample_booking()).unwrap();
        assert_eq!(totals.room_total, Money::from_major(2000));
        assert_eq!(totals.service_total, Money::from_major(300));
        assert!(totals.food_total.is_zero());
        assert_eq!(totals.grand_total, Money::from_major(2300));
        assert_eq!(totals.paid_total, Money::from_major(1500));
        assert_eq!(totals.due_amount, Money::from_major(800));
        assert!(!totals.is_overpaid());
    }

    #[test]
    fn test_idempotent() {
        let booking = sample_booking();
        let first = compute_booking_totals(&booking).unwrap();
        let second = compute_booking_totals(&booking).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_booking_is_all_zero() {
        let totals = compute_booking_totals(&BookingAggregate::default()).unwrap();
        for value in [
            totals.room_total,
            totals.service_total,
            totals.food_total,
            totals.grand_total,
            totals.paid_total,
            totals.due_amount,
        ] {
            assert!(value.is_zero());
        }
    }

    #[test]
    fn test_overpayment_is_not_clamped() {
        let booking = BookingAggregate {
            room_tokens: vec![token(Money::from_major(1000))],
            payment_tokens: vec![PaymentRecord::of(Money::from_major(1200))],
            ..Default::default()
        };
        let totals = compute_booking_totals(&booking).unwrap();
        assert_eq!(totals.due_amount, Money::from_major(-200));
        assert!(totals.is_overpaid());
    }

    #[test]
    fn test_rounding_only_at_output() {
        // Three thirds of a rupee: rounding each token first would give 0.99.
        let third = Money::from_decimal(dec!(0.3333333333333333333333333333));
        let booking = BookingAggregate {
            food_tokens: vec![token(third), token(third), token(third)],
            ..Default::default()
        };
        let totals = compute_booking_totals(&booking).unwrap();
        assert_eq!(totals.food_total.decimal(), dec!(1.00));
        assert_eq!(totals.food_total.to_string(), "1.00");
    }

    #[test]
    fn test_rounding_mode_from_config() {
        let booking = BookingAggregate {
            room_tokens: vec![token(Money::from_decimal(dec!(10.125)))],
            ..Default::default()
        };
        let half_up = compute_booking_totals(&booking).unwrap();
        assert_eq!(half_up.room_total.decimal(), dec!(10.13));

        let config = ReportConfig {
            rounding: RoundingMode::HalfEven,
            ..ReportConfig::default()
        };
        let half_even = compute_booking_totals_with(&booking, &config).unwrap();
        assert_eq!(half_even.room_total.decimal(), dec!(10.12));
    }

    #[test]
    fn test_raw_booking_with_string_amounts() {
        let raw: RawBooking = serde_json::from_str(
            r#"{"roomTokens":[{"amount":"2000"}],"serviceTokens":[{"amount":300.0}],
                "paymentTokens":[{"amount":1000,"method":"cash"}],"advancePayment":{"amount":"500"}}"#,
        )
        .unwrap();
        let totals = compute_raw_booking_totals(raw, &ReportConfig::default()).unwrap();
        assert_eq!(totals.due_amount, Money::from_major(800));
    }

    #[test]
    fn test_raw_booking_non_numeric_fails() {
        let raw: RawBooking =
            serde_json::from_str(r#"{"roomTokens":[{"amount":"two thousand"}]}"#).unwrap();
        let err = compute_raw_booking_totals(raw, &ReportConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));
    }

    #[test]
    fn test_summarize_bookings() {
        let overpaid = BookingAggregate {
            room_tokens: vec![token(Money::from_major(1000))],
            payment_tokens: vec![PaymentRecord::of(Money::from_major(1200))],
            ..Default::default()
        };
        let summary =
            summarize_bookings(&[sample_booking(), overpaid], &ReportConfig::default()).unwrap();

        assert_eq!(summary.booking_count, 2);
        assert_eq!(summary.totals.grand_total, Money::from_major(3300));
        assert_eq!(summary.totals.paid_total, Money::from_major(2700));
        assert_eq!(summary.totals.due_amount, Money::from_major(600));
    }

    #[test]
    fn test_summary_serializes_flat() {
        let summary = summarize_bookings(&[sample_booking()], &ReportConfig::default()).unwrap();
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["bookingCount"], 1);
        assert_eq!(json["dueAmount"], "800.00");
    }
}
