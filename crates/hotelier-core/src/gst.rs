//! # GST Splits
//!
//! Splitting a combined GST amount into its equal state (SGST) and central
//! (CGST) halves, in the two shapes the reports meet it.
//!
//! ## Two Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  INCLUSIVE EXTRACTION (sales entries, invoices)                         │
//! │  ─────────────────────                                                  │
//! │  gross G already contains tax at rate r%                               │
//! │                                                                         │
//! │     gst  = G × r / (100 + r)        1180 × 18 / 118 = 180              │
//! │     base = G − gst                  1180 − 180      = 1000             │
//! │     sgst = cgst = gst / 2           180 / 2         = 90               │
//! │                                                                         │
//! │  REPORTED SPLIT (invoice report lists)                                  │
//! │  ──────────────                                                         │
//! │  backend stored taxable, tax (an amount) and payable                   │
//! │                                                                         │
//! │     sgst = cgst = tax / 2                                              │
//! │     base = stored taxable, total = stored payable (never recomputed)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Rounded once, at output. The SGST half is rounded and CGST mirrors it, so
//! the two are always identical. In inclusive mode `base` is what remains of
//! the rounded total, so `base + sgst + cgst == total` to the paisa.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::config::ReportConfig;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{InvoiceRecord, ReportedTaxRow, TaxRate};

// =============================================================================
// Output Types
// =============================================================================

/// GST breakdown of one amount, rounded at the output boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GstBreakdown {
    pub base_amount: Money,
    pub sgst: Money,
    pub cgst: Money,
    pub total_amount: Money,
}

impl GstBreakdown {
    /// Combined GST (SGST + CGST).
    pub fn gst_amount(&self) -> Money {
        self.sgst + self.cgst
    }
}

/// Footer of an invoice report list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceReportTotals {
    pub row_count: usize,
    pub taxable_amount: Money,
    pub sgst: Money,
    pub cgst: Money,
    pub payable_amount: Money,
}

// =============================================================================
// Inclusive Extraction
// =============================================================================

/// Unrounded GST contained in `gross` at `rate`.
fn inclusive_gst(gross: Money, rate: TaxRate) -> CoreResult<Money> {
    if rate.is_zero() {
        return Ok(Money::ZERO);
    }

    // rate < 100 by construction, so the divisor is in [100, 200).
    let divisor = Decimal::ONE_HUNDRED + rate.percent();
    gross
        .checked_mul(rate.percent())
        .and_then(|taxed| taxed.checked_div(divisor))
        .ok_or_else(|| CoreError::overflow("gstAmount"))
}

/// Extracts GST from a tax-inclusive gross with the default configuration.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use hotelier_core::gst::split_gst_inclusive;
/// use hotelier_core::money::Money;
/// use hotelier_core::types::TaxRate;
///
/// let rate = TaxRate::from_percent(Decimal::from(18)).unwrap();
/// let split = split_gst_inclusive(Money::from_major(1180), rate).unwrap();
///
/// assert_eq!(split.base_amount, Money::from_major(1000));
/// assert_eq!(split.sgst, Money::from_major(90));
/// assert_eq!(split.cgst, Money::from_major(90));
/// assert_eq!(split.total_amount, Money::from_major(1180));
/// ```
pub fn split_gst_inclusive(gross: Money, rate: TaxRate) -> CoreResult<GstBreakdown> {
    split_gst_inclusive_with(gross, rate, &ReportConfig::default())
}

/// Extracts GST from a tax-inclusive gross, rounding with `config`.
pub fn split_gst_inclusive_with(
    gross: Money,
    rate: TaxRate,
    config: &ReportConfig,
) -> CoreResult<GstBreakdown> {
    let gst = inclusive_gst(gross, rate)?;

    let total_amount = gross.round(config.scale, config.rounding);
    let sgst = gst.half().round(config.scale, config.rounding);
    let cgst = sgst;
    let base_amount = total_amount
        .checked_sub(sgst)
        .and_then(|rest| rest.checked_sub(cgst))
        .ok_or_else(|| CoreError::overflow("baseAmount"))?;

    trace!(%gross, %rate, %gst, %base_amount, "Inclusive GST extracted");

    Ok(GstBreakdown {
        base_amount,
        sgst,
        cgst,
        total_amount,
    })
}

/// Splits an invoice's combined GST out of its tax-inclusive total.
pub fn split_gst_invoice(invoice: &InvoiceRecord) -> CoreResult<GstBreakdown> {
    split_gst_invoice_with(invoice, &ReportConfig::default())
}

/// [`split_gst_invoice`] with an explicit configuration.
pub fn split_gst_invoice_with(
    invoice: &InvoiceRecord,
    config: &ReportConfig,
) -> CoreResult<GstBreakdown> {
    split_gst_inclusive_with(invoice.total_amount, invoice.tax_percent, config)
}

// =============================================================================
// Reported Split
// =============================================================================

/// Halves a stored tax amount; taxable and payable pass through as stored.
pub fn split_gst_reported(row: &ReportedTaxRow) -> GstBreakdown {
    split_gst_reported_with(row, &ReportConfig::default())
}

/// [`split_gst_reported`] with an explicit configuration.
pub fn split_gst_reported_with(row: &ReportedTaxRow, config: &ReportConfig) -> GstBreakdown {
    let round = |money: Money| money.round(config.scale, config.rounding);
    let sgst = round(row.tax.half());

    GstBreakdown {
        base_amount: round(row.taxable_amount),
        sgst,
        cgst: sgst,
        total_amount: round(row.payable_amount),
    }
}

/// Sums an invoice report list into its footer.
///
/// The SGST/CGST columns are halves of the summed tax, so the footer is as
/// symmetric as every row.
pub fn summarize_invoice_report(
    rows: &[ReportedTaxRow],
    config: &ReportConfig,
) -> CoreResult<InvoiceReportTotals> {
    let taxable = Money::checked_sum(rows.iter().map(|row| row.taxable_amount), "taxableAmount")?;
    let tax = Money::checked_sum(rows.iter().map(|row| row.tax), "tax")?;
    let payable = Money::checked_sum(rows.iter().map(|row| row.payable_amount), "payableAmount")?;

    let round = |money: Money| money.round(config.scale, config.rounding);
    let sgst = round(tax.half());

    Ok(InvoiceReportTotals {
        row_count: rows.len(),
        taxable_amount: round(taxable),
        sgst,
        cgst: sgst,
        payable_amount: round(payable),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundingMode;
    use rust_decimal_macros::dec;

    fn rate(percent: Decimal) -> TaxRate {
        TaxRate::from_percent(percent).unwrap()
    }

    #[test]
    fn test_inclusive_example() {
        let split = split_gst_inclusive(Money::from_major(1180), rate(dec!(18))).unwrap();
        assert_eq!(split.gst_amount(), Money::from_major(180));
        assert_eq!(split.base_amount, Money::from_major(1000));
        assert_eq!(split.sgst, Money::from_major(90));
        assert_eq!(split.cgst, Money::from_major(90));
        assert_eq!(split.total_amount, Money::from_major(1180));
    }

    #[test]
    fn test_zero_rate() {
        let split = split_gst_inclusive(Money::from_cents(99_999), TaxRate::zero()).unwrap();
        assert!(split.sgst.is_zero());
        assert!(split.cgst.is_zero());
        assert_eq!(split.base_amount, Money::from_cents(99_999));
    }

    #[test]
    fn test_split_symmetry_and_sum() {
        let gross_values = [
            dec!(0),
            dec!(0.01),
            dec!(1),
            dec!(99.99),
            dec!(1000),
            dec!(1234.57),
            dec!(58999.5),
        ];
        let rates = [dec!(0), dec!(0.25), dec!(3), dec!(5), dec!(12), dec!(18), dec!(28), dec!(99.5)];

        for gross in gross_values {
            for percent in rates {
                let split = split_gst_inclusive(Money::from_decimal(gross), rate(percent)).unwrap();
                assert_eq!(split.sgst, split.cgst, "gross {} rate {}", gross, percent);

                let recombined = split.base_amount + split.sgst + split.cgst;
                let drift = (recombined.decimal() - gross).abs();
                assert!(drift <= dec!(0.01), "gross {} rate {} drift {}", gross, percent, drift);
            }
        }
    }

    #[test]
    fn test_inclusive_rounds_once() {
        // 1000 @ 18% → gst 152.5423..., halves 76.2711... → 76.27 each
        let split = split_gst_inclusive(Money::from_major(1000), rate(dec!(18))).unwrap();
        assert_eq!(split.sgst.decimal(), dec!(76.27));
        assert_eq!(split.cgst.decimal(), dec!(76.27));
        assert_eq!(split.base_amount.decimal(), dec!(847.46));
        assert_eq!(split.total_amount.decimal(), dec!(1000.00));
    }

    #[test]
    fn test_invoice_uses_total_and_percent() {
        let invoice = InvoiceRecord {
            total_amount: Money::from_major(1120),
            tax_percent: rate(dec!(12)),
            payable_amount: Money::from_major(1120),
        };
        let split = split_gst_invoice(&invoice).unwrap();
        assert_eq!(split.base_amount, Money::from_major(1000));
        assert_eq!(split.sgst, Money::from_major(60));
    }

    #[test]
    fn test_reported_split_keeps_stored_amounts() {
        let row = ReportedTaxRow {
            taxable_amount: Money::from_decimal(dec!(1000.004)),
            tax: Money::from_decimal(dec!(180.01)),
            payable_amount: Money::from_decimal(dec!(1180.01)),
        };
        let split = split_gst_reported(&row);
        assert_eq!(split.base_amount.decimal(), dec!(1000.00));
        assert_eq!(split.sgst.decimal(), dec!(90.01));
        assert_eq!(split.cgst, split.sgst);
        assert_eq!(split.total_amount.decimal(), dec!(1180.01));
    }

    #[test]
    fn test_reported_split_half_even() {
        let row = ReportedTaxRow {
            taxable_amount: Money::from_major(100),
            tax: Money::from_decimal(dec!(0.05)),
            payable_amount: Money::from_decimal(dec!(100.05)),
        };
        let config = ReportConfig {
            rounding: RoundingMode::HalfEven,
            ..ReportConfig::default()
        };
        // 0.025 → 0.02 half-even, 0.03 half-up
        assert_eq!(split_gst_reported_with(&row, &config).sgst.decimal(), dec!(0.02));
        assert_eq!(split_gst_reported(&row).sgst.decimal(), dec!(0.03));
    }

    #[test]
    fn test_summarize_invoice_report() {
        let rows = vec![
            ReportedTaxRow {
                taxable_amount: Money::from_major(1000),
                tax: Money::from_major(180),
                payable_amount: Money::from_major(1180),
            },
            ReportedTaxRow {
                taxable_amount: Money::from_major(500),
                tax: Money::from_decimal(dec!(25.01)),
                payable_amount: Money::from_decimal(dec!(525.01)),
            },
        ];
        let totals = summarize_invoice_report(&rows, &ReportConfig::default()).unwrap();
        assert_eq!(totals.row_count, 2);
        assert_eq!(totals.taxable_amount, Money::from_major(1500));
        // (180 + 25.01) / 2 = 102.505 → 102.51
        assert_eq!(totals.sgst.decimal(), dec!(102.51));
        assert_eq!(totals.cgst, totals.sgst);
        assert_eq!(totals.payable_amount.decimal(), dec!(1705.01));
    }

    #[test]
    fn test_summarize_empty_report() {
        let totals = summarize_invoice_report(&[], &ReportConfig::default()).unwrap();
        assert_eq!(totals.row_count, 0);
        assert!(totals.payable_amount.is_zero());
    }
}
