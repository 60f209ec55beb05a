//! # Command Handlers
//!
//! Each subcommand reads its JSON records, converts them through the core's
//! loosely-typed input types and returns a [`Report`] for rendering.

use std::io::Read;

use anyhow::Context;
use hotelier_core::input::{order_items_from_raw, reported_rows_from_raw};
use hotelier_core::{
    compute_raw_booking_totals, diff_orders_with, split_gst_inclusive_with,
    split_gst_invoice_with, split_gst_reported_with, summarize_bookings,
    summarize_invoice_report, BookingAggregate, BookingReportSummary, BookingTotals,
    ChangeRecord, GstBreakdown, InvoiceRecord, InvoiceReportTotals, KotSummary, Money,
    RawBooking, RawInvoice, RawNumber, RawOrderItem, RawReportedTaxRow, ReportConfig,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::Command;

// =============================================================================
// Report
// =============================================================================

/// Result of one subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Totals(BookingTotals),
    Bookings(BookingReportSummary),
    Gst(GstBreakdown),
    InvoiceReport {
        rows: Vec<GstBreakdown>,
        totals: InvoiceReportTotals,
    },
    Kot {
        changes: Vec<ChangeRecord>,
        summary: KotSummary,
    },
}

/// Runs a subcommand.
pub fn run(command: &Command, config: &ReportConfig) -> anyhow::Result<Report> {
    match command {
        Command::Totals { input } => booking_totals(&read_input(input)?, config),
        Command::Bookings { input } => booking_summary(&read_input(input)?, config),
        Command::Gst { gross, rate } => inclusive_gst(gross, rate, config),
        Command::Invoice { input } => invoice_gst(&read_input(input)?, config),
        Command::InvoiceReport { input } => invoice_report(&read_input(input)?, config),
        Command::Kot { old, new } => kot_delta(&read_input(old)?, &read_input(new)?, config),
    }
}

// =============================================================================
// Handlers
// =============================================================================

fn booking_totals(json: &str, config: &ReportConfig) -> anyhow::Result<Report> {
    let raw: RawBooking = parse_json(json, "booking")?;
    let totals = compute_raw_booking_totals(raw, config)?;
    Ok(Report::Totals(totals))
}

fn booking_summary(json: &str, config: &ReportConfig) -> anyhow::Result<Report> {
    let raw: Vec<RawBooking> = parse_json(json, "booking list")?;
    let bookings = raw
        .into_iter()
        .enumerate()
        .map(|(i, booking)| {
            BookingAggregate::try_from(booking).with_context(|| format!("booking #{}", i + 1))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    info!(count = bookings.len(), "Summarizing bookings");
    Ok(Report::Bookings(summarize_bookings(&bookings, config)?))
}

fn inclusive_gst(gross: &str, rate: &str, config: &ReportConfig) -> anyhow::Result<Report> {
    let gross = Money::parse(gross, "gross")?;
    let rate = RawNumber::from(rate).to_tax_rate("rate")?;
    Ok(Report::Gst(split_gst_inclusive_with(gross, rate, config)?))
}

fn invoice_gst(json: &str, config: &ReportConfig) -> anyhow::Result<Report> {
    let raw: RawInvoice = parse_json(json, "invoice")?;
    let invoice = InvoiceRecord::try_from(raw)?;
    Ok(Report::Gst(split_gst_invoice_with(&invoice, config)?))
}

fn invoice_report(json: &str, config: &ReportConfig) -> anyhow::Result<Report> {
    let raw: Vec<RawReportedTaxRow> = parse_json(json, "invoice report")?;
    let rows = reported_rows_from_raw(raw)?;

    let breakdowns = rows
        .iter()
        .map(|row| split_gst_reported_with(row, config))
        .collect();
    let totals = summarize_invoice_report(&rows, config)?;

    Ok(Report::InvoiceReport {
        rows: breakdowns,
        totals,
    })
}

fn kot_delta(old_json: &str, new_json: &str, config: &ReportConfig) -> anyhow::Result<Report> {
    let old: Vec<RawOrderItem> = parse_json(old_json, "old order")?;
    let new: Vec<RawOrderItem> = parse_json(new_json, "new order")?;

    let old = order_items_from_raw(old, "old")?;
    let new = order_items_from_raw(new, "new")?;

    let changes = diff_orders_with(&old, &new, &config.kot)?;
    let summary = KotSummary::from_changes(&changes);
    if summary.is_empty() {
        info!("Order unchanged, nothing to send to the kitchen");
    }

    Ok(Report::Kot { changes, summary })
}

// =============================================================================
// Input
// =============================================================================

/// Reads a file, or stdin when `path` is `-`.
fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }

    debug!(path, "Reading input file");
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
}

fn parse_json<T: DeserializeOwned>(json: &str, what: &str) -> anyhow::Result<T> {
    serde_json::from_str(json).with_context(|| format!("Malformed {} JSON", what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotelier_core::{ChangeKind, CoreError, DuplicatePolicy};

    #[test]
    fn test_booking_totals_from_api_json() {
        let json = r#"{
            "roomTokens": [{"amount": "2000"}],
            "serviceTokens": [{"amount": 300}],
            "foodTokens": [],
            "paymentTokens": [{"amount": "1000", "method": "cash"}],
            "advancePayment": {"amount": 500}
        }"#;

        let Report::Totals(totals) = booking_totals(json, &ReportConfig::default()).unwrap() else {
            panic!("expected totals");
        };
        assert_eq!(totals.grand_total, Money::from_major(2300));
        assert_eq!(totals.paid_total, Money::from_major(1500));
        assert_eq!(totals.due_amount, Money::from_major(800));
    }

    #[test]
    fn test_booking_totals_bad_amount() {
        let json = r#"{"roomTokens": [{"amount": "two thousand"}]}"#;
        let err = booking_totals(json, &ReportConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_booking_summary_names_failing_booking() {
        let json = r#"[{"roomTokens": [{"amount": 100}]}, {"roomTokens": [{"amount": "x"}]}]"#;
        let err = booking_summary(json, &ReportConfig::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("booking #2"));
    }

    #[test]
    fn test_inclusive_gst() {
        let Report::Gst(split) = inclusive_gst("1180", "18", &ReportConfig::default()).unwrap()
        else {
            panic!("expected gst");
        };
        assert_eq!(split.base_amount, Money::from_major(1000));
        assert_eq!(split.sgst, Money::from_major(90));
        assert_eq!(split.cgst, Money::from_major(90));
    }

    #[test]
    fn test_inclusive_gst_credit_note() {
        let Report::Gst(split) = inclusive_gst("-59", "18", &ReportConfig::default()).unwrap()
        else {
            panic!("expected gst");
        };
        assert_eq!(split.base_amount, Money::from_major(-50));
        assert_eq!(split.sgst, Money::from_cents(-450));
        assert_eq!(split.cgst, Money::from_cents(-450));
        assert_eq!(split.total_amount, Money::from_major(-59));
    }

    #[test]
    fn test_inclusive_gst_rejects_rate_of_100() {
        assert!(inclusive_gst("1180", "100", &ReportConfig::default()).is_err());
    }

    #[test]
    fn test_invoice_report_rows_and_footer() {
        let json = r#"[
            {"taxableAmount": 1000, "tax": 180, "payableAmount": 1180},
            {"taxableAmount": "500", "tax": "25.02", "payableAmount": "525.02"}
        ]"#;

        let Report::InvoiceReport { rows, totals } =
            invoice_report(json, &ReportConfig::default()).unwrap()
        else {
            panic!("expected invoice report");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].sgst, Money::from_cents(1251));
        assert_eq!(totals.row_count, 2);
        assert_eq!(totals.sgst, totals.cgst);
        assert_eq!(totals.payable_amount, Money::from_cents(170_502));
    }

    #[test]
    fn test_kot_delta() {
        let old = r#"[{"name": "Tea", "qty": 2}, {"name": "Rice", "qty": 1}]"#;
        let new = r#"[{"name": "Tea", "qty": 3}, {"name": "Dal", "quantity": 1}]"#;

        let Report::Kot { changes, summary } =
            kot_delta(old, new, &ReportConfig::default()).unwrap()
        else {
            panic!("expected kot");
        };
        assert_eq!(
            changes,
            vec![
                ChangeRecord::new("Tea", "+1", ChangeKind::Update),
                ChangeRecord::new("Dal", "+1", ChangeKind::New),
                ChangeRecord::new("Rice", "0", ChangeKind::Cancel),
            ]
        );
        assert_eq!(summary.added, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.cancelled, 1);
    }

    #[test]
    fn test_kot_reject_duplicates() {
        let mut config = ReportConfig::default();
        config.kot.duplicates = DuplicatePolicy::Reject;

        let old = r#"[{"name": "Tea", "qty": 1}, {"name": "Tea", "qty": 2}]"#;
        let err = kot_delta(old, "[]", &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::DuplicateItem { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = kot_delta("not json", "[]", &ReportConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Malformed old order JSON"));
    }
}
