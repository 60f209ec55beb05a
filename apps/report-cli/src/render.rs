//! Output rendering: pretty JSON, or a plain text table for the terminal.

use std::fmt::Write;

use hotelier_core::{
    BookingTotals, ChangeRecord, GstBreakdown, InvoiceReportTotals, KotSummary, Money,
};

use crate::commands::Report;
use crate::config::{AppConfig, OutputFormat};

const LABEL_WIDTH: usize = 16;
const COLUMN_WIDTH: usize = 14;

/// Renders a report in the configured output format.
pub fn render(report: &Report, config: &AppConfig) -> Result<String, serde_json::Error> {
    match config.output.format {
        OutputFormat::Json => serde_json::to_string_pretty(report),
        OutputFormat::Text => Ok(TextRenderer::new(config).render(report)),
    }
}

struct TextRenderer<'a> {
    symbol: &'a str,
    scale: usize,
    out: String,
}

impl<'a> TextRenderer<'a> {
    fn new(config: &'a AppConfig) -> Self {
        TextRenderer {
            symbol: &config.output.currency_symbol,
            scale: config.report.scale as usize,
            out: String::new(),
        }
    }

    fn render(mut self, report: &Report) -> String {
        match report {
            Report::Totals(totals) => self.totals(totals),
            Report::Bookings(summary) => {
                self.line("Bookings", &summary.booking_count.to_string());
                self.totals(&summary.totals);
            }
            Report::Gst(split) => self.gst(split),
            Report::InvoiceReport { rows, totals } => self.invoice_report(rows, totals),
            Report::Kot { changes, summary } => self.kot(changes, summary),
        }
        self.out.trim_end().to_string()
    }

    fn totals(&mut self, totals: &BookingTotals) {
        self.money_line("Room total", totals.room_total);
        self.money_line("Service total", totals.service_total);
        self.money_line("Food total", totals.food_total);
        self.money_line("Grand total", totals.grand_total);
        self.money_line("Paid", totals.paid_total);
        if totals.is_overpaid() {
            self.money_line("Refund due", totals.due_amount.abs());
        } else {
            self.money_line("Due", totals.due_amount);
        }
    }

    fn gst(&mut self, split: &GstBreakdown) {
        self.money_line("Base amount", split.base_amount);
        self.money_line("SGST", split.sgst);
        self.money_line("CGST", split.cgst);
        self.money_line("Total", split.total_amount);
    }

    fn invoice_report(&mut self, rows: &[GstBreakdown], totals: &InvoiceReportTotals) {
        self.table_row("#", ["Taxable", "SGST", "CGST", "Payable"].map(String::from));
        for (index, row) in rows.iter().enumerate() {
            let cells = [row.base_amount, row.sgst, row.cgst, row.total_amount]
                .map(|money| self.amount(money));
            self.table_row(&(index + 1).to_string(), cells);
        }
        let footer = [
            totals.taxable_amount,
            totals.sgst,
            totals.cgst,
            totals.payable_amount,
        ]
        .map(|money| self.amount(money));
        self.table_row(&format!("Total ({})", totals.row_count), footer);
    }

    fn kot(&mut self, changes: &[ChangeRecord], summary: &KotSummary) {
        if summary.is_empty() {
            self.out.push_str("No changes\n");
            return;
        }
        for change in changes {
            let _ = writeln!(
                self.out,
                "{:>5}  {:<24} {}",
                change.delta_label, change.name, change.kind
            );
        }
        let _ = writeln!(
            self.out,
            "\n{} new, {} updated, {} cancelled",
            summary.added, summary.updated, summary.cancelled
        );
    }

    fn amount(&self, money: Money) -> String {
        if money.is_negative() {
            format!("-{}{:.*}", self.symbol, self.scale, money.abs())
        } else {
            format!("{}{:.*}", self.symbol, self.scale, money)
        }
    }

    fn money_line(&mut self, label: &str, money: Money) {
        let value = self.amount(money);
        self.line(label, &value);
    }

    fn line(&mut self, label: &str, value: &str) {
        let _ = writeln!(self.out, "{:<LABEL_WIDTH$}{:>COLUMN_WIDTH$}", label, value);
    }

    fn table_row(&mut self, label: &str, cells: [String; 4]) {
        let _ = write!(self.out, "{:<LABEL_WIDTH$}", label);
        for cell in cells {
            let _ = write!(self.out, "{:>COLUMN_WIDTH$}", cell);
        }
        self.out.push('\n');
    }
}
