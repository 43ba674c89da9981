//! # Receipt Rendering
//!
//! Fixed-width text receipts for completed sales.
//!
//! ## Layout
//! ```text
//! ======================================
//!          Meridian Demo Store
//!           42 Market Street
//!         Springfield, ST 04201
//! ======================================
//! 2026-08-04 14:02 UTC
//! Sale 1f0c9a2e
//! --------------------------------------
//! Cola 330ml
//!   2 x $2.50                      $5.00
//! Salted Chips 150g
//!   1 x $1.99                      $1.99
//! --------------------------------------
//! Subtotal                         $6.99
//! Tax (7.00%)                      $0.49
//! TOTAL                            $7.48
//! Cash received                   $10.00
//! Change                           $2.52
//! ======================================
//!        Thank you for shopping!
//! ```
//!
//! The 38-column width matches a common thermal paper size; printer
//! integration itself is out of scope for the demo register.

use meridian_core::types::{Sale, TaxRate, TenderMethod};

use crate::config::RegisterConfig;

/// Paper width in characters.
const WIDTH: usize = 38;

/// Renders a completed sale as a fixed-width receipt.
pub fn render_receipt(sale: &Sale, config: &RegisterConfig) -> String {
    let mut out = String::new();
    let rule = "=".repeat(WIDTH);
    let thin_rule = "-".repeat(WIDTH);

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&center(&config.store_name));
    out.push('\n');
    for line in &config.store_address {
        out.push_str(&center(line));
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');

    out.push_str(&sale.completed_at.format("%Y-%m-%d %H:%M UTC").to_string());
    out.push('\n');
    // Short id is enough on paper; the journal keeps the full UUID
    let short_id: String = sale.id.chars().take(8).collect();
    out.push_str(&format!("Sale {}\n", short_id));
    out.push_str(&thin_rule);
    out.push('\n');

    for line in &sale.lines {
        out.push_str(&line.name);
        out.push('\n');
        let detail = format!(
            "  {} x {}",
            line.quantity,
            config.format_currency(line.unit_price_cents)
        );
        let amount = config.format_currency(line.line_total().cents());
        out.push_str(&keyed_row(&detail, &amount));
        out.push('\n');
    }

    out.push_str(&thin_rule);
    out.push('\n');
    out.push_str(&keyed_row(
        "Subtotal",
        &config.format_currency(sale.subtotal_cents),
    ));
    out.push('\n');
    let tax_label = format!(
        "Tax ({:.2}%)",
        TaxRate::from_bps(config.tax_rate_bps).percentage()
    );
    out.push_str(&keyed_row(&tax_label, &config.format_currency(sale.tax_cents)));
    out.push('\n');
    out.push_str(&keyed_row("TOTAL", &config.format_currency(sale.total_cents)));
    out.push('\n');

    match sale.tender_method {
        TenderMethod::Cash => {
            if let Some(received) = sale.amount_received_cents {
                out.push_str(&keyed_row("Cash received", &config.format_currency(received)));
                out.push('\n');
            }
            out.push_str(&keyed_row("Change", &config.format_currency(sale.change_cents)));
            out.push('\n');
        }
        method => {
            out.push_str(&keyed_row(
                &format!("Paid by {}", method),
                &config.format_currency(sale.total_cents),
            ));
            out.push('\n');
        }
    }

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&center("Thank you for shopping!"));
    out.push('\n');

    out
}

/// Centers text within the paper width.
fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= WIDTH {
        return text.to_string();
    }
    let pad = (WIDTH - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Left label, right-aligned amount, padded to the paper width.
fn keyed_row(label: &str, amount: &str) -> String {
    let label_len = label.chars().count();
    let amount_len = amount.chars().count();
    if label_len + amount_len + 1 >= WIDTH {
        return format!("{} {}", label, amount);
    }
    let pad = WIDTH - label_len - amount_len;
    format!("{}{}{}", label, " ".repeat(pad), amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use meridian_core::types::CartLine;

    fn sample_sale() -> Sale {
        Sale {
            id: "1f0c9a2e-5d1c-4a67-9f2a-000000000000".to_string(),
            lines: vec![
                CartLine {
                    product_id: "prod-001".to_string(),
                    name: "Cola 330ml".to_string(),
                    unit_price_cents: 250,
                    quantity: 2,
                },
                CartLine {
                    product_id: "prod-005".to_string(),
                    name: "Salted Chips 150g".to_string(),
                    unit_price_cents: 199,
                    quantity: 1,
                },
            ],
            subtotal_cents: 699,
            tax_cents: 49,
            total_cents: 748,
            tender_method: TenderMethod::Cash,
            amount_received_cents: Some(1000),
            change_cents: 252,
            completed_at: Utc.with_ymd_and_hms(2026, 8, 4, 14, 2, 0).unwrap(),
        }
    }

    #[test]
    fn test_receipt_contains_all_sections() {
        let receipt = render_receipt(&sample_sale(), &RegisterConfig::default());

        assert!(receipt.contains("Meridian Demo Store"));
        assert!(receipt.contains("Sale 1f0c9a2e"));
        assert!(receipt.contains("Cola 330ml"));
        assert!(receipt.contains("2 x $2.50"));
        assert!(receipt.contains("$6.99"));
        assert!(receipt.contains("Tax (7.00%)"));
        assert!(receipt.contains("$7.48"));
        assert!(receipt.contains("Cash received"));
        assert!(receipt.contains("$2.52"));
    }

    #[test]
    fn test_card_receipt_has_no_change_row() {
        let sale = Sale {
            tender_method: TenderMethod::Card,
            amount_received_cents: None,
            change_cents: 0,
            ..sample_sale()
        };
        let receipt = render_receipt(&sale, &RegisterConfig::default());

        assert!(receipt.contains("Paid by Card"));
        assert!(!receipt.contains("Change"));
    }

    #[test]
    fn test_rows_fit_paper_width() {
        let receipt = render_receipt(&sample_sale(), &RegisterConfig::default());
        for row in receipt.lines() {
            assert!(row.chars().count() <= WIDTH, "row too wide: {:?}", row);
        }
    }
}
