//! # Receipt Layout
//!
//! Fixed-width text rendering of a finalized bill. Writing the text to disk
//! is the store's job (`estore-db`); this module only builds the string.
//!
//! ```text
//! =================================
//!          ELECTRONIC STORE
//! =================================
//! Bill Number: B1a2b3c4d
//! Date: 2024-03-01 14:05:09
//! Cashier ID: U9f8e7d6c
//! ---------------------------------
//! Items:
//! Phone Charger x3 = $45.00
//! ---------------------------------
//! Total Amount: $45.00
//! =================================
//! Thank you for shopping with us!
//! ```

use crate::bill::Bill;
use crate::RECEIPT_WIDTH;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders `bill` as receipt text with `store_name` centred in the header.
pub fn render_receipt(bill: &Bill, store_name: &str) -> String {
    let banner = "=".repeat(RECEIPT_WIDTH);
    let rule = "-".repeat(RECEIPT_WIDTH);

    let mut lines = vec![
        banner.clone(),
        format!(
            "{:^width$}",
            store_name.to_uppercase(),
            width = RECEIPT_WIDTH
        ),
        banner.clone(),
        format!("Bill Number: {}", bill.id),
        format!("Date: {}", bill.created_at.format(DATE_FORMAT)),
        format!("Cashier ID: {}", bill.cashier_id),
        rule.clone(),
        "Items:".to_string(),
    ];
    lines.extend(bill.items.iter().map(|line| {
        format!(
            "{} x{} = {}",
            line.item_name,
            line.quantity,
            line.subtotal()
        )
    }));
    lines.extend([
        rule,
        format!("Total Amount: {}", bill.total()),
        banner,
        "Thank you for shopping with us!".to_string(),
    ]);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::SaleItem;
    use crate::money::Money;
    use chrono::{Local, TimeZone};

    fn sample_bill() -> Bill {
        let at = Local.with_ymd_and_hms(2024, 3, 1, 14, 5, 9).unwrap();
        let mut bill = Bill::new("B1a2b3c4d", "U9f8e7d6c", at);
        bill.add_line(SaleItem {
            id: "L00000001".to_string(),
            item_id: "I00000001".to_string(),
            item_name: "Phone Charger".to_string(),
            quantity: 3,
            unit_price: Money::from_cents(1500),
        })
        .unwrap();
        bill
    }

    #[test]
    fn test_receipt_layout() {
        let text = render_receipt(&sample_bill(), "Electronic Store");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=================================");
        assert_eq!(lines[1].trim(), "ELECTRONIC STORE");
        assert_eq!(lines[1].len(), RECEIPT_WIDTH);
        assert_eq!(lines[3], "Bill Number: B1a2b3c4d");
        assert_eq!(lines[4], "Date: 2024-03-01 14:05:09");
        assert_eq!(lines[5], "Cashier ID: U9f8e7d6c");
        assert_eq!(lines[7], "Items:");
        assert_eq!(lines[8], "Phone Charger x3 = $45.00");
        assert_eq!(lines[10], "Total Amount: $45.00");
        assert_eq!(lines.last(), Some(&"Thank you for shopping with us!"));
        assert_eq!(lines.len(), 13);
        assert!(text.ends_with("us!\n"));
    }

    #[test]
    fn test_empty_bill_still_renders_total() {
        let at = Local.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let bill = Bill::new("B00000000", "U00000000", at);
        let text = render_receipt(&bill, "Shop");
        assert!(text.contains("Items:\n---------------------------------\n"));
        assert!(text.contains("Total Amount: $0.00"));
    }
}
