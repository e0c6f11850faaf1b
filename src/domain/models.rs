use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::database::{NewPurchase, NewReceipt};

/// Receipt as produced by the OCR step: a date, a product → price map and the
/// printed total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawReceipt {
    pub date: String,
    pub values: BTreeMap<String, String>,
    pub amount: String,
}

/// One line of a receipt whose price parsed as a number.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    pub product: String,
    pub price: String,
    pub price_value: f64,
}

impl RawReceipt {
    /// Lines with a numeric price. OCR noise such as discount markers or
    /// half-read prices is dropped.
    pub fn priced_lines(&self) -> Vec<ReceiptLine> {
        self.values
            .iter()
            .filter_map(|(product, price)| match price.trim().parse::<f64>() {
                Ok(price_value) if price_value.is_finite() => Some(ReceiptLine {
                    product: product.clone(),
                    price: price.clone(),
                    price_value,
                }),
                _ => {
                    warn!("Skipping '{}': price '{}' is not a usable number", product, price);
                    None
                }
            })
            .collect()
    }

    pub fn into_new_receipt(self, lines: &[ReceiptLine]) -> NewReceipt {
        NewReceipt {
            date: self.date,
            amount: self.amount,
            purchases: lines
                .iter()
                .map(|line| NewPurchase {
                    product: line.product.clone(),
                    price: line.price.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_and_filter_prices() {
        let json = r#"{
            "date": "2025-01-06 10:00:00",
            "values": {"Milk": "2.50", "Bread": "1.20", "Discount": "-0.5A", "Eggs": "abc"},
            "amount": "3.70"
        }"#;

        let raw: RawReceipt = serde_json::from_str(json).unwrap();
        let lines = raw.priced_lines();

        let products: Vec<_> = lines.iter().map(|l| l.product.as_str()).collect();
        assert_eq!(products, vec!["Bread", "Milk"]);
        assert!((lines.iter().map(|l| l.price_value).sum::<f64>() - 3.70).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_prices_are_dropped() {
        let raw = RawReceipt {
            date: "2025-01-06 10:00:00".to_string(),
            values: BTreeMap::from([
                ("Milk".to_string(), "2.50".to_string()),
                ("Smudge".to_string(), "inf".to_string()),
                ("Stain".to_string(), "NaN".to_string()),
            ]),
            amount: "2.50".to_string(),
        };

        let lines = raw.priced_lines();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product, "Milk");
    }

    #[test]
    fn test_into_new_receipt_keeps_price_text() {
        let raw = RawReceipt {
            date: "2025-01-06 10:00:00".to_string(),
            values: BTreeMap::from([("Milk".to_string(), "2.50".to_string())]),
            amount: "2.50".to_string(),
        };
        let lines = raw.priced_lines();

        let receipt = raw.into_new_receipt(&lines);

        assert_eq!(receipt.date, "2025-01-06 10:00:00");
        assert_eq!(receipt.purchases.len(), 1);
        assert_eq!(receipt.purchases[0].price, "2.50");
    }
}
