use chrono::NaiveDateTime;
use std::collections::HashMap;

use crate::database::{CategoryId, PurchaseId};

pub type ScoreValue = f64;
pub type ScoreMap = HashMap<CategoryId, CategoryScore>;

/// A categorized purchase together with the wall-clock time of its receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRecord {
    pub purchase_id: PurchaseId,
    pub product: String,
    pub price: String,
    pub category_id: Option<CategoryId>,
    pub receipt_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub category_id: CategoryId,
    pub score: ScoreValue,
}

impl CategoryScore {
    pub fn new(category_id: CategoryId) -> Self {
        Self {
            category_id,
            score: 0.0,
        }
    }
}
