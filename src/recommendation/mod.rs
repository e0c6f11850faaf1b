pub mod aggregator;
pub mod loader;
pub mod scorer;
pub mod timestamps;
pub mod types;

use anyhow::Result;
use chrono::{DateTime, FixedOffset, TimeZone};
use log::info;

use crate::database::DbConn;

pub use aggregator::aggregate;
pub use loader::load_purchase_history;
pub use scorer::TemporalScorer;
pub use timestamps::parse_receipt_timestamp;
pub use types::{CategoryScore, PurchaseRecord};

/// Score every category with purchase history against `target`.
///
/// History is read fresh on every call. Receipt times are taken as wall-clock
/// times in `reference`, and the target is converted into that zone before its
/// weekday and month are read.
pub fn recommend<Tz: TimeZone>(
    conn: &mut DbConn,
    target: &DateTime<Tz>,
    reference: &FixedOffset,
) -> Result<Vec<CategoryScore>> {
    let history = load_purchase_history(conn)?;
    info!("  → Loaded {} categorized purchases", history.len());

    let scorer = TemporalScorer::new(target, reference);
    let scores = aggregate(&scorer, &history);
    info!("  → Scored {} categories", scores.len());

    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::{memory_connection, seed_categories, seed_purchase};
    use std::collections::HashMap;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_recommend_end_to_end() {
        let mut conn = memory_connection();
        seed_categories(&mut conn, &["Dairy", "Meat", "Vegetables"]);
        seed_purchase(&mut conn, "2025-01-06 10:00:00", "Milk", Some(1));
        seed_purchase(&mut conn, "2025-01-06 10:00:00", "Chicken", Some(2));
        seed_purchase(&mut conn, "2025-01-07 15:00:00", "Carrots", Some(3));
        seed_purchase(&mut conn, "2025-02-03 10:00:00", "Milk", Some(1));

        let target = utc().with_ymd_and_hms(2025, 1, 13, 10, 0, 0).unwrap();
        let scores: HashMap<_, _> = recommend(&mut conn, &target, &utc())
            .unwrap()
            .into_iter()
            .map(|s| (s.category_id, s.score))
            .collect();

        assert_eq!(scores.len(), 3);
        assert!((scores[&2] - 1.0).abs() < 1e-12);
        let february = (-1.0_f64 / 8.0).exp() * 0.3;
        assert!((scores[&1] - (1.0 + 0.5 + february + 0.2)).abs() < 1e-12);
        assert!(scores[&3] < scores[&2]);
    }

    #[test]
    fn test_recommend_with_no_history() {
        let mut conn = memory_connection();
        seed_categories(&mut conn, &["Dairy"]);

        let target = utc().with_ymd_and_hms(2025, 1, 13, 10, 0, 0).unwrap();

        assert!(recommend(&mut conn, &target, &utc()).unwrap().is_empty());
    }
}
