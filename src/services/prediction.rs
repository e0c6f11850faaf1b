use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, TimeZone};
use colored::Colorize;
use log::info;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Write;

use crate::config::settings::PredictionSettings;
use crate::database::{self, CategoryId, DbConn};
use crate::recommendation::{self, parse_receipt_timestamp, CategoryScore};

const UNKNOWN_CATEGORY: &str = "<unknown>";

/// A category score with its display name, for printing.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedScore {
    pub category_id: CategoryId,
    pub name: String,
    pub score: f64,
}

pub struct PredictionService {
    settings: PredictionSettings,
}

impl PredictionService {
    pub fn new(settings: PredictionSettings) -> Self {
        Self { settings }
    }

    /// Score categories for `at` (or the configured default instant) and
    /// print them, best first.
    pub fn run<W: Write>(&self, conn: &mut DbConn, at: Option<&str>, out: &mut W) -> Result<Vec<NamedScore>> {
        let target = self.resolve_target(at)?;
        info!("=== Predicting for {} ===", target);

        let scores = recommendation::recommend(conn, &target, &self.settings.reference_offset)?;
        let named = attach_names(conn, scores)?;

        print_scores(&named, out)?;
        Ok(named)
    }

    fn resolve_target(&self, at: Option<&str>) -> Result<DateTime<FixedOffset>> {
        let text = at.unwrap_or(self.settings.default_target);
        parse_target(text, &self.settings.reference_offset)
    }
}

/// Read a wall-clock time in one of the receipt layouts as an instant in
/// `offset`.
pub fn parse_target(value: &str, offset: &FixedOffset) -> Result<DateTime<FixedOffset>> {
    let naive = parse_receipt_timestamp(value).context("Invalid target time")?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| anyhow::anyhow!("Target time {} does not exist at offset {}", value, offset))
}

fn attach_names(conn: &mut DbConn, scores: Vec<CategoryScore>) -> Result<Vec<NamedScore>> {
    let names: HashMap<CategoryId, String> = database::categories::list_all(conn)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let mut named: Vec<NamedScore> = scores
        .into_iter()
        .map(|s| NamedScore {
            category_id: s.category_id,
            name: names
                .get(&s.category_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
            score: s.score,
        })
        .collect();

    named.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.category_id.cmp(&b.category_id))
    });
    Ok(named)
}

fn print_scores<W: Write>(scores: &[NamedScore], out: &mut W) -> Result<()> {
    if scores.is_empty() {
        writeln!(out, "No categorized purchases yet, nothing to predict from.")?;
        return Ok(());
    }

    for s in scores {
        writeln!(
            out,
            "Category ID: {}, name: {}, score: {:.6}",
            s.category_id,
            s.name.bold(),
            s.score
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::{memory_connection, seed_categories, seed_purchase};
    use chrono::{Datelike, Timelike, Weekday};

    fn service() -> PredictionService {
        PredictionService::new(PredictionSettings::default())
    }

    #[test]
    fn test_parse_target_uses_offset() {
        let offset = FixedOffset::east_opt(3600).unwrap();

        let target = parse_target("2023-12-24 15:30:00", &offset).unwrap();

        assert_eq!(target.offset().local_minus_utc(), 3600);
        assert_eq!(target.hour(), 15);
        assert_eq!(target.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_parse_target_rejects_garbage() {
        let offset = FixedOffset::east_opt(0).unwrap();

        assert!(parse_target("Christmas Eve", &offset).is_err());
    }

    #[test]
    fn test_run_prints_best_first() {
        let mut conn = memory_connection();
        seed_categories(&mut conn, &["Dairy", "Meat"]);
        // 2025-01-13 is a Monday.
        seed_purchase(&mut conn, "2025-01-13 09:00:00", "Milk", Some(1));
        seed_purchase(&mut conn, "2025-07-16 09:00:00", "Steak", Some(2));
        seed_purchase(&mut conn, "2025-01-14 09:00:00", "Ghost", Some(9));
        let mut out = Vec::new();

        let scores = service()
            .run(&mut conn, Some("2025-01-20 12:00:00"), &mut out)
            .unwrap();

        let ids: Vec<_> = scores.iter().map(|s| s.category_id).collect();
        assert_eq!(ids, vec![1, 9, 2]);
        assert_eq!(scores[0].name, "Dairy");
        assert_eq!(scores[1].name, UNKNOWN_CATEGORY);
        assert!((scores[0].score - 1.0).abs() < 1e-12);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Category ID: 1, name: "));
        assert!(printed.contains("score: 1.000000"));
    }

    #[test]
    fn test_run_with_empty_history() {
        let mut conn = memory_connection();
        seed_categories(&mut conn, &["Dairy"]);
        let mut out = Vec::new();

        let scores = service().run(&mut conn, None, &mut out).unwrap();

        assert!(scores.is_empty());
        assert!(String::from_utf8(out).unwrap().contains("nothing to predict"));
    }

    #[test]
    fn test_corrupt_history_prints_nothing() {
        let mut conn = memory_connection();
        seed_categories(&mut conn, &["Dairy"]);
        seed_purchase(&mut conn, "2025-01-13 09:00:00", "Milk", Some(1));
        seed_purchase(&mut conn, "13/01/2025", "Cream", Some(1));
        let mut out = Vec::new();

        assert!(service().run(&mut conn, None, &mut out).is_err());
        assert!(out.is_empty());
    }
}
