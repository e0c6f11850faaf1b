use log::warn;

use super::scorer::TemporalScorer;
use super::types::{CategoryScore, PurchaseRecord, ScoreMap, ScoreValue};

pub fn aggregate<'a, I>(scorer: &TemporalScorer, records: I) -> Vec<CategoryScore>
where
    I: IntoIterator<Item = &'a PurchaseRecord>,
{
    fold_scores(records, |record| scorer.score(record))
}

/// Sum per-record scores into one total per category in a single pass.
///
/// Category ids are used as opaque keys. Only categories that appear in
/// `records` get an entry; the output order is unspecified.
pub fn fold_scores<'a, I, F>(records: I, score: F) -> Vec<CategoryScore>
where
    I: IntoIterator<Item = &'a PurchaseRecord>,
    F: Fn(&PurchaseRecord) -> ScoreValue,
{
    let mut totals = ScoreMap::new();

    for record in records {
        let Some(category_id) = record.category_id else {
            warn!(
                "Skipping purchase {} ('{}'): no category",
                record.purchase_id, record.product
            );
            continue;
        };

        totals
            .entry(category_id)
            .or_insert_with(|| CategoryScore::new(category_id))
            .score += score(record);
    }

    totals.into_values().collect()
}
