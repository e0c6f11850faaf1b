use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, TimeZone};

use super::types::{PurchaseRecord, ScoreValue};

const DAYS_PER_WEEK: i32 = 7;
const MONTHS_PER_YEAR: i32 = 12;

const WEEKDAY_WEIGHT: f64 = 0.5;
const WEEKDAY_SPREAD: f64 = 4.5;

const MONTH_WEIGHT: f64 = 0.3;
const MONTH_SPREAD: f64 = 8.0;

// Despite the name this is a flat per-record bonus, not a count normalized by
// purchase frequency. Kept as-is so existing scores do not shift.
const FREQUENCY_BONUS: f64 = 0.2;

/// Scores historical purchases by how close their weekday and month are to a
/// target instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalScorer {
    target_weekday: i32,
    target_month: i32,
}

impl TemporalScorer {
    /// Read the target's weekday and month in the `reference` zone, the zone
    /// stored receipt times are recorded in.
    pub fn new<Tz: TimeZone>(target: &DateTime<Tz>, reference: &FixedOffset) -> Self {
        let local = target.with_timezone(reference);
        Self::from_wall_clock(&local.naive_local())
    }

    pub fn from_wall_clock(target: &NaiveDateTime) -> Self {
        Self {
            target_weekday: weekday_index(target),
            target_month: target.month() as i32,
        }
    }

    pub fn score(&self, record: &PurchaseRecord) -> ScoreValue {
        self.score_at(&record.receipt_date)
    }

    pub fn score_at(&self, purchased_at: &NaiveDateTime) -> ScoreValue {
        self.weekday_term(purchased_at) + self.month_term(purchased_at) + FREQUENCY_BONUS
    }

    /// Gaussian decay over the forward distance from the target weekday.
    ///
    /// The distance only runs forward (a purchase the day before the target is
    /// six days away), so the term is not symmetric around the target.
    pub fn weekday_term(&self, purchased_at: &NaiveDateTime) -> ScoreValue {
        let distance = forward_weekday_distance(self.target_weekday, weekday_index(purchased_at));
        gaussian(distance, WEEKDAY_SPREAD) * WEEKDAY_WEIGHT
    }

    /// Gaussian decay over the shorter way round the year.
    pub fn month_term(&self, purchased_at: &NaiveDateTime) -> ScoreValue {
        let distance = folded_month_distance(self.target_month, purchased_at.month() as i32);
        gaussian(distance, MONTH_SPREAD) * MONTH_WEIGHT
    }
}

fn weekday_index(when: &NaiveDateTime) -> i32 {
    when.weekday().num_days_from_sunday() as i32
}

fn forward_weekday_distance(target: i32, purchase: i32) -> i32 {
    (purchase - target + DAYS_PER_WEEK) % DAYS_PER_WEEK
}

fn folded_month_distance(target: i32, purchase: i32) -> i32 {
    let distance = (purchase - target + MONTHS_PER_YEAR) % MONTHS_PER_YEAR;
    if distance > MONTHS_PER_YEAR / 2 {
        MONTHS_PER_YEAR - distance
    } else {
        distance
    }
}

fn gaussian(distance: i32, spread: f64) -> f64 {
    let distance = f64::from(distance);
    (-(distance * distance) / spread).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};
    use rstest::rstest;

    const EPSILON: f64 = 1e-12;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    // 2025-01-13 is a Monday.
    fn monday_in_january() -> TemporalScorer {
        TemporalScorer::from_wall_clock(&at(2025, 1, 13))
    }

    #[test]
    fn test_same_weekday_and_month_scores_one() {
        let scorer = monday_in_january();
        let purchase = at(2025, 1, 6);

        assert!((scorer.weekday_term(&purchase) - 0.5).abs() < EPSILON);
        assert!((scorer.month_term(&purchase) - 0.3).abs() < EPSILON);
        assert!((scorer.score_at(&purchase) - 1.0).abs() < EPSILON);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    #[case(6)]
    fn test_other_weekdays_score_below_maximum(#[case] days_later: i64) {
        let scorer = monday_in_january();
        let purchase = at(2025, 1, 6) + Duration::days(days_later);

        assert!(scorer.weekday_term(&purchase) < 0.5);
        assert!(scorer.weekday_term(&purchase) > 0.0);
    }

    #[test]
    fn test_following_day_weekday_term() {
        let scorer = monday_in_january();
        let tuesday = at(2025, 1, 7);

        let expected = (-1.0_f64 / 4.5).exp() * 0.5;
        assert!((scorer.weekday_term(&tuesday) - expected).abs() < EPSILON);
        assert!((scorer.weekday_term(&tuesday) - 0.4004).abs() < 1e-4);
    }

    #[test]
    fn test_weekday_distance_runs_forward_only() {
        let scorer = monday_in_january();
        let sunday_before = at(2025, 1, 12);
        let tuesday_after = at(2025, 1, 14);

        let before = scorer.weekday_term(&sunday_before);
        let after = scorer.weekday_term(&tuesday_after);

        assert!((before - (-36.0_f64 / 4.5).exp() * 0.5).abs() < EPSILON);
        assert!(after > before);
        assert!((after - before).abs() > 0.1);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    #[case(6)]
    fn test_month_term_is_symmetric(#[case] offset: u32) {
        for target_month in 1..=12u32 {
            let scorer = TemporalScorer::from_wall_clock(&at(2025, target_month, 1));
            let ahead = (target_month - 1 + offset) % 12 + 1;
            let behind = (target_month - 1 + 12 - offset) % 12 + 1;

            let ahead_term = scorer.month_term(&at(2025, ahead, 1));
            let behind_term = scorer.month_term(&at(2025, behind, 1));

            assert!(
                (ahead_term - behind_term).abs() < EPSILON,
                "month {target_month} offset {offset}: {ahead_term} vs {behind_term}"
            );
        }
    }

    #[test]
    fn test_opposite_month_term() {
        let scorer = monday_in_january();
        let july = at(2025, 7, 7);

        let expected = (-36.0_f64 / 8.0).exp() * 0.3;
        assert!((scorer.month_term(&july) - expected).abs() < EPSILON);
        assert!((scorer.month_term(&july) - 0.00333).abs() < 1e-5);
    }

    #[test]
    fn test_scores_stay_within_bounds() {
        let scorer = monday_in_january();
        let start = at(2024, 1, 1);

        for offset in 0..400 {
            let score = scorer.score_at(&(start + Duration::days(offset)));
            assert!(score > 0.2 && score <= 1.0 + EPSILON, "score {score} out of range");
        }
    }

    #[test]
    fn test_target_is_read_in_reference_zone() {
        // Sunday 23:30 UTC is already Monday in UTC+2.
        let target = Utc.with_ymd_and_hms(2025, 1, 12, 23, 30, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let monday = at(2025, 1, 13);

        let utc_scorer = TemporalScorer::new(&target, &utc);
        let shifted_scorer = TemporalScorer::new(&target, &plus_two);

        assert!((shifted_scorer.weekday_term(&monday) - 0.5).abs() < EPSILON);
        assert!(utc_scorer.weekday_term(&monday) < 0.5);
    }
}
