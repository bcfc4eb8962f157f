use std::collections::HashMap;

use chrono::NaiveDate;

use crate::analytics::{parse_rating, rounded_mean};
use crate::models::{DailyCount, GradedAnswer, PerformancePoint, TimeSeries};

/// Chart label for a bucket, e.g. "Oct 18".
pub fn date_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Builds the performance-over-time and interviews-by-day series.
///
/// Each interview is dated by its first usable answer in input order, which
/// is its most recent one when answers arrive newest first. Answers without a
/// date or a numeric rating are skipped.
pub fn compute_time_series(answers: &[GradedAnswer]) -> TimeSeries {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, NaiveDate, Vec<i64>)> = Vec::new();

    for answer in answers {
        let (Some(created_at), Some(rating)) = (
            answer.created_at,
            answer.rating.as_deref().and_then(parse_rating),
        ) else {
            continue;
        };

        let slot = *index.entry(answer.interview_ref.as_str()).or_insert_with(|| {
            groups.push((answer.interview_ref.as_str(), created_at, Vec::new()));
            groups.len() - 1
        });
        groups[slot].2.push(rating);
    }

    let mut performance_by_date: Vec<PerformancePoint> = groups
        .into_iter()
        .map(|(interview_ref, date, ratings)| PerformancePoint {
            date,
            label: date_label(date),
            interview_ref: interview_ref.to_string(),
            score: rounded_mean(&ratings),
        })
        .collect();
    performance_by_date.sort_by_key(|point| point.date);

    let interviews_by_date = count_by_day(&performance_by_date);

    TimeSeries {
        performance_by_date,
        interviews_by_date,
    }
}

/// Folds date-sorted points into one bucket per calendar day.
pub fn count_by_day(points: &[PerformancePoint]) -> Vec<DailyCount> {
    let mut buckets: Vec<DailyCount> = Vec::new();

    for point in points {
        match buckets.iter_mut().find(|bucket| bucket.date == point.date) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(DailyCount {
                date: point.date,
                label: point.label.clone(),
                count: 1,
            }),
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(interview_ref: &str, rating: Option<&str>, date: Option<NaiveDate>) -> GradedAnswer {
        GradedAnswer {
            interview_ref: interview_ref.to_string(),
            question: "Why this role?".to_string(),
            rating: rating.map(str::to_string),
            created_at: date,
        }
    }

    fn day(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    #[test]
    fn same_day_interviews_share_a_bucket() {
        let answers = vec![
            answer("mock-a", Some("80"), day(2026, 10, 18)),
            answer("mock-b", Some("90"), day(2026, 10, 18)),
        ];
        let series = compute_time_series(&answers);

        assert_eq!(series.performance_by_date.len(), 2);
        assert_eq!(series.performance_by_date[0].score, 80);
        assert_eq!(series.performance_by_date[1].score, 90);
        assert_eq!(series.interviews_by_date.len(), 1);
        assert_eq!(series.interviews_by_date[0].label, "Oct 18");
        assert_eq!(series.interviews_by_date[0].count, 2);
    }

    #[test]
    fn points_sort_by_date_across_years() {
        let answers = vec![
            answer("mock-new", Some("70"), day(2026, 1, 5)),
            answer("mock-old", Some("60"), day(2025, 12, 30)),
        ];
        let series = compute_time_series(&answers);
        let refs: Vec<&str> = series
            .performance_by_date
            .iter()
            .map(|point| point.interview_ref.as_str())
            .collect();
        assert_eq!(refs, vec!["mock-old", "mock-new"]);
    }

    #[test]
    fn same_label_in_different_years_stays_separate() {
        let answers = vec![
            answer("mock-a", Some("70"), day(2026, 3, 1)),
            answer("mock-b", Some("75"), day(2025, 3, 1)),
        ];
        let series = compute_time_series(&answers);
        assert_eq!(series.interviews_by_date.len(), 2);
        assert!(series.interviews_by_date.iter().all(|bucket| bucket.label == "Mar 1"));
    }

    #[test]
    fn interview_is_dated_by_its_first_answer() {
        let answers = vec![
            answer("mock-a", Some("90"), day(2026, 4, 10)),
            answer("mock-a", Some("80"), day(2026, 4, 9)),
            answer("mock-a", Some("84"), day(2026, 4, 8)),
        ];
        let series = compute_time_series(&answers);
        assert_eq!(series.performance_by_date.len(), 1);
        assert_eq!(series.performance_by_date[0].date, day(2026, 4, 10).unwrap());
        assert_eq!(series.performance_by_date[0].score, 85);
    }

    #[test]
    fn skips_undated_and_unrated_answers() {
        let answers = vec![
            answer("mock-a", Some("90"), None),
            answer("mock-a", Some("70"), day(2026, 5, 2)),
            answer("mock-b", Some("pending"), day(2026, 5, 3)),
            answer("mock-c", None, day(2026, 5, 4)),
        ];
        let series = compute_time_series(&answers);
        assert_eq!(series.performance_by_date.len(), 1);
        assert_eq!(series.performance_by_date[0].score, 70);
        assert_eq!(series.interviews_by_date[0].count, 1);
    }

    #[test]
    fn empty_answers_give_empty_series() {
        assert_eq!(compute_time_series(&[]), TimeSeries::default());
    }
}
