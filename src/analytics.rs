use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{
    GradedAnswer, InterviewScore, InterviewSession, Metric, PerformanceStats,
    PerformanceSummary, Trend, TrendDirection,
};

/// Sessions compared on each side of the improvement window.
pub const IMPROVEMENT_WINDOW: usize = 3;

pub fn compute_summary(
    interviews: &[InterviewSession],
    answers: &[GradedAnswer],
) -> PerformanceSummary {
    let stats = compute_stats(interviews, answers);
    summarize(&stats)
}

pub fn compute_stats(interviews: &[InterviewSession], answers: &[GradedAnswer]) -> PerformanceStats {
    let scores: Vec<i64> = group_scores(answers)
        .into_iter()
        .map(|group| group.score)
        .collect();

    PerformanceStats {
        total_interviews: interviews.len(),
        average_score: mean(&scores),
        best_performance: scores.iter().copied().max().unwrap_or(0),
        improvement: improvement(&scores),
        scores,
    }
}

pub fn summarize(stats: &PerformanceStats) -> PerformanceSummary {
    let total = stats.total_interviews as f64;
    let previous_total = stats.total_interviews.saturating_sub(1) as f64;

    let older = stats.scores.get(1..).unwrap_or(&[]);
    let previous_average = mean(older);
    let previous_best = older.iter().copied().max().unwrap_or(0);

    let improvement_trend = Trend {
        direction: if stats.improvement >= 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        },
        display_value: format!("{}%", to_fixed(stats.improvement.abs(), 1)),
    };

    PerformanceSummary {
        total_interviews: Metric {
            value: stats.total_interviews.to_string(),
            trend: trend(total, previous_total),
        },
        average_score: Metric {
            value: to_fixed(stats.average_score, 1),
            trend: trend(stats.average_score, previous_average),
        },
        best_performance: Metric {
            value: format!("{}%", stats.best_performance),
            trend: trend(stats.best_performance as f64, previous_best as f64),
        },
        improvement: Metric {
            value: format!("{}%", signed(stats.improvement, 0)),
            trend: improvement_trend,
        },
    }
}

/// Groups valid ratings by interview and reduces each group to its rounded
/// mean. Groups are ordered by their most recent answer date, newest first;
/// groups without any dated answer go last, ties keep first-seen order.
pub fn group_scores(answers: &[GradedAnswer]) -> Vec<InterviewScore> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<i64>, Option<NaiveDate>)> = Vec::new();

    for answer in answers {
        let Some(rating) = answer.rating.as_deref().and_then(parse_rating) else {
            continue;
        };

        let slot = *index.entry(answer.interview_ref.as_str()).or_insert_with(|| {
            groups.push((answer.interview_ref.as_str(), Vec::new(), None));
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.1.push(rating);
        group.2 = group.2.max(answer.created_at);
    }

    let mut scores: Vec<InterviewScore> = groups
        .into_iter()
        .map(|(interview_ref, ratings, latest_at)| InterviewScore {
            interview_ref: interview_ref.to_string(),
            score: rounded_mean(&ratings),
            latest_at,
        })
        .collect();

    // Option orders None below Some, so reversing puts undated groups last.
    scores.sort_by(|a, b| b.latest_at.cmp(&a.latest_at));
    scores
}

/// Percentage change between the mean of the newest window of scores and the
/// window before it. Zero until two full windows exist.
pub fn improvement(scores: &[i64]) -> f64 {
    if scores.len() < IMPROVEMENT_WINDOW * 2 {
        return 0.0;
    }

    let recent = mean(&scores[..IMPROVEMENT_WINDOW]);
    let previous = mean(&scores[IMPROVEMENT_WINDOW..IMPROVEMENT_WINDOW * 2]);

    if previous > 0.0 {
        (recent - previous) / previous * 100.0
    } else {
        0.0
    }
}

pub fn trend(current: f64, previous: f64) -> Trend {
    if previous == 0.0 || previous.is_nan() {
        return Trend {
            direction: TrendDirection::Up,
            display_value: "+0%".to_string(),
        };
    }

    let change = (current - previous) / previous * 100.0;
    Trend {
        direction: if change >= 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        },
        display_value: format!("{}%", signed(change, 1)),
    }
}

/// Reads the leading integer of a rating the way loosely typed graders store
/// it: surrounding whitespace and trailing text are ignored ("85/100" is 85).
pub fn parse_rating(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let value: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -value } else { value })
}

pub fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().map(|value| *value as f64).sum::<f64>() / values.len() as f64
    }
}

pub fn rounded_mean(values: &[i64]) -> i64 {
    round_half_up(mean(values))
}

pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Fixed-point formatting with ties rounded away from zero.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return format!("{:.*}", digits, 0.0);
    }

    let factor = 10f64.powi(digits as i32);
    let scaled = value.abs() * factor;
    // A tie only when the product is exact; otherwise `format!` already
    // rounds the true binary value correctly.
    let residual = value.abs().mul_add(factor, -scaled);
    if scaled.fract() == 0.5 && residual == 0.0 {
        let rounded = (scaled.floor() + 1.0) / factor;
        return format!("{:.*}", digits, rounded.copysign(value));
    }

    format!("{:.*}", digits, value)
}

fn signed(value: f64, digits: usize) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{}", to_fixed(value, digits))
}
