use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct InterviewSession {
    pub id: String,
    pub job_position: String,
    pub created_at: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct GradedAnswer {
    pub interview_ref: String,
    pub question: String,
    /// Raw rating as stored; may be missing or not a number.
    pub rating: Option<String>,
    pub created_at: Option<NaiveDate>,
}

/// Rounded mean rating of one interview's valid answers.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewScore {
    pub interview_ref: String,
    pub score: i64,
    pub latest_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub direction: TrendDirection,
    pub display_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub value: String,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub total_interviews: Metric,
    pub average_score: Metric,
    pub best_performance: Metric,
    pub improvement: Metric,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceStats {
    pub total_interviews: usize,
    /// Per-interview scores, most recent interview first.
    pub scores: Vec<i64>,
    pub average_score: f64,
    pub best_performance: i64,
    pub improvement: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub label: String,
    pub interview_ref: String,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub performance_by_date: Vec<PerformancePoint>,
    pub interviews_by_date: Vec<DailyCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    Beginner,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_interviews: usize,
    pub average_score: i64,
    pub practice_minutes: u64,
    pub level: Level,
    pub badges: Vec<String>,
}
