use std::fmt::Write;

use crate::analytics;
use crate::config::ReportConfig;
use crate::models::{
    GradedAnswer, InterviewSession, Metric, PerformanceSummary, ProfileStats, TimeSeries,
};

fn metric_line(output: &mut String, title: &str, metric: &Metric) {
    let _ = writeln!(
        output,
        "- {}: {} ({} {})",
        title,
        metric.value,
        metric.trend.display_value,
        metric.trend.direction.arrow()
    );
}

pub fn build_report(
    email: &str,
    summary: &PerformanceSummary,
    series: &TimeSeries,
    profile: &ProfileStats,
    interviews: &[InterviewSession],
    answers: &[GradedAnswer],
    config: &ReportConfig,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Interview Performance Report");
    let _ = writeln!(output, "Generated for {}", email);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    metric_line(&mut output, "Total interviews", &summary.total_interviews);
    metric_line(&mut output, "Average score", &summary.average_score);
    metric_line(&mut output, "Best performance", &summary.best_performance);
    metric_line(&mut output, "Improvement", &summary.improvement);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Profile");
    let _ = writeln!(
        output,
        "- Level: {:?} ({})",
        profile.level,
        profile.badges.join(", ")
    );
    let _ = writeln!(output, "- Average answer score: {}%", profile.average_score);
    let _ = writeln!(output, "- Practice time: {} mins", profile.practice_minutes);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Interview Scores");

    let scores = analytics::group_scores(answers);
    if scores.is_empty() {
        let _ = writeln!(output, "No scored answers yet.");
    } else {
        for group in scores.iter().take(config.recent_limit) {
            let _ = writeln!(output, "- {}: {}%", group.interview_ref, group.score);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Performance Over Time");

    if series.performance_by_date.is_empty() {
        let _ = writeln!(output, "No scored answers yet.");
    } else {
        let _ = writeln!(output, "| Date | Interview | Score |");
        let _ = writeln!(output, "| --- | --- | --- |");
        for point in series.performance_by_date.iter() {
            let _ = writeln!(
                output,
                "| {} | {} | {}% |",
                point.label, point.interview_ref, point.score
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Interviews by Day");

    if series.interviews_by_date.is_empty() {
        let _ = writeln!(output, "No scored answers yet.");
    } else {
        for bucket in series.interviews_by_date.iter() {
            let _ = writeln!(output, "- {}: {}", bucket.label, bucket.count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Interviews");

    if interviews.is_empty() {
        let _ = writeln!(output, "No interviews recorded.");
    } else {
        for interview in interviews.iter().take(config.recent_limit) {
            let answered = answers
                .iter()
                .filter(|answer| answer.interview_ref == interview.id)
                .count();
            let date = interview
                .created_at
                .map(|date| date.to_string())
                .unwrap_or_else(|| "undated".to_string());
            let _ = writeln!(
                output,
                "- {} on {}: {} answers recorded",
                interview.job_position, date, answered
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Answers");

    if answers.is_empty() {
        let _ = writeln!(output, "No answers recorded.");
    } else {
        for answer in answers.iter().take(config.recent_limit) {
            let _ = writeln!(
                output,
                "- {}: {}",
                answer.question,
                answer.rating.as_deref().unwrap_or("not rated")
            );
        }
    }

    output
}
