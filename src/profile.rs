use crate::analytics::{parse_rating, rounded_mean};
use crate::config::ProfileConfig;
use crate::models::{GradedAnswer, InterviewSession, Level, ProfileStats};

/// Profile-page rollup. Unlike the summary, the average here is taken over
/// every answer rather than per interview, and an answer that was never
/// rated counts as zero. Ratings that are present but not numeric are skipped.
pub fn compute_profile(
    interviews: &[InterviewSession],
    answers: &[GradedAnswer],
    config: &ProfileConfig,
) -> ProfileStats {
    let ratings: Vec<i64> = answers
        .iter()
        .filter_map(|answer| {
            let raw = answer.rating.as_deref().filter(|raw| !raw.is_empty());
            parse_rating(raw.unwrap_or("0"))
        })
        .collect();

    let total_interviews = interviews.len();
    let average_score = rounded_mean(&ratings);
    let experienced = total_interviews >= config.experienced_after;

    let mut badges = vec!["Professional".to_string()];
    if experienced {
        badges.push("Experienced".to_string());
    }
    if average_score >= config.top_performer_score {
        badges.push("Top Performer".to_string());
    }

    ProfileStats {
        total_interviews,
        average_score,
        practice_minutes: total_interviews as u64 * config.minutes_per_interview,
        level: if experienced {
            Level::Advanced
        } else {
            Level::Beginner
        },
        badges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interviews(count: usize) -> Vec<InterviewSession> {
        (0..count)
            .map(|i| InterviewSession {
                id: format!("mock-{i}"),
                job_position: "Data Analyst".to_string(),
                created_at: None,
            })
            .collect()
    }

    fn rated(rating: Option<&str>) -> GradedAnswer {
        GradedAnswer {
            interview_ref: "mock-0".to_string(),
            question: "Explain a join".to_string(),
            rating: rating.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn new_user_is_a_beginner() {
        let profile = compute_profile(&[], &[], &ProfileConfig::default());
        assert_eq!(profile.total_interviews, 0);
        assert_eq!(profile.average_score, 0);
        assert_eq!(profile.practice_minutes, 0);
        assert_eq!(profile.level, Level::Beginner);
        assert_eq!(profile.badges, vec!["Professional"]);
    }

    #[test]
    fn averages_every_numeric_answer() {
        let answers = vec![rated(Some("90")), rated(Some("81")), rated(Some("?"))];
        let profile = compute_profile(&interviews(2), &answers, &ProfileConfig::default());
        assert_eq!(profile.average_score, 86);
        assert_eq!(profile.practice_minutes, 30);
        assert!(profile.badges.contains(&"Top Performer".to_string()));
    }

    #[test]
    fn unrated_answers_count_as_zero() {
        let answers = vec![rated(Some("90")), rated(Some("81")), rated(None), rated(Some(""))];
        let profile = compute_profile(&interviews(2), &answers, &ProfileConfig::default());
        assert_eq!(profile.average_score, 43);
        assert!(!profile.badges.contains(&"Top Performer".to_string()));
    }

    #[test]
    fn experienced_users_level_up() {
        let config = ProfileConfig {
            minutes_per_interview: 20,
            ..ProfileConfig::default()
        };
        let profile = compute_profile(&interviews(10), &[rated(Some("60"))], &config);
        assert_eq!(profile.level, Level::Advanced);
        assert_eq!(profile.practice_minutes, 200);
        assert_eq!(profile.badges, vec!["Professional", "Experienced"]);
    }
}
