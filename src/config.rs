use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    /// Estimated length of one practice interview.
    #[serde(default = "default_minutes_per_interview")]
    pub minutes_per_interview: u64,
    /// Interview count at which a user is considered experienced.
    #[serde(default = "default_experienced_after")]
    pub experienced_after: usize,
    #[serde(default = "default_top_performer_score")]
    pub top_performer_score: i64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            minutes_per_interview: default_minutes_per_interview(),
            experienced_after: default_experienced_after(),
            top_performer_score: default_top_performer_score(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

fn default_minutes_per_interview() -> u64 {
    15
}

fn default_experienced_after() -> usize {
    10
}

fn default_top_performer_score() -> i64 {
    80
}

fn default_recent_limit() -> usize {
    5
}

impl Config {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_uses_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.profile.minutes_per_interview, 15);
        assert_eq!(config.profile.experienced_after, 10);
        assert_eq!(config.profile.top_performer_score, 80);
        assert_eq!(config.report.recent_limit, 5);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse("[profile]\nminutes_per_interview = 30\n").unwrap();
        assert_eq!(config.profile.minutes_per_interview, 30);
        assert_eq!(config.profile.experienced_after, 10);
        assert_eq!(config.report.recent_limit, 5);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(Config::parse("[report]\nrecent_limit = \"many\"\n").is_err());
    }
}
