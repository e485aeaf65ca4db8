//! Deterministic, explainable profile-to-job relevance scoring.
//!
//! This is the fallback brain of the recommendation engine: when the external
//! recommender is down or returns garbage, every stored job is scored with
//! this additive model. The weights are part of the contract and are not
//! tunable per call.
//!
//! | signal                               | weight |
//! |--------------------------------------|--------|
//! | exact desired-position in title      | 15     |
//! | partial position word in title       | 8      |
//! | profile skill token in job text      | 4 each |
//! | narrative tech keyword in job text   | 3 each |
//! | experience-level synonym in job text | 6      |
//! | industry token in job text           | 5 each |
//! | desired city in job location         | 4      |
//! | desired format in job format         | 3      |
//! | desired work time in job text        | 2      |
//! | 3+ signal categories fired           | +2     |
//!
//! Exact and partial position matches are mutually exclusive. A total score
//! of 0 means "not a candidate", not "worst rank".

use std::collections::BTreeSet;

use crate::matching::normalize::{normalize_scalar, normalize_tokens};
use crate::matching::vocab::{level_synonyms, TECH_KEYWORDS};
use crate::models::job::JobPost;
use crate::models::profile::UserProfile;

const WEIGHT_POSITION_EXACT: u32 = 15;
const WEIGHT_POSITION_PARTIAL: u32 = 8;
const WEIGHT_PER_SKILL: u32 = 4;
const WEIGHT_PER_NARRATIVE_KEYWORD: u32 = 3;
const WEIGHT_LEVEL: u32 = 6;
const WEIGHT_PER_INDUSTRY: u32 = 5;
const WEIGHT_CITY: u32 = 4;
const WEIGHT_FORMAT: u32 = 3;
const WEIGHT_WORK_TIME: u32 = 2;
const WEIGHT_MULTI_SIGNAL_BONUS: u32 = 2;
const MULTI_SIGNAL_THRESHOLD: usize = 3;

/// Normalized matching inputs extracted from a profile once, then reused
/// across the whole job batch.
#[derive(Debug, Clone, Default)]
pub struct ProfileSignals {
    pub skills: BTreeSet<String>,
    pub industries: BTreeSet<String>,
    pub position: Option<String>,
    pub city: Option<String>,
    pub format: Option<String>,
    pub work_time: Option<String>,
    pub experience_level: Option<String>,
    /// Technology vocabulary terms found in the free-text experience,
    /// education, and achievements fields. Kept in vocabulary order.
    pub narrative_keywords: Vec<&'static str>,
}

impl ProfileSignals {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let narrative = [
            profile.experience.as_deref(),
            profile.education.as_deref(),
            profile.achievements.as_deref(),
        ]
        .iter()
        .flatten()
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

        let narrative_keywords = TECH_KEYWORDS
            .iter()
            .copied()
            .filter(|kw| narrative.contains(kw))
            .collect();

        Self {
            skills: normalize_tokens(profile.skills.as_deref()),
            industries: normalize_tokens(profile.industries.as_deref()),
            position: normalize_scalar(profile.desired_position.as_deref()),
            city: normalize_scalar(profile.desired_city.as_deref()),
            format: normalize_scalar(profile.desired_format.as_deref()),
            work_time: normalize_scalar(profile.desired_work_time.as_deref()),
            experience_level: normalize_scalar(profile.experience_level.as_deref()),
            narrative_keywords,
        }
    }
}

/// Scores one job against a profile. Returns the additive score and one
/// human-readable reason per fired signal, in fixed signal order.
///
/// Pure and total: no I/O, no randomness. Identical inputs give identical
/// scores and reason ordering.
pub fn relevance_score(signals: &ProfileSignals, job: &JobPost) -> (u32, Vec<String>) {
    let job_title = job.title.to_lowercase();
    let job_location = job.location.as_deref().unwrap_or("").to_lowercase();
    let job_format = job.format.as_deref().unwrap_or("").to_lowercase();
    let job_text = format!("{} {}", job_title, job.description.to_lowercase());

    let mut score = 0u32;
    let mut reasons = Vec::new();

    // Desired position: exact substring takes precedence over word overlap.
    if let Some(position) = &signals.position {
        if job_title.contains(position.as_str()) {
            score += WEIGHT_POSITION_EXACT;
            reasons.push(format!("Exact position match: {position}"));
        } else if position
            .split_whitespace()
            .any(|word| word.chars().count() > 2 && job_title.contains(word))
        {
            score += WEIGHT_POSITION_PARTIAL;
            reasons.push(format!("Partial position match: {position}"));
        }
    }

    // Profile skills, one hit per distinct token.
    let skill_hits: Vec<&str> = signals
        .skills
        .iter()
        .filter(|skill| job_text.contains(skill.as_str()))
        .map(String::as_str)
        .collect();
    if !skill_hits.is_empty() {
        score += skill_hits.len() as u32 * WEIGHT_PER_SKILL;
        reasons.push(format!(
            "Skills from profile: {}",
            sample(&skill_hits, 4)
        ));
    }

    // Technology keywords mined from the narrative fields.
    let keyword_hits: Vec<&str> = signals
        .narrative_keywords
        .iter()
        .copied()
        .filter(|kw| job_text.contains(kw))
        .collect();
    if !keyword_hits.is_empty() {
        score += keyword_hits.len() as u32 * WEIGHT_PER_NARRATIVE_KEYWORD;
        reasons.push(format!(
            "Skills from experience: {}",
            sample(&keyword_hits, 3)
        ));
    }

    // Seniority: any synonym of the profile's level appearing in the job text.
    if let Some(level) = &signals.experience_level {
        if let Some(synonyms) = level_synonyms(level) {
            if synonyms.iter().any(|kw| job_text.contains(kw)) {
                score += WEIGHT_LEVEL;
                reasons.push(format!("Experience level: {level}"));
            }
        }
    }

    let industry_hits: Vec<&str> = signals
        .industries
        .iter()
        .filter(|industry| job_text.contains(industry.as_str()))
        .map(String::as_str)
        .collect();
    if !industry_hits.is_empty() {
        score += industry_hits.len() as u32 * WEIGHT_PER_INDUSTRY;
        reasons.push(format!("Industry: {}", sample(&industry_hits, 2)));
    }

    if let Some(city) = &signals.city {
        if job_location.contains(city.as_str()) {
            score += WEIGHT_CITY;
            reasons.push(format!("City: {city}"));
        }
    }

    if let Some(format) = &signals.format {
        if job_format.contains(format.as_str()) {
            score += WEIGHT_FORMAT;
            reasons.push(format!("Work format: {format}"));
        }
    }

    if let Some(work_time) = &signals.work_time {
        if job_text.contains(work_time.as_str()) {
            score += WEIGHT_WORK_TIME;
            reasons.push(format!("Work schedule: {work_time}"));
        }
    }

    if reasons.len() >= MULTI_SIGNAL_THRESHOLD {
        score += WEIGHT_MULTI_SIGNAL_BONUS;
        reasons.push("Multiple matching signals".to_string());
    }

    (score, reasons)
}

fn sample(items: &[&str], limit: usize) -> String {
    items[..items.len().min(limit)].join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn job(title: &str, description: &str) -> JobPost {
        JobPost {
            id: 1,
            title: title.to_string(),
            description: description.to_string(),
            source: "telegram".to_string(),
            link: None,
            source_channel: None,
            source_message_id: None,
            salary: None,
            location: None,
            format: None,
            work_time: None,
            industry: None,
            contact_info: None,
            published_at: None,
            parsed_at: None,
            deadline: None,
            created_at: NaiveDateTime::parse_from_str("2025-06-01T00:00:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            user_id: 1,
            full_name: None,
            gender: None,
            phone_number: None,
            email: None,
            citizenship: None,
            address: None,
            resume_text: None,
            education: None,
            experience: None,
            experience_level: None,
            skills: None,
            languages: None,
            interests: None,
            achievements: None,
            desired_position: None,
            desired_salary: None,
            desired_city: None,
            desired_format: None,
            desired_work_time: None,
            industries: None,
            updated_at: NaiveDateTime::parse_from_str(
                "2025-06-01T00:00:00",
                "%Y-%m-%dT%H:%M:%S",
            )
            .unwrap(),
        }
    }

    #[test]
    fn test_exact_position_match_scores_at_least_15() {
        let mut p = profile();
        p.desired_position = Some("Backend Developer".to_string());
        let signals = ProfileSignals::from_profile(&p);

        let (score, reasons) = relevance_score(&signals, &job("Backend Developer Needed", ""));
        assert!(score >= 15, "score was {score}");
        assert!(reasons[0].starts_with("Exact position match"));
    }

    #[test]
    fn test_partial_position_match_scores_8() {
        let mut p = profile();
        p.desired_position = Some("Backend Developer".to_string());
        let signals = ProfileSignals::from_profile(&p);

        let (score, reasons) = relevance_score(&signals, &job("Senior Developer (Go)", ""));
        assert_eq!(score, 8);
        assert!(reasons[0].starts_with("Partial position match"));
    }

    #[test]
    fn test_exact_and_partial_are_mutually_exclusive() {
        let mut p = profile();
        p.desired_position = Some("developer".to_string());
        let signals = ProfileSignals::from_profile(&p);

        // Exact fires; the partial word overlap must not add another 8.
        let (score, _) = relevance_score(&signals, &job("Developer wanted", ""));
        assert_eq!(score, 15);
    }

    #[test]
    fn test_short_position_words_ignored_for_partial_match() {
        let mut p = profile();
        p.desired_position = Some("QA engineer".to_string());
        let signals = ProfileSignals::from_profile(&p);

        // "qa" is two characters, so only "engineer" may fire the partial signal.
        let (score, _) = relevance_score(&signals, &job("qa lead", ""));
        assert_eq!(score, 0);
    }

    #[test]
    fn test_skills_and_industry_additive() {
        let mut p = profile();
        p.skills = Some("python, sql".to_string());
        p.industries = Some("fintech".to_string());
        let signals = ProfileSignals::from_profile(&p);

        // One skill hit (4) plus one industry hit (5); two categories, no bonus.
        let (score, reasons) =
            relevance_score(&signals, &job("Data engineer", "python in a fintech team"));
        assert_eq!(score, 9);
        assert_eq!(reasons.len(), 2);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let mut p = profile();
        p.skills = Some("python, sql".to_string());
        p.industries = Some("fintech".to_string());
        let signals = ProfileSignals::from_profile(&p);

        let (score, reasons) = relevance_score(&signals, &job("Barista", "coffee shop in Prague"));
        assert_eq!(score, 0);
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_narrative_keywords_score_3_each() {
        let mut p = profile();
        p.experience = Some("Built Django services on AWS".to_string());
        let signals = ProfileSignals::from_profile(&p);
        assert_eq!(signals.narrative_keywords, vec!["django", "aws"]);

        let (score, reasons) = relevance_score(
            &signals,
            &job("Python developer", "django monolith, aws deployment"),
        );
        assert_eq!(score, 6);
        assert_eq!(reasons.len(), 1);
    }

    #[test]
    fn test_experience_level_synonym_fires() {
        let mut p = profile();
        p.experience_level = Some("Senior".to_string());
        let signals = ProfileSignals::from_profile(&p);

        let (score, reasons) = relevance_score(&signals, &job("Lead engineer", ""));
        assert_eq!(score, 6);
        assert_eq!(reasons, vec!["Experience level: senior".to_string()]);
    }

    #[test]
    fn test_city_format_and_work_time_signals() {
        let mut p = profile();
        p.desired_city = Some("Berlin".to_string());
        p.desired_format = Some("remote".to_string());
        p.desired_work_time = Some("part-time".to_string());
        let signals = ProfileSignals::from_profile(&p);

        let mut j = job("Support agent", "part-time shifts");
        j.location = Some("Berlin, Germany".to_string());
        j.format = Some("remote".to_string());

        // 4 + 3 + 2, three categories fired → +2 bonus.
        let (score, reasons) = relevance_score(&signals, &j);
        assert_eq!(score, 11);
        assert_eq!(reasons.last().unwrap(), "Multiple matching signals");
    }

    #[test]
    fn test_multi_signal_bonus_needs_three_categories() {
        let mut p = profile();
        p.desired_city = Some("Berlin".to_string());
        p.desired_format = Some("remote".to_string());
        let signals = ProfileSignals::from_profile(&p);

        let mut j = job("Support agent", "");
        j.location = Some("Berlin".to_string());
        j.format = Some("remote".to_string());

        let (score, reasons) = relevance_score(&signals, &j);
        assert_eq!(score, 7);
        assert_eq!(reasons.len(), 2);
    }

    #[test]
    fn test_json_encoded_skills_are_normalized() {
        let mut p = profile();
        p.skills = Some(r#"["Python", "SQL"]"#.to_string());
        let signals = ProfileSignals::from_profile(&p);

        let (score, _) = relevance_score(&signals, &job("Analyst", "python and sql required"));
        assert_eq!(score, 8);
    }

    #[test]
    fn test_determinism() {
        let mut p = profile();
        p.skills = Some("python, sql, docker".to_string());
        p.industries = Some("fintech, banking".to_string());
        p.desired_position = Some("Backend Developer".to_string());
        let signals = ProfileSignals::from_profile(&p);
        let j = job(
            "Backend Developer",
            "python, docker, fintech and banking stack",
        );

        let first = relevance_score(&signals, &j);
        for _ in 0..10 {
            assert_eq!(relevance_score(&signals, &j), first);
        }
    }
}
