//! Fixed matching vocabularies.
//!
//! The technology list and the experience-level synonym sets are part of the
//! scoring contract: changing them changes scores, so they live here as
//! constants rather than configuration.

/// Technologies recognized inside free-text experience/education/achievements.
/// Matched as lowercase substrings of the profile narrative and the job text.
pub const TECH_KEYWORDS: &[&str] = &[
    "python",
    "javascript",
    "java",
    "react",
    "django",
    "sql",
    "mongodb",
    "aws",
    "docker",
    "kubernetes",
    "machine learning",
    "data science",
    "frontend",
    "backend",
    "fullstack",
    "api",
    "rest",
    "microservices",
];

/// Seniority synonym sets. A profile's `experience_level` is mapped to the
/// set containing it; any synonym of that set appearing in the job text fires
/// the level signal. Russian synonyms are intentional; the source channels
/// are Russian-speaking.
pub const LEVEL_KEYWORDS: &[(&str, &[&str])] = &[
    ("junior", &["junior", "intern", "entry", "начинающий", "стажер"]),
    ("middle", &["middle", "mid", "experienced", "опытный"]),
    ("senior", &["senior", "lead", "старший", "ведущий", "главный"]),
];

/// Returns the synonym set whose members include the given (lowercased)
/// experience level, if any.
pub fn level_synonyms(level: &str) -> Option<&'static [&'static str]> {
    LEVEL_KEYWORDS
        .iter()
        .find(|(_, synonyms)| synonyms.contains(&level))
        .map(|(_, synonyms)| *synonyms)
}
