use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A stored job post scraped from a Telegram channel.
///
/// All timestamps are timezone-naive (UTC wall clock): the storage layer does
/// not compare timezone-aware values consistently, so offsets are stripped at
/// the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobPost {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub source: String,
    pub link: Option<String>,
    pub source_channel: Option<String>,
    pub source_message_id: Option<i64>,
    pub salary: Option<i32>,
    pub location: Option<String>,
    pub format: Option<String>,
    pub work_time: Option<String>,
    pub industry: Option<String>,
    pub contact_info: Option<String>,
    pub published_at: Option<NaiveDateTime>,
    pub parsed_at: Option<NaiveDateTime>,
    pub deadline: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

fn default_source() -> String {
    "telegram".to_string()
}

/// A job record as delivered by the Telegram collector, before identity
/// resolution and timestamp normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingJob {
    pub title: String,
    pub description: String,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub source_channel: Option<String>,
    #[serde(default)]
    pub source_message_id: Option<i64>,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub work_time: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default, deserialize_with = "de_timestamp")]
    pub published_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "de_timestamp")]
    pub parsed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

/// Canonical identity of a job post.
///
/// The scraper supplies `(channel, message id)` when it read the post from
/// Telegram directly; older ingestion paths only carry content. One resolution
/// function, one key type, never two parallel lookup paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKey<'a> {
    /// Origin metadata, unique at the source.
    Strong { channel: &'a str, message_id: i64 },
    /// Content identity used when origin metadata is absent.
    Weak {
        title: &'a str,
        description: &'a str,
        source: &'a str,
    },
}

impl IncomingJob {
    /// Resolves the canonical identity key for this record.
    pub fn identity(&self) -> JobKey<'_> {
        match (self.source_channel.as_deref(), self.source_message_id) {
            (Some(channel), Some(message_id)) => JobKey::Strong {
                channel,
                message_id,
            },
            _ => JobKey::Weak {
                title: &self.title,
                description: &self.description,
                source: &self.source,
            },
        }
    }
}

/// Parses a collector timestamp into the naive-UTC form the storage layer
/// expects. Offset-bearing values (RFC 3339) are converted to UTC and the
/// offset dropped; offset-less values are taken as UTC wall clock already.
/// Both forms arrive in practice, depending on the collector's serializer.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(aware) => Ok(aware.naive_utc()),
        Err(_) => raw.parse::<NaiveDateTime>(),
    }
}

fn de_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.map(|s| parse_timestamp(&s).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incoming(channel: Option<&str>, message_id: Option<i64>) -> IncomingJob {
        IncomingJob {
            title: "Backend Developer".to_string(),
            description: "Django, PostgreSQL".to_string(),
            source: "telegram".to_string(),
            link: None,
            source_channel: channel.map(String::from),
            source_message_id: message_id,
            salary: None,
            location: None,
            format: None,
            work_time: None,
            industry: None,
            contact_info: None,
            published_at: None,
            parsed_at: None,
            deadline: None,
        }
    }

    #[test]
    fn test_strong_key_when_both_origin_fields_present() {
        let job = incoming(Some("jobforjunior"), Some(42));
        assert_eq!(
            job.identity(),
            JobKey::Strong {
                channel: "jobforjunior",
                message_id: 42
            }
        );
    }

    #[test]
    fn test_weak_key_when_message_id_missing() {
        let job = incoming(Some("jobforjunior"), None);
        assert!(matches!(job.identity(), JobKey::Weak { .. }));
    }

    #[test]
    fn test_weak_key_when_no_origin_metadata() {
        let job = incoming(None, None);
        assert_eq!(
            job.identity(),
            JobKey::Weak {
                title: "Backend Developer",
                description: "Django, PostgreSQL",
                source: "telegram",
            }
        );
    }

    #[test]
    fn test_offset_is_stripped_to_utc_wall_clock() {
        assert_eq!(
            parse_timestamp("2025-06-01T12:00:00+03:00").unwrap(),
            NaiveDateTime::parse_from_str("2025-06-01T09:00:00", "%Y-%m-%dT%H:%M:%S").unwrap()
        );
    }

    #[test]
    fn test_offsetless_timestamp_taken_as_utc() {
        assert_eq!(
            parse_timestamp("2025-06-01T12:00:00").unwrap(),
            NaiveDateTime::parse_from_str("2025-06-01T12:00:00", "%Y-%m-%dT%H:%M:%S").unwrap()
        );
    }

    #[test]
    fn test_ingest_payload_accepts_offsetless_timestamp() {
        // Collectors serialize datetimes with or without an offset; both
        // forms must deserialize rather than rejecting the whole record.
        let job: IncomingJob = serde_json::from_str(
            r#"{"title": "QA", "description": "x", "published_at": "2025-06-01T12:00:00"}"#,
        )
        .unwrap();
        assert_eq!(
            job.published_at,
            Some(NaiveDateTime::parse_from_str("2025-06-01T12:00:00", "%Y-%m-%dT%H:%M:%S").unwrap())
        );

        let job: IncomingJob = serde_json::from_str(
            r#"{"title": "QA", "description": "x", "published_at": "2025-06-01T12:00:00+03:00"}"#,
        )
        .unwrap();
        assert_eq!(
            job.published_at,
            Some(NaiveDateTime::parse_from_str("2025-06-01T09:00:00", "%Y-%m-%dT%H:%M:%S").unwrap())
        );
    }

    #[test]
    fn test_ingest_payload_accepts_null_timestamp() {
        let job: IncomingJob = serde_json::from_str(
            r#"{"title": "QA", "description": "x", "published_at": null}"#,
        )
        .unwrap();
        assert_eq!(job.published_at, None);
    }

    #[test]
    fn test_source_defaults_to_telegram() {
        let job: IncomingJob =
            serde_json::from_str(r#"{"title": "QA", "description": "manual testing"}"#).unwrap();
        assert_eq!(job.source, "telegram");
        assert!(matches!(job.identity(), JobKey::Weak { .. }));
    }
}
