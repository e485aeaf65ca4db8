//! Parsed-résumé field application.
//!
//! The résumé-parsing collaborator returns a loose `field → value` map: some
//! values are strings, some are lists, some are nested objects, and some are
//! the parser's junk placeholders ("string", "none", "null", "", literal 0).
//! This module decides, per field, what actually lands in the profile row.
//! The decision is pure so every rule is unit-testable without a database.

use serde_json::Value;

/// Placeholder strings the parser emits when it found nothing. Compared
/// case-insensitively after trimming.
const JUNK_VALUES: &[&str] = &["string", "none", "null", ""];

/// Sanitized column updates derived from one parsed-résumé map. `None` means
/// "leave the stored value alone".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeFieldUpdate {
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub citizenship: Option<String>,
    pub address: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub experience_level: Option<String>,
    pub skills: Option<String>,
    pub languages: Option<String>,
    pub interests: Option<String>,
    pub achievements: Option<String>,
    pub desired_position: Option<String>,
    pub desired_salary: Option<i32>,
    pub desired_city: Option<String>,
    pub desired_format: Option<String>,
    pub desired_work_time: Option<String>,
    pub industries: Option<String>,
    /// The raw extracted document text. Always applied when supplied.
    pub resume_text: Option<String>,
}

impl ResumeFieldUpdate {
    /// Builds the update from the collaborator's field map.
    pub fn from_parsed(fields: &serde_json::Map<String, Value>, resume_text: Option<String>) -> Self {
        let text = |name: &str| fields.get(name).and_then(|v| sanitize_text(name, v));

        Self {
            full_name: text("full_name"),
            gender: text("gender"),
            citizenship: text("citizenship"),
            address: text("address"),
            education: text("education"),
            experience: text("experience"),
            experience_level: text("experience_level"),
            skills: text("skills"),
            languages: text("languages"),
            interests: text("interests"),
            achievements: text("achievements"),
            desired_position: text("desired_position"),
            desired_salary: fields.get("desired_salary").and_then(sanitize_salary),
            desired_city: text("desired_city"),
            desired_format: text("desired_format"),
            desired_work_time: text("desired_work_time"),
            industries: text("industries"),
            resume_text,
        }
    }
}

/// Converts one parsed value into storable column text, or `None` to skip it.
///
/// Lists and objects are stored re-encoded as JSON so the field normalizer
/// can recover the structure later. Integer `0` is a parser artifact for
/// every field except the salary and is skipped.
fn sanitize_text(field: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if JUNK_VALUES.contains(&trimmed.to_lowercase().as_str()) {
                None
            } else {
                Some(s.clone())
            }
        }
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).ok(),
        Value::Number(n) => {
            if n.as_i64() == Some(0) && field != "desired_salary" {
                None
            } else {
                Some(n.to_string())
            }
        }
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
    }
}

fn sanitize_salary(value: &Value) -> Option<i32> {
    match value {
        // Zero is accepted for the salary field only.
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parsed(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_plain_strings_pass_through() {
        let update = ResumeFieldUpdate::from_parsed(
            &parsed(json!({"full_name": "Ivan Ivanov", "desired_city": "Almaty"})),
            None,
        );
        assert_eq!(update.full_name.as_deref(), Some("Ivan Ivanov"));
        assert_eq!(update.desired_city.as_deref(), Some("Almaty"));
        assert_eq!(update.skills, None);
    }

    #[test]
    fn test_junk_placeholders_skipped() {
        for junk in ["string", "None", "NULL", "", "  null  "] {
            let update =
                ResumeFieldUpdate::from_parsed(&parsed(json!({ "gender": junk })), None);
            assert_eq!(update.gender, None, "{junk:?} should be skipped");
        }
    }

    #[test]
    fn test_lists_stored_as_json() {
        let update = ResumeFieldUpdate::from_parsed(
            &parsed(json!({"skills": ["Python", "SQL"]})),
            None,
        );
        assert_eq!(update.skills.as_deref(), Some(r#"["Python","SQL"]"#));
    }

    #[test]
    fn test_objects_stored_as_json() {
        let update = ResumeFieldUpdate::from_parsed(
            &parsed(json!({"education": {"university": "MSU", "degree": "BSc"}})),
            None,
        );
        let stored = update.education.unwrap();
        assert!(serde_json::from_str::<Value>(&stored).unwrap().is_object());
    }

    #[test]
    fn test_integer_zero_skipped_except_salary() {
        let update = ResumeFieldUpdate::from_parsed(
            &parsed(json!({"experience_level": 0, "desired_salary": 0})),
            None,
        );
        assert_eq!(update.experience_level, None);
        assert_eq!(update.desired_salary, Some(0));
    }

    #[test]
    fn test_salary_accepts_numeric_string() {
        let update = ResumeFieldUpdate::from_parsed(
            &parsed(json!({"desired_salary": "450000"})),
            None,
        );
        assert_eq!(update.desired_salary, Some(450_000));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let update = ResumeFieldUpdate::from_parsed(
            &parsed(json!({"favourite_color": "blue"})),
            None,
        );
        assert_eq!(update, ResumeFieldUpdate::default());
    }

    #[test]
    fn test_resume_text_carried_through() {
        let update = ResumeFieldUpdate::from_parsed(
            &parsed(json!({})),
            Some("raw document text".to_string()),
        );
        assert_eq!(update.resume_text.as_deref(), Some("raw document text"));
    }
}
