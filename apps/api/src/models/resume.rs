use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// End-date markers the parse prompt asks the model to keep for open-ended roles.
const ONGOING_MARKERS: &[&str] = &["present", "current", "now", "ongoing", "to date"];

/// The normalized output of one resume parse.
///
/// Every field is optional on the wire; after normalization the collections
/// are always present (possibly empty) and each experience entry carries its
/// four minimum fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedResumeRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
    pub objective: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: SkillSet,
    pub certifications: Vec<Certification>,
    pub projects: Vec<Project>,
    pub languages: Vec<LanguageProficiency>,
    pub awards: Vec<Award>,
    pub raw_data: RawData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
}

impl ExperienceEntry {
    /// True when the end date marks the role as still held ("Present", "Current", ...).
    pub fn is_ongoing(&self) -> bool {
        let end = self.end_date.trim().to_lowercase();
        ONGOING_MARKERS.iter().any(|m| end == *m)
    }

    /// Names of the minimum fields that normalization had to leave blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.company.trim().is_empty() {
            missing.push("company");
        }
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.start_date.trim().is_empty() && self.end_date.trim().is_empty() {
            missing.push("dates");
        }
        missing
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSet {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub languages: Vec<String>,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub expiry: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: Option<String>,
    pub description: Option<String>,
    pub technologies: Vec<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageProficiency {
    pub language: Option<String>,
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Award {
    pub title: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

/// Debug echo kept alongside the record. `original_text` is a bounded prefix
/// of the extracted text, not the full document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawData {
    pub original_text: String,
    pub filename: String,
    pub parsing_model: String,
    pub parsed_at: Option<DateTime<Utc>>,
}

/// What the storage layer receives: the parsed record plus upload metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalRecord {
    #[serde(flatten)]
    pub record: ParsedResumeRecord,
    pub original_filename: String,
    pub file_type: String,
    pub file_size: usize,
    pub quality_warnings: Vec<QualityWarning>,
    /// Set whenever a quality warning was raised; upstream should queue the
    /// record for manual review.
    pub needs_review: bool,
}

/// Non-fatal signal that the parse output looks incomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualityWarning {
    /// Extraction produced no usable text (image-only PDF, empty DOCX, ...).
    EmptyText,
    /// The model reported no employment history. `candidate_keys` lists
    /// top-level keys that look like misplaced experience data.
    NoExperience { candidate_keys: Vec<String> },
    /// An experience entry lacks company, title or both dates.
    IncompleteExperience {
        index: usize,
        missing: Vec<String>,
    },
}

/// Reads an explicit JSON `null` as the field's default. Records edited by
/// hand and sent back to the API often carry nulls in non-optional fields.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(end: &str) -> ExperienceEntry {
        ExperienceEntry {
            company: "Acme Corp".to_string(),
            title: "Engineer".to_string(),
            start_date: "Jan 2020".to_string(),
            end_date: end.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_is_ongoing_recognizes_present_and_current() {
        assert!(entry("Present").is_ongoing());
        assert!(entry(" current ").is_ongoing());
        assert!(!entry("Mar 2022").is_ongoing());
        assert!(!entry("").is_ongoing());
    }

    #[test]
    fn test_missing_fields_reports_blank_minimums() {
        let blank = ExperienceEntry::default();
        assert_eq!(blank.missing_fields(), vec!["company", "title", "dates"]);
        assert!(entry("Present").missing_fields().is_empty());
    }

    #[test]
    fn test_missing_fields_accepts_single_date() {
        let e = ExperienceEntry {
            start_date: String::new(),
            end_date: "2019".to_string(),
            ..entry("")
        };
        assert!(e.missing_fields().is_empty());
    }

    #[test]
    fn test_experience_entry_reads_nulls_as_blank() {
        let e: ExperienceEntry = serde_json::from_value(serde_json::json!({
            "company": null,
            "title": "Dev",
            "end_date": null,
            "achievements": null
        }))
        .unwrap();
        assert_eq!(e.company, "");
        assert_eq!(e.title, "Dev");
        assert!(e.achievements.is_empty());
        assert_eq!(e.missing_fields(), vec!["company", "dates"]);
    }

    #[test]
    fn test_final_record_flattens_parsed_fields() {
        let record = FinalRecord {
            record: ParsedResumeRecord {
                name: Some("Jane Doe".to_string()),
                ..Default::default()
            },
            original_filename: "cv.txt".to_string(),
            file_type: "txt".to_string(),
            file_size: 12,
            quality_warnings: vec![QualityWarning::EmptyText],
            needs_review: true,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "Jane Doe");
        assert_eq!(json["original_filename"], "cv.txt");
        assert_eq!(json["experience"], serde_json::json!([]));
        assert_eq!(json["quality_warnings"][0]["kind"], "empty_text");
    }
}
