//! Response Validator / Normalizer. Shapes the raw model document into a
//! `ParsedResumeRecord`.
//!
//! Purely structural: presence and shape are enforced, content (email, phone,
//! date formats) is not checked. Every key is optional on the way in; after
//! this pass collections always exist and every experience entry carries
//! company, title, start_date and end_date (blank when unknown).
//!
//! Experience entries are never dropped or merged:
//! `normalize(doc).experience.len() == doc["experience"].len()`.

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::warn;

use crate::ingest::error::{truncate_chars, IngestError};
use crate::ingest::parser::{json_kind, RawJsonDocument};
use crate::models::resume::{
    Award, Certification, EducationEntry, ExperienceEntry, LanguageProficiency,
    ParsedResumeRecord, Project, QualityWarning, RawData, SkillSet,
};

/// Default length of the original-text echo kept in `raw_data`.
pub const DEFAULT_RETENTION_CHARS: usize = 1000;

/// Hints that a top-level key holds experience data under the wrong name.
const EXPERIENCE_KEY_HINTS: &[&str] = &["experience", "work", "employment", "career", "job"];

/// Upload-side facts the normalizer records in `raw_data`.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeContext<'a> {
    pub original_text: &'a str,
    pub filename: &'a str,
    pub parsing_model: &'a str,
    pub retention_chars: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub record: ParsedResumeRecord,
    pub warnings: Vec<QualityWarning>,
}

pub fn normalize(doc: &RawJsonDocument, ctx: NormalizeContext<'_>) -> Result<Normalized, IngestError> {
    let mut warnings = Vec::new();

    let experience = normalize_experience(doc)?;
    if experience.is_empty() {
        let candidate_keys = misplaced_experience_keys(doc);
        warn!(
            ?candidate_keys,
            "No experience entries in parsed resume; flagging for review"
        );
        warnings.push(QualityWarning::NoExperience { candidate_keys });
    }
    for (index, entry) in experience.iter().enumerate() {
        let missing = entry.missing_fields();
        if !missing.is_empty() {
            warnings.push(QualityWarning::IncompleteExperience {
                index,
                missing: missing.into_iter().map(String::from).collect(),
            });
        }
    }

    let record = ParsedResumeRecord {
        name: text(doc.get("name")),
        email: text(doc.get("email")),
        phone: text(doc.get("phone")),
        address: text(doc.get("address")),
        linkedin: text(doc.get("linkedin")),
        github: text(doc.get("github")),
        website: text(doc.get("website")),
        summary: text(doc.get("summary")),
        objective: text(doc.get("objective")),
        experience,
        education: object_list(doc.get("education"), education_entry),
        skills: skill_set(doc.get("skills")),
        certifications: object_list(doc.get("certifications"), certification),
        projects: object_list(doc.get("projects"), project),
        languages: object_list(doc.get("languages"), language),
        awards: object_list(doc.get("awards"), award),
        raw_data: RawData {
            original_text: truncate_chars(ctx.original_text, ctx.retention_chars),
            filename: ctx.filename.to_string(),
            parsing_model: ctx.parsing_model.to_string(),
            parsed_at: Some(Utc::now()),
        },
    };

    Ok(Normalized { record, warnings })
}

fn normalize_experience(doc: &RawJsonDocument) -> Result<Vec<ExperienceEntry>, IngestError> {
    match doc.get("experience") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.iter().map(experience_entry).collect()),
        Some(other) => Err(IngestError::malformed(
            format!("\"experience\" must be a list, got {}", json_kind(other)),
            &other.to_string(),
        )),
    }
}

fn experience_entry(value: &Value) -> ExperienceEntry {
    match value {
        Value::Object(obj) => ExperienceEntry {
            company: first_text(obj, &["company", "employer", "organization"]).unwrap_or_default(),
            title: first_text(obj, &["title", "position", "role"]).unwrap_or_default(),
            start_date: first_text(obj, &["start_date", "from"]).unwrap_or_default(),
            end_date: first_text(obj, &["end_date", "to"]).unwrap_or_default(),
            location: text(obj.get("location")),
            description: text(obj.get("description")),
            achievements: string_list(obj.get("achievements")),
        },
        // Keep whatever the model gave us rather than lose the entry.
        other => ExperienceEntry {
            description: text(Some(other)),
            ..Default::default()
        },
    }
}

fn education_entry(value: &Value) -> EducationEntry {
    match value.as_object() {
        Some(obj) => EducationEntry {
            institution: first_text(obj, &["institution", "school", "university"]),
            degree: text(obj.get("degree")),
            field: first_text(obj, &["field", "field_of_study", "major"]),
            start_date: text(obj.get("start_date")),
            end_date: text(obj.get("end_date")),
            gpa: text(obj.get("gpa")),
        },
        None => EducationEntry {
            institution: text(Some(value)),
            ..Default::default()
        },
    }
}

fn certification(value: &Value) -> Certification {
    match value.as_object() {
        Some(obj) => Certification {
            name: text(obj.get("name")),
            issuer: text(obj.get("issuer")),
            date: text(obj.get("date")),
            expiry: text(obj.get("expiry")),
        },
        None => Certification {
            name: text(Some(value)),
            ..Default::default()
        },
    }
}

fn project(value: &Value) -> Project {
    match value.as_object() {
        Some(obj) => Project {
            name: text(obj.get("name")),
            description: text(obj.get("description")),
            technologies: string_list(obj.get("technologies")),
            url: text(obj.get("url")),
        },
        None => Project {
            name: text(Some(value)),
            ..Default::default()
        },
    }
}

fn language(value: &Value) -> LanguageProficiency {
    match value.as_object() {
        Some(obj) => LanguageProficiency {
            language: first_text(obj, &["language", "name"]),
            proficiency: first_text(obj, &["proficiency", "level"]),
        },
        None => LanguageProficiency {
            language: text(Some(value)),
            proficiency: None,
        },
    }
}

fn award(value: &Value) -> Award {
    match value.as_object() {
        Some(obj) => Award {
            title: first_text(obj, &["title", "name"]),
            issuer: text(obj.get("issuer")),
            date: text(obj.get("date")),
            description: text(obj.get("description")),
        },
        None => Award {
            title: text(Some(value)),
            ..Default::default()
        },
    }
}

fn skill_set(value: Option<&Value>) -> SkillSet {
    match value {
        Some(Value::Object(obj)) => SkillSet {
            technical: string_list(obj.get("technical")),
            soft: string_list(obj.get("soft")),
            languages: string_list(obj.get("languages")),
            tools: string_list(obj.get("tools")),
        },
        // A flat list carries no categories; file it under technical.
        Some(other @ (Value::Array(_) | Value::String(_))) => SkillSet {
            technical: string_list(Some(other)),
            ..Default::default()
        },
        _ => SkillSet::default(),
    }
}

/// Scalar coercion: strings pass through, numbers and booleans are
/// stringified, lists of scalars are joined by newlines. Blank → `None`.
fn text(value: Option<&Value>) -> Option<String> {
    let s = match value? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|v| text(Some(v)))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Null | Value::Object(_) => return None,
    };
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| text(obj.get(*k)))
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(|v| text(Some(v))).collect(),
        Some(other) => text(Some(other)).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Lists keep their order; a lone object becomes a one-item list.
fn object_list<T>(value: Option<&Value>, build: fn(&Value) -> T) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items.iter().filter(|v| !v.is_null()).map(build).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![build(other)],
    }
}

fn misplaced_experience_keys(doc: &RawJsonDocument) -> Vec<String> {
    doc.iter()
        .filter(|(key, value)| {
            let key = key.to_lowercase();
            key != "experience"
                && !value.is_null()
                && EXPERIENCE_KEY_HINTS.iter().any(|hint| key.contains(hint))
        })
        .map(|(key, _)| key.clone())
        .collect()
}
