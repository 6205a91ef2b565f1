//! Enhancement calls. Unlike ingestion these are advisory: creative
//! temperature, and a failure is reported to the caller as an LLM error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enhance::prompts::{
    DESCRIPTION_PROMPT_TEMPLATE, DESCRIPTION_SYSTEM, ENHANCE_PROMPT_TEMPLATE, ENHANCE_SYSTEM,
    SKILLS_PROMPT_TEMPLATE, SKILLS_SYSTEM,
};
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{CompletionOptions, LlmClient};
use crate::models::resume::{EducationEntry, ExperienceEntry};

const ENHANCE_TEMPERATURE: f32 = 0.7;
const SKILLS_MAX_TOKENS: u32 = 300;
const DESCRIPTION_MAX_TOKENS: u32 = 500;
pub const MAX_SUGGESTED_SKILLS: usize = 15;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeEnhancements {
    pub suggested_skills: Vec<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub ats_keywords: Vec<String>,
    pub career_recommendations: Vec<String>,
}

/// Asks the model for ATS keywords, strengths and gaps in a parsed resume.
pub async fn suggest_enhancements(
    resume_data: &Value,
    llm: &LlmClient,
) -> Result<ResumeEnhancements, AppError> {
    let resume_json = serde_json::to_string_pretty(resume_data)
        .map_err(|e| AppError::Internal(e.into()))?;
    let prompt = ENHANCE_PROMPT_TEMPLATE.replace("{resume_json}", &resume_json);
    let system = format!("{ENHANCE_SYSTEM} {JSON_ONLY_SYSTEM}");

    llm.call_json::<ResumeEnhancements>(&prompt, &system, CompletionOptions::json(ENHANCE_TEMPERATURE))
        .await
        .map_err(|e| AppError::Llm(format!("Resume enhancement failed: {e}")))
}

/// Suggests up to 15 skills from experience and education.
pub async fn suggest_skills(
    experience: &[ExperienceEntry],
    education: &[EducationEntry],
    llm: &LlmClient,
) -> Result<Vec<String>, AppError> {
    let prompt = build_skills_prompt(experience, education);
    let text = llm
        .call_text(
            &prompt,
            SKILLS_SYSTEM,
            CompletionOptions::text(ENHANCE_TEMPERATURE, SKILLS_MAX_TOKENS),
        )
        .await
        .map_err(|e| AppError::Llm(format!("Skill suggestion failed: {e}")))?;

    Ok(parse_skill_list(&text))
}

/// Rewrites a resume passage in a stronger, ATS-friendly voice.
pub async fn enhance_description(
    text: &str,
    context: Option<&str>,
    llm: &LlmClient,
) -> Result<String, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let context = context.map(str::trim).filter(|c| !c.is_empty()).unwrap_or("text");
    let prompt = DESCRIPTION_PROMPT_TEMPLATE
        .replace("{context}", context)
        .replace("{text}", text);

    llm.call_text(
        &prompt,
        DESCRIPTION_SYSTEM,
        CompletionOptions::text(ENHANCE_TEMPERATURE, DESCRIPTION_MAX_TOKENS),
    )
    .await
    .map_err(|e| AppError::Llm(format!("Description enhancement failed: {e}")))
}

fn build_skills_prompt(experience: &[ExperienceEntry], education: &[EducationEntry]) -> String {
    let experience_lines = experience
        .iter()
        .map(|e| {
            format!(
                "- {} at {}: {}",
                e.title,
                e.company,
                e.description.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let education_lines = education
        .iter()
        .map(|e| {
            format!(
                "- {} in {} from {}",
                e.degree.as_deref().unwrap_or(""),
                e.field.as_deref().unwrap_or(""),
                e.institution.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    SKILLS_PROMPT_TEMPLATE
        .replace("{experience}", &experience_lines)
        .replace("{education}", &education_lines)
}

/// Splits a comma- or line-separated model reply into at most 15 skills.
fn parse_skill_list(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(|s| s.trim().trim_start_matches(['-', '*', '•']).trim())
        .map(|s| s.trim_end_matches('.'))
        .filter(|s| !s.is_empty())
        .take(MAX_SUGGESTED_SKILLS)
        .map(String::from)
        .collect()
}
