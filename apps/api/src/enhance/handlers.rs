//! Axum route handlers for the Enhancement API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enhance::service::{
    enhance_description, suggest_enhancements, suggest_skills, ResumeEnhancements,
};
use crate::errors::AppError;
use crate::models::resume::{null_as_default, EducationEntry, ExperienceEntry};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestSkillsRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Serialize)]
pub struct SuggestSkillsResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceDescriptionRequest {
    pub text: String,
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EnhanceDescriptionResponse {
    pub text: String,
}

/// POST /api/v1/resumes/enhance
///
/// Takes parsed resume data (typically a record returned by /parse).
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(resume_data): Json<Value>,
) -> Result<Json<ResumeEnhancements>, AppError> {
    if !resume_data.is_object() {
        return Err(AppError::Validation(
            "resume data must be a JSON object".to_string(),
        ));
    }
    let enhancements = suggest_enhancements(&resume_data, &state.llm).await?;
    Ok(Json(enhancements))
}

/// POST /api/v1/resumes/suggest-skills
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
    Json(request): Json<SuggestSkillsRequest>,
) -> Result<Json<SuggestSkillsResponse>, AppError> {
    if request.experience.is_empty() && request.education.is_empty() {
        return Err(AppError::Validation(
            "provide at least one experience or education entry".to_string(),
        ));
    }
    let skills = suggest_skills(&request.experience, &request.education, &state.llm).await?;
    Ok(Json(SuggestSkillsResponse { skills }))
}

/// POST /api/v1/resumes/enhance-description
pub async fn handle_enhance_description(
    State(state): State<AppState>,
    Json(request): Json<EnhanceDescriptionRequest>,
) -> Result<Json<EnhanceDescriptionResponse>, AppError> {
    let text = enhance_description(&request.text, request.context.as_deref(), &state.llm).await?;
    Ok(Json(EnhanceDescriptionResponse { text }))
}
