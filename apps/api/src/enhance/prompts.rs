// Enhancement LLM prompt templates.

pub const ENHANCE_SYSTEM: &str = "You are a career advisor and resume expert.";

pub const ENHANCE_PROMPT_TEMPLATE: &str = r#"Analyze this resume data and provide enhancements:
- Suggest missing skills based on experience
- Identify strengths and areas for improvement
- Suggest keywords for ATS optimization
- Provide career recommendations

RESUME DATA:
{resume_json}

OUTPUT SCHEMA (return exactly this structure):
{
  "suggested_skills": ["string"],
  "strengths": ["string"],
  "improvements": ["string"],
  "ats_keywords": ["string"],
  "career_recommendations": ["string"]
}"#;

pub const SKILLS_SYSTEM: &str = "You are a career counselor and resume expert.";

pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Based on the following professional background, suggest 10-15 relevant skills that should be included in a resume. Cover both technical and soft skills.

WORK EXPERIENCE:
{experience}

EDUCATION:
{education}

Provide only a comma-separated list of skills, nothing else."#;

pub const DESCRIPTION_SYSTEM: &str = "You are an expert resume writer.";

pub const DESCRIPTION_PROMPT_TEMPLATE: &str = r#"Improve the following {context} so it reads as professional, impactful and ATS-friendly. Keep it concise and lead with action verbs.

ORIGINAL TEXT:
{text}

Return only the improved text, without explanations."#;
