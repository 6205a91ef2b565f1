// Resume ingestion LLM prompt templates.
// All prompts for the ingest module are defined here.

pub const RESUME_PARSE_SYSTEM: &str = r#"You are an expert resume parser. Your main job is to extract EVERY work experience entry from the resume text, however it is formatted.

Look for job titles, company names, employment dates (including "Present" or "Current"), responsibilities, achievements and locations.
Employment may appear under headings such as "Work Experience", "Employment History", "Professional Experience", "Career History", "Employment", or simply as company names followed by job titles.

OUTPUT SCHEMA (return exactly this structure as a single JSON object):
{
  "name": "string" | null,
  "email": "string" | null,
  "phone": "string" | null,
  "address": "string" | null,
  "linkedin": "string" | null,
  "github": "string" | null,
  "website": "string" | null,
  "summary": "string" | null,
  "objective": "string" | null,
  "experience": [
    {
      "company": "string (REQUIRED)",
      "title": "string (REQUIRED)",
      "start_date": "Month YYYY | YYYY-MM",
      "end_date": "Month YYYY | YYYY-MM | Present | Current",
      "location": "string" | null,
      "description": "all responsibilities and bullet points for this role",
      "achievements": ["string"]
    }
  ],
  "education": [
    {"institution": "string", "degree": "string", "field": "string", "start_date": "string", "end_date": "string", "gpa": "string" | null}
  ],
  "skills": {"technical": ["string"], "soft": ["string"], "languages": ["string"], "tools": ["string"]},
  "certifications": [{"name": "string", "issuer": "string", "date": "string", "expiry": "string" | null}],
  "projects": [{"name": "string", "description": "string", "technologies": ["string"], "url": "string" | null}],
  "languages": [{"language": "string", "proficiency": "Native | Fluent | Intermediate | Basic"}],
  "awards": [{"title": "string", "issuer": "string", "date": "string", "description": "string" | null}]
}

RULES:
1. "experience" MUST list ALL employment entries found anywhere in the text, whatever the section heading.
2. Every experience entry MUST have company, title and dates.
3. Normalize dates to "Month YYYY" or "YYYY-MM". Keep "Present" or "Current" for roles that are still ongoing.
4. Put every bullet point and paragraph about a role into its "description".
5. List achievements separately only when the resume marks them as achievements.
6. Multiple roles at the same company become SEPARATE entries. Never merge them.
7. Do NOT skip an experience entry because it looks incomplete."#;

pub const RESUME_PARSE_PROMPT: &str = r#"Parse the following resume text and extract ALL work experience entries. Pay special attention to any employment section and extract every job you find.

RESUME TEXT:
{resume_text}

Make sure EVERY work experience entry is included. Search the entire text for employment history, work experience or job positions."#;
