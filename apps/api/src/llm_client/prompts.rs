// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction for fields the source text does not mention.
pub const MISSING_FIELDS_INSTRUCTION: &str = "\
    If a field is not present in the source, use null for scalars and an empty \
    array or object for collections. Never omit a key from the schema.";
