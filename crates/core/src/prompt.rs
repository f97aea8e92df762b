//! Prompt composition for generation requests.
//!
//! An art style's `prompt_template` either contains a `{prompt}` placeholder,
//! which is replaced by the subject text, or is a plain list of style
//! keywords, which is appended after the subject.

use crate::error::CoreError;

/// Placeholder substituted with the subject text in art style templates.
pub const SUBJECT_PLACEHOLDER: &str = "{prompt}";

/// Maximum length of a composed prompt in characters.
pub const MAX_PROMPT_LENGTH: usize = 4_000;

/// Validate a subject prompt: must be non-blank and within the length limit.
pub fn validate_prompt(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation("Prompt must not be empty".to_string()));
    }
    let len = text.chars().count();
    if len > MAX_PROMPT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Prompt exceeds maximum length of {MAX_PROMPT_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Combine a subject prompt with an optional art style template.
pub fn compose_prompt(subject: &str, style_template: Option<&str>) -> String {
    let subject = subject.trim();
    match style_template.map(str::trim) {
        None | Some("") => subject.to_string(),
        Some(template) if template.contains(SUBJECT_PLACEHOLDER) => {
            template.replace(SUBJECT_PLACEHOLDER, subject)
        }
        Some(template) => format!("{subject}, {template}"),
    }
}

/// Drop a blank negative prompt so it is omitted from the request body.
pub fn normalize_negative_prompt(negative: Option<&str>) -> Option<String> {
    negative
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn no_template_returns_subject() {
        assert_eq!(compose_prompt("  city skyline ", None), "city skyline");
        assert_eq!(compose_prompt("city skyline", Some("   ")), "city skyline");
    }

    #[test]
    fn placeholder_is_substituted() {
        let out = compose_prompt("power station", Some("news broadcast still of {prompt}, 4k"));
        assert_eq!(out, "news broadcast still of power station, 4k");
    }

    #[test]
    fn template_without_placeholder_is_appended() {
        let out = compose_prompt("ink mountains", Some("chinese ink wash, soft light"));
        assert_eq!(out, "ink mountains, chinese ink wash, soft light");
    }

    #[test]
    fn blank_prompt_rejected() {
        assert_matches!(validate_prompt(" \n"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overlong_prompt_rejected() {
        let long = "画".repeat(MAX_PROMPT_LENGTH + 1);
        assert_matches!(validate_prompt(&long), Err(CoreError::Validation(m)) if m.contains("maximum length"));
        assert!(validate_prompt(&"画".repeat(MAX_PROMPT_LENGTH)).is_ok());
    }

    #[test]
    fn blank_negative_prompt_dropped() {
        assert_eq!(normalize_negative_prompt(Some("  ")), None);
        assert_eq!(normalize_negative_prompt(None), None);
        assert_eq!(
            normalize_negative_prompt(Some(" blurry ")),
            Some("blurry".to_string())
        );
    }
}
