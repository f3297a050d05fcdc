use crate::error::CompletionError;
use crate::models::{ChatMessage, CompletionRequest};

pub const DEFAULT_MODEL: &str = "gpt-oss-120b";

/// Generation parameters applied to every request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationDefaults {
    pub max_completion_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
    pub model: String
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            max_completion_tokens: 2048,
            temperature: 1.0,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            model: DEFAULT_MODEL.to_string()
        }
    }
}

/// Builds a single-turn request from the user's prompt.
///
/// Surrounding whitespace (including the newline left by interactive input)
/// is stripped; a prompt with nothing left is rejected.
pub fn build(prompt: &str, defaults: &GenerationDefaults) -> Result<CompletionRequest, CompletionError> {

    build_with_system(None, prompt, defaults)

}

pub fn build_with_system(
    system: Option<&str>,
    prompt: &str,
    defaults: &GenerationDefaults
) -> Result<CompletionRequest, CompletionError> {

    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(CompletionError::EmptyPrompt);
    }

    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system.map(str::trim).filter(|s| !s.is_empty()) {
        messages.push(ChatMessage::system(system));
    }
    messages.push(ChatMessage::user(prompt));

    Ok(CompletionRequest {
        messages,
        max_completion_tokens: defaults.max_completion_tokens,
        temperature: defaults.temperature,
        top_p: defaults.top_p,
        frequency_penalty: defaults.frequency_penalty,
        presence_penalty: defaults.presence_penalty,
        model: defaults.model.clone()
    })

}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::models::Role;

    #[test]
    fn test_single_user_message_with_defaults() {

        let defaults = GenerationDefaults::default();
        let request = build("What is 2+2?", &defaults).unwrap();

        assert_eq!(request.messages, vec![ChatMessage::user("What is 2+2?")]);
        assert_eq!(request.max_completion_tokens, 2048);
        assert_eq!(request.temperature, 1.0);
        assert_eq!(request.top_p, 1.0);
        assert_eq!(request.frequency_penalty, 0.0);
        assert_eq!(request.presence_penalty, 0.0);
        assert_eq!(request.model, "gpt-oss-120b");

    }

    #[test]
    fn test_interactive_line_endings_are_stripped() {

        let defaults = GenerationDefaults::default();

        let unix = build("What is 2+2?\n", &defaults).unwrap();
        let windows = build("  What is 2+2?\r\n", &defaults).unwrap();

        assert_eq!(unix.messages[0].content, "What is 2+2?");
        assert_eq!(unix, windows, "same prompt should build the same request");

    }

    #[test]
    fn test_blank_prompt_is_rejected() {

        let defaults = GenerationDefaults::default();

        assert!(matches!(build("", &defaults), Err(CompletionError::EmptyPrompt)));
        assert!(matches!(build(" \t\r\n", &defaults), Err(CompletionError::EmptyPrompt)));

    }

    #[test]
    fn test_system_message_precedes_prompt() {

        let defaults = GenerationDefaults::default();
        let request = build_with_system(Some("Be terse."), "Hi", &defaults).unwrap();

        let roles: Vec<Role> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User]);
        assert_eq!(request.messages[0].content, "Be terse.");

        // blank system text is dropped rather than sent
        let request = build_with_system(Some("   "), "Hi", &defaults).unwrap();
        assert_eq!(request.messages.len(), 1);

    }

    #[test]
    fn test_model_override_is_carried() {

        let defaults = GenerationDefaults { model: "llama-3.1-8b-instant".to_string(), ..Default::default() };
        let request = build("Hi", &defaults).unwrap();

        assert_eq!(request.model, "llama-3.1-8b-instant");

    }

}
