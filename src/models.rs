use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String
}

impl ChatMessage {

    pub fn system(content: &str) -> Self {
        Self { role: Role::System, content: content.to_string() }
    }

    pub fn user(content: &str) -> Self {
        Self { role: Role::User, content: content.to_string() }
    }

}

/// Body of a chat-completion call. Field names are the provider's wire keys.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_completion_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
    pub model: String
}

// providers omit `choices` or `usage` on some payloads, so both default
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Usage
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Choice {
    pub message: ChoiceMessage
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChoiceMessage {
    // null when the model answered with something other than text
    #[serde(default)]
    pub content: Option<String>
}

/// Token counters as reported by the provider. Not cross-checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Usage {
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64
}

impl CompletionResponse {

    /// Text of the first choice, if the provider returned any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_deref().unwrap_or(""))
    }

}
