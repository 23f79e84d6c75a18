use serde::Serialize;

/// Role of a chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single chat message sent to the deployment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat-completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// A request carrying `prompt` as the only (user) message.
    pub fn user(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
            max_tokens,
        }
    }

    /// A request with a system instruction followed by the user prompt.
    pub fn with_system(system: impl Into<String>, prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            messages: vec![ChatMessage::system(system), ChatMessage::user(prompt)],
            max_tokens,
        }
    }

    /// Total characters of text across all messages.
    pub fn prompt_len(&self) -> usize {
        self.messages.iter().map(|m| m.content.chars().count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_request_wire_format() {
        let request = CompletionRequest::user("how is life going?", 4000);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "messages": [{ "role": "user", "content": "how is life going?" }],
                "max_tokens": 4000
            })
        );
    }

    #[test]
    fn test_system_request_orders_messages() {
        let request = CompletionRequest::with_system("Be terse.", "Hi", 50);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "Be terse.");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["max_tokens"], 50);
    }

    #[test]
    fn test_prompt_len_counts_all_message_text() {
        assert_eq!(CompletionRequest::user("héllo", 10).prompt_len(), 5);
        assert_eq!(CompletionRequest::with_system("ab", "cde", 10).prompt_len(), 5);
    }
}
