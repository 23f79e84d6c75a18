use crate::Error;
use serde::Deserialize;

/// Token usage reported by the deployment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// The subset of a chat-completions response this crate reads.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Decode a response body. Anything that is not the expected JSON shape
    /// is reported as [`Error::MalformedResponse`].
    pub fn parse(body: &str) -> Result<Self, Error> {
        serde_json::from_str(body)
            .map_err(|e| Error::malformed(format!("invalid completion JSON: {e}")))
    }

    /// Finish reason of the first choice, if any.
    pub fn finish_reason(&self) -> Option<&str> {
        self.choices.first()?.finish_reason.as_deref()
    }

    /// Text of the first choice.
    pub fn into_text(self) -> Result<String, Error> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::malformed("response contained no choices"))?;

        choice
            .message
            .content
            .ok_or_else(|| Error::malformed("first choice has no message content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_choice_is_used() {
        let body = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "first" }, "finish_reason": "stop" },
                { "message": { "role": "assistant", "content": "second" } }
            ],
            "usage": { "prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7 }
        }"#;

        let response = CompletionResponse::parse(body).unwrap();
        assert_eq!(response.finish_reason(), Some("stop"));
        assert_eq!(response.usage.as_ref().unwrap().total_tokens, 7);
        assert_eq!(response.into_text().unwrap(), "first");
    }

    #[test]
    fn test_empty_choices_is_malformed() {
        let response = CompletionResponse::parse(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(response.into_text(), Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_missing_choices_is_malformed() {
        let result = CompletionResponse::parse(r#"{"error":"invalid key"}"#);
        assert!(matches!(result, Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let result = CompletionResponse::parse("<html>Bad Gateway</html>");
        assert!(matches!(result, Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_null_content_is_malformed() {
        let response =
            CompletionResponse::parse(r#"{"choices":[{"message":{"content":null},"finish_reason":"content_filter"}]}"#)
                .unwrap();
        assert_eq!(response.finish_reason(), Some("content_filter"));
        assert!(matches!(response.into_text(), Err(Error::MalformedResponse(_))));
    }
}
