//! Text-completion service boundary.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CompletionError;

/// A single grounded completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    /// System instruction constraining the answer.
    pub system: String,
    /// Grounding facts; empty for generic-knowledge questions.
    pub context: String,
    /// The user's question, verbatim.
    pub question: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// The user turn sent to the model: grounding block followed by the question.
    pub fn user_message(&self) -> String {
        if self.context.trim().is_empty() {
            format!("问题：{}", self.question)
        } else {
            format!("已知信息：\n{}\n\n问题：{}", self.context, self.question)
        }
    }
}

/// An external service that turns a request into one text completion.
///
/// Implementations enforce their own timeout and never retry.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_with_and_without_context() {
        let mut req = CompletionRequest {
            system: String::new(),
            context: "名称：梅".to_string(),
            question: "梅的象征？".to_string(),
            max_tokens: 64,
        };
        assert_eq!(req.user_message(), "已知信息：\n名称：梅\n\n问题：梅的象征？");

        req.context.clear();
        assert_eq!(req.user_message(), "问题：梅的象征？");
    }
}
