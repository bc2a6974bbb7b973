//! DTOs for the chat-completion wire contract.
//!
//! The adapter serialises into these transport DTOs and extracts the first
//! choice's message content; nothing else from the payload is interpreted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct ChatCompletionRequestDto<'a> {
    pub(super) model: &'a str,
    pub(super) messages: Vec<ChatMessageDto<'a>>,
    pub(super) max_tokens: u32,
    pub(super) temperature: f32,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatMessageDto<'a> {
    pub(super) role: &'a str,
    pub(super) content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatCompletionResponseDto {
    #[serde(default)]
    pub(super) choices: Vec<ChatChoiceDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatChoiceDto {
    pub(super) message: ChatChoiceMessageDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatChoiceMessageDto {
    pub(super) content: Option<String>,
}

impl ChatCompletionResponseDto {
    /// First choice's content, trimmed, with blank lines dropped.
    pub(super) fn into_text(self) -> Result<String, String> {
        let content = self
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| "response contained no choices".to_owned())?;

        let text = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if text.is_empty() {
            return Err("response content was empty".to_owned());
        }
        Ok(text)
    }
}
