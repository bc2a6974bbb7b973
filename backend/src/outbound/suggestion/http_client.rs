//! Reqwest-backed suggestion source adapter.
//!
//! Speaks the chat-completion contract: `POST {endpoint}/v1/chat/completions`
//! with an optional bearer key, reading the first choice's message content.
//! The adapter owns transport details only; prompt text in, suggestion text
//! out.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::domain::ports::{OutfitSuggestionRequest, SuggestionSource, SuggestionSourceError};
use crate::domain::ImageUrl;

use super::dto::{ChatCompletionRequestDto, ChatCompletionResponseDto, ChatMessageDto};

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const SYSTEM_PROMPT: &str = "You are a helpful fashion stylist.";
const MAX_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.7;

/// Connection settings for the suggestion endpoint.
pub struct SuggestionClientConfig {
    /// Base URL of the chat-completion service.
    pub endpoint: Url,
    /// Bearer token, when the endpoint requires one.
    pub api_key: Option<String>,
    /// Model name to request.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SuggestionClientConfig {
    /// Settings with the default model and timeout.
    #[must_use]
    pub fn new(endpoint: Url, api_key: Option<String>) -> Self {
        Self {
            endpoint,
            api_key,
            model: DEFAULT_MODEL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Suggestion source adapter performing HTTP POST requests against one
/// chat-completion endpoint.
pub struct HttpSuggestionSource {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    model: String,
}

impl HttpSuggestionSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: SuggestionClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
            api_key: config.api_key,
            model: config.model,
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String, SuggestionSourceError> {
        let url = self
            .endpoint
            .join("v1/chat/completions")
            .map_err(|err| SuggestionSourceError::transport(err.to_string()))?;

        let payload = ChatCompletionRequestDto {
            model: &self.model,
            messages: vec![
                ChatMessageDto {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessageDto {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let mut request = self.client.post(url).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SuggestionSourceError::status(status.as_u16()));
        }

        let decoded: ChatCompletionResponseDto = response
            .json()
            .await
            .map_err(|err| SuggestionSourceError::decode(err.to_string()))?;
        decoded.into_text().map_err(SuggestionSourceError::decode)
    }
}

fn map_transport_error(error: reqwest::Error) -> SuggestionSourceError {
    if let Some(status) = error.status() {
        return SuggestionSourceError::status(status.as_u16());
    }
    SuggestionSourceError::transport(error.to_string())
}

fn build_outfit_prompt(request: &OutfitSuggestionRequest) -> String {
    let items = request.item_descriptions.join("\n");
    let age = request
        .age
        .map_or_else(|| "N/A".to_owned(), |age| age.to_string());
    let style = request.style_preferences.as_deref().unwrap_or("N/A");
    let location = request.location.as_deref().unwrap_or("N/A");
    format!(
        "Based on the following clothing items:\n{items}\n\n\
         And additional details:\n\
         - Occasion: {occasion}\n\
         - Age: {age}\n\
         - Style preferences: {style}\n\
         - Location: {location}\n\n\
         Please suggest a complete outfit that would be suitable, and return \
         your answer in exactly the following format:\n\
         Shirt: <your suggestion for a shirt>\n\
         Pants: <your suggestion for pants>\n\
         Accessories: <your suggestion for accessories>\n\
         Shoes: <your suggestion for shoes>\n",
        occasion = request.occasion,
    )
}

fn build_caption_prompt(url: &ImageUrl) -> String {
    format!(
        "Describe the single clothing item shown in the image at {url} in one \
         short sentence suitable as a wardrobe catalogue entry. Mention colour \
         and garment type only.",
    )
}

#[async_trait]
impl SuggestionSource for HttpSuggestionSource {
    async fn suggest_outfit(
        &self,
        request: &OutfitSuggestionRequest,
    ) -> Result<String, SuggestionSourceError> {
        self.complete(&build_outfit_prompt(request)).await
    }

    async fn describe_image(&self, url: &ImageUrl) -> Result<String, SuggestionSourceError> {
        self.complete(&build_caption_prompt(url)).await
    }
}

/// Suggestion source used when no endpoint is configured.
///
/// Every call fails with a transport error, so captions surface as 503 and
/// recommendations degrade to `null`.
pub struct UnconfiguredSuggestionSource;

#[async_trait]
impl SuggestionSource for UnconfiguredSuggestionSource {
    async fn suggest_outfit(
        &self,
        _request: &OutfitSuggestionRequest,
    ) -> Result<String, SuggestionSourceError> {
        Err(SuggestionSourceError::transport(
            "no suggestion endpoint configured",
        ))
    }

    async fn describe_image(&self, _url: &ImageUrl) -> Result<String, SuggestionSourceError> {
        Err(SuggestionSourceError::transport(
            "no suggestion endpoint configured",
        ))
    }
}
