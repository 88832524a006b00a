use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    clients::{Summarize, check_status},
    error::{Result, TubenoteError},
    provider::Provider,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizerBackend {
    /// Fixture server exposing `POST /gemini/summarize`
    Mock { base_url: String },
    /// OpenAI-compatible chat completions endpoint of the provider
    Live { provider: Provider },
}

pub struct ChatSummarizer {
    http: reqwest::Client,
    backend: SummarizerBackend,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MockSummarizeRequest<'a> {
    text: &'a str,
    target_language: &'a str,
}

#[derive(Debug, Deserialize)]
struct MockSummarizeResponse {
    text: String,
}

/// System prompt asking for `##` sections with chronological `-` bullets
pub fn summary_prompt(language: &str) -> String {
    format!(
        r#"You are an assistant that helps people learn from YouTube videos.
Read the transcript provided by the user, understand the whole video, and write a summary that lets a learner follow the content while watching.

Split the summary into the video's main sections, give each section a title, and list its points as bullets in chronological order.

Rules:
- Cover every major topic, important concept and conclusion of the video.
- Order the sections as the video progresses; bullets inside a section are chronological too.
- Keep each bullet short and concrete.
- Write the whole output in {language}.
- Use Markdown level-2 headers for section titles (for example `## Section title`) and hyphens (`-`) for bullets.
- Output only the summary, nothing else."#
    )
}

/// Take the assistant text out of a chat-completions response
pub fn extract_chat_content(response: &serde_json::Value) -> Result<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| TubenoteError::InvalidResponse {
            reason: format!("no message content in {response}"),
        })
}

impl ChatSummarizer {
    pub fn new(http: reqwest::Client, backend: SummarizerBackend) -> Self {
        Self { http, backend }
    }

    async fn request_summary(&self, text: &str, language: &str) -> Result<String> {
        match &self.backend {
            SummarizerBackend::Mock { base_url } => {
                let response = self
                    .http
                    .post(format!("{base_url}/gemini/summarize"))
                    .json(&MockSummarizeRequest {
                        text,
                        target_language: language,
                    })
                    .send()
                    .await?;
                let body: MockSummarizeResponse = check_status(response)?.json().await?;
                Ok(body.text)
            }
            SummarizerBackend::Live { provider } => {
                let config = provider.config();
                let api_key = provider.validate_api_key()?;

                let response = self
                    .http
                    .post(config.api_url)
                    .header("Content-Type", "application/json")
                    .header("Authorization", format!("Bearer {}", api_key))
                    .json(&serde_json::json!({
                        "model": config.model,
                        "messages": [
                            {
                                "role": "system",
                                "content": summary_prompt(language),
                            },
                            {
                                "role": "user",
                                "content": text,
                            },
                        ],
                        "temperature": 0.3,
                    }))
                    .send()
                    .await?;
                let response = check_status(response)?
                    .json::<serde_json::Value>()
                    .await?;

                extract_chat_content(&response)
            }
        }
    }
}

#[async_trait]
impl Summarize for ChatSummarizer {
    /// Every failure, including a missing key, comes back as
    /// [`TubenoteError::SummarizationFailed`].
    async fn summarize(&self, text: &str, language: &str) -> Result<String> {
        debug!(chars = text.len(), language, "requesting summary");
        let summary = match self.request_summary(text, language).await {
            Ok(summary) => summary.trim().to_string(),
            Err(err) => {
                info!(error = %err, "summary request failed");
                return Err(TubenoteError::SummarizationFailed {
                    reason: err.to_string(),
                });
            }
        };

        if summary.is_empty() {
            info!("model returned an empty summary");
            return Err(TubenoteError::SummarizationFailed {
                reason: "model returned an empty summary".to_string(),
            });
        }
        Ok(summary)
    }
}
