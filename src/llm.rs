// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! OpenAI-compatible chat-completions client (Groq by default).

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::Summarizer;
use crate::config::LlmConfig;
use crate::utils::http_client;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct GroqClient {
    client: reqwest::blocking::Client,
    config: LlmConfig,
    api_key: String,
}

impl GroqClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("GROQ_API_KEY is not configured")?;
        let client = http_client(config.timeout)?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn request_once(&self, body: &ChatRequest<'_>) -> Result<String, Attempt> {
        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .map_err(|e| Attempt::Retry(anyhow!(e).context("summarizer request failed")))?;

        let status = resp.status();
        if !status.is_success() {
            let err = anyhow!("summarizer responded with HTTP {}", status);
            return Err(if retryable(status) {
                Attempt::Retry(err)
            } else {
                Attempt::Fatal(err)
            });
        }

        let parsed: ChatResponse = resp
            .json()
            .map_err(|e| Attempt::Fatal(anyhow!(e).context("malformed summarizer response")))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Attempt::Fatal(anyhow!("summarizer response had no choices")))
    }
}

enum Attempt {
    Retry(anyhow::Error),
    Fatal(anyhow::Error),
}

fn retryable(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

impl Summarizer for GroqClient {
    /// One retry on transport errors, 429 and 5xx; anything else fails fast.
    fn summarize(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(model = %self.config.model, "calling summarizer");
        match self.request_once(&body) {
            Ok(text) => Ok(text),
            Err(Attempt::Fatal(e)) => Err(e),
            Err(Attempt::Retry(e)) => {
                warn!(error = %e, "summarizer call failed, retrying once");
                self.request_once(&body).map_err(|a| match a {
                    Attempt::Retry(e) | Attempt::Fatal(e) => e,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_rejected() {
        let err = GroqClient::new(LlmConfig::default()).err().unwrap();
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn response_without_content_yields_none() {
        let r: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(r.choices[0].message.content.is_none());
    }

    #[test]
    fn only_server_errors_and_throttling_retry() {
        assert!(retryable(StatusCode::BAD_GATEWAY));
        assert!(retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(!retryable(StatusCode::UNAUTHORIZED));
    }
}
