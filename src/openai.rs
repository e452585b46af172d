//! Minimal OpenAI client for our use-cases.
//!
//! We only call chat.completions, once per generation request, and hand the
//! raw text back to the interpreter. Calls are instrumented and log model
//! names, latencies, and usage totals (not contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::OpenAiSettings;
use crate::prompt::PromptPair;

/// Low temperature keeps the output close to the requested JSON schema.
const TEMPERATURE: f32 = 0.2;
/// Token budget for a question set.
const MCQ_MAX_TOKENS: u32 = 800;
/// Token budget for a study-point list.
const POINTS_MAX_TOKENS: u32 = 450;

/// Raw completion as returned by the service: text plus opaque metadata.
#[derive(Clone, Debug)]
pub struct Completion {
  pub request_id: String,
  pub text: String,
  pub tokens_used: Option<u32>,
}

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl OpenAI {
  /// Construct the client from startup settings. Returns None when the
  /// HTTP client cannot be built; the caller then stays on the mock path.
  pub fn from_settings(settings: &OpenAiSettings) -> Option<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self {
      client,
      api_key: settings.api_key.clone(),
      base_url: settings.base_url.clone(),
      model: settings.model.clone(),
    })
  }

  /// Completion call for question generation.
  pub async fn complete_mcq(&self, prompt: &PromptPair) -> Result<Completion, String> {
    self.chat(prompt, MCQ_MAX_TOKENS).await
  }

  /// Completion call for study-point generation.
  pub async fn complete_points(&self, prompt: &PromptPair) -> Result<Completion, String> {
    self.chat(prompt, POINTS_MAX_TOKENS).await
  }

  /// One chat.completions round-trip. Any transport or HTTP error comes back
  /// as Err with the upstream message; the caller decides how to surface it.
  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model))]
  async fn chat(&self, prompt: &PromptPair, max_tokens: u32) -> Result<Completion, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: prompt.system.clone() },
        ChatMessageReq { role: "user".into(), content: prompt.user.clone() },
      ],
      temperature: TEMPERATURE,
      max_tokens,
    };

    let start = std::time::Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "studygen-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or(body);
      return Err(format!("OpenAI HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    let elapsed = start.elapsed();
    let tokens_used = body.usage.as_ref().and_then(|u| u.total_tokens);
    if let Some(usage) = &body.usage {
      info!(?elapsed, prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }

    let text = body.choices.first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default().trim().to_string();
    let request_id = body.id.unwrap_or_else(|| format!("gen-{}", Uuid::new_v4()));

    Ok(Completion { request_id, text, tokens_used })
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  max_tokens: u32,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  #[serde(default)] id: Option<String>,
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from an OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
