//! Core request flow shared by both generation endpoints.
//!
//! Per request: credential check first (terminal: mock path), otherwise
//! build prompt, call the completion service, interpret, wrap in the
//! envelope. An upstream failure is the only hard error; malformed output
//! degrades to a parse_error envelope instead.

use tracing::{error, info, instrument, warn};

use crate::interpret::{interpret, ExtractRule, Interpreted, MCQ_RULES, POINTS_RULES};
use crate::mock::{mock_points, mock_questions};
use crate::openai::Completion;
use crate::prompt::{build_mcq_prompt, build_points_prompt};
use crate::protocol::{GenerateOut, McqIn, PointsIn};
use crate::state::AppState;
use crate::util::{clamp_count, trunc_for_log};
use crate::domain::{MAX_POINTS, MAX_QUESTIONS};

/// The completion service call failed (transport or HTTP error). Surfaced
/// to the caller as a 500; never retried, never silently mocked.
#[derive(Debug)]
pub struct UpstreamError(pub String);

#[instrument(level = "info", skip(state, req), fields(topic = %req.topic, count = req.count, difficulty = ?req.difficulty, has_context = req.context.is_some()))]
pub async fn generate_mcq(state: &AppState, req: &McqIn) -> Result<GenerateOut, UpstreamError> {
  let Some(oa) = &state.openai else {
    let result = mock_questions(&req.topic, req.count, req.difficulty);
    info!(target: "generate", n = result.len(), "Serving mock question set (no credential)");
    let result = serde_json::to_value(result).unwrap_or_default();
    return Ok(GenerateOut::ok("local-mock-no-key".into(), Some(0), result));
  };

  let count = clamp_count(req.count, MAX_QUESTIONS);
  let prompt = build_mcq_prompt(&state.prompts, &req.topic, count, req.difficulty, req.context.as_deref());
  let completion = oa.complete_mcq(&prompt).await.map_err(|e| {
    error!(target: "generate", error = %e, "OpenAI request failed");
    UpstreamError(e)
  })?;

  Ok(envelope(completion, MCQ_RULES))
}

#[instrument(level = "info", skip(state, req), fields(topic = %req.topic, max_points = req.max_points, has_context = req.context.is_some()))]
pub async fn generate_points(state: &AppState, req: &PointsIn) -> Result<GenerateOut, UpstreamError> {
  let Some(oa) = &state.openai else {
    let result = mock_points(&req.topic, req.max_points);
    info!(target: "generate", n = result.len(), "Serving mock study points (no credential)");
    let result = serde_json::to_value(result).unwrap_or_default();
    return Ok(GenerateOut::ok("local-mock-points".into(), Some(0), result));
  };

  let max_points = clamp_count(req.max_points, MAX_POINTS);
  let prompt = build_points_prompt(&state.prompts, &req.topic, max_points, req.context.as_deref());
  let completion = oa.complete_points(&prompt).await.map_err(|e| {
    error!(target: "generate", error = %e, "OpenAI request failed");
    UpstreamError(e)
  })?;

  Ok(envelope(completion, POINTS_RULES))
}

/// Interpret the raw completion and wrap it. Unparseable output is a normal
/// (degraded) response carrying the untouched text, not a failure.
fn envelope(completion: Completion, rules: &[ExtractRule]) -> GenerateOut {
  let Completion { request_id, text, tokens_used } = completion;
  match interpret(rules, &text) {
    Interpreted::Ok(payload) => {
      info!(target: "generate", %request_id, ?tokens_used, "Completion interpreted");
      GenerateOut::ok(request_id, tokens_used, payload)
    }
    Interpreted::ParseError(raw) => {
      warn!(target: "generate", %request_id, raw = %trunc_for_log(&raw, 200), "Completion was not valid JSON");
      GenerateOut::parse_error(request_id, tokens_used, raw)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{OpenAiSettings, Prompts};
  use crate::domain::Difficulty;
  use crate::openai::OpenAI;
  use crate::protocol::GenStatus;

  fn mock_only_state() -> AppState {
    AppState { openai: None, prompts: Prompts::default() }
  }

  #[tokio::test]
  async fn no_credential_serves_clamped_mock_questions() {
    let state = mock_only_state();
    let req = McqIn {
      topic: "Indian Polity".into(),
      count: 50,
      difficulty: crate::domain::Difficulty::Medium,
      context: None,
    };
    let out = generate_mcq(&state, &req).await.expect("mock path never fails");
    assert_eq!(out.status, GenStatus::Ok);
    assert_eq!(out.request_id, "local-mock-no-key");
    assert_eq!(out.tokens_used, Some(0));
    let items = out.result.unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), MAX_QUESTIONS);
    for q in items {
      assert!(q["question"].as_str().unwrap().contains("[MOCK]"));
    }
  }

  #[tokio::test]
  async fn no_credential_serves_mock_points() {
    let state = mock_only_state();
    let req = PointsIn { topic: "Rivers".into(), max_points: 0, context: None };
    let out = generate_points(&state, &req).await.expect("mock path never fails");
    assert_eq!(out.request_id, "local-mock-points");
    assert_eq!(out.result.unwrap().as_array().unwrap().len(), 1);
  }

  #[test]
  fn envelope_degrades_to_parse_error() {
    let completion = Completion {
      request_id: "cmpl-1".into(),
      text: "not json".into(),
      tokens_used: Some(17),
    };
    let out = envelope(completion, MCQ_RULES);
    assert_eq!(out.status, GenStatus::ParseError);
    assert_eq!(out.raw_text.as_deref(), Some("not json"));
    assert_eq!(out.tokens_used, Some(17));
    assert!(out.result.is_none());
  }

  #[test]
  fn envelope_degrades_on_multibyte_non_json_reply() {
    // Non-ASCII refusal text longer than the log truncation window; the
    // degraded envelope must come back with the text untouched, no panic.
    let raw = "申し訳ありませんが、そのリクエストには対応できません。".repeat(10);
    let completion = Completion {
      request_id: "cmpl-3".into(),
      text: raw.clone(),
      tokens_used: Some(5),
    };
    let out = envelope(completion, MCQ_RULES);
    assert_eq!(out.status, GenStatus::ParseError);
    assert_eq!(out.raw_text.as_deref(), Some(raw.as_str()));
  }

  #[tokio::test]
  async fn upstream_failure_is_surfaced_not_mocked() {
    // Unroutable local endpoint: the request must fail loudly, not fall
    // back to mock content.
    let settings = OpenAiSettings {
      api_key: "test-key".into(),
      base_url: "http://127.0.0.1:9".into(),
      model: "gpt-3.5-turbo".into(),
    };
    let state = AppState {
      openai: OpenAI::from_settings(&settings),
      prompts: Prompts::default(),
    };
    assert!(state.openai.is_some());

    let req = McqIn {
      topic: "Rivers".into(),
      count: 3,
      difficulty: Difficulty::Medium,
      context: None,
    };
    let err = generate_mcq(&state, &req).await.expect_err("call must surface the failure");
    assert!(!err.0.is_empty());

    let preq = PointsIn { topic: "Rivers".into(), max_points: 4, context: None };
    generate_points(&state, &preq).await.expect_err("call must surface the failure");
  }

  #[test]
  fn envelope_resolves_fallback_key() {
    let completion = Completion {
      request_id: "cmpl-2".into(),
      text: r#"{"result":[{"id":1,"text":"fact","mnemonic":""}]}"#.into(),
      tokens_used: None,
    };
    let out = envelope(completion, POINTS_RULES);
    assert_eq!(out.status, GenStatus::Ok);
    assert_eq!(out.result.unwrap().as_array().unwrap().len(), 1);
  }
}
