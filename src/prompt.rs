//! Prompt construction for the two generation modes.
//!
//! Pure functions: the handlers pass in the (already clamped) counts and the
//! prompt templates from config; we only do string assembly here. Every
//! instruction pair carries a strict-JSON-only requirement because the
//! interpreter downstream depends on it.

use crate::config::Prompts;
use crate::domain::Difficulty;
use crate::util::fill_template;

/// System + user instruction pair sent to the completion service.
#[derive(Clone, Debug)]
pub struct PromptPair {
  pub system: String,
  pub user: String,
}

/// Build the instruction pair for multiple-choice question generation.
/// `count` must already be clamped into the safe range.
pub fn build_mcq_prompt(
  prompts: &Prompts,
  topic: &str,
  count: usize,
  difficulty: Difficulty,
  context: Option<&str>,
) -> PromptPair {
  let count_s = count.to_string();
  let mut user = fill_template(
    &prompts.mcq_user_template,
    &[("count", &count_s), ("topic", topic), ("difficulty", difficulty.as_str())],
  );
  if let Some(ctx) = non_empty(context) {
    user = format!("{}{}", context_preamble(prompts, ctx), user);
  }
  PromptPair { system: prompts.mcq_system.clone(), user }
}

/// Build the instruction pair for study-point summarization.
/// `max_points` must already be clamped into the safe range.
pub fn build_points_prompt(
  prompts: &Prompts,
  topic: &str,
  max_points: usize,
  context: Option<&str>,
) -> PromptPair {
  let max_s = max_points.to_string();
  let mut user = fill_template(
    &prompts.points_user_template,
    &[("max_points", &max_s), ("topic", topic)],
  );
  if let Some(ctx) = non_empty(context) {
    user = format!("{}{}", context_preamble(prompts, ctx), user);
  }
  PromptPair { system: prompts.points_system.clone(), user }
}

/// Caller-supplied context goes in front of the task text, verbatim, with a
/// directive to prioritize it over the model's own knowledge.
fn context_preamble(prompts: &Prompts, ctx: &str) -> String {
  fill_template(&prompts.context_preamble_template, &[("context", ctx)])
}

fn non_empty(context: Option<&str>) -> Option<&str> {
  context.filter(|c| !c.trim().is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mcq_prompt_embeds_count_and_topic() {
    let prompts = Prompts::default();
    let p = build_mcq_prompt(&prompts, "Indian Polity", 7, Difficulty::Hard, None);
    assert!(p.user.contains("exactly 7 multiple-choice questions"));
    assert!(p.user.contains("\"Indian Polity\""));
    assert!(p.user.contains("'hard'"));
    // Strict-JSON requirement must be stated on both sides.
    assert!(p.system.contains("valid JSON"));
    assert!(p.user.contains("valid JSON"));
  }

  #[test]
  fn points_prompt_embeds_max_points() {
    let prompts = Prompts::default();
    let p = build_points_prompt(&prompts, "Mughal Empire", 9, None);
    assert!(p.user.contains("up to 9 short bullet points"));
    assert!(p.user.contains("\"points\""));
  }

  #[test]
  fn context_is_verbatim_and_precedes_task() {
    let prompts = Prompts::default();
    let ctx = "Article 370 was abrogated in August 2019.";
    let p = build_mcq_prompt(&prompts, "J&K Reorganisation", 3, Difficulty::Medium, Some(ctx));
    let ctx_pos = p.user.find(ctx).expect("context text verbatim");
    let task_pos = p.user.find("Task: Create exactly").expect("task text");
    assert!(ctx_pos < task_pos, "context must come before the task instruction");
    assert!(p.user.contains("prioritize facts from the context"));
  }

  #[test]
  fn blank_context_is_ignored() {
    let prompts = Prompts::default();
    let p = build_points_prompt(&prompts, "Rivers of India", 5, Some("   "));
    assert!(p.user.starts_with("Task: Summarize"));
  }
}
