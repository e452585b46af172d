//! Domain models: question/point result items and the difficulty scale.
//!
//! Everything here is built fresh per request and serialized straight into
//! the response envelope; nothing is stored across requests.

use serde::{Deserialize, Serialize};

/// Upper bound on questions per request.
pub const MAX_QUESTIONS: usize = 20;
/// Upper bound on study points per request.
pub const MAX_POINTS: usize = 12;

/// Difficulty requested for generated questions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Default for Difficulty {
  fn default() -> Self { Difficulty::Medium }
}

impl Difficulty {
  pub fn as_str(&self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }
}

/// One multiple-choice question as we expect the model (or the mock path)
/// to shape it. `options` holds the four choices in A-D order; `answer`
/// repeats the full text of the correct one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
  pub id: u32,
  pub question: String,
  pub options: Vec<String>,
  pub answer_letter: String,
  pub answer: String,
  pub explain: String,
  pub difficulty: Difficulty,
  pub source_note: String,
  #[serde(default)]
  pub mnemonic: String,
}

/// One memorizable study bullet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StudyPoint {
  pub id: u32,
  pub text: String,
  #[serde(default)]
  pub mnemonic: String,
}
