//! Deterministic placeholder content for when no OpenAI credential is
//! configured. Keeps the frontend usable offline; never touches the network.
//!
//! Every item carries a visible `[MOCK]` marker so placeholder data cannot
//! be mistaken for generated content.

use crate::domain::{Difficulty, Question, StudyPoint, MAX_POINTS, MAX_QUESTIONS};
use crate::util::clamp_count;

/// Marker embedded in every mock text.
pub const MOCK_TAG: &str = "[MOCK]";

/// Placeholder question set, same shape and clamp bounds as the real path.
pub fn mock_questions(topic: &str, count: i64, difficulty: Difficulty) -> Vec<Question> {
  let n = clamp_count(count, MAX_QUESTIONS);
  (1..=n as u32)
    .map(|i| Question {
      id: i,
      question: format!("{MOCK_TAG} What is a key fact about {topic}? (mock #{i})"),
      options: vec![
        "Option A".into(),
        "Option B".into(),
        "Option C".into(),
        "Option D".into(),
      ],
      answer_letter: "B".into(),
      answer: "Option B".into(),
      explain: format!("Because of reason {i}; memorize the key phrase for {topic}."),
      difficulty,
      source_note: "mock data".into(),
      mnemonic: String::new(),
    })
    .collect()
}

/// Placeholder study points.
pub fn mock_points(topic: &str, max_points: i64) -> Vec<StudyPoint> {
  let n = clamp_count(max_points, MAX_POINTS);
  (1..=n as u32)
    .map(|i| StudyPoint {
      id: i,
      text: format!("{MOCK_TAG} Key point {i} about {topic}"),
      mnemonic: String::new(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn question_count_is_clamped_into_range() {
    assert_eq!(mock_questions("history", 0, Difficulty::Easy).len(), 1);
    assert_eq!(mock_questions("history", 5, Difficulty::Easy).len(), 5);
    assert_eq!(mock_questions("history", 500, Difficulty::Easy).len(), MAX_QUESTIONS);
    assert_eq!(mock_points("history", 500).len(), MAX_POINTS);
  }

  #[test]
  fn every_item_is_tagged_as_mock() {
    for q in mock_questions("geography", 20, Difficulty::Medium) {
      assert!(q.question.contains(MOCK_TAG));
      assert_eq!(q.source_note, "mock data");
    }
    for p in mock_points("geography", 12) {
      assert!(p.text.contains(MOCK_TAG));
    }
  }

  #[test]
  fn output_is_deterministic() {
    let a = serde_json::to_string(&mock_questions("polity", 4, Difficulty::Hard)).unwrap();
    let b = serde_json::to_string(&mock_questions("polity", 4, Difficulty::Hard)).unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn answer_matches_one_option() {
    for q in mock_questions("polity", 3, Difficulty::Medium) {
      assert_eq!(q.options.len(), 4);
      assert!(q.options.contains(&q.answer));
    }
  }
}
