//! Tolerant interpretation of completion-service output.
//!
//! The upstream model is asked for strict JSON with a known top-level key,
//! but nothing guarantees it complies. Extraction is therefore an ordered
//! list of candidate rules tried in sequence; the first one that matches
//! wins. A payload that parses but is not the expected array is returned
//! as-is rather than rejected, and text that does not parse at all is
//! preserved untouched for the caller.

use serde_json::Value;

/// One candidate location for the payload inside the parsed document.
#[derive(Clone, Copy, Debug)]
pub enum ExtractRule {
  /// A top-level object field with this exact name.
  Field(&'static str),
  /// The parsed document itself (terminal catch-all).
  Document,
}

impl ExtractRule {
  fn apply(&self, doc: &Value) -> Option<Value> {
    match self {
      ExtractRule::Field(name) => match doc.get(*name) {
        Some(Value::Null) | None => None,
        Some(v) => Some(v.clone()),
      },
      ExtractRule::Document => Some(doc.clone()),
    }
  }
}

/// Extraction order for question mode. "result" and "data" cover models
/// that ignore the requested top-level key.
pub const MCQ_RULES: &[ExtractRule] = &[
  ExtractRule::Field("questions"),
  ExtractRule::Field("result"),
  ExtractRule::Field("data"),
  ExtractRule::Document,
];

/// Extraction order for study-point mode.
pub const POINTS_RULES: &[ExtractRule] = &[
  ExtractRule::Field("points"),
  ExtractRule::Field("result"),
  ExtractRule::Document,
];

/// Outcome of interpreting raw model output.
#[derive(Clone, Debug, PartialEq)]
pub enum Interpreted {
  /// Structured parse succeeded; payload resolved by the first matching rule.
  Ok(Value),
  /// Not parseable as JSON; the original text, byte for byte.
  ParseError(String),
}

/// Resolve the payload from `raw_text` using `rules` in order.
pub fn interpret(rules: &[ExtractRule], raw_text: &str) -> Interpreted {
  let doc: Value = match serde_json::from_str(raw_text.trim()) {
    Ok(v) => v,
    Err(_) => return Interpreted::ParseError(raw_text.to_string()),
  };

  let mut payload = rules
    .iter()
    .find_map(|r| r.apply(&doc))
    .unwrap_or(doc);

  // One-level unwrap for doubly-wrapped output, e.g. {"result":{"questions":[…]}}.
  // Known-lossy: an object that legitimately carries a field named like the
  // primary key gets unwrapped too. Kept on purpose.
  if let Some(primary) = primary_field(rules) {
    if let Some(inner) = payload.as_object().and_then(|o| o.get(primary)).cloned() {
      payload = inner;
    }
  }

  Interpreted::Ok(payload)
}

fn primary_field(rules: &[ExtractRule]) -> Option<&'static str> {
  rules.iter().find_map(|r| match r {
    ExtractRule::Field(name) => Some(*name),
    ExtractRule::Document => None,
  })
}
