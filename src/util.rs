//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Clamp a requested item count into `1..=upper`.
/// Requests arrive as `i64` so zero/negative input still deserializes and
/// lands on the lower bound instead of failing the request.
pub fn clamp_count(requested: i64, upper: usize) -> usize {
  requested.clamp(1, upper as i64) as usize
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
/// The cut lands on a char boundary so multibyte input never panics.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fill_template_replaces_all_occurrences() {
    let out = fill_template("{n} questions about {topic}, exactly {n}.", &[("n", "5"), ("topic", "rivers")]);
    assert_eq!(out, "5 questions about rivers, exactly 5.");
  }

  #[test]
  fn trunc_for_log_shortens_long_input() {
    let s = "x".repeat(300);
    let t = trunc_for_log(&s, 200);
    assert!(t.starts_with(&"x".repeat(200)));
    assert!(t.ends_with("(300 bytes total)"));
    assert_eq!(trunc_for_log("short", 200), "short");
  }

  #[test]
  fn trunc_for_log_respects_multibyte_boundaries() {
    // 3-byte chars; byte 200 falls mid-character, cut must back up to 198.
    let s = "あ".repeat(100);
    let t = trunc_for_log(&s, 200);
    assert!(t.starts_with(&"あ".repeat(66)));
    assert!(t.contains("(300 bytes total)"));
  }

  #[test]
  fn clamp_count_bounds() {
    assert_eq!(clamp_count(0, 20), 1);
    assert_eq!(clamp_count(-7, 20), 1);
    assert_eq!(clamp_count(5, 20), 5);
    assert_eq!(clamp_count(50, 20), 20);
    assert_eq!(clamp_count(13, 12), 12);
  }
}
