//! Process configuration: read once at startup, then passed around immutably.
//!
//! Two layers:
//!   - `Settings::from_env()` — port + optional OpenAI credential block.
//!     Absence of OPENAI_API_KEY pins both endpoints to the mock path for
//!     the whole process lifetime.
//!   - prompt templates, overridable via a TOML file at GEN_CONFIG_PATH
//!     (defaults are built in and tuned for strict-JSON output).

use serde::Deserialize;
use tracing::{error, info};

/// Everything the process reads from its environment, captured at startup.
#[derive(Clone, Debug)]
pub struct Settings {
  pub port: u16,
  pub openai: Option<OpenAiSettings>,
  pub prompts: Prompts,
}

/// Credential block for the completion service. Only constructed when the
/// API key is actually present.
#[derive(Clone, Debug)]
pub struct OpenAiSettings {
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl Settings {
  pub fn from_env() -> Self {
    let port = std::env::var("PORT")
      .ok()
      .and_then(|p| p.parse::<u16>().ok())
      .unwrap_or(3000);

    let openai = std::env::var("OPENAI_API_KEY").ok().map(|api_key| OpenAiSettings {
      api_key,
      base_url: std::env::var("OPENAI_BASE_URL")
        .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
      model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".into()),
    });

    let prompts = load_gen_config_from_env().map(|c| c.prompts).unwrap_or_default();

    Self { port, openai, prompts }
  }
}

/// Optional TOML overrides (prompts only).
#[derive(Clone, Debug, Deserialize, Default)]
pub struct GenConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompt templates used by the generation endpoints. Placeholders are
/// `{topic}`, `{count}`, `{max_points}`, `{difficulty}` and `{context}`,
/// filled with `util::fill_template`. Override them in TOML to tune tone or
/// schema wording; keep the JSON-only requirement or parsing will suffer.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub mcq_system: String,
  pub mcq_user_template: String,
  pub points_system: String,
  pub points_user_template: String,
  pub context_preamble_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      mcq_system: "You are an expert exam writer and teacher. Your job: produce clear, factual, \
        unambiguous multiple-choice questions suitable for competitive exams. \
        Do NOT invent facts. If you do not know a fact, say so in the explanation. \
        Always return valid JSON only (no surrounding markdown)."
        .into(),
      mcq_user_template: "Task: Create exactly {count} multiple-choice questions on the topic: \"{topic}\".\n\n\
        Requirements for each question object:\n\
        - id: integer\n\
        - question: concise, clear question statement (avoid ambiguous pronouns)\n\
        - options: array of 4 distinct short option texts (A-D). Place the correct option among them.\n\
        - answer_letter: single uppercase letter 'A'/'B'/'C'/'D' indicating the correct option position\n\
        - answer: the full text of the correct option\n\
        - explain: one-line (12-30 words) fact-based explanation referencing the reason for the correct answer\n\
        - difficulty: one of [easy, medium, hard]; target '{difficulty}'\n\
        - source_note: short phrase saying either 'derived from provided context' OR 'common knowledge'\n\
        - mnemonic: optional short memory tip (<=12 words) or empty string if none\n\n\
        Rules:\n\
        1) Prefer facts from the provided context. If context is provided, say 'derived from provided context' in source_note.\n\
        2) Do NOT hallucinate specific dates/names outside the context. If unsure, keep the question conceptual and mark the explanation accordingly.\n\
        3) Use straightforward language suitable for exam aspirants.\n\
        4) Output MUST be valid JSON with a top-level key \"questions\" whose value is an array of question objects exactly like above.\n\n\
        Example required output format (must follow exactly):\n\
        {\"questions\":[{\"id\":1,\"question\":\"...\",\"options\":[\"A\",\"B\",\"C\",\"D\"],\"answer_letter\":\"B\",\"answer\":\"...\",\"explain\":\"...\",\"difficulty\":\"easy\",\"source_note\":\"common knowledge\",\"mnemonic\":\"\"}]}\n"
        .into(),
      points_system: "You are an expert instructor who writes clear, concise study notes for exam aspirants. \
        Return only valid JSON. Keep language simple and memorization-focused."
        .into(),
      points_user_template: "Task: Summarize the topic \"{topic}\" into up to {max_points} short bullet points that an aspirant can memorize.\n\n\
        Requirements for each bullet:\n\
        - Keep it one short sentence (<= 14 words) when possible.\n\
        - Preserve key facts, names, or numbers if necessary.\n\
        - Use a short mnemonic (<= 6 words) for the topic if helpful. If none, put empty string.\n\n\
        Return JSON with top-level key \"points\" whose value is an array of objects:\n\
        {\"points\":[{\"id\":1,\"text\":\"...\",\"mnemonic\":\"\"}]}\n\n\
        If context is provided, prefer facts from the context and mention 'derived from provided context' in a source_note inside each object where relevant."
        .into(),
      context_preamble_template: "Context:\n{context}\n\nPlease prioritize facts from the context above.\n\n".into(),
    }
  }
}

/// Attempt to load `GenConfig` from GEN_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_gen_config_from_env() -> Option<GenConfig> {
  let path = std::env::var("GEN_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<GenConfig>(&s) {
      Ok(cfg) => {
        info!(target: "studygen_backend", %path, "Loaded generation config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "studygen_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "studygen_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
