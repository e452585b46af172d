//! Application state: immutable configuration plus the optional OpenAI client.
//!
//! Built once in `main` from `Settings` and shared behind an `Arc`. There is
//! no per-request mutable state anywhere; handlers only read from here.

use tracing::{info, instrument};

use crate::config::{Prompts, Settings};
use crate::openai::OpenAI;

#[derive(Clone)]
pub struct AppState {
    pub openai: Option<OpenAI>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from startup settings. A missing credential (or a client
    /// that fails to initialize) pins the process to the mock path.
    #[instrument(level = "info", skip_all)]
    pub fn new(settings: &Settings) -> Self {
        let openai = settings.openai.as_ref().and_then(OpenAI::from_settings);
        if let Some(oa) = &openai {
            info!(target: "studygen_backend", base_url = %oa.base_url, model = %oa.model, "OpenAI key configured");
        } else {
            info!(target: "studygen_backend", "OpenAI key NOT configured; using mock responses");
        }

        Self { openai, prompts: settings.prompts.clone() }
    }
}
