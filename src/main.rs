//! Opens an interview from a question document and prints the opening
//! interviewer payload.
//!
//! ```text
//! interview-agent questions.yaml
//! ```
//!
//! Without an argument the path comes from
//! `INTERVIEW_AGENT__INTERVIEW__QUESTION_FILE`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use interview_agent::adapters::{FileStateStorage, InMemoryStateStorage};
use interview_agent::application::{
    InterviewSessions, StartInterviewCommand, StartInterviewHandler,
};
use interview_agent::config::{AppConfig, ConfigError, StorageBackend};
use interview_agent::domain::interview::QuestionSpec;
use interview_agent::ports::StateStorage;
use interview_agent::telemetry;

/// Interview document as authored by researchers.
#[derive(Debug, Deserialize)]
struct InterviewDocument {
    title: String,
    #[serde(default)]
    context: String,
    questions: Vec<QuestionSpec>,
}

fn read_document(path: &Path) -> Result<InterviewDocument, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let document = if is_json {
        serde_json::from_str(&raw)?
    } else {
        serde_yaml::from_str(&raw)?
    };
    Ok(document)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    telemetry::init_tracing(&config.logging)?;

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.interview.question_file.clone())
        .ok_or("usage: interview-agent <questions.yaml|questions.json>")?;
    let document = read_document(&path)?;
    info!(path = %path.display(), questions = document.questions.len(), "Question document loaded");

    let storage: Arc<dyn StateStorage> = match config.storage.backend {
        StorageBackend::File => Arc::new(FileStateStorage::new(&config.storage.data_dir)),
        StorageBackend::Memory => Arc::new(InMemoryStateStorage::new()),
    };
    let handler = StartInterviewHandler::new(
        Arc::new(InterviewSessions::new(storage)),
        config.interview.to_interview_config(),
        config.prompt.to_options(),
    );

    let result = handler
        .handle(StartInterviewCommand {
            title: document.title,
            context: document.context,
            questions: document.questions,
            config: None,
        })
        .await?;

    info!(
        session_id = %result.state.session_id,
        location = %result.location,
        "Interview ready"
    );
    print!("{}", result.prompt);
    Ok(())
}
