pub mod chat;
pub mod doctor;

use codeloom_agent::{Session, TurnOrchestrator};
use codeloom_classifier::RuleClassifier;
use codeloom_config::AppConfig;
use codeloom_core::backend::ModelBackend;
use codeloom_core::error::Error;
use codeloom_core::utterance::Classifier;
use codeloom_core::workspace::WorkspaceStore;
use codeloom_gateway::ModelGateway;
use codeloom_providers::RuleBasedBackend;
use codeloom_workspace::InMemoryWorkspace;
use std::sync::Arc;
use std::time::Duration;

/// Wire a full session from config: classifier, backend, gateway,
/// workspace, tools, orchestrator.
pub fn build_session(config: &AppConfig) -> Result<Session, Error> {
    let classifier: Arc<dyn Classifier> = match config.classifier.as_str() {
        "rules" => Arc::new(RuleClassifier::new()),
        other => {
            return Err(Error::Config {
                message: format!("unknown classifier '{other}' in config"),
            });
        }
    };

    let backend: Arc<dyn ModelBackend> = match config.backend.as_str() {
        "rule-based" => Arc::new(RuleBasedBackend::new()),
        other => {
            return Err(Error::Config {
                message: format!("unknown model backend '{other}' in config"),
            });
        }
    };

    let workspace: Arc<dyn WorkspaceStore> = Arc::new(InMemoryWorkspace::new());
    let tools = Arc::new(codeloom_tools::default_registry(workspace.clone()));
    let gateway = ModelGateway::new(backend)
        .with_timeout(Duration::from_secs(config.model_timeout_secs));
    let orchestrator = TurnOrchestrator::new(gateway, tools, workspace)
        .with_preview_chars(config.preview_chars);

    Ok(Session::new(classifier, orchestrator))
}
