//! Session — owns the conversation state and exposes the entry point.
//!
//! A session is one user's ongoing conversation: the classifier, the
//! orchestrator, and the append-only log, with defined construction and
//! teardown instead of process-wide state.

use crate::orchestrator::TurnOrchestrator;
use codeloom_core::turn::{ConversationLog, ConversationTurn};
use codeloom_core::utterance::Classifier;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct Session {
    id: Uuid,
    classifier: Arc<dyn Classifier>,
    orchestrator: TurnOrchestrator,
    log: ConversationLog,
}

impl Session {
    pub fn new(classifier: Arc<dyn Classifier>, orchestrator: TurnOrchestrator) -> Self {
        Self {
            id: Uuid::new_v4(),
            classifier,
            orchestrator,
            log: ConversationLog::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The conversation so far.
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// The sole inbound entry point: one raw message in, one formatted
    /// response out.
    ///
    /// The log append at the end is the turn's only commit point: exactly
    /// one user/agent pair lands per call, whatever branch the turn took.
    pub async fn process_message(&mut self, raw: &str) -> String {
        info!(session_id = %self.id, "Received user message");

        let utterance = self.classifier.classify(raw);
        let result = self
            .orchestrator
            .handle_turn(&utterance, self.log.turns())
            .await;
        let rendered = result.render();

        self.log.push(ConversationTurn::user(raw));
        self.log.push(ConversationTurn::agent(&rendered));

        info!(
            session_id = %self.id,
            turns = self.log.len(),
            error = result.is_error(),
            "Turn complete"
        );
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeloom_classifier::RuleClassifier;
    use codeloom_core::backend::ModelReply;
    use codeloom_core::turn::Role;
    use codeloom_core::workspace::WorkspaceStore;
    use codeloom_gateway::ModelGateway;
    use codeloom_providers::ScriptedBackend;
    use codeloom_workspace::InMemoryWorkspace;

    fn session_with(backend: Arc<ScriptedBackend>) -> (Session, Arc<dyn WorkspaceStore>) {
        let workspace: Arc<dyn WorkspaceStore> = Arc::new(InMemoryWorkspace::new());
        let tools = Arc::new(codeloom_tools::default_registry(workspace.clone()));
        let orchestrator =
            TurnOrchestrator::new(ModelGateway::new(backend), tools, workspace.clone());
        (
            Session::new(Arc::new(RuleClassifier::new()), orchestrator),
            workspace,
        )
    }

    #[tokio::test]
    async fn every_turn_appends_exactly_one_pair() {
        let backend = Arc::new(ScriptedBackend::single_answer("hi there"));
        let (mut session, _) = session_with(backend);

        let response = session.process_message("Tell me a joke.").await;
        assert_eq!(response, "hi there");

        let turns = session.log().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "Tell me a joke.");
        assert_eq!(turns[1].role, Role::Agent);
        assert_eq!(turns[1].content, "hi there");
    }

    #[tokio::test]
    async fn failed_turn_still_appends_one_pair() {
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(ModelReply::tool_request(
            "run_linter",
            serde_json::json!({}),
        ))]));
        let (mut session, _) = session_with(backend);

        let response = session.process_message("lint everything").await;
        assert!(response.contains("not found"));
        assert_eq!(session.log().len(), 2);
        assert_eq!(session.log().turns()[1].content, response);
    }

    #[tokio::test]
    async fn fast_path_turn_appends_and_answers() {
        let backend = Arc::new(ScriptedBackend::empty());
        let (mut session, workspace) = session_with(backend.clone());

        let response = session
            .process_message("add file \"x.py\" with content \"print(1)\"")
            .await;

        assert!(response.contains("x.py"));
        assert_eq!(workspace.read("x.py").await.as_deref(), Some("print(1)"));
        assert_eq!(backend.call_count(), 0);
        assert_eq!(session.log().len(), 2);
    }

    #[tokio::test]
    async fn history_grows_across_turns() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Ok(ModelReply::answer("first")),
            Ok(ModelReply::answer("second")),
        ]));
        let (mut session, _) = session_with(backend);

        session.process_message("one").await;
        session.process_message("two").await;

        assert_eq!(session.log().len(), 4);
        let contents: Vec<&str> = session
            .log()
            .turns()
            .iter()
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(contents, vec!["one", "first", "two", "second"]);
    }
}
