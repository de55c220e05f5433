//! Runtime for one conversation
//!
//! Owns the conversation history and the launch state between turns. The
//! router computes each turn; the runtime records it.

use std::sync::Arc;

use crate::history::{ConversationHistory, Turn};
use crate::router::{IntentClassifier, RouterResponse, Supervisor};
use crate::state_machine::{FlowContext, LaunchState};
use crate::tools::{ToolContext, ToolRegistry};

pub struct ConversationRuntime {
    id: String,
    supervisor: Supervisor,
    history: ConversationHistory,
    launch: Option<LaunchState>,
}

impl ConversationRuntime {
    pub fn new(classifier: Arc<dyn IntentClassifier>, tools: ToolRegistry, flow: FlowContext) -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        tracing::info!(conversation_id = %id, "Conversation started");
        Self {
            id,
            supervisor: Supervisor::new(classifier, tools, flow),
            history: ConversationHistory::new(),
            launch: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Launch state kept from the last turn, if a launch was ever started
    pub fn launch_state(&self) -> Option<&LaunchState> {
        self.launch.as_ref()
    }

    /// Route one user message and record the turn
    pub async fn send(&mut self, text: &str) -> RouterResponse {
        let outcome = self
            .supervisor
            .route(
                &self.history,
                self.launch.as_ref(),
                text,
                ToolContext::new(self.id.clone()),
            )
            .await;

        self.history.push(Turn::user(text));
        if let Some(turn) = outcome.tool_turn {
            self.history.push(turn);
        }
        self.history
            .push(Turn::assistant(outcome.reply.response.clone()));

        self.launch = outcome.launch_state;

        tracing::debug!(
            conversation_id = %self.id,
            turns = self.history.len(),
            "Turn recorded"
        );
        outcome.reply
    }

    /// Drop the history and any launch session
    pub fn clear(&mut self) {
        self.history.clear();
        self.launch = None;
        tracing::info!(conversation_id = %self.id, "Conversation cleared");
    }
}
