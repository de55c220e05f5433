//! In-memory conversation history
//!
//! An ordered, append-only log of user, assistant and tool turns. The launch
//! flow never writes to it; the runtime appends and the router reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::llm::LlmMessage;
use crate::state_machine::ToolResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

/// One entry in the conversation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    /// Whether a tool turn reports a failure
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn tool(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
        is_error: bool,
    ) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            tool_name: Some(tool_name.into()),
            is_error,
            ..Self::new(Role::Tool, content)
        }
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_call_id: None,
            tool_name: None,
            is_error: false,
            created_at: Utc::now(),
        }
    }

    /// Tool result view of a tool turn
    pub fn as_tool_result(&self) -> Option<ToolResult> {
        if self.role != Role::Tool {
            return None;
        }
        Some(ToolResult {
            tool_call_id: self.tool_call_id.clone()?,
            tool_name: self.tool_name.clone()?,
            content: self.content.clone(),
            is_error: self.is_error,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Tool results recorded after the most recent user turn
    pub fn tool_results_since_last_user(&self) -> Vec<ToolResult> {
        let start = self
            .turns
            .iter()
            .rposition(|turn| turn.role == Role::User)
            .map_or(0, |i| i + 1);
        self.turns[start..]
            .iter()
            .filter_map(Turn::as_tool_result)
            .collect()
    }

    /// Tool result recorded for a specific call id, wherever it sits in the log
    pub fn tool_result_for(&self, tool_call_id: &str) -> Option<ToolResult> {
        self.turns
            .iter()
            .rev()
            .filter(|turn| turn.tool_call_id.as_deref() == Some(tool_call_id))
            .find_map(Turn::as_tool_result)
    }

    /// Content of the latest assistant turn
    pub fn last_assistant(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::Assistant)
            .map(|turn| turn.content.as_str())
    }

    /// Most recent user and assistant turns as LLM messages, oldest first.
    ///
    /// Tool turns are not replayed; their outcome is visible in the
    /// assistant turn that followed them.
    pub fn recent_messages(&self, limit: usize) -> Vec<LlmMessage> {
        let mut messages: Vec<LlmMessage> = self
            .turns
            .iter()
            .rev()
            .filter_map(|turn| match turn.role {
                Role::User => Some(LlmMessage::user(turn.content.clone())),
                Role::Assistant => Some(LlmMessage::assistant(turn.content.clone())),
                Role::Tool => None,
            })
            .take(limit)
            .collect();
        messages.reverse();
        messages
    }
}
